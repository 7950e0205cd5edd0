// Copyright (c) 2025 vivo Mobile Communication Co., Ltd.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Board restart: drive the reboot pins, then reset the chip.

use crate::{
    error::BoardError,
    gpio::PinRegistry,
    of::ConfigTree,
    softconfig::set_group_active_pins_output,
    sys_config::{REBOOT_PINS, SOFTCONFIG_NODE},
};
use core::fmt;
use log::{debug, error, warn};

/// The chip reset unit.
pub trait ResetControl {
    /// Requests a system reset. On working hardware this does not return
    /// for long.
    fn request_reset(&self);

    /// Resets the chip. Parks the CPU if the reset unit ignores the request.
    fn system_reset(&self) -> ! {
        self.request_reset();
        error!("Unable to reboot via RCU");
        loop {
            core::hint::spin_loop();
        }
    }
}

/// Outcome of a step whose failure must not stop the caller.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<E> {
    Done,
    Discarded(E),
}

impl<E> Attempt<E> {
    pub fn is_done(&self) -> bool {
        matches!(self, Attempt::Done)
    }
}

/// Runs a step whose error is logged and dropped.
pub fn best_effort<E: fmt::Display>(what: &str, result: Result<(), E>) -> Attempt<E> {
    match result {
        Ok(()) => Attempt::Done,
        Err(e) => {
            warn!("{} failed, continuing: {}", what, e);
            Attempt::Discarded(e)
        }
    }
}

/// How far the restart preparation got before handing over to the reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartPath {
    Incompatible,
    NodeAbsent,
    Activated(Attempt<BoardError>),
}

/// Everything the restart does short of the reset itself.
pub fn prepare_restart<T, R>(tree: &T, registry: &R, compat: &str) -> RestartPath
where
    T: ConfigTree + ?Sized,
    R: PinRegistry + ?Sized,
{
    if !tree.machine_is_compatible(compat) {
        return RestartPath::Incompatible;
    }
    let Some(node) = tree.find_node_by_name(SOFTCONFIG_NODE) else {
        return RestartPath::NodeAbsent;
    };
    RestartPath::Activated(best_effort(
        REBOOT_PINS,
        set_group_active_pins_output(tree, registry, None, &node, REBOOT_PINS, true),
    ))
}

/// Restart hook: activates the reboot pins where the board has any, then
/// resets the chip whatever happened before.
pub fn restart<T, R, C>(tree: &T, registry: &R, reset: &C, compat: &str) -> !
where
    T: ConfigTree + ?Sized,
    R: PinRegistry + ?Sized,
    C: ResetControl + ?Sized,
{
    let path = prepare_restart(tree, registry, compat);
    debug!("restart: {:?}", path);
    reset.system_reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::PinError,
        gpio::{PinId, PinState},
        of::{GpioSpec, OfGpioFlags, StaticNode, StaticTree},
        testing::{expect_reset, FakeReset, ScriptedRegistry},
    };

    static TREE: StaticTree = StaticTree {
        compatible: &["adi,sc59x"],
        nodes: &[StaticNode {
            name: "softconfig_default",
            gpio_lists: &[(
                "reboot-pins",
                &[
                    GpioSpec::new(40, OfGpioFlags::ACTIVE_LOW),
                    GpioSpec::new(41, OfGpioFlags::empty()),
                ],
            )],
        }],
    };

    static NO_NODE: StaticTree = StaticTree {
        compatible: &["adi,sc59x"],
        nodes: &[],
    };

    fn pin(n: u32) -> PinId {
        PinId::new(n).unwrap()
    }

    #[test]
    fn test_best_effort() {
        assert_eq!(best_effort::<PinError>("step", Ok(())), Attempt::Done);
        let attempt = best_effort("step", Err(PinError::Busy));
        assert!(!attempt.is_done());
        assert_eq!(attempt, Attempt::Discarded(PinError::Busy));
    }

    #[test]
    fn test_incompatible_board_touches_no_pins() {
        let registry = ScriptedRegistry::new();
        let reset = FakeReset::new();
        assert_eq!(
            prepare_restart(&TREE, &registry, "adi,sc57x"),
            RestartPath::Incompatible
        );
        expect_reset(|| restart(&TREE, &registry, &reset, "adi,sc57x"));
        assert_eq!(reset.requests(), 1);
        assert_eq!(registry.requests(), 0);
        assert!(registry.driven().is_empty());
    }

    #[test]
    fn test_missing_node_still_resets() {
        let registry = ScriptedRegistry::new();
        let reset = FakeReset::new();
        expect_reset(|| restart(&NO_NODE, &registry, &reset, "adi,sc59x"));
        assert_eq!(reset.requests(), 1);
        assert!(registry.driven().is_empty());
        assert_eq!(
            prepare_restart(&NO_NODE, &registry, "adi,sc59x"),
            RestartPath::NodeAbsent
        );
    }

    #[test]
    fn test_activation_failure_still_resets() {
        let registry = ScriptedRegistry::new();
        registry.fail_drive(pin(40), PinError::Rejected(pin(40)));
        let reset = FakeReset::new();
        expect_reset(|| restart(&TREE, &registry, &reset, "adi,sc59x"));
        assert_eq!(reset.requests(), 1);
        assert!(registry.driven().is_empty());
        assert!(!registry.is_held(pin(40)));

        match prepare_restart(&TREE, &registry, "adi,sc59x") {
            RestartPath::Activated(Attempt::Discarded(BoardError::DriveFailed { pin: p, .. })) => {
                assert_eq!(p, pin(40))
            }
            other => panic!("unexpected path {:?}", other),
        }
    }

    #[test]
    fn test_success_drives_pins_then_resets() {
        let registry = ScriptedRegistry::new();
        let reset = FakeReset::new();
        expect_reset(|| restart(&TREE, &registry, &reset, "adi,sc59x"));
        assert_eq!(reset.requests(), 1);
        assert_eq!(
            registry.driven(),
            vec![(pin(40), PinState::Low), (pin(41), PinState::High)]
        );
        assert_eq!(registry.frees(), 2);
        assert!(!registry.is_held(pin(40)));
        assert!(!registry.is_held(pin(41)));
    }

    #[test]
    fn test_busy_reboot_pin_is_driven() {
        let registry = ScriptedRegistry::new();
        registry.hold_elsewhere(pin(41));
        assert_eq!(
            prepare_restart(&TREE, &registry, "adi,sc59x"),
            RestartPath::Activated(Attempt::Done)
        );
        assert_eq!(registry.driven().len(), 2);
        assert!(registry.is_held(pin(41)));
    }
}
