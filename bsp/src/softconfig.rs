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

//! Softconfig: pins a board lists in its configuration tree to be driven to
//! a state at a given point of the machine's life (boot, reboot).

use crate::{
    error::{BoardError, PinError},
    gpio::{Owner, PinClaim, PinId, PinRegistry, PinState},
    of::ConfigTree,
    sys_config::{BOOT_PINS, SOFTCONFIG_NODE},
};
use alloc::string::String;
use log::{debug, error, info};

/// A pin resolved from a softconfig list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftconfigPin {
    pub pin: PinId,
    pub active_low: bool,
}

/// Level that puts a pin in the logical `active` state.
pub fn output_level(active: bool, active_low: bool) -> PinState {
    PinState::from(active != active_low)
}

/// Drives entry `index` of the gpio list `list` under `node` to its active
/// (or inactive) level and returns the pin it resolved to.
///
/// Without an `owner` the pin is claimed only for the duration of the call.
/// With one, the claim stays with the owner and is released by its teardown.
/// A pin somebody else already holds is driven anyway, without claiming it.
pub fn set_active_pin_output<T, R>(
    tree: &T,
    registry: &R,
    owner: Option<&Owner>,
    node: &T::Node,
    list: &str,
    index: usize,
    active: bool,
) -> Result<SoftconfigPin, BoardError>
where
    T: ConfigTree + ?Sized,
    R: PinRegistry + ?Sized,
{
    let Some((pin, active_low)) = tree
        .named_gpio(node, list, index)
        .and_then(|spec| Some((PinId::new(spec.pin)?, spec.active_low())))
    else {
        error!("invalid {} entry {}", list, index);
        return Err(BoardError::NotFound {
            list: String::from(list),
            index,
        });
    };

    let acquired = match owner {
        None => PinClaim::request(registry, pin, list).map(Some),
        Some(owner) => registry.request_managed(owner, pin).map(|()| None),
    };
    // Held until the end of this function, so every return below frees it.
    let _claim = match acquired {
        Ok(claim) => claim,
        Err(PinError::Busy) => {
            debug!("{} pin {} is busy now", list, pin);
            None
        }
        Err(e) => {
            error!("can't request {} pin {}: {}", list, pin, e);
            return Err(BoardError::AcquireFailed {
                list: String::from(list),
                pin,
                source: e,
            });
        }
    };

    registry
        .direction_output(pin, output_level(active, active_low))
        .map_err(|e| {
            error!("can't set direction for {} pin {}: {}", list, pin, e);
            BoardError::DriveFailed {
                list: String::from(list),
                pin,
                source: e,
            }
        })?;

    Ok(SoftconfigPin { pin, active_low })
}

/// Drives every entry of `list` in ascending order, stopping at the first
/// failure. Pins driven before the failing entry keep their new level.
pub fn set_group_active_pins_output<T, R>(
    tree: &T,
    registry: &R,
    owner: Option<&Owner>,
    node: &T::Node,
    list: &str,
    active: bool,
) -> Result<(), BoardError>
where
    T: ConfigTree + ?Sized,
    R: PinRegistry + ?Sized,
{
    for index in 0..tree.gpio_named_count(node, list) {
        set_active_pin_output(tree, registry, owner, node, list, index, active)?;
    }
    Ok(())
}

/// Releases every `boot-pins` entry of a compatible board.
pub fn softconfig_init<T, R>(tree: &T, registry: &R, compat: &'static str) -> Result<(), BoardError>
where
    T: ConfigTree + ?Sized,
    R: PinRegistry + ?Sized,
{
    if !tree.machine_is_compatible(compat) {
        return Err(BoardError::Incompatible(compat));
    }
    let node = tree
        .find_node_by_name(SOFTCONFIG_NODE)
        .ok_or(BoardError::NodeAbsent(SOFTCONFIG_NODE))?;
    info!("softconfig: releasing {}", BOOT_PINS);
    set_group_active_pins_output(tree, registry, None, &node, BOOT_PINS, false)
}
