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

//! Machine descriptors and the boot sequence that runs their callbacks.

use crate::{
    boards::Board,
    error::BoardError,
    ethernet::PhyFixup,
    fault::FaultHook,
    gpio::PinRegistry,
    memmap::IoDesc,
    of::ConfigTree,
    restart::ResetControl,
    system_regs::SystemRegisters,
};
use bitflags::bitflags;
use log::info;

/// Kernel services the machine callbacks hand their tables to.
pub trait Platform {
    fn iotable_init(&mut self, table: &[IoDesc]);
    fn hook_fault_code(&mut self, hook: FaultHook);
    fn gic_init(&mut self, dist_base: usize, cpu_base: usize);
    fn timer_init(&mut self);
    fn l2x0_init(&mut self, aux_val: u32, aux_mask: u32);
    /// Creates platform devices for the tree, naming the ones in `lookup`.
    fn of_platform_populate(&mut self, lookup: &[AuxData]) -> Result<(), BoardError>;
    fn register_phy_fixup(&mut self, fixup: PhyFixup) -> Result<(), BoardError>;
}

/// Fixed device name for a tree node, matched by compatible and address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxData {
    pub compatible: &'static str,
    pub phys_addr: u32,
    pub name: &'static str,
}

impl AuxData {
    pub const fn new(compatible: &'static str, phys_addr: u32, name: &'static str) -> Self {
        Self {
            compatible,
            phys_addr,
            name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L2cAux {
    pub val: u32,
    pub mask: u32,
}

bitflags! {
    /// Callbacks a machine provides.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MachineHooks: u8 {
        const MAP_IO = 1 << 0;
        const INIT_EARLY = 1 << 1;
        const INIT_IRQ = 1 << 2;
        const INIT_TIME = 1 << 3;
        const INIT_MACHINE = 1 << 4;
        const RESTART = 1 << 5;
    }
}

/// What the boot callbacks get to work with.
pub struct BootContext<'a, T: ?Sized, R: ?Sized> {
    pub platform: &'a mut dyn Platform,
    pub tree: &'a T,
    pub registry: &'a R,
    pub regs: &'a SystemRegisters,
}

#[derive(Debug)]
pub struct MachineDesc {
    pub name: &'static str,
    pub dt_compat: &'static [&'static str],
    pub l2c_aux: Option<L2cAux>,
    pub hooks: MachineHooks,
    pub board: Board,
}

impl MachineDesc {
    /// Runs the machine's callbacks in kernel order.
    pub fn boot<T, R>(&self, ctx: &mut BootContext<'_, T, R>)
    where
        T: ConfigTree + ?Sized,
        R: PinRegistry + ?Sized,
    {
        info!("Machine model: {}", self.name);
        if self.hooks.contains(MachineHooks::MAP_IO) {
            self.board.map_io(ctx.platform);
        }
        if self.hooks.contains(MachineHooks::INIT_EARLY) {
            self.board.init_early(ctx.platform);
        }
        if self.hooks.contains(MachineHooks::INIT_IRQ) {
            self.board.init_irq(ctx.platform);
        }
        if let Some(l2c) = self.l2c_aux {
            ctx.platform.l2x0_init(l2c.val, l2c.mask);
        }
        if self.hooks.contains(MachineHooks::INIT_TIME) {
            self.board.init_time(ctx.platform);
        }
        if self.hooks.contains(MachineHooks::INIT_MACHINE) {
            self.board.init_machine(ctx);
        }
    }

    /// Restarts through the machine's hook, or resets straight away when it
    /// has none.
    pub fn restart<T, R, C>(&self, tree: &T, registry: &R, reset: &C) -> !
    where
        T: ConfigTree + ?Sized,
        R: PinRegistry + ?Sized,
        C: ResetControl + ?Sized,
    {
        if self.hooks.contains(MachineHooks::RESTART) {
            self.board.restart(tree, registry, reset)
        } else {
            reset.system_reset()
        }
    }
}

/// First machine in `machines` that the tree's root is compatible with.
pub fn select_machine<'m, T>(tree: &T, machines: &'m [MachineDesc]) -> Option<&'m MachineDesc>
where
    T: ConfigTree + ?Sized,
{
    machines
        .iter()
        .find(|machine| machine.dt_compat.iter().any(|c| tree.machine_is_compatible(c)))
}
