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

use super::Board;
use crate::{
    ethernet::{init_ethernet, DP83848_FIXUP, DP83865_FIXUP},
    gpio::PinRegistry,
    machine::{BootContext, MachineDesc, MachineHooks, Platform},
    memmap::{self, io_address, SC59X_IO_DESC},
    of::ConfigTree,
    restart::{self, ResetControl},
    softconfig::softconfig_init,
    sys_config::{
        sc59x::{DT_COMPAT, MACHINE_NAME},
        GIC_PORT0, GIC_PORT1,
    },
};
use log::{error, info};

pub const MACHINE: MachineDesc = MachineDesc {
    name: MACHINE_NAME,
    dt_compat: &[DT_COMPAT],
    l2c_aux: None,
    hooks: MachineHooks::MAP_IO
        .union(MachineHooks::INIT_IRQ)
        .union(MachineHooks::INIT_TIME)
        .union(MachineHooks::INIT_MACHINE)
        .union(MachineHooks::RESTART),
    board: Board::Sc59xEzkit,
};

pub(super) fn map_io(platform: &mut dyn Platform) {
    memmap::map_io(platform, &SC59X_IO_DESC);
}

pub(super) fn init_irq(platform: &mut dyn Platform) {
    platform.gic_init(io_address(GIC_PORT0), io_address(GIC_PORT1));
}

pub(super) fn init_time(platform: &mut dyn Platform) {
    platform.timer_init();
}

pub(super) fn init_machine<T, R>(ctx: &mut BootContext<'_, T, R>)
where
    T: ConfigTree + ?Sized,
    R: PinRegistry + ?Sized,
{
    info!("sc59x_init: registering device resources");
    if let Err(e) = ctx.platform.of_platform_populate(&[]) {
        error!("sc59x_init: populating devices failed: {}", e);
    }
    if let Err(e) = init_ethernet(ctx.platform, ctx.regs, &[DP83865_FIXUP, DP83848_FIXUP]) {
        error!("sc59x_init: ethernet setup failed: {}", e);
    }
    ctx.regs.pads_init();
    if let Err(e) = softconfig_init(ctx.tree, ctx.registry, DT_COMPAT) {
        error!("sc59x_init: boot pins not released: {}", e);
    }
}

pub(super) fn restart<T, R, C>(tree: &T, registry: &R, reset: &C) -> !
where
    T: ConfigTree + ?Sized,
    R: PinRegistry + ?Sized,
    C: ResetControl + ?Sized,
{
    restart::restart(tree, registry, reset, DT_COMPAT)
}
