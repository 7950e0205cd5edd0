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
    ethernet::{init_ethernet, DP83865_FIXUP},
    fault::SC57X_ABORT_HOOK,
    gpio::PinRegistry,
    machine::{AuxData, BootContext, L2cAux, MachineDesc, MachineHooks, Platform},
    memmap::{self, SC57X_IO_DESC},
    of::ConfigTree,
    sys_config::sc57x::{DT_COMPAT, MACHINE_NAME, REG_WDOG0_CTL, UART0_REVID},
};
use log::{error, info};

pub const MACHINE: MachineDesc = MachineDesc {
    name: MACHINE_NAME,
    dt_compat: &[DT_COMPAT],
    l2c_aux: Some(L2cAux { val: 0, mask: !0 }),
    hooks: MachineHooks::MAP_IO
        .union(MachineHooks::INIT_EARLY)
        .union(MachineHooks::INIT_MACHINE),
    board: Board::Sc57xEzkit,
};

static AUXDATA: [AuxData; 4] = [
    AuxData::new("adi,adi2-pinctrl", 0, "pinctrl-adi2.0"),
    AuxData::new("arm,adi-uart4", UART0_REVID, "adi-uart4.0"),
    AuxData::new("adi,watchdog", REG_WDOG0_CTL, "adi-watchdog.0"),
    AuxData::new("adi,spi3", 0, "adi-spi3.2"),
];

pub(super) fn map_io(platform: &mut dyn Platform) {
    memmap::map_io(platform, &SC57X_IO_DESC);
}

/// The boot ROM can leave a pending imprecise abort behind; install the
/// filter before interrupts are unmasked.
pub(super) fn init_early(platform: &mut dyn Platform) {
    platform.hook_fault_code(SC57X_ABORT_HOOK);
}

pub(super) fn init_machine<T, R>(ctx: &mut BootContext<'_, T, R>)
where
    T: ConfigTree + ?Sized,
    R: PinRegistry + ?Sized,
{
    info!("sc57x_init: registering device resources");
    if let Err(e) = ctx.platform.of_platform_populate(&AUXDATA) {
        error!("sc57x_init: populating devices failed: {}", e);
    }
    if let Err(e) = init_ethernet(ctx.platform, ctx.regs, &[DP83865_FIXUP]) {
        error!("sc57x_init: ethernet setup failed: {}", e);
    }
}
