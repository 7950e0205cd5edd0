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

//! EMAC0 pad setup and the PHY fixups the EZ-KIT carriers need.

use crate::{error::BoardError, machine::Platform, system_regs::SystemRegisters};
use log::info;

pub const DP83865_PHY_ID: u32 = 0x2000_5c7a;
pub const DP83848_PHY_ID: u32 = 0x2000_5c90;

const REG_DP83865_AUX_CTRL: u16 = 0x12;
const BITP_AUX_CTRL_RGMII_EN: u16 = 12;
const RGMII_3COM_MODE: u16 = 3;

const REG_DP83848_PHY_MICR: u16 = 0x11;
const DP83848_PHY_MICR_INTEN: u16 = 0x2;
const DP83848_PHY_MICR_INT_OE: u16 = 0x1;

/// MDIO access to one attached PHY.
pub trait PhyBus {
    fn read(&mut self, reg: u16) -> Result<u16, BoardError>;
    fn write(&mut self, reg: u16, value: u16) -> Result<(), BoardError>;
}

pub type PhyFixupFn = fn(&mut dyn PhyBus) -> Result<(), BoardError>;

/// Register tweaks applied whenever a PHY with a matching id attaches.
#[derive(Debug, Clone, Copy)]
pub struct PhyFixup {
    pub phy_uid: u32,
    pub phy_uid_mask: u32,
    pub run: PhyFixupFn,
}

impl PhyFixup {
    pub fn matches(&self, uid: u32) -> bool {
        uid & self.phy_uid_mask == self.phy_uid & self.phy_uid_mask
    }
}

fn dp83865_fixup(bus: &mut dyn PhyBus) -> Result<(), BoardError> {
    let val = bus.read(REG_DP83865_AUX_CTRL)?;
    bus.write(
        REG_DP83865_AUX_CTRL,
        val | (RGMII_3COM_MODE << BITP_AUX_CTRL_RGMII_EN),
    )
}

fn dp83848_fixup(bus: &mut dyn PhyBus) -> Result<(), BoardError> {
    bus.write(
        REG_DP83848_PHY_MICR,
        DP83848_PHY_MICR_INTEN | DP83848_PHY_MICR_INT_OE,
    )
}

pub const DP83865_FIXUP: PhyFixup = PhyFixup {
    phy_uid: DP83865_PHY_ID,
    phy_uid_mask: 0xffff_ffff,
    run: dp83865_fixup,
};

pub const DP83848_FIXUP: PhyFixup = PhyFixup {
    phy_uid: DP83848_PHY_ID,
    phy_uid_mask: 0xffff_ffff,
    run: dp83848_fixup,
};

/// Routes EMAC0 to its RGMII pads and registers `fixups` with the PHY layer.
/// Does nothing without `phylib`.
pub fn init_ethernet(
    platform: &mut dyn Platform,
    regs: &SystemRegisters,
    fixups: &[PhyFixup],
) -> Result<(), BoardError> {
    if !cfg!(feature = "phylib") {
        return Ok(());
    }
    regs.select_rgmii();
    for fixup in fixups {
        platform.register_phy_fixup(*fixup)?;
    }
    info!("ethernet: {} phy fixups registered", fixups.len());
    Ok(())
}
