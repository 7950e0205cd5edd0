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

//! System control blocks shared by every SC5xx part: the reset control
//! unit, the system protection unit and the pad controller.

use crate::{
    error::BoardError,
    restart::ResetControl,
    static_ref::StaticRef,
    sys_config::{REG_PADS0_BASE, REG_RCU0_CTL, REG_SPU0_CTL, SPU_SECUREP_COUNT},
};
use log::debug;
use tock_registers::{
    interfaces::{ReadWriteable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite},
};

register_structs! {
    pub RcuRegisters {
        /// Control; writing SYSRST resets the whole system
        (0x00 => ctl: ReadWrite<u32, RCU_CTL::Register>),
        (0x04 => stat: ReadOnly<u32>),
        (0x08 => crctl: ReadWrite<u32>),
        (0x0c => crstat: ReadOnly<u32>),
        (0x10 => @END),
    }
}

register_structs! {
    pub SpuRegisters {
        (0x000 => ctl: ReadWrite<u32>),
        (0x004 => stat: ReadOnly<u32>),
        (0x008 => _reserved0),
        /// Secure peripheral control, one per protected slave
        (0xa00 => securep: [ReadWrite<u32, SECUREP::Register>; 384]),
        (0x1000 => @END),
    }
}

const _: () = assert!(SPU_SECUREP_COUNT == 384);

register_structs! {
    pub PadsRegisters {
        (0x00 => eacfg: ReadWrite<u32>),
        (0x04 => pcfg0: ReadWrite<u32, PCFG0::Register>),
        (0x08 => _reserved0),
        /// DAI input buffer enables, one bit per pin
        (0x90 => dai0_ie: ReadWrite<u32>),
        (0x94 => dai1_ie: ReadWrite<u32>),
        (0x98 => @END),
    }
}

register_bitfields![u32,
    RCU_CTL [
        SYSRST OFFSET(0) NUMBITS(1) []
    ],
    SECUREP [
        SSEC OFFSET(0) NUMBITS(1) [],
        MSEC OFFSET(1) NUMBITS(1) []
    ],
    PCFG0 [
        PTPCLK0 OFFSET(0) NUMBITS(2) [],
        EMACRESET OFFSET(2) NUMBITS(1) [],
        EMACPHYISEL OFFSET(3) NUMBITS(2) [
            Mii = 0,
            Rgmii = 1,
            Rmii = 2
        ],
        AUXIE OFFSET(17) NUMBITS(1) [],
        EMAC0_ENDIANNESS OFFSET(19) NUMBITS(1) [],
        EMAC1_ENDIANNESS OFFSET(20) NUMBITS(1) []
    ]
];

/// The system control register blocks, created once at boot and never
/// released.
pub struct SystemRegisters {
    rcu: StaticRef<RcuRegisters>,
    spu: StaticRef<SpuRegisters>,
    pads: StaticRef<PadsRegisters>,
}

impl SystemRegisters {
    pub const fn new(
        rcu: StaticRef<RcuRegisters>,
        spu: StaticRef<SpuRegisters>,
        pads: StaticRef<PadsRegisters>,
    ) -> Self {
        Self { rcu, spu, pads }
    }

    /// The blocks at their fixed physical addresses, seen through `translate`.
    ///
    /// ## Safety
    ///
    /// `translate` must yield addresses that stay mapped for the life of the
    /// system.
    pub unsafe fn mapped(translate: fn(u32) -> usize) -> Self {
        Self::new(
            StaticRef::from_addr(translate(REG_RCU0_CTL)),
            StaticRef::from_addr(translate(REG_SPU0_CTL)),
            StaticRef::from_addr(translate(REG_PADS0_BASE)),
        )
    }

    /// Grants (or revokes) secure master access to SPU slave `n`.
    pub fn set_spu_securep_msec(&self, n: usize, msec: bool) -> Result<(), BoardError> {
        let reg = self.spu.securep.get(n).ok_or(BoardError::InvalidArgument)?;
        if msec {
            reg.modify(SECUREP::SSEC::SET + SECUREP::MSEC::SET);
        } else {
            reg.modify(SECUREP::SSEC::CLEAR + SECUREP::MSEC::CLEAR);
        }
        Ok(())
    }

    /// Turns on the input buffers of every DAI pin.
    pub fn pads_init(&self) {
        self.pads.dai0_ie.set(0xffff_ffff);
        self.pads.dai1_ie.set(0xffff_ffff);
    }

    /// Selects the RGMII interface for EMAC0 and takes it out of reset.
    pub fn select_rgmii(&self) {
        self.pads
            .pcfg0
            .modify(PCFG0::EMACPHYISEL::Rgmii + PCFG0::EMACRESET::SET);
        debug!("pads: EMAC0 set to RGMII");
    }
}

impl ResetControl for SystemRegisters {
    fn request_reset(&self) {
        self.rcu.ctl.write(RCU_CTL::SYSRST::SET);
    }
}
