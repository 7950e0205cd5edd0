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

use super::{GpioController, PinId, PinState};
use crate::{error::PinError, static_ref::StaticRef, sys_config};
use embedded_hal::digital::{ErrorType, OutputPin};
use tock_registers::{
    interfaces::{Readable, Writeable},
    register_structs,
    registers::{ReadOnly, ReadWrite},
};

register_structs! {
    /// ADSP PORT block. Every `_set`/`_clear` register is write-one-to-act.
    pub GpioPortRegisters {
        /// Function enable; a set bit hands the pin to its peripheral
        (0x00 => fer: ReadWrite<u32>),
        (0x04 => fer_set: ReadWrite<u32>),
        (0x08 => fer_clear: ReadWrite<u32>),

        /// Output data
        (0x0c => data: ReadWrite<u32>),
        (0x10 => data_set: ReadWrite<u32>),
        (0x14 => data_clear: ReadWrite<u32>),

        /// Direction; a set bit drives the pin
        (0x18 => dir: ReadWrite<u32>),
        (0x1c => dir_set: ReadWrite<u32>),
        (0x20 => dir_clear: ReadWrite<u32>),

        /// Input buffer enable
        (0x24 => inen: ReadWrite<u32>),
        (0x28 => inen_set: ReadWrite<u32>),
        (0x2c => inen_clear: ReadWrite<u32>),

        (0x30 => mux: ReadWrite<u32>),
        (0x34 => toggle: ReadWrite<u32>),
        (0x38 => polar: ReadWrite<u32>),
        (0x3c => polar_set: ReadWrite<u32>),
        (0x40 => polar_clear: ReadWrite<u32>),
        (0x44 => lock: ReadWrite<u32>),
        (0x48 => _spare),

        (0x7c => revid: ReadOnly<u32>),

        /// End
        (0x80 => @END),
    }
}

/// One 16-pin ADSP GPIO port.
pub struct AdspGpioPort {
    regs: StaticRef<GpioPortRegisters>,
    base: u32,
}

impl AdspGpioPort {
    pub const fn new(regs: StaticRef<GpioPortRegisters>, base: u32) -> Self {
        Self { regs, base }
    }

    /// Port `index` (0 for PORTA) at its default address, numbered from
    /// `index * 16`.
    ///
    /// ## Safety
    ///
    /// The system MMR window must be mapped at `io_address` of the port.
    pub unsafe fn port(index: u32, translate: fn(u32) -> usize) -> Self {
        let phys = sys_config::REG_PORTA_BASE + index * sys_config::PORT_STRIDE;
        Self::new(
            StaticRef::from_addr(translate(phys)),
            index * sys_config::GPIO_PER_PORT,
        )
    }

    pub fn pin(&self, offset: u32) -> Option<AdspGpioPin<'_>> {
        (offset < sys_config::GPIO_PER_PORT).then_some(AdspGpioPin { port: self, offset })
    }

    pub fn revision(&self) -> u32 {
        self.regs.revid.get()
    }
}

impl GpioController for AdspGpioPort {
    fn base(&self) -> u32 {
        self.base
    }

    fn ngpio(&self) -> u32 {
        sys_config::GPIO_PER_PORT
    }

    fn direction_output(&self, offset: u32, level: PinState) -> Result<(), PinError> {
        let mut pin = self.pin(offset).ok_or_else(|| {
            PinError::Rejected(PinId::new(self.base + offset).unwrap_or(PinId(0)))
        })?;
        // Latch the level before the driver turns on so the pin never glitches.
        match pin.set_state(level) {
            Ok(()) => {}
            Err(e) => match e {},
        }
        let bit = 1 << offset;
        self.regs.fer_clear.set(bit);
        self.regs.inen_clear.set(bit);
        self.regs.dir_set.set(bit);
        Ok(())
    }
}

pub struct AdspGpioPin<'a> {
    port: &'a AdspGpioPort,
    offset: u32,
}

impl ErrorType for AdspGpioPin<'_> {
    type Error = core::convert::Infallible;
}

impl OutputPin for AdspGpioPin<'_> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.port.regs.data_set.set(1 << self.offset);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.port.regs.data_clear.set(1 << self.offset);
        Ok(())
    }
}
