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

mod sc57x_ezkit;
mod sc59x_ezkit;

use crate::{
    gpio::{AdspGpioPort, PinRegistry},
    machine::{BootContext, MachineDesc, Platform},
    of::ConfigTree,
    restart::ResetControl,
};
use alloc::vec::Vec;

pub static MACHINES: &[MachineDesc] = &[sc57x_ezkit::MACHINE, sc59x_ezkit::MACHINE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Sc57xEzkit,
    Sc59xEzkit,
}

impl Board {
    pub fn gpio_port_count(self) -> usize {
        match self {
            Board::Sc57xEzkit => crate::sys_config::sc57x::GPIO_PORT_COUNT,
            Board::Sc59xEzkit => crate::sys_config::sc59x::GPIO_PORT_COUNT,
        }
    }

    /// The board's GPIO ports, numbered from 0 in port order.
    ///
    /// ## Safety
    ///
    /// See [`AdspGpioPort::port`].
    pub unsafe fn gpio_ports(self, translate: fn(u32) -> usize) -> Vec<AdspGpioPort> {
        (0..self.gpio_port_count() as u32)
            .map(|index| AdspGpioPort::port(index, translate))
            .collect()
    }

    pub(crate) fn map_io(self, platform: &mut dyn Platform) {
        match self {
            Board::Sc57xEzkit => sc57x_ezkit::map_io(platform),
            Board::Sc59xEzkit => sc59x_ezkit::map_io(platform),
        }
    }

    pub(crate) fn init_early(self, platform: &mut dyn Platform) {
        match self {
            Board::Sc57xEzkit => sc57x_ezkit::init_early(platform),
            Board::Sc59xEzkit => {}
        }
    }

    pub(crate) fn init_irq(self, platform: &mut dyn Platform) {
        match self {
            Board::Sc57xEzkit => {}
            Board::Sc59xEzkit => sc59x_ezkit::init_irq(platform),
        }
    }

    pub(crate) fn init_time(self, platform: &mut dyn Platform) {
        match self {
            Board::Sc57xEzkit => {}
            Board::Sc59xEzkit => sc59x_ezkit::init_time(platform),
        }
    }

    pub(crate) fn init_machine<T, R>(self, ctx: &mut BootContext<'_, T, R>)
    where
        T: ConfigTree + ?Sized,
        R: PinRegistry + ?Sized,
    {
        match self {
            Board::Sc57xEzkit => sc57x_ezkit::init_machine(ctx),
            Board::Sc59xEzkit => sc59x_ezkit::init_machine(ctx),
        }
    }

    pub(crate) fn restart<T, R, C>(self, tree: &T, registry: &R, reset: &C) -> !
    where
        T: ConfigTree + ?Sized,
        R: PinRegistry + ?Sized,
        C: ResetControl + ?Sized,
    {
        match self {
            Board::Sc57xEzkit => reset.system_reset(),
            Board::Sc59xEzkit => sc59x_ezkit::restart(tree, registry, reset),
        }
    }
}
