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

#![cfg_attr(not(test), no_std)]

//! Board support for the ADI SC57x and SC59x EZ-KITs: machine descriptors,
//! early mappings, and the softconfig pins driven at boot and at restart.

extern crate alloc;

pub mod boards;
pub mod error;
pub mod ethernet;
pub mod fault;
pub mod gpio;
pub mod logger;
pub mod machine;
pub mod memmap;
pub mod of;
pub mod restart;
pub mod softconfig;
pub mod static_ref;
pub mod sys_config;
pub mod system_regs;

#[cfg(test)]
mod testing;

pub use error::{BoardError, PinError};
pub use machine::{select_machine, BootContext, MachineDesc, Platform};
