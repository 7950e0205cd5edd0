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

//! Read access to the board's configuration tree.

mod fdt;
mod static_tree;

pub use self::fdt::FdtTree;
pub use static_tree::{StaticNode, StaticTree};

use bitflags::bitflags;

bitflags! {
    /// Flags cell of a gpio specifier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OfGpioFlags: u32 {
        const ACTIVE_LOW = 0x1;
        const SINGLE_ENDED = 0x2;
        const OPEN_DRAIN = 0x4;
        const TRANSITORY = 0x8;
        const PULL_UP = 0x10;
        const PULL_DOWN = 0x20;
    }
}

/// One decoded entry of a gpio list property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioSpec {
    /// Global GPIO number, not yet range checked.
    pub pin: u32,
    pub flags: OfGpioFlags,
}

impl GpioSpec {
    pub const fn new(pin: u32, flags: OfGpioFlags) -> Self {
        Self { pin, flags }
    }

    pub fn active_low(&self) -> bool {
        self.flags.contains(OfGpioFlags::ACTIVE_LOW)
    }
}

pub trait ConfigTree {
    type Node;

    fn find_node_by_name(&self, name: &str) -> Option<Self::Node>;

    /// Whether the root node lists `compat` in its compatible property.
    fn machine_is_compatible(&self, compat: &str) -> bool;

    /// Number of entries in the gpio list `prop` of `node`, 0 when absent.
    fn gpio_named_count(&self, node: &Self::Node, prop: &str) -> usize;

    /// Entry `index` of the gpio list `prop`. `None` covers a missing
    /// property, an index past the end and an unresolvable controller.
    fn named_gpio(&self, node: &Self::Node, prop: &str, index: usize) -> Option<GpioSpec>;
}
