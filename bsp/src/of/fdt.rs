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

use super::{ConfigTree, GpioSpec, OfGpioFlags};
use crate::gpio::ARCH_NR_GPIOS;
use alloc::vec::Vec;
use flat_device_tree::{node::FdtNode, Fdt};
use log::{debug, warn};

/// Pins per controller when the node carries no `ngpios`.
const DEFAULT_NGPIOS: u32 = 16;
const DEFAULT_GPIO_CELLS: usize = 2;

#[derive(Debug, Clone, Copy)]
struct ChipWindow {
    phandle: u32,
    base: u32,
    ngpios: u32,
    cells: usize,
}

/// [`ConfigTree`] over a flattened device tree.
///
/// GPIO controllers are numbered in tree order, each taking `ngpios` global
/// numbers, which is how the ADSP port driver registers its banks. A
/// controller that would not fit below `ARCH_NR_GPIOS` ends the numbering.
pub struct FdtTree<'a> {
    fdt: &'a Fdt<'a>,
    chips: Vec<ChipWindow>,
}

fn be_u32(bytes: &[u8]) -> Option<u32> {
    Some(u32::from_be_bytes(bytes.get(..4)?.try_into().ok()?))
}

fn cells(bytes: &[u8]) -> impl Iterator<Item = u32> + '_ {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
}

fn unit_name<'n>(name: &'n str) -> &'n str {
    name.split('@').next().unwrap_or(name)
}

impl<'a> FdtTree<'a> {
    pub fn new(fdt: &'a Fdt<'a>) -> Self {
        let mut chips = Vec::new();
        let mut base: u32 = 0;
        for node in fdt.all_nodes() {
            if node.property("gpio-controller").is_none() {
                continue;
            }
            let ngpios = node
                .property("ngpios")
                .and_then(|p| be_u32(p.value))
                .unwrap_or(DEFAULT_NGPIOS);
            let cells = node
                .property("#gpio-cells")
                .and_then(|p| be_u32(p.value))
                .map_or(DEFAULT_GPIO_CELLS, |c| c as usize);
            let Some(end) = base
                .checked_add(ngpios)
                .filter(|end| *end <= ARCH_NR_GPIOS)
            else {
                warn!(
                    "gpio controller {} ({} pins at base {}) exceeds the gpio space, ignoring it and the rest",
                    node.name, ngpios, base
                );
                break;
            };
            match node.property("phandle").and_then(|p| be_u32(p.value)) {
                Some(phandle) => {
                    debug!("gpio controller {} at base {}", node.name, base);
                    chips.push(ChipWindow {
                        phandle,
                        base,
                        ngpios,
                        cells,
                    });
                }
                None => warn!("gpio controller {} has no phandle", node.name),
            }
            base = end;
        }
        Self { fdt, chips }
    }

    fn chip(&self, phandle: u32) -> Option<&ChipWindow> {
        self.chips.iter().find(|chip| chip.phandle == phandle)
    }

    /// Splits a gpio list into `(controller, argument cells)` entries. A zero
    /// phandle is an empty slot; an unknown one ends the list.
    fn entries(&self, value: &[u8]) -> Vec<(Option<ChipWindow>, Vec<u32>)> {
        let raw: Vec<u32> = cells(value).collect();
        let mut entries = Vec::new();
        let mut at = 0;
        while at < raw.len() {
            let phandle = raw[at];
            at += 1;
            if phandle == 0 {
                entries.push((None, Vec::new()));
                continue;
            }
            let Some(chip) = self.chip(phandle).copied() else {
                warn!("gpio list references unknown phandle {:#x}", phandle);
                break;
            };
            let Some(args) = raw.get(at..at + chip.cells) else {
                break;
            };
            entries.push((Some(chip), args.to_vec()));
            at += chip.cells;
        }
        entries
    }
}

impl<'a> ConfigTree for FdtTree<'a> {
    type Node = FdtNode<'a, 'a>;

    fn find_node_by_name(&self, name: &str) -> Option<Self::Node> {
        self.fdt.all_nodes().find(|node| unit_name(node.name) == name)
    }

    fn machine_is_compatible(&self, compat: &str) -> bool {
        self.fdt
            .find_node("/")
            .and_then(|root| root.compatible())
            .is_some_and(|compatible| compatible.all().any(|c| c == compat))
    }

    fn gpio_named_count(&self, node: &Self::Node, prop: &str) -> usize {
        node.property(prop)
            .map_or(0, |p| self.entries(p.value).len())
    }

    fn named_gpio(&self, node: &Self::Node, prop: &str, index: usize) -> Option<GpioSpec> {
        let value = node.property(prop)?.value;
        let (chip, args) = self.entries(value).into_iter().nth(index)?;
        let chip = chip?;
        let offset = *args.first()?;
        if offset >= chip.ngpios {
            return None;
        }
        let flags = args
            .get(1)
            .map_or(OfGpioFlags::empty(), |f| OfGpioFlags::from_bits_truncate(*f));
        Some(GpioSpec::new(chip.base + offset, flags))
    }
}
