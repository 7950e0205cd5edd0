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

//! Static I/O mappings set up before the MMU-backed allocators exist.

use crate::{
    machine::Platform,
    sys_config::{self, SYS_L2_START, SYS_L2_UNCACHED_SIZE, SYS_MMR_BASE, SYS_MMR_SIZE, SYS_SRAM_BASE},
};

pub const PAGE_SHIFT: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemType {
    Device,
    MemoryRwx,
    MemoryRwxNonCached,
}

/// One fixed virtual mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoDesc {
    pub virtual_addr: usize,
    pub pfn: u32,
    pub length: u32,
    pub mem_type: MemType,
}

/// Virtual address of a statically mapped physical address.
pub const fn io_address(phys: u32) -> usize {
    (phys & 0x0fff_ffff)
        .wrapping_add((phys >> 4) & 0x0f00_0000)
        .wrapping_add(0xf000_0000) as usize
}

pub const fn phys_to_pfn(phys: u32) -> u32 {
    phys >> PAGE_SHIFT
}

const fn io_desc(phys: u32, length: u32, mem_type: MemType) -> IoDesc {
    IoDesc {
        virtual_addr: io_address(phys),
        pfn: phys_to_pfn(phys),
        length,
        mem_type,
    }
}

/// SRAM shared with the DSP cores must not be cached.
const SRAM_TYPE: MemType = if cfg!(feature = "icc") {
    MemType::MemoryRwxNonCached
} else {
    MemType::MemoryRwx
};

const fn sc5xx_io_desc(sram_size: u32) -> [IoDesc; 3] {
    [
        io_desc(SYS_MMR_BASE, SYS_MMR_SIZE, MemType::Device),
        io_desc(SYS_L2_START, SYS_L2_UNCACHED_SIZE, MemType::MemoryRwxNonCached),
        io_desc(SYS_SRAM_BASE, sram_size, SRAM_TYPE),
    ]
}

pub static SC57X_IO_DESC: [IoDesc; 3] = sc5xx_io_desc(sys_config::sc57x::SYS_SRAM_SIZE);
pub static SC59X_IO_DESC: [IoDesc; 3] = sc5xx_io_desc(sys_config::sc59x::SYS_SRAM_SIZE);

pub fn map_io(platform: &mut dyn Platform, table: &[IoDesc]) {
    platform.iotable_init(table);
}
