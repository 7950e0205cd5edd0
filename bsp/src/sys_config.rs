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

#![allow(dead_code)]

/* ================================================================================ */
/* ================              Shared memory map                 ================ */
/* ================================================================================ */

/* System MMR window, mapped as device memory */
pub const SYS_MMR_BASE: u32 = 0x31000000;
pub const SYS_MMR_SIZE: u32 = 0x01000000;

/* L2 SRAM; the first 16K is kept uncached for the boot handoff area */
pub const SYS_L2_START: u32 = 0x20080000;
pub const SYS_L2_UNCACHED_SIZE: u32 = 0x4000;
pub const SYS_SRAM_BASE: u32 = SYS_L2_START + SYS_L2_UNCACHED_SIZE;

/* System peripherals */
pub const REG_PADS0_BASE: u32 = 0x31004600;
pub const REG_RCU0_CTL: u32 = 0x3108B000;
pub const REG_SPU0_CTL: u32 = 0x3108C000;
pub const SPU0_SIZE: u32 = 0x1000;
pub const SPU_SECUREP_OFFSET: u32 = 0xA00;
pub const SPU_SECUREP_COUNT: usize = ((SPU0_SIZE - SPU_SECUREP_OFFSET) / 4) as usize;

/* GPIO ports */
pub const REG_PORTA_BASE: u32 = 0x31004000;
pub const PORT_STRIDE: u32 = 0x80;
pub const GPIO_PER_PORT: u32 = 16;

/* GIC */
pub const GIC_PORT0: u32 = 0x31201000;
pub const GIC_PORT1: u32 = 0x31202000;

pub mod sc57x {
    pub const DT_COMPAT: &str = "adi,sc57x";
    pub const MACHINE_NAME: &str = "SC57x-EZKIT (Device Tree Support)";
    pub const SYS_SRAM_SIZE: u32 = 0x3C000;
    pub const GPIO_PORT_COUNT: usize = 6;

    /* Peripherals named in the platform device lookup table */
    pub const UART0_REVID: u32 = 0x31003000;
    pub const REG_WDOG0_CTL: u32 = 0x31008000;
}

pub mod sc59x {
    pub const DT_COMPAT: &str = "adi,sc59x";
    pub const MACHINE_NAME: &str = "SC59x-EZKIT (Device Tree Support)";
    pub const SYS_SRAM_SIZE: u32 = 0x7C000;
    pub const GPIO_PORT_COUNT: usize = 9;
}

/* ================================================================================ */
/* ================                 Softconfig                     ================ */
/* ================================================================================ */

pub const SOFTCONFIG_NODE: &str = "softconfig_default";
pub const REBOOT_PINS: &str = "reboot-pins";
pub const BOOT_PINS: &str = "boot-pins";
