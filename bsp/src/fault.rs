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

//! Early data abort hooks.

use log::warn;
use spin::Mutex;

/// Fault status the boot ROM leaves behind on SC57x: imprecise external
/// abort with the write-not-read and external bits set.
pub const FSR_SPURIOUS_IMPRECISE_ABORT: u32 = 0x1c06;

/// Fault status table slot of the imprecise external abort.
pub const IMPRECISE_EXT_ABORT: usize = 16 + 6;

pub const SIGBUS: i32 = 7;
pub const BUS_OBJERR: i32 = 3;

/// Index of a short-descriptor FSR in the fault status table.
pub const fn fsr_index(fsr: u32) -> usize {
    ((fsr & 0xf) | ((fsr & (1 << 10)) >> 6)) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultAction {
    /// Resume as if nothing happened.
    Ignore,
    /// Report the fault and deliver the hook's signal.
    Fatal,
}

pub type FaultHandler = fn(addr: usize, fsr: u32) -> FaultAction;

/// A handler for one slot of the fault status table.
#[derive(Debug, Clone, Copy)]
pub struct FaultHook {
    pub index: usize,
    pub handler: FaultHandler,
    pub sig: i32,
    pub code: i32,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latch {
    Armed,
    Tripped,
}

/// Swallows the first spurious imprecise abort and nothing after it.
pub struct AbortFilter {
    latch: Mutex<Latch>,
}

impl AbortFilter {
    pub const fn new() -> Self {
        Self {
            latch: Mutex::new(Latch::Armed),
        }
    }

    pub fn latch(&self) -> Latch {
        *self.latch.lock()
    }

    pub fn handle(&self, addr: usize, fsr: u32) -> FaultAction {
        if fsr != FSR_SPURIOUS_IMPRECISE_ABORT {
            return FaultAction::Fatal;
        }
        let mut latch = self.latch.lock();
        match *latch {
            Latch::Armed => {
                *latch = Latch::Tripped;
                warn!(
                    "External imprecise Data abort at addr={:#x}, fsr={:#x} ignored.",
                    addr, fsr
                );
                FaultAction::Ignore
            }
            Latch::Tripped => FaultAction::Fatal,
        }
    }
}

impl Default for AbortFilter {
    fn default() -> Self {
        Self::new()
    }
}

static SC57X_ABORT_FILTER: AbortFilter = AbortFilter::new();

fn sc57x_abort_handler(addr: usize, fsr: u32) -> FaultAction {
    SC57X_ABORT_FILTER.handle(addr, fsr)
}

pub const SC57X_ABORT_HOOK: FaultHook = FaultHook {
    index: IMPRECISE_EXT_ABORT,
    handler: sc57x_abort_handler,
    sig: SIGBUS,
    code: BUS_OBJERR,
    name: "imprecise external abort",
};
