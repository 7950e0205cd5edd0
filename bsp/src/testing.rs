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

//! Host-side fakes shared by the unit tests.

use crate::{
    error::{BoardError, PinError},
    ethernet::PhyFixup,
    fault::FaultHook,
    gpio::{GpioController, Owner, PinId, PinRegistry, PinState},
    machine::{AuxData, Platform},
    memmap::IoDesc,
    restart::ResetControl,
    static_ref::StaticRef,
    system_regs::SystemRegisters,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    convert::Infallible,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

/// Zeroed memory standing in for a register block. Leaked, so the
/// `'static` the block type asks for holds.
pub fn leak_block<T>() -> StaticRef<T> {
    let words = vec![0u32; core::mem::size_of::<T>() / 4 + 1].leak();
    unsafe { StaticRef::new(words.as_ptr() as *const T) }
}

pub fn leak_system_regs() -> SystemRegisters {
    SystemRegisters::new(leak_block(), leak_block(), leak_block())
}

#[derive(Default)]
struct RegistryState {
    held: BTreeSet<PinId>,
    elsewhere: BTreeSet<PinId>,
    request_failures: BTreeMap<PinId, PinError>,
    drive_failures: BTreeMap<PinId, PinError>,
    requests: usize,
    managed_requests: usize,
    frees: usize,
    driven: Vec<(PinId, PinState)>,
}

/// A registry whose answers are scripted per pin and which records every
/// call made on it.
#[derive(Default)]
pub struct ScriptedRegistry {
    state: Mutex<RegistryState>,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `pin` as claimed by somebody outside the code under test.
    pub fn hold_elsewhere(&self, pin: PinId) {
        self.state.lock().unwrap().elsewhere.insert(pin);
    }

    pub fn fail_request(&self, pin: PinId, err: PinError) {
        self.state.lock().unwrap().request_failures.insert(pin, err);
    }

    pub fn fail_drive(&self, pin: PinId, err: PinError) {
        self.state.lock().unwrap().drive_failures.insert(pin, err);
    }

    pub fn is_held(&self, pin: PinId) -> bool {
        let state = self.state.lock().unwrap();
        state.held.contains(&pin) || state.elsewhere.contains(&pin)
    }

    pub fn requests(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    pub fn managed_requests(&self) -> usize {
        self.state.lock().unwrap().managed_requests
    }

    pub fn frees(&self) -> usize {
        self.state.lock().unwrap().frees
    }

    /// Successful drives, in call order.
    pub fn driven(&self) -> Vec<(PinId, PinState)> {
        self.state.lock().unwrap().driven.clone()
    }

    fn claim(state: &mut RegistryState, pin: PinId) -> Result<(), PinError> {
        if let Some(err) = state.request_failures.get(&pin) {
            return Err(*err);
        }
        if state.elsewhere.contains(&pin) || !state.held.insert(pin) {
            return Err(PinError::Busy);
        }
        Ok(())
    }
}

impl PinRegistry for ScriptedRegistry {
    fn request(&self, pin: PinId, _label: &str) -> Result<(), PinError> {
        let mut state = self.state.lock().unwrap();
        state.requests += 1;
        Self::claim(&mut state, pin)
    }

    fn request_managed(&self, _owner: &Owner, pin: PinId) -> Result<(), PinError> {
        let mut state = self.state.lock().unwrap();
        state.managed_requests += 1;
        Self::claim(&mut state, pin)
    }

    fn direction_output(&self, pin: PinId, level: PinState) -> Result<(), PinError> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.drive_failures.get(&pin) {
            return Err(*err);
        }
        state.driven.push((pin, level));
        Ok(())
    }

    fn free(&self, pin: PinId) {
        let mut state = self.state.lock().unwrap();
        state.frees += 1;
        state.held.remove(&pin);
    }
}

/// A controller that records the offsets it was asked to drive.
pub struct FakeChip {
    base: u32,
    ngpio: u32,
    driven: Mutex<Vec<(u32, PinState)>>,
}

impl FakeChip {
    pub fn new(base: u32, ngpio: u32) -> Self {
        Self {
            base,
            ngpio,
            driven: Mutex::new(Vec::new()),
        }
    }

    pub fn driven(&self) -> Vec<(u32, PinState)> {
        self.driven.lock().unwrap().clone()
    }
}

impl GpioController for FakeChip {
    fn base(&self) -> u32 {
        self.base
    }

    fn ngpio(&self) -> u32 {
        self.ngpio
    }

    fn direction_output(&self, offset: u32, level: PinState) -> Result<(), PinError> {
        self.driven.lock().unwrap().push((offset, level));
        Ok(())
    }
}

/// Marker the fake reset unwinds with.
#[derive(Debug)]
pub struct ResetIssued;

#[derive(Default)]
pub struct FakeReset {
    requests: AtomicUsize,
}

impl FakeReset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl ResetControl for FakeReset {
    fn request_reset(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn system_reset(&self) -> ! {
        self.request_reset();
        std::panic::panic_any(ResetIssued)
    }
}

/// Runs a diverging call and checks it ended in the fake reset.
pub fn expect_reset<F: FnOnce() -> Infallible>(f: F) {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(never) => match never {},
        Err(payload) => assert!(payload.is::<ResetIssued>(), "unwound without a reset"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    IoTable(Vec<IoDesc>),
    FaultHook(usize),
    Gic(usize, usize),
    Timer,
    L2x0(u32, u32),
    Populate(Vec<&'static str>),
    PhyFixup(u32),
}

/// Records the kernel services a machine callback used.
#[derive(Default)]
pub struct RecordingPlatform {
    pub calls: Vec<Call>,
    pub hooks: Vec<FaultHook>,
    pub fixups: Vec<PhyFixup>,
    pub fail_populate: bool,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Platform for RecordingPlatform {
    fn iotable_init(&mut self, table: &[IoDesc]) {
        self.calls.push(Call::IoTable(table.to_vec()));
    }

    fn hook_fault_code(&mut self, hook: FaultHook) {
        self.calls.push(Call::FaultHook(hook.index));
        self.hooks.push(hook);
    }

    fn gic_init(&mut self, dist_base: usize, cpu_base: usize) {
        self.calls.push(Call::Gic(dist_base, cpu_base));
    }

    fn timer_init(&mut self) {
        self.calls.push(Call::Timer);
    }

    fn l2x0_init(&mut self, aux_val: u32, aux_mask: u32) {
        self.calls.push(Call::L2x0(aux_val, aux_mask));
    }

    fn of_platform_populate(&mut self, lookup: &[AuxData]) -> Result<(), BoardError> {
        self.calls
            .push(Call::Populate(lookup.iter().map(|aux| aux.name).collect()));
        if self.fail_populate {
            return Err(BoardError::Platform(-12));
        }
        Ok(())
    }

    fn register_phy_fixup(&mut self, fixup: PhyFixup) -> Result<(), BoardError> {
        self.calls.push(Call::PhyFixup(fixup.phy_uid));
        self.fixups.push(fixup);
        Ok(())
    }
}

const FDT_MAGIC: u32 = 0xd00d_feed;
const FDT_BEGIN_NODE: u32 = 1;
const FDT_END_NODE: u32 = 2;
const FDT_PROP: u32 = 3;
const FDT_END: u32 = 9;
const HEADER_SIZE: usize = 40;
const RSVMAP_SIZE: usize = 16;

/// Assembles a version 17 flattened device tree.
#[derive(Default)]
pub struct DtbBuilder {
    structs: Vec<u8>,
    strings: Vec<u8>,
    names: BTreeMap<String, u32>,
}

impl DtbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn word(&mut self, value: u32) {
        self.structs.extend_from_slice(&value.to_be_bytes());
    }

    fn pad(&mut self) {
        while self.structs.len() % 4 != 0 {
            self.structs.push(0);
        }
    }

    fn name_offset(&mut self, name: &str) -> u32 {
        if let Some(off) = self.names.get(name) {
            return *off;
        }
        let off = self.strings.len() as u32;
        self.strings.extend_from_slice(name.as_bytes());
        self.strings.push(0);
        self.names.insert(String::from(name), off);
        off
    }

    pub fn begin(&mut self, name: &str) {
        self.word(FDT_BEGIN_NODE);
        self.structs.extend_from_slice(name.as_bytes());
        self.structs.push(0);
        self.pad();
    }

    pub fn end(&mut self) {
        self.word(FDT_END_NODE);
    }

    fn prop(&mut self, name: &str, value: &[u8]) {
        let nameoff = self.name_offset(name);
        self.word(FDT_PROP);
        self.word(value.len() as u32);
        self.word(nameoff);
        self.structs.extend_from_slice(value);
        self.pad();
    }

    pub fn prop_empty(&mut self, name: &str) {
        self.prop(name, &[]);
    }

    pub fn prop_u32s(&mut self, name: &str, cells: &[u32]) {
        let value: Vec<u8> = cells.iter().flat_map(|c| c.to_be_bytes()).collect();
        self.prop(name, &value);
    }

    pub fn prop_strings(&mut self, name: &str, strings: &[&str]) {
        let mut value = Vec::new();
        for s in strings {
            value.extend_from_slice(s.as_bytes());
            value.push(0);
        }
        self.prop(name, &value);
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.word(FDT_END);
        let off_struct = HEADER_SIZE + RSVMAP_SIZE;
        let off_strings = off_struct + self.structs.len();
        let total = off_strings + self.strings.len();

        let header = [
            FDT_MAGIC,
            total as u32,
            off_struct as u32,
            off_strings as u32,
            HEADER_SIZE as u32,
            17,
            16,
            0,
            self.strings.len() as u32,
            self.structs.len() as u32,
        ];
        let mut blob: Vec<u8> = header.iter().flat_map(|w| w.to_be_bytes()).collect();
        blob.resize(off_struct, 0);
        blob.extend_from_slice(&self.structs);
        blob.extend_from_slice(&self.strings);
        blob
    }
}
