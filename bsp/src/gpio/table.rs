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

use super::{GpioController, Owner, OwnerId, PinId, PinRegistry, PinState};
use crate::error::PinError;
use alloc::{collections::BTreeMap, string::String};
use log::debug;
use spin::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimKind {
    /// Held until the caller frees it.
    Caller(String),
    /// Held until the owner is torn down.
    Managed(OwnerId),
}

/// The board's GPIO claim table.
///
/// Pins are numbered globally; each controller serves the window
/// `base..base + ngpio`. At most `capacity` pins can be claimed at once.
pub struct GpioTable<'a> {
    chips: &'a [&'a dyn GpioController],
    claims: Mutex<BTreeMap<PinId, ClaimKind>>,
    capacity: usize,
}

impl<'a> GpioTable<'a> {
    pub fn new(chips: &'a [&'a dyn GpioController], capacity: usize) -> Self {
        Self {
            chips,
            claims: Mutex::new(BTreeMap::new()),
            capacity,
        }
    }

    pub fn claim_of(&self, pin: PinId) -> Option<ClaimKind> {
        self.claims.lock().get(&pin).cloned()
    }

    pub fn claimed(&self) -> usize {
        self.claims.lock().len()
    }

    /// Drops every claim held by `owner`, returning how many were released.
    pub fn release_owner(&self, owner: &Owner) -> usize {
        let mut claims = self.claims.lock();
        let before = claims.len();
        claims.retain(|_, kind| *kind != ClaimKind::Managed(owner.id()));
        let released = before - claims.len();
        debug!("released {} pins of {}", released, owner.name());
        released
    }

    fn chip_for(&self, pin: PinId) -> Result<&'a dyn GpioController, PinError> {
        self.chips
            .iter()
            .copied()
            .find(|chip| chip.serves(pin))
            .ok_or(PinError::NoController(pin))
    }

    fn claim(&self, pin: PinId, kind: ClaimKind) -> Result<(), PinError> {
        self.chip_for(pin)?;
        let mut claims = self.claims.lock();
        if claims.contains_key(&pin) {
            return Err(PinError::Busy);
        }
        if claims.len() >= self.capacity {
            return Err(PinError::NoResource);
        }
        claims.insert(pin, kind);
        Ok(())
    }
}

impl PinRegistry for GpioTable<'_> {
    fn request(&self, pin: PinId, label: &str) -> Result<(), PinError> {
        self.claim(pin, ClaimKind::Caller(String::from(label)))
    }

    fn request_managed(&self, owner: &Owner, pin: PinId) -> Result<(), PinError> {
        self.claim(pin, ClaimKind::Managed(owner.id()))
    }

    fn direction_output(&self, pin: PinId, level: PinState) -> Result<(), PinError> {
        let chip = self.chip_for(pin)?;
        chip.direction_output(pin.num() - chip.base(), level)
    }

    fn free(&self, pin: PinId) {
        self.claims.lock().remove(&pin);
    }
}
