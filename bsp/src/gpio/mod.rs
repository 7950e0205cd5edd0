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

//! GPIO pin numbers, ownership and the registry the board helpers drive pins
//! through.

mod adsp_port;
mod table;

pub use adsp_port::{AdspGpioPin, AdspGpioPort, GpioPortRegisters};
pub use embedded_hal::digital::PinState;
pub use table::{ClaimKind, GpioTable};

use crate::error::PinError;
use core::fmt;

/// Size of the global GPIO number space.
pub const ARCH_NR_GPIOS: u32 = 512;

/// A validated global GPIO number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(u32);

impl PinId {
    pub const fn new(raw: u32) -> Option<Self> {
        if raw < ARCH_NR_GPIOS {
            Some(PinId(raw))
        } else {
            None
        }
    }

    pub const fn num(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(pub u32);

/// An entity whose teardown releases the pins claimed on its behalf.
#[derive(Debug)]
pub struct Owner {
    id: OwnerId,
    name: &'static str,
}

impl Owner {
    pub const fn new(id: u32, name: &'static str) -> Self {
        Self {
            id: OwnerId(id),
            name,
        }
    }

    pub fn id(&self) -> OwnerId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Shared pin ownership and control.
///
/// Implementations must serialise `request`/`request_managed`/`free` against
/// each other; callers do no locking of their own.
pub trait PinRegistry {
    /// Claims `pin` for the caller, who must give it back with
    /// [`PinRegistry::free`]. Returns [`PinError::Busy`] if anybody else
    /// holds it.
    fn request(&self, pin: PinId, label: &str) -> Result<(), PinError>;

    /// Claims `pin` for `owner`. The claim is dropped when the owner is torn
    /// down, never by the caller.
    fn request_managed(&self, owner: &Owner, pin: PinId) -> Result<(), PinError>;

    /// Switches `pin` to output and drives it to `level`.
    fn direction_output(&self, pin: PinId, level: PinState) -> Result<(), PinError>;

    fn free(&self, pin: PinId);
}

/// A caller-owned claim, freed when dropped.
pub struct PinClaim<'a, R: PinRegistry + ?Sized> {
    registry: &'a R,
    pin: PinId,
}

impl<'a, R: PinRegistry + ?Sized> PinClaim<'a, R> {
    pub fn request(registry: &'a R, pin: PinId, label: &str) -> Result<Self, PinError> {
        registry.request(pin, label)?;
        Ok(Self { registry, pin })
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }
}

impl<R: PinRegistry + ?Sized> Drop for PinClaim<'_, R> {
    fn drop(&mut self) {
        self.registry.free(self.pin);
    }
}

/// A bank of pins behind one set of registers.
pub trait GpioController: Sync {
    /// First global GPIO number served by this controller.
    fn base(&self) -> u32;

    fn ngpio(&self) -> u32;

    fn direction_output(&self, offset: u32, level: PinState) -> Result<(), PinError>;

    fn serves(&self, pin: PinId) -> bool {
        pin.num() >= self.base() && pin.num() - self.base() < self.ngpio()
    }
}
