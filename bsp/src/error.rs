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

use crate::gpio::PinId;
use alloc::string::String;
use thiserror::Error;

/// Linux errno values handed back through the machine callback slots.
pub mod code {
    pub const ENOENT: i32 = 2;
    pub const EIO: i32 = 5;
    pub const ENOMEM: i32 = 12;
    pub const EBUSY: i32 = 16;
    pub const ENODEV: i32 = 19;
    pub const EINVAL: i32 = 22;
}

/// Failures reported by a [`PinRegistry`](crate::gpio::PinRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PinError {
    #[error("pin is claimed by another owner")]
    Busy,

    #[error("gpio claim table is full")]
    NoResource,

    #[error("no gpio controller serves pin {0}")]
    NoController(PinId),

    #[error("controller rejected pin {0}")]
    Rejected(PinId),
}

impl PinError {
    pub fn to_errno(self) -> i32 {
        match self {
            PinError::Busy => -code::EBUSY,
            PinError::NoResource => -code::ENOMEM,
            PinError::NoController(_) => -code::ENODEV,
            PinError::Rejected(_) => -code::EIO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid {list} entry {index}")]
    NotFound { list: String, index: usize },

    #[error("can't request {list} pin {pin}: {source}")]
    AcquireFailed {
        list: String,
        pin: PinId,
        source: PinError,
    },

    #[error("can't set direction for {list} pin {pin}: {source}")]
    DriveFailed {
        list: String,
        pin: PinId,
        source: PinError,
    },

    #[error("configuration node {0} not found")]
    NodeAbsent(&'static str),

    #[error("machine is not compatible with {0}")]
    Incompatible(&'static str),

    #[error("invalid argument")]
    InvalidArgument,

    #[error("mdio access to phy register {reg:#x} failed")]
    Mdio { reg: u16 },

    #[error("platform service failed with errno {0}")]
    Platform(i32),
}

impl BoardError {
    pub fn to_errno(&self) -> i32 {
        match self {
            BoardError::NotFound { .. } => -code::ENODEV,
            BoardError::AcquireFailed { source, .. } => source.to_errno(),
            BoardError::DriveFailed { source, .. } => source.to_errno(),
            BoardError::NodeAbsent(_) | BoardError::Incompatible(_) => -code::ENODEV,
            BoardError::InvalidArgument => -code::EINVAL,
            BoardError::Mdio { .. } => -code::EIO,
            BoardError::Platform(errno) => *errno,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_errno_mapping() {
        let not_found = BoardError::NotFound {
            list: "reboot-pins".to_string(),
            index: 3,
        };
        assert_eq!(not_found.to_errno(), -code::ENODEV);

        let acquire = BoardError::AcquireFailed {
            list: "reboot-pins".to_string(),
            pin: PinId::new(7).unwrap(),
            source: PinError::NoResource,
        };
        assert_eq!(acquire.to_errno(), -code::ENOMEM);

        assert_eq!(BoardError::InvalidArgument.to_errno(), -code::EINVAL);
        assert_eq!(PinError::Busy.to_errno(), -code::EBUSY);
        assert_eq!(BoardError::Platform(-code::ENOMEM).to_errno(), -12);
        assert_eq!(BoardError::Mdio { reg: 0x12 }.to_errno(), -code::EIO);
    }

    #[test]
    fn test_error_messages_name_the_pin() {
        let err = BoardError::DriveFailed {
            list: "boot-pins".to_string(),
            pin: PinId::new(42).unwrap(),
            source: PinError::Rejected(PinId::new(42).unwrap()),
        };
        assert_eq!(
            err.to_string(),
            "can't set direction for boot-pins pin 42: controller rejected pin 42"
        );
    }
}
