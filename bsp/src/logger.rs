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

use core::fmt::{self, Write};
use log::{LevelFilter, Metadata, Record};
use spin::{Mutex, Once};

/// Byte sink for log output, usually the early UART.
pub trait Console: Sync {
    fn write_str(&self, s: &str);
}

struct ConsoleWriter<'a>(&'a dyn Console);

impl Write for ConsoleWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s);
        Ok(())
    }
}

struct Logger {
    console: Once<&'static dyn Console>,
    lock: Mutex<()>,
}

static LOGGER: Logger = Logger {
    console: Once::new(),
    lock: Mutex::new(()),
};

pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

///set max log level
pub fn set_max_level(level: LogLevel) {
    match level {
        LogLevel::Trace => log::set_max_level(LevelFilter::Trace),
        LogLevel::Debug => log::set_max_level(LevelFilter::Debug),
        LogLevel::Info => log::set_max_level(LevelFilter::Info),
        LogLevel::Warn => log::set_max_level(LevelFilter::Warn),
        LogLevel::Error => log::set_max_level(LevelFilter::Error),
    }
}

/// log init; the first console passed in wins
pub fn logger_init(console: &'static dyn Console) -> Result<(), log::SetLoggerError> {
    LOGGER.console.call_once(|| console);
    log::set_logger(&LOGGER)?;
    cfg_if::cfg_if! {
        if #[cfg(debug_assertions)] {
            log::set_max_level(LevelFilter::Trace);
        } else {
            log::set_max_level(LevelFilter::Warn);
        }
    }
    Ok(())
}

///impl log for Logger
impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(console) = self.console.get() else {
            return;
        };
        let _guard = self.lock.lock();
        let _ = writeln!(
            ConsoleWriter(*console),
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}
