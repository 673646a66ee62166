//! Command code → action lookup
//!
//! Built once from the board configuration. Every output contributes two
//! entries (`code` → HIGH, `code * 10` → LOW) and every sensor one.

use heapless::FnvIndexMap;

use terrarium_hal::Level;
use terrarium_protocol::report::MAX_CHANNEL;
use terrarium_protocol::{high_code, low_code};

use crate::config::{BoardConfig, ConfigError, Device, MAX_OUTPUTS, MAX_SENSORS};

/// Table capacity (must be a power of two)
pub const ACTION_TABLE_CAPACITY: usize = 64;

const _: () = assert!(MAX_OUTPUTS * 2 + MAX_SENSORS <= ACTION_TABLE_CAPACITY);

/// What a command code does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Drive a digital output
    Write { device: Device, pin: u8, level: Level },
    /// Sample an analog input and report it
    Report { device: Device, pin: u8, channel: u8 },
}

/// Lookup from command code to action
#[derive(Debug, Clone)]
pub struct ActionTable {
    entries: FnvIndexMap<i32, Action, ACTION_TABLE_CAPACITY>,
}

impl ActionTable {
    /// Build the table for a board
    ///
    /// Fails if any two actions resolve to the same code.
    pub fn build(config: &BoardConfig) -> Result<Self, ConfigError> {
        let mut table = Self {
            entries: FnvIndexMap::new(),
        };

        for output in config.outputs() {
            check_base_code(output.code)?;
            let low = low_code(output.code).ok_or(ConfigError::CodeOverflow(output.code))?;

            table.insert(
                high_code(output.code),
                Action::Write {
                    device: output.device,
                    pin: output.pin,
                    level: Level::High,
                },
            )?;
            table.insert(
                low,
                Action::Write {
                    device: output.device,
                    pin: output.pin,
                    level: Level::Low,
                },
            )?;
        }

        for sensor in config.sensors() {
            check_base_code(sensor.code)?;
            if sensor.channel > MAX_CHANNEL {
                return Err(ConfigError::InvalidChannel(sensor.channel));
            }

            table.insert(
                sensor.code,
                Action::Report {
                    device: sensor.device,
                    pin: sensor.pin,
                    channel: sensor.channel,
                },
            )?;
        }

        Ok(table)
    }

    fn insert(&mut self, code: i32, action: Action) -> Result<(), ConfigError> {
        if self.entries.contains_key(&code) {
            return Err(ConfigError::DuplicateCode(code));
        }
        self.entries
            .insert(code, action)
            .map_err(|_| ConfigError::TableFull)?;
        Ok(())
    }

    /// Action bound to a code, if any
    pub fn lookup(&self, code: i32) -> Option<Action> {
        self.entries.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (i32, Action)> + '_ {
        self.entries.iter().map(|(code, action)| (*code, *action))
    }
}

fn check_base_code(code: i32) -> Result<(), ConfigError> {
    if code <= 0 {
        return Err(ConfigError::ReservedCode(code));
    }
    Ok(())
}
