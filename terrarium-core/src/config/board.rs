//! Board configuration
//!
//! Maps each logical device to its pin and command code. Output pins are
//! digital pin numbers; sensor pins are analog pin numbers (A0 = 0).

use heapless::Vec;

use super::device::{Device, Direction};

/// Maximum output bindings per board
pub const MAX_OUTPUTS: usize = 16;

/// Maximum sensor bindings per board
pub const MAX_SENSORS: usize = 8;

/// Pause after every sensor report, in milliseconds
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 100;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// More output bindings than [`MAX_OUTPUTS`]
    TooManyOutputs,
    /// More sensor bindings than [`MAX_SENSORS`]
    TooManySensors,
    /// Device bound with the wrong pin direction
    WrongDirection(Device),
    /// Two outputs share a digital pin
    DuplicateOutputPin(u8),
    /// Two sensors share an analog pin
    DuplicateSensorPin(u8),
    /// Same device bound twice
    DuplicateDevice(Device),
    /// Two actions resolve to the same command code
    DuplicateCode(i32),
    /// Base codes must be positive; 0 is what unparseable lines decode to
    ReservedCode(i32),
    /// `code * 10` does not fit an `i32`
    CodeOverflow(i32),
    /// Report channel is not a single digit
    InvalidChannel(u8),
    /// Action table capacity exhausted
    TableFull,
}

/// A digital output and the base code that switches it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputBinding {
    pub device: Device,
    /// Digital pin number
    pub pin: u8,
    /// `code` drives the pin high, `code * 10` drives it low
    pub code: i32,
}

impl OutputBinding {
    pub const fn new(device: Device, pin: u8, code: i32) -> Self {
        Self { device, pin, code }
    }
}

/// An analog input and the code that requests a report from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorBinding {
    pub device: Device,
    /// Analog pin number
    pub pin: u8,
    pub code: i32,
    /// Digit that prefixes the report line
    pub channel: u8,
}

impl SensorBinding {
    pub const fn new(device: Device, pin: u8, code: i32, channel: u8) -> Self {
        Self {
            device,
            pin,
            code,
            channel,
        }
    }
}

/// Physical pin and direction of a logical device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub device: Device,
    pub pin: u8,
    pub direction: Direction,
}

/// Wiring of the reference board: seven LEDs on D2-D8, the RGB indicator
/// on D9-D11 and the pumps on D12-D13.
pub const DEFAULT_OUTPUTS: [OutputBinding; 12] = [
    OutputBinding::new(Device::Led(1), 2, 4),
    OutputBinding::new(Device::Led(2), 3, 5),
    OutputBinding::new(Device::Led(3), 4, 6),
    OutputBinding::new(Device::Led(4), 5, 11),
    OutputBinding::new(Device::Led(5), 6, 12),
    OutputBinding::new(Device::Led(6), 7, 13),
    OutputBinding::new(Device::Led(7), 8, 14),
    OutputBinding::new(Device::RgbBlue, 9, 15),
    OutputBinding::new(Device::RgbGreen, 10, 16),
    OutputBinding::new(Device::RgbRed, 11, 17),
    OutputBinding::new(Device::Pump(1), 12, 18),
    OutputBinding::new(Device::Pump(2), 13, 19),
];

/// Analog inputs of the reference board: general input on A0, soil
/// sensors on A1-A5.
pub const DEFAULT_SENSORS: [SensorBinding; 6] = [
    SensorBinding::new(Device::GeneralInput, 0, 23, 0),
    SensorBinding::new(Device::SoilSensor(1), 1, 24, 1),
    SensorBinding::new(Device::SoilSensor(2), 2, 25, 2),
    SensorBinding::new(Device::SoilSensor(3), 3, 26, 3),
    SensorBinding::new(Device::SoilSensor(4), 4, 27, 4),
    SensorBinding::new(Device::SoilSensor(5), 5, 28, 5),
];

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    outputs: Vec<OutputBinding, MAX_OUTPUTS>,
    sensors: Vec<SensorBinding, MAX_SENSORS>,
    settle_delay_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let mut outputs = Vec::new();
        let mut sensors = Vec::new();
        // Cannot fail: the default tables are within capacity
        let _ = outputs.extend_from_slice(&DEFAULT_OUTPUTS);
        let _ = sensors.extend_from_slice(&DEFAULT_SENSORS);

        Self {
            outputs,
            sensors,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl BoardConfig {
    /// Build a configuration from binding tables
    ///
    /// Checks capacity, directions and pin/device uniqueness. Command code
    /// collisions are checked when the action table is built.
    pub fn from_bindings(
        outputs: &[OutputBinding],
        sensors: &[SensorBinding],
        settle_delay_ms: u32,
    ) -> Result<Self, ConfigError> {
        let mut config = Self {
            outputs: Vec::new(),
            sensors: Vec::new(),
            settle_delay_ms,
        };

        for binding in outputs {
            if binding.device.direction() != Direction::DigitalOutput {
                return Err(ConfigError::WrongDirection(binding.device));
            }
            if config.outputs.iter().any(|b| b.pin == binding.pin) {
                return Err(ConfigError::DuplicateOutputPin(binding.pin));
            }
            if config.outputs.iter().any(|b| b.device == binding.device) {
                return Err(ConfigError::DuplicateDevice(binding.device));
            }
            config
                .outputs
                .push(*binding)
                .map_err(|_| ConfigError::TooManyOutputs)?;
        }

        for binding in sensors {
            if binding.device.direction() != Direction::AnalogInput {
                return Err(ConfigError::WrongDirection(binding.device));
            }
            if config.sensors.iter().any(|b| b.pin == binding.pin) {
                return Err(ConfigError::DuplicateSensorPin(binding.pin));
            }
            if config.sensors.iter().any(|b| b.device == binding.device) {
                return Err(ConfigError::DuplicateDevice(binding.device));
            }
            config
                .sensors
                .push(*binding)
                .map_err(|_| ConfigError::TooManySensors)?;
        }

        Ok(config)
    }

    pub fn outputs(&self) -> &[OutputBinding] {
        &self.outputs
    }

    pub fn sensors(&self) -> &[SensorBinding] {
        &self.sensors
    }

    pub fn settle_delay_ms(&self) -> u32 {
        self.settle_delay_ms
    }

    /// Every pin assignment, outputs first
    pub fn assignments(&self) -> impl Iterator<Item = PinAssignment> + '_ {
        let outputs = self.outputs.iter().map(|b| PinAssignment {
            device: b.device,
            pin: b.pin,
            direction: Direction::DigitalOutput,
        });
        let sensors = self.sensors.iter().map(|b| PinAssignment {
            device: b.device,
            pin: b.pin,
            direction: Direction::AnalogInput,
        });
        outputs.chain(sensors)
    }

    /// Look up where a device is wired
    pub fn find_device(&self, device: Device) -> Option<PinAssignment> {
        self.assignments().find(|a| a.device == device)
    }
}
