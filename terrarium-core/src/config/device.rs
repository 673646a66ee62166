//! Logical devices wired to the board

use core::fmt;

/// Direction a device's pin is used in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    DigitalOutput,
    AnalogInput,
}

/// A logical device attached to the board
///
/// Numbered devices are 1-based, matching their printed names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Device {
    /// Single-colour indicator LED
    Led(u8),
    RgbBlue,
    RgbGreen,
    RgbRed,
    /// Water pump driver
    Pump(u8),
    /// General purpose analog input
    GeneralInput,
    /// Capacitive soil moisture probe
    SoilSensor(u8),
}

impl Device {
    /// Pin direction this device needs
    pub fn direction(&self) -> Direction {
        match self {
            Device::Led(_)
            | Device::RgbBlue
            | Device::RgbGreen
            | Device::RgbRed
            | Device::Pump(_) => Direction::DigitalOutput,
            Device::GeneralInput | Device::SoilSensor(_) => Direction::AnalogInput,
        }
    }

    pub fn is_soil_sensor(&self) -> bool {
        matches!(self, Device::SoilSensor(_))
    }

    /// Parse a device name as written in the board file
    ///
    /// Accepts "led N", "rgb blue", "rgb green", "rgb red", "pump N",
    /// "general input" and "soil sensor N".
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();

        match name {
            "rgb blue" => return Some(Device::RgbBlue),
            "rgb green" => return Some(Device::RgbGreen),
            "rgb red" => return Some(Device::RgbRed),
            "general input" => return Some(Device::GeneralInput),
            _ => {}
        }

        let (family, index) = name.rsplit_once(' ')?;
        let index: u8 = index.parse().ok()?;
        if index == 0 {
            return None;
        }

        match family.trim_end() {
            "led" => Some(Device::Led(index)),
            "pump" => Some(Device::Pump(index)),
            "soil sensor" => Some(Device::SoilSensor(index)),
            _ => None,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Led(n) => write!(f, "led {}", n),
            Device::RgbBlue => f.write_str("rgb blue"),
            Device::RgbGreen => f.write_str("rgb green"),
            Device::RgbRed => f.write_str("rgb red"),
            Device::Pump(n) => write!(f, "pump {}", n),
            Device::GeneralInput => f.write_str("general input"),
            Device::SoilSensor(n) => write!(f, "soil sensor {}", n),
        }
    }
}
