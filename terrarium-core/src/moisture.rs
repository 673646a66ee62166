//! Soil moisture calibration
//!
//! Capacitive probes read high in dry soil and low in water. Only used for
//! diagnostics; reports on the wire always carry the raw reading.

/// Raw readings of a probe in dry air and in water
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoistureCalibration {
    pub dry: u16,
    pub wet: u16,
}

impl Default for MoistureCalibration {
    fn default() -> Self {
        Self { dry: 520, wet: 208 }
    }
}

impl MoistureCalibration {
    /// Moisture in percent (0 = dry, 100 = wet)
    ///
    /// Returns `None` for readings outside the calibrated band, which
    /// usually means a disconnected or shorted probe.
    pub fn percent(&self, raw: u16) -> Option<u8> {
        if self.dry <= self.wet || raw < self.wet || raw > self.dry {
            return None;
        }

        let span = (self.dry - self.wet) as u32;
        let wetness = (self.dry - raw) as u32;
        Some((wetness * 100 / span) as u8)
    }
}
