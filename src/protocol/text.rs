//! Text telemetry line codec
//!
//! The simpler comma-separated protocol used by early flight software builds:
//!
//! ```text
//! SAT1,<pitch>,<roll>,<light>,<accel_z>
//! ```
//!
//! `pitch`, `roll` and `accel_z` are decimal floats; `light` is a decimal
//! integer. The leading tag is the configured device identifier.

use super::DecodeError;

/// Attitude sample carried by one text line
///
/// A partial record: power fields and device status are untouched by text
/// updates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttitudeLine {
    /// Pitch angle (degrees)
    pub pitch: f32,
    /// Roll angle (degrees)
    pub roll: f32,
    /// Solar light sensor reading
    pub light: f32,
    /// Z-axis acceleration (m/s^2)
    pub accel_z: f32,
}

impl AttitudeLine {
    /// Decode one line against the expected device tag
    pub fn decode(line: &str, tag: &str) -> Result<Self, DecodeError> {
        let parts: Vec<&str> = line.trim().split(',').collect();

        // split() always yields at least one token
        if parts[0] != tag {
            return Err(DecodeError::BadTag {
                found: parts[0].to_string(),
            });
        }
        if parts.len() < 5 {
            return Err(DecodeError::FieldCount { found: parts.len() });
        }

        let pitch = parts[1]
            .trim()
            .parse::<f32>()
            .map_err(|_| DecodeError::NumericParse { field: "pitch" })?;
        let roll = parts[2]
            .trim()
            .parse::<f32>()
            .map_err(|_| DecodeError::NumericParse { field: "roll" })?;
        let light = parts[3]
            .trim()
            .parse::<i64>()
            .map_err(|_| DecodeError::NumericParse { field: "light" })?
            as f32;
        let accel_z = parts[4]
            .trim()
            .parse::<f32>()
            .map_err(|_| DecodeError::NumericParse { field: "accel_z" })?;

        Ok(Self {
            pitch,
            roll,
            light,
            accel_z,
        })
    }
}
