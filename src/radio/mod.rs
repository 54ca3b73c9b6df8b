//! Injectable radio capability
//!
//! Ground stations that track a pass drive an SDR front end, retuning it for
//! Doppler as the satellite moves. The core treats the radio as an injected
//! dependency behind a trait: the rest of the system runs identically whether
//! a live device or the simulation sits behind it, and the choice is made by
//! configuration rather than by probing for drivers at construction time.

use crate::config::RadioConfig;
use crate::error::{Error, Result};

mod mock;
pub use mock::MockRadio;

/// Radio front-end interface
pub trait Radio: Send {
    /// Retune to `target_hz + shift_hz` to track Doppler across a pass
    fn set_doppler(&mut self, target_hz: f64, shift_hz: f64) -> Result<()>;

    /// Read raw samples from the front end
    fn read_samples(&mut self, count: usize) -> Result<Vec<f32>>;

    /// Release the device
    fn close(&mut self) -> Result<()>;
}

/// Build the configured radio
///
/// Only the mock backend ships in this crate; a live SDR implementation
/// plugs in behind the same trait.
pub fn create_radio(config: &RadioConfig) -> Result<Box<dyn Radio>> {
    if config.mock {
        Ok(Box::new(MockRadio::new(config.frequency_hz)))
    } else {
        Err(Error::InvalidConfig(
            "No live SDR backend available; set radio.mock = true".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_radio_mock() {
        let config = RadioConfig::default();
        assert!(config.mock);
        let mut radio = create_radio(&config).unwrap();
        radio.set_doppler(145_800_000.0, -2_500.0).unwrap();
        radio.close().unwrap();
    }

    #[test]
    fn test_create_radio_rejects_missing_live_backend() {
        let config = RadioConfig {
            mock: false,
            ..Default::default()
        };
        assert!(create_radio(&config).is_err());
    }
}
