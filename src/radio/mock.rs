//! Mock radio for hardware-free runs

use super::Radio;
use crate::error::{Error, Result};
use rand::Rng;

/// Simulated radio front end
///
/// Tracks the tuned frequency and returns a low-amplitude noise floor so the
/// sample pipeline keeps moving without hardware.
pub struct MockRadio {
    center_hz: f64,
    closed: bool,
}

/// Peak amplitude of the simulated noise floor
const NOISE_AMPLITUDE: f32 = 0.01;

impl MockRadio {
    /// Create a mock tuned to `center_hz`
    pub fn new(center_hz: f64) -> Self {
        log::info!("Mock radio initialized at {:.3} MHz", center_hz / 1e6);
        Self {
            center_hz,
            closed: false,
        }
    }

    /// Currently tuned center frequency
    pub fn center_hz(&self) -> f64 {
        self.center_hz
    }
}

impl Radio for MockRadio {
    fn set_doppler(&mut self, target_hz: f64, shift_hz: f64) -> Result<()> {
        self.center_hz = target_hz + shift_hz;
        log::debug!(
            "Mock radio tuned to {:.6} MHz (shift {:+.2} Hz)",
            self.center_hz / 1e6,
            shift_hz
        );
        Ok(())
    }

    fn read_samples(&mut self, count: usize) -> Result<Vec<f32>> {
        if self.closed {
            return Err(Error::Other("Radio is closed".to_string()));
        }
        let mut rng = rand::thread_rng();
        Ok((0..count)
            .map(|_| rng.gen_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE))
            .collect())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        log::info!("Mock radio closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doppler_tracking() {
        let mut radio = MockRadio::new(437_500_000.0);
        radio.set_doppler(437_500_000.0, 5_000.0).unwrap();
        assert_eq!(radio.center_hz(), 437_505_000.0);
        radio.set_doppler(437_500_000.0, -5_000.0).unwrap();
        assert_eq!(radio.center_hz(), 437_495_000.0);
    }

    #[test]
    fn test_samples_stay_within_noise_floor() {
        let mut radio = MockRadio::new(145_800_000.0);
        let samples = radio.read_samples(1024).unwrap();
        assert_eq!(samples.len(), 1024);
        assert!(samples.iter().all(|s| s.abs() <= NOISE_AMPLITUDE));
    }

    #[test]
    fn test_closed_radio_stops_sampling() {
        let mut radio = MockRadio::new(145_800_000.0);
        radio.close().unwrap();
        assert!(radio.read_samples(16).is_err());
    }
}
