//! Binary telemetry frame codec
//!
//! Frame format (19 bytes):
//!
//! ```text
//! [0..4]  sync word 1A CF FC 1D
//! [4..6]  battery voltage, u16 big-endian, x0.01 V
//! [6..8]  panel current, u16 big-endian, x0.001 A
//! [8]     internal temperature, u8, -20 C offset
//! [9..19] status message, 10 bytes UTF-8, space/NUL padded
//! ```
//!
//! A frame lacking the exact sync word is unparseable, not low-confidence.

use super::DecodeError;

/// 4-byte marker identifying the start of a valid frame
pub const SYNC_WORD: [u8; 4] = [0x1A, 0xCF, 0xFC, 0x1D];

/// Wire size of one frame
pub const FRAME_LEN: usize = 19;

/// Fixed width of the status message field
const MSG_LEN: usize = 10;

const VOLTAGE_SCALE: f32 = 0.01;
const CURRENT_SCALE: f32 = 0.001;
const TEMP_OFFSET: f32 = 20.0;

/// Decoded power telemetry from one binary frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryFrame {
    /// Battery bus voltage (V)
    pub voltage: f32,
    /// Solar panel current (A)
    pub current: f32,
    /// Internal temperature (C)
    pub temperature: f32,
    /// Status message, at most 10 bytes on the wire
    pub message: String,
}

impl TelemetryFrame {
    /// Decode wire bytes into physical measurements
    ///
    /// Validates structure only: out-of-range raw integers still produce a
    /// (possibly nonsensical) float.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        if raw.len() < FRAME_LEN {
            return Err(DecodeError::Truncated { len: raw.len() });
        }
        if raw[0..4] != SYNC_WORD {
            let mut found = [0u8; 4];
            found.copy_from_slice(&raw[0..4]);
            return Err(DecodeError::SyncMismatch { found });
        }

        let raw_voltage = u16::from_be_bytes([raw[4], raw[5]]);
        let raw_current = u16::from_be_bytes([raw[6], raw[7]]);
        let raw_temp = raw[8];

        // Strip trailing space/NUL padding before UTF-8 validation
        let field = &raw[9..FRAME_LEN];
        let end = field
            .iter()
            .rposition(|&b| b != b' ' && b != 0)
            .map_or(0, |p| p + 1);
        let message = std::str::from_utf8(&field[..end])
            .map_err(|_| DecodeError::InvalidText)?
            .to_string();

        Ok(Self {
            voltage: raw_voltage as f32 * VOLTAGE_SCALE,
            current: raw_current as f32 * CURRENT_SCALE,
            temperature: raw_temp as f32 - TEMP_OFFSET,
            message,
        })
    }

    /// Encode into wire bytes (inverse of [`decode`](Self::decode))
    ///
    /// The message is truncated at 10 bytes or space-padded up to them, so
    /// `decode(encode(x)) == x` holds for any frame whose message fits.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut out = [0u8; FRAME_LEN];
        out[0..4].copy_from_slice(&SYNC_WORD);

        let raw_voltage = (self.voltage / VOLTAGE_SCALE).round() as u16;
        let raw_current = (self.current / CURRENT_SCALE).round() as u16;
        let raw_temp = (self.temperature + TEMP_OFFSET).round() as u8;
        out[4..6].copy_from_slice(&raw_voltage.to_be_bytes());
        out[6..8].copy_from_slice(&raw_current.to_be_bytes());
        out[8] = raw_temp;

        let msg = self.message.as_bytes();
        let n = msg.len().min(MSG_LEN);
        out[9..9 + n].copy_from_slice(&msg[..n]);
        for byte in &mut out[9 + n..FRAME_LEN] {
            *byte = b' ';
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame(voltage: u16, current: u16, temp: u8, msg: &[u8; 10]) -> Vec<u8> {
        let mut raw = Vec::with_capacity(FRAME_LEN);
        raw.extend_from_slice(&SYNC_WORD);
        raw.extend_from_slice(&voltage.to_be_bytes());
        raw.extend_from_slice(&current.to_be_bytes());
        raw.push(temp);
        raw.extend_from_slice(msg);
        raw
    }

    #[test]
    fn test_decode_applies_scalings() {
        let raw = raw_frame(800, 500, 55, b"ALL_OK    ");
        let frame = TelemetryFrame::decode(&raw).unwrap();

        assert_eq!(frame.voltage, 8.00);
        assert_eq!(frame.current, 0.5);
        assert_eq!(frame.temperature, 35.0);
        assert_eq!(frame.message, "ALL_OK");
    }

    #[test]
    fn test_decode_trims_nul_padding() {
        let raw = raw_frame(0, 0, 0, b"PING\0\0\0\0\0\0");
        let frame = TelemetryFrame::decode(&raw).unwrap();
        assert_eq!(frame.message, "PING");
        // Structure-only validation: raw temp 0 decodes to -20 C
        assert_eq!(frame.temperature, -20.0);
    }

    #[test]
    fn test_decode_truncated() {
        for len in 0..FRAME_LEN {
            let raw = vec![0x1A; len];
            match TelemetryFrame::decode(&raw) {
                Err(DecodeError::Truncated { len: got }) => assert_eq!(got, len),
                other => panic!("expected Truncated for len {}, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_decode_sync_mismatch() {
        // Remaining bytes are perfectly valid; the sync word alone decides
        let mut raw = raw_frame(800, 500, 55, b"ALL_OK    ");
        raw[0] = 0x1B;
        match TelemetryFrame::decode(&raw) {
            Err(DecodeError::SyncMismatch { found }) => {
                assert_eq!(found, [0x1B, 0xCF, 0xFC, 0x1D]);
            }
            other => panic!("expected SyncMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_invalid_utf8_message() {
        let raw = raw_frame(800, 500, 55, &[0xFF, 0xFE, b'X', 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(
            TelemetryFrame::decode(&raw),
            Err(DecodeError::InvalidText)
        ));
    }

    #[test]
    fn test_round_trip() {
        let frame = TelemetryFrame {
            voltage: 7.43,
            current: 0.123,
            temperature: 41.0,
            message: "DEPLOYING".to_string(),
        };
        let decoded = TelemetryFrame::decode(&frame.encode()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_round_trip_extremes() {
        // Raw field extremes survive the scale/unscale cycle
        for (raw_v, raw_c, raw_t) in [(0u16, 0u16, 0u8), (u16::MAX, u16::MAX, u8::MAX)] {
            let raw = raw_frame(raw_v, raw_c, raw_t, b"          ");
            let frame = TelemetryFrame::decode(&raw).unwrap();
            assert_eq!(frame.encode().to_vec(), raw);
        }
    }

    #[test]
    fn test_encode_truncates_long_message() {
        let frame = TelemetryFrame {
            message: "THIS_MESSAGE_IS_TOO_LONG".to_string(),
            ..Default::default()
        };
        let decoded = TelemetryFrame::decode(&frame.encode()).unwrap();
        assert_eq!(decoded.message, "THIS_MESSA");
    }
}
