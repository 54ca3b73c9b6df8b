//! Wire protocols spoken between the ground station and the satellite
//!
//! Three inbound variants exist, selected by configuration (never sniffed):
//!
//! - [`binary`]: the fixed 19-byte sync-word frame carrying power telemetry
//! - [`text`]: a comma-separated ASCII line carrying attitude data
//! - [`json`]: a JSON object carrying any subset of attitude + device status
//!
//! All codecs are pure and do no I/O. They validate structure only; a raw
//! integer outside the physically plausible range still decodes to a float.

mod binary;
mod command;
mod json;
mod text;

pub use binary::{TelemetryFrame, FRAME_LEN, SYNC_WORD};
pub use command::Command;
pub use json::{ControlMode, DeviceStatus, LedState, SolarPanel, StatusUpdate};
pub use text::AttitudeLine;

use serde::{Deserialize, Serialize};

/// Which codec the receiver runs against inbound datagrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolMode {
    /// Fixed-layout binary frames
    #[default]
    Binary,
    /// Comma-separated text lines
    Text,
    /// JSON status datagrams
    Json,
}

/// Per-datagram decode failures
///
/// Always recoverable: the receive loop logs the failure, drops the datagram
/// and keeps running.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Buffer shorter than one binary frame
    #[error("Frame truncated: {len} bytes, need 19")]
    Truncated {
        /// Received length
        len: usize,
    },

    /// First 4 bytes differ from the sync word
    #[error("Sync word mismatch: found {found:02X?}")]
    SyncMismatch {
        /// Bytes found where the sync word was expected
        found: [u8; 4],
    },

    /// Status message field is not valid UTF-8 after padding trim
    #[error("Status message is not valid UTF-8")]
    InvalidText,

    /// Text line starts with the wrong device tag
    #[error("Unexpected device tag: {found:?}")]
    BadTag {
        /// Leading token that was found
        found: String,
    },

    /// Text line has too few comma-separated fields
    #[error("Expected 5 comma-separated fields, found {found}")]
    FieldCount {
        /// Number of fields present
        found: usize,
    },

    /// A numeric field in a text line failed to parse
    #[error("Failed to parse numeric field {field:?}")]
    NumericParse {
        /// Name of the offending field
        field: &'static str,
    },

    /// Datagram is not valid UTF-8 (text and json modes)
    #[error("Datagram is not valid UTF-8")]
    NotUtf8,

    /// JSON payload failed to deserialize
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
