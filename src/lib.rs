//! SatlinkIO - telemetry link core for a small-satellite ground station
//!
//! This library provides the components that sit between the radio/UDP ingest
//! side of a ground station and its presentation collaborators:
//!
//! - [`protocol`]: frame codecs (binary, text CSV, JSON) and command tokens
//! - [`link`]: shared link state, liveness derivation, the telemetry receive
//!   loop and the outbound command dispatcher
//! - [`radio`]: injectable radio capability with a mock implementation
//!
//! Data flow: satellite → UDP → receive loop → codec → link state store,
//! read on demand by any number of observers. Operator commands travel the
//! other way over an independent socket.

pub mod config;
pub mod error;
pub mod link;
pub mod protocol;
pub mod radio;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
