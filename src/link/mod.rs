//! Link state, liveness, the telemetry receive loop and command dispatch

mod dispatcher;
mod liveness;
mod receiver;
mod state;

pub use dispatcher::CommandDispatcher;
pub use liveness::{is_connected, DEFAULT_LIVENESS_TIMEOUT};
pub use receiver::TelemetryReceiver;
pub use state::{LinkCounters, LinkSnapshot, LinkStateStore, Telemetry, TelemetryUpdate};
