//! Session layer: per-cycle orchestration and output for the renderer

pub mod formatting;
pub mod session;
pub mod types;

pub use formatting::{CsvFormatter, JsonFormatter, TextFormatter};
pub use session::PositioningSession;
pub use types::{
    LocationUpdate, LogLevel, SessionConfig, SessionError, SessionResult, SessionState,
};
