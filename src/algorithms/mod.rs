//! Localization algorithms: floor estimation, vertical distance correction,
//! and the hill-climb position search

pub mod correction;
pub mod engine;
pub mod error;
pub mod floor;
pub mod geodesic;
pub mod hill_climb;

pub use engine::{EngineConfig, LocalizationEngine};
pub use error::{LocalizeError, LocalizeResult};
pub use geodesic::haversine_distance;
pub use hill_climb::{HillClimbConfig, SearchOutcome};
