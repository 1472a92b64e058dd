//! Physical constants and system parameters

/// Mean Earth radius used by the spherical distance model (m)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Vertical spacing between adjacent floors (m)
pub const FLOOR_HEIGHT_M: f64 = 3.0;

/// Lattice step of the position search in degrees (roughly 1.1 m at mid latitudes)
pub const STEP_SIZE_DEG: f64 = 1e-5;

/// Default cap on accepted search steps per localization cycle
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Floor index reserved for catalog entries without a surveyed floor
pub const FLOOR_UNSET: i32 = 0;
