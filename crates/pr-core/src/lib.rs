//! pr-core: shared foundation for the Peng-Robinson workspace.
//!
//! Contains:
//! - units (uom SI types, constructors and physical constants)
//! - numeric (Real + tolerances + float guards)
//! - parse (unit-aware text input for temperature and pressure)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod parse;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use parse::{UnitError, parse_pressure, parse_temperature};
pub use units::*;
