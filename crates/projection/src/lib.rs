//! Coordinate reference system transformations.
//!
//! Maps geographic coordinates onto the integer cells of the upstream
//! forecast grid. Implemented from scratch without external dependencies.

pub mod lambert;

pub use lambert::{LambertConformal, ProjectionError};
