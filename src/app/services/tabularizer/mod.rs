//! NetCDF tabularization
//!
//! The core of the converter: flattening multi-dimensional variables into
//! rows, with a per-variable flat listing as the fallback when nothing is
//! tabularizable.
//!
//! ## Architecture
//!
//! - [`odometer`] - pure mixed-radix counter enumerating index tuples in
//!   row-major order
//! - [`coordinates`] - per-dimension coordinate resolution and caching
//! - [`tabulate`] - the structured path: variable classification, bounded
//!   enumeration, per-variable failure isolation
//! - [`fallback`] - the flat per-variable listing
//! - [`time`] - CF-style `units = "<unit> since <epoch>"` decoding for
//!   coordinate variables (opt-in)

pub mod coordinates;
pub mod fallback;
pub mod odometer;
pub mod tabulate;
pub mod time;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use fallback::flatten;
pub use odometer::Odometer;
pub use tabulate::tabularize;
