//! Small pure helpers shared by the writer and the environment.
//!
//! - [`hash`]: content fingerprints for cache-busting names
//! - [`path`]: logical path splitting and `/`-joined output paths

pub mod hash;
pub mod path;
