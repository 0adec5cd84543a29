//! Supporting infrastructure.

pub mod errors;
