//! Progress indicators.

pub mod reporter;
