//! Output formatting for turn responses.

pub mod console;
pub mod formatter;
