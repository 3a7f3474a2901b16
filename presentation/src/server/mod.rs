//! Non-interactive serving modes.

pub mod stdio;
