//! Image generation adapters.

pub mod firefly;

pub use firefly::FireflyImageGenerator;
