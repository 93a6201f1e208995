//! kbl common types and errors.
//!
//! This crate provides foundational types shared across the kbl crates:
//! - The unified error type and result alias
//! - Platform family detection
//! - Output format specifications for the CLI

pub mod error;
pub mod output;
pub mod platform;

pub use error::{Error, Result};
pub use output::OutputFormat;
pub use platform::PlatformFamily;

/// Name of the Keybase client process and binary.
pub const KEYBASE_PROCESS_NAME: &str = "keybase";
