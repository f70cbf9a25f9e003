//! Dtsc-Common: Shared types, configuration, and errors.
//!
//! This crate provides functionality used by every dtsc crate:
//!
//! - **Track kinds**: Classification of a track's `type` string
//! - **Configuration**: Thresholds that drive key and fragment boundaries
//! - **Error Handling**: Common error type and result alias
//!
//! # Examples
//!
//! ```
//! use dtsc_common::{Error, IndexConfig, Result, TrackKind};
//!
//! let kind = TrackKind::from("audio");
//! assert!(kind.is_audio());
//!
//! let config = IndexConfig::default();
//! assert_eq!(config.key_interval_ms, 5000);
//!
//! fn example() -> Result<()> {
//!     Err(Error::invalid_wire("short header"))
//! }
//! assert!(example().is_err());
//! ```

pub mod config;
pub mod error;
pub mod types;

pub use config::IndexConfig;
pub use error::{Error, Result};
pub use types::*;
