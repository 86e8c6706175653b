//! spidey-core: Core types, configuration, and logging for spidey.

pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::Config;
pub use error::{Error, Result};
