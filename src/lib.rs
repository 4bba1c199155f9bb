pub mod config;
pub mod error;
pub mod git_ops;
pub mod manifest;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
