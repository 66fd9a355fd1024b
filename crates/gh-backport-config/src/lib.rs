//! Configuration for gh-backport
//!
//! One [`BackportConfig`] is constructed per run from the action's
//! inputs and never mutated afterwards. All enum values and patterns
//! are validated while the config is built, so an invalid configuration
//! is rejected before any branch or API side effect happens.

pub mod config;
pub mod error;
pub mod experimental;
pub mod policy;

pub use config::{compile_copy_labels_pattern, compile_label_pattern, BackportConfig, PullTemplates};
pub use error::ConfigError;
pub use experimental::Experimental;
pub use policy::{CherryPickMode, ConflictResolution, MergeCommitPolicy};
