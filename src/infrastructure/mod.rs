//! Host filesystem access from inside the Zellij sandbox.
//!
//! Plugins see the host directory Zellij was started from mounted at `/host`,
//! which usually is the user's home.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
