//! wpgraph-cli library
//!
//! This module exposes the internal functionality of wpgraph-cli for
//! testing purposes.

// Make commands module available for internal tests only
#[doc(hidden)]
pub mod commands;
