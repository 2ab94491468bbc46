//! Library side of the `mugen` command-line checker.

pub mod commands;
pub mod logging;
pub mod summary;
