//! `parokya-console` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod avatar;
pub mod shell;
pub mod view;
