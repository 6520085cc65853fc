//! # CLI Module
//!
//! Command-line tools for working with route tables.
//!
//! ## Commands
//!
//! ### `lookup`
//!
//! ```bash
//! radix-dispatch lookup --routes routes.yaml GET /users/42
//! ```
//!
//! ### `tree`
//!
//! Show how the table compiles into per-method radix trees:
//!
//! ```bash
//! radix-dispatch tree --routes routes.yaml
//! ```
//!
//! ### `routes`
//!
//! ```bash
//! radix-dispatch routes --routes routes.toml
//! ```
//!
//! ### `watch`
//!
//! Rebuild and republish the router whenever the file changes. Reload results
//! are logged.
//!
//! ```bash
//! RUST_LOG=info radix-dispatch watch --routes routes.yaml
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
