//! Platform glue
//!
//! Native builds drive `Session` directly (see `main.rs`). The browser build
//! exposes it to JavaScript through `web`.

#[cfg(target_arch = "wasm32")]
pub mod web;
