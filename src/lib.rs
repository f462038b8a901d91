// Library target exists for the integration tests under tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// tests can import types via `wordflow::catalog::*` / `wordflow::session::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by integration tests
pub mod catalog;
pub mod config;
pub mod session;

// Private: required transitively (won't compile without them)
mod app;
mod event;
mod ui;
