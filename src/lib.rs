// Library target for benchmarks and integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// external harnesses can import types via `stenomaster::session::*` etc.
// Some code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

pub mod app;
pub mod catalog;
pub mod config;
pub mod keyboard;
pub mod profile;
pub mod session;
pub mod ui;

// Binary-only plumbing; declared so the tree matches main.rs.
mod event;
mod logging;
