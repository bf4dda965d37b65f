//! Runnable examples for the cli-parser workspace.
//!
//! Run them with `cargo run -p cli-parser-demos --example <name>`.
