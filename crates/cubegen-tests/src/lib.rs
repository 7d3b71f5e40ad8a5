//! Integration tests for cubegen crates.
//!
//! These tests drive the full generate → transform → write flow through the
//! file system and read the results back.
