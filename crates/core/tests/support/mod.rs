//! Shared test helpers for `bomwright-core` integration tests.
//!
//! Provides in-memory store mocks that count calls and can be told to fail,
//! plus BOM fixtures, so tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod stores;
