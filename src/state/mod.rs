/// State management module
///
/// This module handles all gallery state, including:
/// - Persistent key-value storage (storage.rs)
/// - The record sequence and its sync with storage (store.rs)
/// - Shared data structures (data.rs)

pub mod data;
pub mod storage;
pub mod store;
