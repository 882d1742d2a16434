// src/storage/mod.rs

//! Persistence layer.

mod state;

pub use state::{StateMap, StateStore};
