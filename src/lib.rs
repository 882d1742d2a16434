// src/lib.rs

//! irwatch library
//!
//! Watches investor-relations pages for newly published financial
//! reports and delivers them to a Telegram chat.

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
