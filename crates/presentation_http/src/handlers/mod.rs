//! HTTP request handlers

pub mod common;
pub mod events;
pub mod health;
pub mod weather;
