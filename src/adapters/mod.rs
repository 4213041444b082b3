//! Adapters - concrete implementations of the ports.

pub mod ai;
pub mod http;
pub mod pdf;
pub mod storage;
