//! Adapter implementations of the ports.

pub mod ai;
pub mod http;
pub mod memory;
