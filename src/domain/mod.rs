//! Domain layer: pure types and decision procedures, no I/O.

pub mod catalog;
pub mod entitlement;
pub mod evaluation;
pub mod foundation;
pub mod session;
