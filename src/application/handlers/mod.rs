//! Application command and query handlers.
//!
//! One module per use-case family. Handlers own no state beyond injected
//! ports; each exposes a Command/Query, an Error, a Result view, and a
//! generic handler over the port traits it needs.

pub mod catalog;
pub mod evaluation;
pub mod training;
