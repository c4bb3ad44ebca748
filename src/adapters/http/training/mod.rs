//! Training HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::TrainingHandlers;
pub use routes::training_routes;
