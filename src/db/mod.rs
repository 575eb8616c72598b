pub mod client;
pub mod endpoint;
pub mod log;
pub mod migrate;
pub mod models;
pub mod queries;
pub mod stats;
pub mod store;

pub use client::{ClientConfig, EvalClient};
pub use store::EvaluationStore;
