pub mod client;
pub mod stream;

pub use client::{ApiClient, ApiError, ServerConfig, TaskQuery};
pub use stream::{UpdateSignal, UpdateStream};
