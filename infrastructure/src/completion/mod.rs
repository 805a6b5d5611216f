//! Chat-completions adapter for the model gateway port

pub mod gateway;
pub mod protocol;

pub use gateway::{ChatCompletionGateway, DEFAULT_ENDPOINT, DEFAULT_MODEL};
