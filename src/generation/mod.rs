//! Generation requests and the client that runs them.
//!
//! - **Params**: Decoding parameters, their ranges, and the validated
//!   [`SamplingConfig`] a backend receives
//! - **Request**: [`PromptRequest`] in, [`GenerationResult`] out
//! - **Client**: [`GenerationClient`], the single entry point to a backend
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use textforge::backend::EchoBackend;
//! use textforge::generation::{GenerationClient, GenerationParams};
//!
//! let client = GenerationClient::new(Arc::new(EchoBackend));
//! let text = client.generate("Hello", &GenerationParams::default()).unwrap();
//! assert_eq!(text, "Hello");
//! ```

mod client;
mod params;
mod request;

pub use client::{GenerationClient, strip_special_tokens};
pub use params::{
    GenerationParams, MAX_MAX_LENGTH, MAX_TEMPERATURE, MAX_TOP_K, MAX_TOP_P, MIN_MAX_LENGTH,
    MIN_TOP_K, SamplingConfig,
};
pub use request::{GenerationResult, PromptRequest};
