//! Seatplan Network Library
//!
//! HTTP client for the Google Generative Language API, used as the
//! generation backend for AI grouping.
//!
//! # Usage
//!
//! ```ignore
//! let config = ClientConfig::from_env(None);
//! let client = Arc::new(GeminiClient::new(config)?);
//! let service = GroupingService::new(client, "gemini-2.5-flash");
//! let groups = service.generate_groups(&students, "4", "").await;
//! ```

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{ClientConfig, GeminiClient, API_KEY_ENV, DEFAULT_ENDPOINT, FALLBACK_API_KEY_ENV};
pub use error::{Error, Result};
pub use protocol::{GenerateContentRequest, GenerateContentResponse};
