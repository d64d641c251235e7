//! REST API client module for the task-management server.
//!
//! This module provides an HTTP client pre-bound to the task API's base URL.
//! Request and response bodies are any `serde` types the caller chooses.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use task_api_client::api::TaskApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Bound to https://task-management-server-nyfr.onrender.com/api/tasks
//!     let client = TaskApiClient::new()?;
//!
//!     let tasks: Vec<serde_json::Value> = client.get("").await?;
//!     println!("Found {} tasks", tasks.len());
//!
//!     let created: serde_json::Value = client
//!         .post("", &serde_json::json!({ "title": "Write docs" }))
//!         .await?;
//!     println!("Created: {}", created);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Client Configuration
//!
//! Use the builder pattern for custom configuration:
//!
//! ```rust,ignore
//! use task_api_client::api::{RetryConfig, TaskApiClient};
//! use task_api_client::network::DEFAULT_API_URL;
//! use std::time::Duration;
//!
//! let client = TaskApiClient::builder(DEFAULT_API_URL)
//!     .timeout(Duration::from_secs(60))
//!     .header("X-Custom-Header", "value")
//!     .with_retry(RetryConfig::new(3))
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! All methods return `ApiResult<T>` which is an alias for `Result<T, ApiError>`.
//!
//! ```rust,ignore
//! use task_api_client::api::{ApiError, TaskApiClient};
//!
//! match client.delete::<()>("unknown-id").await {
//!     Ok(()) => println!("Deleted"),
//!     Err(ApiError::NotFound(resp)) => println!("Task not found: {}", resp),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

pub mod client;
pub mod error;
pub mod retry;
pub mod url;

// Re-export main types for convenience
pub use client::{TaskApiClient, TaskApiClientBuilder};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use retry::RetryConfig;
