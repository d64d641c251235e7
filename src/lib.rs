//! # Task API Client
//!
//! A preconfigured HTTP client for the task-management REST API.
//!
//! ## Modules
//!
//! - [`api`]: the client, its builder, retry configuration and errors
//! - [`network`]: the default API base URL
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use task_api_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Build once at startup and pass it to whoever needs it.
//!     let client = TaskApiClient::new()?;
//!     assert_eq!(client.base_url(), DEFAULT_API_URL);
//!
//!     let task: serde_json::Value = client.get("some-task-id").await?;
//!     println!("{}", task);
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Network URL constants.
pub mod network;

/// REST API client module.
pub mod api;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use task_api_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        ApiError, ApiResult, ErrorResponse, RetryConfig, TaskApiClient, TaskApiClientBuilder,
    };

    pub use crate::network::DEFAULT_API_URL;
}
