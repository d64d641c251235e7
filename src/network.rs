//! Network URL constants for the task-management API.

/// Default REST API base URL for the task-management server.
pub const DEFAULT_API_URL: &str = "https://task-management-server-nyfr.onrender.com/api/tasks";
