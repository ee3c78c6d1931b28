//! Type definitions shared by the service and HTTP layers
//!
//! - `pagination` - page requests and paged results
//! - `response` - message and health check bodies

pub mod pagination;
pub mod response;

pub use pagination::{PageRequest, PagedResponse};
pub use response::{HealthResponse, MessageResponse};
