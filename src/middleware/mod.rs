pub mod auth;
pub mod response;

pub use auth::{resolve_profile_middleware, ResolvedProfile};
pub use response::{ApiResponse, ApiResult};
