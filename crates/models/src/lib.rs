pub mod response;
pub mod role;

// Re-export commonly used types
pub use response::ApiResponseData;
pub use role::{Role, RoleDto, RoleRequest};
