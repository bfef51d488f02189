pub mod config;
pub mod error;
pub mod roles;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_ROLES_PATH};
pub use error::{ApiError, ConfigError, Result, TransportError};
pub use roles::RolesService;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
