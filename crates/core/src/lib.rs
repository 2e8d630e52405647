pub mod api;
pub mod config;
pub mod error;
pub mod types;

pub use api::{AuditSink, ManagementApi};
pub use config::AppConfig;
pub use error::{GatewayError, GatewayResult};
