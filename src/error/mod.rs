mod app;
mod config;
mod report;
mod transport;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use report::ReportError;
pub use transport::TransportError;
pub use validation::ValidationError;
