pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::{build_router, AppState};
pub use adapters::storage::SqliteStore;
pub use config::{CliConfig, Settings, TomlConfig};
pub use core::server::ApiServer;
pub use domain::services::{EnrollmentValidator, DEFAULT_MAX_STUDENTS_PER_COURSE};
pub use utils::error::{CourseError, Result};
