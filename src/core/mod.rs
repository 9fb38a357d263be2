pub mod server;

pub use crate::domain::model::{Course, ListFilter, Student};
pub use crate::domain::ports::{ConfigProvider, CourseRepository, StudentRepository};
pub use crate::utils::error::Result;
