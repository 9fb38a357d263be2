pub mod courses;
pub mod enrollment;
pub mod students;

pub use courses::CourseService;
pub use enrollment::{EnrollmentValidator, DEFAULT_MAX_STUDENTS_PER_COURSE};
pub use students::StudentService;

/// Longest accepted `name` for either resource.
pub const NAME_MAX_LENGTH: usize = 100;

use crate::utils::error::Result;
use crate::utils::validation::{validate_max_length, validate_non_empty_string};

pub(crate) fn clean_name(name: &str) -> Result<String> {
    validate_non_empty_string("name", name)?;
    let trimmed = name.trim();
    validate_max_length("name", trimmed, NAME_MAX_LENGTH)?;
    Ok(trimmed.to_string())
}
