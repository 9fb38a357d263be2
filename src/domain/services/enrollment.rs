use crate::domain::model::StudentId;
use crate::utils::error::{CourseError, Result};

pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 20;

/// Guards the enrollment ceiling on every course write that carries a
/// student list. Stateless; reads and deletes never go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentValidator {
    max_students: usize,
}

impl EnrollmentValidator {
    pub fn new(max_students: usize) -> Self {
        Self { max_students }
    }

    /// Hands the candidate list back untouched when it fits the limit.
    /// The list is counted as submitted, duplicates included.
    pub fn validate(&self, students: Vec<StudentId>) -> Result<Vec<StudentId>> {
        if students.len() > self.max_students {
            tracing::debug!(
                "Enrollment rejected: {} students submitted, limit is {}",
                students.len(),
                self.max_students
            );
            return Err(CourseError::EnrollmentLimitExceeded {
                max: self.max_students,
                requested: students.len(),
            });
        }
        Ok(students)
    }
}

impl Default for EnrollmentValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STUDENTS_PER_COURSE)
    }
}
