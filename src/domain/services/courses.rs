use crate::domain::model::{
    Course, CourseChanges, CourseDraft, CourseId, CoursePatch, ListFilter, NewCourse, StudentId,
};
use crate::domain::ports::{CourseRepository, StudentRepository};
use crate::domain::services::{clean_name, EnrollmentValidator};
use crate::utils::error::{CourseError, Result};
use crate::utils::validation::validate_required_field;
use std::sync::Arc;

/// Course operations. Writes run field checks, then student reference
/// resolution, then the enrollment limit, and only then touch the repository.
#[derive(Clone)]
pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    students: Arc<dyn StudentRepository>,
    enrollment: EnrollmentValidator,
}

impl CourseService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        students: Arc<dyn StudentRepository>,
        enrollment: EnrollmentValidator,
    ) -> Self {
        Self {
            courses,
            students,
            enrollment,
        }
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Course>> {
        self.courses.list_courses(filter).await
    }

    pub async fn get(&self, id: CourseId) -> Result<Course> {
        self.courses
            .get_course(id)
            .await?
            .ok_or(CourseError::NotFound {
                entity: "Course",
                id,
            })
    }

    pub async fn create(&self, input: NewCourse) -> Result<Course> {
        let draft = self.prepare_draft(input).await?;
        let course = self.courses.insert_course(draft).await?;
        tracing::info!(
            "📚 Created course {} '{}' with {} students",
            course.id,
            course.name,
            course.students.len()
        );
        Ok(course)
    }

    /// Full replacement (`PUT`): name and the whole enrollment.
    pub async fn replace(&self, id: CourseId, input: NewCourse) -> Result<Course> {
        let draft = self.prepare_draft(input).await?;
        let changes = CourseChanges {
            name: Some(draft.name),
            students: Some(draft.students),
        };
        self.apply(id, changes).await
    }

    /// Partial update (`PATCH`); the limit only applies when `students` is sent.
    pub async fn update(&self, id: CourseId, patch: CoursePatch) -> Result<Course> {
        let name = patch.name.as_deref().map(clean_name).transpose()?;
        let students = match patch.students {
            Some(Some(students)) => Some(self.check_students(students).await?),
            Some(None) => return Err(CourseError::field("students", "This field may not be null.")),
            None => None,
        };
        self.apply(id, CourseChanges { name, students }).await
    }

    pub async fn delete(&self, id: CourseId) -> Result<()> {
        if self.courses.delete_course(id).await? {
            tracing::info!("🗑️ Deleted course {}", id);
            Ok(())
        } else {
            Err(CourseError::NotFound {
                entity: "Course",
                id,
            })
        }
    }

    async fn apply(&self, id: CourseId, changes: CourseChanges) -> Result<Course> {
        let course = self
            .courses
            .update_course(id, changes)
            .await?
            .ok_or(CourseError::NotFound {
                entity: "Course",
                id,
            })?;
        tracing::info!(
            "✏️ Updated course {} ({} students)",
            course.id,
            course.students.len()
        );
        Ok(course)
    }

    async fn prepare_draft(&self, input: NewCourse) -> Result<CourseDraft> {
        let name = clean_name(validate_required_field("name", &input.name)?)?;
        let students = self.check_students(input.students).await?;
        Ok(CourseDraft { name, students })
    }

    async fn check_students(&self, students: Vec<StudentId>) -> Result<Vec<StudentId>> {
        let missing = self.students.missing_students(&students).await?;
        if let Some(first) = missing.first() {
            return Err(CourseError::field(
                "students",
                format!("Invalid pk \"{}\" - object does not exist.", first),
            ));
        }
        self.enrollment.validate(students)
    }
}
