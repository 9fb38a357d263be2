use crate::domain::model::{
    Course, CourseChanges, CourseDraft, CourseId, ListFilter, Student, StudentChanges,
    StudentDraft, StudentId,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn database_path(&self) -> &str;
    fn max_students_per_course(&self) -> usize;
}

/// Course persistence. Every write is atomic: either the course row and its
/// whole association set change together, or nothing changes.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list_courses(&self, filter: &ListFilter) -> Result<Vec<Course>>;
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>>;
    async fn insert_course(&self, draft: CourseDraft) -> Result<Course>;
    /// Returns `None` when the course does not exist.
    async fn update_course(&self, id: CourseId, changes: CourseChanges) -> Result<Option<Course>>;
    /// Returns `false` when nothing was deleted.
    async fn delete_course(&self, id: CourseId) -> Result<bool>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list_students(&self, filter: &ListFilter) -> Result<Vec<Student>>;
    async fn get_student(&self, id: StudentId) -> Result<Option<Student>>;
    async fn insert_student(&self, draft: StudentDraft) -> Result<Student>;
    async fn update_student(
        &self,
        id: StudentId,
        changes: StudentChanges,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: StudentId) -> Result<bool>;
    /// Ids from `ids` that have no student row, in input order.
    async fn missing_students(&self, ids: &[StudentId]) -> Result<Vec<StudentId>>;
}
