use crate::domain::model::{
    ListFilter, NewStudent, Student, StudentChanges, StudentDraft, StudentId, StudentPatch,
};
use crate::domain::ports::StudentRepository;
use crate::domain::services::clean_name;
use crate::utils::error::{CourseError, Result};
use crate::utils::validation::validate_required_field;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Student>> {
        self.students.list_students(filter).await
    }

    pub async fn get(&self, id: StudentId) -> Result<Student> {
        self.students
            .get_student(id)
            .await?
            .ok_or(CourseError::NotFound {
                entity: "Student",
                id,
            })
    }

    pub async fn create(&self, input: NewStudent) -> Result<Student> {
        let draft = Self::prepare_draft(input)?;
        let student = self.students.insert_student(draft).await?;
        tracing::info!("🎓 Created student {} '{}'", student.id, student.name);
        Ok(student)
    }

    pub async fn replace(&self, id: StudentId, input: NewStudent) -> Result<Student> {
        let draft = Self::prepare_draft(input)?;
        let changes = StudentChanges {
            name: Some(draft.name),
            birth_date: Some(draft.birth_date),
        };
        self.apply(id, changes).await
    }

    pub async fn update(&self, id: StudentId, patch: StudentPatch) -> Result<Student> {
        let name = patch.name.as_deref().map(clean_name).transpose()?;
        self.apply(
            id,
            StudentChanges {
                name,
                birth_date: patch.birth_date,
            },
        )
        .await
    }

    /// Removing a student also drops it from every course it was enrolled in.
    pub async fn delete(&self, id: StudentId) -> Result<()> {
        if self.students.delete_student(id).await? {
            tracing::info!("🗑️ Deleted student {}", id);
            Ok(())
        } else {
            Err(CourseError::NotFound {
                entity: "Student",
                id,
            })
        }
    }

    async fn apply(&self, id: StudentId, changes: StudentChanges) -> Result<Student> {
        self.students
            .update_student(id, changes)
            .await?
            .ok_or(CourseError::NotFound {
                entity: "Student",
                id,
            })
    }

    fn prepare_draft(input: NewStudent) -> Result<StudentDraft> {
        let name = clean_name(validate_required_field("name", &input.name)?)?;
        Ok(StudentDraft {
            name,
            birth_date: input.birth_date,
        })
    }
}
