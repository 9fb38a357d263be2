use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type StudentId = i64;
pub type CourseId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// Enrolled student ids, ascending.
    pub students: Vec<StudentId>,
}

/// Body of `POST` and `PUT`; `name` is optional here so a missing field
/// surfaces as a field error instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudent {
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub birth_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCourse {
    pub name: Option<String>,
    #[serde(default)]
    pub students: Vec<StudentId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoursePatch {
    pub name: Option<String>,
    /// `Some(None)` is an explicit `null`, which is rejected.
    #[serde(default, deserialize_with = "double_option")]
    pub students: Option<Option<Vec<StudentId>>>,
}

/// Validated course write handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub name: String,
    pub students: Vec<StudentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub students: Option<Vec<StudentId>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub birth_date: Option<Option<NaiveDate>>,
}

/// List filter shared by both resources: exact id and/or name substring.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
}

// `null` must stay distinguishable from an absent field in PATCH bodies.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
