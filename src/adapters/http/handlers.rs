use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::domain::model::{
    Course, CoursePatch, ListFilter, NewCourse, NewStudent, Student, StudentPatch,
};
use crate::utils::error::CourseError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Raw list query string; both parameters are optional and empty values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> ApiResult<ListFilter> {
        let id = match self.id.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| CourseError::field("id", "Enter a number."))?,
            ),
            None => None,
        };
        let name = self.name.filter(|v| !v.is_empty());
        Ok(ListFilter { id, name })
    }
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))
}

fn list_filter(query: Result<Query<ListQuery>, QueryRejection>) -> ApiResult<ListFilter> {
    let Query(query) = query.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    query.into_filter()
}

// ---- courses ----

#[tracing::instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Course>>> {
    let filter = list_filter(query)?;
    let courses = state.courses.list(&filter).await?;
    tracing::debug!("Listing {} courses", courses.len());
    Ok(Json(courses))
}

#[tracing::instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Course>> {
    let id = parse_id(&id)?;
    Ok(Json(state.courses.get(id).await?))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<NewCourse>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    let course = state.courses.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn replace_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewCourse>, JsonRejection>,
) -> ApiResult<Json<Course>> {
    let id = parse_id(&id)?;
    Ok(Json(state.courses.replace(id, body(payload)?).await?))
}

#[tracing::instrument(skip(state, payload))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CoursePatch>, JsonRejection>,
) -> ApiResult<Json<Course>> {
    let id = parse_id(&id)?;
    Ok(Json(state.courses.update(id, body(payload)?).await?))
}

#[tracing::instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.courses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- students ----

#[tracing::instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Student>>> {
    let filter = list_filter(query)?;
    Ok(Json(state.students.list(&filter).await?))
}

#[tracing::instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Student>> {
    let id = parse_id(&id)?;
    Ok(Json(state.students.get(id).await?))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    let student = state.students.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn replace_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> ApiResult<Json<Student>> {
    let id = parse_id(&id)?;
    Ok(Json(state.students.replace(id, body(payload)?).await?))
}

#[tracing::instrument(skip(state, payload))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> ApiResult<Json<Student>> {
    let id = parse_id(&id)?;
    Ok(Json(state.students.update(id, body(payload)?).await?))
}

#[tracing::instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn fallback() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_ignores_empty_values() {
        let filter = ListQuery {
            id: Some(String::new()),
            name: Some(String::new()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter, ListFilter::default());
    }

    #[test]
    fn test_list_query_rejects_non_numeric_id() {
        let err = ListQuery {
            id: Some("abc".to_string()),
            name: None,
        }
        .into_filter()
        .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Course(CourseError::FieldValidationError { ref field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_non_numeric_path_id_is_not_found() {
        assert!(matches!(parse_id("abc"), Err(ApiError::NotFound)));
        assert_eq!(parse_id("42").unwrap(), 42);
    }
}
