//! HTTP surface of the courses API.

pub mod error;
pub mod handlers;

use crate::domain::ports::{CourseRepository, StudentRepository};
use crate::domain::services::{CourseService, EnrollmentValidator, StudentService};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub use error::ApiError;

pub const API_PREFIX: &str = "/api/v1";

/// Everything a request needs, passed in explicitly: services over the
/// repository handle, and the enrollment limit inside `CourseService`.
#[derive(Clone)]
pub struct AppState {
    pub courses: CourseService,
    pub students: StudentService,
}

impl AppState {
    pub fn new<R>(repository: Arc<R>, enrollment: EnrollmentValidator) -> Self
    where
        R: CourseRepository + StudentRepository + 'static,
    {
        let courses: Arc<dyn CourseRepository> = repository.clone();
        let students: Arc<dyn StudentRepository> = repository;
        Self {
            courses: CourseService::new(courses, students.clone(), enrollment),
            students: StudentService::new(students),
        }
    }
}

/// Build the API router with the given state.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/courses/",
            get(handlers::list_courses).post(handlers::create_course),
        )
        .route(
            "/courses/{id}/",
            get(handlers::get_course)
                .put(handlers::replace_course)
                .patch(handlers::update_course)
                .delete(handlers::delete_course),
        )
        .route(
            "/students/",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/students/{id}/",
            get(handlers::get_student)
                .put(handlers::replace_student)
                .patch(handlers::update_student)
                .delete(handlers::delete_student),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(handlers::fallback)
        .with_state(state)
}
