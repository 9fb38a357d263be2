#![allow(dead_code)]

use small_courses::core::StudentRepository;
use small_courses::domain::model::{StudentDraft, StudentId};
use small_courses::{build_router, AppState, EnrollmentValidator, SqliteStore};
use std::sync::Arc;

pub struct TestApp {
    pub base: String,
    pub store: SqliteStore,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base, path)
    }

    /// Inserts `n` students straight into the store and returns their ids.
    pub async fn seed_students(&self, n: usize) -> Vec<StudentId> {
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let student = self
                .store
                .insert_student(StudentDraft {
                    name: format!("Student {}", i + 1),
                    birth_date: None,
                })
                .await
                .unwrap();
            ids.push(student.id);
        }
        ids
    }
}

/// Spin up the API on an OS-assigned port over a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_limit(small_courses::DEFAULT_MAX_STUDENTS_PER_COURSE).await
}

pub async fn spawn_app_with_limit(limit: usize) -> TestApp {
    let store = SqliteStore::open_in_memory().unwrap();
    let state = AppState::new(Arc::new(store.clone()), EnrollmentValidator::new(limit));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base: format!("http://127.0.0.1:{}", port),
        store,
        client: reqwest::Client::new(),
    }
}
