mod common;

use anyhow::Result;
use common::spawn_app;
use serde_json::{json, Value};
use small_courses::core::{Course, Student};

#[tokio::test]
async fn test_student_crud_round() -> Result<()> {
    let app = spawn_app().await;

    let resp = app
        .client
        .post(app.url("/students/"))
        .json(&json!({"name": "Ann", "birth_date": "2001-04-12"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 201);
    let created: Student = resp.json().await?;
    assert_eq!(created.name, "Ann");
    assert_eq!(created.birth_date.map(|d| d.to_string()).as_deref(), Some("2001-04-12"));

    let url = app.url(&format!("/students/{}/", created.id));
    let resp = app
        .client
        .patch(&url)
        .json(&json!({"birth_date": null}))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let patched: Student = resp.json().await?;
    assert_eq!(patched.name, "Ann");
    assert_eq!(patched.birth_date, None);

    let resp = app
        .client
        .put(&url)
        .json(&json!({"name": "Anna"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);

    let fetched: Student = reqwest::get(&url).await?.json().await?;
    assert_eq!(fetched.name, "Anna");

    assert_eq!(app.client.delete(&url).send().await?.status(), 204);
    assert_eq!(app.client.delete(&url).send().await?.status(), 404);
    Ok(())
}

#[tokio::test]
async fn test_blank_student_name_is_rejected() -> Result<()> {
    let app = spawn_app().await;
    let resp = app
        .client
        .post(app.url("/students/"))
        .json(&json!({"name": "   "}))
        .send()
        .await?;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await?;
    assert_eq!(body, json!({"name": ["This field may not be blank."]}));
    Ok(())
}

#[tokio::test]
async fn test_student_name_filtration() -> Result<()> {
    let app = spawn_app().await;
    app.seed_students(12).await;

    // "Student 1", "Student 10", "Student 11", "Student 12"
    let data: Vec<Student> = reqwest::get(app.url("/students/?name=Student%201"))
        .await?
        .json()
        .await?;
    assert_eq!(data.len(), 4);
    assert!(data.windows(2).all(|w| w[0].id < w[1].id));
    Ok(())
}

#[tokio::test]
async fn test_deleting_student_updates_courses() -> Result<()> {
    let app = spawn_app().await;
    let students = app.seed_students(3).await;

    let course: Course = app
        .client
        .post(app.url("/courses/"))
        .json(&json!({"name": "Biology", "students": students}))
        .send()
        .await?
        .json()
        .await?;

    let resp = app
        .client
        .delete(app.url(&format!("/students/{}/", students[0])))
        .send()
        .await?;
    assert_eq!(resp.status(), 204);

    let fetched: Course = reqwest::get(app.url(&format!("/courses/{}/", course.id)))
        .await?
        .json()
        .await?;
    assert_eq!(fetched.students, students[1..].to_vec());
    Ok(())
}
