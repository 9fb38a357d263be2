use anyhow::Result;
use serde_json::{json, Value};
use small_courses::utils::validation::Validate;
use small_courses::{ApiServer, CliConfig, Settings};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[tokio::test]
async fn test_server_from_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("courses.sqlite3");
    let normalized_path = db_path.to_str().unwrap().replace('\\', "/");

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        r#"
[server]
bind = "127.0.0.1:0"

[database]
path = "{}"

[enrollment]
max_students_per_course = 2
"#,
        normalized_path
    )?;

    let cli = CliConfig {
        config: Some(config_file.path().to_str().unwrap().to_string()),
        ..CliConfig::default()
    };
    let settings = Settings::resolve(&cli)?;
    settings.validate()?;
    assert_eq!(settings.max_students_per_course, 2);

    let server = ApiServer::open(settings)?;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        server.serve(listener).await.unwrap();
    });

    let base = format!("http://127.0.0.1:{}/api/v1", port);
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for name in ["Ann", "Bob", "Cid"] {
        let student: Value = client
            .post(format!("{}/students/", base))
            .json(&json!({ "name": name }))
            .send()
            .await?
            .json()
            .await?;
        ids.push(student["id"].as_i64().unwrap());
    }

    let resp = client
        .post(format!("{}/courses/", base))
        .json(&json!({"name": "Pairs only", "students": ids}))
        .send()
        .await?;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await?;
    assert_eq!(
        body["non_field_errors"][0],
        "One course should have no more than 2 students"
    );

    let resp = client
        .post(format!("{}/courses/", base))
        .json(&json!({"name": "Pairs only", "students": &ids[..2]}))
        .send()
        .await?;
    assert_eq!(resp.status(), 201);

    assert!(db_path.exists());
    Ok(())
}
