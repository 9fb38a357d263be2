use crate::domain::model::{
    Course, CourseChanges, CourseDraft, CourseId, ListFilter, Student, StudentChanges,
    StudentDraft, StudentId,
};
use crate::domain::ports::{CourseRepository, StudentRepository};
use crate::utils::error::{CourseError, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    birth_date TEXT
);
CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS course_students (
    course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    PRIMARY KEY (course_id, student_id)
);
CREATE INDEX IF NOT EXISTS idx_course_students_student
    ON course_students (student_id);
";

/// SQLite-backed repository for both resources. Cloning shares the same
/// connection; blocking calls run on the tokio blocking pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path`. `:memory:` gives a private
    /// in-memory database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path != Path::new(":memory:") {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }
        tracing::debug!("Opening SQLite database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| CourseError::TaskError {
                message: "database connection lock poisoned".to_string(),
            })?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| CourseError::TaskError {
            message: e.to_string(),
        })?
    }
}

fn load_enrollment(conn: &Connection, course_id: CourseId) -> Result<Vec<StudentId>> {
    let mut stmt = conn.prepare_cached(
        "SELECT student_id FROM course_students WHERE course_id = ?1 ORDER BY student_id",
    )?;
    let ids = stmt
        .query_map(params![course_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<StudentId>>>()?;
    Ok(ids)
}

fn load_course(conn: &Connection, id: CourseId) -> Result<Option<Course>> {
    let name: Option<String> = conn
        .query_row("SELECT name FROM courses WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()?;
    match name {
        Some(name) => Ok(Some(Course {
            id,
            name,
            students: load_enrollment(conn, id)?,
        })),
        None => Ok(None),
    }
}

fn replace_enrollment(conn: &Connection, course_id: CourseId, students: &[StudentId]) -> Result<()> {
    conn.execute(
        "DELETE FROM course_students WHERE course_id = ?1",
        params![course_id],
    )?;
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO course_students (course_id, student_id) VALUES (?1, ?2)",
    )?;
    for student_id in students {
        match stmt.execute(params![course_id, student_id]) {
            Ok(_) => {}
            // A student deleted after the service resolved the list.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                return Err(CourseError::field(
                    "students",
                    format!("Invalid pk \"{}\" - object does not exist.", student_id),
                ));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn load_student(conn: &Connection, id: StudentId) -> Result<Option<Student>> {
    let student = conn
        .query_row(
            "SELECT id, name, birth_date FROM students WHERE id = ?1",
            params![id],
            |row| {
                Ok(Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    birth_date: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(student)
}

#[async_trait]
impl CourseRepository for SqliteStore {
    async fn list_courses(&self, filter: &ListFilter) -> Result<Vec<Course>> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            let rows = {
                let mut stmt = conn.prepare_cached(
                    "SELECT id, name FROM courses
                     WHERE (?1 IS NULL OR id = ?1)
                       AND (?2 IS NULL OR instr(name, ?2) > 0)
                     ORDER BY id",
                )?;
                let rows = stmt
                    .query_map(params![filter.id, filter.name], |row| {
                        Ok((row.get::<_, CourseId>(0)?, row.get::<_, String>(1)?))
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            };

            rows.into_iter()
                .map(|(id, name)| -> Result<Course> {
                    Ok(Course {
                        id,
                        name,
                        students: load_enrollment(conn, id)?,
                    })
                })
                .collect()
        })
        .await
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>> {
        self.with_conn(move |conn| load_course(conn, id)).await
    }

    async fn insert_course(&self, draft: CourseDraft) -> Result<Course> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("INSERT INTO courses (name) VALUES (?1)", params![draft.name])?;
            let id = tx.last_insert_rowid();
            replace_enrollment(&tx, id, &draft.students)?;
            let course = load_course(&tx, id)?.ok_or(CourseError::NotFound {
                entity: "Course",
                id,
            })?;
            tx.commit()?;
            Ok(course)
        })
        .await
    }

    async fn update_course(&self, id: CourseId, changes: CourseChanges) -> Result<Option<Course>> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let exists = tx
                .query_row("SELECT 1 FROM courses WHERE id = ?1", params![id], |_| Ok(()))
                .optional()?
                .is_some();
            if !exists {
                return Ok(None);
            }

            if let Some(name) = &changes.name {
                tx.execute(
                    "UPDATE courses SET name = ?1 WHERE id = ?2",
                    params![name, id],
                )?;
            }
            if let Some(students) = &changes.students {
                replace_enrollment(&tx, id, students)?;
            }

            let course = load_course(&tx, id)?;
            tx.commit()?;
            Ok(course)
        })
        .await
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let deleted = tx.execute("DELETE FROM courses WHERE id = ?1", params![id])?;
            tx.commit()?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl StudentRepository for SqliteStore {
    async fn list_students(&self, filter: &ListFilter) -> Result<Vec<Student>> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, name, birth_date FROM students
                 WHERE (?1 IS NULL OR id = ?1)
                   AND (?2 IS NULL OR instr(name, ?2) > 0)
                 ORDER BY id",
            )?;
            let students = stmt
                .query_map(params![filter.id, filter.name], |row| {
                    Ok(Student {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        birth_date: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(students)
        })
        .await
    }

    async fn get_student(&self, id: StudentId) -> Result<Option<Student>> {
        self.with_conn(move |conn| load_student(conn, id)).await
    }

    async fn insert_student(&self, draft: StudentDraft) -> Result<Student> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO students (name, birth_date) VALUES (?1, ?2)",
                params![draft.name, draft.birth_date],
            )?;
            Ok(Student {
                id: conn.last_insert_rowid(),
                name: draft.name,
                birth_date: draft.birth_date,
            })
        })
        .await
    }

    async fn update_student(
        &self,
        id: StudentId,
        changes: StudentChanges,
    ) -> Result<Option<Student>> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            if load_student(&tx, id)?.is_none() {
                return Ok(None);
            }
            if let Some(name) = &changes.name {
                tx.execute(
                    "UPDATE students SET name = ?1 WHERE id = ?2",
                    params![name, id],
                )?;
            }
            if let Some(birth_date) = &changes.birth_date {
                tx.execute(
                    "UPDATE students SET birth_date = ?1 WHERE id = ?2",
                    params![birth_date, id],
                )?;
            }
            let student = load_student(&tx, id)?;
            tx.commit()?;
            Ok(student)
        })
        .await
    }

    async fn delete_student(&self, id: StudentId) -> Result<bool> {
        self.with_conn(move |conn| {
            let deleted = conn.execute("DELETE FROM students WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn missing_students(&self, ids: &[StudentId]) -> Result<Vec<StudentId>> {
        let ids = ids.to_vec();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare_cached("SELECT 1 FROM students WHERE id = ?1")?;
            let mut missing = Vec::new();
            for id in ids {
                if !stmt.exists(params![id])? {
                    missing.push(id);
                }
            }
            Ok(missing)
        })
        .await
    }
}
