pub mod cli;
pub mod toml_config;

pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::domain::services::DEFAULT_MAX_STUDENTS_PER_COURSE;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_one_of, validate_path, validate_positive_number, validate_socket_addr, Validate,
};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_DATABASE_PATH: &str = "db.sqlite3";
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

/// Resolved runtime configuration: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub database_path: String,
    pub max_students_per_course: usize,
    pub log_format: String,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            max_students_per_course: DEFAULT_MAX_STUDENTS_PER_COURSE,
            log_format: "compact".to_string(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Loads the TOML file named by `--config` (if any) and layers the CLI on top.
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(Self::merge(&file, cli))
    }

    pub fn merge(file: &TomlConfig, cli: &CliConfig) -> Self {
        let mut settings = Self::default();

        if let Some(bind) = file.bind() {
            settings.bind_addr = bind.to_string();
        }
        if let Some(path) = file.database_path() {
            settings.database_path = path.to_string();
        }
        if let Some(max) = file.max_students_per_course() {
            settings.max_students_per_course = max;
        }
        if let Some(format) = file.log_format() {
            settings.log_format = format.to_string();
        }
        if let Some(verbose) = file.verbose() {
            settings.verbose = verbose;
        }

        // 應用命令列覆蓋設定
        if let Some(bind) = &cli.bind {
            settings.bind_addr = bind.clone();
        }
        if let Some(path) = &cli.database {
            settings.database_path = path.clone();
        }
        if let Some(max) = cli.max_students_per_course {
            settings.max_students_per_course = max;
        }
        if cli.json_logs {
            settings.log_format = "json".to_string();
        }
        settings.verbose |= cli.verbose;

        settings
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

impl ConfigProvider for Settings {
    fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    fn database_path(&self) -> &str {
        &self.database_path
    }

    fn max_students_per_course(&self) -> usize {
        self.max_students_per_course
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("server.bind", &self.bind_addr)?;
        validate_path("database.path", &self.database_path)?;
        validate_positive_number(
            "enrollment.max_students_per_course",
            self.max_students_per_course,
            1,
        )?;
        validate_one_of("logging.format", &self.log_format, &LOG_FORMATS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CourseError;

    #[test]
    fn test_defaults() {
        let settings = Settings::merge(&TomlConfig::default(), &CliConfig::default());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_students_per_course, 20);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[server]
bind = "0.0.0.0:9000"

[enrollment]
max_students_per_course = 30
"#,
        )
        .unwrap();
        let cli = CliConfig {
            max_students_per_course: Some(5),
            json_logs: true,
            ..CliConfig::default()
        };

        let settings = Settings::merge(&file, &cli);
        assert_eq!(settings.bind_addr, "0.0.0.0:9000");
        assert_eq!(settings.max_students_per_course, 5);
        assert!(settings.json_logs());
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let settings = Settings {
            max_students_per_course: 0,
            ..Settings::default()
        };
        match settings.validate() {
            Err(CourseError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "enrollment.max_students_per_course")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let settings = Settings {
            log_format: "pretty".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let cli = CliConfig {
            config: Some("/definitely/not/here.toml".to_string()),
            ..CliConfig::default()
        };
        assert!(matches!(
            Settings::resolve(&cli),
            Err(CourseError::IoError(_))
        ));
    }
}
