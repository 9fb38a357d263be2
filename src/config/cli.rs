use clap::Parser;

/// Command line flags. Every setting is optional here so that only flags the
/// user actually passed override the TOML file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "small-courses")]
#[command(about = "Courses and students CRUD API with an enrollment limit")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on (host:port)
    #[arg(long)]
    pub bind: Option<String>,

    /// SQLite database file (`:memory:` for a throwaway database)
    #[arg(long)]
    pub database: Option<String>,

    /// Maximum number of students per course
    #[arg(long, env = "MAX_STUDENTS_PER_COURSE")]
    pub max_students_per_course: Option<usize>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
