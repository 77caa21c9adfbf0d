//! CLI command definitions and dispatch.

pub mod announcement;
pub mod config;
pub mod course;
pub mod explore;
pub mod lesson;
pub mod note;
pub mod resource;
pub mod role;
pub mod syllabus;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use campushub_core::config::AppConfig;
use campushub_core::error::AppError;
use campushub_core::traits::DocumentStore;
use campushub_core::types::FilterCriteria;
use campushub_store::MemoryDocumentStore;

use crate::output::OutputFormat;

/// CampusHub: study portal content management
#[derive(Debug, Parser)]
#[command(name = "campushub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Course management
    Course(course::CourseArgs),
    /// Lessons of a course
    Lesson(lesson::LessonArgs),
    /// Study notes
    Note(note::NoteArgs),
    /// Syllabus entries
    Syllabus(syllabus::SyllabusArgs),
    /// Study resources
    Resource(resource::ResourceArgs),
    /// Announcements
    Announcement(announcement::AnnouncementArgs),
    /// Admin roles
    Role(role::RoleArgs),
    /// Search courses and notes like the explore page
    Explore(explore::ExploreArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

/// Shared state for one CLI invocation.
#[derive(Debug)]
pub struct App {
    /// Loaded configuration.
    pub config: AppConfig,
    /// The file-backed store.
    pub store: Arc<MemoryDocumentStore>,
    /// Output format.
    pub format: OutputFormat,
}

impl App {
    /// Open the document store described by the configuration.
    pub async fn open(config: AppConfig, format: OutputFormat) -> Result<Self, AppError> {
        let store = MemoryDocumentStore::open(&config.store).await?;
        Ok(Self {
            config,
            store: Arc::new(store),
            format,
        })
    }

    /// The store as a trait object.
    pub fn documents(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }
}

/// Search box and dropdown values shared by list commands.
#[derive(Debug, Clone, Default, Args)]
pub struct ListFilter {
    /// Free-text search over title and description
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// Branch (or tag) to match, case-insensitive
    #[arg(short, long, default_value = "")]
    pub branch: String,
}

impl ListFilter {
    /// Criteria for the shared filter.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::all()
            .text(self.search.clone())
            .branch(self.branch.clone())
    }
}

/// Replace `target` when a new value was given on the command line.
pub fn apply<T>(target: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &self.config, &config, self.format).await;
        }

        debug!(command = ?self.command, "Running command");
        let app = App::open(config, self.format).await?;
        match &self.command {
            Commands::Course(args) => course::execute(args, &app).await?,
            Commands::Lesson(args) => lesson::execute(args, &app).await?,
            Commands::Note(args) => note::execute(args, &app).await?,
            Commands::Syllabus(args) => syllabus::execute(args, &app).await?,
            Commands::Resource(args) => resource::execute(args, &app).await?,
            Commands::Announcement(args) => announcement::execute(args, &app).await?,
            Commands::Role(args) => role::execute(args, &app).await?,
            Commands::Explore(args) => explore::execute(args, &app).await?,
            Commands::Config(_) => {}
        }
        app.store.flush().await
    }
}
