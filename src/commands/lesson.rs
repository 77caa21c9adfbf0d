//! Lesson management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campushub_core::error::AppError;
use campushub_core::traits::Draft;
use campushub_core::types::DocumentId;
use campushub_entity::{Lesson, LessonDraft};
use campushub_service::{EntityRepository, to_embed_url};

use super::{App, apply};
use crate::output;

/// Arguments for lesson commands
#[derive(Debug, Args)]
pub struct LessonArgs {
    /// Course the lessons belong to
    #[arg(long)]
    pub course: String,

    /// Lesson subcommand
    #[command(subcommand)]
    pub command: LessonCommand,
}

/// Lesson subcommands
#[derive(Debug, Subcommand)]
pub enum LessonCommand {
    /// List lessons in order
    List,
    /// Add a lesson
    Add {
        /// Title
        #[arg(long)]
        title: String,
        /// Video link
        #[arg(long, default_value = "")]
        youtube_url: String,
        /// Position in the course
        #[arg(long, default_value_t = 1)]
        order: i64,
    },
    /// Edit a lesson
    Edit {
        /// Lesson id
        id: String,
        /// Title
        #[arg(long)]
        title: Option<String>,
        /// Video link
        #[arg(long)]
        youtube_url: Option<String>,
        /// Position in the course
        #[arg(long)]
        order: Option<i64>,
    },
    /// Delete a lesson
    Delete {
        /// Lesson id
        id: String,
    },
}

/// Lesson display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct LessonRow {
    /// Lesson ID
    id: String,
    /// Order
    order: i64,
    /// Title
    title: String,
    /// Player URL
    embed_url: String,
}

impl From<&Lesson> for LessonRow {
    fn from(l: &Lesson) -> Self {
        Self {
            id: l.id.to_string(),
            order: l.order,
            title: l.title.clone(),
            embed_url: l
                .youtube_url
                .as_deref()
                .and_then(to_embed_url)
                .unwrap_or_default(),
        }
    }
}

/// Execute lesson commands
pub async fn execute(args: &LessonArgs, app: &App) -> Result<(), AppError> {
    let course_id = DocumentId::new(args.course.as_str());
    let repo = EntityRepository::<LessonDraft>::scoped(
        app.documents(),
        Lesson::collection_for(&course_id)?,
    );

    match &args.command {
        LessonCommand::List => {
            let rows: Vec<LessonRow> = repo.list().await?.iter().map(LessonRow::from).collect();
            output::print_list(&rows, app.format);
        }
        LessonCommand::Add {
            title,
            youtube_url,
            order,
        } => {
            let draft = LessonDraft {
                id: None,
                title: title.clone(),
                youtube_url: youtube_url.clone(),
                order: *order,
            };
            output::print_upsert(repo.upsert(&draft).await, "Lesson")?;
        }
        LessonCommand::Edit {
            id,
            title,
            youtube_url,
            order,
        } => {
            let id = DocumentId::new(id.as_str());
            let lesson = repo
                .get(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Lesson '{id}' not found")))?;
            let mut draft = LessonDraft::from_entity(&lesson);
            apply(&mut draft.title, title);
            apply(&mut draft.youtube_url, youtube_url);
            apply(&mut draft.order, order);
            output::print_upsert(repo.upsert(&draft).await, "Lesson")?;
        }
        LessonCommand::Delete { id } => {
            repo.delete(&DocumentId::new(id.as_str())).await?;
            output::print_success(&format!("Lesson '{id}' deleted"));
        }
    }

    Ok(())
}
