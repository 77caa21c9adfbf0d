//! Course management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campushub_core::error::AppError;
use campushub_core::traits::Draft;
use campushub_core::types::DocumentId;
use campushub_entity::{Course, CourseDraft, CourseStatus, Lesson, LessonDraft};
use campushub_service::{EntityRepository, filter};

use super::{App, ListFilter, apply, lesson::LessonRow};
use crate::output;

/// Arguments for course commands
#[derive(Debug, Args)]
pub struct CourseArgs {
    /// Course subcommand
    #[command(subcommand)]
    pub command: CourseCommand,
}

/// Course subcommands
#[derive(Debug, Subcommand)]
pub enum CourseCommand {
    /// List courses, newest first
    List {
        #[command(flatten)]
        filter: ListFilter,
    },
    /// Show a course and its lessons
    Show {
        /// Course id
        id: String,
    },
    /// Create a course
    Add {
        /// Title
        #[arg(long)]
        title: String,
        /// Branch, e.g. ECE
        #[arg(long)]
        branch: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Video link
        #[arg(long, default_value = "")]
        youtube_url: String,
        /// draft or published
        #[arg(long, default_value = "published")]
        status: CourseStatus,
    },
    /// Edit a course
    Edit {
        /// Course id
        id: String,
        /// Title
        #[arg(long)]
        title: Option<String>,
        /// Branch
        #[arg(long)]
        branch: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Video link
        #[arg(long)]
        youtube_url: Option<String>,
        /// draft or published
        #[arg(long)]
        status: Option<CourseStatus>,
    },
    /// Delete a course. Its lessons are kept.
    Delete {
        /// Course id
        id: String,
    },
}

/// Course display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct CourseRow {
    /// Course ID
    id: String,
    /// Title
    title: String,
    /// Branch
    branch: String,
    /// Status
    status: String,
    /// Created at
    created_at: String,
}

impl From<&Course> for CourseRow {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id.to_string(),
            title: c.title.clone(),
            branch: c.branch.clone(),
            status: c.status.to_string(),
            created_at: output::date_cell(c.created_at),
        }
    }
}

/// Execute course commands
pub async fn execute(args: &CourseArgs, app: &App) -> Result<(), AppError> {
    let repo = EntityRepository::<CourseDraft>::root(app.documents());

    match &args.command {
        CourseCommand::List { filter: f } => {
            let courses = filter(&repo.list().await?, &f.criteria());
            let rows: Vec<CourseRow> = courses.iter().map(CourseRow::from).collect();
            output::print_list(&rows, app.format);
        }
        CourseCommand::Show { id } => {
            let id = DocumentId::new(id.as_str());
            let course = repo
                .get(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Course '{id}' not found")))?;
            output::print_item(&course, app.format);

            let lessons = EntityRepository::<LessonDraft>::scoped(
                app.documents(),
                Lesson::collection_for(&id)?,
            )
            .list()
            .await?;
            let rows: Vec<LessonRow> = lessons.iter().map(LessonRow::from).collect();
            output::print_list(&rows, app.format);
        }
        CourseCommand::Add {
            title,
            branch,
            description,
            youtube_url,
            status,
        } => {
            let draft = CourseDraft {
                id: None,
                title: title.clone(),
                branch: branch.clone(),
                description: description.clone(),
                youtube_url: youtube_url.clone(),
                status: *status,
            };
            output::print_upsert(repo.upsert(&draft).await, "Course")?;
        }
        CourseCommand::Edit {
            id,
            title,
            branch,
            description,
            youtube_url,
            status,
        } => {
            let id = DocumentId::new(id.as_str());
            let course = repo
                .get(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Course '{id}' not found")))?;
            let mut draft = CourseDraft::from_entity(&course);
            apply(&mut draft.title, title);
            apply(&mut draft.branch, branch);
            apply(&mut draft.description, description);
            apply(&mut draft.youtube_url, youtube_url);
            apply(&mut draft.status, status);
            output::print_upsert(repo.upsert(&draft).await, "Course")?;
        }
        CourseCommand::Delete { id } => {
            let id = DocumentId::new(id.as_str());
            repo.delete(&id).await?;
            output::print_success(&format!("Course '{id}' deleted"));
            let orphans = app.store.collection_len(&Lesson::collection_for(&id)?).await;
            if orphans > 0 {
                output::print_warning(&format!("{orphans} lesson(s) remain under the deleted course"));
            }
        }
    }

    Ok(())
}
