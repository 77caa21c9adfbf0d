//! Syllabus CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campushub_core::error::AppError;
use campushub_core::traits::Draft;
use campushub_core::types::DocumentId;
use campushub_entity::{SyllabusDraft, SyllabusEntry};
use campushub_service::{EntityRepository, filter};

use super::{App, ListFilter, apply};
use crate::output;

/// Arguments for syllabus commands
#[derive(Debug, Args)]
pub struct SyllabusArgs {
    /// Syllabus subcommand
    #[command(subcommand)]
    pub command: SyllabusCommand,
}

/// Syllabus subcommands
#[derive(Debug, Subcommand)]
pub enum SyllabusCommand {
    /// List syllabus entries, newest first
    List {
        #[command(flatten)]
        filter: ListFilter,
    },
    /// Create a syllabus entry
    Add {
        /// Title
        #[arg(long)]
        title: String,
        /// Branch
        #[arg(long)]
        branch: String,
        /// Semester
        #[arg(long)]
        semester: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Download link
        #[arg(long, default_value = "")]
        download_url: String,
    },
    /// Edit a syllabus entry
    Edit {
        /// Entry id
        id: String,
        /// Title
        #[arg(long)]
        title: Option<String>,
        /// Branch
        #[arg(long)]
        branch: Option<String>,
        /// Semester
        #[arg(long)]
        semester: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Download link
        #[arg(long)]
        download_url: Option<String>,
    },
    /// Delete a syllabus entry
    Delete {
        /// Entry id
        id: String,
    },
}

/// Syllabus display row for table output
#[derive(Debug, Serialize, Tabled)]
struct SyllabusRow {
    /// Entry ID
    id: String,
    /// Title
    title: String,
    /// Branch
    branch: String,
    /// Semester
    semester: String,
    /// Download link
    download_url: String,
}

impl From<&SyllabusEntry> for SyllabusRow {
    fn from(s: &SyllabusEntry) -> Self {
        Self {
            id: s.id.to_string(),
            title: s.title.clone(),
            branch: s.branch.clone(),
            semester: s.semester.clone(),
            download_url: s.download_url.clone().unwrap_or_default(),
        }
    }
}

/// Execute syllabus commands
pub async fn execute(args: &SyllabusArgs, app: &App) -> Result<(), AppError> {
    let repo = EntityRepository::<SyllabusDraft>::root(app.documents());

    match &args.command {
        SyllabusCommand::List { filter: f } => {
            let rows: Vec<SyllabusRow> = filter(&repo.list().await?, &f.criteria())
                .iter()
                .map(SyllabusRow::from)
                .collect();
            output::print_list(&rows, app.format);
        }
        SyllabusCommand::Add {
            title,
            branch,
            semester,
            description,
            download_url,
        } => {
            let draft = SyllabusDraft {
                id: None,
                title: title.clone(),
                branch: branch.clone(),
                semester: semester.clone(),
                description: description.clone(),
                download_url: download_url.clone(),
            };
            output::print_upsert(repo.upsert(&draft).await, "Syllabus entry")?;
        }
        SyllabusCommand::Edit {
            id,
            title,
            branch,
            semester,
            description,
            download_url,
        } => {
            let id = DocumentId::new(id.as_str());
            let entry = repo
                .get(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Syllabus entry '{id}' not found")))?;
            let mut draft = SyllabusDraft::from_entity(&entry);
            apply(&mut draft.title, title);
            apply(&mut draft.branch, branch);
            apply(&mut draft.semester, semester);
            apply(&mut draft.description, description);
            apply(&mut draft.download_url, download_url);
            output::print_upsert(repo.upsert(&draft).await, "Syllabus entry")?;
        }
        SyllabusCommand::Delete { id } => {
            repo.delete(&DocumentId::new(id.as_str())).await?;
            output::print_success(&format!("Syllabus entry '{id}' deleted"));
        }
    }

    Ok(())
}
