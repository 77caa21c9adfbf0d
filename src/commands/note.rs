//! Study note CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campushub_core::error::AppError;
use campushub_core::traits::Draft;
use campushub_core::types::DocumentId;
use campushub_entity::{Note, NoteDraft};
use campushub_service::{EntityRepository, filter};

use super::{App, ListFilter, apply};
use crate::output;

/// Arguments for note commands
#[derive(Debug, Args)]
pub struct NoteArgs {
    /// Note subcommand
    #[command(subcommand)]
    pub command: NoteCommand,
}

/// Note subcommands
#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// List notes, newest first
    List {
        #[command(flatten)]
        filter: ListFilter,
        /// Category to match
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Create a note
    Add {
        /// Title
        #[arg(long)]
        title: String,
        /// Tag (branch)
        #[arg(long)]
        tag: String,
        /// Category
        #[arg(long, default_value = "")]
        category: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Download link
        #[arg(long, default_value = "")]
        download_url: String,
    },
    /// Edit a note
    Edit {
        /// Note id
        id: String,
        /// Title
        #[arg(long)]
        title: Option<String>,
        /// Tag (branch)
        #[arg(long)]
        tag: Option<String>,
        /// Category
        #[arg(long)]
        category: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Download link
        #[arg(long)]
        download_url: Option<String>,
    },
    /// Delete a note
    Delete {
        /// Note id
        id: String,
    },
}

/// Note display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct NoteRow {
    /// Note ID
    id: String,
    /// Title
    title: String,
    /// Tag
    tag: String,
    /// Category
    category: String,
    /// Created at
    created_at: String,
}

impl From<&Note> for NoteRow {
    fn from(n: &Note) -> Self {
        Self {
            id: n.id.to_string(),
            title: n.title.clone(),
            tag: n.tag.clone(),
            category: n.category.clone().unwrap_or_default(),
            created_at: output::date_cell(n.created_at),
        }
    }
}

/// Execute note commands
pub async fn execute(args: &NoteArgs, app: &App) -> Result<(), AppError> {
    let repo = EntityRepository::<NoteDraft>::root(app.documents());

    match &args.command {
        NoteCommand::List {
            filter: f,
            category,
        } => {
            let criteria = f.criteria().category(category.clone());
            let rows: Vec<NoteRow> = filter(&repo.list().await?, &criteria)
                .iter()
                .map(NoteRow::from)
                .collect();
            output::print_list(&rows, app.format);
        }
        NoteCommand::Add {
            title,
            tag,
            category,
            description,
            download_url,
        } => {
            let draft = NoteDraft {
                id: None,
                title: title.clone(),
                tag: tag.clone(),
                category: category.clone(),
                description: description.clone(),
                download_url: download_url.clone(),
            };
            output::print_upsert(repo.upsert(&draft).await, "Note")?;
        }
        NoteCommand::Edit {
            id,
            title,
            tag,
            category,
            description,
            download_url,
        } => {
            let id = DocumentId::new(id.as_str());
            let note = repo
                .get(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Note '{id}' not found")))?;
            let mut draft = NoteDraft::from_entity(&note);
            apply(&mut draft.title, title);
            apply(&mut draft.tag, tag);
            apply(&mut draft.category, category);
            apply(&mut draft.description, description);
            apply(&mut draft.download_url, download_url);
            output::print_upsert(repo.upsert(&draft).await, "Note")?;
        }
        NoteCommand::Delete { id } => {
            repo.delete(&DocumentId::new(id.as_str())).await?;
            output::print_success(&format!("Note '{id}' deleted"));
        }
    }

    Ok(())
}
