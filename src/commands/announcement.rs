//! Announcement CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campushub_core::error::AppError;
use campushub_core::traits::Draft;
use campushub_core::types::DocumentId;
use campushub_entity::{Announcement, AnnouncementDraft, AnnouncementKind};
use campushub_service::EntityRepository;

use super::{App, apply};
use crate::output;

/// Arguments for announcement commands
#[derive(Debug, Args)]
pub struct AnnouncementArgs {
    /// Announcement subcommand
    #[command(subcommand)]
    pub command: AnnouncementCommand,
}

/// Announcement subcommands
#[derive(Debug, Subcommand)]
pub enum AnnouncementCommand {
    /// List announcements, newest first
    List {
        /// Only this type: info, update or alert
        #[arg(long = "type")]
        kind: Option<AnnouncementKind>,
    },
    /// Publish an announcement
    Add {
        /// Headline
        #[arg(long)]
        title: String,
        /// Body
        #[arg(long)]
        message: String,
        /// info, update or alert
        #[arg(long = "type", default_value = "update")]
        kind: AnnouncementKind,
        /// Display date, free text
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Edit an announcement
    Edit {
        /// Announcement id
        id: String,
        /// Headline
        #[arg(long)]
        title: Option<String>,
        /// Body
        #[arg(long)]
        message: Option<String>,
        /// info, update or alert
        #[arg(long = "type")]
        kind: Option<AnnouncementKind>,
        /// Display date
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an announcement
    Delete {
        /// Announcement id
        id: String,
    },
}

/// Announcement display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AnnouncementRow {
    /// Announcement ID
    id: String,
    /// Type
    kind: String,
    /// Headline
    title: String,
    /// Date
    date: String,
    /// Created at
    created_at: String,
}

impl From<&Announcement> for AnnouncementRow {
    fn from(a: &Announcement) -> Self {
        Self {
            id: a.id.to_string(),
            kind: a.kind.to_string(),
            title: a.title.clone(),
            date: a.date.clone().unwrap_or_default(),
            created_at: output::date_cell(a.created_at),
        }
    }
}

/// Execute announcement commands
pub async fn execute(args: &AnnouncementArgs, app: &App) -> Result<(), AppError> {
    let repo = EntityRepository::<AnnouncementDraft>::root(app.documents());

    match &args.command {
        AnnouncementCommand::List { kind } => {
            let rows: Vec<AnnouncementRow> = repo
                .list()
                .await?
                .iter()
                .filter(|a| kind.is_none_or(|k| a.kind == k))
                .map(AnnouncementRow::from)
                .collect();
            output::print_list(&rows, app.format);
        }
        AnnouncementCommand::Add {
            title,
            message,
            kind,
            date,
        } => {
            let draft = AnnouncementDraft {
                id: None,
                title: title.clone(),
                message: message.clone(),
                kind: *kind,
                date: date.clone(),
            };
            output::print_upsert(repo.upsert(&draft).await, "Announcement")?;
        }
        AnnouncementCommand::Edit {
            id,
            title,
            message,
            kind,
            date,
        } => {
            let id = DocumentId::new(id.as_str());
            let announcement = repo
                .get(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Announcement '{id}' not found")))?;
            let mut draft = AnnouncementDraft::from_entity(&announcement);
            apply(&mut draft.title, title);
            apply(&mut draft.message, message);
            apply(&mut draft.kind, kind);
            apply(&mut draft.date, date);
            output::print_upsert(repo.upsert(&draft).await, "Announcement")?;
        }
        AnnouncementCommand::Delete { id } => {
            repo.delete(&DocumentId::new(id.as_str())).await?;
            output::print_success(&format!("Announcement '{id}' deleted"));
        }
    }

    Ok(())
}
