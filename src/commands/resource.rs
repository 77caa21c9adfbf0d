//! Study resource CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campushub_core::error::AppError;
use campushub_core::traits::Draft;
use campushub_core::types::DocumentId;
use campushub_entity::{Resource, ResourceDraft};
use campushub_service::{EntityRepository, filter};

use super::{App, ListFilter, apply};
use crate::output;

/// Arguments for resource commands
#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Resource subcommand
    #[command(subcommand)]
    pub command: ResourceCommand,
}

/// Resource subcommands
#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    /// List resources, newest first
    List {
        #[command(flatten)]
        filter: ListFilter,
        /// Category to match
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Create a resource
    Add {
        /// Title
        #[arg(long)]
        title: String,
        /// Category, e.g. pdf or video
        #[arg(long)]
        category: String,
        /// Branch
        #[arg(long, default_value = "")]
        branch: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Download link
        #[arg(long, default_value = "")]
        download_url: String,
    },
    /// Edit a resource
    Edit {
        /// Resource id
        id: String,
        /// Title
        #[arg(long)]
        title: Option<String>,
        /// Category
        #[arg(long)]
        category: Option<String>,
        /// Branch
        #[arg(long)]
        branch: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Download link
        #[arg(long)]
        download_url: Option<String>,
    },
    /// Delete a resource
    Delete {
        /// Resource id
        id: String,
    },
}

/// Resource display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ResourceRow {
    /// Resource ID
    id: String,
    /// Title
    title: String,
    /// Category
    category: String,
    /// Branch
    branch: String,
    /// Download link
    download_url: String,
}

impl From<&Resource> for ResourceRow {
    fn from(r: &Resource) -> Self {
        Self {
            id: r.id.to_string(),
            title: r.title.clone(),
            category: r.category.clone(),
            branch: r.branch.clone().unwrap_or_default(),
            download_url: r.download_url.clone().unwrap_or_default(),
        }
    }
}

/// Execute resource commands
pub async fn execute(args: &ResourceArgs, app: &App) -> Result<(), AppError> {
    let repo = EntityRepository::<ResourceDraft>::root(app.documents());

    match &args.command {
        ResourceCommand::List {
            filter: f,
            category,
        } => {
            let criteria = f.criteria().category(category.clone());
            let rows: Vec<ResourceRow> = filter(&repo.list().await?, &criteria)
                .iter()
                .map(ResourceRow::from)
                .collect();
            output::print_list(&rows, app.format);
        }
        ResourceCommand::Add {
            title,
            category,
            branch,
            description,
            download_url,
        } => {
            let draft = ResourceDraft {
                id: None,
                title: title.clone(),
                category: category.clone(),
                branch: branch.clone(),
                description: description.clone(),
                download_url: download_url.clone(),
            };
            output::print_upsert(repo.upsert(&draft).await, "Resource")?;
        }
        ResourceCommand::Edit {
            id,
            title,
            category,
            branch,
            description,
            download_url,
        } => {
            let id = DocumentId::new(id.as_str());
            let resource = repo
                .get(&id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Resource '{id}' not found")))?;
            let mut draft = ResourceDraft::from_entity(&resource);
            apply(&mut draft.title, title);
            apply(&mut draft.category, category);
            apply(&mut draft.branch, branch);
            apply(&mut draft.description, description);
            apply(&mut draft.download_url, download_url);
            output::print_upsert(repo.upsert(&draft).await, "Resource")?;
        }
        ResourceCommand::Delete { id } => {
            repo.delete(&DocumentId::new(id.as_str())).await?;
            output::print_success(&format!("Resource '{id}' deleted"));
        }
    }

    Ok(())
}
