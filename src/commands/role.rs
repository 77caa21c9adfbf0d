//! Admin role CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use campushub_core::error::AppError;
use campushub_core::types::UserId;
use campushub_service::AdminGate;

use super::App;
use crate::output;

/// Arguments for role commands
#[derive(Debug, Args)]
pub struct RoleArgs {
    /// Role subcommand
    #[command(subcommand)]
    pub command: RoleCommand,
}

/// Role subcommands
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// List admins
    List,
    /// Make a user an admin
    Grant {
        /// User id
        uid: String,
    },
    /// Remove a user's admin role
    Revoke {
        /// User id
        uid: String,
    },
    /// Check whether a user is an admin
    Check {
        /// User id
        uid: String,
    },
}

/// Role display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// User ID
    uid: String,
    /// Role
    role: String,
}

/// Execute role commands
pub async fn execute(args: &RoleArgs, app: &App) -> Result<(), AppError> {
    let gate = AdminGate::new(app.documents(), &app.config.roles);

    match &args.command {
        RoleCommand::List => {
            let rows: Vec<RoleRow> = gate
                .list_admins()
                .await?
                .into_iter()
                .map(|r| RoleRow {
                    uid: r.id.to_string(),
                    role: r.role,
                })
                .collect();
            output::print_list(&rows, app.format);
        }
        RoleCommand::Grant { uid } => {
            gate.grant_admin(&UserId::new(uid.as_str())).await?;
            output::print_success(&format!("User '{uid}' is now an admin"));
        }
        RoleCommand::Revoke { uid } => {
            gate.revoke_admin(&UserId::new(uid.as_str())).await?;
            output::print_success(&format!("Admin role removed from '{uid}'"));
        }
        RoleCommand::Check { uid } => {
            let is_admin = gate.is_admin(&UserId::new(uid.as_str())).await?;
            output::print_kv(uid, if is_admin { "admin" } else { "not an admin" });
        }
    }

    Ok(())
}
