use clap::{Args, Subcommand, ValueEnum};
use validator::Validate;

use fleet_client::RolesService;
use fleet_models::RoleRequest;
use fleet_ui::{prompt, ConfirmDialog, ConfirmDialogConfig};

use crate::print_json;

#[derive(Subcommand)]
pub enum RolesCommand {
    /// List roles, optionally filtered
    List {
        #[arg(long, value_enum)]
        filter: Option<RoleFilter>,
    },
    /// Show one role
    Get { id: String },
    /// Look a role up by its code
    ByCode { code: String },
    /// Fetch several roles by id (raw response)
    ByIds {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Roles held by a user, given the user's role ids
    UserRoles {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Create a role
    Create(RoleArgs),
    /// Replace a role
    Update {
        id: String,
        #[command(flatten)]
        role: RoleArgs,
    },
    /// Delete a role after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Ask for a deletion reason before confirming
        #[arg(long)]
        reason: bool,
    },
    /// List the permission catalogue
    Permissions {
        /// Request the enveloped form
        #[arg(long)]
        envelope: bool,
    },
    /// Check whether a role code is taken
    CheckCode {
        code: String,
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Check whether a role name is taken (case-insensitive)
    CheckName {
        name: String,
        #[arg(long)]
        exclude: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleFilter {
    Visible,
    System,
    Editable,
}

#[derive(Debug, Args)]
pub struct RoleArgs {
    #[arg(long)]
    pub code: String,
    #[arg(long)]
    pub name: String,
    /// Permission identifier, repeatable
    #[arg(long = "permission")]
    pub permissions: Vec<String>,
    #[arg(long)]
    pub visible: bool,
    #[arg(long)]
    pub description: Option<String>,
}

impl From<RoleArgs> for RoleRequest {
    fn from(args: RoleArgs) -> Self {
        RoleRequest {
            code: args.code,
            role_name: args.name,
            permissions: args.permissions.into_iter().collect(),
            is_visible: args.visible,
            description: args.description,
        }
    }
}

pub async fn run(service: &RolesService, command: RolesCommand) -> anyhow::Result<()> {
    match command {
        RolesCommand::List { filter } => {
            let roles = match filter {
                None => service.get_roles().await?,
                Some(RoleFilter::Visible) => service.get_visible_roles().await?,
                Some(RoleFilter::System) => service.get_system_roles().await?,
                Some(RoleFilter::Editable) => service.get_editable_roles().await?,
            };
            print_json(&roles)
        }
        RolesCommand::Get { id } => print_json(&service.get_role(&id).await?),
        RolesCommand::ByCode { code } => print_json(&service.get_role_by_code(&code).await?),
        RolesCommand::ByIds { ids } => print_json(&service.get_roles_by_ids(&ids).await?),
        RolesCommand::UserRoles { ids } => print_json(&service.get_user_roles(&ids).await?),
        RolesCommand::Create(args) => {
            let request = checked_request(service, args.into(), None).await?;
            let created = service.add_role(&request).await?;
            tracing::info!("Created role {}", request.code);
            print_json(&created)
        }
        RolesCommand::Update { id, role } => {
            let request = checked_request(service, role.into(), Some(&id)).await?;
            let updated = service.update_role(&id, &request).await?;
            tracing::info!("Updated role {}", id);
            print_json(&updated)
        }
        RolesCommand::Delete { id, yes, reason } => {
            if !yes {
                match confirm_delete(&id, reason)? {
                    Some(reason) if !reason.is_empty() => {
                        tracing::info!("Deleting role {} (reason: {})", id, reason)
                    }
                    Some(_) => tracing::info!("Deleting role {}", id),
                    None => {
                        eprintln!("Deletion cancelled");
                        return Ok(());
                    }
                }
            }
            print_json(&service.delete_role(&id).await?)
        }
        RolesCommand::Permissions { envelope } => {
            if envelope {
                print_json(&service.get_all_permissions().await?)
            } else {
                print_json(&service.get_permissions().await?)
            }
        }
        RolesCommand::CheckCode { code, exclude } => {
            let exists = service.check_role_code_exists(&code, exclude.as_deref()).await;
            print_json(&serde_json::json!({ "code": code, "exists": exists }))
        }
        RolesCommand::CheckName { name, exclude } => {
            let exists = service.check_role_name_exists(&name, exclude.as_deref()).await?;
            print_json(&serde_json::json!({ "name": name, "exists": exists }))
        }
    }
}

/// Validate a role form and reject codes or names already used by another role.
async fn checked_request(
    service: &RolesService,
    request: RoleRequest,
    exclude_id: Option<&str>,
) -> anyhow::Result<RoleRequest> {
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid role: {}", e))?;

    if service.check_role_code_exists(&request.code, exclude_id).await {
        anyhow::bail!("Role code '{}' is already in use", request.code);
    }
    if service.check_role_name_exists(&request.role_name, exclude_id).await? {
        anyhow::bail!("Role name '{}' is already in use", request.role_name);
    }

    Ok(request)
}

fn delete_dialog(id: &str, ask_reason: bool) -> ConfirmDialog {
    ConfirmDialog::new(ConfirmDialogConfig {
        title: "Delete role".to_string(),
        message: format!("Delete role {}?", id),
        details: "Users holding this role lose its permissions.".to_string(),
        confirm_text: "Delete".to_string(),
        visible: true,
        show_input: ask_reason,
        input_placeholder: "Reason".to_string(),
        input_required: ask_reason,
        input_error_message: "A reason is required to delete a role".to_string(),
        ..ConfirmDialogConfig::default()
    })
}

fn confirm_delete(id: &str, ask_reason: bool) -> anyhow::Result<Option<String>> {
    let mut dialog = delete_dialog(id, ask_reason);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stderr();

    Ok(prompt::run(&mut dialog, &mut input, &mut out)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_args_into_request() {
        let args = RoleArgs {
            code: "DRIVER".to_string(),
            name: "Driver".to_string(),
            permissions: vec!["vehicles.read".to_string(), "vehicles.read".to_string()],
            visible: true,
            description: None,
        };

        let request = RoleRequest::from(args);

        assert_eq!(request.role_name, "Driver");
        assert_eq!(request.permissions.len(), 1);
        assert!(request.is_visible);
    }

    #[test]
    fn test_delete_dialog_requires_reason() {
        let mut dialog = delete_dialog("7", true);
        let mut input = Cursor::new("\nyes\nretired vehicle class\nyes\n");
        let mut out = Vec::new();

        let reason = prompt::run(&mut dialog, &mut input, &mut out).unwrap();

        assert_eq!(reason.as_deref(), Some("retired vehicle class"));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("A reason is required to delete a role"));
    }

    #[test]
    fn test_delete_dialog_without_reason() {
        let mut dialog = delete_dialog("7", false);
        let mut input = Cursor::new("y\n");
        let mut out = Vec::new();

        let outcome = prompt::run(&mut dialog, &mut input, &mut out).unwrap();

        assert_eq!(outcome, Some(String::new()));
        assert!(String::from_utf8(out).unwrap().contains("Delete role 7?"));
    }
}
