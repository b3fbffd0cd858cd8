//! User CLI commands
//!
//! Account creation goes through the configured identity provider; listing
//! only works for local accounts.

use clap::Subcommand;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::auth::{build_authenticator, LocalAuthenticator, SessionContext};
use crate::config::{AuthSettings, ReturnsPaths, Settings};
use crate::error::{ReturnsError, ReturnsResult};
use crate::models::Secret;

use super::{secret_or_prompt, value_or_prompt, PASSWORD_ENV};

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create an account
    Add {
        /// Email address to sign in with
        email: String,
        /// Full name
        #[arg(short, long)]
        name: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// List local accounts
    List,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

/// Handle a user command
pub async fn handle_user_command(
    paths: &ReturnsPaths,
    settings: &Settings,
    cmd: UserCommands,
) -> ReturnsResult<()> {
    match cmd {
        UserCommands::Add {
            email,
            name,
            password,
        } => {
            let name = value_or_prompt(name, "Full Name: ")?;
            // A password from the environment needs no confirmation
            let (password, confirm) = match password {
                Some(p) => (Secret::new(p.clone()), Secret::new(p)),
                None => (
                    secret_or_prompt(None, "Create Password: ")?,
                    secret_or_prompt(None, "Confirm Password: ")?,
                ),
            };

            paths.ensure_directories()?;
            let mut session = SessionContext::init(build_authenticator(settings, paths));
            let user = session
                .sign_up(&name, &email, &password, &confirm)
                .await?
                .user
                .clone();
            session.sign_out().await;

            println!("Created account: {}", user.email);
            if !user.display_name.is_empty() {
                println!("  Name: {}", user.display_name);
            }
            println!("  Provider: {}", session.provider());
            println!("  ID: {}", user.id);
        }

        UserCommands::List => {
            if !matches!(settings.auth, AuthSettings::Local) {
                return Err(ReturnsError::Config(
                    "Accounts are managed by the identity provider; only local accounts can be listed"
                        .into(),
                ));
            }

            let users = LocalAuthenticator::new(paths.users_file())
                .list_users()
                .await?;
            if users.is_empty() {
                println!("No users yet. Run 'returns user add <email>' to create one.");
                return Ok(());
            }

            let rows: Vec<UserRow> = users
                .into_iter()
                .map(|u| UserRow {
                    id: u.id.short(),
                    name: u.display_name,
                    email: u.email,
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::psql()));
        }
    }

    Ok(())
}
