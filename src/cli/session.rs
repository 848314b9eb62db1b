//! Session CLI commands
//!
//! Login, logout and identity inspection.

use clap::Subcommand;

use crate::error::VyapaarResult;
use crate::models::User;
use crate::services::SessionContext;
use crate::storage::Storage;

/// Session subcommands
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Log in as a built-in user
    Login {
        /// User id (u1 = Accountant (Admin), u2 = Site Manager (Staff))
        user: String,
    },

    /// Log out the current user
    Logout,

    /// Show the current user and the views they can open
    Whoami,

    /// List the users available at login
    Users,
}

/// Handle a session command
pub fn handle_session_command(storage: &Storage, cmd: SessionCommands) -> VyapaarResult<()> {
    let mut session = SessionContext::restore(storage)?;

    match cmd {
        SessionCommands::Login { user } => {
            let user = session.login(&user)?;
            println!("Logged in as {} ({})", user.name, user.role);
            if let Some(home) = session.home_view() {
                println!("Start at: {}", home);
            }
        }

        SessionCommands::Logout => {
            session.logout()?;
            println!("Logged out.");
        }

        SessionCommands::Whoami => match session.current() {
            Some(user) => {
                println!("{} ({}) [{}]", user.name, user.role, user.id);
                let views: Vec<String> = session
                    .available_views()
                    .iter()
                    .map(|v| v.to_string())
                    .collect();
                println!("Views: {}", views.join(", "));
            }
            None => println!("Not logged in."),
        },

        SessionCommands::Users => {
            for user in User::builtin() {
                println!("{:<4} {:<24} {}", user.id.as_str(), user.name, user.role);
            }
        }
    }

    Ok(())
}
