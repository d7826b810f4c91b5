//! Session commands: login, OIDC code exchange, logout, whoami.
//!
//! Responsibilities:
//! - Obtain an access token and store it in the session file.
//! - Show the signed-in user and the active business unit.
//!
//! Invariants:
//! - Passwords are never accepted as a plain argument; they come from a
//!   hidden prompt or from stdin.
//! - Logout clears the local token even if the backend call fails.

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use provisio_client::OidcExchange;
use provisio_config::Config;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, build_client};
use crate::formatters::{ActionOutput, SessionStatus};
use crate::interactive::{prompt_password, read_password_stdin};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in with an email address or username
    Login {
        /// Email address or username
        identifier: String,
        /// Read the password from the first line of stdin
        #[arg(long)]
        password_stdin: bool,
    },
    /// Exchange an OIDC authorization code for a session
    Oidc {
        /// Authorization code returned by the identity provider
        #[arg(long)]
        code: String,
        /// State value returned alongside the code
        #[arg(long)]
        state: Option<String>,
        /// Redirect URI used in the authorization request
        #[arg(long)]
        redirect_uri: Option<String>,
    },
    /// Sign out and forget the local token
    Logout,
    /// Show the signed-in user and active business unit
    #[command(visible_alias = "status")]
    Whoami,
}

pub async fn run(
    config: Config,
    command: AuthCommand,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(&config)?;

    match command {
        AuthCommand::Login {
            identifier,
            password_stdin,
        } => {
            let password = if password_stdin {
                read_password_stdin()?
            } else {
                prompt_password("Password")?
            };
            info!(identifier = %identifier, "Logging in");
            let user = cancellable!(client.login(&identifier, &password), cancel)?;
            let status = SessionStatus {
                user,
                business_unit: client.active_business_unit(),
            };
            output.emit(|f| f.format_session(&status))
        }
        AuthCommand::Oidc {
            code,
            state,
            redirect_uri,
        } => {
            let exchange = OidcExchange {
                code,
                state,
                redirect_uri,
            };
            let user = cancellable!(client.exchange_oidc_code(&exchange), cancel)?;
            let status = SessionStatus {
                user,
                business_unit: client.active_business_unit(),
            };
            output.emit(|f| f.format_session(&status))
        }
        AuthCommand::Logout => {
            cancellable!(client.logout(), cancel)?;
            output.emit(|f| f.format_action(&ActionOutput::ok("logout", "session", "Logged out.")))
        }
        AuthCommand::Whoami => {
            let user = cancellable!(client.me(), cancel)?;
            let status = SessionStatus {
                user,
                business_unit: client.active_business_unit(),
            };
            output.emit(|f| f.format_session(&status))
        }
    }
}
