use std::io;

use clap::{Args, Subcommand};
use jiff::Timestamp;
use stockroom_app::{
    context::SessionConfig,
    oauth::{CallbackParams, CognitoProvider, OAuthConfig, complete_sign_in},
    render::{TokenDisplay, write_session},
    session::SessionStatus,
};

use crate::cli::{failed, info, success};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    #[command(flatten)]
    oauth: OAuthConfig,

    #[command(flatten)]
    session: SessionConfig,

    /// Authorization code from the redirect
    #[arg(long, conflicts_with = "callback_url")]
    code: Option<String>,

    /// Full URL the provider redirected to after sign-in
    #[arg(long)]
    callback_url: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct LogoutArgs {
    #[command(flatten)]
    session: SessionConfig,
}

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,

    #[command(flatten)]
    session: SessionConfig,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Who is signed in and until when
    Status,

    /// Stored tokens, shortened unless `--full` is given
    Tokens {
        #[arg(long)]
        full: bool,
    },
}

pub(crate) async fn login(args: LoginArgs) -> Result<(), String> {
    let params = match (args.code, args.callback_url) {
        (Some(code), _) => CallbackParams::from_code(code),
        (None, Some(url)) => CallbackParams::parse(&url).map_err(failed("read callback URL"))?,
        (None, None) => {
            let url = args
                .oauth
                .authorize_url()
                .map_err(failed("build sign-in URL"))?;

            info(&format!("Open this URL to sign in:\n{url}"))?;
            return info("Then run `stockroom login --callback-url <redirected URL>`");
        }
    };

    let session = args.session.open().map_err(failed("open session"))?;
    let mut status = session.subscribe();

    let provider = CognitoProvider::new(args.oauth);

    complete_sign_in(&provider, &session, &params)
        .await
        .map_err(failed("sign in"))?;

    if status.has_changed().unwrap_or(false)
        && let SessionStatus::SignedIn(user) = &*status.borrow_and_update()
    {
        return success(&format!("Signed in as {}", user.display_name()));
    }

    success("Signed in")
}

pub(crate) fn logout(args: &LogoutArgs) -> Result<(), String> {
    let session = args.session.open().map_err(failed("open session"))?;

    session.sign_out().map_err(failed("sign out"))?;

    success("Signed out")
}

pub(crate) fn run(command: SessionCommand) -> Result<(), String> {
    let session = command.session.open().map_err(failed("open session"))?;
    let snapshot = session.snapshot().map_err(failed("read session"))?;

    let display = match command.command {
        SessionSubcommand::Status => TokenDisplay::Preview,
        SessionSubcommand::Tokens { full: true } => TokenDisplay::Full,
        SessionSubcommand::Tokens { full: false } => TokenDisplay::Preview,
    };

    write_session(io::stdout().lock(), &snapshot, display, Timestamp::now())
        .map_err(|error| error.to_string())
}
