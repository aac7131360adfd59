//! Session view.

use std::io;

use jiff::Timestamp;
use tabled::builder::Builder;

use crate::{
    render::{RenderError, finish_table},
    session::{SessionSnapshot, jwt, token_preview},
};

const PREVIEW_LEN: usize = 20;

/// How tokens are shown in the session view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenDisplay {
    #[default]
    Preview,
    Full,
}

pub fn write_session(
    mut out: impl io::Write,
    snapshot: &SessionSnapshot,
    display: TokenDisplay,
    now: Timestamp,
) -> Result<(), RenderError> {
    let Some(id_token) = snapshot.id_token.as_deref() else {
        writeln!(out, "Not signed in")?;
        return Ok(());
    };

    let user = snapshot.user_info.clone().unwrap_or_default();

    writeln!(out, "Signed in as {}", user.display_name())?;

    match jwt::expires_at(id_token) {
        Ok(expiry) if expiry > now => writeln!(out, "Session expires at {expiry}")?,
        Ok(expiry) => writeln!(out, "Session expired at {expiry}")?,
        Err(_error) => writeln!(out, "Session expiry unknown")?,
    }

    let shown = |token: Option<&str>| match (token, display) {
        (None, _) => "N/A".to_string(),
        (Some(token), TokenDisplay::Full) => token.to_string(),
        (Some(token), TokenDisplay::Preview) => token_preview(token, PREVIEW_LEN),
    };

    let mut builder = Builder::default();

    builder.push_record(["Email".to_string(), user.email.clone().unwrap_or_default()]);
    builder.push_record([
        "Username".to_string(),
        user.username.clone().unwrap_or_default(),
    ]);
    builder.push_record(["ID token".to_string(), shown(Some(id_token))]);
    builder.push_record([
        "Access token".to_string(),
        shown(snapshot.access_token.as_deref()),
    ]);
    builder.push_record([
        "Refresh token".to_string(),
        shown(snapshot.refresh_token.as_deref()),
    ]);

    writeln!(out, "{}", finish_table(builder, &[]))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::{session::UserInfo, test::token_expiring_in};

    use super::*;

    fn snapshot(id_token: &str) -> SessionSnapshot {
        SessionSnapshot {
            id_token: Some(id_token.to_string()),
            access_token: Some("a".repeat(40)),
            refresh_token: None,
            user_info: Some(UserInfo {
                email: Some("ana@example.com".to_string()),
                ..UserInfo::default()
            }),
        }
    }

    fn render(snapshot: &SessionSnapshot, display: TokenDisplay) -> TestResult<String> {
        let mut out = Vec::new();
        write_session(&mut out, snapshot, display, Timestamp::now())?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn signed_out_session() -> TestResult {
        assert_eq!(
            render(&SessionSnapshot::default(), TokenDisplay::Preview)?,
            "Not signed in\n"
        );

        Ok(())
    }

    #[test]
    fn previews_hide_most_of_each_token() -> TestResult {
        let output = render(&snapshot(&token_expiring_in(600)), TokenDisplay::Preview)?;

        assert!(output.contains("Signed in as ana@example.com"));
        assert!(output.contains("Session expires at"));
        assert!(output.contains(&format!("{}...", "a".repeat(20))));
        assert!(!output.contains(&"a".repeat(21)));

        Ok(())
    }

    #[test]
    fn full_display_shows_whole_tokens() -> TestResult {
        let output = render(&snapshot(&token_expiring_in(600)), TokenDisplay::Full)?;

        assert!(output.contains(&"a".repeat(40)));

        Ok(())
    }

    #[test]
    fn expired_sessions_are_flagged() -> TestResult {
        let mut out = Vec::new();

        write_session(
            &mut out,
            &snapshot(&token_expiring_in(60)),
            TokenDisplay::Preview,
            Timestamp::now() + SignedDuration::from_hours(1),
        )?;

        assert!(String::from_utf8(out)?.contains("Session expired at"));

        Ok(())
    }
}
