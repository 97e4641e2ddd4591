//! Status command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::models::SessionStatus;
use crate::output::json::format_json;
use crate::output::table::format_fields;

/// Status as label/value rows
fn status_fields(status: &SessionStatus) -> Vec<(&'static str, String)> {
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "--".to_string());

    vec![
        ("Config file", status.config_path.clone()),
        ("API host", status.api_host.clone()),
        ("Logged in", if status.authenticated { "yes" } else { "no" }.to_string()),
        ("Subject", or_dash(status.subject.clone())),
        ("Role", or_dash(status.role.map(|r| r.to_string()))),
        (
            "Expires",
            or_dash(status.expires_at.map(|at| at.to_rfc3339())),
        ),
    ]
}

/// Run the status command to display session and configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let status = SessionStatus::new(
        ctx.config_path.display().to_string(),
        ctx.api_host.clone(),
        ctx.session.state(),
    );

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", format_json(&status)?);
            return Ok(());
        }
        OutputFormat::Table => {
            println!("{}", format_fields(&status_fields(&status)));
            return Ok(());
        }
        OutputFormat::Pretty => {}
    }

    println!("{}\n", "memberctl Session Status".bold());
    println!("Config file: {}", status.config_path.cyan());
    println!("API host: {}", status.api_host.cyan());
    println!();

    if !status.authenticated {
        println!("{} Not logged in", "✗".red());
        println!("  → Run 'memberctl login' or 'memberctl register'");
        println!();
        return Ok(());
    }

    if let Some(ref subject) = status.subject {
        println!("{} Logged in as {}", "✓".green(), subject.bold());
    }
    if let Some(role) = status.role {
        println!("{} Role: {}", "✓".green(), role);
    }
    if let Some(expires) = status.expires_at {
        let remaining = expires.signed_duration_since(chrono::Utc::now());
        println!(
            "{} Token valid (expires in {}h {}m)",
            "✓".green(),
            remaining.num_hours(),
            remaining.num_minutes() % 60
        );
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AuthState;

    #[test]
    fn test_status_fields_when_logged_out() {
        let status = SessionStatus::new(
            "/tmp/config.yaml".to_string(),
            "http://localhost:8080/api".to_string(),
            &AuthState::Unauthenticated,
        );

        let fields = status_fields(&status);
        assert_eq!(fields[2], ("Logged in", "no".to_string()));
        assert_eq!(fields[4], ("Role", "--".to_string()));
    }
}
