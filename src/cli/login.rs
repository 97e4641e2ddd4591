//! Login, registration and logout commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use serde::Serialize;

use crate::auth;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::models::MemberInput;
use crate::error::{Error, Result};
use crate::output::json::format_json;
use crate::session::{Destination, Role};

/// Environment variable supplying the password non-interactively
const PASSWORD_ENV: &str = "MEMBERCTL_PASSWORD";

/// JSON shape reported after a session change
#[derive(Debug, Serialize)]
struct SessionChange {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    next: &'static str,
}

fn prompt_text(prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt_text(prompt),
    }
}

/// Read the password from the environment or a hidden prompt
fn read_password(confirm: bool) -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    let theme = ColorfulTheme::default();
    let mut prompt = Password::with_theme(&theme).with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Print the outcome of a login/registration and where to go next
fn report_login(ctx: &mut CommandContext, destination: Destination) -> Result<()> {
    let (subject, role) = match ctx.session.session() {
        Some(session) => (session.claims().sub.clone(), session.role()),
        None => return Err(Error::NotLoggedIn),
    };

    match ctx.format {
        OutputFormat::Json => {
            let change = SessionChange {
                authenticated: true,
                subject: Some(subject),
                role: Some(role),
                next: destination.command(),
            };
            println!("{}", format_json(&change)?);
        }
        _ => {
            eprintln!("{} Logged in as {} ({})", "✓".green(), subject.bold(), role);
            eprintln!("→ Next: {}", destination.command().cyan());
        }
    }
    Ok(())
}

/// Run the login command
pub async fn login(opts: &GlobalOptions, email: Option<String>) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let email = value_or_prompt(email, "Email")?;
    let password = read_password(false)?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{}", "Authenticating...".cyan());
    }
    let token = auth::login(&ctx.client, &email, &password).await?;
    let destination = ctx.session.login(token)?;

    report_login(&mut ctx, destination)
}

/// Run the register command
pub async fn register(
    opts: &GlobalOptions,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let profile = MemberInput {
        name: value_or_prompt(name, "Full name")?,
        email: value_or_prompt(email, "Email")?,
        phone_number: value_or_prompt(phone, "Phone number")?,
    };
    let password = read_password(true)?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{}", "Creating account...".cyan());
    }
    let token = auth::register(&ctx.client, &profile, &password).await?;
    let destination = ctx.session.login(token)?;

    report_login(&mut ctx, destination)
}

/// Run the logout command
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let was_authenticated = ctx.session.is_authenticated();
    let destination = ctx.session.logout()?;

    match ctx.format {
        OutputFormat::Json => {
            let change = SessionChange {
                authenticated: false,
                subject: None,
                role: None,
                next: destination.command(),
            };
            println!("{}", format_json(&change)?);
        }
        _ => {
            if was_authenticated {
                eprintln!("{} Logged out", "✓".green());
            } else {
                eprintln!("{} No active session", "○".dimmed());
            }
            eprintln!("→ Log in again: {}", destination.command().cyan());
        }
    }
    Ok(())
}
