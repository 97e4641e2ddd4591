//! Member commands

use colored::Colorize;
use dialoguer::Confirm;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::MemberApi;
use crate::client::models::{Member, MemberInput};
use crate::error::Result;
use crate::models::{MemberDisplay, format_member_pretty};
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::session::Role;
use crate::validation::validate_member;

/// Print a single member in the requested format
fn print_member(member: &Member, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(member)?),
        OutputFormat::Table => vec![MemberDisplay::from(member)].print(format)?,
        OutputFormat::Pretty => println!("{}", format_member_pretty(member)),
    }
    Ok(())
}

/// Print a mutation result: JSON to stdout, otherwise a status line to stderr
fn report_change(member: &Member, format: OutputFormat, message: &str) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", format_json(member)?),
        _ => eprintln!("{} {}", "✓".green(), message),
    }
    Ok(())
}

fn dry_run_banner() {
    eprintln!("{}", "DRY RUN - no changes will be made".yellow());
    eprintln!();
}

/// Apply name/phone edits to an existing record. The email is carried over
/// unchanged.
pub(crate) fn merge_update(
    current: &Member,
    name: Option<String>,
    phone: Option<String>,
) -> MemberInput {
    let mut input = current.to_input();
    if let Some(name) = name {
        input.name = name;
    }
    if let Some(phone) = phone {
        input.phone_number = phone;
    }
    input
}

/// Keep at most `limit` members
pub(crate) fn apply_limit(members: Vec<Member>, limit: Option<usize>) -> Vec<Member> {
    match limit {
        Some(limit) => members.into_iter().take(limit).collect(),
        None => members,
    }
}

/// Validate and submit an update, honouring `--dry-run`
async fn submit_update<A: MemberApi + ?Sized>(
    api: &A,
    current: &Member,
    input: MemberInput,
    dry_run: bool,
) -> Result<Option<Member>> {
    validate_member(&input)?;

    if input == current.to_input() {
        eprintln!("{} Nothing to change", "○".dimmed());
        return Ok(None);
    }

    if dry_run {
        dry_run_banner();
        eprintln!("Would update member {} ({})", current.id, current.email);
        if input.name != current.name {
            eprintln!("  Name: \"{}\" → \"{}\"", current.name, input.name.bold());
        }
        if input.phone_number != current.phone_number {
            eprintln!(
                "  Phone: {} → {}",
                current.phone_number,
                input.phone_number.bold()
            );
        }
        return Ok(None);
    }

    Ok(Some(api.update_member(&current.id, &input).await?))
}

/// Run `member me`
pub async fn me(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.require_session()?;

    let member = ctx.client.get_current_member().await?;
    print_member(&member, ctx.format)
}

/// Run `member update-me`
pub async fn update_me(
    opts: &GlobalOptions,
    name: Option<String>,
    phone: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.require_session()?;

    let current = ctx.client.get_current_member().await?;
    let input = merge_update(&current, name, phone);

    if let Some(updated) = submit_update(&ctx.client, &current, input, dry_run).await? {
        report_change(&updated, ctx.format, "Profile updated")?;
    }
    Ok(())
}

/// Run `member list`
pub async fn list(opts: &GlobalOptions, limit: Option<usize>) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.require_admin()?;

    debug!("Fetching members");
    let members = ctx.client.list_members().await?;
    debug!("Fetched {} members", members.len());

    let display: Vec<MemberDisplay> = apply_limit(members, limit)
        .into_iter()
        .map(MemberDisplay::from)
        .collect();
    display.print(ctx.format)
}

/// Run `member get`
pub async fn get(opts: &GlobalOptions, id: &str) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.require_admin()?;

    let member = ctx.client.get_member(id).await?;
    print_member(&member, ctx.format)
}

/// Run `member create`
pub async fn create(opts: &GlobalOptions, input: MemberInput, dry_run: bool) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.require_admin()?;

    validate_member(&input)?;

    if dry_run {
        dry_run_banner();
        eprintln!(
            "Would create member: {} <{}> ({})",
            input.name.bold(),
            input.email,
            input.phone_number
        );
        return Ok(());
    }

    let member = ctx.client.create_member(&input).await?;
    report_change(
        &member,
        ctx.format,
        &format!("Member \"{}\" created (ID: {})", member.name, member.id),
    )
}

/// Run `member update`
pub async fn update(
    opts: &GlobalOptions,
    id: &str,
    name: Option<String>,
    phone: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.require_admin()?;

    let current = ctx.client.get_member(id).await?;
    let input = merge_update(&current, name, phone);

    if let Some(updated) = submit_update(&ctx.client, &current, input, dry_run).await? {
        report_change(
            &updated,
            ctx.format,
            &format!("Member \"{}\" updated", updated.name),
        )?;
    }
    Ok(())
}

/// Run `member set-role`
pub async fn set_role(opts: &GlobalOptions, id: &str, role: Role, dry_run: bool) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.require_admin()?;

    if dry_run {
        dry_run_banner();
        eprintln!("Would set role of member {} to {}", id, role.to_string().bold());
        return Ok(());
    }

    let member = ctx.client.update_member_role(id, role).await?;
    report_change(
        &member,
        ctx.format,
        &format!("Member \"{}\" is now {}", member.name, role),
    )
}

/// Run `member delete`
pub async fn delete(opts: &GlobalOptions, id: &str, yes: bool, dry_run: bool) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.require_admin()?;

    let member = ctx.client.get_member(id).await?;

    if dry_run {
        dry_run_banner();
        eprintln!(
            "Would delete member: \"{}\" <{}> (ID: {})",
            member.name, member.email, member.id
        );
        return Ok(());
    }

    if !yes {
        eprintln!(
            "{} Delete member \"{}\" <{}>? This cannot be undone.",
            "⚠".yellow(),
            member.name,
            member.email
        );

        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    ctx.client.delete_member(&member.id).await?;

    match ctx.format {
        OutputFormat::Json => {
            let data = serde_json::json!({
                "deleted": true,
                "member_id": member.id,
                "member_email": member.email,
            });
            println!("{}", format_json(&data)?);
        }
        _ => eprintln!("{} Member \"{}\" deleted", "✓".green(), member.name),
    }
    Ok(())
}
