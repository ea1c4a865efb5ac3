use std::{
    env,
    io::{self, Write},
    iter::Peekable,
    process::{Command, Stdio},
    sync::Arc,
};

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};

use daybook::{
    journal::{EntriesByDate, EntryDraft, EntryPage, Mood},
    navigator::{Applied, CalendarNavigator, DateRange, ViewMode},
    storage::Config,
    store::{auth::Authenticator, EntryStore, HttpEntryStore, StoreError},
};

pub const USAGE: &str = "\
Usage: daybook [COMMAND]

With no command, opens the calendar.

Commands:
  --calendar [YYYY/MM/DD] [--week]   Print the month (or week) around a date
  --list [PAGE]                      List entries, newest first
  --add CONTENT [--title T] [--mood M]
  --edit ID CONTENT [--title T] [--mood M]
  --delete ID
  --login USERNAME                   Prompts for the password
  --logout
  --help

Moods: happy, neutral, sad, excited, stressed";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Calendar,
    Help,
    Print { date: NaiveDate, mode: ViewMode },
    List { page: u32 },
    Add(EntryDraft),
    Edit { id: i64, draft: EntryDraft },
    Delete { id: i64 },
    Login { username: String },
    Logout,
}

enum Pending {
    Print(NaiveDate),
    List(u32),
    Add(String),
    Edit(i64, String),
    Delete(i64),
    Login(String),
    Logout,
}

pub fn parse_cli_mode<I>(args: I) -> Result<CliMode, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    let mut pending = None;
    let mut title = None;
    let mut mood = None;
    let mut week = false;

    while let Some(arg) = args.next() {
        let next = match arg.as_str() {
            "--calendar" => {
                let date = match take_value(&mut args) {
                    Some(value) => NaiveDate::parse_from_str(&value, "%Y/%m/%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", value))?,
                    None => Local::now().date_naive(),
                };
                Pending::Print(date)
            }
            "--list" => {
                let page = match take_value(&mut args) {
                    Some(value) => value
                        .parse::<u32>()
                        .ok()
                        .filter(|page| *page >= 1)
                        .ok_or_else(|| format!("Invalid page '{}'. Pages start at 1.", value))?,
                    None => 1,
                };
                Pending::List(page)
            }
            "--add" => Pending::Add(require_value(&mut args, "--add", "CONTENT")?),
            "--edit" => {
                let id = parse_id(&require_value(&mut args, "--edit", "ID")?)?;
                Pending::Edit(id, require_value(&mut args, "--edit", "CONTENT")?)
            }
            "--delete" => Pending::Delete(parse_id(&require_value(&mut args, "--delete", "ID")?)?),
            "--login" => Pending::Login(require_value(&mut args, "--login", "USERNAME")?),
            "--logout" => Pending::Logout,
            "--week" => {
                week = true;
                continue;
            }
            "--title" => {
                title = Some(require_value(&mut args, "--title", "TITLE")?);
                continue;
            }
            "--mood" => {
                let value = require_value(&mut args, "--mood", "MOOD")?;
                mood = Some(value.parse::<Mood>().map_err(|e| e.to_string())?);
                continue;
            }
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        };

        if pending.replace(next).is_some() {
            return Err("Only one command can be given at a time".to_string());
        }
    }

    let is_draft = matches!(pending, Some(Pending::Add(_)) | Some(Pending::Edit(..)));
    if (title.is_some() || mood.is_some()) && !is_draft {
        return Err("--title and --mood only apply to --add and --edit".to_string());
    }
    if week && !matches!(pending, Some(Pending::Print(_))) {
        return Err("--week only applies to --calendar".to_string());
    }

    let draft = |content: String| {
        EntryDraft::new(content)
            .with_title(title.clone().unwrap_or_default())
            .with_mood(mood)
    };

    Ok(match pending {
        None => CliMode::Calendar,
        Some(Pending::Print(date)) => CliMode::Print {
            date,
            mode: if week { ViewMode::Week } else { ViewMode::Month },
        },
        Some(Pending::List(page)) => CliMode::List { page },
        Some(Pending::Add(content)) => CliMode::Add(draft(content)),
        Some(Pending::Edit(id, content)) => CliMode::Edit { id, draft: draft(content) },
        Some(Pending::Delete(id)) => CliMode::Delete { id },
        Some(Pending::Login(username)) => CliMode::Login { username },
        Some(Pending::Logout) => CliMode::Logout,
    })
}

fn take_value<I: Iterator<Item = String>>(args: &mut Peekable<I>) -> Option<String> {
    if args.peek().is_some_and(|next| !next.starts_with("--")) {
        args.next()
    } else {
        None
    }
}

/// Required values are taken as-is, so content may itself start with `--`.
fn require_value<I: Iterator<Item = String>>(
    args: &mut Peekable<I>,
    flag: &str,
    name: &str,
) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{} expects {}", flag, name))
}

fn parse_id(value: &str) -> Result<i64, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid entry id '{}'", value))
}

pub fn build_authenticator(config: &Config) -> anyhow::Result<Authenticator> {
    let auth = Authenticator::new(config.api.base_url.clone(), config.auth.token_cache.clone())
        .with_timeout(config.api.request_timeout())?;
    Ok(auth)
}

pub fn build_store(config: &Config, auth: &Authenticator) -> anyhow::Result<HttpEntryStore> {
    let token = auth.access_token().context("Could not read cached login")?;

    let store = HttpEntryStore::new(config.api.base_url.clone(), token)
        .with_timeout(config.api.request_timeout())?;
    if !store.is_authenticated() {
        tracing::warn!("No cached login; requests are sent without a token");
    }
    Ok(store)
}

pub async fn run_command(mode: CliMode, config: &Config) -> anyhow::Result<()> {
    let auth = build_authenticator(config)?;

    match &mode {
        CliMode::Login { username } => {
            let password = rpassword::prompt_password("Password: ")?;
            let token = auth.login(username, &password).await?;
            println!("Logged in as {}.", token.username);
            return Ok(());
        }
        CliMode::Logout => {
            if auth.logout()? {
                println!("Logged out.");
            } else {
                println!("Not logged in.");
            }
            return Ok(());
        }
        _ => {}
    }

    let store = build_store(config, &auth)?;

    let result = match mode {
        CliMode::Print { date, mode } => print_calendar(store, date, mode).await,
        CliMode::List { page } => {
            let listing = store.list_entries(page, config.list.page_size).await;
            listing.map(|listing| print!("{}", format_entry_page(&listing, page)))
                .map_err(anyhow::Error::from)
        }
        CliMode::Add(draft) => store
            .create_entry(&draft)
            .await
            .map(|entry| println!("Saved entry {}.", entry.id))
            .map_err(anyhow::Error::from),
        CliMode::Edit { id, draft } => store
            .update_entry(id, &draft)
            .await
            .map(|entry| println!("Updated entry {}.", entry.id))
            .map_err(anyhow::Error::from),
        CliMode::Delete { id } => store
            .delete_entry(id)
            .await
            .map(|()| println!("Deleted entry {}.", id))
            .map_err(anyhow::Error::from),
        CliMode::Calendar | CliMode::Help | CliMode::Login { .. } | CliMode::Logout => Ok(()),
    };

    result.map_err(|e| logout_on_unauthorized(e, &auth))
}

fn logout_on_unauthorized(error: anyhow::Error, auth: &Authenticator) -> anyhow::Error {
    if matches!(error.downcast_ref::<StoreError>(), Some(StoreError::Unauthorized)) {
        if let Err(e) = auth.logout() {
            tracing::warn!("Failed to clear cached token: {}", e);
        }
        return error.context("Please log in again with `daybook --login USERNAME`");
    }
    error
}

async fn print_calendar(store: HttpEntryStore, date: NaiveDate, mode: ViewMode) -> anyhow::Result<()> {
    let mut navigator = CalendarNavigator::new(Arc::new(store), date);
    if mode == ViewMode::Week {
        navigator.set_view_mode(ViewMode::Week);
    }

    if navigator.refresh().await == Applied::Failed {
        let message = navigator
            .notice()
            .map(|n| n.message.clone())
            .unwrap_or_else(|| "Could not load entries".to_string());
        bail!(message);
    }

    let text = format_calendar_text(navigator.range(), navigator.view_mode(), navigator.entries());
    display_with_pager(&text)?;
    Ok(())
}

pub fn format_calendar_text(range: DateRange, mode: ViewMode, entries: &EntriesByDate) -> String {
    let mut lines = Vec::new();
    match mode {
        ViewMode::Month => lines.push(range.start.format("Journal – %B %Y").to_string()),
        ViewMode::Week => lines.push(range.start.format("Journal – Week of %b %-d, %Y").to_string()),
    }
    lines.push(String::new());

    for day in range.days() {
        let day_entries = entries.on(day);
        if day_entries.is_empty() {
            if mode == ViewMode::Week {
                lines.push(format!("{}  No entries", day.format("%a %b %d")));
            }
            continue;
        }

        let noun = if day_entries.len() == 1 { "entry" } else { "entries" };
        lines.push(format!("{}  {} {}", day.format("%a %b %d"), day_entries.len(), noun));

        for entry in day_entries {
            let mood = entry.mood.map(|m| format!("{} ", m.emoji())).unwrap_or_default();
            lines.push(format!("    - {}{}", mood, entry.headline()));
            if mode == ViewMode::Week {
                for line in entry.content.lines().filter(|l| !l.trim().is_empty()).take(3) {
                    lines.push(format!("      {}", line.trim()));
                }
            }
        }
    }

    if entries.is_empty() && mode == ViewMode::Month {
        lines.push("No entries this month.".to_string());
    }

    lines.join("\n")
}

pub fn format_entry_page(listing: &EntryPage, page: u32) -> String {
    let mut out = String::new();

    if listing.items.is_empty() {
        out.push_str("No entries on this page.\n");
    }

    for entry in &listing.items {
        let written = entry.created_at.with_timezone(&Local).format("%B %-d, %Y - %-I:%M %p");
        let mood = entry.mood.map(|m| format!("  {}", m.emoji())).unwrap_or_default();
        out.push_str(&format!("#{}  {}{}\n", entry.id, written, mood));
        if !entry.title.is_empty() {
            out.push_str(&format!("  {}\n", entry.title));
        }
        for paragraph in entry.content.lines() {
            out.push_str(&format!("  {}\n", paragraph));
        }
        out.push('\n');
    }

    out.push_str(&format!("Page {} • {} total entries", page, listing.total));
    if listing.has_more {
        out.push_str(&format!(" • next: daybook --list {}", page.saturating_add(1)));
    }
    out.push('\n');
    out
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}
