//! Monthly sheet CLI commands
//!
//! Loads a month of service entries from CSV through the same draft and
//! ledger rules the attendance screen uses, then submits the sheet.

use clap::Subcommand;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::auth::{build_authenticator, SessionContext};
use crate::config::{ReturnsPaths, Settings};
use crate::delivery::build_sender;
use crate::error::{ReturnsError, ReturnsResult};
use crate::models::{LocationContext, ReportingMonth, ServiceType};
use crate::reports::entries_table;
use crate::services::{AttendanceSheet, EntryField};

use super::{secret_or_prompt, value_or_prompt, PASSWORD_ENV};

/// Sheet subcommands
#[derive(Subcommand)]
pub enum SheetCommands {
    /// Load entries from a CSV file and submit the month's sheet
    Submit {
        /// CSV file with columns sheet_number, day, service_type, members,
        /// guests, offerings, notes
        file: PathBuf,
        /// District (defaults to the configured district)
        #[arg(short, long)]
        district: Option<String>,
        /// Congregation (defaults to the configured congregation)
        #[arg(short, long)]
        congregation: Option<String>,
        /// Month number (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Email to sign in with (prompted for when omitted)
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
        /// Print the sheet without signing in or submitting
        #[arg(long)]
        dry_run: bool,
    },
}

/// One CSV row as typed into the entry form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvEntryRow {
    sheet_number: String,
    day: String,
    service_type: String,
    members: String,
    guests: String,
    offerings: String,
    notes: String,
}

/// Feed CSV rows through the entry draft into the sheet
///
/// Returns the number of rows added. Any bad row aborts the load with every
/// row error listed.
fn load_entries(sheet: &mut AttendanceSheet, path: &Path) -> ReturnsResult<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ReturnsError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    let mut added = 0;
    let mut errors = Vec::new();

    for (index, row) in reader.deserialize::<CsvEntryRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                errors.push(format!("Line {}: {}", line, e));
                continue;
            }
        };

        match add_row(sheet, &row) {
            Ok(()) => added += 1,
            Err(e) => errors.push(format!("Line {}: {}", line, e)),
        }
    }

    if !errors.is_empty() {
        return Err(ReturnsError::Import(errors.join("\n")));
    }
    Ok(added)
}

fn add_row(sheet: &mut AttendanceSheet, row: &CsvEntryRow) -> ReturnsResult<()> {
    let fields = [
        (EntryField::SheetNumber, &row.sheet_number),
        (EntryField::Day, &row.day),
        (EntryField::Members, &row.members),
        (EntryField::Guests, &row.guests),
        (EntryField::Offerings, &row.offerings),
        (EntryField::Notes, &row.notes),
    ];

    let draft = sheet.draft_mut();
    for (field, value) in fields {
        if !draft.set_field(field, value) {
            return Err(ReturnsError::Import(format!(
                "'{}' is not a valid {}",
                value,
                field.label()
            )));
        }
    }

    let service_type = if row.service_type.is_empty() {
        None
    } else {
        Some(
            row.service_type
                .parse::<ServiceType>()
                .map_err(ReturnsError::Import)?,
        )
    };
    draft.set_service_type(service_type);

    sheet.add_entry()?;
    Ok(())
}

/// Handle a sheet command
pub async fn handle_sheet_command(
    paths: &ReturnsPaths,
    settings: &Settings,
    cmd: SheetCommands,
) -> ReturnsResult<()> {
    match cmd {
        SheetCommands::Submit {
            file,
            district,
            congregation,
            month,
            year,
            email,
            password,
            dry_run,
        } => {
            let location = LocationContext::new(
                district.unwrap_or_else(|| settings.default_district.clone()),
                congregation.unwrap_or_else(|| settings.default_congregation.clone()),
            );
            let current = ReportingMonth::current();
            let reporting_month = ReportingMonth::new(
                year.unwrap_or(current.year()),
                month.unwrap_or(current.month()),
            )?;

            let mut sheet = AttendanceSheet::for_month(location, reporting_month);
            let added = load_entries(&mut sheet, &file)?;

            println!(
                "Monthly Sheet: {} ({})",
                reporting_month,
                sheet.location()
            );
            println!(
                "{}",
                entries_table(sheet.entries(), &sheet.totals(), &settings.currency_symbol)
            );
            let totals = sheet.totals();
            println!();
            println!("Entries:    {}", added);
            println!("Attendance: {} people", totals.total_attendance);
            println!(
                "Offerings:  {}",
                totals
                    .total_offerings
                    .format_with_symbol(&settings.currency_symbol)
            );

            if dry_run {
                println!();
                println!("Dry run: nothing submitted.");
                return Ok(());
            }

            let email = value_or_prompt(email, "Email: ")?;
            let password = secret_or_prompt(password, "Password: ")?;
            let mut session = SessionContext::init(build_authenticator(settings, paths));
            let user = session.sign_in(&email, &password).await?.display_name().to_string();
            println!();
            println!("Signed in as {}", user);

            let sender = build_sender(settings, paths);
            let outcome = sheet.submit(sender.as_ref(), settings.submit_timeout()).await;
            session.sign_out().await;

            let receipt = outcome?;
            if let Some(message) = sheet.status_message() {
                println!("{}", message);
            }
            println!("  Message: {} (via {})", receipt.message_id, receipt.sender);
        }
    }

    Ok(())
}
