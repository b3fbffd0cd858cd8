//! Outbox CLI commands
//!
//! Inspect what the outbox sender has delivered.

use clap::Subcommand;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::ReturnsPaths;
use crate::delivery::outbox::{find_message, list_messages, load_attachments};
use crate::error::ReturnsResult;

/// Outbox subcommands
#[derive(Subcommand)]
pub enum OutboxCommands {
    /// List delivered messages
    List,
    /// Show one message
    Show {
        /// Message ID, short ID (msg-1a2b3c4d) or prefix
        id: String,
    },
}

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Files")]
    files: usize,
}

/// Handle an outbox command
pub fn handle_outbox_command(paths: &ReturnsPaths, cmd: OutboxCommands) -> ReturnsResult<()> {
    let dir = paths.outbox_dir();

    match cmd {
        OutboxCommands::List => {
            let messages = list_messages(&dir)?;
            if messages.is_empty() {
                println!("Outbox is empty.");
                return Ok(());
            }

            let rows: Vec<MessageRow> = messages
                .iter()
                .map(|m| MessageRow {
                    id: m.message_id.short(),
                    kind: m.kind().to_string(),
                    created: m.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    subject: m.subject.clone(),
                    files: m.attachment_names.len(),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::psql()));
            println!("{} message(s) in {}", messages.len(), dir.display());
        }

        OutboxCommands::Show { id } => {
            let message = find_message(&dir, &id)?;

            println!("Message:  {}", message.message_id);
            println!("Subject:  {}", message.subject);
            if !message.recipient.is_empty() {
                println!("To:       {}", message.recipient);
            }
            println!(
                "Created:  {}",
                message.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );

            let attachments = load_attachments(&dir, message.message_id)?;
            if !attachments.is_empty() {
                println!("Attachments:");
                for file in &attachments {
                    println!(
                        "  {} ({}, {})",
                        file.file_name,
                        file.content_type,
                        file.size_display()
                    );
                }
            }
            println!();
            print!("{}", message.body);
        }
    }

    Ok(())
}
