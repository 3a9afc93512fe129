//! Join command - get a join link for a meeting.

use clap::Args;
use console::style;

use bbb_core::config::AppConfig;
use bbb_core::error::BbbResult;
use bbb_services::{JoinMeetingRequest, Role};
use crate::OutputFormat;

#[derive(Args)]
pub struct JoinArgs {
    /// Meeting ID.
    pub meeting_id: String,
    /// Display name in the meeting.
    #[arg(short, long)]
    pub name: String,
    /// Role to join with (moderator or attendee).
    #[arg(short, long, default_value = "attendee")]
    pub role: String,
}

pub async fn run(config: &AppConfig, args: JoinArgs, format: OutputFormat) -> BbbResult<()> {
    let service = super::create_service(config)?;

    let request = JoinMeetingRequest {
        meeting_id: args.meeting_id,
        full_name: args.name,
        role: Role::parse(&args.role),
    };

    let joined = service.join_meeting(&request).await?;

    match format {
        OutputFormat::Json => super::print_success(&joined)?,
        OutputFormat::Text => {
            if joined.auto_created {
                println!(
                    "  {} Meeting {} did not exist and was created.",
                    style("NEW").yellow().bold(),
                    joined.meeting_id
                );
            } else if !joined.meeting_running {
                println!(
                    "  {} Meeting {} starts when you join.",
                    style("--").dim(),
                    joined.meeting_id
                );
            }
            println!("  {} {}", style("OK").green().bold(), joined.message);
            println!("  {}", style(&joined.join_url).cyan());
        }
    }

    Ok(())
}
