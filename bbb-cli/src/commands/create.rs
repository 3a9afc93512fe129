//! Create command - create a meeting from a room type.

use clap::Args;
use console::style;

use bbb_core::config::AppConfig;
use bbb_core::error::BbbResult;
use bbb_services::{generate_meeting_id, CreateMeetingRequest};
use crate::OutputFormat;

#[derive(Args)]
pub struct CreateArgs {
    /// Meeting name shown to participants.
    #[arg(short, long)]
    pub name: String,
    /// Display name of the moderator creating the meeting.
    #[arg(short, long)]
    pub moderator: String,
    /// Meeting ID. Generated when omitted.
    #[arg(long)]
    pub id: Option<String>,
    /// Room type (classroom, meeting, webinar, or any configured key).
    #[arg(short, long)]
    pub room_type: Option<String>,
    /// Welcome message override.
    #[arg(short, long)]
    pub welcome: Option<String>,
    /// Extra metadata as key=value (repeatable).
    #[arg(long = "meta")]
    pub meta: Vec<String>,
}

pub async fn run(config: &AppConfig, args: CreateArgs, format: OutputFormat) -> BbbResult<()> {
    let service = super::create_service(config)?;

    let request = CreateMeetingRequest {
        meeting_id: args.id.unwrap_or_else(generate_meeting_id),
        meeting_name: args.name,
        moderator_name: args.moderator,
        room_type: args.room_type,
        welcome: args.welcome,
        meta: super::parse_pairs(&args.meta)?.into_iter().collect(),
    };

    if let OutputFormat::Text = format {
        println!(
            "  {} Creating meeting {}...",
            style("...").dim(),
            style(&request.meeting_id).dim()
        );
    }

    let created = service.create_meeting(&request).await?;

    match format {
        OutputFormat::Json => super::print_success(&created)?,
        OutputFormat::Text => {
            println!("  {} {}", style("OK").green().bold(), created.message);
            println!("  Meeting ID:         {}", style(&created.meeting_id).bold());
            if let Some(ref internal) = created.internal_meeting_id {
                println!("  Internal ID:        {internal}");
            }
            println!("  Room type:          {}", created.room_type);
            println!("  Moderator password: {}", created.moderator_password);
            println!("  Attendee password:  {}", created.attendee_password);
            println!();
            println!("  Moderator join link:");
            println!("  {}", style(&created.moderator_join_url).cyan());
        }
    }

    Ok(())
}
