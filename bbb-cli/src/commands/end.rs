//! End command - end a running meeting.

use console::style;

use bbb_core::config::AppConfig;
use bbb_core::error::BbbResult;
use crate::OutputFormat;

pub async fn run(config: &AppConfig, meeting_id: &str, format: OutputFormat) -> BbbResult<()> {
    let service = super::create_service(config)?;

    if let OutputFormat::Text = format {
        println!(
            "  {} Ending meeting {}...",
            style("...").dim(),
            style(meeting_id).dim()
        );
    }

    let ended = service.end_meeting(meeting_id).await?;

    match format {
        OutputFormat::Json => super::print_success(&ended)?,
        OutputFormat::Text => {
            println!("  {} {}", style("OK").green().bold(), ended.message);
        }
    }

    Ok(())
}
