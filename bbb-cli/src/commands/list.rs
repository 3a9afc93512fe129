//! List command.

use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};
use console::style;

use bbb_core::config::AppConfig;
use bbb_core::error::BbbResult;
use crate::OutputFormat;

pub async fn run(config: &AppConfig, format: OutputFormat) -> BbbResult<()> {
    let service = super::create_service(config)?;
    let listing = service.list_meetings().await?;

    match format {
        OutputFormat::Json => super::print_success(&listing)?,
        OutputFormat::Text => {
            if listing.meetings.is_empty() {
                println!("{}.", listing.message);
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(vec!["Meeting ID", "Name", "Status", "Participants", "Moderators"]);

            for m in &listing.meetings {
                let status = match m.running {
                    Some(true) => style("running").green().to_string(),
                    Some(false) => style("stopped").dim().to_string(),
                    None => "-".to_string(),
                };
                let count = |c: Option<u32>| c.map(|n| n.to_string()).unwrap_or_else(|| "-".into());

                table.add_row(vec![
                    super::truncate(m.meeting_id.as_deref().unwrap_or("-"), 36),
                    super::truncate(m.display_name(), 30),
                    status,
                    count(m.participant_count),
                    count(m.moderator_count),
                ]);
            }

            println!("{table}");
            println!("\n{} meeting(s)", listing.meetings.len());
        }
    }

    Ok(())
}
