//! Rooms command - show the configured room-type profiles.

use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};

use bbb_core::config::AppConfig;
use bbb_core::constants;
use bbb_core::error::BbbResult;
use crate::OutputFormat;

pub fn run(config: &AppConfig, format: OutputFormat) -> BbbResult<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config.room_types)?);
        }
        OutputFormat::Text => {
            if config.room_types.is_empty() {
                println!("No room types configured.");
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(vec!["Key", "Name", "Max", "Record", "Duration", "Description"]);

            for (key, profile) in &config.room_types {
                let key = if key == constants::DEFAULT_ROOM_TYPE {
                    format!("{key} (default)")
                } else {
                    key.clone()
                };
                let max = match profile.max_participants {
                    0 => "unlimited".to_string(),
                    n => n.to_string(),
                };
                let duration = match profile.duration_minutes {
                    0 => "unlimited".to_string(),
                    n => format!("{n} min"),
                };

                table.add_row(vec![
                    key,
                    profile.display_name.clone(),
                    max,
                    if profile.record { "yes" } else { "no" }.to_string(),
                    duration,
                    profile.description.clone(),
                ]);
            }

            println!("{table}");
        }
    }

    Ok(())
}
