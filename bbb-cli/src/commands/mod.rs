//! CLI command implementations.

pub mod create;
pub mod end;
pub mod init;
pub mod join;
pub mod list;
pub mod rooms;
pub mod sign;

use serde::Serialize;

use bbb_core::config::AppConfig;
use bbb_core::error::{BbbError, BbbResult};
use bbb_services::MeetingService;

/// Helper to create the meeting service from config.
pub fn create_service(config: &AppConfig) -> BbbResult<MeetingService> {
    MeetingService::new(config.clone())
}

/// Print a workflow result as `{"success": true, ...fields}`.
pub fn print_success<T: Serialize>(value: &T) -> BbbResult<()> {
    let mut json = serde_json::to_value(value)?;
    if let Some(obj) = json.as_object_mut() {
        obj.insert("success".into(), serde_json::Value::Bool(true));
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Print an error as `{"success": false, "error": ...}`.
pub fn print_failure(err: &BbbError) {
    println!("{}", serde_json::to_string_pretty(&failure_json(err)).unwrap_or_default());
}

fn failure_json(err: &BbbError) -> serde_json::Value {
    let mut json = serde_json::json!({
        "success": false,
        "error": err.to_string(),
    });
    if let BbbError::Remote { key: Some(key), .. } = err {
        json["messageKey"] = serde_json::Value::String(key.clone());
    }
    json
}

/// Split `key=value` arguments into ordered pairs.
pub fn parse_pairs(args: &[String]) -> BbbResult<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| BbbError::Validation(format!("expected key=value, got '{arg}'")))
        })
        .collect()
}

/// Truncate a string to a maximum number of characters, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
