//! Sign command - print a signed URL for an arbitrary call.

use bbb_api::ApiClient;
use bbb_core::config::AppConfig;
use bbb_core::error::BbbResult;
use crate::OutputFormat;

pub fn run(config: &AppConfig, call: &str, params: &[String], format: OutputFormat) -> BbbResult<()> {
    let client = ApiClient::new(&config.server)?;
    let pairs = super::parse_pairs(params)?;
    let url = client.build_signed_url(call, &pairs)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({
                "success": true,
                "call": call,
                "url": url.as_str(),
            }));
        }
        OutputFormat::Text => println!("{url}"),
    }

    Ok(())
}
