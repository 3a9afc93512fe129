//! BBB reply parsing.
//!
//! BigBlueButton answers every call with a small, schema-stable XML document:
//! ```xml
//! <response>
//!   <returncode>SUCCESS</returncode>
//!   <meetingID>room-1</meetingID>
//!   <running>true</running>
//! </response>
//! ```
//! Fields are read by tag-scoped matching rather than a full XML parser. Only
//! attribute-free, single-line elements of the known field set are read, the
//! first occurrence wins, and anything else in the document is ignored. Text
//! is taken verbatim: no trimming and no entity decoding.
//! Absent fields stay `None`; they are never zero-filled.

use serde::{Deserialize, Serialize};

use bbb_core::constants::returncode;
use bbb_core::error::{BbbError, BbbResult};

/// Text of the first `<tag>...</tag>` element in `xml` whose content stays on
/// one line, if any.
///
/// The open tag must match exactly, so `<meeting>` does not match
/// `<meetings>` or `<meetingID>`. An element whose content runs over a line
/// break is skipped and the search goes on after its open tag.
pub fn extract_tag<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut from = 0;

    while let Some(pos) = xml.get(from..)?.find(&open) {
        let start = from + pos + open.len();
        let rest = xml.get(start..)?;
        let line_end = rest.find(is_line_break).unwrap_or(rest.len());
        match rest.find(&close) {
            Some(len) if len <= line_end => return rest.get(..len),
            Some(_) => from = start,
            None => return None,
        }
    }

    None
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Every non-overlapping `<tag>...</tag>` block in document order.
pub fn extract_blocks<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut blocks = Vec::new();
    let mut rest = xml;

    while let Some(pos) = rest.find(&open) {
        let after_open = &rest[pos + open.len()..];
        match after_open.find(&close) {
            Some(end) => {
                blocks.push(&after_open[..end]);
                rest = &after_open[end + close.len()..];
            }
            None => break,
        }
    }

    blocks
}

fn text_field(xml: &str, tag: &str) -> Option<String> {
    extract_tag(xml, tag).map(String::from)
}

/// `true` iff the element is present and its text is exactly `true`.
fn bool_field(xml: &str, tag: &str) -> Option<bool> {
    extract_tag(xml, tag).map(|t| t == "true")
}

/// Absent -> `Ok(None)`; present but not an integer -> parse error.
fn count_field(xml: &str, tag: &str) -> BbbResult<Option<u32>> {
    match extract_tag(xml, tag) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<u32>().map(Some).map_err(|_| BbbError::Parse {
            field: tag.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// The common fields of any BBB reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BbbResponse {
    /// "SUCCESS" or "FAILED". `None` if the body carried no returncode at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returncode: Option<String>,
    /// Machine-readable failure or warning key (e.g. "notFound").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "meetingID", skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    #[serde(rename = "internalMeetingID", skip_serializing_if = "Option::is_none")]
    pub internal_meeting_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderator_count: Option<u32>,
}

impl BbbResponse {
    /// Read the known fields out of a reply document.
    pub fn parse(xml: &str) -> BbbResult<Self> {
        Ok(Self {
            returncode: text_field(xml, "returncode"),
            message_key: text_field(xml, "messageKey"),
            message: text_field(xml, "message"),
            meeting_id: text_field(xml, "meetingID"),
            internal_meeting_id: text_field(xml, "internalMeetingID"),
            running: bool_field(xml, "running"),
            participant_count: count_field(xml, "participantCount")?,
            moderator_count: count_field(xml, "moderatorCount")?,
        })
    }

    /// Whether the returncode is exactly "SUCCESS".
    pub fn is_success(&self) -> bool {
        self.returncode.as_deref() == Some(returncode::SUCCESS)
    }

    /// Whether BBB reported the meeting ID as already taken.
    ///
    /// A repeated `create` for the same ID is answered this way, and callers
    /// that only need the meeting to exist treat it as success.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self.message_key.as_deref(),
            Some("idNotUnique") | Some("duplicateWarning")
        )
    }

    /// Convert a non-success reply into a remote error carrying BBB's message.
    pub fn into_result(self, fallback: &str) -> BbbResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(BbbError::remote(self.message_key, self.message, fallback))
        }
    }
}

/// Status of one meeting as reported by `getMeetings`.
///
/// Derived fresh from each query and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingStatus {
    #[serde(rename = "meetingID", skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    #[serde(rename = "internalMeetingID", skip_serializing_if = "Option::is_none")]
    pub internal_meeting_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderator_count: Option<u32>,
}

impl MeetingStatus {
    /// Read one `<meeting>` block.
    pub fn parse(block: &str) -> BbbResult<Self> {
        Ok(Self {
            meeting_id: text_field(block, "meetingID"),
            internal_meeting_id: text_field(block, "internalMeetingID"),
            meeting_name: text_field(block, "meetingName"),
            running: bool_field(block, "running"),
            participant_count: count_field(block, "participantCount")?,
            moderator_count: count_field(block, "moderatorCount")?,
        })
    }

    /// Meeting name if known, otherwise the meeting ID.
    pub fn display_name(&self) -> &str {
        self.meeting_name
            .as_deref()
            .or(self.meeting_id.as_deref())
            .unwrap_or("")
    }
}

/// Parse every `<meeting>` block of a `getMeetings` reply, in document order.
///
/// A document without any block yields an empty list.
pub fn parse_meetings(xml: &str) -> BbbResult<Vec<MeetingStatus>> {
    extract_blocks(xml, "meeting")
        .into_iter()
        .map(MeetingStatus::parse)
        .collect()
}
