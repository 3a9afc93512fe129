//! Meeting lifecycle calls: create, status, list, end.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bbb_core::constants::{self, calls};
use bbb_core::error::BbbResult;

use crate::client::{ApiClient, NO_PARAMS};
use crate::response::{parse_meetings, BbbResponse, MeetingStatus};

/// Options for a `create` call. Passed once and not retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateMeetingOptions {
    /// Defaults to "attendee123".
    pub attendee_password: Option<String>,
    /// Defaults to "moderator123".
    pub moderator_password: Option<String>,
    /// Defaults to "Welcome to <meeting name>!".
    pub welcome: Option<String>,
    pub dial_number: Option<String>,
    /// Random 5-digit number when unset.
    pub voice_bridge: Option<u32>,
    /// 0 means unlimited.
    pub max_participants: u32,
    pub logout_url: Option<String>,
    pub record: bool,
    /// Minutes; 0 means unlimited.
    pub duration_minutes: u32,
    /// Sent as `meta_description`.
    pub description: Option<String>,
    /// Arbitrary metadata, each entry sent as `meta_<key>=<value>`.
    pub meta: BTreeMap<String, String>,
}

impl CreateMeetingOptions {
    /// Serialize into `create` parameters, in the order they are signed and sent.
    pub fn to_params(&self, meeting_id: &str, meeting_name: &str) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::with_capacity(12 + self.meta.len());
        let mut push = |k: &str, v: String| params.push((k.to_string(), v));

        push("meetingID", meeting_id.to_string());
        push("name", meeting_name.to_string());
        push(
            "attendeePW",
            non_empty(&self.attendee_password)
                .unwrap_or(constants::DEFAULT_ATTENDEE_PASSWORD)
                .to_string(),
        );
        push(
            "moderatorPW",
            non_empty(&self.moderator_password)
                .unwrap_or(constants::DEFAULT_MODERATOR_PASSWORD)
                .to_string(),
        );
        push(
            "welcome",
            non_empty(&self.welcome)
                .map(String::from)
                .unwrap_or_else(|| format!("Welcome to {meeting_name}!")),
        );
        if let Some(dial) = non_empty(&self.dial_number) {
            push("dialNumber", dial.to_string());
        }
        push(
            "voiceBridge",
            self.voice_bridge.unwrap_or_else(random_voice_bridge).to_string(),
        );
        push("maxParticipants", self.max_participants.to_string());
        if let Some(url) = non_empty(&self.logout_url) {
            push("logoutURL", url.to_string());
        }
        push("record", self.record.to_string());
        push("duration", self.duration_minutes.to_string());
        if let Some(desc) = non_empty(&self.description) {
            push("meta_description", desc.to_string());
        }
        for (key, value) in &self.meta {
            push(&format!("meta_{key}"), value.clone());
        }

        params
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A random 5-digit voice bridge number.
pub fn random_voice_bridge() -> u32 {
    rand::thread_rng().gen_range(10_000..=99_999)
}

/// Reply to `isMeetingRunning`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningStatus {
    /// True iff the reply's `<running>` text is exactly "true".
    pub running: bool,
    pub returncode: Option<String>,
    pub message: Option<String>,
}

/// Reply to `getMeetings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingList {
    pub success: bool,
    pub message: Option<String>,
    pub meetings: Vec<MeetingStatus>,
}

/// Reply to `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndResult {
    pub success: bool,
    pub message_key: Option<String>,
    pub message: Option<String>,
}

impl ApiClient {
    /// Create a meeting. The reply is returned as-is; check `returncode`.
    pub async fn create_meeting(
        &self,
        meeting_id: &str,
        meeting_name: &str,
        options: &CreateMeetingOptions,
    ) -> BbbResult<BbbResponse> {
        let params = options.to_params(meeting_id, meeting_name);
        debug!("creating meeting {meeting_id} ({} params)", params.len());
        self.call(calls::CREATE, &params).await
    }

    /// Ask whether a meeting is currently running.
    pub async fn is_meeting_running(&self, meeting_id: &str) -> BbbResult<RunningStatus> {
        let resp = self
            .call(calls::IS_MEETING_RUNNING, [("meetingID", meeting_id)])
            .await?;
        Ok(RunningStatus {
            running: resp.running == Some(true),
            returncode: resp.returncode,
            message: resp.message,
        })
    }

    /// Fetch meeting details.
    ///
    /// A meeting that does not exist comes back as a FAILED reply, not as an
    /// error; only transport and parse failures are errors here.
    pub async fn get_meeting_info(
        &self,
        meeting_id: &str,
        moderator_password: &str,
    ) -> BbbResult<BbbResponse> {
        self.call(
            calls::GET_MEETING_INFO,
            [("meetingID", meeting_id), ("password", moderator_password)],
        )
        .await
    }

    /// List all meetings on the server. No `<meeting>` blocks means an empty list.
    pub async fn get_meetings(&self) -> BbbResult<MeetingList> {
        let xml = self.get_xml(calls::GET_MEETINGS, NO_PARAMS).await?;
        let resp = BbbResponse::parse(&xml)?;
        let meetings = parse_meetings(&xml)?;
        debug!("getMeetings returned {} meeting(s)", meetings.len());
        Ok(MeetingList {
            success: resp.is_success(),
            message: resp.message,
            meetings,
        })
    }

    /// End a meeting.
    pub async fn end_meeting(
        &self,
        meeting_id: &str,
        moderator_password: &str,
    ) -> BbbResult<EndResult> {
        let resp = self
            .call(
                calls::END,
                [("meetingID", meeting_id), ("password", moderator_password)],
            )
            .await?;
        Ok(EndResult {
            success: resp.is_success(),
            message_key: resp.message_key,
            message: resp.message,
        })
    }
}
