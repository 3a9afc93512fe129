//! Meeting orchestration: create, join, list, and end.
//!
//! Each operation validates its input, issues one or two sequential calls
//! through the `ApiClient`, and maps the replies onto the error kinds callers
//! see. No meeting state is kept between calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bbb_api::client::NO_PARAMS;
use bbb_api::{ApiClient, CreateMeetingOptions, MeetingStatus, Url};
use bbb_core::config::AppConfig;
use bbb_core::constants;
use bbb_core::error::{BbbError, BbbResult};

use crate::role::Role;

/// Input to the create workflow.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingRequest {
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
    pub meeting_name: String,
    pub moderator_name: String,
    /// Room-type key; unknown or absent selects the `meeting` profile.
    #[serde(default)]
    pub room_type: Option<String>,
    /// Overrides the profile-derived welcome text.
    #[serde(default)]
    pub welcome: Option<String>,
    /// Extra metadata, merged over the workflow's own entries.
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

/// Result of a successful create.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMeeting {
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
    #[serde(rename = "internalMeetingID", skip_serializing_if = "Option::is_none")]
    pub internal_meeting_id: Option<String>,
    pub moderator_join_url: String,
    pub attendee_password: String,
    pub moderator_password: String,
    pub room_type: String,
    pub message: String,
}

/// Input to the join workflow.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinMeetingRequest {
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
}

/// Result of a successful join.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedMeeting {
    pub join_url: String,
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
    pub full_name: String,
    pub role: Role,
    /// Whether the meeting existed before this join.
    pub meeting_existed: bool,
    /// Whether the meeting was running before this join.
    pub meeting_running: bool,
    /// Whether this join created the meeting.
    pub auto_created: bool,
    pub message: String,
}

/// Result of the list workflow. Never an error for upstream failures.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingListing {
    pub meetings: Vec<MeetingStatus>,
    pub message: String,
}

/// Result of a successful end.
#[derive(Debug, Clone, Serialize)]
pub struct EndedMeeting {
    #[serde(rename = "meetingID")]
    pub meeting_id: String,
    pub message: String,
}

/// What the join probes found out about a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeetingState {
    Running,
    Stopped,
    Absent,
}

/// Meeting workflows over a single BBB server.
#[derive(Debug, Clone)]
pub struct MeetingService {
    client: ApiClient,
    config: AppConfig,
}

impl MeetingService {
    /// Build a service and its client from configuration.
    pub fn new(config: AppConfig) -> BbbResult<Self> {
        let client = ApiClient::new(&config.server)?;
        Ok(Self::with_client(client, config))
    }

    /// Build a service around an existing client.
    pub fn with_client(client: ApiClient, config: AppConfig) -> Self {
        Self { client, config }
    }

    /// The configured password for a role.
    pub fn password_for(&self, role: Role) -> &str {
        match role {
            Role::Moderator => &self.config.server.moderator_password,
            Role::Attendee => &self.config.server.attendee_password,
        }
    }

    // --- Create ---

    /// Create a meeting from a room-type profile.
    ///
    /// On success also returns the moderator's join URL and both passwords.
    pub async fn create_meeting(&self, req: &CreateMeetingRequest) -> BbbResult<CreatedMeeting> {
        require("meetingID", &req.meeting_id)?;
        require("meetingName", &req.meeting_name)?;
        require("moderatorName", &req.moderator_name)?;
        self.config.server.validate()?;

        let room_type = req
            .room_type
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| constants::DEFAULT_ROOM_TYPE.to_string());
        let profile = self.config.room_profile(Some(room_type.as_str()));
        debug!(
            "create {}: room type {room_type} -> profile {}",
            req.meeting_id, profile.display_name
        );

        let mut meta = BTreeMap::new();
        meta.insert("roomType".to_string(), room_type.clone());
        meta.insert("createdBy".to_string(), req.moderator_name.clone());
        meta.insert("createdAt".to_string(), now_rfc3339());
        meta.extend(req.meta.clone());

        let options = CreateMeetingOptions {
            attendee_password: Some(self.config.server.attendee_password.clone()),
            moderator_password: Some(self.config.server.moderator_password.clone()),
            welcome: Some(req.welcome.clone().unwrap_or_else(|| {
                format!("Welcome to {}! {}", req.meeting_name, profile.description)
            })),
            max_participants: profile.max_participants,
            logout_url: Some(self.config.server.logout_url.clone()),
            record: profile.record,
            duration_minutes: profile.duration_minutes,
            description: Some(profile.description.clone()),
            meta,
            ..CreateMeetingOptions::default()
        };

        let resp = self
            .client
            .create_meeting(&req.meeting_id, &req.meeting_name, &options)
            .await?
            .into_result("Failed to create meeting")?;

        let moderator_join_url = self.client.generate_join_url(
            &req.meeting_id,
            &req.moderator_name,
            &self.config.server.moderator_password,
            NO_PARAMS,
        )?;

        info!("created meeting {} ({room_type})", req.meeting_id);

        Ok(CreatedMeeting {
            meeting_id: resp.meeting_id.unwrap_or_else(|| req.meeting_id.clone()),
            internal_meeting_id: resp.internal_meeting_id,
            moderator_join_url: moderator_join_url.into(),
            attendee_password: self.config.server.attendee_password.clone(),
            moderator_password: self.config.server.moderator_password.clone(),
            room_type,
            message: "Meeting created successfully".into(),
        })
    }

    // --- Join ---

    /// Produce a join URL for a user, reconciling the meeting's current state.
    ///
    /// - running: join directly
    /// - absent: moderators create it first, attendees get `NotFound`
    /// - created but stopped: moderators join (which starts it), attendees get `NotFound`
    ///
    /// Probe failures are treated as "absent" and never abort the join.
    pub async fn join_meeting(&self, req: &JoinMeetingRequest) -> BbbResult<JoinedMeeting> {
        require("meetingID", &req.meeting_id)?;
        require("fullName", &req.full_name)?;
        self.config.server.validate()?;

        info!(
            "join request: {} ({}) -> {}",
            req.full_name, req.role, req.meeting_id
        );

        let state = self.probe_meeting(&req.meeting_id).await?;
        debug!("meeting {} probed as {state:?}", req.meeting_id);

        let mut auto_created = false;
        match (state, req.role) {
            (MeetingState::Running, _) => {}
            (MeetingState::Absent, Role::Moderator) => {
                self.auto_create(&req.meeting_id, &req.full_name).await?;
                auto_created = true;
            }
            (MeetingState::Absent, Role::Attendee) => {
                return Err(BbbError::NotFound(format!(
                    "Meeting \"{}\" does not exist or is not running. Please check the \
                     Meeting ID or ask the moderator to start the meeting first.",
                    req.meeting_id
                )));
            }
            (MeetingState::Stopped, Role::Attendee) => {
                return Err(BbbError::NotFound(format!(
                    "Meeting \"{}\" exists but is not currently running. Please ask the \
                     moderator to start the meeting first.",
                    req.meeting_id
                )));
            }
            (MeetingState::Stopped, Role::Moderator) => {}
        }

        let join_url = self.join_url(&req.meeting_id, &req.full_name, req.role)?;
        debug!("generated join URL for {} as {}", req.full_name, req.role);

        let message = match req.role {
            Role::Moderator => format!("Ready to join meeting \"{}\" as moderator.", req.meeting_id),
            Role::Attendee => format!(
                "Ready to join meeting \"{}\" as attendee. You will join the same meeting as the moderator.",
                req.meeting_id
            ),
        };

        Ok(JoinedMeeting {
            join_url: join_url.into(),
            meeting_id: req.meeting_id.clone(),
            full_name: req.full_name.clone(),
            role: req.role,
            meeting_existed: state != MeetingState::Absent,
            meeting_running: state == MeetingState::Running,
            auto_created,
            message,
        })
    }

    /// Build the signed join URL with the password matching `role`.
    pub fn join_url(&self, meeting_id: &str, full_name: &str, role: Role) -> BbbResult<Url> {
        self.client
            .generate_join_url(meeting_id, full_name, self.password_for(role), NO_PARAMS)
    }

    /// Find out whether a meeting is running, stopped, or absent.
    async fn probe_meeting(&self, meeting_id: &str) -> BbbResult<MeetingState> {
        match self.client.is_meeting_running(meeting_id).await {
            Ok(status) if status.running => return Ok(MeetingState::Running),
            Ok(_) => {}
            Err(e) => {
                degrade_probe_error("isMeetingRunning", meeting_id, e)?;
                return Ok(MeetingState::Absent);
            }
        }

        match self
            .client
            .get_meeting_info(meeting_id, &self.config.server.moderator_password)
            .await
        {
            Ok(info) if info.is_success() => Ok(MeetingState::Stopped),
            Ok(info) => {
                debug!(
                    "getMeetingInfo for {meeting_id}: {}",
                    info.message_key.as_deref().unwrap_or("FAILED")
                );
                Ok(MeetingState::Absent)
            }
            Err(e) => {
                degrade_probe_error("getMeetingInfo", meeting_id, e)?;
                Ok(MeetingState::Absent)
            }
        }
    }

    /// Create a meeting on behalf of a moderator joining one that does not exist.
    ///
    /// A reply saying the ID is already taken counts as success.
    async fn auto_create(&self, meeting_id: &str, full_name: &str) -> BbbResult<()> {
        info!("creating meeting {meeting_id} for moderator {full_name}");

        let defaults = &self.config.defaults;
        let mut meta = BTreeMap::new();
        meta.insert("createdBy".to_string(), full_name.to_string());
        meta.insert("createdAt".to_string(), now_rfc3339());
        meta.insert("autoCreated".to_string(), "true".to_string());

        let options = CreateMeetingOptions {
            attendee_password: Some(self.config.server.attendee_password.clone()),
            moderator_password: Some(self.config.server.moderator_password.clone()),
            welcome: Some(format!(
                "Welcome to {meeting_id}! This meeting was started by {full_name}."
            )),
            max_participants: defaults.max_participants,
            logout_url: Some(self.config.server.logout_url.clone()),
            record: defaults.record,
            duration_minutes: defaults.duration_minutes,
            meta,
            ..CreateMeetingOptions::default()
        };

        let resp = self
            .client
            .create_meeting(meeting_id, &format!("Meeting {meeting_id}"), &options)
            .await?;

        if resp.is_success() || resp.is_duplicate() {
            info!("meeting {meeting_id} ready");
            Ok(())
        } else {
            Err(BbbError::Remote {
                key: resp.message_key,
                message: format!(
                    "Failed to create meeting: {}",
                    resp.message.as_deref().unwrap_or("Unknown error")
                ),
            })
        }
    }

    // --- List ---

    /// List meetings. Upstream failures become an empty listing.
    pub async fn list_meetings(&self) -> BbbResult<MeetingListing> {
        self.config.server.validate()?;

        match self.client.get_meetings().await {
            Ok(list) if list.success && !list.meetings.is_empty() => Ok(MeetingListing {
                meetings: list.meetings,
                message: "Meetings retrieved successfully".into(),
            }),
            Ok(list) => {
                debug!(
                    "getMeetings: success={} message={:?}",
                    list.success, list.message
                );
                Ok(MeetingListing::empty())
            }
            Err(e @ BbbError::Config(_)) => Err(e),
            Err(e) => {
                warn!("listing meetings failed, reporting none: {e}");
                Ok(MeetingListing::empty())
            }
        }
    }

    // --- End ---

    /// End a meeting with the moderator password.
    pub async fn end_meeting(&self, meeting_id: &str) -> BbbResult<EndedMeeting> {
        require("meetingID", meeting_id)?;
        self.config.server.validate()?;

        let result = self
            .client
            .end_meeting(meeting_id, &self.config.server.moderator_password)
            .await?;

        if !result.success {
            return Err(BbbError::remote(
                result.message_key,
                result.message,
                "Failed to end meeting",
            ));
        }

        info!("ended meeting {meeting_id}");
        Ok(EndedMeeting {
            meeting_id: meeting_id.to_string(),
            message: "Meeting ended successfully".into(),
        })
    }
}

impl MeetingListing {
    fn empty() -> Self {
        Self {
            meetings: Vec::new(),
            message: "No meetings found".into(),
        }
    }
}

/// Fail with a validation error if a required field is empty.
fn require(field: &str, value: &str) -> BbbResult<()> {
    if value.trim().is_empty() {
        Err(BbbError::Validation(format!("missing required field: {field}")))
    } else {
        Ok(())
    }
}

/// Swallow a probe failure, except for configuration errors.
fn degrade_probe_error(call: &str, meeting_id: &str, err: BbbError) -> BbbResult<()> {
    match err {
        BbbError::Config(_) => Err(err),
        other => {
            warn!("{call} probe for {meeting_id} failed, treating as absent: {other}");
            Ok(())
        }
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
