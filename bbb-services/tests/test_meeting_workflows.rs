//! Integration tests for the meeting workflows against a mock BBB server.
//!
//! Covers create (profile resolution, remote failures), the join state
//! machine (running / stopped / absent, probe failures, auto-create),
//! listing with degraded failures, and end.

mod common;

use bbb_core::error::BbbError;
use bbb_services::{CreateMeetingRequest, JoinMeetingRequest, Role};
use common::{bbb_call, failed, query_value, running, server_error, success};
use wiremock::matchers::query_param;

fn join(meeting_id: &str, full_name: &str, role: Role) -> JoinMeetingRequest {
    JoinMeetingRequest {
        meeting_id: meeting_id.into(),
        full_name: full_name.into(),
        role,
    }
}

// ---- Join ----

#[tokio::test]
async fn join_attendee_absent_meeting_is_not_found() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning")
        .and(query_param("meetingID", "room-1"))
        .respond_with(running(false))
        .expect(1)
        .mount(&server)
        .await;
    bbb_call("getMeetingInfo")
        .and(query_param("password", "moderator123"))
        .respond_with(failed("notFound", "We could not find a meeting with that meeting ID"))
        .expect(1)
        .mount(&server)
        .await;
    bbb_call("create").respond_with(success("")).expect(0).mount(&server).await;

    let err = svc
        .join_meeting(&join("room-1", "Grace", Role::Attendee))
        .await
        .unwrap_err();

    match err {
        BbbError::NotFound(msg) => {
            assert!(msg.contains("room-1"));
            assert!(msg.contains("ask the moderator to start the meeting first"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn join_moderator_absent_meeting_auto_creates() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning").respond_with(running(false)).mount(&server).await;
    bbb_call("getMeetingInfo")
        .respond_with(failed("notFound", "not found"))
        .mount(&server)
        .await;
    bbb_call("create")
        .and(query_param("meetingID", "room-2"))
        .and(query_param("name", "Meeting room-2"))
        .and(query_param("record", "false"))
        .and(query_param("maxParticipants", "50"))
        .and(query_param("duration", "120"))
        .and(query_param("meta_autoCreated", "true"))
        .and(query_param("meta_createdBy", "Ada"))
        .and(query_param("moderatorPW", "moderator123"))
        .and(query_param("attendeePW", "attendee123"))
        .respond_with(success(
            "<meetingID>room-2</meetingID><internalMeetingID>abc-123</internalMeetingID>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let joined = svc
        .join_meeting(&join("room-2", "Ada", Role::Moderator))
        .await
        .unwrap();

    assert!(joined.auto_created);
    assert!(!joined.meeting_existed);
    assert!(!joined.meeting_running);
    assert_eq!(joined.role, Role::Moderator);
    assert!(joined.join_url.starts_with(&format!("{}/api/join?", server.uri())));
    assert_eq!(
        query_value(&joined.join_url, "password").as_deref(),
        Some("moderator123")
    );
    assert_eq!(query_value(&joined.join_url, "redirect").as_deref(), Some("true"));
}

#[tokio::test]
async fn join_running_meeting_skips_info_and_create() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning")
        .and(query_param("meetingID", "room-3"))
        .respond_with(running(true))
        .expect(2)
        .mount(&server)
        .await;
    bbb_call("getMeetingInfo").respond_with(success("")).expect(0).mount(&server).await;
    bbb_call("create").respond_with(success("")).expect(0).mount(&server).await;

    let attendee = svc
        .join_meeting(&join("room-3", "Grace", Role::Attendee))
        .await
        .unwrap();
    assert!(attendee.meeting_running);
    assert!(attendee.meeting_existed);
    assert!(!attendee.auto_created);
    assert_eq!(
        query_value(&attendee.join_url, "password").as_deref(),
        Some("attendee123")
    );
    assert_eq!(
        query_value(&attendee.join_url, "fullName").as_deref(),
        Some("Grace")
    );

    let moderator = svc
        .join_meeting(&join("room-3", "Ada", Role::Moderator))
        .await
        .unwrap();
    assert_eq!(
        query_value(&moderator.join_url, "password").as_deref(),
        Some("moderator123")
    );
}

#[tokio::test]
async fn join_stopped_meeting_depends_on_role() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning").respond_with(running(false)).mount(&server).await;
    bbb_call("getMeetingInfo")
        .respond_with(success("<meetingID>room-4</meetingID><running>false</running>"))
        .mount(&server)
        .await;
    bbb_call("create").respond_with(success("")).expect(0).mount(&server).await;

    let err = svc
        .join_meeting(&join("room-4", "Grace", Role::Attendee))
        .await
        .unwrap_err();
    match err {
        BbbError::NotFound(msg) => assert!(msg.contains("exists but is not currently running")),
        other => panic!("expected NotFound, got {other:?}"),
    }

    let joined = svc
        .join_meeting(&join("room-4", "Ada", Role::Moderator))
        .await
        .unwrap();
    assert!(joined.meeting_existed);
    assert!(!joined.meeting_running);
    assert!(!joined.auto_created);
    assert_eq!(
        query_value(&joined.join_url, "password").as_deref(),
        Some("moderator123")
    );
}

#[tokio::test]
async fn join_info_transport_failure_is_not_found_for_attendee() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning").respond_with(running(false)).mount(&server).await;
    bbb_call("getMeetingInfo").respond_with(server_error()).mount(&server).await;

    let err = svc
        .join_meeting(&join("room-5", "Grace", Role::Attendee))
        .await
        .unwrap_err();
    assert!(matches!(err, BbbError::NotFound(_)));
}

#[tokio::test]
async fn join_info_transport_failure_lets_moderator_create() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning").respond_with(running(false)).expect(1).mount(&server).await;
    bbb_call("getMeetingInfo").respond_with(server_error()).expect(1).mount(&server).await;
    bbb_call("create")
        .and(query_param("meta_autoCreated", "true"))
        .respond_with(success("<meetingID>room-10</meetingID>"))
        .expect(1)
        .mount(&server)
        .await;

    let joined = svc
        .join_meeting(&join("room-10", "Ada", Role::Moderator))
        .await
        .unwrap();
    assert!(joined.auto_created);
    assert!(!joined.meeting_existed);
    assert_eq!(
        query_value(&joined.join_url, "password").as_deref(),
        Some("moderator123")
    );
}

#[tokio::test]
async fn join_unparsable_info_reply_lets_moderator_create() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning").respond_with(running(false)).expect(1).mount(&server).await;
    bbb_call("getMeetingInfo")
        .respond_with(success(
            "<meetingID>room-11</meetingID><participantCount>lots</participantCount>",
        ))
        .expect(1)
        .mount(&server)
        .await;
    bbb_call("create").respond_with(success("")).expect(1).mount(&server).await;

    let joined = svc
        .join_meeting(&join("room-11", "Ada", Role::Moderator))
        .await
        .unwrap();
    assert!(joined.auto_created);
    assert!(!joined.meeting_existed);
}

#[tokio::test]
async fn join_running_check_failure_lets_moderator_create() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning").respond_with(server_error()).mount(&server).await;
    bbb_call("getMeetingInfo").respond_with(success("")).expect(0).mount(&server).await;
    bbb_call("create").respond_with(success("")).expect(1).mount(&server).await;

    let joined = svc
        .join_meeting(&join("room-6", "Ada", Role::Moderator))
        .await
        .unwrap();
    assert!(joined.auto_created);
}

#[tokio::test]
async fn join_auto_create_accepts_duplicate_id() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning").respond_with(running(false)).mount(&server).await;
    bbb_call("getMeetingInfo")
        .respond_with(failed("notFound", "not found"))
        .mount(&server)
        .await;
    bbb_call("create")
        .respond_with(failed("idNotUnique", "A meeting already exists with that meeting ID"))
        .expect(1)
        .mount(&server)
        .await;

    let joined = svc
        .join_meeting(&join("room-7", "Ada", Role::Moderator))
        .await
        .unwrap();
    assert_eq!(
        query_value(&joined.join_url, "meetingID").as_deref(),
        Some("room-7")
    );
}

#[tokio::test]
async fn join_auto_create_rejection_is_remote_error() {
    let (server, svc) = common::setup().await;

    bbb_call("isMeetingRunning").respond_with(running(false)).mount(&server).await;
    bbb_call("getMeetingInfo")
        .respond_with(failed("notFound", "not found"))
        .mount(&server)
        .await;
    bbb_call("create")
        .respond_with(failed("checksumError", "You did not pass the checksum security check"))
        .mount(&server)
        .await;

    let err = svc
        .join_meeting(&join("room-8", "Ada", Role::Moderator))
        .await
        .unwrap_err();
    match err {
        BbbError::Remote { key, message } => {
            assert_eq!(key.as_deref(), Some("checksumError"));
            assert_eq!(
                message,
                "Failed to create meeting: You did not pass the checksum security check"
            );
        }
        other => panic!("expected Remote, got {other:?}"),
    }
}

// ---- Create ----

#[tokio::test]
async fn create_unknown_room_type_uses_meeting_profile() {
    let (server, svc) = common::setup().await;

    bbb_call("create")
        .and(query_param("meetingID", "standup"))
        .and(query_param("name", "Daily Standup"))
        .and(query_param("maxParticipants", "20"))
        .and(query_param("duration", "60"))
        .and(query_param("record", "false"))
        .and(query_param("welcome", "Welcome to Daily Standup! Collaborative workspace"))
        .and(query_param("meta_description", "Collaborative workspace"))
        .and(query_param("meta_roomType", "bogus"))
        .and(query_param("meta_createdBy", "Ada"))
        .respond_with(success(
            "<meetingID>standup</meetingID><internalMeetingID>int-9</internalMeetingID>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let created = svc
        .create_meeting(&CreateMeetingRequest {
            meeting_id: "standup".into(),
            meeting_name: "Daily Standup".into(),
            moderator_name: "Ada".into(),
            room_type: Some("bogus".into()),
            ..CreateMeetingRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(created.meeting_id, "standup");
    assert_eq!(created.internal_meeting_id.as_deref(), Some("int-9"));
    assert_eq!(created.room_type, "bogus");
    assert_eq!(created.attendee_password, "attendee123");
    assert_eq!(created.moderator_password, "moderator123");
    assert_eq!(
        query_value(&created.moderator_join_url, "password").as_deref(),
        Some("moderator123")
    );
    assert_eq!(
        query_value(&created.moderator_join_url, "fullName").as_deref(),
        Some("Ada")
    );
}

#[tokio::test]
async fn create_known_room_type_uses_its_profile() {
    let (server, svc) = common::setup().await;

    bbb_call("create")
        .and(query_param("maxParticipants", "100"))
        .and(query_param("duration", "120"))
        .and(query_param("record", "true"))
        .respond_with(success("<meetingID>launch</meetingID>"))
        .expect(1)
        .mount(&server)
        .await;

    let created = svc
        .create_meeting(&CreateMeetingRequest {
            meeting_id: "launch".into(),
            meeting_name: "Launch".into(),
            moderator_name: "Ada".into(),
            room_type: Some("webinar".into()),
            ..CreateMeetingRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(created.room_type, "webinar");
}

#[tokio::test]
async fn create_rejected_is_remote_error() {
    let (server, svc) = common::setup().await;

    bbb_call("create")
        .respond_with(failed("idNotUnique", "A meeting already exists with that meeting ID"))
        .mount(&server)
        .await;

    let err = svc
        .create_meeting(&CreateMeetingRequest {
            meeting_id: "dup".into(),
            meeting_name: "Dup".into(),
            moderator_name: "Ada".into(),
            ..CreateMeetingRequest::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "remote error: A meeting already exists with that meeting ID"
    );
}

#[tokio::test]
async fn create_transport_failure_propagates() {
    let (server, svc) = common::setup().await;

    bbb_call("create").respond_with(server_error()).mount(&server).await;

    let err = svc
        .create_meeting(&CreateMeetingRequest {
            meeting_id: "m".into(),
            meeting_name: "M".into(),
            moderator_name: "Ada".into(),
            ..CreateMeetingRequest::default()
        })
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

// ---- List ----

#[tokio::test]
async fn list_returns_meetings_in_order() {
    let (server, svc) = common::setup().await;

    bbb_call("getMeetings")
        .respond_with(success(
            "<meetings>\
             <meeting><meetingID>a</meetingID><running>true</running><participantCount>3</participantCount></meeting>\
             <meeting><meetingID>b</meetingID><running>false</running><participantCount>0</participantCount></meeting>\
             <meeting><meetingID>c</meetingID><running>true</running><participantCount>8</participantCount></meeting>\
             </meetings>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let listing = svc.list_meetings().await.unwrap();
    assert_eq!(listing.message, "Meetings retrieved successfully");
    assert_eq!(listing.meetings.len(), 3);
    assert_eq!(listing.meetings[0].meeting_id.as_deref(), Some("a"));
    assert_eq!(listing.meetings[1].running, Some(false));
    assert_eq!(listing.meetings[2].participant_count, Some(8));
}

#[tokio::test]
async fn list_without_meetings_is_empty() {
    let (server, svc) = common::setup().await;

    bbb_call("getMeetings")
        .respond_with(success(
            "<meetings/><messageKey>noMeetings</messageKey><message>no meetings were found on this server</message>",
        ))
        .mount(&server)
        .await;

    let listing = svc.list_meetings().await.unwrap();
    assert!(listing.meetings.is_empty());
    assert_eq!(listing.message, "No meetings found");
}

#[tokio::test]
async fn list_failures_degrade_to_empty() {
    let (server, svc) = common::setup().await;

    bbb_call("getMeetings").respond_with(server_error()).mount(&server).await;
    let listing = svc.list_meetings().await.unwrap();
    assert!(listing.meetings.is_empty());
    assert_eq!(listing.message, "No meetings found");

    server.reset().await;
    bbb_call("getMeetings")
        .respond_with(failed("checksumError", "bad checksum"))
        .mount(&server)
        .await;
    let listing = svc.list_meetings().await.unwrap();
    assert!(listing.meetings.is_empty());
}

// ---- End ----

#[tokio::test]
async fn end_success() {
    let (server, svc) = common::setup().await;

    bbb_call("end")
        .and(query_param("meetingID", "room-9"))
        .and(query_param("password", "moderator123"))
        .respond_with(success(
            "<messageKey>sentEndMeetingRequest</messageKey><message>A request to end the meeting was sent.</message>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let ended = svc.end_meeting("room-9").await.unwrap();
    assert_eq!(ended.meeting_id, "room-9");
    assert_eq!(ended.message, "Meeting ended successfully");
}

#[tokio::test]
async fn end_failure_carries_message_verbatim() {
    let (server, svc) = common::setup().await;

    bbb_call("end")
        .respond_with(failed("notFound", "notFound"))
        .mount(&server)
        .await;

    let err = svc.end_meeting("ghost").await.unwrap_err();
    match err {
        BbbError::Remote { message, .. } => assert_eq!(message, "notFound"),
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn end_transport_failure_propagates() {
    let (server, svc) = common::setup().await;

    bbb_call("end").respond_with(server_error()).mount(&server).await;

    let err = svc.end_meeting("room-9").await.unwrap_err();
    assert!(matches!(err, BbbError::Transport(_)));
}
