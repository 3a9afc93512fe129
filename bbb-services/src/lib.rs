//! BBB Services - Meeting workflows on top of the BigBlueButton client.
//!
//! This crate implements the four caller-facing operations:
//! - Create a meeting from a room-type profile and hand back a moderator join URL
//! - Join a meeting, probing whether it exists and auto-creating it for moderators
//! - List meetings, degrading any upstream failure to an empty list
//! - End a meeting with the moderator password
//!
//! Every operation is stateless; the BBB server is the only source of truth.

pub mod ids;
pub mod meeting;
pub mod role;

// Re-export key types
pub use ids::generate_meeting_id;
pub use meeting::{
    CreateMeetingRequest, CreatedMeeting, EndedMeeting, JoinMeetingRequest, JoinedMeeting,
    MeetingListing, MeetingService,
};
pub use role::Role;
