//! API call modules organized by purpose.
//!
//! Each module adds typed methods to `ApiClient` for a group of related calls.

pub mod join;
pub mod meetings;
