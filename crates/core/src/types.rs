/// Server-assigned profile identifier.
///
/// `0` is the sentinel for a profile that has not been persisted yet;
/// the backend assigns a positive id on create.
pub type ProfileId = i64;

/// Id value of a profile that has not been saved to the backend.
pub const UNSAVED_ID: ProfileId = 0;
