//! Form controller for a single profile (new or existing).
//!
//! The editor works entirely in strings -- every field of
//! [`ProfileDraft`] is the text currently sitting in its input -- and the
//! controller owns validation, normalization to [`ProfileInput`], and the
//! create-vs-update decision at submit time.
//!
//! Phase transitions: `Idle -> Editing -> Submitting -> Idle` on success,
//! `-> Failed` on a rejected write (the draft survives so nothing typed
//! is lost), and back to `Editing` on validation failure or the next
//! edit.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{FieldError, RemoteError, SubmitError};
use crate::profile::{Address, Gender, MaritalStatus, Profile, ProfileInput};
use crate::types::{ProfileId, UNSAVED_ID};
use crate::validate::{self, DATE_FORMAT};

// ---------------------------------------------------------------------------
// ProfileStore
// ---------------------------------------------------------------------------

/// The remote store the form (and the cache) talk to.
///
/// Implemented by the HTTP client; tests substitute recording or
/// scripted fakes.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<Profile>, RemoteError>;

    /// Create a new profile; the server assigns id and timestamps.
    async fn create(&self, input: &ProfileInput) -> Result<Profile, RemoteError>;

    /// Replace an existing profile wholesale.
    async fn update(&self, id: ProfileId, input: &ProfileInput)
        -> Result<Profile, RemoteError>;

    /// Remove a profile.
    async fn delete(&self, id: ProfileId) -> Result<(), RemoteError>;
}

// ---------------------------------------------------------------------------
// ProfileDraft
// ---------------------------------------------------------------------------

/// Field names accepted by [`ProfileDraft::set`] / [`ProfileDraft::get`],
/// in form order. Address fields are flattened.
pub const DRAFT_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "suffix",
    "birth_date",
    "gender",
    "marital_status",
    "email",
    "contact_number",
    "street",
    "unit_number",
    "purok",
    "brgy",
    "municipality",
    "province",
];

/// All-string editable representation of one profile.
///
/// `id` stays `0` for a profile that has never been saved; opening an
/// existing profile copies its id and renders every value back to the
/// string the editor shows (dates ISO, enums lowercase, absent -> `""`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub suffix: String,
    pub birth_date: String,
    pub gender: String,
    pub marital_status: String,
    pub email: String,
    pub contact_number: String,
    pub street: String,
    pub unit_number: String,
    pub purok: String,
    pub brgy: String,
    pub municipality: String,
    pub province: String,
}

/// Where a submission is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    /// `id == 0`: the profile has never been saved.
    Create,
    /// `id > 0`: full replacement of the existing profile.
    Update(ProfileId),
}

impl ProfileDraft {
    /// Empty draft for the add-profile form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-populated from an existing profile.
    pub fn from_profile(profile: &Profile) -> Self {
        let opt = |value: &Option<String>| value.clone().unwrap_or_default();
        let address = profile.address.clone().unwrap_or_default();
        Self {
            id: profile.id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            suffix: opt(&profile.suffix),
            birth_date: profile
                .birth_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            gender: profile.gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
            marital_status: profile
                .marital_status
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            email: opt(&profile.email),
            contact_number: opt(&profile.contact_number),
            street: opt(&address.street),
            unit_number: opt(&address.unit_number),
            purok: opt(&address.purok),
            brgy: opt(&address.brgy),
            municipality: opt(&address.municipality),
            province: opt(&address.province),
        }
    }

    /// Set a field by wire name. Returns `false` for unknown names.
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "suffix" => &mut self.suffix,
            "birth_date" => &mut self.birth_date,
            "gender" => &mut self.gender,
            "marital_status" => &mut self.marital_status,
            "email" => &mut self.email,
            "contact_number" => &mut self.contact_number,
            "street" => &mut self.street,
            "unit_number" => &mut self.unit_number,
            "purok" => &mut self.purok,
            "brgy" => &mut self.brgy,
            "municipality" => &mut self.municipality,
            "province" => &mut self.province,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Read a field by wire name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "suffix" => &self.suffix,
            "birth_date" => &self.birth_date,
            "gender" => &self.gender,
            "marital_status" => &self.marital_status,
            "email" => &self.email,
            "contact_number" => &self.contact_number,
            "street" => &self.street,
            "unit_number" => &self.unit_number,
            "purok" => &self.purok,
            "brgy" => &self.brgy,
            "municipality" => &self.municipality,
            "province" => &self.province,
            _ => return None,
        };
        Some(value)
    }

    /// Route by id: `0` means the profile was never saved.
    pub fn submit_action(&self) -> SubmitAction {
        if self.id > UNSAVED_ID {
            SubmitAction::Update(self.id)
        } else {
            SubmitAction::Create
        }
    }

    /// Validate and coerce the draft into the transmitted shape.
    ///
    /// Every emptied field becomes `None` (serialized as an explicit
    /// `null`), never `""`. `birth_date` is parsed to a date and travels
    /// as an ISO-8601 string; enums are parsed from their lowercase
    /// forms. The address collapses to `None` when all six of its fields
    /// are empty.
    pub fn normalize(&self) -> Result<ProfileInput, Vec<FieldError>> {
        let mut errors = validate::validate(self);

        let gender = match absent(&self.gender) {
            None => None,
            Some(value) => match Gender::parse(&value) {
                Some(gender) => Some(gender),
                None => {
                    errors.push(FieldError {
                        field: "gender",
                        message: "Please choose a valid gender",
                    });
                    None
                }
            },
        };

        let marital_status = match absent(&self.marital_status) {
            None => None,
            Some(value) => match MaritalStatus::parse(&value) {
                Some(status) => Some(status),
                None => {
                    errors.push(FieldError {
                        field: "marital_status",
                        message: "Please choose a valid marital status",
                    });
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // The birth_date rule already guaranteed this parses (or is empty).
        let birth_date = absent(&self.birth_date)
            .and_then(|value| NaiveDate::parse_from_str(&value, DATE_FORMAT).ok());

        let address = Address {
            street: absent(&self.street),
            unit_number: absent(&self.unit_number),
            purok: absent(&self.purok),
            brgy: absent(&self.brgy),
            municipality: absent(&self.municipality),
            province: absent(&self.province),
        };

        Ok(ProfileInput {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            suffix: absent(&self.suffix),
            birth_date,
            gender,
            marital_status,
            email: absent(&self.email),
            contact_number: absent(&self.contact_number),
            address: if address.is_empty() { None } else { Some(address) },
        })
    }
}

/// Empty-string coercion: `""` (or whitespace) becomes `None`.
fn absent(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// ProfileForm
// ---------------------------------------------------------------------------

/// Lifecycle of the form controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// No form open.
    #[default]
    Idle,
    /// The user is editing a draft.
    Editing,
    /// A write is in flight.
    Submitting,
    /// The last write was rejected; the draft is retained and editable.
    Failed,
}

/// Owns the editable state of one profile and drives submission.
#[derive(Debug, Default)]
pub struct ProfileForm {
    phase: FormPhase,
    draft: ProfileDraft,
    /// Field errors from the last validation pass.
    errors: Vec<FieldError>,
    /// Remote error from the last failed submission, if any.
    remote_error: Option<RemoteError>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn remote_error(&self) -> Option<&RemoteError> {
        self.remote_error.as_ref()
    }

    /// Open the form with an empty draft (add flow).
    pub fn open_new(&mut self) {
        self.draft = ProfileDraft::new();
        self.errors.clear();
        self.remote_error = None;
        self.phase = FormPhase::Editing;
    }

    /// Open the form pre-populated from an existing profile (edit flow).
    pub fn open(&mut self, profile: &Profile) {
        self.draft = ProfileDraft::from_profile(profile);
        self.errors.clear();
        self.remote_error = None;
        self.phase = FormPhase::Editing;
    }

    /// Edit one field. Clears a `Failed` phase back to `Editing` and
    /// re-evaluates the field's rule (blur-time validation); the result
    /// is also recorded in [`errors`](Self::errors).
    pub fn set_field(&mut self, field: &str, value: &str) -> Option<FieldError> {
        if !self.draft.set(field, value) {
            return None;
        }
        if self.phase == FormPhase::Failed {
            self.phase = FormPhase::Editing;
            self.remote_error = None;
        }
        let result = validate::validate_field(&self.draft, field);
        self.errors.retain(|e| e.field != field);
        if let Some(error) = result {
            self.errors.push(error);
        }
        result
    }

    /// Close without submitting: all in-progress edits are discarded.
    pub fn cancel(&mut self) {
        *self = Self::new();
    }

    /// Validate, normalize, and transmit the draft.
    ///
    /// Routes to `create` when the draft has no id yet, `update`
    /// otherwise. On success the form resets to `Idle` and the caller is
    /// expected to invalidate the profile cache. On any failure the
    /// entered values are kept.
    pub async fn submit(&mut self, store: &dyn ProfileStore) -> Result<Profile, SubmitError> {
        let input = match self.draft.normalize() {
            Ok(input) => input,
            Err(errors) => {
                self.errors = errors.clone();
                self.phase = FormPhase::Editing;
                return Err(SubmitError::Invalid(errors));
            }
        };

        self.phase = FormPhase::Submitting;
        let result = match self.draft.submit_action() {
            SubmitAction::Create => store.create(&input).await,
            SubmitAction::Update(id) => store.update(id, &input).await,
        };

        match result {
            Ok(profile) => {
                *self = Self::new();
                Ok(profile)
            }
            Err(error) => {
                self.phase = FormPhase::Failed;
                self.remote_error = Some(error.clone());
                Err(SubmitError::Remote(error))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
