//! Parokya core: profile domain model, field validation, and the form
//! controller.
//!
//! This crate is pure -- no I/O and no internal dependencies. The
//! network boundary is the [`ProfileStore`] trait, implemented by
//! `parokya-client` and faked in tests.
//!
//! - [`profile`] -- wire shapes ([`Profile`], [`ProfileInput`],
//!   [`Address`]) and enumerations.
//! - [`validate`] -- the per-field rule table.
//! - [`form`] -- [`ProfileDraft`], [`ProfileForm`], and submission
//!   routing.
//! - [`error`] -- [`FieldError`], [`RemoteError`], [`SubmitError`].

pub mod error;
pub mod form;
pub mod profile;
pub mod types;
pub mod validate;

pub use error::{FieldError, RemoteError, SubmitError};
pub use form::{FormPhase, ProfileDraft, ProfileForm, ProfileStore, SubmitAction};
pub use profile::{Address, Gender, MaritalStatus, Profile, ProfileInput};
pub use types::ProfileId;
