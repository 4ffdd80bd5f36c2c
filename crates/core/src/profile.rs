//! Profile domain model: wire shapes shared by the API client, the
//! cache, and the form layer.
//!
//! Two shapes exist for the same entity. [`Profile`] is what the backend
//! returns (server-assigned id and timestamps included); [`ProfileInput`]
//! is what the client transmits on create/update (no id, no timestamps,
//! absent fields sent as explicit `null`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ProfileId;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Gender as recorded on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All variants, in display order. Used to build selection prompts.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// The lowercase wire form (`"male"` / `"female"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Parse the lowercase wire form. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Marital status as recorded on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Separated,
    Widowed,
}

impl MaritalStatus {
    /// All variants, in display order.
    pub const ALL: [MaritalStatus; 4] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Separated,
        MaritalStatus::Widowed,
    ];

    /// The lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Separated => "separated",
            MaritalStatus::Widowed => "widowed",
        }
    }

    /// Parse the lowercase wire form. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(MaritalStatus::Single),
            "married" => Some(MaritalStatus::Married),
            "separated" => Some(MaritalStatus::Separated),
            "widowed" => Some(MaritalStatus::Widowed),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Embedded address value. Not independently identified; every field is
/// optional and absent fields render as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brgy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
}

impl Address {
    /// `true` when every field is absent.
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.unit_number.is_none()
            && self.purok.is_none()
            && self.brgy.is_none()
            && self.municipality.is_none()
            && self.province.is_none()
    }

    /// Single-line rendering: populated fields joined with `", "`, in
    /// unit / street / purok / barangay / municipality / province order.
    /// Empty string when no field is populated.
    pub fn display_line(&self) -> String {
        [
            &self.unit_number,
            &self.street,
            &self.purok,
            &self.brgy,
            &self.municipality,
            &self.province,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

// ---------------------------------------------------------------------------
// Profile (read shape)
// ---------------------------------------------------------------------------

/// A profile as returned by the backend.
///
/// `id`, `created_at` and `updated_at` are server-assigned and read-only
/// from the client's perspective. Instances in the cached collection are
/// direct reflections of the last successful fetch; the client never
/// mutates them locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// `"First Last"` or `"First Last Suffix"` when a suffix is present.
    pub fn full_name(&self) -> String {
        match self.suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => {
                format!("{} {} {}", self.first_name, self.last_name, suffix)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

// ---------------------------------------------------------------------------
// ProfileInput (write shape)
// ---------------------------------------------------------------------------

/// The client-transmitted shape for create and update calls.
///
/// Absent fields serialize as explicit `null` -- an update is a full
/// replacement, so `null` is the marker that clears a field on the
/// server. The normalization step in the form layer guarantees that an
/// emptied field arrives here as `None`, never as `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_wire_form_round_trip() {
        for gender in Gender::ALL {
            let json = serde_json::to_string(&gender).unwrap();
            assert_eq!(json, format!("\"{}\"", gender.as_str()));
            let back: Gender = serde_json::from_str(&json).unwrap();
            assert_eq!(back, gender);
            assert_eq!(Gender::parse(gender.as_str()), Some(gender));
        }
        assert_eq!(Gender::parse("Male"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn test_marital_status_wire_form_round_trip() {
        for status in MaritalStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: MaritalStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
        assert_eq!(MaritalStatus::parse("divorced"), None);
    }

    #[test]
    fn test_address_display_line_ordering() {
        let address = Address {
            street: Some("123 Mockingbird Lane".into()),
            unit_number: Some("Unit #1".into()),
            purok: None,
            brgy: Some("Rizal".into()),
            municipality: Some("Santiago City".into()),
            province: Some("Isabela".into()),
        };
        assert_eq!(
            address.display_line(),
            "Unit #1, 123 Mockingbird Lane, Rizal, Santiago City, Isabela"
        );
    }

    #[test]
    fn test_address_display_line_empty() {
        assert_eq!(Address::default().display_line(), "");
        assert!(Address::default().is_empty());
    }

    #[test]
    fn test_profile_deserializes_with_absent_optionals() {
        let json = serde_json::json!({
            "id": 1,
            "first_name": "John",
            "last_name": "Doe",
            "created_at": "2023-04-01T08:00:00Z",
            "updated_at": "2023-04-01T08:00:00Z",
        });
        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.id, 1);
        assert!(profile.suffix.is_none());
        assert!(profile.birth_date.is_none());
        assert!(profile.address.is_none());
        assert_eq!(profile.full_name(), "John Doe");
    }

    #[test]
    fn test_full_name_includes_suffix() {
        let json = serde_json::json!({
            "id": 2,
            "first_name": "Juan",
            "last_name": "dela Cruz",
            "suffix": "Jr.",
            "created_at": "2023-04-01T08:00:00Z",
            "updated_at": "2023-04-01T08:00:00Z",
        });
        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.full_name(), "Juan dela Cruz Jr.");
    }

    #[test]
    fn test_input_transmits_absent_fields_as_null() {
        let input = ProfileInput {
            first_name: "John".into(),
            last_name: "Doe".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["email"], serde_json::Value::Null);
        assert_eq!(value["address"], serde_json::Value::Null);
        // An absent field is null on the wire, never the empty string.
        assert_ne!(value["email"], "");
    }

    #[test]
    fn test_input_serializes_birth_date_as_iso_string() {
        let input = ProfileInput {
            first_name: "John".into(),
            last_name: "Doe".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 15),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["birth_date"], "1990-01-15");
    }
}
