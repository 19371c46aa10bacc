//! Rider profile and session types
//!
//! These are the validated, typed shapes that cross the wire. Raw form
//! input lives in [`crate::validation`] and converts into these once it
//! passes.

use crate::locations::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Login credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Ten-digit phone number
    pub phone_number: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(phone_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self { phone_number: phone_number.into(), password: password.into() }
    }
}

// Keeps passwords out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("phone_number", &self.phone_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sex as recorded on the rider profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

impl Sex {
    /// Every option, in picker order
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Wire and display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Sex::Male),
            "Female" => Ok(Sex::Female),
            _ => Err(format!("Unknown sex: {}", s)),
        }
    }
}

/// A validated registration, ready to submit
///
/// Produced by [`crate::validation::RegistrationForm::validate_into`].
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    /// Full name
    pub full_name: String,
    /// Ten-digit phone number
    pub phone_number: String,
    /// Sex
    pub sex: Sex,
    /// Chosen password
    pub password: String,
    /// Employer-issued identifier
    pub workplace_id: Option<String>,
    /// Employer or organization name
    pub organization: Option<String>,
    /// Usual pickup stop
    pub location_start: Location,
    /// Usual drop-off stop
    pub location_end: Location,
    /// Local path of the Fiyda ID front photo
    pub fiyda_id_image: PathBuf,
    /// Local path of the Fiyda ID back photo
    pub fiyda_id_image_back: PathBuf,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("phone_number", &self.phone_number)
            .field("sex", &self.sex)
            .field("password", &"<redacted>")
            .field("workplace_id", &self.workplace_id)
            .field("organization", &self.organization)
            .field("location_start", &self.location_start)
            .field("location_end", &self.location_end)
            .field("fiyda_id_image", &self.fiyda_id_image)
            .field("fiyda_id_image_back", &self.fiyda_id_image_back)
            .finish()
    }
}

/// The logged-in rider, as returned by the login endpoint
///
/// This is the record the session store persists. `id`, `full_name` and
/// `phone_number` are required; a login response without them is rejected.
/// The id is read from `_id` or `id` (both may be present). Optional picker
/// fields that are empty or unknown decode as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionUserWire")]
pub struct SessionUser {
    /// Server-side identifier
    pub id: String,

    /// Full name
    pub full_name: String,

    /// Ten-digit phone number
    pub phone_number: String,

    /// Sex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,

    /// Usual pickup stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_start: Option<Location>,

    /// Usual drop-off stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_end: Option<Location>,

    /// Employer-issued identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workplace_id: Option<String>,

    /// Employer or organization name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Bearer token, when the server issues one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

// Shape accepted on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionUserWire {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    full_name: String,
    phone_number: String,
    #[serde(default)]
    sex: Option<serde_json::Value>,
    #[serde(default)]
    location_start: Option<serde_json::Value>,
    #[serde(default)]
    location_end: Option<serde_json::Value>,
    #[serde(default)]
    workplace_id: Option<String>,
    #[serde(default)]
    organization: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

fn picked<T: FromStr>(value: Option<serde_json::Value>) -> Option<T> {
    value.as_ref().and_then(serde_json::Value::as_str).and_then(|s| s.parse().ok())
}

impl TryFrom<SessionUserWire> for SessionUser {
    type Error = String;

    fn try_from(wire: SessionUserWire) -> Result<Self, Self::Error> {
        let id = wire
            .mongo_id
            .or(wire.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "missing field `_id`".to_string())?;

        Ok(Self {
            id,
            full_name: wire.full_name,
            phone_number: wire.phone_number,
            sex: picked(wire.sex),
            location_start: picked(wire.location_start),
            location_end: picked(wire.location_end),
            workplace_id: wire.workplace_id,
            organization: wire.organization,
            token: wire.token,
        })
    }
}

/// Confirmation returned by the registration endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    /// Server message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Anything else the server sent back
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
