//! Login and registration form validation
//!
//! Forms hold raw field values exactly as typed or picked. Validation is
//! declarative (`validator` derive) and checks every field independently,
//! so a single pass can report a message for each offending field.
//!
//! When a field breaks more than one rule, the "required" message wins;
//! otherwise the first rule declared on the field is reported.
//!
//! Minimum lengths count characters (Unicode scalar values), so an emoji or
//! an Amharic letter counts once however it is encoded.

use crate::locations::Location;
use crate::profile::{Credentials, Registration, Sex};
use crate::routes::{describe_route, RouteDescription};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use validator::{Validate, ValidationError, ValidationErrors};

const REQUIRED: &str = "required";

static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone number pattern is valid"));

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(failure(REQUIRED, "Required"));
    }
    Ok(())
}

fn sex_option(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    value
        .parse::<Sex>()
        .map(|_| ())
        .map_err(|_| failure("one_of", "Invalid sex"))
}

fn location_option(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    value
        .parse::<Location>()
        .map(|_| ())
        .map_err(|_| failure("one_of", "Invalid location"))
}

fn front_image(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(failure(REQUIRED, "Front image is required"));
    }
    Ok(())
}

fn back_image(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(failure(REQUIRED, "Back image is required"));
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

// =============================================================================
// Errors
// =============================================================================

/// Per-field validation messages, one per offending field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
}

impl FormErrors {
    /// Errors with a single offending field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        Self { fields }
    }

    /// Message for a field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Whether the field failed
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over (field, message) in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of offending fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field failed
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let chosen = errs
                    .iter()
                    .find(|e| e.code == REQUIRED)
                    .or_else(|| errs.first())?;
                let message = chosen
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                Some((field.to_string(), message))
            })
            .collect();

        Self { fields }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl std::error::Error for FormErrors {}

// =============================================================================
// Login
// =============================================================================

/// Values of the login form
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    /// Phone number field
    #[validate(
        custom(function = "required"),
        regex(path = *PHONE_NUMBER, message = "Invalid phone number")
    )]
    pub phone_number: String,

    /// Password field
    #[validate(custom(function = "required"), length(min = 6, message = "Too Short!"))]
    pub password: String,
}

impl LoginForm {
    /// Create a filled-in form
    pub fn new(phone_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self { phone_number: phone_number.into(), password: password.into() }
    }

    /// Validate every field
    pub fn check(&self) -> Result<(), FormErrors> {
        self.validate().map_err(FormErrors::from)
    }

    /// Validate and produce the credentials to submit
    pub fn validate_into(&self) -> Result<Credentials, FormErrors> {
        self.check()?;
        Ok(Credentials::new(self.phone_number.clone(), self.password.clone()))
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Values of the registration form
///
/// Pickers submit their selected name or an empty string; image fields hold
/// the local path of the picked photo or an empty string.
#[derive(Debug, Clone, Default, Validate)]
pub struct RegistrationForm {
    /// Full name field
    #[validate(custom(function = "required"), length(min = 3, message = "Too Short!"))]
    pub full_name: String,

    /// Phone number field
    #[validate(
        custom(function = "required"),
        regex(path = *PHONE_NUMBER, message = "Invalid phone number")
    )]
    pub phone_number: String,

    /// Sex picker
    #[validate(custom(function = "sex_option"))]
    pub sex: String,

    /// Password field
    #[validate(custom(function = "required"), length(min = 6, message = "Too Short!"))]
    pub password: String,

    /// Password confirmation field
    #[validate(
        custom(function = "required"),
        must_match(other = "password", message = "Passwords must match")
    )]
    pub confirm_password: String,

    /// Workplace ID field (optional)
    pub workplace_id: String,

    /// Organization field (optional)
    pub organization: String,

    /// Start location picker
    #[validate(custom(function = "location_option"))]
    pub location_start: String,

    /// End location picker
    #[validate(custom(function = "location_option"))]
    pub location_end: String,

    /// Fiyda ID front photo
    #[validate(custom(function = "front_image"))]
    pub fiyda_id_image: String,

    /// Fiyda ID back photo
    #[validate(custom(function = "back_image"))]
    pub fiyda_id_image_back: String,
}

impl RegistrationForm {
    /// Validate every field
    pub fn check(&self) -> Result<(), FormErrors> {
        self.validate().map_err(FormErrors::from)
    }

    /// Description of the trip between the picked stops
    pub fn route_description(&self) -> RouteDescription {
        describe_route(&self.location_start, &self.location_end)
    }

    /// Validate and produce the typed registration to submit
    pub fn validate_into(&self) -> Result<Registration, FormErrors> {
        self.check()?;

        let sex = self
            .sex
            .parse::<Sex>()
            .map_err(|_| FormErrors::single("sex", "Invalid sex"))?;
        let location_start = self
            .location_start
            .parse::<Location>()
            .map_err(|_| FormErrors::single("location_start", "Invalid location"))?;
        let location_end = self
            .location_end
            .parse::<Location>()
            .map_err(|_| FormErrors::single("location_end", "Invalid location"))?;

        Ok(Registration {
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
            sex,
            password: self.password.clone(),
            workplace_id: non_empty(&self.workplace_id),
            organization: non_empty(&self.organization),
            location_start,
            location_end,
            fiyda_id_image: PathBuf::from(&self.fiyda_id_image),
            fiyda_id_image_back: PathBuf::from(&self.fiyda_id_image_back),
        })
    }
}
