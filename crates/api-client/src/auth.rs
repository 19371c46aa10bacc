//! Login and registration endpoints
//!
//! - `POST /api/mobile/login` takes `{phoneNumber, password}` as JSON and
//!   answers with the rider record.
//! - `POST /api/mobile/register` takes a multipart form with the profile
//!   fields and both Fiyda ID photos.

use crate::http::{ApiClient, ApiError, ApiRequest};
use app_core::{Credentials, Registration, RegistrationReceipt, SessionUser};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::Path;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Login endpoint path
pub const LOGIN_PATH: &str = "/api/mobile/login";

/// Registration endpoint path
pub const REGISTER_PATH: &str = "/api/mobile/register";

/// Multipart field and file name of the Fiyda ID front photo
pub const FRONT_IMAGE_FIELD: &str = "fiydaIdImage";

/// Multipart field and file name of the Fiyda ID back photo
pub const BACK_IMAGE_FIELD: &str = "fiydaIdImageback";

const IMAGE_MIME: &str = "image/jpeg";

/// Authentication operations of the mobile API
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for the rider record
    async fn login(&self, credentials: &Credentials) -> Result<SessionUser, ApiError>;

    /// Submit a new rider registration
    async fn register(&self, registration: &Registration) -> Result<RegistrationReceipt, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<SessionUser, ApiError> {
        tracing::debug!(phone_number = %credentials.phone_number, "logging in");

        let request = ApiRequest::post(LOGIN_PATH)
            .json_body(credentials)
            .map_err(|e| ApiError::new(0, "SerializeError", e.to_string()))?;

        let response = self.send::<SessionUser>(request).await?;
        tracing::info!(user_id = %response.data.id, "login succeeded");
        Ok(response.data)
    }

    async fn register(&self, registration: &Registration) -> Result<RegistrationReceipt, ApiError> {
        tracing::debug!(phone_number = %registration.phone_number, "registering rider");

        let form = registration_form(registration).await?;
        let request = ApiRequest::post(REGISTER_PATH).multipart(form);

        let response = self.send::<RegistrationReceipt>(request).await?;
        tracing::info!(status = response.status, "registration accepted");
        Ok(response.data)
    }
}

/// Build the multipart body for a registration
///
/// Optional text fields are only sent when present. Photos are read from
/// their local paths and sent as JPEG file parts.
pub async fn registration_form(registration: &Registration) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("fullName", registration.full_name.clone())
        .text("phoneNumber", registration.phone_number.clone())
        .text("sex", registration.sex.as_str())
        .text("password", registration.password.clone())
        .text("locationStart", registration.location_start.name())
        .text("locationEnd", registration.location_end.name());

    if let Some(workplace_id) = &registration.workplace_id {
        form = form.text("workplaceId", workplace_id.clone());
    }

    if let Some(organization) = &registration.organization {
        form = form.text("organization", organization.clone());
    }

    let front = image_part(&registration.fiyda_id_image, FRONT_IMAGE_FIELD).await?;
    let back = image_part(&registration.fiyda_id_image_back, BACK_IMAGE_FIELD).await?;

    Ok(form.part(FRONT_IMAGE_FIELD, front).part(BACK_IMAGE_FIELD, back))
}

async fn image_part(path: &Path, name: &str) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        ApiError::new(0, "ImageRead", format!("Failed to read {}: {}", path.display(), e))
    })?;

    Part::bytes(bytes)
        .file_name(format!("{}.jpg", name))
        .mime_str(IMAGE_MIME)
        .map_err(|e| ApiError::new(0, "ImageRead", e.to_string()))
}
