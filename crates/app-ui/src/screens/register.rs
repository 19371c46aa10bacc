use super::{StatusMessage, SubmitOutcome, REGISTER_FAILURE, REGISTER_SUCCESS};
use crate::navigation::{NavigationStack, PendingNavigation, Route};
use api_client::AuthApi;
use app_core::{FormErrors, RegistrationForm};
use app_state::Submission;
use std::sync::Arc;
use std::time::Duration;

/// Delay between a successful registration and the redirect to login
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Registration screen
pub struct RegisterScreen {
    api: Arc<dyn AuthApi>,
    submission: Submission,
    /// Field values as typed or picked
    pub form: RegistrationForm,
    errors: FormErrors,
    message: Option<StatusMessage>,
    pending: Option<PendingNavigation>,
}

impl RegisterScreen {
    /// Create an empty registration screen
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            submission: Submission::new(),
            form: RegistrationForm::default(),
            errors: FormErrors::default(),
            message: None,
            pending: None,
        }
    }

    /// Per-field validation messages from the last submit
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Banner from the last submit
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Busy flag of the submit button
    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    /// Whether a registration is in flight
    pub fn is_busy(&self) -> bool {
        self.submission.is_pending()
    }

    /// Trip text for the picked start and end stops
    pub fn route_preview(&self) -> &'static str {
        self.form.route_description().text()
    }

    /// Submit the form
    ///
    /// On success a redirect to Login is scheduled; see
    /// [`take_pending_navigation`](Self::take_pending_navigation). Sending
    /// again drops a redirect that was never taken.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let registration = match self.form.validate_into() {
            Ok(registration) => registration,
            Err(errors) => {
                self.errors = errors;
                return SubmitOutcome::Invalid;
            }
        };
        self.errors = FormErrors::default();

        let Ok(ticket) = self.submission.begin() else {
            return SubmitOutcome::Busy;
        };
        self.message = None;
        self.pending = None;

        let result = self.api.register(&registration).await;
        ticket.settle(&result);

        match result {
            Ok(receipt) => {
                tracing::info!(message = ?receipt.message, "registration succeeded");
                self.message = Some(StatusMessage::success(REGISTER_SUCCESS));
                self.pending = Some(PendingNavigation::new(Route::Login, REDIRECT_DELAY));
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!("Registration Error: {}", e);
                self.message = Some(StatusMessage::error(REGISTER_FAILURE));
                SubmitOutcome::Failed
            }
        }
    }

    /// Redirect scheduled by the last successful submit
    pub fn take_pending_navigation(&mut self) -> Option<PendingNavigation> {
        self.pending.take()
    }

    /// Wait out the scheduled redirect and perform it
    ///
    /// Returns false when nothing was scheduled.
    pub async fn complete_redirect(&mut self, nav: &mut NavigationStack) -> bool {
        match self.take_pending_navigation() {
            Some(pending) => {
                pending.perform(nav).await;
                true
            }
            None => false,
        }
    }

    /// "Login" link pressed
    pub fn log_in(&self, nav: &mut NavigationStack) {
        nav.push(Route::Login);
    }
}
