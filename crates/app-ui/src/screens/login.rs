use super::{StatusMessage, SubmitOutcome, LOGIN_FAILURE, LOGIN_SUCCESS};
use crate::navigation::{NavigationStack, Route};
use app_core::{FormErrors, LoginForm};
use app_state::{AuthSession, Submission};

/// Login screen
pub struct LoginScreen {
    session: AuthSession,
    submission: Submission,
    /// Field values as typed
    pub form: LoginForm,
    errors: FormErrors,
    message: Option<StatusMessage>,
}

impl LoginScreen {
    /// Create an empty login screen backed by a session
    pub fn new(session: AuthSession) -> Self {
        Self {
            session,
            submission: Submission::new(),
            form: LoginForm::default(),
            errors: FormErrors::default(),
            message: None,
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

    /// Whether a login is in flight
    pub fn is_busy(&self) -> bool {
        self.submission.is_pending()
    }

    /// Submit the form
    ///
    /// On success the rider is persisted by the session and Home is pushed.
    pub async fn submit(&mut self, nav: &mut NavigationStack) -> SubmitOutcome {
        let credentials = match self.form.validate_into() {
            Ok(credentials) => credentials,
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

        let result = self.session.login(&credentials).await;
        ticket.settle(&result);

        match result {
            Ok(_) => {
                self.message = Some(StatusMessage::success(LOGIN_SUCCESS));
                nav.push(Route::Home);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!("Login failed: {}", e);
                self.message = Some(StatusMessage::error(LOGIN_FAILURE));
                SubmitOutcome::Failed
            }
        }
    }

    /// "Sign Up" link pressed
    pub fn sign_up(&self, nav: &mut NavigationStack) {
        nav.push(Route::Register);
    }
}
