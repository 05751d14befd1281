use crate::client::notice::Notice;
use crate::domain::{RegistrationApi, RegistrationRecord, RegistrationRequest};

const SUBMIT_LABEL: &str = "Generate My Pass";
const SUBMITTING_LABEL: &str = "Generating Pass...";

/// Result of pressing the submit control.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; no request was sent.
    Invalid(Notice),
    /// A submission is already in flight; nothing was sent.
    Busy,
    /// The request was sent and failed.
    Failed(Notice),
    Registered {
        record: RegistrationRecord,
        notice: Notice,
    },
}

impl SubmitOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            SubmitOutcome::Invalid(notice) | SubmitOutcome::Failed(notice) => Some(notice),
            SubmitOutcome::Registered { notice, .. } => Some(notice),
            SubmitOutcome::Busy => None,
        }
    }
}

/// Name and email as typed, plus the submitting flag that disables the submit control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    name: String,
    email: String,
    submitting: bool,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            submitting: false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Local checks, in order: both fields present after trimming, then an `@` in the email.
    pub fn validate(&self) -> Result<RegistrationRequest, Notice> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(Notice::missing_information());
        }

        if !self.email.contains('@') {
            return Err(Notice::invalid_email());
        }

        Ok(RegistrationRequest {
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }

    /// Validates, then sends exactly one registration request. Never retries.
    pub async fn submit(&mut self, api: &dyn RegistrationApi) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Busy;
        }

        let request = match self.validate() {
            Ok(request) => request,
            Err(notice) => {
                tracing::debug!("Registration form rejected locally: {}", notice.title);
                return SubmitOutcome::Invalid(notice);
            }
        };

        let guard = SubmittingGuard::engage(&mut self.submitting);
        let result = api.register(&request).await;
        drop(guard);

        match result {
            Ok(record) => {
                tracing::info!(pass_id = %record.pass_id, "Registration accepted");
                SubmitOutcome::Registered {
                    record,
                    notice: Notice::registration_successful(),
                }
            }
            Err(e) => {
                tracing::error!("Registration failed: {}", e);
                SubmitOutcome::Failed(Notice::registration_failed())
            }
        }
    }
}

/// Clears the submitting flag even if the submit future is dropped mid-request.
struct SubmittingGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> SubmittingGuard<'a> {
    fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
