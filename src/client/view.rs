use crate::client::form::{RegistrationForm, SubmitOutcome};
use crate::client::notice::Notice;
use crate::domain::{RegistrationApi, RegistrationRecord};
use crate::utils::error::{PassError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Form,
    Pass,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Landing => "landing",
            Screen::Form => "form",
            Screen::Pass => "pass",
        };
        f.write_str(name)
    }
}

/// The active screen. A pass is only ever shown for the record carried by `Pass`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Landing,
    Form,
    Pass(RegistrationRecord),
}

impl ViewState {
    pub fn screen(&self) -> Screen {
        match self {
            ViewState::Landing => Screen::Landing,
            ViewState::Form => Screen::Form,
            ViewState::Pass(_) => Screen::Pass,
        }
    }
}

/// Routes attendee actions between the landing, form and pass screens.
#[derive(Debug)]
pub struct ViewController {
    state: ViewState,
    /// Last issued record, kept after leaving the pass screen until a new registration starts.
    retained: Option<RegistrationRecord>,
    form: RegistrationForm,
    notices: Vec<Notice>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            state: ViewState::Landing,
            retained: None,
            form: RegistrationForm::new(),
            notices: Vec::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    /// The record whose pass is on screen.
    pub fn current_record(&self) -> Option<&RegistrationRecord> {
        match &self.state {
            ViewState::Pass(record) => Some(record),
            _ => None,
        }
    }

    pub fn retained_record(&self) -> Option<&RegistrationRecord> {
        self.retained.as_ref()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// "Register Now" on the landing screen.
    pub fn open_registration(&mut self) -> Result<()> {
        match self.state {
            ViewState::Landing => {
                self.transition(ViewState::Form);
                Ok(())
            }
            _ => Err(self.invalid("open_registration")),
        }
    }

    /// Back from the form goes to landing; back from the pass goes to the form and keeps the record.
    pub fn back(&mut self) -> Result<()> {
        match &self.state {
            ViewState::Form => self.transition(ViewState::Landing),
            ViewState::Pass(record) => {
                self.retained = Some(record.clone());
                self.transition(ViewState::Form);
            }
            ViewState::Landing => return Err(self.invalid("back")),
        }
        Ok(())
    }

    /// Drops the record and starts over on an empty form.
    pub fn new_registration(&mut self) -> Result<()> {
        match self.state {
            ViewState::Pass(_) => {
                self.form = RegistrationForm::new();
                self.retained = None;
                self.transition(ViewState::Form);
                Ok(())
            }
            _ => Err(self.invalid("new_registration")),
        }
    }

    /// Submits the form. Advances to the pass screen only when the service accepted it.
    pub async fn submit(&mut self, api: &dyn RegistrationApi) -> Result<SubmitOutcome> {
        if self.screen() != Screen::Form {
            return Err(self.invalid("submit"));
        }

        let outcome = self.form.submit(api).await;

        if let SubmitOutcome::Registered { record, .. } = &outcome {
            self.retained = None;
            self.transition(ViewState::Pass(record.clone()));
        }
        if let Some(notice) = outcome.notice() {
            self.notices.push(notice.clone());
        }

        Ok(outcome)
    }

    fn transition(&mut self, next: ViewState) {
        tracing::debug!("Screen {} -> {}", self.state.screen(), next.screen());
        self.state = next;
    }

    fn invalid(&self, action: &str) -> PassError {
        PassError::InvalidTransition {
            action: action.to_string(),
            screen: self.screen().to_string(),
        }
    }
}
