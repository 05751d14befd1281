use crate::client::{Notice, SubmitOutcome, ViewController};
use crate::config::EventConfig;
use crate::domain::{DocumentSink, RegistrationApi, RegistrationRecord};
use crate::render::{CodePattern, ExportedPass, PassExporter, PassView};
use crate::utils::error::{PassError, Result};

#[derive(Debug)]
pub struct FlowResult {
    pub record: RegistrationRecord,
    pub exported: ExportedPass,
    pub notices: Vec<Notice>,
}

/// Drives the attendee flow without a UI: landing, form, submit, pass, download.
pub struct RegistrationFlow<A: RegistrationApi, S: DocumentSink> {
    api: A,
    exporter: PassExporter<S>,
    event: EventConfig,
    pattern_seed: Option<u64>,
}

impl<A: RegistrationApi, S: DocumentSink> RegistrationFlow<A, S> {
    pub fn new(api: A, exporter: PassExporter<S>, event: EventConfig) -> Self {
        Self {
            api,
            exporter,
            event,
            pattern_seed: None,
        }
    }

    pub fn with_pattern_seed(mut self, seed: Option<u64>) -> Self {
        self.pattern_seed = seed;
        self
    }

    pub fn exporter(&self) -> &PassExporter<S> {
        &self.exporter
    }

    pub async fn run(&self, name: &str, email: &str) -> Result<FlowResult> {
        tracing::info!("Starting registration flow");
        let mut controller = ViewController::new();

        // Landing -> Form
        controller.open_registration()?;
        controller.form_mut().set_name(name);
        controller.form_mut().set_email(email);

        // Form -> Pass
        match controller.submit(&self.api).await? {
            SubmitOutcome::Registered { .. } => {}
            SubmitOutcome::Invalid(notice) => {
                return Err(PassError::ValidationError {
                    message: notice.description,
                })
            }
            SubmitOutcome::Failed(notice) => {
                return Err(PassError::RegistrationFailed {
                    message: notice.description,
                })
            }
            SubmitOutcome::Busy => return Err(PassError::SubmissionInProgress),
        }

        let record = controller
            .current_record()
            .cloned()
            .ok_or_else(|| PassError::InvalidTransition {
                action: "download".to_string(),
                screen: controller.screen().to_string(),
            })?;
        tracing::info!(pass_id = %record.pass_id, "Pass issued, generating document");

        let view = PassView::new(
            record.clone(),
            &self.event,
            CodePattern::for_seed(self.pattern_seed),
        );

        let exported = self.exporter.export(&view).await.map_err(|e| {
            tracing::error!("Failed to generate pass document: {}", e);
            e
        })?;

        Ok(FlowResult {
            record,
            exported,
            notices: controller.take_notices(),
        })
    }
}
