//! SubmitPredictionHandler - Runs one submission from the form to a result.
//!
//! 1. Validate the final step and issue a request id (`Form -> Loading`)
//! 2. Call the gateway without holding the session lock
//! 3. Apply the outcome only if the session is still waiting on that id

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::foundation::RequestId;
use crate::domain::form::{ErrorNotice, FormError, FormSession};
use crate::domain::prediction::PredictionResult;
use crate::ports::PredictionGateway;

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Result applied; the session is on the result screen.
    Completed(PredictionResult),
    /// Failure applied; the session is back on the form with this notice.
    Failed(ErrorNotice),
    /// The session moved on (reset or newer request) before the reply came.
    Discarded(RequestId),
}

/// Handler for submitting the form.
pub struct SubmitPredictionHandler {
    gateway: Arc<dyn PredictionGateway>,
    session: Arc<Mutex<FormSession>>,
}

impl SubmitPredictionHandler {
    pub fn new(gateway: Arc<dyn PredictionGateway>, session: Arc<Mutex<FormSession>>) -> Self {
        Self { gateway, session }
    }

    /// # Errors
    ///
    /// Returns the session's `FormError` when submission cannot start
    /// (wrong screen, not on the final step, missing fields, request in flight).
    /// Gateway failures are not errors here; they become `Failed`.
    pub async fn handle(&self) -> Result<SubmissionOutcome, FormError> {
        let ticket = self.session.lock().await.begin_submission()?;
        let mode = ticket.request.mode();
        tracing::info!(request_id = %ticket.id, %mode, "prediction submitted");

        let reply = self.gateway.predict(&ticket.request).await;

        let mut session = self.session.lock().await;
        let applied = match reply {
            Ok(result) => session
                .complete_submission(ticket.id, result.clone())
                .map(|()| SubmissionOutcome::Completed(result)),
            Err(err) => {
                tracing::error!(request_id = %ticket.id, code = %err.code(), error = %err, "prediction failed");
                let notice = ErrorNotice::from_error(&err);
                session
                    .fail_submission(ticket.id, notice.clone())
                    .map(|()| SubmissionOutcome::Failed(notice))
            }
        };

        match applied {
            Ok(outcome) => {
                if let SubmissionOutcome::Completed(_) = outcome {
                    tracing::info!(request_id = %ticket.id, %mode, "prediction applied");
                }
                Ok(outcome)
            }
            Err(FormError::StaleResponse(id)) => {
                tracing::warn!(request_id = %id, "discarding response for a request the session no longer awaits");
                Ok(SubmissionOutcome::Discarded(id))
            }
            Err(other) => Err(other),
        }
    }
}
