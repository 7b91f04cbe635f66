//! Form sessions
//!
//! A [`FormSession`] owns everything a mounted form needs: the current raw
//! value, touched flag, and error of every field, plus the submission
//! status. It is a standalone state object with an explicit transition
//! API, independent of any rendering concern, so the whole lifecycle can
//! be unit-tested without a rendering harness.
//!
//! Lifecycle:
//!
//! ```text
//! Idle -> Validating -> Idle (with errors)            rejected locally
//!                    -> Submitting -> Success         gateway ack
//!                                  -> Failed          gateway failure
//! reset() returns to Idle with fields and errors cleared
//! ```
//!
//! Submission is split-phase: [`FormSession::begin_submit`] performs the
//! synchronous Validating transition and hands back the typed record,
//! [`FormSession::complete_submit`] applies the gateway's result. The
//! async [`FormSession::submit`] composes the two; callers that abandon a
//! session mid-submission simply drop the future.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use playground_core::{
    validate_field, validate_form, Error, RawValue, Record, Result, Schema, ValidationErrors,
};

use crate::error::SubmitError;
use crate::gateway::{Ack, SubmissionGateway};
use crate::store::RecordStore;

/// Submission status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// Per-field state owned by a session
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    raw: RawValue,
    touched: bool,
    error: Option<String>,
}

impl FieldState {
    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    /// Inline error message, if the field is currently invalid
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Result of the synchronous submit phase
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Validation passed; the session is Submitting and the typed record
    /// must be handed to a gateway, then back to `complete_submit`.
    Pending(Record),
    /// Validation failed; field errors are set and the session is back to
    /// Idle. No gateway call is made.
    Rejected(ValidationErrors),
    /// A submission is already in flight; nothing changed.
    InFlight,
}

/// Terminal outcome of a full submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Gateway acknowledged; the record was appended to the attached store
    Accepted { record: Record, ack: Ack },
    /// Local validation rejected the input; no gateway call was made
    Rejected(ValidationErrors),
    /// Gateway failed; shown as the session's form-level error
    Failed(SubmitError),
    /// Ignored: another submission was in flight
    Ignored,
}

/// Owned state machine for one mounted form
pub struct FormSession {
    schema: Arc<Schema>,
    fields: Vec<FieldState>,
    status: SessionStatus,
    form_error: Option<String>,
    attempted: bool,
    store: Option<Arc<RecordStore>>,
}

impl FormSession {
    /// Create a fresh session with every field at its declared default
    pub fn new(schema: Arc<Schema>) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|f| FieldState {
                raw: f.default().clone(),
                touched: false,
                error: None,
            })
            .collect();

        Self {
            schema,
            fields,
            status: SessionStatus::Idle,
            form_error: None,
            attempted: false,
            store: None,
        }
    }

    /// Attach the store successful records are appended to
    pub fn with_store(mut self, store: Arc<RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Form-level banner error from the last gateway failure
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Whether a submit has been attempted since the last reset
    pub fn attempted(&self) -> bool {
        self.attempted
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.schema.position(name).map(|i| &self.fields[i])
    }

    /// Whether every field currently carries no error
    pub fn is_clean(&self) -> bool {
        self.fields.iter().all(|f| f.error.is_none())
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Record a user edit to one field.
    ///
    /// Marks the field touched. Once a submit has been attempted the field
    /// is re-validated immediately; before the first attempt its error
    /// state is left untouched so pristine forms do not flash errors.
    /// Editing after a terminal state returns the session to Idle.
    pub fn set_field(&mut self, name: &str, raw: impl Into<RawValue>) -> Result<()> {
        let index = self
            .schema
            .position(name)
            .ok_or_else(|| Error::UnknownField {
                name: name.to_string(),
            })?;

        // The rendering layer disables inputs while a submission is in
        // flight; tolerate stray edits rather than corrupting the record
        // being submitted.
        if matches!(
            self.status,
            SessionStatus::Validating | SessionStatus::Submitting
        ) {
            warn!(form = self.schema.name(), field = name, "edit ignored during submission");
            return Ok(());
        }

        if matches!(self.status, SessionStatus::Success | SessionStatus::Failed) {
            self.status = SessionStatus::Idle;
            self.form_error = None;
        }

        let field = &mut self.fields[index];
        field.raw = raw.into();
        field.touched = true;

        if self.attempted {
            let descriptor = &self.schema.fields()[index];
            field.error = validate_field(descriptor, &field.raw).err();
        }

        debug!(form = self.schema.name(), field = name, "field updated");
        Ok(())
    }

    /// Begin a submit attempt: the synchronous Validating transition.
    ///
    /// At most one submission is in flight per session; calling this while
    /// Validating or Submitting changes nothing.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if matches!(
            self.status,
            SessionStatus::Validating | SessionStatus::Submitting
        ) {
            debug!(form = self.schema.name(), "submit ignored, already in flight");
            return SubmitStart::InFlight;
        }

        self.status = SessionStatus::Validating;
        self.attempted = true;
        self.form_error = None;

        let raw: HashMap<String, RawValue> = self
            .schema
            .fields()
            .iter()
            .zip(&self.fields)
            .map(|(d, f)| (d.name().to_string(), f.raw.clone()))
            .collect();

        match validate_form(&self.schema, &raw) {
            Err(errors) => {
                for (descriptor, field) in self.schema.fields().iter().zip(&mut self.fields) {
                    field.error = errors.get(descriptor.name()).map(str::to_string);
                }
                self.status = SessionStatus::Idle;
                info!(
                    form = self.schema.name(),
                    errors = errors.len(),
                    "submission rejected by validation"
                );
                SubmitStart::Rejected(errors)
            }
            Ok(values) => {
                for field in &mut self.fields {
                    field.error = None;
                }
                self.status = SessionStatus::Submitting;
                info!(form = self.schema.name(), "submitting");
                SubmitStart::Pending(Record::new(self.schema.name(), values))
            }
        }
    }

    /// Apply the gateway's answer to a pending submission.
    ///
    /// On success the record is appended to the attached store (if any)
    /// and the session moves to Success. On failure the error becomes the
    /// form-level banner and the session moves to Failed; field errors are
    /// not implied by a gateway failure.
    pub fn complete_submit(
        &mut self,
        record: Record,
        result: std::result::Result<Ack, SubmitError>,
    ) -> SubmitOutcome {
        debug_assert_eq!(self.status, SessionStatus::Submitting);

        match result {
            Ok(ack) => {
                if let Some(store) = &self.store {
                    store.append(record.clone());
                }
                self.status = SessionStatus::Success;
                info!(form = self.schema.name(), record = record.id(), "submission accepted");
                SubmitOutcome::Accepted { record, ack }
            }
            Err(err) => {
                self.form_error = Some(err.to_string());
                self.status = SessionStatus::Failed;
                warn!(form = self.schema.name(), error = %err, "submission failed");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Validate, submit through the gateway, and apply the result
    pub async fn submit(&mut self, gateway: &dyn SubmissionGateway) -> SubmitOutcome {
        match self.begin_submit() {
            SubmitStart::InFlight => SubmitOutcome::Ignored,
            SubmitStart::Rejected(errors) => SubmitOutcome::Rejected(errors),
            SubmitStart::Pending(record) => {
                let result = gateway.submit(&record).await;
                self.complete_submit(record, result)
            }
        }
    }

    /// Return to Idle with fields restored to defaults and errors cleared
    pub fn reset(&mut self) {
        for (descriptor, field) in self.schema.fields().iter().zip(&mut self.fields) {
            field.raw = descriptor.default().clone();
            field.touched = false;
            field.error = None;
        }
        self.status = SessionStatus::Idle;
        self.form_error = None;
        self.attempted = false;
        debug!(form = self.schema.name(), "session reset");
    }
}
