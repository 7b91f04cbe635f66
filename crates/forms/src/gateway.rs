//! Submission gateways
//!
//! The one asynchronous boundary in the pipeline. A gateway accepts a
//! fully validated record and acknowledges it or fails with a
//! [`SubmitError`]; the session renders its Submitting state for the
//! duration of the call. Gateways never retry — a failed submission
//! requires explicit user re-submission.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

use playground_core::Record;

use crate::auth::CredentialVerifier;
use crate::error::SubmitError;

/// Acknowledgement of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// Id of the record the backend accepted
    pub record_id: String,
}

/// Simulated network latency applied before a gateway answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    /// Answer immediately (deterministic tests)
    None,
    /// Fixed delay
    Fixed(Duration),
    /// Fixed base plus a random jitter drawn per call
    Jittered { base: Duration, jitter: Duration },
}

impl Latency {
    pub fn from_millis(latency_ms: u64, jitter_ms: u64) -> Self {
        match (latency_ms, jitter_ms) {
            (0, 0) => Self::None,
            (ms, 0) => Self::Fixed(Duration::from_millis(ms)),
            (ms, jitter) => Self::Jittered {
                base: Duration::from_millis(ms),
                jitter: Duration::from_millis(jitter),
            },
        }
    }

    async fn wait(&self) {
        let delay = match self {
            Self::None => return,
            Self::Fixed(d) => *d,
            Self::Jittered { base, jitter } => {
                let extra = rand::thread_rng().gen_range(0..=jitter.as_millis() as u64);
                base.saturating_add(Duration::from_millis(extra))
            }
        };
        tokio::time::sleep(delay).await;
    }
}

/// The gateway contract: submit a record, get an ack or a failure
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, record: &Record) -> Result<Ack, SubmitError>;
}

/// Gateway that acknowledges every record after the configured latency.
///
/// An optional failure rate makes a random fraction of calls fail with a
/// server error, for exercising the Failed path in demos.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    latency: Latency,
    fail_rate: f32,
}

impl SimulatedGateway {
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            fail_rate: 0.0,
        }
    }

    pub fn with_fail_rate(mut self, fail_rate: f32) -> Self {
        self.fail_rate = fail_rate.clamp(0.0, 1.0);
        self
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn submit(&self, record: &Record) -> Result<Ack, SubmitError> {
        self.latency.wait().await;

        if self.fail_rate > 0.0 && rand::thread_rng().gen::<f32>() < self.fail_rate {
            debug!(form = record.form(), "simulated server failure");
            return Err(SubmitError::Server("simulated outage".to_string()));
        }

        Ok(Ack {
            record_id: record.id().to_string(),
        })
    }
}

/// Gateway that checks a record's credential fields before acknowledging.
///
/// Used by the login form: the record's username/password values are
/// handed to the [`CredentialVerifier`]; a mismatch fails the submission
/// with `InvalidCredentials`.
#[derive(Debug, Clone)]
pub struct CredentialGateway {
    latency: Latency,
    verifier: CredentialVerifier,
    username_field: String,
    password_field: String,
}

impl CredentialGateway {
    pub fn new(verifier: CredentialVerifier, latency: Latency) -> Self {
        Self {
            latency,
            verifier,
            username_field: "username".to_string(),
            password_field: "password".to_string(),
        }
    }

    /// Override which record fields carry the credentials
    pub fn with_fields(mut self, username_field: &str, password_field: &str) -> Self {
        self.username_field = username_field.to_string();
        self.password_field = password_field.to_string();
        self
    }

    fn text_field<'a>(&self, record: &'a Record, name: &str) -> &'a str {
        record.get(name).and_then(|v| v.as_text()).unwrap_or("")
    }
}

#[async_trait]
impl SubmissionGateway for CredentialGateway {
    async fn submit(&self, record: &Record) -> Result<Ack, SubmitError> {
        self.latency.wait().await;

        let username = self.text_field(record, &self.username_field);
        let password = self.text_field(record, &self.password_field);
        let user = self.verifier.verify(username, password)?;
        debug!(username = %user.username, "credentials accepted");

        Ok(Ack {
            record_id: record.id().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playground_core::FieldValue;

    fn login_record(username: &str, password: &str) -> Record {
        Record::new(
            "login",
            vec![
                ("username".to_string(), FieldValue::Text(username.into())),
                ("password".to_string(), FieldValue::Text(password.into())),
                ("remember".to_string(), FieldValue::Bool(false)),
            ],
        )
    }

    #[tokio::test]
    async fn test_simulated_gateway_acks() {
        let gateway = SimulatedGateway::new(Latency::None);
        let record = login_record("admin", "test");
        let ack = gateway.submit(&record).await.unwrap();
        assert_eq!(ack.record_id, record.id());
    }

    #[tokio::test]
    async fn test_forced_failure() {
        let gateway = SimulatedGateway::new(Latency::None).with_fail_rate(1.0);
        let record = login_record("admin", "test");
        assert!(matches!(
            gateway.submit(&record).await,
            Err(SubmitError::Server(_))
        ));
    }

    #[tokio::test]
    async fn test_credential_gateway() {
        let gateway = CredentialGateway::new(CredentialVerifier::demo(), Latency::None);

        assert!(gateway.submit(&login_record("admin", "test")).await.is_ok());
        assert_eq!(
            gateway.submit(&login_record("admin", "wrong")).await,
            Err(SubmitError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_fixed_latency_is_observable() {
        let gateway =
            SimulatedGateway::new(Latency::Fixed(Duration::from_millis(50)));
        let record = login_record("admin", "test");

        let start = std::time::Instant::now();
        gateway.submit(&record).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
