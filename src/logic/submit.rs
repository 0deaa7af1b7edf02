// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Submission hand-off: payload snapshot, cancellable transport, simulated transfer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SubmissionSettings;
use crate::error::SubmitError;
use crate::models::candidate::CandidateFile;
use crate::models::form::FormSnapshot;

/// Shared flag a running transfer polls between steps.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything handed to the transport for one submission.
#[derive(Clone, Debug)]
pub struct SubmissionPayload {
    pub id: Uuid,
    pub files: Vec<CandidateFile>,
    pub form: FormSnapshot,
    pub estimate_text: String,
    pub created_at: OffsetDateTime,
}

impl SubmissionPayload {
    pub fn new(files: Vec<CandidateFile>, form: FormSnapshot, estimate_text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            files,
            form,
            estimate_text,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }
}

/// Proof of a completed hand-off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub file_count: usize,
    pub total_size_bytes: u64,
    pub completed_at: OffsetDateTime,
}

/// Moves a payload somewhere; reports progress in percent and honours cancellation.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        payload: &SubmissionPayload,
        progress: &mut dyn FnMut(u8),
        cancel: &CancelToken,
    ) -> Result<SubmissionReceipt, SubmitError>;
}

/// Stand-in transfer that advances in fixed steps with a delay between them.
#[derive(Clone, Debug)]
pub struct SimulatedTransport {
    settings: SubmissionSettings,
}

impl SimulatedTransport {
    pub fn new(settings: SubmissionSettings) -> Self {
        Self { settings }
    }
}

impl Transport for SimulatedTransport {
    fn send(
        &self,
        payload: &SubmissionPayload,
        progress: &mut dyn FnMut(u8),
        cancel: &CancelToken,
    ) -> Result<SubmissionReceipt, SubmitError> {
        info!(
            id = %payload.id,
            files = payload.files.len(),
            bytes = payload.total_size_bytes(),
            client = %payload.form.client_email.trim(),
            service = payload.form.service_type.map_or("unset", |s| s.as_str()),
            turnaround = payload.form.turnaround.map_or("unset", |t| t.as_str()),
            estimate = %payload.estimate_text,
            created_at = %payload.created_at.format(&Rfc3339).unwrap_or_default(),
            "starting simulated upload"
        );

        if let Some(missing) = payload
            .files
            .iter()
            .find(|f| f.source.as_deref().is_some_and(|p| !p.exists()))
        {
            warn!(id = %payload.id, name = %missing.name, "selected recording disappeared");
            return Err(SubmitError::Transport(format!(
                "{} is no longer available on disk",
                missing.name
            )));
        }

        let step = self.settings.step_percent.clamp(1, 100);
        let mut done: u8 = 0;
        while done < 100 {
            if cancel.is_cancelled() {
                info!(id = %payload.id, percent = done, "upload cancelled");
                return Err(SubmitError::Cancelled);
            }
            sleep(self.settings.step_delay());
            done = done.saturating_add(step).min(100);
            progress(done);
        }

        sleep(self.settings.completion_delay());
        if cancel.is_cancelled() {
            return Err(SubmitError::Cancelled);
        }

        Ok(SubmissionReceipt {
            id: payload.id,
            file_count: payload.files.len(),
            total_size_bytes: payload.total_size_bytes(),
            completed_at: OffsetDateTime::now_utc(),
        })
    }
}

fn sleep(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
