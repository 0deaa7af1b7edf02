// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring the selection controller, form state, messages, and commands.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PortalConfig;
use crate::error::SubmitError;
use crate::logic::selection::{SelectionObserver, SelectionView, UploadSelectionController};
use crate::logic::submit::{CancelToken, SubmissionPayload, SubmissionReceipt, Transport};
use crate::logic::validation::validate_form;
use crate::models::candidate::{CandidateFile, RawFileHandle};
use crate::models::form::FormSnapshot;
use crate::models::notification::Notification;
use crate::models::pricing::{ServiceType, Turnaround, format_dollars};
use crate::utils::format_duration;

const UPLOAD_SUCCESS: &str = "Files uploaded successfully! We'll begin processing your transcription request immediately and send you updates via email.";

/// Latest derived selection view, refreshed by the controller after each change.
pub type SharedSummary = Rc<RefCell<SelectionView>>;

/// Observer that keeps the shared summary current for the view layer.
struct SummaryCache(SharedSummary);

impl SelectionObserver for SummaryCache {
    fn selection_changed(&mut self, view: &SelectionView) {
        *self.0.borrow_mut() = view.clone();
    }
}

/// A submission that has been handed to the transport and not yet finished.
#[derive(Clone, Debug)]
pub struct InFlight {
    pub id: Uuid,
    pub percent: u8,
    pub cancel: CancelToken,
}

/// Top-level application state.
pub struct AppModel {
    /// Sole owner of the candidate file set.
    pub selection: UploadSelectionController,
    /// Rows, totals, and estimate text as last published by the controller.
    pub summary: SharedSummary,
    pub form: FormSnapshot,
    /// Latest notification to show in the banner.
    pub notification: Option<Notification>,
    /// Bumped on every new notification so the banner can restart its timer.
    pub notification_serial: u64,
    pub submission: Option<InFlight>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(config: &PortalConfig) -> Self {
        let summary: SharedSummary = Rc::default();
        let mut selection = UploadSelectionController::new(config.policy.clone());
        selection.subscribe(Box::new(SummaryCache(summary.clone())));
        Self {
            selection,
            summary,
            form: FormSnapshot::with_acknowledgements(&config.acknowledgements),
            notification: None,
            notification_serial: 0,
            submission: None,
            pending_commands: 0,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_some()
    }

    /// Submit is enabled only for a valid form with no transfer running.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.selection.is_form_valid(&self.form)
    }

    /// Total price for the typed audio length, once pricing and a positive duration are known.
    pub fn estimated_total(&self) -> Option<String> {
        let inputs = self.form.pricing_inputs()?;
        let minutes = self.form.parsed_minutes()?.ok()?;
        let total = self
            .selection
            .estimate_cost(&inputs)
            .total_for_minutes(minutes)?;
        let seconds = (minutes * 60.0).round() as u64;
        Some(format!(
            "{} for {} of audio",
            format_dollars(total),
            format_duration(seconds)
        ))
    }
}

/// Edits coming from the upload form fields.
#[derive(Clone, Debug, PartialEq)]
pub enum FormMsg {
    NameChanged(String),
    EmailChanged(String),
    PhoneChanged(String),
    ServiceTypeChanged(Option<ServiceType>),
    TurnaroundChanged(Option<Turnaround>),
    MinutesChanged(String),
    NotesChanged(String),
    AcknowledgementToggled { index: usize, checked: bool },
}

/// Application messages routed through the update function.
#[derive(Debug)]
pub enum Msg {
    RequestPickFiles,
    PickCancelled,
    /// Files dropped on the window or chosen in the picker; one gesture is one batch.
    FilesChosen(Vec<RawFileHandle>),
    FilesInspected {
        candidates: Vec<CandidateFile>,
        failures: Vec<String>,
    },
    RemoveFile(usize),
    ClearSelection,
    Form(FormMsg),
    ResetForm,
    SubmitRequested,
    CancelSubmit,
    SubmitProgress {
        id: Uuid,
        percent: u8,
    },
    SubmitCompleted {
        id: Uuid,
        result: Result<SubmissionReceipt, SubmitError>,
    },
    DismissNotification,
}

impl Msg {
    /// Progress ticks are intermediate; they do not complete a command.
    pub fn completes_command(&self) -> bool {
        !matches!(self, Msg::SubmitProgress { .. })
    }
}

/// Commands represent side-effects executed off the UI thread.
pub enum Command {
    PickFiles { extensions: Vec<String> },
    InspectFiles(Vec<RawFileHandle>),
    Submit {
        payload: SubmissionPayload,
        cancel: CancelToken,
    },
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::RequestPickFiles => {
            if reject_while_submitting(model) {
                return;
            }
            cmds.push(Command::PickFiles {
                extensions: model
                    .selection
                    .policy()
                    .allowed_extensions
                    .iter()
                    .cloned()
                    .collect(),
            });
        }
        Msg::PickCancelled => {}
        Msg::FilesChosen(handles) => {
            if handles.is_empty() || reject_while_submitting(model) {
                return;
            }
            cmds.push(Command::InspectFiles(handles));
        }
        Msg::FilesInspected {
            candidates,
            failures,
        } => apply_inspected(model, candidates, failures),
        Msg::RemoveFile(index) => {
            if reject_while_submitting(model) {
                return;
            }
            match model.selection.remove_file(index) {
                Ok(_) => surface(model, Notification::info("File removed successfully.")),
                Err(err) => surface(
                    model,
                    Notification::error(format!("Could not remove file: {err}")),
                ),
            }
        }
        Msg::ClearSelection => {
            if reject_while_submitting(model) {
                return;
            }
            model.selection.clear();
        }
        Msg::Form(m) => apply_form_msg(model, m),
        Msg::ResetForm => {
            if reject_while_submitting(model) {
                return;
            }
            model.form.reset();
            model.selection.clear();
            model.selection.set_pricing(None);
        }
        Msg::SubmitRequested => request_submit(model, cmds),
        Msg::CancelSubmit => {
            if let Some(flight) = &model.submission {
                flight.cancel.cancel();
            }
        }
        Msg::SubmitProgress { id, percent } => {
            if let Some(flight) = model.submission.as_mut().filter(|f| f.id == id) {
                flight.percent = percent;
            }
        }
        Msg::SubmitCompleted { id, result } => finish_submit(model, id, result),
        Msg::DismissNotification => model.notification = None,
    }
}

/// Execute a command and return its final message; `emit` carries intermediate progress.
pub fn run_command(cmd: Command, transport: &dyn Transport, emit: &mut dyn FnMut(Msg)) -> Msg {
    match cmd {
        Command::PickFiles { extensions } => {
            let files = rfd::FileDialog::new()
                .set_title("Select audio or video files")
                .add_filter("Audio and video", extensions.as_slice())
                .pick_files();
            match files {
                Some(paths) => Msg::FilesChosen(
                    paths.into_iter().map(RawFileHandle::from_path).collect(),
                ),
                None => Msg::PickCancelled,
            }
        }
        Command::InspectFiles(handles) => {
            let mut candidates = Vec::with_capacity(handles.len());
            let mut failures = Vec::new();
            for handle in handles {
                let name = handle.display_name();
                match handle.resolve() {
                    Ok(candidate) => candidates.push(candidate),
                    Err(err) => failures.push(format!("{name}: {err:#}")),
                }
            }
            Msg::FilesInspected {
                candidates,
                failures,
            }
        }
        Command::Submit { payload, cancel } => {
            let id = payload.id;
            let result = transport.send(
                &payload,
                &mut |percent| emit(Msg::SubmitProgress { id, percent }),
                &cancel,
            );
            Msg::SubmitCompleted { id, result }
        }
    }
}

/// Replace the current notification and restart its display timer.
fn surface(model: &mut AppModel, notification: Notification) {
    model.notification = Some(notification);
    model.notification_serial = model.notification_serial.wrapping_add(1);
}

fn reject_while_submitting(model: &mut AppModel) -> bool {
    if model.is_submitting() {
        surface(
            model,
            Notification::warning("Please wait for the current upload to finish."),
        );
        return true;
    }
    false
}

/// Feed an inspected batch to the controller and report the outcome as one notification.
fn apply_inspected(model: &mut AppModel, candidates: Vec<CandidateFile>, failures: Vec<String>) {
    if model.is_submitting() {
        let discarded = candidates.len() + failures.len();
        warn!(discarded, "batch arrived during upload and was discarded");
        surface(
            model,
            Notification::warning(format!(
                "{discarded} file(s) were not added because an upload is in progress. \
                 Add them again once it finishes."
            )),
        );
        return;
    }

    let result = model.selection.add_files(candidates);

    let mut lines = failures;
    if let Some(summary) = result.rejection_summary() {
        lines.push(summary);
    }
    let added = (result.accepted > 0)
        .then(|| format!("{} file(s) added successfully.", result.accepted));

    if lines.is_empty() {
        if let Some(message) = added {
            surface(model, Notification::success(message));
        }
        return;
    }

    warn!(
        accepted = result.accepted,
        rejected = result.rejections.len(),
        "some files were not added"
    );
    lines.extend(added);
    surface(model, Notification::error(lines.join("\n")));
}

fn apply_form_msg(model: &mut AppModel, msg: FormMsg) {
    let form = &mut model.form;
    match msg {
        FormMsg::NameChanged(v) => form.client_name = v,
        FormMsg::EmailChanged(v) => form.client_email = v,
        FormMsg::PhoneChanged(v) => form.client_phone = v,
        FormMsg::ServiceTypeChanged(v) => form.service_type = v,
        FormMsg::TurnaroundChanged(v) => form.turnaround = v,
        FormMsg::MinutesChanged(v) => form.estimated_minutes = v,
        FormMsg::NotesChanged(v) => form.notes = v,
        FormMsg::AcknowledgementToggled { index, checked } => {
            if let Some(ack) = form.acknowledgements.get_mut(index) {
                ack.checked = checked;
            }
        }
    }
    let pricing = model.form.pricing_inputs();
    model.selection.set_pricing(pricing);
}

/// Validate and hand a snapshot of the selection and form to the transport.
fn request_submit(model: &mut AppModel, cmds: &mut Vec<Command>) {
    if model.is_submitting() {
        surface(
            model,
            Notification::warning("An upload is already in progress."),
        );
        return;
    }

    let errors = validate_form(&model.form, model.selection.len());
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        surface(model, Notification::error(message));
        return;
    }

    let estimate_text = model.summary.borrow().estimate_text.clone();
    let payload = SubmissionPayload::new(
        model.selection.files().to_vec(),
        model.form.clone(),
        estimate_text,
    );
    let cancel = CancelToken::default();
    info!(id = %payload.id, files = payload.files.len(), "submission queued");

    model.submission = Some(InFlight {
        id: payload.id,
        percent: 0,
        cancel: cancel.clone(),
    });
    surface(model, Notification::info("Uploading..."));
    cmds.push(Command::Submit { payload, cancel });
}

fn finish_submit(
    model: &mut AppModel,
    id: Uuid,
    result: Result<SubmissionReceipt, SubmitError>,
) {
    if model.submission.as_ref().map(|f| f.id) != Some(id) {
        warn!(%id, "completion for unknown submission ignored");
        return;
    }
    model.submission = None;

    match result {
        Ok(receipt) => {
            info!(id = %receipt.id, files = receipt.file_count, "submission completed");
            model.selection.clear();
            model.form.reset();
            model.selection.set_pricing(None);
            surface(model, Notification::success(UPLOAD_SUCCESS));
        }
        Err(SubmitError::Cancelled) => surface(
            model,
            Notification::info("Upload cancelled. Your files are still selected."),
        ),
        Err(err) => {
            warn!(%id, error = %err, "submission failed");
            surface(model, Notification::error(err.to_string()));
        }
    }
}
