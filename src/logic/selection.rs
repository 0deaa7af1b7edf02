// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload selection controller: the candidate file set, its size accounting,
//! and the views derived from it.
//!
//! The controller is the only writer of the selection. Every UI gesture maps
//! to one call here; observers receive a fresh [`SelectionView`] after each
//! change so presentation code never has to recompute derived values.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::SelectionError;
use crate::logic::validation::validate_form;
use crate::models::candidate::CandidateFile;
use crate::models::form::FormSnapshot;
use crate::models::policy::ValidationPolicy;
use crate::models::pricing::{CostEstimate, PricingInputs};
use crate::utils::format_file_size;

/// Why a single candidate was refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub file_name: String,
    pub error: SelectionError,
}

/// Outcome of one `add_files` batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddResult {
    pub accepted: usize,
    pub rejections: Vec<Rejection>,
}

impl AddResult {
    /// One line per rejected file, suitable for a single combined notification.
    pub fn rejection_summary(&self) -> Option<String> {
        if self.rejections.is_empty() {
            return None;
        }
        Some(
            self.rejections
                .iter()
                .map(|r| format!("{}: {}", r.file_name, r.error))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

/// Display row for one selected file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRow {
    pub index: usize,
    pub name: String,
    pub size_bytes: u64,
    pub size_label: String,
    pub mime_type: String,
    pub extension: Option<String>,
}

/// Snapshot handed to observers after every mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionView {
    pub rows: Vec<FileRow>,
    pub total_size_bytes: u64,
    pub total_size_label: String,
    /// Estimate text for the last pricing inputs given to the controller.
    pub estimate_text: String,
}

impl SelectionView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Receives the derived view whenever the selection or pricing changes.
pub trait SelectionObserver {
    fn selection_changed(&mut self, view: &SelectionView);
}

/// Owns the candidate file set and keeps its derived views consistent.
pub struct UploadSelectionController {
    policy: ValidationPolicy,
    files: Vec<CandidateFile>,
    total_size_bytes: u64,
    pricing: Option<PricingInputs>,
    observers: Vec<Box<dyn SelectionObserver>>,
}

impl Default for UploadSelectionController {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}

impl UploadSelectionController {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            files: Vec::new(),
            total_size_bytes: 0,
            pricing: None,
            observers: Vec::new(),
        }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Selected files in display order.
    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.total_size_bytes
    }

    /// Register an observer and immediately hand it the current view.
    pub fn subscribe(&mut self, mut observer: Box<dyn SelectionObserver>) {
        observer.selection_changed(&self.view());
        self.observers.push(observer);
    }

    /// Validate and append a batch of candidates.
    ///
    /// Each candidate is checked for type, then size, then duplication. If the
    /// survivors would push the total past the limit, the whole batch is refused.
    pub fn add_files(&mut self, candidates: Vec<CandidateFile>) -> AddResult {
        let mut result = AddResult::default();
        let mut survivors: Vec<CandidateFile> = Vec::new();
        let mut seen: HashSet<(String, u64)> = self
            .files
            .iter()
            .map(|f| {
                let (name, size) = f.identity();
                (name.to_owned(), size)
            })
            .collect();

        for candidate in candidates {
            let verdict = if !self.policy.allows_type(&candidate) {
                Err(SelectionError::UnsupportedType)
            } else if !self.policy.within_file_limit(&candidate) {
                Err(SelectionError::FileTooLarge {
                    size: candidate.size_bytes,
                    limit: self.policy.max_file_size_bytes,
                })
            } else if !seen.insert((candidate.name.clone(), candidate.size_bytes)) {
                Err(SelectionError::DuplicateFile)
            } else {
                Ok(())
            };

            match verdict {
                Ok(()) => survivors.push(candidate),
                Err(error) => result.rejections.push(Rejection {
                    file_name: candidate.name,
                    error,
                }),
            }
        }

        let batch_bytes: u64 = survivors.iter().map(|f| f.size_bytes).sum();
        let attempted = self.total_size_bytes.saturating_add(batch_bytes);
        if !survivors.is_empty() && attempted > self.policy.max_total_size_bytes {
            warn!(
                attempted,
                limit = self.policy.max_total_size_bytes,
                "refusing batch of {} file(s): total size limit exceeded",
                survivors.len()
            );
            let limit = self.policy.max_total_size_bytes;
            result
                .rejections
                .extend(survivors.into_iter().map(|f| Rejection {
                    file_name: f.name,
                    error: SelectionError::TotalSizeExceeded { attempted, limit },
                }));
            return result;
        }

        result.accepted = survivors.len();
        if result.accepted > 0 {
            self.files.extend(survivors);
            self.total_size_bytes = attempted;
            debug!(
                accepted = result.accepted,
                total = self.total_size_bytes,
                "files added to selection"
            );
            self.notify();
        }
        result
    }

    /// Remove the file at `index`, returning it.
    pub fn remove_file(&mut self, index: usize) -> Result<CandidateFile, SelectionError> {
        if index >= self.files.len() {
            warn!(index, len = self.files.len(), "remove requested for missing position");
            return Err(SelectionError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        let removed = self.files.remove(index);
        self.total_size_bytes -= removed.size_bytes;
        debug!(name = %removed.name, total = self.total_size_bytes, "file removed from selection");
        self.notify();
        Ok(removed)
    }

    /// Empty the selection. Calling it on an empty selection changes nothing.
    pub fn clear(&mut self) {
        if self.files.is_empty() && self.total_size_bytes == 0 {
            return;
        }
        self.files.clear();
        self.total_size_bytes = 0;
        debug!("selection cleared");
        self.notify();
    }

    /// Remember the latest pricing choices so observer views carry a matching estimate.
    pub fn set_pricing(&mut self, pricing: Option<PricingInputs>) {
        if self.pricing != pricing {
            self.pricing = pricing;
            self.notify();
        }
    }

    /// Estimate for the given inputs against the current selection.
    pub fn estimate_cost(&self, pricing: &PricingInputs) -> CostEstimate {
        if self.files.is_empty() {
            return CostEstimate::NoFiles;
        }
        CostEstimate::PerMinute {
            rate_mills: pricing.rate_per_minute_mills(),
            file_count: self.files.len(),
            total_size_bytes: self.total_size_bytes,
        }
    }

    /// Whether the form plus the current selection may be submitted.
    pub fn is_form_valid(&self, form: &FormSnapshot) -> bool {
        validate_form(form, self.files.len()).is_empty()
    }

    /// Build the current derived view.
    pub fn view(&self) -> SelectionView {
        let rows = self
            .files
            .iter()
            .enumerate()
            .map(|(index, f)| FileRow {
                index,
                name: f.name.clone(),
                size_bytes: f.size_bytes,
                size_label: format_file_size(f.size_bytes),
                mime_type: f.mime_type.clone(),
                extension: f.extension(),
            })
            .collect();

        let estimate_text = match (&self.pricing, self.files.is_empty()) {
            (_, true) => CostEstimate::NoFiles.to_string(),
            (Some(p), false) => self.estimate_cost(p).to_string(),
            (None, false) => "Select a service type and turnaround to see an estimate.".to_string(),
        };

        SelectionView {
            rows,
            total_size_bytes: self.total_size_bytes,
            total_size_label: format_file_size(self.total_size_bytes),
            estimate_text,
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for observer in &mut self.observers {
            observer.selection_changed(&view);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::models::pricing::{ServiceType, Turnaround};

    const MB: u64 = 1024 * 1024;

    fn mp3(name: &str, size: u64) -> CandidateFile {
        CandidateFile::new(name, size, "audio/mpeg")
    }

    fn controller() -> UploadSelectionController {
        UploadSelectionController::new(ValidationPolicy {
            max_file_size_bytes: 500 * MB,
            max_total_size_bytes: 2048 * MB,
            ..Default::default()
        })
    }

    struct Recorder(Rc<RefCell<Vec<SelectionView>>>);

    impl SelectionObserver for Recorder {
        fn selection_changed(&mut self, view: &SelectionView) {
            self.0.borrow_mut().push(view.clone());
        }
    }

    #[test]
    fn oversized_file_is_rejected_and_selection_stays_empty() {
        let mut ctl = controller();

        let result = ctl.add_files(vec![mp3("long.mp3", 600 * MB)]);

        assert_eq!(result.accepted, 0);
        assert_eq!(
            result.rejections[0].error,
            SelectionError::FileTooLarge {
                size: 600 * MB,
                limit: 500 * MB
            }
        );
        assert!(ctl.is_empty());
        assert_eq!(ctl.total_size_bytes(), 0);
    }

    #[test]
    fn add_two_then_remove_first() {
        let mut ctl = controller();
        ctl.add_files(vec![
            mp3("a.mp3", 10 * MB),
            CandidateFile::new("b.mp4", 20 * MB, "video/mp4"),
        ]);

        let removed = ctl.remove_file(0).unwrap();

        assert_eq!(removed.name, "a.mp3");
        assert_eq!(ctl.files().len(), 1);
        assert_eq!(ctl.files()[0].name, "b.mp4");
        assert_eq!(ctl.total_size_bytes(), 20 * MB);
    }

    #[test]
    fn validation_order_is_type_then_size_then_duplicate() {
        let mut ctl = controller();
        ctl.add_files(vec![mp3("dup.mp3", MB)]);

        let result = ctl.add_files(vec![
            CandidateFile::new("huge.pdf", 900 * MB, "application/pdf"),
            mp3("dup.mp3", 900 * MB),
            mp3("dup.mp3", MB),
        ]);

        let errors: Vec<_> = result.rejections.iter().map(|r| r.error.clone()).collect();
        assert_eq!(errors[0], SelectionError::UnsupportedType);
        assert!(matches!(errors[1], SelectionError::FileTooLarge { .. }));
        assert_eq!(errors[2], SelectionError::DuplicateFile);
        assert_eq!(ctl.len(), 1);
    }

    #[test]
    fn duplicate_never_changes_selection() {
        let mut ctl = controller();
        ctl.add_files(vec![mp3("a.mp3", 5 * MB)]);
        let before = ctl.files().to_vec();

        let result = ctl.add_files(vec![mp3("a.mp3", 5 * MB)]);

        assert_eq!(result.accepted, 0);
        assert_eq!(result.rejections[0].error, SelectionError::DuplicateFile);
        assert_eq!(ctl.files(), before.as_slice());
    }

    #[test]
    fn same_name_different_size_is_not_a_duplicate() {
        let mut ctl = controller();
        let result = ctl.add_files(vec![mp3("a.mp3", 5 * MB), mp3("a.mp3", 6 * MB)]);
        assert_eq!(result.accepted, 2);
    }

    #[test]
    fn in_batch_duplicate_keeps_first_copy() {
        let mut ctl = controller();

        let result = ctl.add_files(vec![mp3("a.mp3", MB), mp3("a.mp3", MB)]);

        assert_eq!(result.accepted, 1);
        assert_eq!(result.rejections.len(), 1);
        assert_eq!(result.rejections[0].error, SelectionError::DuplicateFile);
        assert_eq!(ctl.total_size_bytes(), MB);
    }

    #[test]
    fn over_limit_batch_is_refused_atomically() {
        let mut ctl = controller();
        ctl.add_files(vec![mp3("base.mp3", 400 * MB)]);
        let before = ctl.files().to_vec();

        let result = ctl.add_files(vec![
            mp3("one.mp3", 450 * MB),
            mp3("two.mp3", 450 * MB),
            mp3("three.mp3", 450 * MB),
            mp3("four.mp3", 450 * MB),
            CandidateFile::new("bad.txt", 1, "text/plain"),
        ]);

        assert_eq!(result.accepted, 0);
        assert_eq!(ctl.files(), before.as_slice());
        assert_eq!(ctl.total_size_bytes(), 400 * MB);
        let exceeded = result
            .rejections
            .iter()
            .filter(|r| matches!(r.error, SelectionError::TotalSizeExceeded { .. }))
            .count();
        assert_eq!(exceeded, 4);
        assert!(
            result
                .rejections
                .iter()
                .any(|r| r.error == SelectionError::UnsupportedType)
        );
    }

    #[test]
    fn batch_exactly_at_total_limit_is_accepted() {
        let mut ctl = UploadSelectionController::new(ValidationPolicy {
            max_file_size_bytes: 100,
            max_total_size_bytes: 200,
            ..Default::default()
        });

        let result = ctl.add_files(vec![mp3("a.mp3", 100), mp3("b.mp3", 100)]);

        assert_eq!(result.accepted, 2);
        assert_eq!(ctl.total_size_bytes(), 200);
    }

    #[test]
    fn remove_out_of_range_leaves_state() {
        let mut ctl = controller();
        ctl.add_files(vec![mp3("a.mp3", MB)]);

        let err = ctl.remove_file(3).unwrap_err();

        assert_eq!(err, SelectionError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(ctl.len(), 1);
        assert_eq!(ctl.total_size_bytes(), MB);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut ctl = controller();
        ctl.add_files(vec![mp3("a.mp3", MB)]);

        ctl.clear();
        ctl.clear();

        assert!(ctl.is_empty());
        assert_eq!(ctl.total_size_bytes(), 0);
    }

    #[test]
    fn estimate_requires_files() {
        let mut ctl = controller();
        let pricing = PricingInputs {
            service_type: ServiceType::Legal,
            turnaround: Turnaround::Rush,
        };
        assert_eq!(ctl.estimate_cost(&pricing), CostEstimate::NoFiles);

        ctl.add_files(vec![mp3("a.mp3", MB)]);
        let estimate = ctl.estimate_cost(&pricing);

        assert_eq!(
            estimate,
            CostEstimate::PerMinute {
                rate_mills: 5_000,
                file_count: 1,
                total_size_bytes: MB,
            }
        );
    }

    #[test]
    fn form_is_invalid_without_files() {
        let ctl = controller();
        let mut form = FormSnapshot::with_acknowledgements(&[]);
        form.client_name = "Dana Reyes".into();
        form.client_email = "dana@example.com".into();
        form.service_type = Some(ServiceType::General);
        form.turnaround = Some(Turnaround::Standard);

        assert!(!ctl.is_form_valid(&form));
    }

    #[test]
    fn observers_see_one_view_per_mutation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut ctl = controller();
        ctl.subscribe(Box::new(Recorder(seen.clone())));

        ctl.add_files(vec![mp3("a.mp3", 10 * MB)]);
        ctl.set_pricing(Some(PricingInputs {
            service_type: ServiceType::Legal,
            turnaround: Turnaround::Rush,
        }));
        ctl.add_files(vec![mp3("a.mp3", 10 * MB)]); // duplicate, no change
        let _ = ctl.remove_file(5); // invalid, no change
        ctl.remove_file(0).unwrap();

        let views = seen.borrow();
        assert_eq!(views.len(), 4, "initial + add + pricing + remove");
        assert_eq!(views[1].rows[0].size_label, "10 MB");
        assert!(views[1].estimate_text.starts_with("Select a service type"));
        assert_eq!(
            views[2].estimate_text,
            "$5.00 per audio minute for 1 file(s) (10 MB)"
        );
        assert!(views[3].is_empty());
        assert_eq!(views[3].estimate_text, "Add files to see a cost estimate.");
    }

    #[test]
    fn rejection_summary_lists_each_file() {
        let mut ctl = controller();
        let result = ctl.add_files(vec![
            CandidateFile::new("a.doc", 1, ""),
            CandidateFile::new("b.txt", 1, ""),
        ]);

        let summary = result.rejection_summary().unwrap();

        assert_eq!(summary.lines().count(), 2);
        assert!(summary.starts_with("a.doc: File type not supported"));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Add(Vec<(u8, u64)>),
        Remove(usize),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => prop::collection::vec((0u8..6, 1u64..400), 0..5).prop_map(Op::Add),
            2 => (0usize..8).prop_map(Op::Remove),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn total_matches_members_and_no_duplicates(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut ctl = UploadSelectionController::new(ValidationPolicy {
                max_file_size_bytes: 300,
                max_total_size_bytes: 1000,
                ..Default::default()
            });

            for op in ops {
                let before = ctl.files().to_vec();
                match op {
                    Op::Add(batch) => {
                        let result = ctl.add_files(
                            batch.into_iter()
                                .map(|(n, size)| mp3(&format!("f{n}.mp3"), size))
                                .collect(),
                        );
                        if result.accepted == 0 {
                            prop_assert_eq!(ctl.files(), before.as_slice());
                        }
                    }
                    Op::Remove(index) => {
                        let outcome = ctl.remove_file(index);
                        if index < before.len() {
                            let removed = outcome.unwrap();
                            prop_assert_eq!(ctl.len(), before.len() - 1);
                            prop_assert_eq!(&removed, &before[index]);
                        } else {
                            prop_assert!(outcome.is_err());
                            prop_assert_eq!(ctl.files(), before.as_slice());
                        }
                    }
                    Op::Clear => ctl.clear(),
                }

                let sum: u64 = ctl.files().iter().map(|f| f.size_bytes).sum();
                prop_assert_eq!(ctl.total_size_bytes(), sum);
                prop_assert!(sum <= 1000);
                let unique: HashSet<_> = ctl.files().iter().map(|f| f.identity()).collect();
                prop_assert_eq!(unique.len(), ctl.len());
            }
        }
    }
}
