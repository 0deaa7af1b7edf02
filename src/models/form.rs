// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload form snapshot: contact details, pricing choices, and acknowledgements.

use crate::models::pricing::{PricingInputs, ServiceType, Turnaround};

/// Required form fields, named for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    ClientName,
    ClientEmail,
    ServiceType,
    Turnaround,
}

impl FormField {
    pub const REQUIRED: [FormField; 4] = [
        Self::ClientName,
        Self::ClientEmail,
        Self::ServiceType,
        Self::Turnaround,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ClientName => "Full name",
            Self::ClientEmail => "Email address",
            Self::ServiceType => "Service type",
            Self::Turnaround => "Turnaround time",
        }
    }
}

/// A checkbox the client must tick before submitting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acknowledgement {
    pub label: String,
    pub checked: bool,
}

/// Upper bound for the typed audio length (one year of audio).
pub const MAX_ESTIMATED_MINUTES: f64 = 525_600.0;

/// Current values of the upload form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormSnapshot {
    pub client_name: String,
    pub client_email: String,
    /// Optional; validated only when non-blank.
    pub client_phone: String,
    pub service_type: Option<ServiceType>,
    pub turnaround: Option<Turnaround>,
    /// Optional estimate of total audio length, as typed.
    pub estimated_minutes: String,
    pub notes: String,
    pub acknowledgements: Vec<Acknowledgement>,
}

impl FormSnapshot {
    /// Fresh form with one unchecked box per configured acknowledgement.
    pub fn with_acknowledgements(labels: &[String]) -> Self {
        Self {
            acknowledgements: labels
                .iter()
                .map(|label| Acknowledgement {
                    label: label.clone(),
                    checked: false,
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Pricing inputs once both service type and turnaround are chosen.
    pub fn pricing_inputs(&self) -> Option<PricingInputs> {
        Some(PricingInputs {
            service_type: self.service_type?,
            turnaround: self.turnaround?,
        })
    }

    /// Parsed estimated minutes; `None` when blank, `Some(Err)` when unparsable, non-positive,
    /// or above [`MAX_ESTIMATED_MINUTES`].
    pub fn parsed_minutes(&self) -> Option<Result<f64, ()>> {
        let raw = self.estimated_minutes.trim();
        if raw.is_empty() {
            return None;
        }
        Some(
            raw.parse::<f64>()
                .ok()
                .filter(|m| m.is_finite() && *m > 0.0 && *m <= MAX_ESTIMATED_MINUTES)
                .ok_or(()),
        )
    }

    /// Reset to defaults while keeping the acknowledgement labels.
    pub fn reset(&mut self) {
        let labels: Vec<String> = self
            .acknowledgements
            .iter()
            .map(|a| a.label.clone())
            .collect();
        *self = Self::with_acknowledgements(&labels);
    }
}
