// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload form validation. Pure: every problem is reported, none short-circuits.

use email_address::EmailAddress;

use crate::error::FormError;
use crate::models::form::{FormField, FormSnapshot};

/// Collect every reason the form cannot be submitted with `file_count` selected files.
pub fn validate_form(form: &FormSnapshot, file_count: usize) -> Vec<FormError> {
    let mut errors = Vec::new();

    if file_count == 0 {
        errors.push(FormError::NoFilesSelected);
    }

    for field in FormField::REQUIRED {
        let present = match field {
            FormField::ClientName => !form.client_name.trim().is_empty(),
            FormField::ClientEmail => !form.client_email.trim().is_empty(),
            FormField::ServiceType => form.service_type.is_some(),
            FormField::Turnaround => form.turnaround.is_some(),
        };
        if !present {
            errors.push(FormError::MissingRequiredField(field));
        }
    }

    let email = form.client_email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.push(FormError::InvalidEmailFormat);
    }

    let phone = form.client_phone.trim();
    if !phone.is_empty() && !is_valid_phone(phone) {
        errors.push(FormError::InvalidPhoneFormat);
    }

    if let Some(Err(())) = form.parsed_minutes() {
        errors.push(FormError::InvalidEstimatedMinutes);
    }

    errors.extend(
        form.acknowledgements
            .iter()
            .filter(|ack| !ack.checked)
            .map(|ack| FormError::AcknowledgementMissing(ack.label.clone())),
    );

    errors
}

/// `local@domain.tld`: a parseable address whose domain has a non-empty label on each side of a dot.
pub fn is_valid_email(value: &str) -> bool {
    let Ok(addr) = EmailAddress::parse_with_options(value, Default::default()) else {
        return false;
    };
    match addr.domain().rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.ends_with('.'),
        None => false,
    }
}

/// Optional leading `+`, a non-zero digit, then up to 15 more digits; spaces, dashes, and parentheses ignored.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) if ('1'..='9').contains(&first) => {}
        _ => return false,
    }
    let rest = chars.as_str();
    rest.len() <= 15 && rest.chars().all(|c| c.is_ascii_digit())
}
