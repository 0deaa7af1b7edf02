// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Service tiers, turnaround multipliers, and the derived cost estimate.
//!
//! Money is tracked in mills (thousandths of a dollar) so that tier/multiplier
//! products such as 2.75 x 1.5 stay exact; display rounds half-up to cents.

use std::fmt;

use crate::utils::format_file_size;

/// Kind of transcription requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Legal,
    Medical,
    Interview,
    General,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [Self::Legal, Self::Medical, Self::Interview, Self::General];

    /// Base rate per audio minute, in mills.
    pub fn base_rate_mills(self) -> u64 {
        match self {
            Self::Legal => 2_500,
            Self::Medical => 2_750,
            Self::Interview => 2_250,
            Self::General => 2_000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Legal => "Legal transcription",
            Self::Medical => "Medical transcription",
            Self::Interview => "Interview transcription",
            Self::General => "General transcription",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Medical => "medical",
            Self::Interview => "interview",
            Self::General => "general",
        }
    }
}

/// Requested delivery speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turnaround {
    Standard,
    Express,
    Rush,
}

impl Turnaround {
    pub const ALL: [Turnaround; 3] = [Self::Standard, Self::Express, Self::Rush];

    /// Price multiplier in percent (standard = 100).
    pub fn factor_percent(self) -> u64 {
        match self {
            Self::Standard => 100,
            Self::Express => 150,
            Self::Rush => 200,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard (x1.0)",
            Self::Express => "Express (x1.5)",
            Self::Rush => "Rush (x2.0)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Rush => "rush",
        }
    }
}

/// Pricing-relevant form values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PricingInputs {
    pub service_type: ServiceType,
    pub turnaround: Turnaround,
}

impl PricingInputs {
    pub fn rate_per_minute_mills(&self) -> u64 {
        self.service_type.base_rate_mills() * self.turnaround.factor_percent() / 100
    }
}

/// Displayable estimate derived from pricing inputs and the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostEstimate {
    /// Nothing selected yet.
    NoFiles,
    PerMinute {
        rate_mills: u64,
        file_count: usize,
        total_size_bytes: u64,
    },
}

impl CostEstimate {
    /// Total price in mills for a client-provided audio duration; `None` when it does not fit in a `u64`.
    pub fn total_for_minutes(&self, minutes: f64) -> Option<u64> {
        let Self::PerMinute { rate_mills, .. } = self else {
            return None;
        };
        if !(minutes.is_finite() && minutes > 0.0) {
            return None;
        }
        let total = (*rate_mills as f64 * minutes).round();
        (total < u64::MAX as f64).then_some(total as u64)
    }
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFiles => write!(f, "Add files to see a cost estimate."),
            Self::PerMinute {
                rate_mills,
                file_count,
                total_size_bytes,
            } => write!(
                f,
                "{} per audio minute for {} file(s) ({})",
                format_dollars(*rate_mills),
                file_count,
                format_file_size(*total_size_bytes)
            ),
        }
    }
}

/// Render mills as dollars, rounding half-up to whole cents.
pub fn format_dollars(mills: u64) -> String {
    let cents = mills / 10 + u64::from(mills % 10 >= 5);
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_rush_is_five_dollars_per_minute() {
        let inputs = PricingInputs {
            service_type: ServiceType::Legal,
            turnaround: Turnaround::Rush,
        };
        assert_eq!(inputs.rate_per_minute_mills(), 5_000);
        assert_eq!(format_dollars(inputs.rate_per_minute_mills()), "$5.00");
    }

    #[test]
    fn medical_express_rounds_half_up() {
        let inputs = PricingInputs {
            service_type: ServiceType::Medical,
            turnaround: Turnaround::Express,
        };
        assert_eq!(inputs.rate_per_minute_mills(), 4_125);
        assert_eq!(format_dollars(4_125), "$4.13");
    }

    #[test]
    fn estimate_display_and_totals() {
        let estimate = CostEstimate::PerMinute {
            rate_mills: 2_000,
            file_count: 2,
            total_size_bytes: 30 * 1024 * 1024,
        };
        assert_eq!(
            estimate.to_string(),
            "$2.00 per audio minute for 2 file(s) (30 MB)"
        );
        assert_eq!(estimate.total_for_minutes(90.0), Some(180_000));
        assert_eq!(estimate.total_for_minutes(-1.0), None);
        assert_eq!(CostEstimate::NoFiles.total_for_minutes(90.0), None);
    }

    #[test]
    fn oversized_totals_are_refused_instead_of_wrapping() {
        let estimate = CostEstimate::PerMinute {
            rate_mills: 5_000,
            file_count: 1,
            total_size_bytes: 1,
        };
        assert_eq!(estimate.total_for_minutes(1e300), None);
        assert_eq!(estimate.total_for_minutes(f64::INFINITY), None);
        assert_eq!(format_dollars(u64::MAX), "$18446744073709551.62");
    }
}
