// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Dismissible notification banner with per-severity styling.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::models::notification::{Notification, Severity};

/// Tracks when the current notification first appeared so it can expire.
#[derive(Debug)]
pub struct BannerTimer {
    timeout: Duration,
    shown: Option<(u64, Instant)>,
}

impl BannerTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            shown: None,
        }
    }

    /// Time left for notification `serial` as of `now`; restarts when the serial changes.
    pub fn remaining(&mut self, serial: u64, now: Instant) -> Duration {
        let started = match self.shown {
            Some((seen, at)) if seen == serial => at,
            _ => {
                self.shown = Some((serial, now));
                now
            }
        };
        self.timeout.saturating_sub(now.saturating_duration_since(started))
    }
}

fn palette(severity: Severity) -> (&'static str, egui::Color32) {
    match severity {
        Severity::Success => (
            egui_phosphor::regular::CHECK_CIRCLE,
            egui::Color32::from_rgb(46, 125, 50),
        ),
        Severity::Error => (
            egui_phosphor::regular::WARNING_CIRCLE,
            egui::Color32::from_rgb(198, 40, 40),
        ),
        Severity::Warning => (
            egui_phosphor::regular::WARNING,
            egui::Color32::from_rgb(230, 160, 0),
        ),
        Severity::Info => (
            egui_phosphor::regular::INFO,
            egui::Color32::from_rgb(21, 101, 192),
        ),
    }
}

/// Render the banner; returns true when the user dismissed it.
pub fn view(ui: &mut egui::Ui, notification: &Notification) -> bool {
    let (icon, color) = palette(notification.severity);
    let mut dismissed = false;
    let stroke_width = if notification.is_error() { 2.0 } else { 1.0 };

    egui::Frame::new()
        .fill(color.gamma_multiply(0.12))
        .stroke(egui::Stroke::new(stroke_width, color))
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icon).color(color).size(18.0));
                ui.vertical(|ui| {
                    for line in notification.message.lines() {
                        ui.label(egui::RichText::new(line).color(color));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui
                        .small_button(egui_phosphor::regular::X)
                        .on_hover_text("Dismiss")
                        .clicked()
                    {
                        dismissed = true;
                    }
                });
            });
        });

    dismissed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_counts_down_and_restarts_for_new_serial() {
        let mut timer = BannerTimer::new(Duration::from_secs(7));
        let t0 = Instant::now();

        assert_eq!(timer.remaining(1, t0), Duration::from_secs(7));
        assert_eq!(
            timer.remaining(1, t0 + Duration::from_secs(5)),
            Duration::from_secs(2)
        );
        assert_eq!(
            timer.remaining(1, t0 + Duration::from_secs(9)),
            Duration::ZERO
        );

        let t1 = t0 + Duration::from_secs(10);
        assert_eq!(timer.remaining(2, t1), Duration::from_secs(7));
    }
}
