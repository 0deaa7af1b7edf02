// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Drop zone, selected-file list, and estimate line for the upload selection.

use eframe::egui;

use crate::logic::selection::{FileRow, SelectionView};
use crate::utils::icon_for;

/// Interactions the selection panel can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionAction {
    Browse,
    Remove(usize),
    Clear,
}

/// Render the selection panel. `hovering` highlights the drop zone while files are dragged over the window.
pub fn view(
    ui: &mut egui::Ui,
    summary: &SelectionView,
    enabled: bool,
    hovering: bool,
) -> Vec<SelectionAction> {
    let mut actions = Vec::new();

    ui.add_enabled_ui(enabled, |ui| {
        render_drop_zone(ui, hovering, &mut actions);
        ui.add_space(8.0);

        let visuals = ui.visuals().clone();
        egui::Frame::new()
            .fill(visuals.panel_fill)
            .stroke(visuals.window_stroke())
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                if summary.is_empty() {
                    ui.label(
                        egui::RichText::new("No files selected")
                            .color(egui::Color32::from_gray(150)),
                    );
                } else {
                    for row in &summary.rows {
                        render_row(ui, row, &mut actions);
                    }
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label(format!(
                            "{} file(s), {} total",
                            summary.rows.len(),
                            summary.total_size_label
                        ));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let clear = egui::Button::new(format!(
                                "{} Clear all",
                                egui_phosphor::regular::BROOM
                            ));
                            if ui.add(clear).clicked() {
                                actions.push(SelectionAction::Clear);
                            }
                        });
                    });
                }
            });
    });

    ui.add_space(6.0);
    ui.label(egui::RichText::new(&summary.estimate_text).strong());

    actions
}

fn render_drop_zone(ui: &mut egui::Ui, hovering: bool, actions: &mut Vec<SelectionAction>) {
    let visuals = ui.visuals().clone();
    let stroke = if hovering {
        egui::Stroke::new(2.0, visuals.selection.bg_fill)
    } else {
        visuals.window_stroke()
    };
    let fill = if hovering {
        visuals.selection.bg_fill.gamma_multiply(0.15)
    } else {
        visuals.extreme_bg_color
    };

    egui::Frame::new()
        .fill(fill)
        .stroke(stroke)
        .corner_radius(6.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::CLOUD_ARROW_UP).size(32.0),
                );
                ui.label("Drag and drop audio or video files here");
                ui.label(
                    egui::RichText::new("or")
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
                let browse = egui::Button::new(format!(
                    "{} Browse files",
                    egui_phosphor::regular::FOLDER_OPEN
                ));
                if ui.add(browse).clicked() {
                    actions.push(SelectionAction::Browse);
                }
            });
        });
}

fn render_row(ui: &mut egui::Ui, row: &FileRow, actions: &mut Vec<SelectionAction>) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(icon_for(&row.mime_type, row.extension.as_deref())).size(20.0),
        );
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&row.name).strong());
            let kind = if row.mime_type.is_empty() {
                "unknown type"
            } else {
                row.mime_type.as_str()
            };
            ui.label(
                egui::RichText::new(format!("{} · {}", row.size_label, kind))
                    .small()
                    .color(egui::Color32::from_gray(110)),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let remove = ui
                .add(egui::Button::new(egui_phosphor::regular::TRASH))
                .on_hover_text("Remove file");
            if remove.clicked() {
                actions.push(SelectionAction::Remove(row.index));
            }
        });
    });
}
