// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Client details, service options, and acknowledgements for a transcription request.

use eframe::egui;

use crate::models::form::FormSnapshot;
use crate::models::pricing::{ServiceType, Turnaround};
use crate::mvu::FormMsg;

/// Render the form and return edits as messages; the snapshot itself is never mutated here.
pub fn view(
    ui: &mut egui::Ui,
    form: &FormSnapshot,
    estimated_total: Option<&str>,
    enabled: bool,
) -> Vec<FormMsg> {
    let mut msgs = Vec::new();

    ui.add_enabled_ui(enabled, |ui| {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            egui::Grid::new("upload_form_grid")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 10.0))
                .min_col_width(140.0)
                .show(ui, |ui| {
                    text_row(
                        ui,
                        "Full name *",
                        &form.client_name,
                        "Jane Doe",
                        &mut msgs,
                        FormMsg::NameChanged,
                    );
                    text_row(
                        ui,
                        "Email address *",
                        &form.client_email,
                        "jane@example.com",
                        &mut msgs,
                        FormMsg::EmailChanged,
                    );
                    text_row(
                        ui,
                        "Phone",
                        &form.client_phone,
                        "+1 555 010 2030",
                        &mut msgs,
                        FormMsg::PhoneChanged,
                    );

                    ui.label("Service type *");
                    let mut service = form.service_type;
                    egui::ComboBox::from_id_salt("service_type")
                        .selected_text(service.map_or("Choose a service", ServiceType::label))
                        .show_ui(ui, |ui| {
                            for option in ServiceType::ALL {
                                ui.selectable_value(&mut service, Some(option), option.label());
                            }
                        });
                    if service != form.service_type {
                        msgs.push(FormMsg::ServiceTypeChanged(service));
                    }
                    ui.end_row();

                    ui.label("Turnaround time *");
                    let mut turnaround = form.turnaround;
                    ui.horizontal(|ui| {
                        for option in Turnaround::ALL {
                            let button = egui::Button::new(option.label())
                                .selected(turnaround == Some(option));
                            if ui.add(button).clicked() {
                                turnaround = Some(option);
                            }
                        }
                    });
                    if turnaround != form.turnaround {
                        msgs.push(FormMsg::TurnaroundChanged(turnaround));
                    }
                    ui.end_row();

                    text_row(
                        ui,
                        "Audio length (min)",
                        &form.estimated_minutes,
                        "e.g., 45",
                        &mut msgs,
                        FormMsg::MinutesChanged,
                    );
                });

            if let Some(total) = estimated_total {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(format!("Estimated total: {total}")).strong());
            }

            ui.add_space(8.0);
            ui.label("Notes");
            let mut notes = form.notes.clone();
            if ui
                .add(
                    egui::TextEdit::multiline(&mut notes)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY)
                        .hint_text("Speaker names, terminology, timestamps to focus on..."),
                )
                .changed()
            {
                msgs.push(FormMsg::NotesChanged(notes));
            }

            if !form.acknowledgements.is_empty() {
                ui.add_space(8.0);
                for (index, ack) in form.acknowledgements.iter().enumerate() {
                    let mut checked = ack.checked;
                    if ui.checkbox(&mut checked, ack.label.as_str()).changed() {
                        msgs.push(FormMsg::AcknowledgementToggled { index, checked });
                    }
                }
            }
        });
    });

    msgs
}

fn text_row(
    ui: &mut egui::Ui,
    label: &str,
    value: &str,
    hint: &str,
    msgs: &mut Vec<FormMsg>,
    wrap: fn(String) -> FormMsg,
) {
    ui.label(label);
    let mut buffer = value.to_string();
    if ui
        .add(egui::TextEdit::singleline(&mut buffer).hint_text(hint))
        .changed()
    {
        msgs.push(wrap(buffer));
    }
    ui.end_row();
}
