// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the transcription upload portal.
//! Handles layout, drag-and-drop intake, and wiring to background commands.

pub mod components;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::PortalConfig;
use crate::logic::submit::Transport;
use crate::models::candidate::RawFileHandle;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::notification::BannerTimer;
use crate::ui::components::selection::SelectionAction;
use crate::ui::components::{notification, selection, upload_form};
use crate::utils::format_file_size;

/// Stateful egui application for selecting recordings and submitting a request.
pub struct PortalApp {
    model: AppModel,
    inbox: Vec<Msg>,
    banner: BannerTimer,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl PortalApp {
    /// Build the app and start the command worker pool.
    pub fn new(ctx: &egui::Context, config: &PortalConfig, transport: Arc<dyn Transport>) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let transport = Arc::clone(&transport);
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, transport.as_ref(), &mut |progress| {
                        let _ = msg_tx.send(progress);
                        ctx.request_repaint();
                    });
                    let _ = msg_tx.send(msg);
                    ctx.request_repaint();
                }
            });
        }

        Self {
            model: AppModel::new(config),
            inbox: Vec::new(),
            banner: BannerTimer::new(Duration::from_secs(config.notification_timeout_secs)),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for PortalApp {
    /// Required by eframe 0.34; all rendering happens in `update`, which eframe still calls first.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drain worker results, apply queued messages, then render panels for the next frame.
    #[allow(deprecated)]
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });

        while let Ok(msg) = self.msg_rx.try_recv() {
            if msg.completes_command() {
                self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            }
            self.inbox.push(msg);
        }

        let hovering = self.collect_dropped_files(ctx);

        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }

        self.expire_notification(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Transcription Request");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_submit_button(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(note) = &self.model.notification
                    && notification::view(ui, note)
                {
                    self.inbox.push(Msg::DismissNotification);
                }
                ui.add_space(8.0);

                self.render_selection_section(ui, hovering);
                ui.add_space(12.0);

                self.render_form_section(ui);
                ui.add_space(8.0);
            });
        });

        if !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }
}

impl PortalApp {
    /// Queue files dropped this frame as one batch; returns whether files are hovering.
    fn collect_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let (dropped, hovering) = ctx.input(|i| {
            (
                i.raw.dropped_files.clone(),
                !i.raw.hovered_files.is_empty(),
            )
        });
        if !dropped.is_empty() {
            self.inbox.push(Msg::FilesChosen(
                dropped.into_iter().map(handle_from_drop).collect(),
            ));
        }
        hovering
    }

    fn expire_notification(&mut self, ctx: &egui::Context) {
        if self.model.notification.is_none() {
            return;
        }
        let remaining = self
            .banner
            .remaining(self.model.notification_serial, Instant::now());
        if remaining.is_zero() {
            self.inbox.push(Msg::DismissNotification);
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(remaining);
        }
    }

    fn render_submit_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!(
            "{} Submit request",
            egui_phosphor::regular::UPLOAD_SIMPLE
        ));
        if ui
            .add_enabled(self.model.can_submit(), button)
            .on_disabled_hover_text(
                "Add at least one file and complete the required fields and confirmations",
            )
            .clicked()
        {
            self.inbox.push(Msg::SubmitRequested);
        }
    }

    fn render_selection_section(&mut self, ui: &mut egui::Ui, hovering: bool) {
        let summary = self.model.summary.borrow().clone();
        let enabled = !self.model.is_submitting();
        egui::CollapsingHeader::new("Recordings")
            .default_open(true)
            .show(ui, |ui| {
                let actions = selection::view(ui, &summary, enabled, hovering && enabled);
                self.inbox.extend(actions.into_iter().map(|action| match action {
                    SelectionAction::Browse => Msg::RequestPickFiles,
                    SelectionAction::Remove(index) => Msg::RemoveFile(index),
                    SelectionAction::Clear => Msg::ClearSelection,
                }));
            });
    }

    fn render_form_section(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.model.is_submitting();
        let total = self.model.estimated_total();
        egui::CollapsingHeader::new("Request details")
            .default_open(true)
            .show(ui, |ui| {
                let msgs = upload_form::view(ui, &self.model.form, total.as_deref(), enabled);
                self.inbox.extend(msgs.into_iter().map(Msg::Form));

                ui.add_space(6.0);
                let reset = egui::Button::new(format!(
                    "{} Reset form",
                    egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE
                ));
                if ui.add_enabled(enabled, reset).clicked() {
                    self.inbox.push(Msg::ResetForm);
                }
            });
    }

    /// Upload progress with a cancel control, or background activity when idle.
    fn render_status(&mut self, ui: &mut egui::Ui) {
        if let Some(flight) = &self.model.submission {
            let cancelling = flight.cancel.is_cancelled();
            ui.horizontal(|ui| {
                let label = if cancelling {
                    "Cancelling...".to_string()
                } else {
                    format!("Uploading... {}%", flight.percent)
                };
                ui.add(
                    egui::ProgressBar::new(f32::from(flight.percent) / 100.0)
                        .desired_width(240.0)
                        .text(label),
                );
                let cancel = egui::Button::new(format!("{} Cancel", egui_phosphor::regular::X));
                if ui.add_enabled(!cancelling, cancel).clicked() {
                    self.inbox.push(Msg::CancelSubmit);
                }
            });
            return;
        }

        if self.model.pending_commands > 0 {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(14.0));
                ui.label(
                    egui::RichText::new(format!(
                        "{} task(s) running in background",
                        self.model.pending_commands
                    ))
                    .color(egui::Color32::from_gray(68)),
                );
            });
        } else {
            let selection = &self.model.selection;
            let text = if selection.is_empty() {
                "No files selected".to_string()
            } else {
                format!(
                    "{} file(s) selected, {}",
                    selection.len(),
                    format_file_size(selection.total_size_bytes())
                )
            };
            ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
        }
    }
}

/// Translate an egui drop into a handle; in-memory bytes supply the size without touching disk.
fn handle_from_drop(file: egui::DroppedFile) -> RawFileHandle {
    let name = if file.name.is_empty() {
        file.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        file.name
    };
    RawFileHandle {
        name,
        path: file.path,
        mime: file.mime,
        size_bytes: file.bytes.map(|bytes| bytes.len() as u64),
    }
}
