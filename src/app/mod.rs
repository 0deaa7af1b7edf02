// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the upload portal.

use std::sync::Arc;

use eframe::egui;
use egui_phosphor::Variant;
use tracing::info;

use crate::config::PortalConfig;
use crate::logic::submit::SimulatedTransport;
use crate::ui::PortalApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: PortalConfig) -> eframe::Result<()> {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([600.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let transport = Arc::new(SimulatedTransport::new(config.submission.clone()));
    info!("starting transcript portal");

    eframe::run_native(
        "Transcript Portal",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(PortalApp::new(&cc.egui_ctx, &config, transport)))
        }),
    )
}
