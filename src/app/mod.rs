use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::{egui, NativeOptions};
use log::{error, info, warn};

use crate::gui::FamilyTreeGui;
use crate::tree::layout::{ChildSlots, LayoutMode, LayoutOptions};
use crate::tree::FamilyTree;
use crate::ui;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "famtree",
    about = "Small egui editor for a genealogical family tree."
)]
pub struct AppConfig {
    /// Window width in pixels
    #[arg(long, default_value_t = 1020)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 640)]
    pub height: u32,

    /// How parents are anchored on the canvas
    #[arg(long, value_enum, default_value_t = LayoutMode::Reference)]
    pub layout: LayoutMode,

    /// How repeated child names are positioned
    #[arg(long, value_enum, default_value_t = ChildSlots::FirstOccurrence)]
    pub child_slots: ChildSlots,

    /// Write the rendered tree to this SVG file (headless mode).
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Run without launching the GUI; output summary to stdout instead.
    #[arg(long)]
    pub headless: bool,

    /// Ignore display detection safeguards and attempt to launch the GUI anyway.
    #[arg(long)]
    pub force_gui: bool,
}

impl AppConfig {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            mode: self.layout,
            child_slots: self.child_slots,
        }
    }
}

pub struct FamilyTreeApp;

impl FamilyTreeApp {
    pub fn run(config: &AppConfig) -> Result<()> {
        if config.headless {
            return Self::run_headless(config);
        }

        if !config.force_gui && !Self::display_available() {
            warn!("GUI requested but no display was detected; falling back to headless mode.");
            return Self::run_headless(config);
        }

        let mut native_options = NativeOptions::default();
        info!(
            "Launching egui window ({}x{}).",
            config.width, config.height
        );
        native_options.viewport = egui::ViewportBuilder::default()
            .with_title("Family Tree")
            .with_inner_size(egui::vec2(config.width as f32, config.height as f32));

        let initial_config = config.clone();
        eframe::run_native(
            "Family Tree",
            native_options,
            Box::new(move |cc| Ok(Box::new(FamilyTreeGui::new(cc, initial_config)))),
        )
        .map_err(|err| {
            error!("Failed to launch egui window: {}", err);
            anyhow!(err.to_string())
        })
    }

    fn display_available() -> bool {
        #[cfg(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "dragonfly",
            target_os = "netbsd"
        ))]
        {
            std::env::var("DISPLAY").is_ok() || std::env::var("WAYLAND_DISPLAY").is_ok()
        }
        #[cfg(not(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "dragonfly",
            target_os = "netbsd"
        )))]
        {
            true
        }
    }

    fn run_headless(config: &AppConfig) -> Result<()> {
        let tree = FamilyTree::example();
        ui::render_preview(&tree, config);

        if let Some(dest) = &config.output {
            ui::export(&tree, config, dest)?;
        }

        Ok(())
    }
}
