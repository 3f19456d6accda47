use eframe::egui::{self, Color32, RichText};
use log::{error, info};
use rfd::FileDialog;

use crate::app::AppConfig;
use crate::export::svg::export_scene_svg;
use crate::tree::layout::{FamilyLayout, LayoutOptions};
use crate::tree::painter::{paint_scene, FamilyPainter};
use crate::tree::scene_graph::{build_family_scene, FamilySceneGraph};
use crate::tree::FamilyTree;

pub mod form;
pub mod tooltip;

use form::{ActionOutcome, FormField, MemberAction, MemberForm};
use tooltip::TooltipTracker;

const DETAILS_PANEL_WIDTH: f32 = 200.0;

/// Application state handed to the renderer and the form handlers.
pub struct FamilyTreeGui {
    tree: FamilyTree,
    form: MemberForm,
    tooltips: TooltipTracker,
    painter: FamilyPainter,
    layout_options: LayoutOptions,
    scene: Option<FamilySceneGraph>,
    scene_revision: Option<u64>,
    message_dialog: Option<String>,
    status: String,
}

impl FamilyTreeGui {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::with_tree(FamilyTree::example(), config.layout_options())
    }

    fn with_tree(tree: FamilyTree, layout_options: LayoutOptions) -> Self {
        let status = format!("{} record(s) loaded.", tree.len());
        let mut app = Self {
            tree,
            form: MemberForm::default(),
            tooltips: TooltipTracker::default(),
            painter: FamilyPainter::default(),
            layout_options,
            scene: None,
            scene_revision: None,
            message_dialog: None,
            status,
        };
        app.refresh_scene();
        app
    }

    /// Rebuild the scene from scratch when the tree changed since the last build.
    fn refresh_scene(&mut self) -> &FamilySceneGraph {
        let revision = self.tree.revision();
        if self.scene_revision != Some(revision) {
            self.scene = None;
            self.scene_revision = Some(revision);
        }
        let (tree, options, painter) = (&self.tree, self.layout_options, &self.painter);
        self.scene.get_or_insert_with(|| {
            let layout = FamilyLayout::from_tree(tree, options);
            build_family_scene(&layout, painter)
        })
    }

    fn apply_action(&mut self, action: MemberAction) {
        let outcome: ActionOutcome = self.form.submit(action, &mut self.tree);
        if outcome.succeeded {
            self.refresh_scene();
        }
        self.status = outcome.message.clone();
        self.message_dialog = Some(outcome.message);
    }

    fn export_svg_dialog(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .set_file_name("family_tree.svg")
            .save_file()
        {
            let scene = self.refresh_scene().clone();
            match export_scene_svg(&scene, &path) {
                Ok(()) => {
                    info!("Exported canvas to {}", path.display());
                    self.status = format!("Successfully exported to {}", path.display());
                }
                Err(err) => {
                    error!("SVG export failed: {err:#}");
                    self.message_dialog = Some(format!("Failed to export: {err}"));
                }
            }
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        for field in FormField::ALL {
            let label = ui.add(
                egui::Label::new(RichText::new(field.label()).color(self.painter.text_color))
                    .sense(egui::Sense::hover()),
            );
            self.tooltips
                .observe(field, label.rect, label.hovered());

            let mut edit = egui::TextEdit::singleline(self.form.value_mut(field));
            if let Some(hint) = field.hint() {
                edit = edit.hint_text(hint);
            }
            ui.add(edit);
        }

        ui.add_space(5.0);
        let add_button = egui::Button::new(RichText::new("Add Member").color(Color32::WHITE))
            .fill(self.painter.add_button_color)
            .min_size(egui::vec2(ui.available_width(), 0.0));
        if ui.add(add_button).clicked() {
            self.apply_action(MemberAction::Add);
        }

        ui.add_space(5.0);
        let remove_button =
            egui::Button::new(RichText::new("Remove Member").color(Color32::WHITE))
                .fill(self.painter.remove_button_color)
                .min_size(egui::vec2(ui.available_width(), 0.0));
        if ui.add(remove_button).clicked() {
            self.apply_action(MemberAction::Remove);
        }
    }

    fn draw_tree_canvas(&mut self, ui: &mut egui::Ui) {
        let scene = self.refresh_scene();
        let (response, painter) = ui.allocate_painter(scene.size, egui::Sense::hover());
        paint_scene(&painter, scene, response.rect.min);
    }

    fn draw_message_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.message_dialog.as_deref() else {
            return;
        };
        let mut close_clicked = false;
        // Blocks the menu, form and canvas until acknowledged.
        let modal = egui::Modal::new(egui::Id::new("message_dialog")).show(ctx, |ui| {
            ui.heading("Message");
            ui.add_space(4.0);
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                close_clicked = true;
            }
        });
        if close_clicked || modal.should_close() {
            self.message_dialog = None;
        }
    }
}

impl eframe::App for FamilyTreeGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dialog_open = self.message_dialog.is_some();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export SVG…").clicked() {
                        ui.close();
                        self.export_svg_dialog();
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("famtree_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                ui.separator();
                ui.label(format!("Records: {}", self.tree.len()));
            });
        });

        egui::SidePanel::right("details_panel")
            .exact_width(DETAILS_PANEL_WIDTH)
            .resizable(false)
            .frame(
                egui::Frame::new()
                    .fill(self.painter.panel_color)
                    .inner_margin(egui::Margin::symmetric(10, 0)),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(!dialog_open, |ui| self.draw_controls(ui));
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.painter.background_color))
            .show(ctx, |ui| {
                egui::ScrollArea::both()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.draw_tree_canvas(ui);
                    });
            });

        if let Some(overlay) = self.tooltips.overlay() {
            overlay.show(ctx, self.painter.panel_color);
        }

        self.draw_message_dialog(ctx);
    }
}
