use std::collections::HashSet;

use eframe::egui::{self, Color32, Pos2, RichText, Stroke};

use super::form::FormField;

/// Offset of the overlay from the label's top-left corner.
const TOOLTIP_OFFSET: egui::Vec2 = egui::vec2(25.0, 20.0);

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Enter { field: FormField, origin: Pos2 },
    Leave { field: FormField },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActiveTooltip {
    pub field: FormField,
    pub position: Pos2,
}

/// Next tooltip state after a pointer event. Leaving the active label clears
/// it; leaving any other label changes nothing.
pub fn transition(active: Option<ActiveTooltip>, event: PointerEvent) -> Option<ActiveTooltip> {
    match event {
        PointerEvent::Enter { field, origin } => Some(ActiveTooltip {
            field,
            position: origin + TOOLTIP_OFFSET,
        }),
        PointerEvent::Leave { field } => active.filter(|tip| tip.field != field),
    }
}

/// Turns per-frame hover flags into enter/leave events.
#[derive(Debug, Default)]
pub struct TooltipTracker {
    active: Option<ActiveTooltip>,
    hovered: HashSet<FormField>,
}

impl TooltipTracker {
    pub fn observe(&mut self, field: FormField, label_rect: egui::Rect, hovered: bool) {
        let was_hovered = self.hovered.contains(&field);
        let event = match (was_hovered, hovered) {
            (false, true) => {
                self.hovered.insert(field);
                PointerEvent::Enter {
                    field,
                    origin: label_rect.left_top(),
                }
            }
            (true, false) => {
                self.hovered.remove(&field);
                PointerEvent::Leave { field }
            }
            _ => return,
        };
        self.active = transition(self.active, event);
    }

    pub fn active(&self) -> Option<ActiveTooltip> {
        self.active
    }

    /// The overlay for this frame, if any. It is drawn by consuming it, so
    /// nothing survives past the frame in which the pointer leaves.
    pub fn overlay(&self) -> Option<TooltipOverlay> {
        self.active().map(|tip| TooltipOverlay {
            text: tip.field.help(),
            position: tip.position,
        })
    }
}

pub struct TooltipOverlay {
    text: &'static str,
    position: Pos2,
}

impl TooltipOverlay {
    pub fn show(self, ctx: &egui::Context, background: Color32) {
        egui::Area::new(egui::Id::new("field_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(self.position)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(background)
                    .stroke(Stroke::new(1.0, Color32::WHITE))
                    .inner_margin(egui::Margin::symmetric(5, 1))
                    .show(ui, |ui| {
                        ui.label(RichText::new(self.text).color(Color32::WHITE));
                    });
            });
    }
}
