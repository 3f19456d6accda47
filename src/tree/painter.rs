use eframe::egui::{self, Color32, FontId, Pos2, Stroke, Vec2};

use crate::tree::scene_graph::{FamilySceneGraph, ScenePrimitive, StrokeStyle};

/// Colours and font sizes for the family canvas.
#[derive(Clone, Debug)]
pub struct FamilyPainter {
    pub background_color: Color32,
    pub panel_color: Color32,
    pub node_fill: Color32,
    pub node_outline: StrokeStyle,
    pub edge_stroke: StrokeStyle,
    pub text_color: Color32,
    pub label_font_size: f32,
    pub detail_font_size: f32,
    pub add_button_color: Color32,
    pub remove_button_color: Color32,
}

impl Default for FamilyPainter {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            panel_color: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            node_fill: Color32::from_rgb(0x3F, 0x3F, 0x3F),
            node_outline: StrokeStyle {
                width: 1.0,
                color: Color32::BLACK,
            },
            edge_stroke: StrokeStyle {
                width: 1.0,
                color: Color32::WHITE,
            },
            text_color: Color32::WHITE,
            label_font_size: 12.0,
            detail_font_size: 12.0,
            add_button_color: Color32::from_rgb(0x4C, 0xAF, 0x50),
            remove_button_color: Color32::from_rgb(0xF4, 0x43, 0x36),
        }
    }
}

impl From<StrokeStyle> for Stroke {
    fn from(style: StrokeStyle) -> Self {
        Stroke::new(style.width, style.color)
    }
}

/// Paint a scene onto an egui painter, with scene coordinates offset by `origin`.
pub fn paint_scene(painter: &egui::Painter, scene: &FamilySceneGraph, origin: Pos2) {
    let offset = origin.to_vec2();
    for primitive in &scene.primitives {
        paint_primitive(painter, primitive, offset);
    }
}

fn paint_primitive(painter: &egui::Painter, primitive: &ScenePrimitive, offset: Vec2) {
    match primitive {
        ScenePrimitive::FillRect { rect, color } => {
            painter.rect_filled(rect.translate(offset), 0.0, *color);
        }
        ScenePrimitive::FillCircle {
            center,
            radius,
            color,
            outline,
        } => {
            painter.circle(*center + offset, *radius, *color, Stroke::from(*outline));
        }
        ScenePrimitive::StrokeLine { from, to, style } => {
            painter.line_segment([*from + offset, *to + offset], Stroke::from(*style));
        }
        ScenePrimitive::Text {
            text,
            anchor,
            align,
            size,
            color,
        } => {
            painter.text(
                *anchor + offset,
                *align,
                text,
                FontId::proportional(*size),
                *color,
            );
        }
    }
}
