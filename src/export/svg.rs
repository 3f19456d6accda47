use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui;
use svg::node::element::{Circle, Group, Line, Rectangle, Text};
use svg::Document;

use crate::tree::scene_graph::{FamilySceneGraph, ScenePrimitive};

const LINE_HEIGHT: f32 = 1.2;

/// Build an SVG document mirroring the canvas scene.
pub fn scene_to_document(scene: &FamilySceneGraph) -> Document {
    let width = scene.size.x;
    let height = scene.size.y;
    let mut group = Group::new().set("font-family", "sans-serif");

    for primitive in &scene.primitives {
        match primitive {
            ScenePrimitive::FillRect { rect, color } => {
                group = group.add(
                    Rectangle::new()
                        .set("x", rect.min.x)
                        .set("y", rect.min.y)
                        .set("width", rect.width())
                        .set("height", rect.height())
                        .set("fill", color_to_hex(*color)),
                );
            }
            ScenePrimitive::FillCircle {
                center,
                radius,
                color,
                outline,
            } => {
                group = group.add(
                    Circle::new()
                        .set("cx", center.x)
                        .set("cy", center.y)
                        .set("r", *radius)
                        .set("fill", color_to_hex(*color))
                        .set("stroke", color_to_hex(outline.color))
                        .set("stroke-width", outline.width),
                );
            }
            ScenePrimitive::StrokeLine { from, to, style } => {
                group = group.add(
                    Line::new()
                        .set("x1", from.x)
                        .set("y1", from.y)
                        .set("x2", to.x)
                        .set("y2", to.y)
                        .set("stroke", color_to_hex(style.color))
                        .set("stroke-width", style.width),
                );
            }
            ScenePrimitive::Text {
                text,
                anchor,
                align,
                size,
                color,
            } => {
                // SVG text has no line breaks; emit one element per line,
                // centred as a block around the anchor.
                let lines: Vec<&str> = text.lines().collect();
                let block = *size * LINE_HEIGHT * lines.len() as f32;
                let top = match align.y() {
                    egui::Align::Min => anchor.y,
                    egui::Align::Center => anchor.y - block * 0.5,
                    egui::Align::Max => anchor.y - block,
                };
                let text_anchor = match align.x() {
                    egui::Align::Min => "start",
                    egui::Align::Center => "middle",
                    egui::Align::Max => "end",
                };
                for (index, line) in lines.iter().enumerate() {
                    let baseline = top + *size * LINE_HEIGHT * (index as f32 + 0.5);
                    group = group.add(
                        Text::new("")
                            .set("x", anchor.x)
                            .set("y", baseline)
                            .set("font-size", *size)
                            .set("fill", color_to_hex(*color))
                            .set("text-anchor", text_anchor)
                            .set("dominant-baseline", "central")
                            .add(svg::node::Text::new(*line)),
                    );
                }
            }
        }
    }

    Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width as i32, height as i32))
        .add(group)
}

pub fn export_scene_svg(scene: &FamilySceneGraph, path: &Path) -> Result<()> {
    let document = scene_to_document(scene);
    svg::save(path, &document)
        .with_context(|| format!("failed to write SVG to {}", path.display()))
}

fn color_to_hex(color: egui::Color32) -> String {
    let [r, g, b, _a] = color.to_srgba_unmultiplied();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::layout::{FamilyLayout, LayoutOptions};
    use crate::tree::painter::FamilyPainter;
    use crate::tree::scene_graph::build_family_scene;
    use crate::tree::FamilyTree;

    fn example_scene() -> FamilySceneGraph {
        let layout = FamilyLayout::from_tree(&FamilyTree::example(), LayoutOptions::default());
        build_family_scene(&layout, &FamilyPainter::default())
    }

    #[test]
    fn document_has_one_circle_per_node() {
        let markup = scene_to_document(&example_scene()).to_string();
        assert_eq!(markup.matches("<circle").count(), 9);
        assert_eq!(markup.matches("<line").count(), 6);
        assert!(markup.contains("Birthdate: 1970-01-01"));
        assert!(markup.contains("#1e1e1e"));
    }

    #[test]
    fn detail_block_is_split_into_lines() {
        let markup = scene_to_document(&example_scene()).to_string();
        assert!(markup.contains("Spouse: Jane"));
        assert!(markup.contains("Children: Mary, Tom"));
        assert!(!markup.contains("Jane\nChildren"));
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("family.svg");
        export_scene_svg(&example_scene(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
        assert!(written.contains("viewBox=\"0 0 800 600\""));
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("family.svg");
        assert!(export_scene_svg(&example_scene(), &path).is_err());
    }
}
