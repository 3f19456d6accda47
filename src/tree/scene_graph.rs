use eframe::egui::{self, Color32, Pos2, Rect, Vec2};

use crate::tree::layout::{FamilyLayout, PlacedNode, NODE_RADIUS};
use crate::tree::painter::FamilyPainter;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScenePrimitive {
    FillRect {
        rect: Rect,
        color: Color32,
    },
    FillCircle {
        center: Pos2,
        radius: f32,
        color: Color32,
        outline: StrokeStyle,
    },
    StrokeLine {
        from: Pos2,
        to: Pos2,
        style: StrokeStyle,
    },
    Text {
        text: String,
        anchor: Pos2,
        align: egui::Align2,
        size: f32,
        color: Color32,
    },
}

/// Everything drawn on the canvas, in paint order, in canvas-local points.
#[derive(Clone, Debug)]
pub struct FamilySceneGraph {
    pub size: Vec2,
    pub primitives: Vec<ScenePrimitive>,
}

impl FamilySceneGraph {
    pub fn circle_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, ScenePrimitive::FillCircle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, ScenePrimitive::StrokeLine { .. }))
            .count()
    }
}

fn to_pos((x, y): (f32, f32)) -> Pos2 {
    Pos2::new(x, y)
}

/// Rebuild the whole scene. The first primitive clears the canvas.
pub fn build_family_scene(layout: &FamilyLayout, painter: &FamilyPainter) -> FamilySceneGraph {
    let size = Vec2::new(layout.width, layout.height);
    let mut primitives = Vec::with_capacity(1 + layout.node_count() * 3 + layout.groups.len());

    primitives.push(ScenePrimitive::FillRect {
        rect: Rect::from_min_size(Pos2::ZERO, size),
        color: painter.background_color,
    });

    let push_node = |primitives: &mut Vec<ScenePrimitive>, node: &PlacedNode| {
        primitives.push(ScenePrimitive::FillCircle {
            center: to_pos(node.center),
            radius: NODE_RADIUS,
            color: painter.node_fill,
            outline: painter.node_outline,
        });
        primitives.push(ScenePrimitive::Text {
            text: node.name.clone(),
            anchor: to_pos(node.center),
            align: egui::Align2::CENTER_CENTER,
            size: painter.label_font_size,
            color: painter.text_color,
        });
    };

    for group in &layout.groups {
        push_node(&mut primitives, &group.parent);
        primitives.push(ScenePrimitive::Text {
            text: group.detail.clone(),
            anchor: to_pos(group.detail_anchor),
            align: egui::Align2::CENTER_CENTER,
            size: painter.detail_font_size,
            color: painter.text_color,
        });

        for child in &group.children {
            push_node(&mut primitives, &child.node);
            primitives.push(ScenePrimitive::StrokeLine {
                from: to_pos(child.edge.0),
                to: to_pos(child.edge.1),
                style: painter.edge_stroke,
            });
        }
    }

    FamilySceneGraph { size, primitives }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::layout::LayoutOptions;
    use crate::tree::FamilyTree;

    fn example_scene() -> FamilySceneGraph {
        let layout = FamilyLayout::from_tree(&FamilyTree::example(), LayoutOptions::default());
        build_family_scene(&layout, &FamilyPainter::default())
    }

    #[test]
    fn scene_starts_by_clearing_canvas() {
        let scene = example_scene();
        assert_eq!(scene.size, Vec2::new(800.0, 600.0));
        match &scene.primitives[0] {
            ScenePrimitive::FillRect { rect, color } => {
                assert_eq!(rect.size(), scene.size);
                assert_eq!(*color, Color32::from_rgb(0x1E, 0x1E, 0x1E));
            }
            other => panic!("expected background fill, got {other:?}"),
        }
    }

    #[test]
    fn one_circle_per_node_and_one_line_per_child() {
        let scene = example_scene();
        assert_eq!(scene.circle_count(), 9);
        assert_eq!(scene.line_count(), 6);
    }

    #[test]
    fn parent_is_drawn_before_its_details_and_children() {
        let scene = example_scene();
        let texts: Vec<&str> = scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                ScenePrimitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0], "John");
        assert!(texts[1].starts_with("Spouse: Jane"));
        assert_eq!(&texts[2..4], &["Mary", "Tom"]);
        assert_eq!(texts[4], "Mary");
    }

    #[test]
    fn edges_join_parent_bottom_to_child_top() {
        let scene = example_scene();
        let first_edge = scene.primitives.iter().find_map(|p| match p {
            ScenePrimitive::StrokeLine { from, to, .. } => Some((*from, *to)),
            _ => None,
        });
        assert_eq!(
            first_edge,
            Some((Pos2::new(200.0, 120.0), Pos2::new(150.0, 230.0)))
        );
    }

    #[test]
    fn empty_tree_only_clears() {
        let layout = FamilyLayout::from_tree(&FamilyTree::default(), LayoutOptions::default());
        let scene = build_family_scene(&layout, &FamilyPainter::default());
        assert_eq!(scene.primitives.len(), 1);
    }
}
