use clap::ValueEnum;

use super::FamilyTree;

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;
pub const NODE_RADIUS: f32 = 20.0;
pub const PARENT_ANCHOR: (f32, f32) = (200.0, 100.0);
pub const DETAIL_OFFSET: f32 = 40.0;
pub const CHILD_ROW_Y: f32 = 250.0;
pub const CHILD_SPACING: f32 = 100.0;
pub const STACK_SPACING: f32 = 250.0;

/// Where each top-level record is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LayoutMode {
    /// Every parent shares the fixed anchor, so several roots overlap.
    #[default]
    Reference,
    /// Parent `k` is shifted down by `k` rows.
    Stacked,
}

/// How a child's horizontal slot is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChildSlots {
    /// Repeated names all use the index of their first occurrence.
    #[default]
    FirstOccurrence,
    /// Each entry uses its own position in the children list.
    Sequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    pub mode: LayoutMode,
    pub child_slots: ChildSlots,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub name: String,
    pub center: (f32, f32),
}

impl PlacedNode {
    pub fn top(&self) -> (f32, f32) {
        (self.center.0, self.center.1 - NODE_RADIUS)
    }

    pub fn bottom(&self) -> (f32, f32) {
        (self.center.0, self.center.1 + NODE_RADIUS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedChild {
    pub node: PlacedNode,
    pub edge: ((f32, f32), (f32, f32)),
}

/// Geometry for one top-level record, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyGroup {
    pub parent: PlacedNode,
    pub detail: String,
    pub detail_anchor: (f32, f32),
    pub children: Vec<PlacedChild>,
}

#[derive(Debug, Clone)]
pub struct FamilyLayout {
    pub groups: Vec<FamilyGroup>,
    pub width: f32,
    pub height: f32,
}

impl FamilyLayout {
    /// Lay out every top-level record in insertion order. Children are not
    /// followed into their own records.
    pub fn from_tree(tree: &FamilyTree, options: LayoutOptions) -> Self {
        let mut groups = Vec::with_capacity(tree.len());

        for (row, (name, person)) in tree.iter().enumerate() {
            let shift = match options.mode {
                LayoutMode::Reference => 0.0,
                LayoutMode::Stacked => STACK_SPACING * row as f32,
            };

            let parent = PlacedNode {
                name: name.to_string(),
                center: (PARENT_ANCHOR.0, PARENT_ANCHOR.1 + shift),
            };
            let detail_anchor = (parent.center.0, parent.center.1 + DETAIL_OFFSET);

            let children = person
                .children
                .iter()
                .enumerate()
                .map(|(index, child)| {
                    let slot = child_slot(&person.children, index, options.child_slots);
                    let node = PlacedNode {
                        name: child.clone(),
                        center: (child_x(slot), CHILD_ROW_Y + shift),
                    };
                    let edge = (parent.bottom(), node.top());
                    PlacedChild { node, edge }
                })
                .collect();

            groups.push(FamilyGroup {
                parent,
                detail: person.detail_text(),
                detail_anchor,
                children,
            });
        }

        let height = match options.mode {
            LayoutMode::Reference => CANVAS_HEIGHT,
            LayoutMode::Stacked => {
                let rows = groups.len().max(1) as f32;
                CANVAS_HEIGHT.max(CHILD_ROW_Y + STACK_SPACING * (rows - 1.0) + 2.0 * NODE_RADIUS)
            }
        };

        Self {
            groups,
            width: CANVAS_WIDTH,
            height,
        }
    }

    pub fn node_count(&self) -> usize {
        self.groups
            .iter()
            .map(|group| 1 + group.children.len())
            .sum()
    }
}

fn child_slot(children: &[String], index: usize, policy: ChildSlots) -> usize {
    match policy {
        ChildSlots::Sequence => index,
        ChildSlots::FirstOccurrence => children
            .iter()
            .position(|name| *name == children[index])
            .unwrap_or(index),
    }
}

fn child_x(slot: usize) -> f32 {
    PARENT_ANCHOR.0 + CHILD_SPACING * (slot as f32 - 0.5)
}
