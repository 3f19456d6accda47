use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use log::info;

use crate::app::AppConfig;
use crate::export::svg::export_scene_svg;
use crate::tree::layout::FamilyLayout;
use crate::tree::painter::FamilyPainter;
use crate::tree::scene_graph::build_family_scene;
use crate::tree::FamilyTree;

/// Text summary of the tree, one block per record.
pub fn preview_text(tree: &FamilyTree, config: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Family tree with {} record(s) ({:?} layout, {:?} child slots).",
        tree.len(),
        config.layout,
        config.child_slots
    );

    if tree.is_empty() {
        let _ = writeln!(out, "(no records)");
    }
    for name in tree.names() {
        let Some(person) = tree.get(name) else {
            continue;
        };
        let _ = writeln!(out, "- {name}");
        for line in person.detail_text().lines() {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

pub fn render_preview(tree: &FamilyTree, config: &AppConfig) {
    print!("{}", preview_text(tree, config));
}

pub fn export(tree: &FamilyTree, config: &AppConfig, output: &Path) -> Result<()> {
    let layout = FamilyLayout::from_tree(tree, config.layout_options());
    let scene = build_family_scene(&layout, &FamilyPainter::default());
    export_scene_svg(&scene, output)?;
    info!(
        "Exported {} node(s) and {} edge(s) to {}",
        scene.circle_count(),
        scene.line_count(),
        output.display()
    );
    println!("Exported family tree to {}.", output.display());
    Ok(())
}
