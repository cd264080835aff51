//! Example: Retrofit table accessibility metadata

use axs_dom::{Document, DomTree, NodeId};
use axs_engine::{RemediationConfig, Remediator};

fn child(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    let node = tree.create_element(tag);
    tree.append_child(parent, node);
    node
}

fn labeled_cell(tree: &mut DomTree, row: NodeId, tag: &str, label: &str) -> NodeId {
    let cell = child(tree, row, tag);
    let text = tree.create_text(label);
    tree.append_child(cell, text);
    cell
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Build a small price table by hand; a host application would hand us
    // a parsed document instead.
    let mut document = Document::new("about:blank");
    let body = document.body();
    let tree = document.tree_mut();

    let table = child(tree, body, "table");
    let thead = child(tree, table, "thead");
    let head_row = child(tree, thead, "tr");
    labeled_cell(tree, head_row, "th", "Item");
    labeled_cell(tree, head_row, "th", "Price");

    let tbody = child(tree, table, "tbody");
    for (item, price) in [("Apples", "2.10"), ("Pears", "2.60")] {
        let row = child(tree, tbody, "tr");
        labeled_cell(tree, row, "td", item);
        labeled_cell(tree, row, "td", price);
    }

    let mut remediator = Remediator::new(RemediationConfig::default());
    let report = remediator.remediate_document(&mut document);

    println!(
        "fixed {} tables: {} column headers, {} cells associated",
        report.tables, report.column_headers, report.cells_associated
    );

    let tree = document.tree();
    for tr in tree.descendants_by_tag(tree.root(), "tr") {
        for cell in tree.children(tr) {
            let Some(tag) = tree.tag_name(cell) else { continue };
            let id = tree.attr(cell, "id").unwrap_or("-");
            let scope = tree.attr(cell, "scope").unwrap_or("-");
            let headers = tree.attr(cell, "headers").unwrap_or("-");
            println!("<{tag}> id={id} scope={scope} headers={headers}");
        }
    }
}
