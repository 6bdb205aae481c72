//! Standalone HTML report generation.
//!
//! Reproduces the backend UI's nested-list markup for the tree and the
//! properties-table markup for a detail record, so a browse session can be
//! handed around as a single static file. All functions are pure string
//! builders; file I/O stays with the caller.

use crate::details::DetailsView;
use crate::model::{ItemKind, TreeItem};

/// Escape text for embedding into HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn data_type(item: &TreeItem) -> &'static str {
    match item.kind {
        ItemKind::Category => {
            if item.label == "Nodes" {
                "nodes-category"
            } else {
                "products-category"
            }
        }
        // Every concrete kind has a query tag.
        kind => kind.query_tag().unwrap_or("item"),
    }
}

/// Render the tree as nested `<ul>`/`<li>` markup.
///
/// Each item carries `data-id` (empty for categories) and `data-type`
/// attributes, a toggle affordance whose `+` glyph is present iff the item
/// has children, and its escaped display label. Identical input yields
/// byte-identical output.
pub fn tree_html(items: &[TreeItem]) -> String {
    let mut out = String::new();
    push_list(items, &mut out);
    out
}

fn push_list(items: &[TreeItem], out: &mut String) {
    out.push_str("<ul>");
    for item in items {
        let id = item.id.as_deref().unwrap_or("");
        out.push_str(&format!(
            "<li data-id=\"{}\" data-type=\"{}\">",
            escape_html(id),
            data_type(item)
        ));
        out.push_str(&format!(
            "<span class=\"toggle\">{}</span>",
            if item.has_children() { "+" } else { "" }
        ));
        out.push_str(&format!(
            "<span class=\"item-name\">{}</span>",
            escape_html(&item.label)
        ));
        if item.has_children() {
            push_list(&item.children, out);
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

/// Render one detail record view: header, scalar properties table, and the
/// type-specific sections (project, variables, collapsible code blobs).
pub fn details_html(view: &DetailsView) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h3>{}</h3>", escape_html(&view.title)));
    out.push_str(&format!(
        "<p><strong>Type:</strong> {}</p>",
        escape_html(&view.type_tag)
    ));

    out.push_str("<table class=\"details-table\">");
    out.push_str("<thead><tr><th>Property</th><th>Value</th></tr></thead><tbody>");
    for (key, value) in &view.properties {
        out.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            escape_html(key),
            escape_html(value)
        ));
    }
    out.push_str("</tbody></table>");

    if let Some(project) = &view.project {
        out.push_str("<h4>Project</h4><table class=\"details-table\">");
        out.push_str(&format!(
            "<tr><td><strong>Name</strong></td><td>{}</td></tr>",
            escape_html(project)
        ));
        out.push_str("</table>");
    }

    if !view.variables.is_empty() {
        out.push_str("<h4>Variables</h4><table class=\"details-table\">");
        out.push_str("<thead><tr><th>Direction</th><th>Signal</th></tr></thead><tbody>");
        for variable in &view.variables {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&variable.direction),
                escape_html(&variable.signal_tag)
            ));
        }
        out.push_str("</tbody></table>");
    }

    for blob in &view.blobs {
        // <details> is closed by default, matching the in-app spoilers.
        out.push_str(&format!(
            "<details class=\"spoiler\"><summary>{}</summary>",
            escape_html(blob.field)
        ));
        out.push_str(&format!(
            "<pre><code class=\"{}\">{}</code></pre></details>",
            blob.language.css_class(),
            escape_html(&blob.text)
        ));
    }

    out
}

/// Wrap tree and (optionally) details markup into a complete document.
pub fn report_page(tree: &str, details: Option<&str>, generated_at: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    out.push_str("<title>Project Structure</title><style>");
    out.push_str(
        "body{font-family:sans-serif;margin:2em}ul{list-style:none;padding-left:1.2em}\
         .toggle{display:inline-block;width:1em;color:#888}\
         .details-table{border-collapse:collapse;margin:.5em 0}\
         .details-table td,.details-table th{border:1px solid #ccc;padding:.2em .6em}\
         .spoiler{margin:.5em 0}pre{background:#f4f4f4;padding:.6em;overflow:auto}",
    );
    out.push_str("</style></head><body>");
    out.push_str(&format!(
        "<p class=\"generated\">Generated {}</p>",
        escape_html(generated_at)
    ));
    out.push_str("<div class=\"tree\">");
    out.push_str(tree);
    out.push_str("</div>");
    if let Some(details) = details {
        out.push_str("<div class=\"details\">");
        out.push_str(details);
        out.push_str("</div>");
    }
    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_tree;
    use serde_json::json;

    fn sample_tree() -> Vec<TreeItem> {
        let systems: Vec<crate::model::SystemDoc> = serde_json::from_value(json!([
            {
                "id": "sys1",
                "name": "System <A>",
                "nodes": [{"id": "n1", "name": "Node 1"}],
                "products": [{"id": "p1", "name": "Product 1"}]
            }
        ]))
        .unwrap();
        build_tree(&systems)
    }

    #[test]
    fn markup_is_idempotent() {
        let tree = sample_tree();
        assert_eq!(tree_html(&tree), tree_html(&tree));
    }

    #[test]
    fn items_carry_id_and_type_attributes() {
        let html = tree_html(&sample_tree());
        assert!(html.contains("data-id=\"sys1\" data-type=\"system\""));
        assert!(html.contains("data-id=\"n1\" data-type=\"node\""));
        assert!(html.contains("data-id=\"\" data-type=\"nodes-category\""));
        assert!(html.contains("data-id=\"\" data-type=\"products-category\""));
    }

    #[test]
    fn toggle_glyph_present_iff_children() {
        let html = tree_html(&sample_tree());
        // Parents: system, nodes category, products category.
        assert_eq!(html.matches("<span class=\"toggle\">+</span>").count(), 3);
        // Leaves: node, product.
        assert_eq!(html.matches("<span class=\"toggle\"></span>").count(), 2);
    }

    #[test]
    fn labels_are_escaped() {
        let html = tree_html(&sample_tree());
        assert!(html.contains("System &lt;A&gt;"));
        assert!(!html.contains("System <A>"));
    }

    #[test]
    fn categories_nest_nodes_before_products() {
        let html = tree_html(&sample_tree());
        let nodes_at = html.find("nodes-category").unwrap();
        let products_at = html.find("products-category").unwrap();
        assert!(nodes_at < products_at);

        // Node 1 sits inside the nodes category's nested list.
        let node_at = html.find("Node 1").unwrap();
        assert!(nodes_at < node_at && node_at < products_at);
    }

    #[test]
    fn code_blob_text_is_escaped() {
        let record = json!({"tag": "FB_1", "call": "<x>"});
        let view = DetailsView::from_record("functionblock", record.as_object().unwrap());
        let html = details_html(&view);

        assert!(html.contains("&lt;x&gt;"));
        assert!(!html.contains("<x>"));
        assert!(html.contains("class=\"language-st\""));
        assert!(html.contains("<details class=\"spoiler\"><summary>call</summary>"));
    }

    #[test]
    fn variables_table_rows_in_order() {
        let record = json!({
            "tag": "FB_1",
            "variables": [
                {"direction": "in", "signalTag": "S1"},
                {"direction": "out", "signalTag": "S2"}
            ]
        });
        let view = DetailsView::from_record("functionblock", record.as_object().unwrap());
        let html = details_html(&view);

        let first = html.find("<tr><td>in</td><td>S1</td></tr>").unwrap();
        let second = html.find("<tr><td>out</td><td>S2</td></tr>").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("<td>S1</td>").count(), 1);
    }

    #[test]
    fn page_wraps_tree_and_details() {
        let page = report_page("<ul></ul>", Some("<h3>X</h3>"), "2026-01-01 12:00:00");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<div class=\"tree\"><ul></ul></div>"));
        assert!(page.contains("<div class=\"details\"><h3>X</h3></div>"));
        assert!(page.contains("Generated 2026-01-01 12:00:00"));
    }

    #[test]
    fn escape_covers_attribute_contexts() {
        assert_eq!(escape_html(r#"a&b<c>"d'e"#), "a&amp;b&lt;c&gt;&quot;d&#39;e");
    }
}
