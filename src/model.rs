use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

/// Discriminant for every tree entry, decided once when the model is built.
///
/// `Category` is the synthetic grouping level ("Nodes", "Products") inserted
/// under a system; it has no backing id and no detail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    System,
    Category,
    Node,
    Product,
    FunctionBlock,
    Signal,
}

impl ItemKind {
    /// The `type` query parameter the backend expects for this kind.
    /// Categories are purely presentational and have no backend identity.
    pub fn query_tag(&self) -> Option<&'static str> {
        match self {
            ItemKind::System => Some("system"),
            ItemKind::Node => Some("node"),
            ItemKind::Product => Some("product"),
            ItemKind::FunctionBlock => Some("functionblock"),
            ItemKind::Signal => Some("signal"),
            ItemKind::Category => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::System => "System",
            ItemKind::Category => "Category",
            ItemKind::Node => "Node",
            ItemKind::Product => "Product",
            ItemKind::FunctionBlock => "Function Block",
            ItemKind::Signal => "Signal",
        }
    }
}

/// Backend ids arrive as JSON numbers (database keys) or strings depending
/// on the serializer; normalize both to `String`.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemDoc {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeDoc>,
    #[serde(default)]
    pub products: Vec<ProductDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeDoc {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "functionBlocks")]
    pub function_blocks: Vec<FunctionBlockDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductDoc {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub signals: Vec<SignalDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionBlockDoc {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalDoc {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag: String,
}

/// One normalized tree entry. Built once per document, immutable afterwards;
/// presentation state (expansion, selection) lives outside the model.
#[derive(Debug, Clone)]
pub struct TreeItem {
    /// Stable path key ("System A/Nodes/Node 1"), used for the expansion set.
    pub key: String,
    /// Backend id; `None` only for `Category` entries.
    pub id: Option<String>,
    pub kind: ItemKind,
    pub label: String,
    pub children: Vec<TreeItem>,
}

impl TreeItem {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A flattened, render-ready row produced by [`visible_rows`].
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub key: String,
    pub id: Option<String>,
    pub kind: ItemKind,
    pub label: String,
    pub level: usize,
    pub has_children: bool,
    pub is_expanded: bool,
}

impl TreeRow {
    /// The `(type, id)` pair a details request for this row would use.
    /// `None` for categories and id-less rows, which never issue one.
    pub fn details_request(&self) -> Option<(&'static str, &str)> {
        Some((self.kind.query_tag()?, self.id.as_deref()?))
    }
}

/// Join a parent path and a child segment into a path key.
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}/{segment}")
    }
}

fn display_label(name: &str, tag: &str) -> String {
    if name.is_empty() {
        tag.to_string()
    } else {
        name.to_string()
    }
}

/// Convert the wire document into the normalized tree, preserving input
/// order at every level.
///
/// A system's children are partitioned into a "Nodes" category followed by
/// a "Products" category; each group is present iff its list is non-empty.
/// Nodes carry their function blocks, products their signals. Pure: no I/O,
/// input untouched.
pub fn build_tree(systems: &[SystemDoc]) -> Vec<TreeItem> {
    systems
        .iter()
        .map(|system| {
            let key = join_path("", &system.name);
            let mut children = Vec::new();

            if !system.nodes.is_empty() {
                let cat_key = join_path(&key, "Nodes");
                children.push(TreeItem {
                    key: cat_key.clone(),
                    id: None,
                    kind: ItemKind::Category,
                    label: "Nodes".to_string(),
                    children: system
                        .nodes
                        .iter()
                        .map(|node| build_node(node, &cat_key))
                        .collect(),
                });
            }

            if !system.products.is_empty() {
                let cat_key = join_path(&key, "Products");
                children.push(TreeItem {
                    key: cat_key.clone(),
                    id: None,
                    kind: ItemKind::Category,
                    label: "Products".to_string(),
                    children: system
                        .products
                        .iter()
                        .map(|product| build_product(product, &cat_key))
                        .collect(),
                });
            }

            TreeItem {
                key,
                id: Some(system.id.clone()),
                kind: ItemKind::System,
                label: system.name.clone(),
                children,
            }
        })
        .collect()
}

fn build_node(node: &NodeDoc, parent_key: &str) -> TreeItem {
    let key = join_path(parent_key, &node.name);
    TreeItem {
        key: key.clone(),
        id: Some(node.id.clone()),
        kind: ItemKind::Node,
        label: node.name.clone(),
        children: node
            .function_blocks
            .iter()
            .map(|fb| {
                let label = display_label(&fb.name, &fb.tag);
                TreeItem {
                    key: join_path(&key, &label),
                    id: Some(fb.id.clone()),
                    kind: ItemKind::FunctionBlock,
                    label,
                    children: Vec::new(),
                }
            })
            .collect(),
    }
}

fn build_product(product: &ProductDoc, parent_key: &str) -> TreeItem {
    let key = join_path(parent_key, &product.name);
    TreeItem {
        key: key.clone(),
        id: Some(product.id.clone()),
        kind: ItemKind::Product,
        label: product.name.clone(),
        children: product
            .signals
            .iter()
            .map(|signal| {
                let label = display_label(&signal.name, &signal.tag);
                TreeItem {
                    key: join_path(&key, &label),
                    id: Some(signal.id.clone()),
                    kind: ItemKind::Signal,
                    label,
                    children: Vec::new(),
                }
            })
            .collect(),
    }
}

/// Flatten the tree into the ordered row list the UI draws.
///
/// Depth-first over `items`; children are emitted iff the parent's key is in
/// `expanded`. Pure function of its inputs: the same (model, expansion set)
/// always yields the same rows.
pub fn visible_rows(items: &[TreeItem], expanded: &HashSet<String>) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_rows(items, expanded, 0, &mut rows);
    rows
}

fn push_rows(
    items: &[TreeItem],
    expanded: &HashSet<String>,
    level: usize,
    rows: &mut Vec<TreeRow>,
) {
    for item in items {
        let is_expanded = expanded.contains(&item.key);
        rows.push(TreeRow {
            key: item.key.clone(),
            id: item.id.clone(),
            kind: item.kind,
            label: item.label.clone(),
            level,
            has_children: item.has_children(),
            is_expanded,
        });
        if is_expanded {
            push_rows(&item.children, expanded, level + 1, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Vec<SystemDoc> {
        serde_json::from_value(json!([
            {
                "id": "sys1",
                "name": "System A",
                "type": "system",
                "nodes": [
                    {
                        "id": "n1",
                        "name": "Node 1",
                        "functionBlocks": [
                            {"id": "fb1", "tag": "FB_PUMP_01"},
                            {"id": "fb2", "tag": "FB_VALVE_02"}
                        ]
                    },
                    {"id": "n2", "name": "Node 2"}
                ],
                "products": [
                    {
                        "id": "p1",
                        "name": "Product 1",
                        "signals": [{"id": "s1", "tag": "S1"}]
                    }
                ]
            },
            {
                "id": "sys2",
                "name": "System B",
                "nodes": [{"id": "n3", "name": "Node 3"}]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn builder_preserves_order_and_counts() {
        let tree = build_tree(&sample_document());

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].label, "System A");
        assert_eq!(tree[1].label, "System B");

        // System A: Nodes category first, Products second.
        let categories = &tree[0].children;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].label, "Nodes");
        assert_eq!(categories[1].label, "Products");

        let nodes = &categories[0].children;
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].label, "Node 1");
        assert_eq!(nodes[1].label, "Node 2");

        let fbs = &nodes[0].children;
        assert_eq!(fbs.len(), 2);
        assert_eq!(fbs[0].label, "FB_PUMP_01");
        assert_eq!(fbs[1].label, "FB_VALVE_02");

        let signals = &categories[1].children[0].children;
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].label, "S1");
    }

    #[test]
    fn category_only_for_present_groups() {
        let tree = build_tree(&sample_document());

        // System B has no products: a single Nodes category.
        let categories = &tree[1].children;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Nodes");
        assert_eq!(categories[0].kind, ItemKind::Category);
        assert!(categories[0].id.is_none());
    }

    #[test]
    fn kinds_and_ids_are_assigned_once() {
        let tree = build_tree(&sample_document());
        assert_eq!(tree[0].kind, ItemKind::System);
        assert_eq!(tree[0].id.as_deref(), Some("sys1"));

        let node = &tree[0].children[0].children[0];
        assert_eq!(node.kind, ItemKind::Node);
        assert_eq!(node.id.as_deref(), Some("n1"));
        assert_eq!(node.children[0].kind, ItemKind::FunctionBlock);

        let signal = &tree[0].children[1].children[0].children[0];
        assert_eq!(signal.kind, ItemKind::Signal);
        assert_eq!(signal.id.as_deref(), Some("s1"));
    }

    #[test]
    fn numeric_ids_normalize_to_strings() {
        let systems: Vec<SystemDoc> = serde_json::from_value(json!([
            {"id": 7, "name": "S", "nodes": [{"id": 12, "name": "N"}]}
        ]))
        .unwrap();
        assert_eq!(systems[0].id, "7");
        assert_eq!(systems[0].nodes[0].id, "12");
    }

    #[test]
    fn initial_rows_are_collapsed_top_level() {
        let tree = build_tree(&sample_document());
        let rows = visible_rows(&tree, &HashSet::new());

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| !row.is_expanded));
        assert!(rows.iter().all(|row| row.level == 0));
    }

    #[test]
    fn affordance_iff_children() {
        let tree = build_tree(&sample_document());
        let mut expanded = HashSet::new();
        expanded.insert("System A".to_string());
        expanded.insert("System A/Nodes".to_string());
        expanded.insert("System A/Nodes/Node 1".to_string());

        let rows = visible_rows(&tree, &expanded);
        for row in &rows {
            match row.label.as_str() {
                "System A" | "System B" | "Nodes" | "Node 1" => assert!(row.has_children),
                "Node 2" | "FB_PUMP_01" | "FB_VALVE_02" => assert!(!row.has_children),
                other => panic!("unexpected row {other}"),
            }
        }
    }

    #[test]
    fn flatten_is_idempotent_and_toggle_round_trips() {
        let tree = build_tree(&sample_document());
        let mut expanded = HashSet::new();

        let initial = visible_rows(&tree, &expanded);
        assert_eq!(row_keys(&visible_rows(&tree, &expanded)), row_keys(&initial));

        expanded.insert("System A".to_string());
        let opened = visible_rows(&tree, &expanded);
        assert!(opened.len() > initial.len());

        expanded.remove("System A");
        assert_eq!(row_keys(&visible_rows(&tree, &expanded)), row_keys(&initial));
    }

    #[test]
    fn collapsing_a_parent_hides_descendants_but_keeps_their_state() {
        let tree = build_tree(&sample_document());
        let mut expanded = HashSet::new();
        expanded.insert("System A".to_string());
        expanded.insert("System A/Nodes".to_string());

        // Collapse the system; the Nodes category stays in the set and
        // reappears expanded when the system is reopened.
        expanded.remove("System A");
        let rows = visible_rows(&tree, &expanded);
        assert_eq!(rows.len(), 2);

        expanded.insert("System A".to_string());
        let rows = visible_rows(&tree, &expanded);
        let nodes_row = rows.iter().find(|row| row.label == "Nodes").unwrap();
        assert!(nodes_row.is_expanded);
    }

    #[test]
    fn categories_never_issue_details_requests() {
        let tree = build_tree(&sample_document());
        let mut expanded = HashSet::new();
        expanded.insert("System A".to_string());

        let rows = visible_rows(&tree, &expanded);
        let system = rows.iter().find(|row| row.label == "System A").unwrap();
        let category = rows.iter().find(|row| row.label == "Nodes").unwrap();

        assert_eq!(system.details_request(), Some(("system", "sys1")));
        assert_eq!(category.details_request(), None);
    }

    #[test]
    fn end_to_end_single_system_document() {
        let systems: Vec<SystemDoc> = serde_json::from_value(json!([
            {
                "id": "sys1",
                "name": "System A",
                "type": "system",
                "nodes": [{"id": "n1", "name": "Node 1", "type": "node"}]
            }
        ]))
        .unwrap();
        let tree = build_tree(&systems);

        let rows = visible_rows(&tree, &HashSet::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "System A");
        assert!(!rows[0].is_expanded);

        let mut expanded = HashSet::new();
        expanded.insert("System A".to_string());
        expanded.insert("System A/Nodes".to_string());
        let rows = visible_rows(&tree, &expanded);
        let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, ["System A", "Nodes", "Node 1"]);

        let node = rows.last().unwrap();
        assert_eq!(node.kind.query_tag(), Some("node"));
        assert_eq!(node.id.as_deref(), Some("n1"));
    }

    fn row_keys(rows: &[TreeRow]) -> Vec<String> {
        rows.iter().map(|row| row.key.clone()).collect()
    }
}
