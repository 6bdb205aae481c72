use serde_json::{Map, Value};

use crate::highlight::Language;

/// The raw record returned by `GET /api/details`: an untyped property bag.
pub type DetailRecord = Map<String, Value>;

/// One variable binding of a function block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRow {
    pub direction: String,
    pub signal_tag: String,
}

/// A raw-text field rendered as a collapsible, syntax-highlighted block.
#[derive(Debug, Clone)]
pub struct CodeBlob {
    /// Field name as shown in the section header ("call", "omx", "opc").
    pub field: &'static str,
    pub language: Language,
    pub text: String,
}

/// Render-ready projection of one detail record. Building it performs no
/// I/O and leaves the record untouched; rendering (TUI or HTML) consumes
/// this view only.
#[derive(Debug, Clone)]
pub struct DetailsView {
    pub title: String,
    /// The `type` tag the record was requested with.
    pub type_tag: String,
    /// Scalar fields in deterministic key order; object- and array-valued
    /// fields are skipped.
    pub properties: Vec<(String, String)>,
    /// Project name, present for systems that carry a `project` object.
    pub project: Option<String>,
    /// Function-block variables in record order.
    pub variables: Vec<VariableRow>,
    /// Function-block code blobs, `call` then `omx` then `opc`.
    pub blobs: Vec<CodeBlob>,
}

impl DetailsView {
    pub fn from_record(type_tag: &str, record: &DetailRecord) -> Self {
        let title = string_field(record, "name")
            .or_else(|| string_field(record, "tag"))
            .unwrap_or_else(|| "Item".to_string());

        // Blob sources render as collapsible sections, not table rows.
        let is_blob_field =
            |key: &str| type_tag == "functionblock" && matches!(key, "call" | "omx" | "opc");
        let properties = record
            .iter()
            .filter(|(key, _)| !is_blob_field(key))
            .filter_map(|(key, value)| scalar_text(value).map(|text| (key.clone(), text)))
            .collect();

        let project = match type_tag {
            "system" => record
                .get("project")
                .and_then(Value::as_object)
                .and_then(|project| string_field(project, "name")),
            _ => None,
        };

        let (variables, blobs) = if type_tag == "functionblock" {
            (collect_variables(record), collect_blobs(record))
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            title,
            type_tag: type_tag.to_string(),
            properties,
            project,
            variables,
            blobs,
        }
    }
}

/// Scalar rendering rule: strings verbatim, numbers and booleans via
/// `to_string`, null as "null"; objects and arrays are not scalars.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Object(_) | Value::Array(_) => None,
    }
}

fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn collect_variables(record: &DetailRecord) -> Vec<VariableRow> {
    let Some(entries) = record.get("variables").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| VariableRow {
            direction: string_field(entry, "direction").unwrap_or_default(),
            signal_tag: string_field(entry, "signalTag").unwrap_or_default(),
        })
        .collect()
}

fn collect_blobs(record: &DetailRecord) -> Vec<CodeBlob> {
    const BLOB_FIELDS: [(&str, Language); 3] = [
        ("call", Language::StructuredText),
        ("omx", Language::Xml),
        ("opc", Language::Xml),
    ];

    BLOB_FIELDS
        .iter()
        .filter_map(|&(field, language)| {
            string_field(record, field).map(|text| CodeBlob {
                field,
                language,
                text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> DetailRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn scalar_table_skips_nested_values() {
        let view = DetailsView::from_record(
            "node",
            &record(json!({
                "id": "n1",
                "name": "Node 1",
                "systemId": 3,
                "active": true,
                "comment": null,
                "functionBlocks": [{"id": "fb1"}],
                "meta": {"x": 1}
            })),
        );

        let keys: Vec<&str> = view.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"id"));
        assert!(keys.contains(&"systemId"));
        assert!(!keys.contains(&"functionBlocks"));
        assert!(!keys.contains(&"meta"));

        let lookup = |key: &str| {
            view.properties
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(lookup("systemId"), "3");
        assert_eq!(lookup("active"), "true");
        assert_eq!(lookup("comment"), "null");
    }

    #[test]
    fn title_falls_back_from_name_to_tag() {
        let named = DetailsView::from_record("node", &record(json!({"name": "Node 1"})));
        assert_eq!(named.title, "Node 1");

        let tagged = DetailsView::from_record("functionblock", &record(json!({"tag": "FB_1"})));
        assert_eq!(tagged.title, "FB_1");

        let bare = DetailsView::from_record("signal", &record(json!({"id": "s1"})));
        assert_eq!(bare.title, "Item");
    }

    #[test]
    fn system_project_subtable() {
        let view = DetailsView::from_record(
            "system",
            &record(json!({"name": "System A", "project": {"name": "ASTRA"}})),
        );
        assert_eq!(view.project.as_deref(), Some("ASTRA"));

        // The project object never leaks into the scalar table.
        assert!(view.properties.iter().all(|(k, _)| k != "project"));

        // Other types ignore a project field outright.
        let node = DetailsView::from_record(
            "node",
            &record(json!({"name": "N", "project": {"name": "ASTRA"}})),
        );
        assert!(node.project.is_none());
    }

    #[test]
    fn function_block_variables_preserve_order() {
        let view = DetailsView::from_record(
            "functionblock",
            &record(json!({
                "tag": "FB_1",
                "variables": [
                    {"direction": "in", "signalTag": "S1"},
                    {"direction": "out", "signalTag": "S2"}
                ]
            })),
        );

        assert_eq!(
            view.variables,
            vec![
                VariableRow {
                    direction: "in".to_string(),
                    signal_tag: "S1".to_string()
                },
                VariableRow {
                    direction: "out".to_string(),
                    signal_tag: "S2".to_string()
                },
            ]
        );
    }

    #[test]
    fn function_block_blobs_in_fixed_order() {
        let view = DetailsView::from_record(
            "functionblock",
            &record(json!({
                "tag": "FB_1",
                "opc": "<opc/>",
                "call": "FB_1(IN := S1);",
                "omx": "<omx/>"
            })),
        );

        let fields: Vec<&str> = view.blobs.iter().map(|blob| blob.field).collect();
        assert_eq!(fields, ["call", "omx", "opc"]);
        assert_eq!(view.blobs[0].language, Language::StructuredText);
        assert_eq!(view.blobs[1].language, Language::Xml);

        // Blob sources stay out of the scalar table.
        assert!(view.properties.iter().all(|(k, _)| k != "call"));
    }

    #[test]
    fn unknown_types_render_scalar_table_only() {
        let view = DetailsView::from_record(
            "widget",
            &record(json!({
                "name": "W",
                "call": "X()",
                "variables": [{"direction": "in", "signalTag": "S1"}],
                "project": {"name": "P"}
            })),
        );

        assert!(view.blobs.is_empty());
        assert!(view.variables.is_empty());
        assert!(view.project.is_none());
        assert_eq!(view.properties.len(), 2); // name + call as plain scalars
    }
}
