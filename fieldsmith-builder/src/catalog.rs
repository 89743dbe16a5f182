//! Field-type catalog: nesting capabilities and computed defaults.
//!
//! Defaults are the keys a caller may override through options. A key that
//! has no default here cannot be introduced through options.

use fieldsmith_core::{Map, Value};

/// What a field type can hold beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// A plain field.
    None,
    /// Holds sub-fields directly (repeater, group).
    SubFields,
    /// Holds layouts, which hold sub-fields (flexible content).
    Layouts,
}

/// Nesting capability of a (sanitized) field type.
pub fn nesting(field_type: &str) -> Nesting {
    match field_type {
        "repeater" | "group" => Nesting::SubFields,
        "flexible_content" => Nesting::Layouts,
        _ => Nesting::None,
    }
}

/// Defaults shared by every field, after its identity keys.
fn common_defaults() -> Map {
    let wrapper: Value = [("width", ""), ("class", ""), ("id", "")]
        .into_iter()
        .collect();
    Map::from([
        ("instructions".to_string(), Value::string("")),
        ("required".to_string(), Value::Int(0)),
        ("conditional_logic".to_string(), Value::Int(0)),
        ("wrapper".to_string(), wrapper),
    ])
}

/// Defaults for a (sanitized) field type. Unknown types get the common set.
pub fn field_defaults(field_type: &str) -> Map {
    let empty = || Value::string("");
    let specific: Vec<(&str, Value)> = match field_type {
        "text" => vec![
            ("default_value", empty()),
            ("placeholder", empty()),
            ("prepend", empty()),
            ("append", empty()),
            ("maxlength", empty()),
        ],
        "textarea" => vec![
            ("default_value", empty()),
            ("placeholder", empty()),
            ("maxlength", empty()),
            ("rows", empty()),
            ("new_lines", empty()),
        ],
        "number" => vec![
            ("default_value", empty()),
            ("placeholder", empty()),
            ("prepend", empty()),
            ("append", empty()),
            ("min", empty()),
            ("max", empty()),
            ("step", empty()),
        ],
        "email" => vec![
            ("default_value", empty()),
            ("placeholder", empty()),
            ("prepend", empty()),
            ("append", empty()),
        ],
        "url" => vec![("default_value", empty()), ("placeholder", empty())],
        "password" => vec![
            ("placeholder", empty()),
            ("prepend", empty()),
            ("append", empty()),
        ],
        "wysiwyg" => vec![
            ("default_value", empty()),
            ("tabs", "all".into()),
            ("toolbar", "full".into()),
            ("media_upload", Value::Int(1)),
            ("delay", Value::Int(0)),
        ],
        "image" => vec![
            ("return_format", "array".into()),
            ("preview_size", "medium".into()),
            ("library", "all".into()),
            ("min_width", empty()),
            ("min_height", empty()),
            ("max_width", empty()),
            ("max_height", empty()),
            ("mime_types", empty()),
        ],
        "file" => vec![
            ("return_format", "array".into()),
            ("library", "all".into()),
            ("min_size", empty()),
            ("max_size", empty()),
            ("mime_types", empty()),
        ],
        "select" => vec![
            ("choices", Value::map()),
            ("default_value", Value::list()),
            ("allow_null", Value::Int(0)),
            ("multiple", Value::Int(0)),
            ("ui", Value::Int(0)),
            ("ajax", Value::Int(0)),
            ("return_format", "value".into()),
            ("placeholder", empty()),
        ],
        "checkbox" => vec![
            ("choices", Value::map()),
            ("default_value", Value::list()),
            ("layout", "vertical".into()),
            ("toggle", Value::Int(0)),
            ("allow_custom", Value::Int(0)),
            ("return_format", "value".into()),
        ],
        "radio" => vec![
            ("choices", Value::map()),
            ("default_value", empty()),
            ("layout", "vertical".into()),
            ("other_choice", Value::Int(0)),
            ("allow_null", Value::Int(0)),
            ("return_format", "value".into()),
        ],
        "true_false" => vec![
            ("message", empty()),
            ("default_value", Value::Int(0)),
            ("ui", Value::Int(0)),
            ("ui_on_text", empty()),
            ("ui_off_text", empty()),
        ],
        "link" => vec![("return_format", "array".into())],
        "post_object" => vec![
            ("post_type", empty()),
            ("taxonomy", empty()),
            ("allow_null", Value::Int(0)),
            ("multiple", Value::Int(0)),
            ("return_format", "object".into()),
            ("ui", Value::Int(1)),
        ],
        "relationship" => vec![
            ("post_type", empty()),
            ("taxonomy", empty()),
            (
                "filters",
                Value::List(vec!["search".into(), "post_type".into(), "taxonomy".into()]),
            ),
            ("elements", empty()),
            ("min", empty()),
            ("max", empty()),
            ("return_format", "object".into()),
        ],
        "taxonomy" => vec![
            ("taxonomy", "category".into()),
            ("field_type", "checkbox".into()),
            ("add_term", Value::Int(1)),
            ("save_terms", Value::Int(0)),
            ("load_terms", Value::Int(0)),
            ("return_format", "id".into()),
            ("multiple", Value::Int(0)),
            ("allow_null", Value::Int(0)),
        ],
        "date_picker" => vec![
            ("display_format", "d/m/Y".into()),
            ("return_format", "d/m/Y".into()),
            ("first_day", Value::Int(1)),
        ],
        "color_picker" => vec![("default_value", empty())],
        "message" => vec![
            ("message", empty()),
            ("new_lines", "wpautop".into()),
            ("esc_html", Value::Int(0)),
        ],
        "tab" => vec![("placement", "top".into()), ("endpoint", Value::Int(0))],
        "group" => vec![("layout", "block".into())],
        "repeater" => vec![
            ("collapsed", empty()),
            ("min", Value::Int(0)),
            ("max", Value::Int(0)),
            ("layout", "table".into()),
            ("button_label", empty()),
        ],
        "flexible_content" => vec![
            ("min", empty()),
            ("max", empty()),
            ("button_label", "Add Row".into()),
        ],
        _ => Vec::new(),
    };

    let mut defaults = common_defaults();
    defaults.extend(specific.into_iter().map(|(k, v)| (k.to_string(), v)));
    defaults
}

/// Defaults for a layout, after its identity keys and sub-fields.
pub fn layout_defaults() -> Map {
    Map::from([
        ("min".to_string(), Value::string("")),
        ("max".to_string(), Value::string("")),
    ])
}

/// Defaults for a field group, after its key, title, fields, and location.
pub fn group_defaults() -> Map {
    Map::from([
        ("menu_order".to_string(), Value::Int(0)),
        ("position".to_string(), Value::string("normal")),
        ("style".to_string(), Value::string("default")),
        ("label_placement".to_string(), Value::string("top")),
        ("instruction_placement".to_string(), Value::string("label")),
        ("hide_on_screen".to_string(), Value::string("")),
        ("active".to_string(), Value::Bool(true)),
        ("description".to_string(), Value::string("")),
    ])
}
