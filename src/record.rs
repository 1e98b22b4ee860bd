//! Wire representation of Notion pages and the property projection.
//!
//! Each page carries a bag of typed properties. Known property types are
//! modeled as a closed tagged union; anything the adapter does not
//! specifically understand falls through to a raw pass-through arm so new
//! Notion property types survive normalization unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single text run inside a `title` or `rich_text` property.
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextRun {
    #[serde(default)]
    pub plain_text: String,
}

/// A select / multi-select option.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// A date range. Only the start is projected.
#[derive(Debug, Clone, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Property types the adapter knows how to flatten.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedProperty {
    Title {
        #[serde(default)]
        title: Vec<RichTextRun>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichTextRun>,
    },
    Number {
        #[serde(default)]
        number: Option<f64>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Date {
        #[serde(default)]
        date: Option<DateRange>,
    },
}

/// A page property: a known typed value, or the raw value for any property
/// type the adapter does not recognize.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Property {
    Typed(TypedProperty),
    Other(Value),
}

impl Property {
    /// Flatten a property into a plain JSON value.
    ///
    /// Pure and infallible: unrecognized property types are passed through
    /// untouched rather than rejected.
    pub fn project(self) -> Value {
        match self {
            Property::Typed(TypedProperty::Title { title }) => {
                Value::String(concat_plain_text(&title))
            }
            Property::Typed(TypedProperty::RichText { rich_text }) => {
                Value::String(concat_plain_text(&rich_text))
            }
            Property::Typed(TypedProperty::Number { number }) => match number {
                Some(n) => serde_json::json!(n),
                None => Value::Null,
            },
            Property::Typed(TypedProperty::Select { select }) => match select {
                Some(option) => Value::String(option.name),
                None => Value::Null,
            },
            Property::Typed(TypedProperty::MultiSelect { multi_select }) => Value::Array(
                multi_select
                    .into_iter()
                    .map(|option| Value::String(option.name))
                    .collect(),
            ),
            Property::Typed(TypedProperty::Date { date }) => match date.and_then(|d| d.start) {
                Some(start) => Value::String(start),
                None => Value::Null,
            },
            Property::Other(raw) => raw,
        }
    }
}

fn concat_plain_text(runs: &[RichTextRun]) -> String {
    runs.iter().map(|run| run.plain_text.as_str()).collect()
}

/// A page as returned by the Notion API, with only the fields the adapter
/// copies forward.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Property>,
}

/// A page with its property bag flattened to plain values.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRecord {
    pub id: String,
    pub url: Option<String>,
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
    pub properties: BTreeMap<String, Value>,
}

impl From<RawPage> for NormalizedRecord {
    fn from(page: RawPage) -> Self {
        NormalizedRecord {
            id: page.id,
            url: page.url,
            created_time: page.created_time,
            last_edited_time: page.last_edited_time,
            properties: page
                .properties
                .into_iter()
                .map(|(name, property)| (name, property.project()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Property {
        serde_json::from_value(value).expect("Failed to parse property")
    }

    #[test]
    fn title_concatenates_runs_in_order() {
        let prop = parse(json!({
            "type": "title",
            "title": [{"plain_text": "Hello "}, {"plain_text": "World"}]
        }));
        assert_eq!(prop.project(), json!("Hello World"));
    }

    #[test]
    fn empty_title_projects_to_empty_string() {
        let prop = parse(json!({"type": "title", "title": []}));
        assert_eq!(prop.project(), json!(""));
    }

    #[test]
    fn rich_text_concatenates_runs() {
        let prop = parse(json!({
            "type": "rich_text",
            "rich_text": [{"plain_text": "a"}, {"plain_text": "b"}, {"plain_text": "c"}]
        }));
        assert_eq!(prop.project(), json!("abc"));
    }

    #[test]
    fn number_projects_value_or_null() {
        let set = parse(json!({"type": "number", "number": 42.5}));
        assert_eq!(set.project(), json!(42.5));

        let unset = parse(json!({"type": "number", "number": null}));
        assert_eq!(unset.project(), Value::Null);
    }

    #[test]
    fn select_projects_option_name() {
        let prop = parse(json!({"type": "select", "select": {"name": "Done", "color": "green"}}));
        assert_eq!(prop.project(), json!("Done"));
    }

    #[test]
    fn empty_select_projects_to_null() {
        let prop = parse(json!({"type": "select", "select": null}));
        assert_eq!(prop.project(), Value::Null);
    }

    #[test]
    fn multi_select_preserves_option_order() {
        let prop = parse(json!({
            "type": "multi_select",
            "multi_select": [{"name": "A"}, {"name": "B"}]
        }));
        assert_eq!(prop.project(), json!(["A", "B"]));
    }

    #[test]
    fn date_projects_range_start() {
        let prop = parse(json!({
            "type": "date",
            "date": {"start": "2024-01-15", "end": null}
        }));
        assert_eq!(prop.project(), json!("2024-01-15"));

        let unset = parse(json!({"type": "date", "date": null}));
        assert_eq!(unset.project(), Value::Null);
    }

    #[test]
    fn unknown_property_type_passes_through_raw() {
        let raw = json!({
            "type": "status",
            "status": {"name": "In progress", "color": "blue"}
        });
        let prop = parse(raw.clone());
        assert_eq!(prop.project(), raw);
    }

    #[test]
    fn raw_page_normalizes_scalar_fields_and_properties() {
        let page: RawPage = serde_json::from_value(json!({
            "id": "page-1",
            "url": "https://notion.so/page-1",
            "created_time": "2024-01-01T00:00:00.000Z",
            "last_edited_time": "2024-01-02T00:00:00.000Z",
            "properties": {
                "Name": {"type": "title", "title": [{"plain_text": "First"}]},
                "Tags": {"type": "multi_select", "multi_select": [{"name": "x"}]}
            }
        }))
        .expect("Failed to parse page");

        let record = NormalizedRecord::from(page);
        assert_eq!(record.id, "page-1");
        assert_eq!(record.url.as_deref(), Some("https://notion.so/page-1"));
        assert_eq!(record.created_time.as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(record.properties["Name"], json!("First"));
        assert_eq!(record.properties["Tags"], json!(["x"]));
    }
}
