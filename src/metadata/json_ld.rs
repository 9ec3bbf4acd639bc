//! JSON-LD Metadata Parsing
//!
//! Reads Schema.org objects from `<script type="application/ld+json">` blocks,
//! including `@graph` arrays and nested `author` objects.

use dom_query::{Document, Selection};
use serde_json::{Map, Value};

use super::meta_tags::parse_meta_date;
use super::PageMetadata;

/// A typed schema object with its relevance rank.
#[derive(Debug, Clone)]
struct SchemaData {
    data: Map<String, Value>,
    importance: i32,
}

/// Fill title, author and date from JSON-LD where still missing.
#[must_use]
pub fn extract_json_ld(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;
    let (persons, articles) = decode_json_ld(doc);

    for article in &articles {
        if result.title.is_none() {
            result.title = get_single_string_value(&article.data, "headline")
                .or_else(|| get_single_string_value(&article.data, "name"));
        }

        if result.date.is_none() {
            result.date = get_single_string_value(&article.data, "datePublished")
                .and_then(|d| parse_meta_date(&d));
        }

        if result.author.is_none() {
            result.author = article.data.get("author").and_then(author_from_value);
        }
    }

    if result.author.is_none() {
        result.author = persons.iter().find_map(|p| get_schema_name(&p.data));
    }

    result
}

/// Parse every JSON-LD block, sorting persons and articles by importance.
fn decode_json_ld(doc: &Document) -> (Vec<SchemaData>, Vec<SchemaData>) {
    let mut persons = Vec::new();
    let mut articles = Vec::new();

    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let json_text = Selection::from(*script).text().trim().to_string();
        if json_text.is_empty() {
            continue;
        }

        let Ok(data) = serde_json::from_str::<Value>(&json_text) else {
            continue;
        };

        process_schema_value(&data, 0, &mut persons, &mut articles);
    }

    persons.sort_by(|a, b| b.importance.cmp(&a.importance));
    articles.sort_by(|a, b| b.importance.cmp(&a.importance));

    (persons, articles)
}

fn process_schema_value(
    value: &Value,
    depth: i32,
    persons: &mut Vec<SchemaData>,
    articles: &mut Vec<SchemaData>,
) {
    match value {
        Value::Object(map) => {
            let types = schema_types(map);
            let next_depth = if types.is_empty() { depth } else { depth + 1 };

            if !types.is_empty() {
                let base = if is_article_type(&types) { 100 } else { 50 };
                let importance = base - depth * 10;
                let schema = SchemaData {
                    data: map.clone(),
                    importance,
                };
                if is_person_type(&types) {
                    persons.push(schema);
                } else if is_article_type(&types) {
                    articles.push(schema);
                }
            }

            for val in map.values() {
                process_schema_value(val, next_depth, persons, articles);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                process_schema_value(item, depth, persons, articles);
            }
        }
        _ => {}
    }
}

/// Lower-cased `@type` values of a schema object.
fn schema_types(map: &Map<String, Value>) -> Vec<String> {
    match map.get("@type") {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

/// Author from an `author` property: a string, an object, or a list of either.
fn author_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Object(map) => get_schema_name(map),
        Value::Array(arr) => {
            let names: Vec<String> = arr.iter().filter_map(author_from_value).collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join("; "))
            }
        }
        _ => None,
    }
}

/// `name`, or `givenName familyName`.
fn get_schema_name(data: &Map<String, Value>) -> Option<String> {
    if let Some(name) = data.get("name").and_then(Value::as_str) {
        let name = name.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    let given = data.get("givenName").and_then(Value::as_str).unwrap_or("").trim();
    let family = data.get("familyName").and_then(Value::as_str).unwrap_or("").trim();
    let full_name = format!("{given} {family}").trim().to_string();

    if full_name.is_empty() {
        None
    } else {
        Some(full_name)
    }
}

fn get_single_string_value(data: &Map<String, Value>, key: &str) -> Option<String> {
    let value = match data.get(key)? {
        Value::Array(arr) => arr.first()?,
        other => other,
    };
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn is_person_type(types: &[String]) -> bool {
    types.iter().any(|t| matches!(t.as_str(), "person" | "author" | "creator"))
}

fn is_article_type(types: &[String]) -> bool {
    types.iter().any(|t| {
        matches!(
            t.as_str(),
            "article" | "newsarticle" | "blogposting" | "webpage" | "report"
                | "techarticle" | "scholarlyarticle" | "socialmediaposting"
        )
    })
}
