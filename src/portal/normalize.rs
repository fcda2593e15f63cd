//! Turn raw portal JSON into a [`CategoryResult`]
//!
//! Account info must be an object under `"js"`; anything else (absent,
//! null, empty, wrong type) counts as "no device information". The genre
//! endpoints must return an array under `"js"` whose entries all carry a
//! string `title`. An absent or empty list is `NotFound`; an entry without
//! a title fails the whole category rather than being skipped.

use super::types::{CategoryResult, Payload};
use super::Category;
use crate::error::{PortalError, Result};
use serde_json::Value;

pub fn normalize(category: Category, json: &Value) -> CategoryResult {
    let payload = match category {
        Category::AccountInfo => account_info(json),
        Category::LiveGenres | Category::VodCategories | Category::SeriesCategories => {
            titles(category, json)
        }
    };
    payload.into()
}

fn account_info(json: &Value) -> Result<Payload> {
    match json.get("js") {
        Some(Value::Object(map)) if !map.is_empty() => Ok(Payload::Object(map.clone())),
        _ => Err(not_found(Category::AccountInfo)),
    }
}

fn titles(category: Category, json: &Value) -> Result<Payload> {
    let entries = match json.get("js") {
        None | Some(Value::Null) => return Err(not_found(category)),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(PortalError::Parse(format!(
                "{}: expected a list under \"js\", got {}",
                category,
                type_name(other)
            )))
        }
    };

    if entries.is_empty() {
        return Err(not_found(category));
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry.get("title") {
            Some(Value::String(title)) => Ok(title.clone()),
            Some(other) => Err(PortalError::Parse(format!(
                "{}: entry {} has a {} title",
                category,
                i,
                type_name(other)
            ))),
            None => Err(PortalError::Parse(format!(
                "{}: entry {} has no title",
                category, i
            ))),
        })
        .collect::<Result<Vec<_>>>()
        .map(Payload::Titles)
}

fn not_found(category: Category) -> PortalError {
    PortalError::NotFound(category.not_found_reason().to_string())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titles_of(result: &CategoryResult) -> String {
        result.payload().expect("expected success").to_string()
    }

    #[test]
    fn test_genres_joined_in_order() {
        let json = json!({ "js": [{ "title": "Sports" }, { "title": "News" }] });
        let result = normalize(Category::LiveGenres, &json);
        assert_eq!(titles_of(&result), "Sports, News");
    }

    #[test]
    fn test_extra_entry_fields_ignored() {
        let json = json!({ "js": [
            { "id": "1", "title": "Movies", "alias": "movies", "censored": 0 },
            { "id": "2", "title": "Kids" }
        ]});
        let result = normalize(Category::VodCategories, &json);
        assert_eq!(
            result.payload(),
            Some(&Payload::Titles(vec!["Movies".into(), "Kids".into()]))
        );
    }

    #[test]
    fn test_empty_list_reasons() {
        let cases = [
            (Category::LiveGenres, "no genres found"),
            (Category::VodCategories, "no VOD genres found"),
            (Category::SeriesCategories, "no series genres found"),
        ];
        for (category, reason) in cases {
            for json in [json!({ "js": [] }), json!({}), json!({ "js": null })] {
                let result = normalize(category, &json);
                assert_eq!(
                    result.error(),
                    Some(&PortalError::NotFound(reason.to_string())),
                    "{category} {json}"
                );
            }
        }
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let json = json!({ "js": [{ "title": "Sports" }, { "id": "7" }] });
        let result = normalize(Category::SeriesCategories, &json);
        match result.error() {
            Some(PortalError::Parse(msg)) => assert!(msg.contains("entry 1 has no title")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_string_title_is_parse_error() {
        let json = json!({ "js": [{ "title": 42 }] });
        let result = normalize(Category::LiveGenres, &json);
        assert_eq!(result.error().map(|e| e.kind()), Some("parse_error"));
    }

    #[test]
    fn test_genres_wrong_shape_is_parse_error() {
        let json = json!({ "js": { "title": "Sports" } });
        let result = normalize(Category::LiveGenres, &json);
        assert_eq!(result.error().map(|e| e.kind()), Some("parse_error"));
    }

    #[test]
    fn test_account_info_object() {
        let json = json!({ "js": { "mac": "00:1A:79:00:00:01", "end_date": "2030-01-01" } });
        let result = normalize(Category::AccountInfo, &json);
        match result.payload() {
            Some(Payload::Object(map)) => {
                assert_eq!(map["end_date"], "2030-01-01");
                assert_eq!(map.len(), 2);
            }
            other => panic!("expected object payload, got {:?}", other),
        }
    }

    #[test]
    fn test_account_info_missing_or_malformed() {
        let not_found = PortalError::NotFound("no device information found".to_string());
        for json in [
            json!({}),
            json!({ "js": {} }),
            json!({ "js": null }),
            json!({ "js": [] }),
            json!({ "js": "expired" }),
            json!([1, 2, 3]),
        ] {
            let result = normalize(Category::AccountInfo, &json);
            assert_eq!(result.error(), Some(&not_found), "{json}");
        }
    }
}
