//! Allow-list validation of task-creation payloads.
//!
//! The API rejects creation requests carrying parameters a task type does
//! not understand, so the client checks payload keys locally first and
//! fails before spending a network round trip. The check is an allow-list
//! only: it rejects *extra* keys, it never demands required ones — field
//! completeness is the server's call (and differs by project settings).

use crate::error::{Error, Result};
use crate::types::{TaskParams, TaskType};

/// Creation fields accepted by every task type.
pub const COMMON_FIELDS: &[&str] = &[
    "callback_url",
    "instruction",
    "urgency",
    "metadata",
    "project",
    "batch",
];

/// Creation fields specific to one task type.
///
/// These tables are configuration, versioned with the API: adding a field
/// the server starts accepting is a table edit, not a code change.
pub fn allowed_fields(task_type: TaskType) -> &'static [&'static str] {
    match task_type {
        TaskType::Categorization => &[
            "attachment",
            "attachment_type",
            "categories",
            "category_ids",
            "allow_multiple",
        ],
        TaskType::Transcription => &[
            "attachment",
            "attachment_type",
            "fields",
            "row_fields",
            "repeatable_fields",
        ],
        TaskType::Comparison => &["attachments", "attachment_type", "fields", "choices"],
        TaskType::Annotation => &[
            "attachment",
            "attachment_type",
            "objects_to_annotate",
            "with_labels",
            "min_width",
            "min_height",
            "examples",
        ],
        TaskType::Polygonannotation => &[
            "attachment",
            "attachment_type",
            "objects_to_annotate",
            "with_labels",
            "examples",
        ],
        TaskType::Lineannotation => &[
            "attachment",
            "attachment_type",
            "objects_to_annotate",
            "with_labels",
            "splines",
            "examples",
        ],
        TaskType::Pointannotation => &[
            "attachment",
            "attachment_type",
            "objects_to_annotate",
            "with_labels",
            "examples",
        ],
        TaskType::Segmentannotation => &[
            "attachment",
            "attachment_type",
            "labels",
            "allow_unlabeled",
        ],
        TaskType::Datacollection => &["attachment", "attachment_type", "fields"],
        TaskType::Audiotranscription => &["attachment", "attachment_type", "verbatim"],
        TaskType::Namedentityrecognition => &["text", "attachment", "attachment_type", "labels"],
        TaskType::Videoplaybackannotation => &[
            "attachment",
            "attachment_type",
            "objects_to_annotate",
            "events_to_annotate",
            "with_labels",
            "frame_rate",
            "examples",
        ],
    }
}

/// Check a creation payload against the allow-list for its task type.
///
/// Fails fast on the first key outside `COMMON_FIELDS ∪ allowed_fields`,
/// naming the key and the type. Runs entirely locally.
///
/// # Errors
///
/// [`Error::Validation`] naming the first disallowed key.
pub fn validate(task_type: TaskType, params: &TaskParams) -> Result<()> {
    for key in params.keys() {
        let permitted = COMMON_FIELDS.contains(&key.as_str())
            || allowed_fields(task_type).contains(&key.as_str());
        if !permitted {
            return Err(Error::validation(format!(
                "illegal parameter '{key}' for task type '{task_type}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test params must be objects"),
        }
    }

    #[test]
    fn common_fields_pass_for_every_type() {
        let payload = params(json!({
            "callback_url": "http://www.example.com/callback",
            "instruction": "do the thing",
            "urgency": "standard",
            "metadata": {"source": "sdk-test"},
        }));
        for task_type in TaskType::ALL {
            validate(task_type, &payload).unwrap();
        }
    }

    #[test]
    fn extra_key_is_rejected_and_named() {
        let payload = params(json!({
            "callback_url": "http://www.example.com/callback",
            "bad_key": true,
        }));
        let err = validate(TaskType::Categorization, &payload).unwrap_err();
        assert!(err.is_validation());
        let message = err.to_string();
        assert!(message.contains("bad_key"));
        assert!(message.contains("categorization"));
    }

    #[test]
    fn missing_permitted_fields_are_not_an_error() {
        // Allow-list only: a categorization payload without attachment or
        // attachment_type is structurally fine.
        let payload = params(json!({"categories": ["public", "private"]}));
        validate(TaskType::Categorization, &payload).unwrap();
    }

    #[test]
    fn type_specific_fields_do_not_leak_across_types() {
        let payload = params(json!({"choices": ["yes", "no"]}));
        validate(TaskType::Comparison, &payload).unwrap();
        assert!(validate(TaskType::Annotation, &payload).is_err());
    }

    #[test]
    fn empty_payload_is_valid() {
        validate(TaskType::Transcription, &Map::new()).unwrap();
    }
}
