//! Payload allow-list behavior across the full task-type table, with the
//! realistic creation payloads each type is documented to accept.

use serde_json::{json, Value};
use test_case::test_case;

use scaleapi::schema::validate;
use scaleapi::{TaskParams, TaskType};

fn params(value: Value) -> TaskParams {
    scaleapi::params(value).unwrap()
}

#[test]
fn categorization_payload_passes() {
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "instruction": "Is this company public or private?",
        "attachment_type": "website",
        "attachment": "http://www.google.com/",
        "categories": ["public", "private"],
    }));
    validate(TaskType::Categorization, &payload).unwrap();
}

#[test]
fn transcription_payload_passes() {
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "instruction": "Transcribe the given fields.",
        "attachment_type": "website",
        "attachment": "http://www.google.com/",
        "fields": { "title": "Title of Webpage" },
        "repeatable_fields": { "username": "Username of submitter" },
    }));
    validate(TaskType::Transcription, &payload).unwrap();
}

#[test]
fn comparison_payload_passes() {
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "instruction": "Do the objects in these images have the same pattern?",
        "attachment_type": "image",
        "attachments": ["http://example.com/a.jpg", "http://example.com/b.jpg"],
        "choices": ["yes", "no"],
    }));
    validate(TaskType::Comparison, &payload).unwrap();
}

#[test]
fn annotation_payload_with_project_passes() {
    // `project` is accepted on creation for every type, like the other
    // common fields.
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "project": "coolest_project_name",
        "objects_to_annotate": ["person", "land vehicle"],
        "with_labels": true,
        "min_width": "30",
        "attachment": "http://i.imgur.com/v4cBreD.jpg",
        "attachment_type": "image",
    }));
    validate(TaskType::Annotation, &payload).unwrap();
}

#[test]
fn segmentannotation_payload_passes() {
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "instruction": "Segment the image.",
        "attachment_type": "image",
        "attachment": "http://i.imgur.com/v4cBreD.jpg",
        "labels": ["big cow", "background"],
        "allow_unlabeled": true,
    }));
    validate(TaskType::Segmentannotation, &payload).unwrap();
}

#[test]
fn audiotranscription_payload_passes() {
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "attachment_type": "audio",
        "attachment": "https://example.com/speaker-3.wav",
        "verbatim": false,
    }));
    validate(TaskType::Audiotranscription, &payload).unwrap();
}

#[test]
fn namedentityrecognition_text_payload_passes() {
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "instruction": "Please label the below text",
        "text": "Label this text.",
        "labels": [{"name": "LABEL_A", "description": "A label."}],
    }));
    validate(TaskType::Namedentityrecognition, &payload).unwrap();
}

#[test_case(TaskType::Categorization)]
#[test_case(TaskType::Transcription)]
#[test_case(TaskType::Comparison)]
#[test_case(TaskType::Annotation)]
#[test_case(TaskType::Polygonannotation)]
#[test_case(TaskType::Lineannotation)]
#[test_case(TaskType::Pointannotation)]
#[test_case(TaskType::Segmentannotation)]
#[test_case(TaskType::Datacollection)]
#[test_case(TaskType::Audiotranscription)]
#[test_case(TaskType::Namedentityrecognition)]
#[test_case(TaskType::Videoplaybackannotation)]
fn every_type_rejects_an_unknown_key(task_type: TaskType) {
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "bad_key": "BAD",
    }));
    let err = validate(task_type, &payload).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("bad_key"));
}

#[test_case(TaskType::Categorization)]
#[test_case(TaskType::Videoplaybackannotation)]
fn common_fields_alone_are_always_permitted(task_type: TaskType) {
    let payload = params(json!({
        "callback_url": "http://www.example.com/callback",
        "instruction": "do the thing",
        "urgency": "standard",
        "metadata": {"batch": 7},
        "project": "p",
        "batch": "b",
    }));
    validate(task_type, &payload).unwrap();
}

#[test]
fn validator_does_not_check_completeness() {
    // Allow-list only: categories without attachment/attachment_type is
    // structurally valid; only an extra key like `bad_key` fails.
    let payload = params(json!({"categories": ["public", "private"]}));
    validate(TaskType::Categorization, &payload).unwrap();

    let payload = params(json!({
        "categories": ["public", "private"],
        "bad_key": true,
    }));
    assert!(validate(TaskType::Categorization, &payload).is_err());
}

#[test]
fn unknown_type_tag_fails_distinctly_from_unknown_field() {
    let err = "sculpting".parse::<TaskType>().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("unknown task type"));
}
