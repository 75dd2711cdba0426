use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

const QUESTION_FIELD: &str = "question";
const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validated body of a question-answer request.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRequest {
    pub question: String,
}

/// Field name to the messages explaining why it was rejected.
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field, vec![message.into()]);
        Self(errors)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl QuestionRequest {
    pub fn validate(body: &Value) -> Result<Self, FieldErrors> {
        let Some(object) = body.as_object() else {
            return Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(body)
                ),
            ));
        };

        match object.get(QUESTION_FIELD) {
            None => Err(FieldErrors::single(
                QUESTION_FIELD,
                "This field is required.",
            )),
            Some(Value::Null) => Err(FieldErrors::single(
                QUESTION_FIELD,
                "This field may not be null.",
            )),
            Some(Value::String(question)) if question.trim().is_empty() => Err(
                FieldErrors::single(QUESTION_FIELD, "This field may not be blank."),
            ),
            Some(Value::String(question)) => Ok(Self {
                question: question.trim().to_string(),
            }),
            Some(_) => Err(FieldErrors::single(QUESTION_FIELD, "Not a valid string.")),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
