//! Conversion between stored records and their wire representations.

use actix_web::HttpRequest;
use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::{ApiError, FieldErrors};
use crate::models::{Language, Snippet, SnippetFields, Style, User};
use crate::utils::urls;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";

// _______________________________________ Output _______________________________________
#[derive(Debug, Serialize)]
pub struct SnippetResponse {
    pub url: String,
    pub id: i64,
    pub highlight: String,
    pub owner: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
}

impl SnippetResponse {
    pub fn from_model(req: &HttpRequest, snippet: &Snippet) -> Self {
        SnippetResponse {
            url: urls::snippet_detail(req, snippet.id),
            id: snippet.id,
            highlight: urls::snippet_highlight(req, snippet.id),
            owner: snippet.owner_username.clone(),
            title: snippet.title.clone(),
            code: snippet.code.clone(),
            linenos: snippet.linenos,
            language: snippet.language,
            style: snippet.style,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub url: String,
    pub id: i64,
    pub username: String,
    pub snippets: Vec<String>,
}

impl UserResponse {
    pub fn from_model(req: &HttpRequest, user: &User, snippet_ids: &[i64]) -> Self {
        UserResponse {
            url: urls::user_detail(req, user.id),
            id: user.id,
            username: user.username.clone(),
            snippets: snippet_ids
                .iter()
                .map(|id| urls::snippet_detail(req, *id))
                .collect(),
        }
    }
}

// _______________________________________ Input _______________________________________
/// How incoming data is applied to a snippet.
#[derive(Debug, Clone, Copy)]
pub enum SaveMode<'a> {
    Create,
    Update(&'a SnippetFields),
    PartialUpdate(&'a SnippetFields),
}

/// Snippet data as submitted, before validation. Read-only fields
/// (`id`, `url`, `owner`, `highlight`) are never read.
#[derive(Debug, Default, Validate)]
pub struct SnippetInput {
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub title: Option<String>,
    pub code: Option<String>,
    pub linenos: Option<bool>,
    pub language: Option<String>,
    pub style: Option<String>,
}

impl SnippetInput {
    pub fn from_data(data: &Value) -> Result<Self, ApiError> {
        let map = match data {
            Value::Object(map) => map,
            other => {
                return Err(ApiError::field(
                    "non_field_errors",
                    format!("Invalid data. Expected a dictionary, but got {}.", type_name(other)),
                ))
            }
        };

        let mut errors = FieldErrors::new();
        let input = SnippetInput {
            title: string_field(map, "title", &mut errors).map(trimmed),
            code: string_field(map, "code", &mut errors).map(trimmed),
            linenos: bool_field(map, "linenos", &mut errors),
            language: string_field(map, "language", &mut errors),
            style: string_field(map, "style", &mut errors),
        };

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(ApiError::Validation(errors))
        }
    }

    /// Validates the input and merges it over the defaults or the stored fields.
    pub fn into_fields(self, mode: SaveMode<'_>) -> Result<SnippetFields, ApiError> {
        let mut errors = FieldErrors::new();

        if let Err(e) = self.validate() {
            for (field, field_errors) in e.field_errors() {
                let messages = errors.entry(field.to_string()).or_default();
                for error in field_errors {
                    messages.push(
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string()),
                    );
                }
            }
        }

        let base = match mode {
            SaveMode::Create => None,
            SaveMode::Update(base) | SaveMode::PartialUpdate(base) => Some(base),
        };

        match (&self.code, mode) {
            (None, SaveMode::Create | SaveMode::Update(_)) => push(&mut errors, "code", REQUIRED),
            (Some(code), _) if code.trim().is_empty() => push(&mut errors, "code", NOT_BLANK),
            _ => {}
        }

        let language = match self.language.as_deref().map(str::parse::<Language>) {
            Some(Ok(language)) => Some(language),
            Some(Err(e)) => {
                push(&mut errors, "language", e.to_string());
                None
            }
            None => None,
        };

        let style = match self.style.as_deref().map(str::parse::<Style>) {
            Some(Ok(style)) => Some(style),
            Some(Err(e)) => {
                push(&mut errors, "style", e.to_string());
                None
            }
            None => None,
        };

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let mut fields = match base {
            Some(base) => base.clone(),
            None => SnippetFields::new(String::new()),
        };
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(code) = self.code {
            fields.code = code;
        }
        if let Some(linenos) = self.linenos {
            fields.linenos = linenos;
        }
        if let Some(language) = language {
            fields.language = language;
        }
        if let Some(style) = style {
            fields.style = style;
        }
        Ok(fields)
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

fn string_field(map: &Map<String, Value>, name: &str, errors: &mut FieldErrors) -> Option<String> {
    match map.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => {
            push(errors, name, NOT_NULL);
            None
        }
        _ => {
            push(errors, name, "Not a valid string.");
            None
        }
    }
}

// Text fields drop surrounding whitespace before validation.
fn trimmed(value: String) -> String {
    value.trim().to_string()
}

// Form bodies carry booleans as text, so accept the usual spellings.
fn bool_field(map: &Map<String, Value>, name: &str, errors: &mut FieldErrors) -> Option<bool> {
    let parsed = match map.get(name)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Some(true),
            "false" | "off" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        Value::Null => {
            push(errors, name, NOT_NULL);
            return None;
        }
        _ => None,
    };

    if parsed.is_none() {
        push(errors, name, "Must be a valid boolean.");
    }
    parsed
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
