//! Contract with the hosted text-generation service.
//!
//! Advisors only see [`CompletionClient`]; the wire protocol of a concrete
//! provider lives in `dsd-infra`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};
use thiserror::Error;

/// Upper bound on a single completion call when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Primitive type of a response field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    String,
    Boolean,
}

impl FieldKind {
    fn type_name(self) -> &'static str {
        match self {
            FieldKind::Number => "NUMBER",
            FieldKind::String => "STRING",
            FieldKind::Boolean => "BOOLEAN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub kind: FieldKind,
    pub description: Option<String>,
    pub required: bool,
}

/// Flat object schema the model's JSON answer must follow.
///
/// Field order is preserved when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSchema {
    fields: Vec<SchemaField>,
}

impl ResponseSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, name: impl Into<String>, kind: FieldKind, description: Option<&str>) -> Self {
        self.field(name, kind, description, true)
    }

    pub fn optional(self, name: impl Into<String>, kind: FieldKind, description: Option<&str>) -> Self {
        self.field(name, kind, description, false)
    }

    fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        description: Option<&str>,
        required: bool,
    ) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            kind,
            description: description.map(str::to_string),
            required,
        });
        self
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name.as_str())
    }

    /// Render as an OpenAPI-style object schema (the shape Gemini's
    /// `responseSchema` accepts).
    pub fn to_json_schema(&self) -> JsonValue {
        let mut properties = Map::new();
        for f in &self.fields {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(f.kind.type_name()));
            if let Some(desc) = &f.description {
                prop.insert("description".to_string(), json!(desc));
            }
            properties.insert(f.name.clone(), JsonValue::Object(prop));
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("OBJECT"));
        schema.insert("properties".to_string(), JsonValue::Object(properties));

        let required: Vec<&str> = self.required_fields().collect();
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }

        JsonValue::Object(schema)
    }
}

/// One prompt plus the schema its answer must conform to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub schema: ResponseSchema,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, schema: ResponseSchema) -> Self {
        Self {
            prompt: prompt.into(),
            schema,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("completion request timed out")]
    Timeout,

    #[error("no credentials configured for the completion service")]
    AuthMissing,

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Schema-constrained structured output from a hosted language model.
///
/// Implementations return the model's answer already parsed as JSON. They
/// must report missing configuration as [`CompletionError::AuthMissing`]
/// instead of panicking.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<JsonValue, CompletionError>;
}

#[async_trait]
impl<C> CompletionClient for std::sync::Arc<C>
where
    C: CompletionClient + ?Sized,
{
    async fn complete(&self, request: &CompletionRequest) -> Result<JsonValue, CompletionError> {
        (**self).complete(request).await
    }
}

/// Run one completion, converting an elapsed deadline into `Timeout`.
pub(crate) async fn complete_within(
    client: &dyn CompletionClient,
    request: &CompletionRequest,
    timeout: Duration,
) -> Result<JsonValue, CompletionError> {
    match tokio::time::timeout(timeout, client.complete(request)).await {
        Ok(res) => res,
        Err(_) => Err(CompletionError::Timeout),
    }
}
