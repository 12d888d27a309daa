//! Wire types of the API Gateway proxy integration.
//!
//! The event and context shapes are owned by the platform, not by
//! this crate. Both types therefore spell out only the fields the
//! handler reads and collect everything else in a flattened
//! attribute map, so unknown platform fields never break
//! deserialization and still show up in diagnostics.

use std::collections::HashMap;

/// Inbound request description as delivered by the gateway
/// integration. Read-only for handlers.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Event {
    /// HTTP method of the request, if the integration provides one
    #[serde(default, rename = "httpMethod")]
    pub http_method: Option<String>,
    /// Request path
    #[serde(default)]
    pub path: Option<String>,
    /// Request headers. `None` when the gateway sends `null`
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    /// Raw request body
    #[serde(default)]
    pub body: Option<String>,
    /// Remaining fields of the event
    #[serde(flatten)]
    pub attributes: HashMap<String, serde_json::Value>,
}

/// Metadata about the current invocation.
///
/// The tenant id is not part of the standard runtime context on
/// every platform. Its absence is a normal condition, never an
/// error, and consumers have to tolerate a missing value.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    /// Request id assigned by the platform
    #[serde(default)]
    pub request_id: Option<String>,
    /// Identifier of the logical customer making the request
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Remaining fields of the context
    #[serde(flatten)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl From<&lambda_runtime::Context> for InvocationContext {
    fn from(context: &lambda_runtime::Context) -> Self {
        // Tenant ids travel in the client context custom map when
        // the platform supplies them at all.
        let tenant_id = context
            .client_context
            .as_ref()
            .and_then(|client| client.custom.get("tenantId"))
            .cloned();
        Self {
            request_id: Some(context.request_id.clone()),
            tenant_id,
            attributes: HashMap::new(),
        }
    }
}

/// Response returned to the gateway integration: a status code
/// plus a JSON-encoded body string. Constructed fresh per
/// invocation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Response {
    /// HTTP status code
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded response body
    pub body: String,
}

impl Response {
    /// Creates a `200` response with the given body JSON-encoded.
    pub fn ok<T: serde::Serialize>(body: &T) -> anyhow::Result<Self> {
        use anyhow::Context;

        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(body).context("Unable to serialize response body")?,
        })
    }

    /// Creates the fixed `500` response. The body is a literal,
    /// carries no error details and cannot fail to serialize.
    #[must_use]
    pub fn internal_error() -> Self {
        Self {
            status_code: 500,
            body: r#"{"message":"some error happened"}"#.to_owned(),
        }
    }
}
