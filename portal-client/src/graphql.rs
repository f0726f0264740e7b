//! GraphQL transport
//!
//! Every operation is a `POST {base}/graphql` with `{ query, variables }`.
//! Responses carry `data` and an optional `errors` list; any reported error
//! fails the whole operation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::PortalClient;
use crate::error::{ClientError, Result};

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

/// Error entry of a GraphQL response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Extract and deserialize the top-level `field` of `data`
    fn into_field<T: DeserializeOwned>(self, operation: &str, field: &str) -> Result<T> {
        if !self.errors.is_empty() {
            return Err(ClientError::GraphQl {
                operation: operation.to_string(),
                messages: self.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        let value = self
            .data
            .and_then(|mut data| data.remove(field))
            .filter(|value| !value.is_null())
            .ok_or_else(|| ClientError::NotFound(format!("{operation} returned no {field}")))?;

        serde_json::from_value(value).map_err(|e| {
            ClientError::ParseError(format!("Failed to parse {field} of {operation}: {e}"))
        })
    }
}

impl PortalClient {
    /// Run a GraphQL operation and return its top-level `field`
    ///
    /// A `null` field is reported as [`ClientError::NotFound`].
    pub(crate) async fn execute<V, T>(
        &self,
        operation: &str,
        query: &str,
        variables: V,
        field: &str,
    ) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        debug!(operation, "Sending GraphQL request");

        let mut request = self
            .client
            .post(self.graphql_url())
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let envelope: GraphQlResponse = self.handle_response(response).await?;

        envelope.into_field(operation, field)
    }

    /// Run a delete mutation taking a single `$id` and returning a boolean
    ///
    /// `false` means nothing was deleted and is reported as not found.
    pub(crate) async fn execute_delete(
        &self,
        operation: &str,
        query: &str,
        field: &str,
        id: &str,
    ) -> Result<()> {
        let deleted: bool = self
            .execute(operation, query, serde_json::json!({ "id": id }), field)
            .await?;

        if !deleted {
            return Err(ClientError::NotFound(format!("{operation}: {id}")));
        }
        Ok(())
    }
}

/// Delete mutation for `$field(id: ID!): Boolean!`
macro_rules! delete_mutation {
    ($operation:literal, $field:literal) => {
        concat!(
            "mutation ",
            $operation,
            "($id: ID!) { ",
            $field,
            "(id: $id) }"
        )
    };
}
pub(crate) use delete_mutation;
