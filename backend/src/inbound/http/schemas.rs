//! OpenAPI schema definitions for domain types.
//!
//! The domain error type does not derive `ToSchema`; its wire shape is
//! produced by the HTTP error mapping and documented here.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Error`] as rendered to clients.
///
/// Exactly one of the two fields is present.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Messages keyed by the request field at fault.
    #[schema(example = json!({"name": "The topic with name=robotics already exists."}))]
    field_errors: Option<BTreeMap<String, String>>,
    /// General failure message.
    #[schema(example = json!(["You do not have permission to perform this action."]))]
    error: Option<Vec<String>>,
}
