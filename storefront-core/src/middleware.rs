use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::registry::StoreRegistry;
use crate::store::ItemStore;

/// Extension inserted into the request by [`resolve_resource`].
/// Routes extract this to reach the store named in the path.
#[derive(Clone)]
pub struct ResolvedResource {
    pub name: String,
    pub store: Arc<ItemStore>,
}

/// Route-layer middleware that reads the `{resource}` path segment, looks the
/// store up in the registry, and inserts a `ResolvedResource` extension.
/// Returns 404 if no such resource is configured.
pub async fn resolve_resource(
    State(registry): State<Arc<StoreRegistry>>,
    Path(params): Path<HashMap<String, String>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let name = params.get("resource").cloned().unwrap_or_default();
    let store = registry
        .get(&name)
        .ok_or_else(|| ApiError::UnknownResource(name.clone()))?;

    req.extensions_mut().insert(ResolvedResource { name, store });
    Ok(next.run(req).await)
}
