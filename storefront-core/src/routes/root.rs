use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::ResourceIndex;
use crate::registry::StoreRegistry;

pub async fn get_index(State(registry): State<Arc<StoreRegistry>>) -> Json<ResourceIndex> {
    Json(ResourceIndex {
        resources: registry.names(),
    })
}
