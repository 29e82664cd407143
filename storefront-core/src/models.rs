use serde::Serialize;

/// Response for GET /api
#[derive(Debug, Serialize)]
pub struct ResourceIndex {
    pub resources: Vec<String>,
}

/// Body returned with every client error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
