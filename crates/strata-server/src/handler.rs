use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use strata_store::{ByteRange, ContinuationToken, ListOptions, ListPage};
use strata_types::{BlobId, BlobProperties, Permission};

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Default signed-URL lifetime when the caller does not pass one.
const DEFAULT_URL_EXPIRY_SECS: u64 = 900;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub offset: Option<u64>,
    pub length: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub prefix: Option<String>,
    pub max_results: Option<usize>,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub expires_in: Option<u64>,
    pub permission: Option<String>,
}

fn parse_id(raw: &str) -> ServerResult<BlobId> {
    BlobId::from_hex(raw).map_err(|_| ServerError::InvalidBlobId(raw.to_string()))
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `POST /v1/blobs` — store the raw request body.
pub async fn store_blob(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<(StatusCode, Json<BlobProperties>)> {
    let properties = state.store.store(body).await?;
    Ok((StatusCode::CREATED, Json(properties)))
}

/// `GET /v1/blobs/:id` — fetch content, optionally ranged via
/// `offset`/`length` query parameters (both or neither).
pub async fn fetch_blob(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> ServerResult<Response> {
    let id = parse_id(&id)?;
    let range = match (query.offset, query.length) {
        (Some(offset), Some(length)) => Some(ByteRange::new(offset, length)),
        (None, None) => None,
        _ => {
            return Err(ServerError::InvalidQuery(
                "offset and length must be given together".into(),
            ))
        }
    };
    let (content, _properties) = state.store.fetch(&id, range).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        content,
    )
        .into_response())
}

/// `GET /v1/blobs/:id/properties`
pub async fn blob_properties(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<BlobProperties>> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.properties(&id).await?))
}

/// `GET /v1/blobs/:id/exists`
pub async fn blob_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<serde_json::Value>> {
    let id = parse_id(&id)?;
    let exists = state.store.exists(&id).await?;
    Ok(Json(json!({ "exists": exists })))
}

/// `DELETE /v1/blobs/:id`
pub async fn delete_blob(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    if !state.config.allow_delete {
        return Err(ServerError::DeleteDisabled);
    }
    let id = parse_id(&id)?;
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /v1/blobs` — id-ordered listing with `prefix`, `max_results`, and
/// `token` query parameters.
pub async fn list_blobs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ServerResult<Json<ListPage>> {
    let opts = ListOptions {
        prefix: query.prefix,
        max_results: query.max_results,
        continuation: query.token.map(ContinuationToken::from),
    };
    Ok(Json(state.store.list(opts).await?))
}

/// `GET /v1/blobs/:id/url` — issue a signed URL.
pub async fn blob_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UrlQuery>,
) -> ServerResult<Json<serde_json::Value>> {
    let id = parse_id(&id)?;
    let expires_in = Duration::from_secs(query.expires_in.unwrap_or(DEFAULT_URL_EXPIRY_SECS));
    let permission = match query.permission.as_deref() {
        None => Permission::Read,
        Some(raw) => raw
            .parse()
            .map_err(|_| ServerError::InvalidQuery(format!("unknown permission: {raw}")))?,
    };
    let url = state.store.signed_url(&id, expires_in, permission).await?;
    Ok(Json(json!({ "url": url })))
}
