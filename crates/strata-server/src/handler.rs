//! Handlers for the eight peer-protocol endpoints.
//!
//! Each handler is a thin HTTP skin over the in-process peer semantics in
//! [`strata_sync::LocalRemote`]; the serving side and the same-host remote
//! behave identically by construction.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use strata_protocol::{format_manifest, ChangedRefDocument, HistoryResponse, RevListRequest};
use strata_sync::RemoteRepo;
use strata_types::ObjectId;
use tracing::info;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

fn parse_id(hex: &str) -> ServerResult<ObjectId> {
    ObjectId::from_hex(hex).map_err(|e| ServerError::BadRequest(format!("bad object id: {e}")))
}

fn xml_response(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        body,
    )
        .into_response()
}

/// `GET /repo/manifest` — one text line per ref, HEAD first.
pub async fn manifest_handler(State(state): State<AppState>) -> ServerResult<String> {
    let entries = state.peer.manifest().await?;
    Ok(format_manifest(&entries))
}

/// `POST /repo/batchobjects` — a pack round for the requested want/have.
pub async fn batch_objects_handler(
    State(state): State<AppState>,
    Json(request): Json<RevListRequest>,
) -> ServerResult<Vec<u8>> {
    let want = request.want_ids()?;
    let have = request.have_ids()?;
    let pack = state.peer.batch_objects(&want, &have).await?;
    info!(want = want.len(), bytes = pack.len(), "served pack round");
    Ok(pack)
}

/// `POST /repo/sendobject` — ingest an uploaded pack stream.
pub async fn send_object_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<StatusCode> {
    if body.len() as u64 > state.config.max_pack_size {
        return Err(ServerError::BadRequest("pack exceeds size limit".into()));
    }
    state.peer.send_objects(body.to_vec()).await?;
    Ok(StatusCode::OK)
}

/// `POST /repo/exists` — bounded history slice toward the caller's haves.
pub async fn exists_handler(
    State(state): State<AppState>,
    Json(request): Json<RevListRequest>,
) -> ServerResult<Json<HistoryResponse>> {
    let want = request.want_ids()?;
    let have = request.have_ids()?;
    let slice = state.peer.history_probe(&want, &have).await?;
    Ok(Json(HistoryResponse::from_slice(&slice)))
}

/// `GET /repo/beginpush` — open a push session.
pub async fn begin_push_handler(State(state): State<AppState>) -> ServerResult<StatusCode> {
    state.peer.begin_push().await?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndPushParams {
    pub refspec: String,
    pub object_id: String,
    pub original_ref_value: String,
}

/// `GET /repo/endpush` — close the session with a CAS ref update.
/// A stale `originalRefValue` yields 409.
pub async fn end_push_handler(
    State(state): State<AppState>,
    Query(params): Query<EndPushParams>,
) -> ServerResult<StatusCode> {
    let new_id = parse_id(&params.object_id)?;
    let expected_old = parse_id(&params.original_ref_value)?;
    state
        .peer
        .end_push(&params.refspec, new_id, expected_old)
        .await?;
    info!(refspec = %params.refspec, new = %new_id.short_hex(), "push ref updated");
    Ok(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
pub struct RefParseParams {
    pub name: String,
}

/// `GET /refparse?name=…` — resolve one ref to an XML document.
pub async fn ref_parse_handler(
    State(state): State<AppState>,
    Query(params): Query<RefParseParams>,
) -> ServerResult<Response> {
    match state.peer.ref_parse(&params.name).await? {
        Some(doc) => Ok(xml_response(doc.to_xml())),
        None => Err(ServerError::NotFound(params.name)),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRefParams {
    pub name: String,
    pub new_value: Option<String>,
    pub delete: Option<bool>,
}

/// `GET /updateref?name=…&newValue=…[&delete=true]` — move or drop a ref.
pub async fn update_ref_handler(
    State(state): State<AppState>,
    Query(params): Query<UpdateRefParams>,
) -> ServerResult<Response> {
    if params.delete.unwrap_or(false) {
        let previous = state
            .peer
            .ref_parse(&params.name)
            .await?
            .ok_or_else(|| ServerError::NotFound(params.name.clone()))?;
        state.peer.update_ref(&params.name, None).await?;
        return Ok(xml_response(
            ChangedRefDocument {
                name: params.name,
                object_id: previous.object_id,
            }
            .to_xml(),
        ));
    }
    let value = params
        .new_value
        .as_deref()
        .ok_or_else(|| ServerError::BadRequest("newValue or delete=true required".into()))?;
    let id = parse_id(value)?;
    state.peer.update_ref(&params.name, Some(id)).await?;
    Ok(xml_response(
        ChangedRefDocument {
            name: params.name,
            object_id: id,
        }
        .to_xml(),
    ))
}
