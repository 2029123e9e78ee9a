use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};

use crate::error::Result;
use crate::models::{
    CreateDesignRequest, CreateDesignResponse, DesignId, DesignListResponse, DesignView,
    ListDesignsParams, OkResponse,
};
use crate::registry::DesignRegistry;
use crate::session::CurrentUser;
use crate::AppState;

/// List designs
///
/// GET /api/designs?scope=public|private&include_state=1&private_only=1
///
/// `scope=public` lists every public design; otherwise the caller's own,
/// restricted to private ones when `private_only=1`. Stored state is only
/// included with `include_state=1`.
pub async fn list_designs(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<ListDesignsParams>,
) -> Result<Json<DesignListResponse>> {
    let scope = params.scope();
    let private_only = params.private_only();
    let include_state = params.include_state();

    let db = state.db.clone();
    let designs = tokio::task::spawn_blocking(move || {
        DesignRegistry::new(db).list(user_id, scope, private_only)
    })
    .await??;

    let designs = designs
        .into_iter()
        .map(|design| DesignView::from_design(design, include_state))
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(DesignListResponse { designs }))
}

/// Save a new design
///
/// POST /api/designs with `{"name", "is_public", "state"}`.
/// Names and content must be unused among public designs and the caller's
/// private designs.
pub async fn create_design(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    body: Bytes,
) -> Result<Json<CreateDesignResponse>> {
    let draft = CreateDesignRequest::parse(&body)?.into_draft();

    let db = state.db.clone();
    let id =
        tokio::task::spawn_blocking(move || DesignRegistry::new(db).create(user_id, draft)).await??;

    Ok(Json(CreateDesignResponse { ok: true, id }))
}

/// Fetch one design with its state
///
/// Private designs are visible to their owner only.
pub async fn get_design(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<DesignId>,
) -> Result<Json<DesignView>> {
    let db = state.db.clone();
    let design =
        tokio::task::spawn_blocking(move || DesignRegistry::new(db).detail(user_id, id)).await??;

    Ok(Json(DesignView::from_design(design, true)?))
}

/// Delete a design owned by the caller
pub async fn delete_design(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<DesignId>,
) -> Result<Json<OkResponse>> {
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || DesignRegistry::new(db).delete(user_id, id)).await??;

    Ok(Json(OkResponse { ok: true }))
}
