//! 饮食记录的 HTTP 处理器

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::diet::{DietaryRecord, DietaryRecordRequest},
    repository::DietRepository,
    response::ApiResponse,
};

/// 查找属于当前用户的饮食记录，越权访问与不存在同样返回 404
pub(crate) async fn find_owned_record(
    repo: &DietRepository,
    id: i64,
    user_id: i64,
) -> Result<DietaryRecord, AppError> {
    let record = repo
        .find_record_by_id(id)
        .await?
        .filter(|r| r.user_id == user_id)
        .ok_or_else(|| AppError::NotFound("Record not found".to_string()))?;

    Ok(record)
}

/// 列出当前用户的全部饮食记录
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    let records = repo.list_records_by_user_id(ctx.user_id).await?;

    Ok(Json(ApiResponse::success(records)))
}

/// 获取单条饮食记录
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    let record = find_owned_record(&repo, id, ctx.user_id).await?;

    Ok(Json(ApiResponse::success(record)))
}

/// 创建饮食记录
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Json(req): Json<DietaryRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    let record = repo.create_record(ctx.user_id, &req).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Record created",
        record,
    )))
}

/// 更新饮食记录
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<DietaryRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    find_owned_record(&repo, id, ctx.user_id).await?;

    let record = repo
        .update_record(id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".to_string()))?;

    Ok(Json(ApiResponse::success_with_message(
        "Record updated",
        record,
    )))
}

/// 删除饮食记录及其食物条目
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    find_owned_record(&repo, id, ctx.user_id).await?;
    repo.delete_record(id).await?;

    Ok(Json(ApiResponse::<()>::success_with_message(
        "Record deleted",
        (),
    )))
}
