//! 食物条目的 HTTP 处理器

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    handlers::diet::find_owned_record,
    middleware::AppState,
    models::diet::{FoodItem, FoodItemRequest},
    repository::DietRepository,
    response::ApiResponse,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodListQuery {
    pub record_id: i64,
}

/// 查找属于当前用户的食物条目
/// 归属通过所在饮食记录判定，越权访问与不存在同样返回 404
async fn find_owned_item(
    repo: &DietRepository,
    id: i64,
    user_id: i64,
) -> Result<FoodItem, AppError> {
    let item = repo
        .find_item_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Food item not found".to_string()))?;

    let record = repo.find_record_by_id(item.dietary_record_id).await?;
    if !record.is_some_and(|r| r.user_id == user_id) {
        return Err(AppError::NotFound("Food item not found".to_string()));
    }

    Ok(item)
}

/// 列出某条饮食记录下的食物条目
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Query(query): Query<FoodListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    find_owned_record(&repo, query.record_id, ctx.user_id).await?;

    let items = repo.list_items_by_record_id(query.record_id).await?;

    Ok(Json(ApiResponse::success(items)))
}

/// 获取单个食物条目
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    let item = find_owned_item(&repo, id, ctx.user_id).await?;

    Ok(Json(ApiResponse::success(item)))
}

/// 创建食物条目
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Json(req): Json<FoodItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    find_owned_record(&repo, req.dietary_record_id, ctx.user_id).await?;

    let item = repo.create_item(&req).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Food item created",
        item,
    )))
}

/// 更新食物条目
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<FoodItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    find_owned_item(&repo, id, ctx.user_id).await?;
    find_owned_record(&repo, req.dietary_record_id, ctx.user_id).await?;

    let item = repo
        .update_item(id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Food item not found".to_string()))?;

    Ok(Json(ApiResponse::success_with_message(
        "Food item updated",
        item,
    )))
}

/// 删除食物条目
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DietRepository::new(state.db.clone());
    find_owned_item(&repo, id, ctx.user_id).await?;
    repo.delete_item(id).await?;

    Ok(Json(ApiResponse::<()>::success_with_message(
        "Food item deleted",
        (),
    )))
}
