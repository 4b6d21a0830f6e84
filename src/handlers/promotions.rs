use actix_web::{web, HttpResponse};
use chrono::{Duration, NaiveTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::infrastructure::models::{NewPromotionRow, PromotionChangeset, PromotionRow};
use crate::schema::promotions;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePromotionRequest {
    pub title: String,
    pub message: String,
    pub image_url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePromotionRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub image_url: Option<String>,
    pub unread: Option<bool>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /promotions/promotions-getAll
#[utoipa::path(
    get,
    path = "/promotions/promotions-getAll",
    responses(
        (status = 200, description = "All promotions, newest first", body = [PromotionRow]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "promotions"
)]
pub async fn get_all(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows = promotions::table
            .select(PromotionRow::as_select())
            .order(promotions::time.desc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Promotions fetched successfully",
        "data": rows,
    })))
}

/// GET /promotions/promotions-getById/{id}
#[utoipa::path(
    get,
    path = "/promotions/promotions-getById/{id}",
    params(("id" = Uuid, Path, description = "Promotion id")),
    responses(
        (status = 200, description = "Promotion found", body = PromotionRow),
        (status = 404, description = "Promotion not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "promotions"
)]
pub async fn get_by_id(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let row = web::block(move || {
        let mut conn = pool.get()?;
        let row = promotions::table
            .filter(promotions::id.eq(id))
            .select(PromotionRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    match row {
        Some(row) => Ok(HttpResponse::Ok().json(json!({
            "message": "Promotion fetched successfully",
            "data": row,
        }))),
        None => Err(AppError::NotFound("Promotion not found".to_string())),
    }
}

/// POST /promotions/promotions-create
#[utoipa::path(
    post,
    path = "/promotions/promotions-create",
    request_body = CreatePromotionRequest,
    responses(
        (status = 201, description = "Promotion created", body = PromotionRow),
        (status = 400, description = "Missing required fields"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "promotions"
)]
pub async fn create(
    pool: web::Data<DbPool>,
    body: web::Json<CreatePromotionRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    if body.title.is_empty() || body.message.is_empty() || body.image_url.is_empty() {
        return Err(AppError::Validation(
            "title, message and image_url are required".to_string(),
        ));
    }

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let new_row = NewPromotionRow {
            id: Uuid::new_v4(),
            title: body.title,
            message: body.message,
            image_url: body.image_url,
            unread: true,
            time: Utc::now(),
        };
        let row = diesel::insert_into(promotions::table)
            .values(&new_row)
            .get_result::<PromotionRow>(&mut conn)?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({
        "message": "Promotion created successfully",
        "data": row,
    })))
}

/// PUT /promotions/promotions-update/{id}
#[utoipa::path(
    put,
    path = "/promotions/promotions-update/{id}",
    params(("id" = Uuid, Path, description = "Promotion id")),
    request_body = UpdatePromotionRequest,
    responses(
        (status = 200, description = "Promotion updated", body = PromotionRow),
        (status = 404, description = "Promotion not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "promotions"
)]
pub async fn update(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePromotionRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let row = web::block(move || {
        let mut conn = pool.get()?;
        let changes = PromotionChangeset {
            title: body.title,
            message: body.message,
            image_url: body.image_url,
            unread: body.unread,
            updated_at: Utc::now(),
        };
        let row = diesel::update(promotions::table.filter(promotions::id.eq(id)))
            .set(&changes)
            .get_result::<PromotionRow>(&mut conn)
            .optional()?;
        Ok::<_, AppError>(row)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    match row {
        Some(row) => Ok(HttpResponse::Ok().json(json!({
            "message": "Promotion updated successfully",
            "data": row,
        }))),
        None => Err(AppError::NotFound("Promotion not found".to_string())),
    }
}

/// DELETE /promotions/promotions-delete/{id}
#[utoipa::path(
    delete,
    path = "/promotions/promotions-delete/{id}",
    params(("id" = Uuid, Path, description = "Promotion id")),
    responses(
        (status = 200, description = "Promotion deleted"),
        (status = 404, description = "Promotion not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "promotions"
)]
pub async fn delete(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let deleted = web::block(move || {
        let mut conn = pool.get()?;
        let count = diesel::delete(promotions::table.filter(promotions::id.eq(id)))
            .execute(&mut conn)?;
        Ok::<_, AppError>(count > 0)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    if !deleted {
        return Err(AppError::NotFound("Promotion not found".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Promotion deleted successfully" })))
}

/// GET /promotions/notifications/todays
///
/// Promotions created today (UTC day bounds), newest first.
#[utoipa::path(
    get,
    path = "/promotions/notifications/todays",
    responses(
        (status = 200, description = "Today's promotions", body = [PromotionRow]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "promotions"
)]
pub async fn todays(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1);

    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows = promotions::table
            .filter(promotions::time.ge(start))
            .filter(promotions::time.lt(end))
            .select(PromotionRow::as_select())
            .order(promotions::time.desc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "promotions": rows,
    })))
}

/// GET /promotions/unread-promotions
#[utoipa::path(
    get,
    path = "/promotions/unread-promotions",
    responses(
        (status = 200, description = "Unread promotions, newest first", body = [PromotionRow]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "promotions"
)]
pub async fn unread(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || {
        let mut conn = pool.get()?;
        let rows = promotions::table
            .filter(promotions::unread.eq(true))
            .select(PromotionRow::as_select())
            .order(promotions::time.desc())
            .load(&mut conn)?;
        Ok::<_, AppError>(rows)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(rows))
}

/// PUT /promotions/mark-as-read/{id}
///
/// Idempotent: marking an already-read or unknown promotion still returns
/// a 200 confirmation.
#[utoipa::path(
    put,
    path = "/promotions/mark-as-read/{id}",
    params(("id" = Uuid, Path, description = "Promotion id")),
    responses(
        (status = 200, description = "Marked as read"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "promotions"
)]
pub async fn mark_as_read(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || {
        let mut conn = pool.get()?;
        diesel::update(promotions::table.filter(promotions::id.eq(id)))
            .set((
                promotions::unread.eq(false),
                promotions::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;
        Ok::<_, AppError>(())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Marked as read",
    })))
}
