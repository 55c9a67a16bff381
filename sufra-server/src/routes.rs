//! HTTP handlers for Sufra server.

use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::OptionalExtension;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use sufra_core::{
    MenuHealthReport, MenuSnapshot, MenuSource, PublicMenu, ViewWindow, calculate_menu_health,
    compose_public_menu, menu_url, ranked_views,
};

use crate::db::DbPool;
use crate::models::{Branch, MenuCategory, MenuEvent, MenuItem, Restaurant};
use crate::openapi::ApiDoc;
use crate::schema::{branches, menu_categories, menu_events, menu_items, restaurants};
use crate::store::{DieselMenuSource, EVENT_KINDS};

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Base URL used to build public menu links.
    pub public_base_url: String,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Request payload for creating a restaurant.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    /// URL slug for the public menu.
    pub slug: String,
    /// English restaurant name.
    pub name_en: String,
    /// Arabic restaurant name.
    pub name_ar: Option<String>,
    /// English microsite tagline.
    pub tagline_en: Option<String>,
    /// Arabic microsite tagline.
    pub tagline_ar: Option<String>,
    /// ISO currency code, defaults to SAR.
    pub currency: Option<String>,
}

/// Restaurant payload returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    /// Restaurant identifier.
    pub id: String,
    /// URL slug for the public menu.
    pub slug: String,
    /// English restaurant name.
    pub name_en: String,
    /// Arabic restaurant name.
    pub name_ar: Option<String>,
    /// English microsite tagline.
    pub tagline_en: Option<String>,
    /// Arabic microsite tagline.
    pub tagline_ar: Option<String>,
    /// ISO currency code.
    pub currency: String,
    /// Canonical public menu URL.
    pub menu_url: String,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

/// Restaurant profile with content counts.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummaryResponse {
    /// Restaurant payload.
    pub restaurant: RestaurantResponse,
    /// Number of branches.
    pub branch_count: i64,
    /// Number of menu categories.
    pub category_count: i64,
    /// Number of menu items, hidden ones included.
    pub item_count: i64,
}

/// Request payload for adding a branch.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchRequest {
    /// English branch name.
    pub name_en: String,
    /// Arabic branch name.
    pub name_ar: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

/// Branch payload returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchResponse {
    /// Branch identifier.
    pub id: String,
    /// English branch name.
    pub name_en: String,
    /// Arabic branch name.
    pub name_ar: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

/// Request payload for creating or updating a category.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    /// English category name.
    pub name_en: String,
    /// Arabic category name.
    pub name_ar: Option<String>,
    /// Display position on the menu.
    #[serde(default)]
    pub sort_order: i32,
}

/// Category payload returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// Category identifier.
    pub id: String,
    /// English category name.
    pub name_en: String,
    /// Arabic category name.
    pub name_ar: Option<String>,
    /// Display position on the menu.
    pub sort_order: i32,
}

/// Request payload for creating or updating a menu item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    /// Owning category identifier, if filed.
    pub category_id: Option<String>,
    /// English item name.
    pub name_en: String,
    /// Arabic item name.
    pub name_ar: Option<String>,
    /// English description.
    pub description_en: Option<String>,
    /// Arabic description.
    pub description_ar: Option<String>,
    /// Price in minor currency units.
    pub price_minor: Option<i32>,
    /// Item photo URL.
    pub image_url: Option<String>,
    /// Whether the item is shown on the public menu.
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    /// "New" badge.
    #[serde(default)]
    pub is_new: bool,
    /// "Popular" badge.
    #[serde(default)]
    pub is_popular: bool,
    /// Spicy dietary tag.
    #[serde(default)]
    pub is_spicy: bool,
    /// Vegetarian dietary tag.
    #[serde(default)]
    pub is_vegetarian: bool,
    /// Vegan dietary tag.
    #[serde(default)]
    pub is_vegan: bool,
    /// Gluten-free dietary tag.
    #[serde(default)]
    pub is_gluten_free: bool,
    /// Display position within its category.
    #[serde(default)]
    pub sort_order: i32,
}

fn default_visible() -> bool {
    true
}

/// Menu item payload returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Item identifier.
    pub id: String,
    /// Owning category identifier, if filed.
    pub category_id: Option<String>,
    /// English item name.
    pub name_en: String,
    /// Arabic item name.
    pub name_ar: Option<String>,
    /// English description.
    pub description_en: Option<String>,
    /// Arabic description.
    pub description_ar: Option<String>,
    /// Price in minor currency units.
    pub price_minor: Option<i32>,
    /// Item photo URL.
    pub image_url: Option<String>,
    /// Whether the item is shown on the public menu.
    pub is_visible: bool,
    /// "New" badge.
    pub is_new: bool,
    /// "Popular" badge.
    pub is_popular: bool,
    /// Spicy dietary tag.
    pub is_spicy: bool,
    /// Vegetarian dietary tag.
    pub is_vegetarian: bool,
    /// Vegan dietary tag.
    pub is_vegan: bool,
    /// Gluten-free dietary tag.
    pub is_gluten_free: bool,
    /// Display position within its category.
    pub sort_order: i32,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

/// Response payload for a deleted item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemResponse {
    /// Deleted item identifier.
    pub id: String,
}

/// Request payload for recording an engagement event.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventRequest {
    /// Referenced item identifier, if any.
    pub item_id: Option<String>,
    /// Event kind (`item_view`, `item_click`, `favorite`).
    pub kind: String,
}

/// Response payload for a recorded event.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventResponse {
    /// Event identifier.
    pub id: String,
    /// Event kind.
    pub kind: String,
}

/// Per-item view count entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewCountEntry {
    /// Item identifier, possibly of a since-deleted item.
    pub item_id: String,
    /// Recorded views within the window.
    pub views: usize,
}

/// Response payload for item view analytics.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewAnalyticsResponse {
    /// Analytics lookback, in days.
    pub window_days: i64,
    /// Total recorded views within the window.
    pub total_views: usize,
    /// Per-item counts, highest first.
    pub views: Vec<ViewCountEntry>,
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        message: message.to_string(),
    })
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        message: message.to_string(),
    })
}

fn internal_error(message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse { message })
}

/// Whether a slug is non-empty lowercase ASCII letters, digits and hyphens.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn restaurant_response(restaurant: Restaurant, public_base_url: &str) -> RestaurantResponse {
    let url = menu_url(public_base_url, &restaurant.slug);
    RestaurantResponse {
        id: restaurant.id,
        slug: restaurant.slug,
        name_en: restaurant.name_en,
        name_ar: restaurant.name_ar,
        tagline_en: restaurant.tagline_en,
        tagline_ar: restaurant.tagline_ar,
        currency: restaurant.currency,
        menu_url: url,
        created_at: restaurant.created_at.and_utc().to_rfc3339(),
    }
}

fn branch_response(branch: Branch) -> BranchResponse {
    BranchResponse {
        id: branch.id,
        name_en: branch.name_en,
        name_ar: branch.name_ar,
        address: branch.address,
        phone: branch.phone,
    }
}

fn category_response(category: MenuCategory) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name_en: category.name_en,
        name_ar: category.name_ar,
        sort_order: category.sort_order,
    }
}

fn item_response(item: MenuItem) -> ItemResponse {
    ItemResponse {
        id: item.id,
        category_id: item.category_id,
        name_en: item.name_en,
        name_ar: item.name_ar,
        description_en: item.description_en,
        description_ar: item.description_ar,
        price_minor: item.price_minor,
        image_url: item.image_url,
        is_visible: item.is_visible,
        is_new: item.is_new,
        is_popular: item.is_popular,
        is_spicy: item.is_spicy,
        is_vegetarian: item.is_vegetarian,
        is_vegan: item.is_vegan,
        is_gluten_free: item.is_gluten_free,
        sort_order: item.sort_order,
        created_at: item.created_at.and_utc().to_rfc3339(),
    }
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant created", body = RestaurantResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    tag = "restaurants"
)]
#[post("/api/restaurants")]
/// Create a restaurant account.
pub async fn create_restaurant(
    state: web::Data<AppState>,
    payload: web::Json<CreateRestaurantRequest>,
) -> impl Responder {
    let payload = payload.into_inner();
    if !is_valid_slug(&payload.slug) {
        return bad_request("slug must be lowercase letters, digits and hyphens");
    }
    if payload.name_en.trim().is_empty() {
        return bad_request("nameEn must not be empty");
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        let taken = restaurants::table
            .filter(restaurants::slug.eq(&payload.slug))
            .first::<Restaurant>(&mut conn)
            .optional()
            .map_err(|err| err.to_string())?
            .is_some();
        if taken {
            return Ok::<Option<Restaurant>, String>(None);
        }
        let restaurant = Restaurant {
            id: Uuid::new_v4().to_string(),
            slug: payload.slug,
            name_en: payload.name_en,
            name_ar: payload.name_ar,
            tagline_en: payload.tagline_en,
            tagline_ar: payload.tagline_ar,
            currency: payload.currency.unwrap_or_else(|| "SAR".to_string()),
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(restaurants::table)
            .values(&restaurant)
            .execute(&mut conn)
            .map_err(|err| err.to_string())?;
        Ok(Some(restaurant))
    })
    .await
    .unwrap_or_else(|err| Err(format!("create restaurant failed: {err}")));

    match result {
        Ok(Some(restaurant)) => {
            HttpResponse::Ok().json(restaurant_response(restaurant, &state.public_base_url))
        }
        Ok(None) => HttpResponse::Conflict().json(ErrorResponse {
            message: "slug already in use".to_string(),
        }),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant summary", body = RestaurantSummaryResponse),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    tag = "restaurants"
)]
#[get("/api/restaurants/{id}")]
/// Fetch a restaurant profile with content counts.
pub async fn restaurant_summary(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        let restaurant = restaurants::table
            .find(&restaurant_id)
            .first::<Restaurant>(&mut conn)
            .optional()
            .map_err(|err| err.to_string())?;
        let Some(restaurant) = restaurant else {
            return Ok::<Option<(Restaurant, i64, i64, i64)>, String>(None);
        };
        let branch_count = branches::table
            .filter(branches::restaurant_id.eq(&restaurant_id))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(|err| err.to_string())?;
        let category_count = menu_categories::table
            .filter(menu_categories::restaurant_id.eq(&restaurant_id))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(|err| err.to_string())?;
        let item_count = menu_items::table
            .filter(menu_items::restaurant_id.eq(&restaurant_id))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(|err| err.to_string())?;
        Ok(Some((restaurant, branch_count, category_count, item_count)))
    })
    .await
    .unwrap_or_else(|err| Err(format!("restaurant lookup failed: {err}")));

    match result {
        Ok(Some((restaurant, branch_count, category_count, item_count))) => {
            HttpResponse::Ok().json(RestaurantSummaryResponse {
                restaurant: restaurant_response(restaurant, &state.public_base_url),
                branch_count,
                category_count,
                item_count,
            })
        }
        Ok(None) => not_found("restaurant not found"),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{id}/branches",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = BranchRequest,
    responses(
        (status = 200, description = "Branch created", body = BranchResponse),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    tag = "branches"
)]
#[post("/api/restaurants/{id}/branches")]
/// Add a branch to a restaurant.
pub async fn create_branch(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<BranchRequest>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    let payload = payload.into_inner();
    if payload.name_en.trim().is_empty() {
        return bad_request("nameEn must not be empty");
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        if !restaurant_exists(&mut conn, &restaurant_id)? {
            return Ok::<Option<Branch>, String>(None);
        }
        let branch = Branch {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            name_en: payload.name_en,
            name_ar: payload.name_ar,
            address: payload.address,
            phone: payload.phone,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(branches::table)
            .values(&branch)
            .execute(&mut conn)
            .map_err(|err| err.to_string())?;
        Ok(Some(branch))
    })
    .await
    .unwrap_or_else(|err| Err(format!("create branch failed: {err}")));

    match result {
        Ok(Some(branch)) => HttpResponse::Ok().json(branch_response(branch)),
        Ok(None) => not_found("restaurant not found"),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/branches",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Branches", body = [BranchResponse])
    ),
    tag = "branches"
)]
#[get("/api/restaurants/{id}/branches")]
/// List a restaurant's branches.
pub async fn list_branches(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        branches::table
            .filter(branches::restaurant_id.eq(&restaurant_id))
            .order(branches::created_at.asc())
            .load::<Branch>(&mut conn)
            .map_err(|err| err.to_string())
    })
    .await
    .unwrap_or_else(|err| Err(format!("list branches failed: {err}")));

    match result {
        Ok(rows) => HttpResponse::Ok().json(
            rows.into_iter()
                .map(branch_response)
                .collect::<Vec<BranchResponse>>(),
        ),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{id}/categories",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category created", body = CategoryResponse),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    tag = "menu"
)]
#[post("/api/restaurants/{id}/categories")]
/// Create a menu category.
pub async fn create_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<CategoryRequest>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    let payload = payload.into_inner();
    if payload.name_en.trim().is_empty() {
        return bad_request("nameEn must not be empty");
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        if !restaurant_exists(&mut conn, &restaurant_id)? {
            return Ok::<Option<MenuCategory>, String>(None);
        }
        let category = MenuCategory {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            name_en: payload.name_en,
            name_ar: payload.name_ar,
            sort_order: payload.sort_order,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(menu_categories::table)
            .values(&category)
            .execute(&mut conn)
            .map_err(|err| err.to_string())?;
        Ok(Some(category))
    })
    .await
    .unwrap_or_else(|err| Err(format!("create category failed: {err}")));

    match result {
        Ok(Some(category)) => HttpResponse::Ok().json(category_response(category)),
        Ok(None) => not_found("restaurant not found"),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/categories",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Categories in display order", body = [CategoryResponse])
    ),
    tag = "menu"
)]
#[get("/api/restaurants/{id}/categories")]
/// List a restaurant's menu categories in display order.
pub async fn list_categories(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        menu_categories::table
            .filter(menu_categories::restaurant_id.eq(&restaurant_id))
            .order(menu_categories::sort_order.asc())
            .load::<MenuCategory>(&mut conn)
            .map_err(|err| err.to_string())
    })
    .await
    .unwrap_or_else(|err| Err(format!("list categories failed: {err}")));

    match result {
        Ok(rows) => HttpResponse::Ok().json(
            rows.into_iter()
                .map(category_response)
                .collect::<Vec<CategoryResponse>>(),
        ),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    post,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse)
    ),
    tag = "menu"
)]
#[post("/api/categories/{id}")]
/// Update a menu category.
pub async fn update_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<CategoryRequest>,
) -> impl Responder {
    let category_id = path.into_inner();
    let payload = payload.into_inner();
    if payload.name_en.trim().is_empty() {
        return bad_request("nameEn must not be empty");
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        let updated = diesel::update(menu_categories::table.find(&category_id))
            .set((
                menu_categories::name_en.eq(&payload.name_en),
                menu_categories::name_ar.eq(&payload.name_ar),
                menu_categories::sort_order.eq(payload.sort_order),
            ))
            .execute(&mut conn)
            .map_err(|err| err.to_string())?;
        if updated == 0 {
            return Ok::<Option<MenuCategory>, String>(None);
        }
        menu_categories::table
            .find(&category_id)
            .first::<MenuCategory>(&mut conn)
            .map(Some)
            .map_err(|err| err.to_string())
    })
    .await
    .unwrap_or_else(|err| Err(format!("update category failed: {err}")));

    match result {
        Ok(Some(category)) => HttpResponse::Ok().json(category_response(category)),
        Ok(None) => not_found("category not found"),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    post,
    path = "/api/restaurants/{id}/items",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid category", body = ErrorResponse),
        (status = 404, description = "Unknown restaurant", body = ErrorResponse)
    ),
    tag = "menu"
)]
#[post("/api/restaurants/{id}/items")]
/// Create a menu item.
pub async fn create_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ItemRequest>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    let payload = payload.into_inner();
    if payload.name_en.trim().is_empty() {
        return bad_request("nameEn must not be empty");
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        if !restaurant_exists(&mut conn, &restaurant_id)? {
            return Ok::<ItemWriteOutcome, String>(ItemWriteOutcome::RestaurantMissing);
        }
        if let Some(category_id) = &payload.category_id
            && !category_belongs_to(&mut conn, category_id, &restaurant_id)?
        {
            return Ok(ItemWriteOutcome::BadCategory);
        }
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            category_id: payload.category_id,
            name_en: payload.name_en,
            name_ar: payload.name_ar,
            description_en: payload.description_en,
            description_ar: payload.description_ar,
            price_minor: payload.price_minor,
            image_url: payload.image_url,
            is_visible: payload.is_visible,
            is_new: payload.is_new,
            is_popular: payload.is_popular,
            is_spicy: payload.is_spicy,
            is_vegetarian: payload.is_vegetarian,
            is_vegan: payload.is_vegan,
            is_gluten_free: payload.is_gluten_free,
            sort_order: payload.sort_order,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(menu_items::table)
            .values(&item)
            .execute(&mut conn)
            .map_err(|err| err.to_string())?;
        Ok(ItemWriteOutcome::Written(item))
    })
    .await
    .unwrap_or_else(|err| Err(format!("create item failed: {err}")));

    item_write_response(result)
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/items",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Items, hidden ones included", body = [ItemResponse])
    ),
    tag = "menu"
)]
#[get("/api/restaurants/{id}/items")]
/// List a restaurant's menu items, hidden ones included.
pub async fn list_items(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let restaurant_id = path.into_inner();
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        menu_items::table
            .filter(menu_items::restaurant_id.eq(&restaurant_id))
            .order(menu_items::created_at.asc())
            .load::<MenuItem>(&mut conn)
            .map_err(|err| err.to_string())
    })
    .await
    .unwrap_or_else(|err| Err(format!("list items failed: {err}")));

    match result {
        Ok(rows) => HttpResponse::Ok().json(
            rows.into_iter()
                .map(item_response)
                .collect::<Vec<ItemResponse>>(),
        ),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    post,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item id")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Invalid category", body = ErrorResponse),
        (status = 404, description = "Unknown item", body = ErrorResponse)
    ),
    tag = "menu"
)]
#[post("/api/items/{id}")]
/// Update a menu item.
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ItemRequest>,
) -> impl Responder {
    let item_id = path.into_inner();
    let payload = payload.into_inner();
    if payload.name_en.trim().is_empty() {
        return bad_request("nameEn must not be empty");
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        let existing = menu_items::table
            .find(&item_id)
            .first::<MenuItem>(&mut conn)
            .optional()
            .map_err(|err| err.to_string())?;
        let Some(existing) = existing else {
            return Ok::<ItemWriteOutcome, String>(ItemWriteOutcome::ItemMissing);
        };
        if let Some(category_id) = &payload.category_id
            && !category_belongs_to(&mut conn, category_id, &existing.restaurant_id)?
        {
            return Ok(ItemWriteOutcome::BadCategory);
        }
        diesel::update(menu_items::table.find(&item_id))
            .set((
                menu_items::category_id.eq(&payload.category_id),
                menu_items::name_en.eq(&payload.name_en),
                menu_items::name_ar.eq(&payload.name_ar),
                menu_items::description_en.eq(&payload.description_en),
                menu_items::description_ar.eq(&payload.description_ar),
                menu_items::price_minor.eq(payload.price_minor),
                menu_items::image_url.eq(&payload.image_url),
                menu_items::is_visible.eq(payload.is_visible),
                menu_items::is_new.eq(payload.is_new),
                menu_items::is_popular.eq(payload.is_popular),
                menu_items::is_spicy.eq(payload.is_spicy),
                menu_items::is_vegetarian.eq(payload.is_vegetarian),
                menu_items::is_vegan.eq(payload.is_vegan),
                menu_items::is_gluten_free.eq(payload.is_gluten_free),
                menu_items::sort_order.eq(payload.sort_order),
            ))
            .execute(&mut conn)
            .map_err(|err| err.to_string())?;
        menu_items::table
            .find(&item_id)
            .first::<MenuItem>(&mut conn)
            .map(ItemWriteOutcome::Written)
            .map_err(|err| err.to_string())
    })
    .await
    .unwrap_or_else(|err| Err(format!("update item failed: {err}")));

    item_write_response(result)
}

#[utoipa::path(
    post,
    path = "/api/items/{id}/delete",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted", body = DeleteItemResponse),
        (status = 404, description = "Unknown item", body = ErrorResponse)
    ),
    tag = "menu"
)]
#[post("/api/items/{id}/delete")]
/// Delete a menu item. Recorded events for the item are kept.
pub async fn delete_item(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let item_id = path.into_inner();
    let pool = state.pool.clone();
    let response_id = item_id.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        diesel::delete(menu_items::table.find(&item_id))
            .execute(&mut conn)
            .map_err(|err| err.to_string())
    })
    .await
    .unwrap_or_else(|err| Err(format!("delete item failed: {err}")));

    match result {
        Ok(0) => not_found("item not found"),
        Ok(_) => HttpResponse::Ok().json(DeleteItemResponse { id: response_id }),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    get,
    path = "/api/menus/{slug}",
    params(("slug" = String, Path, description = "Restaurant slug")),
    responses(
        (status = 200, description = "Public bilingual menu", body = PublicMenu),
        (status = 404, description = "Unknown menu", body = ErrorResponse)
    ),
    tag = "public"
)]
#[get("/api/menus/{slug}")]
/// Fetch the public bilingual menu for a restaurant slug.
pub async fn public_menu(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let slug = path.into_inner();
    let pool = state.pool.clone();
    let base_url = state.public_base_url.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        let restaurant = restaurants::table
            .filter(restaurants::slug.eq(&slug))
            .first::<Restaurant>(&mut conn)
            .optional()
            .map_err(|err| err.to_string())?;
        let Some(restaurant) = restaurant else {
            return Ok::<Option<PublicMenu>, String>(None);
        };
        let branch_rows = branches::table
            .filter(branches::restaurant_id.eq(&restaurant.id))
            .order(branches::created_at.asc())
            .load::<Branch>(&mut conn)
            .map_err(|err| err.to_string())?;

        let source = DieselMenuSource::new(pool.clone());
        let categories = source
            .menu_categories(&restaurant.id)
            .map_err(|err| err.to_string())?;
        let items = source
            .menu_items(&restaurant.id)
            .map_err(|err| err.to_string())?;

        let menu = compose_public_menu(
            restaurant.into(),
            branch_rows.into_iter().map(Into::into).collect(),
            &categories,
            &items,
            &base_url,
        );
        Ok(Some(menu))
    })
    .await
    .unwrap_or_else(|err| Err(format!("public menu failed: {err}")));

    match result {
        Ok(Some(menu)) => HttpResponse::Ok().json(menu),
        Ok(None) => not_found("menu not found"),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    post,
    path = "/api/menus/{slug}/events",
    params(("slug" = String, Path, description = "Restaurant slug")),
    request_body = RecordEventRequest,
    responses(
        (status = 200, description = "Event recorded", body = RecordEventResponse),
        (status = 400, description = "Unknown event kind", body = ErrorResponse),
        (status = 404, description = "Unknown menu", body = ErrorResponse)
    ),
    tag = "public"
)]
#[post("/api/menus/{slug}/events")]
/// Record a guest engagement event against a public menu.
pub async fn record_event(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<RecordEventRequest>,
) -> impl Responder {
    let slug = path.into_inner();
    let payload = payload.into_inner();
    if !EVENT_KINDS.contains(&payload.kind.as_str()) {
        return bad_request("unknown event kind");
    }
    let pool = state.pool.clone();
    let result = web::block(move || {
        let mut conn = pool.get().map_err(|err| err.to_string())?;
        let restaurant_id = restaurants::table
            .filter(restaurants::slug.eq(&slug))
            .select(restaurants::id)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|err| err.to_string())?;
        let Some(restaurant_id) = restaurant_id else {
            return Ok::<Option<MenuEvent>, String>(None);
        };
        let event = MenuEvent {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            item_id: payload.item_id,
            kind: payload.kind,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(menu_events::table)
            .values(&event)
            .execute(&mut conn)
            .map_err(|err| err.to_string())?;
        Ok(Some(event))
    })
    .await
    .unwrap_or_else(|err| Err(format!("record event failed: {err}")));

    match result {
        Ok(Some(event)) => HttpResponse::Ok().json(RecordEventResponse {
            id: event.id,
            kind: event.kind,
        }),
        Ok(None) => not_found("menu not found"),
        Err(message) => internal_error(message),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/analytics/views",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Item view counts over the window", body = ViewAnalyticsResponse)
    ),
    tag = "analytics"
)]
#[get("/api/restaurants/{id}/analytics/views")]
/// Per-item view counts for the trailing analytics window.
pub async fn analytics_views(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let restaurant_id = path.into_inner();
    let window = ViewWindow::default();
    let since = window.since(Utc::now());
    let source = DieselMenuSource::new(state.pool.clone());
    let result = web::block(move || source.item_views(&restaurant_id, since))
        .await
        .unwrap_or_else(|err| Err(sufra_core::SufraError::Other(format!("view read failed: {err}"))));

    match result {
        Ok(events) => {
            let ids: Vec<String> = events.into_iter().filter_map(|event| event.item_id).collect();
            let views: Vec<ViewCountEntry> = ranked_views(&ids)
                .into_iter()
                .map(|(item_id, views)| ViewCountEntry { item_id, views })
                .collect();
            HttpResponse::Ok().json(ViewAnalyticsResponse {
                window_days: window.days,
                total_views: ids.len(),
                views,
            })
        }
        Err(err) => internal_error(err.to_string()),
    }
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/health",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Menu health report", body = MenuHealthReport),
        (status = 500, description = "Menu reads failed", body = ErrorResponse)
    ),
    tag = "analytics"
)]
#[get("/api/restaurants/{id}/health")]
/// Compute the menu health report for a restaurant.
///
/// The three reads fan out across blocking threads and join before
/// scoring; a failed analytics read degrades to an empty event list
/// while failed item or category reads fail the request.
pub async fn menu_health(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let restaurant_id = path.into_inner();
    let source = DieselMenuSource::new(state.pool.clone());
    let since = ViewWindow::default().since(Utc::now());

    let items_read = web::block({
        let source = source.clone();
        let restaurant_id = restaurant_id.clone();
        move || source.menu_items(&restaurant_id)
    });
    let categories_read = web::block({
        let source = source.clone();
        let restaurant_id = restaurant_id.clone();
        move || source.menu_categories(&restaurant_id)
    });
    let views_read = web::block({
        let restaurant_id = restaurant_id.clone();
        move || source.item_views(&restaurant_id, since)
    });

    let joined = futures_util::try_join!(items_read, categories_read, views_read);
    let (items, categories, views) = match joined {
        Ok(reads) => reads,
        Err(err) => return internal_error(format!("menu health reads failed: {err}")),
    };

    let snapshot = match MenuSnapshot::from_reads(items, categories, views) {
        Ok(snapshot) => snapshot,
        Err(err) => return internal_error(err.to_string()),
    };
    if snapshot.analytics_degraded {
        log::warn!("analytics read failed for restaurant {restaurant_id}; scoring without views");
    }
    if snapshot.dropped_events > 0 {
        log::warn!(
            "dropped {} view events without item ids for restaurant {restaurant_id}",
            snapshot.dropped_events
        );
    }

    HttpResponse::Ok().json(calculate_menu_health(&snapshot))
}

#[utoipa::path(
    get,
    path = "/api/openapi.json",
    responses((status = 200, description = "OpenAPI specification")),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI specification.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

enum ItemWriteOutcome {
    Written(MenuItem),
    RestaurantMissing,
    ItemMissing,
    BadCategory,
}

fn item_write_response(result: Result<ItemWriteOutcome, String>) -> HttpResponse {
    match result {
        Ok(ItemWriteOutcome::Written(item)) => HttpResponse::Ok().json(item_response(item)),
        Ok(ItemWriteOutcome::RestaurantMissing) => not_found("restaurant not found"),
        Ok(ItemWriteOutcome::ItemMissing) => not_found("item not found"),
        Ok(ItemWriteOutcome::BadCategory) => {
            bad_request("category does not belong to this restaurant")
        }
        Err(message) => internal_error(message),
    }
}

fn restaurant_exists(
    conn: &mut diesel::pg::PgConnection,
    restaurant_id: &str,
) -> Result<bool, String> {
    restaurants::table
        .find(restaurant_id)
        .select(restaurants::id)
        .first::<String>(conn)
        .optional()
        .map(|found| found.is_some())
        .map_err(|err| err.to_string())
}

fn category_belongs_to(
    conn: &mut diesel::pg::PgConnection,
    category_id: &str,
    restaurant_id: &str,
) -> Result<bool, String> {
    menu_categories::table
        .find(category_id)
        .filter(menu_categories::restaurant_id.eq(restaurant_id))
        .select(menu_categories::id)
        .first::<String>(conn)
        .optional()
        .map(|found| found.is_some())
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{CreateRestaurantRequest, ItemRequest, is_valid_slug, item_response};
    use crate::models::MenuItem;
    use crate::store::EVENT_KINDS;
    use chrono::NaiveDate;

    #[test]
    fn slug_validation_accepts_lowercase_hyphenated() {
        assert!(is_valid_slug("beit-zaytoun"));
        assert!(is_valid_slug("cafe9"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Beit"));
        assert!(!is_valid_slug("beit zaytoun"));
        assert!(!is_valid_slug("بيت"));
    }

    #[test]
    fn event_kinds_cover_views_clicks_and_favorites() {
        assert!(EVENT_KINDS.contains(&"item_view"));
        assert!(EVENT_KINDS.contains(&"item_click"));
        assert!(EVENT_KINDS.contains(&"favorite"));
        assert!(!EVENT_KINDS.contains(&"page_view"));
    }

    #[test]
    fn restaurant_request_uses_camel_case_fields() {
        let payload: CreateRestaurantRequest = serde_json::from_str(
            r#"{"slug":"beit-zaytoun","nameEn":"Beit Zaytoun","nameAr":"بيت زيتون"}"#,
        )
        .expect("payload");
        assert_eq!(payload.slug, "beit-zaytoun");
        assert_eq!(payload.name_ar.as_deref(), Some("بيت زيتون"));
        assert!(payload.currency.is_none());
    }

    #[test]
    fn item_request_defaults_tags_off_and_visible_on() {
        let payload: ItemRequest =
            serde_json::from_str(r#"{"nameEn":"Kabsa"}"#).expect("payload");
        assert!(payload.is_visible);
        assert!(!payload.is_new);
        assert!(!payload.is_gluten_free);
        assert_eq!(payload.sort_order, 0);
    }

    #[test]
    fn item_response_carries_rfc3339_timestamp() {
        let item = MenuItem {
            id: "i1".to_string(),
            restaurant_id: "r1".to_string(),
            category_id: None,
            name_en: "Kabsa".to_string(),
            name_ar: None,
            description_en: None,
            description_ar: None,
            price_minor: Some(4500),
            image_url: None,
            is_visible: true,
            is_new: false,
            is_popular: false,
            is_spicy: false,
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: false,
            sort_order: 0,
            created_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .expect("date")
                .and_hms_opt(9, 30, 0)
                .expect("time"),
        };
        let response = item_response(item);
        assert_eq!(response.created_at, "2025-06-01T09:30:00+00:00");
        let json = serde_json::to_value(&response).expect("json");
        assert_eq!(json["priceMinor"], 4500);
        assert_eq!(json["isVisible"], true);
    }
}
