use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::{ApiErrorResponse, RestaurantDetail, RestaurantSummary};
use crate::store;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let conn = &mut state.config.connect()?;

    let restaurants = store::list_restaurants(conn)?;
    let pairings = store::pairings_per_restaurant(conn, &restaurants)?;

    let summaries = restaurants
        .into_iter()
        .zip(pairings)
        .map(|(restaurant, pairings)| {
            let pizza_ids = pairings.iter().map(|pairing| pairing.pizza_id).collect();
            RestaurantSummary::new(restaurant, pizza_ids)
        })
        .collect();

    Ok(Json(summaries))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id"),
    ),
    responses(
        (status = 200, description = "The restaurant with its pairings", body = RestaurantDetail),
        (status = 404, description = "No such restaurant", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let conn = &mut state.config.connect()?;

    let restaurant = store::find_restaurant(conn, id)?.ok_or(ApiError::RestaurantNotFound)?;
    let pairings = store::pairings_for_restaurant(conn, &restaurant)?;
    let pizza_ids = pairings.iter().map(|pairing| pairing.pizza_id).collect();

    Ok(Json(RestaurantDetail::new(restaurant, pizza_ids, pairings)))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id"),
    ),
    responses(
        (status = 204, description = "Restaurant and its pairings deleted"),
        (status = 404, description = "No such restaurant", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let conn = &mut state.config.connect()?;

    let restaurant = store::find_restaurant(conn, id)?.ok_or(ApiError::RestaurantNotFound)?;
    store::delete_restaurant(conn, restaurant.id)?;

    Ok(StatusCode::NO_CONTENT)
}
