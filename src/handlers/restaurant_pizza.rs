use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::{
    self, ApiErrorResponse, CreateRestaurantPizzaRequest, CreateRestaurantPizzaResponse,
    NewRestaurantPizza, ValidationErrorResponse,
};
use crate::store;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Pairing created", body = CreateRestaurantPizzaResponse),
        (status = 400, description = "Missing data, or price outside 1..=30", body = ValidationErrorResponse),
        (status = 404, description = "Referenced pizza or restaurant does not exist", body = ApiErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    Json(payload): Json<CreateRestaurantPizzaRequest>,
) -> Result<(StatusCode, Json<CreateRestaurantPizzaResponse>), ApiError> {
    // Ids count as missing when absent, null, or zero; price only when absent
    // or null, since zero falls to the range check anyway.
    let pizza_id = payload.pizza_id.unwrap_or(0);
    let restaurant_id = payload.restaurant_id.unwrap_or(0);
    let price = payload.price.ok_or(ApiError::MissingData)?;
    if pizza_id == 0 || restaurant_id == 0 {
        return Err(ApiError::MissingData);
    }

    // Range check comes before the existence lookups, so a bad price wins
    // over a dangling id.
    let price = models::validate_price(price)?;

    let conn = &mut state.config.connect()?;

    let pizza = store::find_pizza(conn, pizza_id)?;
    let restaurant = store::find_restaurant(conn, restaurant_id)?;
    let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
        return Err(ApiError::PizzaOrRestaurantNotFound);
    };

    let pairing = store::create_pairing(
        conn,
        &NewRestaurantPizza {
            price,
            restaurant_id,
            pizza_id,
        },
    )?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRestaurantPizzaResponse::new(pairing, pizza, restaurant)),
    ))
}
