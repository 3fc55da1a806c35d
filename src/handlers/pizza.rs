use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::{PizzaResponse, RestaurantSummary};
use crate::store;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas with the restaurants offering them", body = [PizzaResponse]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaResponse>>, ApiError> {
    let conn = &mut state.config.connect()?;

    let pizzas = store::list_pizzas(conn)?;

    let mut responses = Vec::with_capacity(pizzas.len());
    for pizza in pizzas {
        let restaurants = store::restaurants_for_pizza(conn, pizza.id)?;
        let mut summaries = Vec::with_capacity(restaurants.len());
        for restaurant in restaurants {
            let pizza_ids = store::pizza_ids_for_restaurant(conn, restaurant.id)?;
            summaries.push(RestaurantSummary::new(restaurant, pizza_ids));
        }
        responses.push(PizzaResponse::new(pizza, summaries));
    }

    Ok(Json(responses))
}
