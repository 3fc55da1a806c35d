pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

// Re-export routers for easier importing
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
}

pub fn app(config: AppConfig) -> Router {
    let state = AppState { config };

    Router::new()
        .route("/", get(index))
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", content_type = "text/html", body = String),
    ),
    tag = "root"
)]
pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

#[derive(OpenApi)]
#[openapi(
    paths(
        index,
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::models::RestaurantSummary,
            crate::models::RestaurantDetail,
            crate::models::RestaurantPizzaResponse,
            crate::models::PizzaResponse,
            crate::models::CreateRestaurantPizzaRequest,
            crate::models::CreateRestaurantPizzaResponse,
            crate::models::PizzaInfo,
            crate::models::RestaurantInfo,
            crate::models::ApiErrorResponse,
            crate::models::ValidationErrorResponse
        )
    ),
    tags(
        (name = "root", description = "Landing page"),
        (name = "restaurants", description = "Restaurant listing and removal"),
        (name = "pizzas", description = "Pizza listing"),
        (name = "restaurant_pizzas", description = "Priced pizza-restaurant pairings")
    ),
    info(
        title = "Pizzeria API",
        description = "CRUD backend for restaurants, pizzas, and their priced pairings",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
