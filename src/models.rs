use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const PRICE_MIN: i32 = 1;
pub const PRICE_MAX: i32 = 30;

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Debug, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("Price must be between 1 and 30")]
pub struct PriceOutOfRange;

/// Every write that sets a pairing price goes through this check first, so an
/// out-of-range price is rejected before anything is persisted.
pub fn validate_price(price: i32) -> Result<i32, PriceOutOfRange> {
    if (PRICE_MIN..=PRICE_MAX).contains(&price) {
        Ok(price)
    } else {
        Err(PriceOutOfRange)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantSummary {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Street address of the restaurant
    pub address: String,
    /// Ids of the pizzas offered here, one entry per pairing
    pub pizzas: Vec<i32>,
}

impl RestaurantSummary {
    pub fn new(restaurant: Restaurant, pizza_ids: Vec<i32>) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            pizzas: pizza_ids,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetail {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Street address of the restaurant
    pub address: String,
    /// Ids of the pizzas offered here, one entry per pairing
    pub pizzas: Vec<i32>,
    /// The pairing records themselves
    pub restaurant_pizzas: Vec<RestaurantPizzaResponse>,
}

impl RestaurantDetail {
    pub fn new(restaurant: Restaurant, pizza_ids: Vec<i32>, pairings: Vec<RestaurantPizza>) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            pizzas: pizza_ids,
            restaurant_pizzas: pairings.into_iter().map(RestaurantPizzaResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PizzaResponse {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Free-form ingredient description
    pub ingredients: String,
    /// Summaries of every restaurant offering this pizza
    pub restaurants: Vec<RestaurantSummary>,
}

impl PizzaResponse {
    pub fn new(pizza: Pizza, restaurants: Vec<RestaurantSummary>) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name,
            ingredients: pizza.ingredients,
            restaurants,
        }
    }
}

// Pairings carry only the two foreign keys, never the rows they point at.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaResponse {
    /// Unique identifier for the pairing
    pub id: i32,
    /// Price of the pizza at this restaurant
    pub price: i32,
    /// Id of the restaurant side of the pairing
    pub restaurant_id: i32,
    /// Id of the pizza side of the pairing
    pub pizza_id: i32,
}

impl From<RestaurantPizza> for RestaurantPizzaResponse {
    fn from(pairing: RestaurantPizza) -> Self {
        Self {
            id: pairing.id,
            price: pairing.price,
            restaurant_id: pairing.restaurant_id,
            pizza_id: pairing.pizza_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Id of the pizza to offer
    pub pizza_id: Option<i32>,
    /// Id of the restaurant offering it
    pub restaurant_id: Option<i32>,
    /// Price in whole currency units, 1 through 30
    pub price: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRestaurantPizzaResponse {
    /// Unique identifier for the pairing
    pub id: i32,
    /// Price of the pizza at this restaurant
    pub price: i32,
    /// Id of the pizza side of the pairing
    pub pizza_id: i32,
    /// Id of the restaurant side of the pairing
    pub restaurant_id: i32,
    /// The referenced pizza
    pub pizza: PizzaInfo,
    /// The referenced restaurant
    pub restaurant: RestaurantInfo,
}

impl CreateRestaurantPizzaResponse {
    pub fn new(pairing: RestaurantPizza, pizza: Pizza, restaurant: Restaurant) -> Self {
        Self {
            id: pairing.id,
            price: pairing.price,
            pizza_id: pairing.pizza_id,
            restaurant_id: pairing.restaurant_id,
            pizza: PizzaInfo::from(pizza),
            restaurant: RestaurantInfo::from(restaurant),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PizzaInfo {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Free-form ingredient description
    pub ingredients: String,
}

impl From<Pizza> for PizzaInfo {
    fn from(pizza: Pizza) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name,
            ingredients: pizza.ingredients,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantInfo {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Street address of the restaurant
    pub address: String,
}

impl From<Restaurant> for RestaurantInfo {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Validation error messages
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price_accepts_range_bounds() {
        assert_eq!(validate_price(1), Ok(1));
        assert_eq!(validate_price(15), Ok(15));
        assert_eq!(validate_price(30), Ok(30));
    }

    #[test]
    fn test_validate_price_rejects_out_of_range() {
        assert_eq!(validate_price(0), Err(PriceOutOfRange));
        assert_eq!(validate_price(31), Err(PriceOutOfRange));
        assert_eq!(validate_price(-3), Err(PriceOutOfRange));
    }

    #[test]
    fn test_price_error_message() {
        assert_eq!(
            PriceOutOfRange.to_string(),
            "Price must be between 1 and 30"
        );
    }
}
