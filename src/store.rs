use diesel::prelude::*;

use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub fn list_restaurants(conn: &mut SqliteConnection) -> QueryResult<Vec<Restaurant>> {
    restaurants::table
        .select(Restaurant::as_select())
        .load(conn)
}

pub fn find_restaurant(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Restaurant>> {
    restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> QueryResult<Vec<Pizza>> {
    pizzas::table.select(Pizza::as_select()).load(conn)
}

pub fn find_pizza(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Pizza>> {
    pizzas::table
        .find(id)
        .select(Pizza::as_select())
        .first(conn)
        .optional()
}

pub fn pairings_for_restaurant(
    conn: &mut SqliteConnection,
    restaurant: &Restaurant,
) -> QueryResult<Vec<RestaurantPizza>> {
    RestaurantPizza::belonging_to(restaurant)
        .select(RestaurantPizza::as_select())
        .load(conn)
}

/// Loads the pairings of every given restaurant in one query, grouped in the
/// same order as the input slice.
pub fn pairings_per_restaurant(
    conn: &mut SqliteConnection,
    restaurants: &[Restaurant],
) -> QueryResult<Vec<Vec<RestaurantPizza>>> {
    let pairings = RestaurantPizza::belonging_to(restaurants)
        .select(RestaurantPizza::as_select())
        .load(conn)?;
    Ok(pairings.grouped_by(restaurants))
}

pub fn pizza_ids_for_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> QueryResult<Vec<i32>> {
    restaurant_pizzas::table
        .filter(restaurant_pizzas::restaurant_id.eq(restaurant_id))
        .select(restaurant_pizzas::pizza_id)
        .load(conn)
}

pub fn restaurants_for_pizza(
    conn: &mut SqliteConnection,
    pizza_id: i32,
) -> QueryResult<Vec<Restaurant>> {
    restaurant_pizzas::table
        .inner_join(restaurants::table)
        .filter(restaurant_pizzas::pizza_id.eq(pizza_id))
        .select(Restaurant::as_select())
        .load(conn)
}

pub fn create_pairing(
    conn: &mut SqliteConnection,
    pairing: &NewRestaurantPizza,
) -> QueryResult<RestaurantPizza> {
    diesel::insert_into(restaurant_pizzas::table)
        .values(pairing)
        .returning(RestaurantPizza::as_returning())
        .get_result(conn)
}

// Pairings go first so no row ever dangles, even with foreign key
// enforcement switched off on the connection.
pub fn delete_restaurant(conn: &mut SqliteConnection, id: i32) -> QueryResult<()> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(id)))
            .execute(conn)?;
        diesel::delete(restaurants::table.find(id)).execute(conn)?;
        Ok(())
    })
}

pub fn delete_pizza(conn: &mut SqliteConnection, id: i32) -> QueryResult<()> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(restaurant_pizzas::table.filter(restaurant_pizzas::pizza_id.eq(id)))
            .execute(conn)?;
        diesel::delete(pizzas::table.find(id)).execute(conn)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use diesel_migrations::MigrationHarness;
    use tempfile::TempDir;

    use super::*;
    use crate::{AppConfig, MIGRATIONS};

    fn setup() -> (TempDir, SqliteConnection) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_url: dir.path().join("test.db").display().to_string(),
        };
        let mut conn = config.connect().unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();
        (dir, conn)
    }

    fn seed_restaurant(conn: &mut SqliteConnection, id: i32, name: &str) -> Restaurant {
        let restaurant = Restaurant {
            id,
            name: name.to_string(),
            address: format!("{id} Main Street"),
        };
        diesel::insert_into(restaurants::table)
            .values(&restaurant)
            .execute(conn)
            .unwrap();
        restaurant
    }

    fn seed_pizza(conn: &mut SqliteConnection, id: i32, name: &str) -> Pizza {
        let pizza = Pizza {
            id,
            name: name.to_string(),
            ingredients: "Dough, Tomato Sauce, Cheese".to_string(),
        };
        diesel::insert_into(pizzas::table)
            .values(&pizza)
            .execute(conn)
            .unwrap();
        pizza
    }

    fn seed_pairing(conn: &mut SqliteConnection, price: i32, restaurant_id: i32, pizza_id: i32) {
        create_pairing(
            conn,
            &NewRestaurantPizza {
                price,
                restaurant_id,
                pizza_id,
            },
        )
        .unwrap();
    }

    fn pairing_count(conn: &mut SqliteConnection) -> i64 {
        restaurant_pizzas::table.count().get_result(conn).unwrap()
    }

    #[test]
    fn test_find_restaurant_missing_is_none() {
        let (_dir, mut conn) = setup();

        assert_eq!(find_restaurant(&mut conn, 42).unwrap(), None);
    }

    #[test]
    fn test_create_pairing_assigns_id() {
        let (_dir, mut conn) = setup();
        seed_restaurant(&mut conn, 1, "Karen's Pizza Shack");
        seed_pizza(&mut conn, 1, "Emma");

        let created = create_pairing(
            &mut conn,
            &NewRestaurantPizza {
                price: 5,
                restaurant_id: 1,
                pizza_id: 1,
            },
        )
        .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.price, 5);
        assert_eq!(created.restaurant_id, 1);
        assert_eq!(created.pizza_id, 1);
        assert_eq!(pairing_count(&mut conn), 1);
    }

    #[test]
    fn test_price_check_constraint_guards_direct_writes() {
        let (_dir, mut conn) = setup();
        seed_restaurant(&mut conn, 1, "Karen's Pizza Shack");
        seed_pizza(&mut conn, 1, "Emma");

        let result = create_pairing(
            &mut conn,
            &NewRestaurantPizza {
                price: 0,
                restaurant_id: 1,
                pizza_id: 1,
            },
        );

        assert!(matches!(
            result,
            Err(diesel::result::Error::DatabaseError(..))
        ));
        assert_eq!(pairing_count(&mut conn), 0);
    }

    #[test]
    fn test_pairings_per_restaurant_groups_in_input_order() {
        let (_dir, mut conn) = setup();
        let sanjays = seed_restaurant(&mut conn, 1, "Sanjay's Pizza");
        let kiki = seed_restaurant(&mut conn, 2, "Kiki's Pizza");
        seed_pizza(&mut conn, 1, "Emma");
        seed_pizza(&mut conn, 2, "Geri");
        seed_pairing(&mut conn, 10, 2, 1);
        seed_pairing(&mut conn, 12, 2, 2);

        let grouped = pairings_per_restaurant(&mut conn, &[sanjays, kiki]).unwrap();

        assert_eq!(grouped.len(), 2);
        assert!(grouped[0].is_empty());
        let mut pizza_ids: Vec<i32> = grouped[1].iter().map(|p| p.pizza_id).collect();
        pizza_ids.sort();
        assert_eq!(pizza_ids, vec![1, 2]);
    }

    #[test]
    fn test_restaurants_for_pizza_follows_pairings() {
        let (_dir, mut conn) = setup();
        seed_restaurant(&mut conn, 1, "Sanjay's Pizza");
        seed_restaurant(&mut conn, 2, "Kiki's Pizza");
        seed_pizza(&mut conn, 1, "Emma");
        seed_pairing(&mut conn, 10, 1, 1);
        seed_pairing(&mut conn, 12, 2, 1);

        let mut ids: Vec<i32> = restaurants_for_pizza(&mut conn, 1)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        ids.sort();

        assert_eq!(ids, vec![1, 2]);
        assert!(restaurants_for_pizza(&mut conn, 99).unwrap().is_empty());
    }

    #[test]
    fn test_delete_restaurant_removes_only_its_pairings() {
        let (_dir, mut conn) = setup();
        seed_restaurant(&mut conn, 1, "Sanjay's Pizza");
        seed_restaurant(&mut conn, 2, "Kiki's Pizza");
        seed_pizza(&mut conn, 1, "Emma");
        seed_pizza(&mut conn, 2, "Geri");
        seed_pairing(&mut conn, 10, 1, 1);
        seed_pairing(&mut conn, 12, 1, 2);
        seed_pairing(&mut conn, 14, 2, 1);

        delete_restaurant(&mut conn, 1).unwrap();

        assert_eq!(find_restaurant(&mut conn, 1).unwrap(), None);
        assert_eq!(pairing_count(&mut conn), 1);
        assert_eq!(
            pizza_ids_for_restaurant(&mut conn, 2).unwrap(),
            vec![1],
        );
        // The pizzas themselves survive the cascade.
        assert!(find_pizza(&mut conn, 1).unwrap().is_some());
        assert!(find_pizza(&mut conn, 2).unwrap().is_some());
    }

    #[test]
    fn test_delete_pizza_removes_only_its_pairings() {
        let (_dir, mut conn) = setup();
        seed_restaurant(&mut conn, 1, "Sanjay's Pizza");
        seed_pizza(&mut conn, 1, "Emma");
        seed_pizza(&mut conn, 2, "Geri");
        seed_pairing(&mut conn, 10, 1, 1);
        seed_pairing(&mut conn, 12, 1, 2);

        delete_pizza(&mut conn, 1).unwrap();

        assert_eq!(find_pizza(&mut conn, 1).unwrap(), None);
        assert_eq!(pairing_count(&mut conn), 1);
        assert_eq!(pizza_ids_for_restaurant(&mut conn, 1).unwrap(), vec![2]);
        assert!(find_restaurant(&mut conn, 1).unwrap().is_some());
    }
}
