use anyhow::Context;
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use uuid::Uuid;

use crate::{domain::CategoryLabel, models::Restaurant, schema::restaurants, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

#[tracing::instrument(
    "Getting restaurants from db",
    skip_all
)]
pub async fn list_restaurants(
    mut conn: DbConnection
) -> Result<Vec<Restaurant>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        restaurants::table
            .order(restaurants::title.asc())
            .select(Restaurant::as_select())
            .load::<Restaurant>(&mut conn)
            .context("Failed to load restaurants")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting restaurant by id",
    skip(conn)
)]
pub async fn get_restaurant(
    mut conn: DbConnection,
    restaurant_id: Uuid
) -> Result<Option<Restaurant>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        find_restaurant(&mut conn, restaurant_id)
            .context("Failed to query restaurant by id")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting restaurant by owner",
    skip(conn)
)]
pub async fn get_restaurant_by_owner(
    mut conn: DbConnection,
    owner_id: Uuid
) -> Result<Option<Restaurant>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        restaurants::table
            .filter(restaurants::owner_id.eq(owner_id))
            .select(Restaurant::as_select())
            .first::<Restaurant>(&mut conn)
            .optional()
            .context("Failed to query restaurant by owner")
    })
    .await
    .context("Failed due to threadpool error")?
}

pub fn find_restaurant(
    conn: &mut PgConnection,
    restaurant_id: Uuid
) -> QueryResult<Option<Restaurant>> {
    restaurants::table
        .find(restaurant_id)
        .select(Restaurant::as_select())
        .first::<Restaurant>(conn)
        .optional()
}

// Adds a label to the restaurant's menu unless it is already there.
// The row stays locked until the surrounding transaction ends
#[tracing::instrument(
    "Adding category to restaurant menu",
    skip(conn)
)]
pub fn add_to_menu(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    label: &CategoryLabel
) -> QueryResult<()> {
    let mut menu = restaurants::table
        .find(restaurant_id)
        .select(restaurants::menu)
        .for_update()
        .get_result::<Vec<String>>(conn)?;

    if label.insert_into(&mut menu) {
        diesel::update(restaurants::table.find(restaurant_id))
            .set(restaurants::menu.eq(menu))
            .execute(conn)?;
    }

    Ok(())
}
