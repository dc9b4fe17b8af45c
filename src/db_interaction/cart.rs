use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{upsert::excluded, Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{models::CartLine, schema::{cart_lines, food_items}, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

use super::find_restaurant;

// Snapshot of a catalog item as the customer saw it when adding it
#[derive(Debug, Clone)]
pub struct NewCartLine{
    pub user_id: Uuid,
    pub food_item_id: Uuid,
    pub food_item_name: String,
    pub restaurant_id: Uuid,
    pub food_item_img: String,
    pub price: f64,
    pub discount: f64,
    pub quantity: i32
}

// Upper bound of a cart line's quantity, merged adds included. The
// cart_lines CHECK constraint holds the same bound
pub const MAX_CART_QUANTITY: i32 = 100;

// Errors associated with writing cart lines
#[derive(Error)]
pub enum CartWriteError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[source] diesel::result::Error),
    #[error("Quantity of a cart item must be between 1 and {}", MAX_CART_QUANTITY)]
    QuantityLimitError(#[source] diesel::result::Error),
    #[error("restaurant_id: {0} doesn't exist")]
    NoRestaurantError(Uuid),
    #[error("food_item_id: {0} doesn't exist in restaurant_id: {1}")]
    NoFoodItemError(Uuid, Uuid),
    #[error("cart_line_id: {0} doesn't exist")]
    NoCartLineError(Uuid)
}

impl From<diesel::result::Error> for CartWriteError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::CheckViolation,
                _
            ) => CartWriteError::QuantityLimitError(e),
            _ => CartWriteError::RunQueryError(e)
        }
    }
}

impl Debug for CartWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Inserts a cart line, snapshotting the restaurant name. Adding an item the
// user already has in the cart adds to that line's quantity instead; a sum
// above MAX_CART_QUANTITY fails and leaves the line unchanged
#[tracing::instrument(
    "Adding line to cart",
    skip(conn)
)]
pub async fn add_cart_line(
    mut conn: DbConnection,
    line: NewCartLine
) -> Result<CartLine, CartWriteError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<CartLine, CartWriteError, _>(|conn| {
            let restaurant = find_restaurant(conn, line.restaurant_id)?
                .ok_or(CartWriteError::NoRestaurantError(line.restaurant_id))?;

            let item_in_restaurant = food_items::table
                .find(line.food_item_id)
                .filter(food_items::restaurant_id.eq(line.restaurant_id))
                .select(food_items::food_item_id)
                .first::<Uuid>(conn)
                .optional()?;

            if item_in_restaurant.is_none() {
                return Err(CartWriteError::NoFoodItemError(line.food_item_id, line.restaurant_id))
            }

            let row = CartLine{
                cart_line_id: Uuid::new_v4(),
                user_id: line.user_id,
                food_item_id: line.food_item_id,
                food_item_name: line.food_item_name,
                restaurant_id: line.restaurant_id,
                restaurant_name: restaurant.title,
                food_item_img: line.food_item_img,
                price: line.price,
                discount: line.discount,
                quantity: line.quantity
            };

            let saved = diesel::insert_into(cart_lines::table)
                .values(&row)
                .on_conflict((cart_lines::user_id, cart_lines::food_item_id))
                .do_update()
                .set(cart_lines::quantity.eq(cart_lines::quantity + excluded(cart_lines::quantity)))
                .returning(CartLine::as_returning())
                .get_result(conn)?;

            Ok(saved)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Getting cart lines of user",
    skip(conn)
)]
pub async fn list_cart_lines_for_user(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<Vec<CartLine>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        cart_lines::table
            .filter(cart_lines::user_id.eq(user_id))
            .order(cart_lines::food_item_name.asc())
            .select(CartLine::as_select())
            .load::<CartLine>(&mut conn)
            .context("Failed to load cart lines of user")
    })
    .await
    .context("Failed due to threadpool error")?
}

// Unfiltered scan over every user's cart, for administrative views
#[tracing::instrument(
    "Getting all cart lines",
    skip_all
)]
pub async fn list_all_cart_lines(
    mut conn: DbConnection
) -> Result<Vec<CartLine>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        cart_lines::table
            .order((cart_lines::user_id.asc(), cart_lines::food_item_name.asc()))
            .select(CartLine::as_select())
            .load::<CartLine>(&mut conn)
            .context("Failed to load cart lines")
    })
    .await
    .context("Failed due to threadpool error")?
}

// Deletes the user's line if present. Returns whether a row was removed
#[tracing::instrument(
    "Removing cart line",
    skip(conn)
)]
pub async fn remove_cart_line(
    mut conn: DbConnection,
    user_id: Uuid,
    cart_line_id: Uuid
) -> Result<bool, CartWriteError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::delete(
            cart_lines::table
                .filter(cart_lines::cart_line_id.eq(cart_line_id))
                .filter(cart_lines::user_id.eq(user_id))
        )
        .execute(&mut conn)
    })
    .await??;

    Ok(affected_rows > 0)
}

#[tracing::instrument(
    "Updating cart line quantity",
    skip(conn)
)]
pub async fn update_cart_quantity(
    mut conn: DbConnection,
    user_id: Uuid,
    cart_line_id: Uuid,
    quantity: i32
) -> Result<(), CartWriteError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::update(
            cart_lines::table
                .filter(cart_lines::cart_line_id.eq(cart_line_id))
                .filter(cart_lines::user_id.eq(user_id))
        )
        .set(cart_lines::quantity.eq(quantity))
        .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(CartWriteError::NoCartLineError(cart_line_id))
    }

    Ok(())
}
