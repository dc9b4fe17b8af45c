use std::{error::Error, fmt::Debug};

use anyhow::Context;
use chrono::{DateTime, Utc};
use diesel::{Connection, ExpressionMethods, PgConnection, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{auth::jwt::Claims, domain::{OrderStatus, UserType}, models::{CartLine, Order}, schema::{cart_lines, orders, restaurants}, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

use super::is_approved;

// Delivery and payment details copied onto every order of a checkout
#[derive(Debug, Clone)]
pub struct ContactDetails{
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub pincode: String,
    pub payment_method: String,
    pub order_date: DateTime<Utc>
}

// Which orders a caller can see and change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderScope{
    All,
    Customer(Uuid),
    RestaurantOwner(Uuid)
}

impl From<&Claims> for OrderScope {
    fn from(claims: &Claims) -> Self {
        match claims.role {
            UserType::Admin => OrderScope::All,
            UserType::Restaurant => OrderScope::RestaurantOwner(claims.sub),
            UserType::Customer => OrderScope::Customer(claims.sub)
        }
    }
}

// Order row for one cart line. The order reuses the cart line id, so
// converting the same line twice can't produce a second order
pub fn order_from_cart_line(line: CartLine, contact: &ContactDetails) -> Order {
    Order{
        order_id: line.cart_line_id,
        user_id: line.user_id,
        name: contact.name.clone(),
        email: contact.email.clone(),
        mobile: contact.mobile.clone(),
        address: contact.address.clone(),
        pincode: contact.pincode.clone(),
        payment_method: contact.payment_method.clone(),
        order_date: contact.order_date,
        restaurant_id: line.restaurant_id,
        restaurant_name: line.restaurant_name,
        food_item_id: line.food_item_id,
        food_item_name: line.food_item_name,
        food_item_img: line.food_item_img,
        quantity: line.quantity,
        price: line.price,
        discount: line.discount,
        order_status: OrderStatus::Placed.as_str().to_string()
    }
}

// Error associated with converting a cart into orders
#[derive(Error)]
pub enum PlaceOrderError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for PlaceOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Moves every cart line of the user into an order, all in one transaction.
// The delete takes row locks, so a concurrent checkout for the same user
// finds nothing left to convert
#[tracing::instrument(
    "Converting cart into orders",
    skip(conn, contact)
)]
pub async fn place_order(
    mut conn: DbConnection,
    user_id: Uuid,
    contact: ContactDetails
) -> Result<Vec<Order>, PlaceOrderError> {

    let placed = spawn_blocking_with_tracing(move || {
        conn.transaction::<Vec<Order>, PlaceOrderError, _>(|conn|{
            let lines = diesel::delete(cart_lines::table.filter(cart_lines::user_id.eq(user_id)))
                .returning(CartLine::as_returning())
                .get_results::<CartLine>(conn)?;

            if lines.is_empty() {
                return Ok(Vec::new())
            }

            let new_orders: Vec<Order> = lines.into_iter()
                .map(|line| order_from_cart_line(line, &contact))
                .collect();

            diesel::insert_into(orders::table)
                .values(&new_orders)
                .on_conflict(orders::order_id)
                .do_nothing()
                .execute(conn)?;

            Ok(new_orders)
        })
    })
    .await??;

    tracing::info!(orders = placed.len(), "Cart converted into orders");

    Ok(placed)
}

// Full scan for admins; restaurant owners get their restaurant's orders and
// customers their own
#[tracing::instrument(
    "Getting orders",
    skip(conn)
)]
pub async fn list_orders(
    mut conn: DbConnection,
    scope: OrderScope
) -> Result<Vec<Order>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        let query = orders::table
            .order((orders::order_date.desc(), orders::food_item_name.asc()))
            .select(Order::as_select())
            .into_boxed();

        let query = match scope {
            OrderScope::All => query,
            OrderScope::Customer(user_id) => query.filter(orders::user_id.eq(user_id)),
            OrderScope::RestaurantOwner(owner_id) => query.filter(
                orders::restaurant_id.eq_any(
                    restaurants::table
                        .filter(restaurants::owner_id.eq(owner_id))
                        .select(restaurants::restaurant_id)
                )
            )
        };

        query.load::<Order>(&mut conn)
            .context("Failed to load orders")
    })
    .await
    .context("Failed due to threadpool error")?
}

// Error associated with updating order status
#[derive(Error)]
pub enum UpdateOrderStatusError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("order_id: {0} doesn't exist")]
    NoOrderIdError(Uuid),
    #[error("owner_id: {0} is not an approved restaurant")]
    NotApprovedError(Uuid)
}

impl Debug for UpdateOrderStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

fn write_status(
    conn: &mut PgConnection,
    order_id: Uuid,
    status: OrderStatus,
    scope: OrderScope
) -> QueryResult<usize> {
    let target = orders::table.filter(orders::order_id.eq(order_id));
    let status = orders::order_status.eq(status.as_str());

    match scope {
        OrderScope::All => diesel::update(target).set(status).execute(conn),
        OrderScope::Customer(user_id) => diesel::update(target.filter(orders::user_id.eq(user_id)))
            .set(status)
            .execute(conn),
        OrderScope::RestaurantOwner(owner_id) => diesel::update(
                target.filter(orders::restaurant_id.eq_any(
                    restaurants::table
                        .filter(restaurants::owner_id.eq(owner_id))
                        .select(restaurants::restaurant_id)
                ))
            )
            .set(status)
            .execute(conn)
    }
}

// Unconditional overwrite: the previous status is not consulted, so a
// cancelled order can still be marked delivered and vice versa. Orders
// outside the caller's scope are reported as missing. Restaurant owners
// must still be approved when the write happens
#[tracing::instrument(
    "Updating order status",
    skip(conn)
)]
pub async fn update_order_status(
    mut conn: DbConnection,
    order_id: Uuid,
    status: OrderStatus,
    scope: OrderScope
) -> Result<(), UpdateOrderStatusError> {

    let affected_rows = spawn_blocking_with_tracing(move || {
        conn.transaction::<usize, UpdateOrderStatusError, _>(|conn| {
            if let OrderScope::RestaurantOwner(owner_id) = scope {
                if !is_approved(conn, owner_id)? {
                    return Err(UpdateOrderStatusError::NotApprovedError(owner_id))
                }
            }

            Ok(write_status(conn, order_id, status, scope)?)
        })
    })
    .await??;

    if affected_rows == 0 {
        return Err(UpdateOrderStatusError::NoOrderIdError(order_id))
    }

    Ok(())
}
