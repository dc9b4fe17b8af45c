use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{Connection, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use thiserror::Error;
use uuid::Uuid;

use crate::{domain::CategoryLabel, models::{FoodItem, FoodItemChanges}, schema::food_items, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

use super::{add_category, add_to_menu, find_restaurant, is_approved};

// Menu category picked for a product: one already on the menu, or a label
// that grows both the restaurant menu and the global category list
#[derive(Debug, Clone)]
pub enum MenuCategory{
    Existing(String),
    New(CategoryLabel)
}

impl MenuCategory {
    pub fn label(&self) -> &str {
        match self {
            MenuCategory::Existing(label) => label,
            MenuCategory::New(label) => label.as_str()
        }
    }
}

// Fields shared by product creation and product updates
#[derive(Debug, Clone)]
pub struct ProductDetails{
    pub title: String,
    pub description: String,
    pub item_img: String,
    pub category: String,
    pub price: f64,
    pub discount: f64
}

impl ProductDetails {
    fn into_changes(self, menu_category: &MenuCategory) -> FoodItemChanges {
        FoodItemChanges{
            title: self.title,
            description: self.description,
            item_img: self.item_img,
            category: self.category,
            menu_category: menu_category.label().to_string(),
            price: self.price,
            discount: self.discount
        }
    }
}

// Errors associated with writing food items
#[derive(Error)]
pub enum FoodItemWriteError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("restaurant_id: {0} doesn't exist")]
    NoRestaurantError(Uuid),
    #[error("food_item_id: {0} doesn't exist")]
    NoFoodItemError(Uuid),
    #[error("restaurant_id: {0} belongs to another owner")]
    NotOwnerError(Uuid),
    #[error("owner_id: {0} is not an approved restaurant")]
    NotApprovedError(Uuid)
}

impl Debug for FoodItemWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Getting food items from db",
    skip_all
)]
pub async fn list_food_items(
    mut conn: DbConnection
) -> Result<Vec<FoodItem>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        food_items::table
            .order(food_items::title.asc())
            .select(FoodItem::as_select())
            .load::<FoodItem>(&mut conn)
            .context("Failed to load food items")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting food item by id",
    skip(conn)
)]
pub async fn get_food_item(
    mut conn: DbConnection,
    food_item_id: Uuid
) -> Result<Option<FoodItem>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        food_items::table
            .find(food_item_id)
            .select(FoodItem::as_select())
            .first::<FoodItem>(&mut conn)
            .optional()
            .context("Failed to query food item by id")
    })
    .await
    .context("Failed due to threadpool error")?
}

// Checks that owner_id is still approved and owns the restaurant, then
// applies category growth for new labels
fn prepare_menu_category(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    owner_id: Uuid,
    menu_category: &MenuCategory
) -> Result<(), FoodItemWriteError> {
    if !is_approved(conn, owner_id)? {
        return Err(FoodItemWriteError::NotApprovedError(owner_id))
    }

    let restaurant = find_restaurant(conn, restaurant_id)?
        .ok_or(FoodItemWriteError::NoRestaurantError(restaurant_id))?;

    if restaurant.owner_id != owner_id {
        return Err(FoodItemWriteError::NotOwnerError(restaurant_id))
    }

    if let MenuCategory::New(label) = menu_category {
        add_category(conn, label)?;
        add_to_menu(conn, restaurant_id, label)?;
    }

    Ok(())
}

#[tracing::instrument(
    "Inserting food item into db",
    skip(conn, details)
)]
pub async fn add_food_item(
    mut conn: DbConnection,
    owner_id: Uuid,
    restaurant_id: Uuid,
    details: ProductDetails,
    menu_category: MenuCategory
) -> Result<FoodItem, FoodItemWriteError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<FoodItem, FoodItemWriteError, _>(|conn| {
            prepare_menu_category(conn, restaurant_id, owner_id, &menu_category)?;

            let changes = details.into_changes(&menu_category);
            let item = FoodItem{
                food_item_id: Uuid::new_v4(),
                restaurant_id,
                title: changes.title,
                description: changes.description,
                item_img: changes.item_img,
                category: changes.category,
                menu_category: changes.menu_category,
                price: changes.price,
                discount: changes.discount,
                rating: 0.0
            };

            let item = diesel::insert_into(food_items::table)
                .values(&item)
                .returning(FoodItem::as_returning())
                .get_result(conn)?;

            Ok(item)
        })
    })
    .await??;

    Ok(res)
}

// Overwrites the mutable fields of an item. The item stays with its
// restaurant; rating is left untouched
#[tracing::instrument(
    "Updating food item in db",
    skip(conn, details)
)]
pub async fn update_food_item(
    mut conn: DbConnection,
    owner_id: Uuid,
    food_item_id: Uuid,
    details: ProductDetails,
    menu_category: MenuCategory
) -> Result<FoodItem, FoodItemWriteError> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<FoodItem, FoodItemWriteError, _>(|conn| {
            let restaurant_id = food_item_restaurant(conn, food_item_id)?
                .ok_or(FoodItemWriteError::NoFoodItemError(food_item_id))?;

            prepare_menu_category(conn, restaurant_id, owner_id, &menu_category)?;

            let item = diesel::update(food_items::table.find(food_item_id))
                .set(details.into_changes(&menu_category))
                .returning(FoodItem::as_returning())
                .get_result(conn)?;

            Ok(item)
        })
    })
    .await??;

    Ok(res)
}

fn food_item_restaurant(
    conn: &mut PgConnection,
    food_item_id: Uuid
) -> QueryResult<Option<Uuid>> {
    food_items::table
        .find(food_item_id)
        .select(food_items::restaurant_id)
        .for_update()
        .get_result::<Uuid>(conn)
        .optional()
}
