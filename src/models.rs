use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Approval, UserType};
use crate::schema::{admin_config, cart_lines, food_items, orders, restaurants, users};

#[derive(Queryable, Selectable, Insertable, Clone, Debug)]
#[diesel(table_name = users)]
pub struct User{
    pub user_id : Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub usertype: String,
    pub approval: String
}

// Public view of a user; the password hash never leaves the service
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord{
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub usertype: UserType,
    pub approval: Approval
}

impl TryFrom<User> for UserRecord {
    type Error = anyhow::Error;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(UserRecord{
            id: user.user_id,
            username: user.username,
            email: user.email,
            usertype: UserType::parse(&user.usertype).map_err(anyhow::Error::msg)?,
            approval: Approval::parse(&user.approval).map_err(anyhow::Error::msg)?
        })
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant{
    #[serde(rename = "id")]
    pub restaurant_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub address: String,
    pub main_img: String,
    pub menu: Vec<String>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = food_items)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem{
    #[serde(rename = "id")]
    pub food_item_id: Uuid,
    pub restaurant_id: Uuid,
    pub title: String,
    pub description: String,
    pub item_img: String,
    pub category: String,
    pub menu_category: String,
    pub price: f64,
    pub discount: f64,
    pub rating: f64
}

// Mutable part of a food item, written in place by product updates
#[derive(AsChangeset, Debug)]
#[diesel(table_name = food_items)]
pub struct FoodItemChanges{
    pub title: String,
    pub description: String,
    pub item_img: String,
    pub category: String,
    pub menu_category: String,
    pub price: f64,
    pub discount: f64
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = cart_lines)]
#[serde(rename_all = "camelCase")]
pub struct CartLine{
    #[serde(rename = "id")]
    pub cart_line_id: Uuid,
    pub user_id: Uuid,
    pub food_item_id: Uuid,
    pub food_item_name: String,
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub food_item_img: String,
    pub price: f64,
    pub discount: f64,
    pub quantity: i32
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = orders)]
#[serde(rename_all = "camelCase")]
pub struct Order{
    #[serde(rename = "id")]
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub pincode: String,
    pub payment_method: String,
    pub order_date: DateTime<Utc>,
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub food_item_id: Uuid,
    pub food_item_name: String,
    pub food_item_img: String,
    pub quantity: i32,
    pub price: f64,
    pub discount: f64,
    pub order_status: String
}

#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = admin_config)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfig{
    #[serde(skip)]
    pub admin_config_id: i32,
    pub categories: Vec<String>,
    pub promoted_restaurants: Vec<Uuid>
}
