use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{db_interaction::{MenuCategory, ProductDetails}, domain::CategoryLabel, error::ApiError};

pub mod get;
pub mod post;
pub mod update;

pub use get::*;
pub use post::*;
pub use update::*;

// Menu category value that asks for productNewCategory to be added
const NEW_CATEGORY: &str = "new category";

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm{
    #[serde(default)]
    pub restaurant_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub product_name: String,
    pub product_description: String,
    pub product_main_img: String,
    pub product_category: String,
    pub product_menu_category: String,
    #[serde(default)]
    pub product_new_category: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub product_price: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub product_discount: f64
}

impl ProductForm {
    // Validates the form and splits it into item fields and the menu category
    pub fn into_parts(self) -> Result<(ProductDetails, MenuCategory), ApiError> {
        self.validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let menu_category = parse_menu_category(
            &self.product_menu_category,
            self.product_new_category.as_deref()
        )?;

        let details = ProductDetails{
            title: self.product_name.trim().to_string(),
            description: self.product_description,
            item_img: self.product_main_img,
            category: self.product_category,
            price: self.product_price,
            discount: self.product_discount
        };

        Ok((details, menu_category))
    }
}

fn parse_menu_category(
    menu_category: &str,
    new_category: Option<&str>
) -> Result<MenuCategory, ApiError> {
    if menu_category.trim().eq_ignore_ascii_case(NEW_CATEGORY) {
        let label = CategoryLabel::parse(new_category.unwrap_or_default())
            .map_err(ApiError::BadRequest)?;
        return Ok(MenuCategory::New(label))
    }

    match CategoryLabel::parse(menu_category) {
        Ok(label) => Ok(MenuCategory::Existing(label.as_str().to_string())),
        Err(_) => Err(ApiError::BadRequest("Menu category must not be empty".to_string()))
    }
}
