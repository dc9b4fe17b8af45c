use anyhow::Context;
use diesel::{ExpressionMethods, PgConnection, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use uuid::Uuid;

use crate::{domain::CategoryLabel, models::AdminConfig, schema::admin_config, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

// Key of the only admin_config row; the table's CHECK constraint rejects any other
pub const ADMIN_CONFIG_ID: i32 = 1;

// Creates the config row if missing and returns it. Insert-if-absent on the
// fixed key, so concurrent first reads still leave exactly one row
pub fn ensure_admin_config(conn: &mut PgConnection) -> QueryResult<AdminConfig> {
    diesel::insert_into(admin_config::table)
        .values(admin_config::admin_config_id.eq(ADMIN_CONFIG_ID))
        .on_conflict_do_nothing()
        .execute(conn)?;

    admin_config::table
        .find(ADMIN_CONFIG_ID)
        .select(AdminConfig::as_select())
        .first::<AdminConfig>(conn)
}

#[tracing::instrument(
    "Getting or creating admin config",
    skip_all
)]
pub async fn get_or_create_admin_config(
    mut conn: DbConnection
) -> Result<AdminConfig, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        ensure_admin_config(&mut conn)
            .context("Failed to get or create admin config")
    })
    .await
    .context("Failed due to threadpool error")?
}

// Set-insert into the global category list under a row lock
#[tracing::instrument(
    "Adding category to global list",
    skip(conn)
)]
pub fn add_category(
    conn: &mut PgConnection,
    label: &CategoryLabel
) -> QueryResult<()> {
    ensure_admin_config(conn)?;

    let mut categories = admin_config::table
        .find(ADMIN_CONFIG_ID)
        .select(admin_config::categories)
        .for_update()
        .get_result::<Vec<String>>(conn)?;

    if label.insert_into(&mut categories) {
        diesel::update(admin_config::table.find(ADMIN_CONFIG_ID))
            .set(admin_config::categories.eq(categories))
            .execute(conn)?;
    }

    Ok(())
}

// Replaces the promoted list as a whole
#[tracing::instrument(
    "Updating promoted restaurant list",
    skip(conn)
)]
pub async fn set_promoted_list(
    mut conn: DbConnection,
    restaurant_ids: Vec<Uuid>
) -> Result<AdminConfig, anyhow::Error> {
    spawn_blocking_with_tracing(move || -> QueryResult<AdminConfig> {
        ensure_admin_config(&mut conn)?;

        diesel::update(admin_config::table.find(ADMIN_CONFIG_ID))
            .set(admin_config::promoted_restaurants.eq(restaurant_ids))
            .returning(AdminConfig::as_returning())
            .get_result::<AdminConfig>(&mut conn)
    })
    .await
    .context("Failed due to threadpool error")?
    .context("Failed to update promoted restaurant list")
}
