use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{dsl::exists, Connection, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use uuid::Uuid;

use crate::{domain::{Approval, UserEmail, UserType}, models::{Restaurant, User}, schema::{restaurants, users}, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

// Account data accepted at registration, password already hashed
pub struct NewAccount{
    pub username: String,
    pub email: UserEmail,
    pub usertype: UserType,
    pub password_hash: SecretString,
    pub restaurant_address: String,
    pub restaurant_image: String,
    // Set when an admin makes the request. Without it an admin account can
    // only be created while no admin exists
    pub created_by_admin: bool
}

// Error associated with inserting user to users table
#[derive(Error)]
pub enum UserInsertError{
    #[error("User already exists")]
    EmailNotUnique(#[source] diesel::result::Error),
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("unexpected database error occured")]
    UnexpectedError(#[source] diesel::result::Error),
    #[error("an admin already exists")]
    AdminRegistrationClosed
}

impl From<diesel::result::Error> for UserInsertError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _
            ) => UserInsertError::EmailNotUnique(e),
            _ => UserInsertError::UnexpectedError(e)
        }
    }
}

impl Debug for UserInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Inserts the user and, for restaurant accounts, its restaurant with an
// empty menu. Both rows are written in one transaction
#[tracing::instrument(
    "Inserting user into the database",
    skip_all,
    fields(email = %account.email.as_ref(), usertype = account.usertype.as_str())
)]
pub async fn insert_user_into_database(
    mut conn: DbConnection,
    account: NewAccount
) -> Result<User, UserInsertError> {

    let user = User{
        user_id: Uuid::new_v4(),
        username: account.username,
        email: account.email.0,
        password: account.password_hash.expose_secret().to_string(),
        usertype: account.usertype.as_str().to_string(),
        approval: account.usertype.initial_approval().as_str().to_string()
    };

    let restaurant = match account.usertype {
        UserType::Restaurant => Some(Restaurant{
            restaurant_id: Uuid::new_v4(),
            owner_id: user.user_id,
            title: user.username.clone(),
            address: account.restaurant_address,
            main_img: account.restaurant_image,
            menu: Vec::new()
        }),
        _ => None
    };

    let bootstrap_admin = account.usertype == UserType::Admin && !account.created_by_admin;

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<User, UserInsertError, _>(|conn| {
            if bootstrap_admin {
                // Serializes concurrent first-admin registrations
                diesel::sql_query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE").execute(conn)?;

                let admin_exists = diesel::select(exists(
                    users::table.filter(users::usertype.eq(UserType::Admin.as_str()))
                ))
                .get_result::<bool>(conn)?;

                if admin_exists {
                    return Err(UserInsertError::AdminRegistrationClosed)
                }
            }

            let user = diesel::insert_into(users::table)
                .values(&user)
                .returning(User::as_returning())
                .get_result(conn)?;

            if let Some(restaurant) = restaurant {
                diesel::insert_into(restaurants::table)
                    .values(&restaurant)
                    .execute(conn)?;
            }

            Ok(user)
        })
    })
    .await??;

    Ok(res)
}

// Function to query user from email id
#[tracing::instrument(
    "Getting user by email",
    skip(conn)
)]
pub async fn get_user_from_email(
    mut conn: DbConnection,
    email: String
) -> Result<Option<User>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to query user by email")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting user by id",
    skip(conn)
)]
pub async fn get_user_by_id(
    mut conn: DbConnection,
    user_id: Uuid
) -> Result<Option<User>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()
            .context("Failed to query user by id")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting all users",
    skip_all
)]
pub async fn list_users(
    mut conn: DbConnection
) -> Result<Vec<User>, anyhow::Error> {
    spawn_blocking_with_tracing(move || {
        users::table
            .order(users::username.asc())
            .select(User::as_select())
            .load::<User>(&mut conn)
            .context("Failed to load users")
    })
    .await
    .context("Failed due to threadpool error")?
}

// Whether the stored approval of user_id is `approved`. Tokens keep the
// approval they were issued with, so writes gated on approval check this.
// The row is share-locked until the surrounding transaction ends, which holds
// off a concurrent approve or reject
pub fn is_approved(
    conn: &mut PgConnection,
    user_id: Uuid
) -> QueryResult<bool> {
    let approval = users::table
        .find(user_id)
        .select(users::approval)
        .for_share()
        .get_result::<String>(conn)
        .optional()?;

    Ok(approval.as_deref() == Some(Approval::Approved.as_str()))
}

// Errors associated with the restaurant approval workflow
#[derive(Error)]
pub enum SetApprovalError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("user_id: {0} doesn't exist")]
    NoUserIdError(Uuid)
}

impl Debug for SetApprovalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Overwrites the approval field; repeating a decision is a no-op
#[tracing::instrument(
    "Setting user approval",
    skip(conn)
)]
pub async fn set_approval(
    mut conn: DbConnection,
    user_id: Uuid,
    approval: Approval
) -> Result<(), SetApprovalError> {
    let affected_rows = spawn_blocking_with_tracing(move || {
        diesel::update(users::table.find(user_id))
            .set(users::approval.eq(approval.as_str()))
            .execute(&mut conn)
    })
    .await??;

    if affected_rows == 0 {
        return Err(SetApprovalError::NoUserIdError(user_id))
    }

    Ok(())
}
