use crate::item::{from_item, string_key, to_item};
use crate::store::RecordStore;
use crate::types::User;
use crate::validation::is_email_valid;

/// Partition key attribute of the users table
pub const EMAIL_ATTRIBUTE: &str = "email";

/// Every failure the user operations can report. The display strings are part
/// of the HTTP contract and end up verbatim in `{"error": ...}` bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("invalid user data")]
    InvalidUserData,
    #[error("invalid email")]
    InvalidEmail,
    #[error("failed to fetch record")]
    FetchFailed,
    #[error("failed to unmarshal record")]
    UnmarshalFailed,
    #[error("could not marshal item")]
    MarshalFailed,
    #[error("could not dynamo put item error")]
    PutFailed,
    #[error("could not delete item")]
    DeleteFailed,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("user does not exist")]
    UserDoesNotExist,
}

/// Get a single user by email.
///
/// A missing record is not an error: the result is a `User` with an empty
/// email, which callers must treat as "not found".
pub async fn fetch_user(
    store: &dyn RecordStore,
    table_name: &str,
    email: &str,
) -> Result<User, UserError> {
    let item = store
        .get(table_name, string_key(EMAIL_ATTRIBUTE, email))
        .await
        .map_err(|e| {
            tracing::error!("Error fetching user with email {}: {}", email, e);
            UserError::FetchFailed
        })?
        .unwrap_or_default();

    from_item(&item).map_err(|e| {
        tracing::error!("Error unmarshalling user with email {}: {}", email, e);
        UserError::UnmarshalFailed
    })
}

/// Get every user in the table
pub async fn fetch_users(store: &dyn RecordStore, table_name: &str) -> Result<Vec<User>, UserError> {
    let items = store.scan(table_name).await.map_err(|e| {
        tracing::error!("Error fetching users: {}", e);
        UserError::FetchFailed
    })?;

    items
        .iter()
        .map(from_item::<User>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            tracing::error!("Error unmarshalling users: {}", e);
            UserError::UnmarshalFailed
        })
}

/// Create a user from a JSON body. Fails if a user with that email exists.
pub async fn create_user(
    store: &dyn RecordStore,
    table_name: &str,
    body: &[u8],
) -> Result<User, UserError> {
    let user: User = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Unable to unmarshal create request body: {}", e);
        UserError::InvalidUserData
    })?;

    if !is_email_valid(&user.email) {
        tracing::warn!("Invalid email address in request body: {}", user.email);
        return Err(UserError::InvalidEmail);
    }

    if probe_user(store, table_name, &user.email).await == Probe::Found {
        tracing::warn!("User already exists with email {}", user.email);
        return Err(UserError::UserAlreadyExists);
    }

    save_user(store, table_name, &user).await?;
    tracing::info!("Created user {}", user.email);
    Ok(user)
}

/// Replace an existing user with the JSON body. Fails if no user with that
/// email exists.
pub async fn update_user(
    store: &dyn RecordStore,
    table_name: &str,
    body: &[u8],
) -> Result<User, UserError> {
    let user: User = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Unable to unmarshal update request body: {}", e);
        UserError::InvalidUserData
    })?;

    if probe_user(store, table_name, &user.email).await == Probe::Absent {
        tracing::warn!("No existing user with email {}", user.email);
        return Err(UserError::UserDoesNotExist);
    }

    save_user(store, table_name, &user).await?;
    tracing::info!("Updated user {}", user.email);
    Ok(user)
}

/// Delete the user with `email`. Deleting an absent user succeeds.
pub async fn delete_user(
    store: &dyn RecordStore,
    table_name: &str,
    email: &str,
) -> Result<(), UserError> {
    if !is_email_valid(email) {
        tracing::warn!("Invalid email address {}", email);
        return Err(UserError::InvalidEmail);
    }

    store
        .delete(table_name, string_key(EMAIL_ATTRIBUTE, email))
        .await
        .map_err(|e| {
            tracing::error!("Unable to delete user {}: {}", email, e);
            UserError::DeleteFailed
        })?;

    tracing::info!("Deleted user {}", email);
    Ok(())
}

/// Outcome of the existence check ahead of a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Found,
    Absent,
    /// Lookup or decode failed; never fails the request
    Failed,
}

async fn probe_user(store: &dyn RecordStore, table_name: &str, email: &str) -> Probe {
    match fetch_user(store, table_name, email).await {
        Ok(user) if user.exists() => Probe::Found,
        Ok(_) => Probe::Absent,
        Err(e) => {
            tracing::warn!("Existence check for {} failed, continuing with write: {}", email, e);
            Probe::Failed
        }
    }
}

async fn save_user(store: &dyn RecordStore, table_name: &str, user: &User) -> Result<(), UserError> {
    let item = to_item(user).map_err(|e| {
        tracing::error!("Error marshalling user {}: {}", user.email, e);
        UserError::MarshalFailed
    })?;

    store.put(table_name, item).await.map_err(|e| {
        tracing::error!("Unable to put user {}: {}", user.email, e);
        UserError::PutFailed
    })
}
