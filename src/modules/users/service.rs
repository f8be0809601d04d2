use anyhow::anyhow;
use tracing::{info, instrument};

use taxdesk_core::{AppError, hash_password};

use crate::metrics::track_user_registered;

use super::model::{CreateUserDto, NewUser, UserResponse, UserRole};
use super::repository::{USERNAME_TAKEN, UserRepository};

pub struct UserService;

impl UserService {
    /// Registers a user. Role names are validated and de-duplicated in
    /// request order; the password is stored as a bcrypt hash.
    #[instrument(skip(users, dto), fields(username = %dto.username))]
    pub async fn register(
        users: &UserRepository,
        dto: CreateUserDto,
    ) -> Result<UserResponse, AppError> {
        let roles = parse_roles(&dto.role)?;
        let username = dto.username.trim().to_string();

        if users.exists_by_username(&username).await? {
            return Err(AppError::conflict(anyhow!(USERNAME_TAKEN)));
        }

        let password = dto.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(AppError::internal)??;

        let record = users
            .insert(NewUser {
                username,
                password_hash,
                roles: roles.clone(),
            })
            .await?;

        for role in &roles {
            track_user_registered(role.as_str());
        }
        info!(user_id = record.id, "User registered");

        Ok(record.into())
    }

    /// Creates an administrator account.
    pub async fn create_admin(
        users: &UserRepository,
        username: &str,
        password: &str,
    ) -> Result<UserResponse, AppError> {
        Self::register(
            users,
            CreateUserDto {
                username: username.to_string(),
                password: password.to_string(),
                role: vec![UserRole::Admin.as_str().to_string()],
            },
        )
        .await
    }

    #[instrument(skip(users))]
    pub async fn list(users: &UserRepository) -> Result<Vec<UserResponse>, AppError> {
        let records = users.list().await?;
        Ok(records.into_iter().map(UserResponse::from).collect())
    }
}

fn parse_roles(names: &[String]) -> Result<Vec<UserRole>, AppError> {
    let mut roles = Vec::with_capacity(names.len());

    for name in names {
        let role = name.parse::<UserRole>().map_err(AppError::unprocessable)?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }

    if roles.is_empty() {
        return Err(AppError::unprocessable(anyhow!(
            "at least one role is required"
        )));
    }

    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use taxdesk_core::verify_password;

    fn dto(username: &str, roles: &[&str]) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            password: "s3cret".to_string(),
            role: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let users = UserRepository::in_memory();
        let created = UserService::register(&users, dto("alice", &["ROLE_ADMIN", "ADMIN", "USER"]))
            .await
            .unwrap();

        assert_eq!(created.username, "alice");
        assert_eq!(created.roles, vec!["ADMIN", "USER"]);

        let stored = users.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret");
        assert!(verify_password("s3cret", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let users = UserRepository::in_memory();
        let err = UserService::register(&users, dto("alice", &["ROOT"]))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(users.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let users = UserRepository::in_memory();
        UserService::register(&users, dto("alice", &["USER"]))
            .await
            .unwrap();

        let err = UserService::register(&users, dto("alice", &["ADMIN"]))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.error.to_string(), USERNAME_TAKEN);
    }

    #[tokio::test]
    async fn test_create_admin() {
        let users = UserRepository::in_memory();
        let admin = UserService::create_admin(&users, "root", "pw").await.unwrap();
        assert_eq!(admin.roles, vec!["ADMIN"]);
        assert_eq!(UserService::list(&users).await.unwrap(), vec![admin]);
    }
}
