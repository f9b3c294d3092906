use std::sync::Arc;

use log::{info, warn};

use crate::database::Cache;
use crate::database::cache::{ALL_USERS_KEY, post_key, user_key, user_posts_key, username_key};
use crate::post::post_model::Post;
use crate::post::post_repository::PostRepository;
use crate::user::model::{CreateUserRequest, UpdateUserRequest, User};
use crate::user::repository::UserRepository;
use crate::utils::error::CustomError;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    cache: Cache,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        cache: Cache,
    ) -> Self {
        UserService {
            users,
            posts,
            cache,
        }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, CustomError> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(CustomError::BadRequestError(
                "Username cannot be empty".to_string(),
            ));
        }

        // Check if username already exists
        if self.users.find_by_username(username).await?.is_some() {
            return Err(CustomError::ConflictError(
                "Username already exists".to_string(),
            ));
        }

        let user = self.users.insert(username, request.email.trim()).await?;
        self.cache.evict(ALL_USERS_KEY).await;

        info!(
            "User created successfully: ID={}, username={}",
            user.id, user.username
        );
        Ok(user)
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, CustomError> {
        if let Some(users) = self.cache.get_json::<Vec<User>>(ALL_USERS_KEY).await {
            return Ok(users);
        }

        let users = self.users.find_all().await?;
        self.cache.set_json(ALL_USERS_KEY, &users).await;

        info!("Retrieved {} users from database", users.len());
        Ok(users)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, CustomError> {
        let key = user_key(id);
        if let Some(user) = self.cache.get_json::<User>(&key).await {
            return Ok(user);
        }

        match self.users.find_by_id(id).await? {
            Some(user) => {
                self.cache.set_json(&key, &user).await;
                Ok(user)
            }
            None => {
                warn!("User not found: ID={}", id);
                Err(CustomError::NotFoundError(format!(
                    "User not found with id: {}",
                    id
                )))
            }
        }
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, CustomError> {
        let key = username_key(username);
        if let Some(user) = self.cache.get_json::<User>(&key).await {
            return Ok(user);
        }

        match self.users.find_by_username(username).await? {
            Some(user) => {
                self.cache.set_json(&key, &user).await;
                Ok(user)
            }
            None => {
                warn!("User not found: username={}", username);
                Err(CustomError::NotFoundError(format!(
                    "User not found with username: {}",
                    username
                )))
            }
        }
    }

    pub async fn update_user(
        &self,
        id: i64,
        request: UpdateUserRequest,
    ) -> Result<User, CustomError> {
        let existing = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomError::NotFoundError(format!("User not found with id: {}", id)))?;

        let mut user = existing.clone();
        if let Some(username) = request.username {
            let username = username.trim().to_string();
            if username.is_empty() {
                return Err(CustomError::BadRequestError(
                    "Username cannot be empty".to_string(),
                ));
            }
            if username != existing.username {
                if let Some(other) = self.users.find_by_username(&username).await? {
                    if other.id != id {
                        return Err(CustomError::ConflictError(
                            "Username already exists".to_string(),
                        ));
                    }
                }
            }
            user.username = username;
        }
        if let Some(email) = request.email {
            user.email = email.trim().to_string();
        }

        let updated = self
            .users
            .update(&user)
            .await?
            .ok_or_else(|| CustomError::NotFoundError(format!("User not found with id: {}", id)))?;

        let posts = self.posts.find_by_user_id(id).await?;
        self.evict_user(&existing, &posts).await;
        if updated.username != existing.username {
            // The new name may have been cached as unknown or empty
            self.cache.evict(&username_key(&updated.username)).await;
            self.cache.evict(&user_posts_key(&updated.username)).await;
        }

        info!("User updated successfully: ID={}", id);
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), CustomError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomError::NotFoundError(format!("User not found with id: {}", id)))?;

        // Collect post caches to drop before the cascade removes the rows
        let posts = self.posts.find_by_user_id(id).await?;

        if !self.users.delete(id).await? {
            return Err(CustomError::NotFoundError(format!(
                "User not found with id: {}",
                id
            )));
        }

        self.evict_user(&user, &posts).await;

        info!(
            "User deleted successfully: ID={}, removed {} posts",
            id,
            posts.len()
        );
        Ok(())
    }

    /// Drops every cache entry that embeds this user, including their posts.
    async fn evict_user(&self, user: &User, posts: &[Post]) {
        self.cache.evict(&user_key(user.id)).await;
        self.cache.evict(&username_key(&user.username)).await;
        self.cache.evict(&user_posts_key(&user.username)).await;
        self.cache.evict(ALL_USERS_KEY).await;

        for post in posts {
            self.cache.evict(&post_key(post.id)).await;
        }
    }
}
