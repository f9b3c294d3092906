//! In-process stand-in for Postgres used by the HTTP tests. Mirrors the
//! constraints the schema enforces: unique usernames and cascading deletes.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::post::post_model::{NewPost, Post, PostAuthor, UpdatePostRequest};
use crate::post::post_repository::PostRepository;
use crate::user::model::User;
use crate::user::repository::UserRepository;
use crate::utils::error::CustomError;

#[derive(Default)]
struct State {
    users: Vec<User>,
    posts: Vec<StoredPost>,
    next_user_id: i64,
    next_post_id: i64,
}

struct StoredPost {
    id: i64,
    user_id: i64,
    post: NewPost,
}

impl State {
    fn author(&self, user_id: i64) -> Option<PostAuthor> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(PostAuthor::from)
    }

    fn materialize(&self, stored: &StoredPost) -> Option<Post> {
        Some(Post {
            id: stored.id,
            title: stored.post.title.clone(),
            text: stored.post.text.clone(),
            publishing_date: stored.post.publishing_date,
            user: self.author(stored.user_id)?,
        })
    }

    fn posts_where(&self, keep: impl Fn(&StoredPost) -> bool) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|p| keep(p))
            .filter_map(|p| self.materialize(p))
            .collect()
    }

    fn insert_post(&mut self, user_id: i64, post: &NewPost) -> Result<Post, CustomError> {
        if self.author(user_id).is_none() {
            return Err(CustomError::BadRequestError(format!(
                "User {} does not exist",
                user_id
            )));
        }

        self.next_post_id += 1;
        let stored = StoredPost {
            id: self.next_post_id,
            user_id,
            post: post.clone(),
        };
        let created = self.materialize(&stored);
        self.posts.push(stored);
        created.ok_or_else(|| CustomError::InternalServerError("Post author vanished".to_string()))
    }

    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|u| u.username == username && Some(u.id) != except)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, CustomError> {
        self.state
            .lock()
            .map_err(|_| CustomError::InternalServerError("Store lock poisoned".to_string()))
    }
}

fn duplicate() -> CustomError {
    CustomError::ConflictError("Record already exists".to_string())
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, username: &str, email: &str) -> Result<User, CustomError> {
        let mut state = self.lock()?;
        if state.username_taken(username, None) {
            return Err(duplicate());
        }

        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, CustomError> {
        Ok(self.lock()?.users.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, CustomError> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CustomError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<Option<User>, CustomError> {
        let mut state = self.lock()?;
        if state.username_taken(&user.username, Some(user.id)) {
            return Err(duplicate());
        }

        let Some(stored) = state.users.iter_mut().find(|u| u.id == user.id) else {
            return Ok(None);
        };
        stored.username = user.username.clone();
        stored.email = user.email.clone();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, CustomError> {
        let mut state = self.lock()?;
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        state.posts.retain(|p| p.user_id != id);
        Ok(state.users.len() < before)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert(&self, user_id: i64, post: &NewPost) -> Result<Post, CustomError> {
        self.lock()?.insert_post(user_id, post)
    }

    async fn insert_many(&self, user_id: i64, posts: &[NewPost]) -> Result<Vec<Post>, CustomError> {
        let mut state = self.lock()?;
        posts
            .iter()
            .map(|post| state.insert_post(user_id, post))
            .collect()
    }

    async fn find_all(&self) -> Result<Vec<Post>, CustomError> {
        Ok(self.lock()?.posts_where(|_| true))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, CustomError> {
        Ok(self.lock()?.posts_where(|p| p.id == id).into_iter().next())
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Post>, CustomError> {
        Ok(self.lock()?.posts_where(|p| p.user_id == user_id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Post>, CustomError> {
        let state = self.lock()?;
        let Some(user_id) = state
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.id)
        else {
            return Ok(Vec::new());
        };
        Ok(state.posts_where(|p| p.user_id == user_id))
    }

    async fn update(
        &self,
        id: i64,
        changes: &UpdatePostRequest,
    ) -> Result<Option<Post>, CustomError> {
        let mut state = self.lock()?;
        let Some(stored) = state.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            stored.post.title = title.clone();
        }
        if let Some(text) = &changes.text {
            stored.post.text = text.clone();
        }

        Ok(state.posts_where(|p| p.id == id).into_iter().next())
    }

    async fn delete(&self, id: i64) -> Result<bool, CustomError> {
        let mut state = self.lock()?;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        Ok(state.posts.len() < before)
    }
}
