use std::sync::Arc;

use log::{info, warn};

use crate::database::Cache;
use crate::database::cache::{post_key, user_posts_key};
use crate::post::post_model::{CreatePostRequest, NewPost, Post, UpdatePostRequest};
use crate::post::post_repository::PostRepository;
use crate::user::model::User;
use crate::utils::error::CustomError;

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    cache: Cache,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, cache: Cache) -> Self {
        PostService { posts, cache }
    }

    pub async fn create_post(
        &self,
        request: CreatePostRequest,
        author: &User,
    ) -> Result<Post, CustomError> {
        let new_post = NewPost::from(request);
        let post = self.posts.insert(author.id, &new_post).await?;
        self.cache.evict(&user_posts_key(&author.username)).await;

        info!(
            "Post created successfully: ID={}, User={}",
            post.id, author.username
        );
        Ok(post)
    }

    pub async fn bulk_create_posts(
        &self,
        requests: Vec<CreatePostRequest>,
        author: &User,
    ) -> Result<Vec<Post>, CustomError> {
        if requests.is_empty() {
            return Err(CustomError::BadRequestError(
                "Posts list cannot be empty".to_string(),
            ));
        }

        let new_posts: Vec<NewPost> = requests.into_iter().map(NewPost::from).collect();
        let posts = self.posts.insert_many(author.id, &new_posts).await?;
        self.cache.evict(&user_posts_key(&author.username)).await;

        info!(
            "Bulk created {} posts for user: {}",
            posts.len(),
            author.username
        );
        Ok(posts)
    }

    pub async fn get_all_posts(&self) -> Result<Vec<Post>, CustomError> {
        let posts = self.posts.find_all().await?;
        info!("Retrieved {} posts from database", posts.len());
        Ok(posts)
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, CustomError> {
        let key = post_key(id);
        if let Some(post) = self.cache.get_json::<Post>(&key).await {
            return Ok(post);
        }

        match self.posts.find_by_id(id).await? {
            Some(post) => {
                self.cache.set_json(&key, &post).await;
                Ok(post)
            }
            None => {
                warn!("Post not found: ID={}", id);
                Err(not_found(id))
            }
        }
    }

    /// Unknown usernames yield an empty list rather than an error.
    pub async fn get_posts_by_username(&self, username: &str) -> Result<Vec<Post>, CustomError> {
        let key = user_posts_key(username);
        if let Some(posts) = self.cache.get_json::<Vec<Post>>(&key).await {
            return Ok(posts);
        }

        let posts = self.posts.find_by_username(username).await?;
        self.cache.set_json(&key, &posts).await;

        info!("Retrieved {} posts for user: {}", posts.len(), username);
        Ok(posts)
    }

    pub async fn update_post(
        &self,
        id: i64,
        changes: UpdatePostRequest,
    ) -> Result<Post, CustomError> {
        let post = self.posts.update(id, &changes).await?.ok_or_else(|| {
            warn!("Post not found for update: ID={}", id);
            not_found(id)
        })?;

        self.cache.set_json(&post_key(id), &post).await;
        self.cache.evict(&user_posts_key(&post.user.username)).await;

        info!("Post updated successfully: ID={}", id);
        Ok(post)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), CustomError> {
        let post = self.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        if !self.posts.delete(id).await? {
            return Err(not_found(id));
        }

        self.cache.evict(&post_key(id)).await;
        self.cache.evict(&user_posts_key(&post.user.username)).await;

        info!("Post deleted successfully: ID={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> CustomError {
    CustomError::NotFoundError(format!("Post not found with id: {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::cache::MockCacheStore;
    use crate::post::post_model::PostAuthor;
    use crate::post::post_repository::MockPostRepository;
    use chrono::{TimeZone, Utc};

    fn mock_user() -> User {
        User {
            id: 1,
            username: "testuser".to_string(),
            email: String::new(),
            created_at: Utc::now(),
        }
    }

    fn mock_post() -> Post {
        Post {
            id: 1,
            title: "Test Title".to_string(),
            text: "Test Content".to_string(),
            publishing_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            user: PostAuthor {
                id: 1,
                username: "testuser".to_string(),
                email: String::new(),
            },
        }
    }

    fn create_request() -> CreatePostRequest {
        CreatePostRequest {
            title: "Test Title".to_string(),
            text: "Test Content".to_string(),
            publishing_date: None,
        }
    }

    fn service(posts: MockPostRepository, cache: MockCacheStore) -> PostService {
        PostService::new(Arc::new(posts), Cache::new(Arc::new(cache)))
    }

    #[actix_web::test]
    async fn create_post() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_insert()
            .withf(|user_id, post| *user_id == 1 && post.title == "Test Title")
            .times(1)
            .returning(|_, _| Ok(mock_post()));

        let mut cache = MockCacheStore::new();
        cache
            .expect_delete()
            .withf(|key| key == "user_posts_testuser")
            .times(1)
            .returning(|_| Ok(()));

        let result = service(posts, cache)
            .create_post(create_request(), &mock_user())
            .await
            .expect("created");

        assert_eq!(result.id, 1);
        assert_eq!(result.user.id, 1);
    }

    #[actix_web::test]
    async fn bulk_create_posts() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_insert_many()
            .withf(|user_id, posts| *user_id == 1 && posts.len() == 1)
            .times(1)
            .returning(|_, _| Ok(vec![mock_post()]));

        let mut cache = MockCacheStore::new();
        cache
            .expect_delete()
            .withf(|key| key == "user_posts_testuser")
            .times(1)
            .returning(|_| Ok(()));

        let result = service(posts, cache)
            .bulk_create_posts(vec![create_request()], &mock_user())
            .await
            .expect("created");

        assert_eq!(result.len(), 1);
    }

    #[actix_web::test]
    async fn bulk_create_rejects_empty_list() {
        let mut posts = MockPostRepository::new();
        posts.expect_insert_many().times(0);

        let result = service(posts, MockCacheStore::new())
            .bulk_create_posts(Vec::new(), &mock_user())
            .await;

        assert!(matches!(result, Err(CustomError::BadRequestError(_))));
    }

    #[actix_web::test]
    async fn get_post_stores_cache_miss() {
        let mut cache = MockCacheStore::new();
        cache
            .expect_get()
            .withf(|key| key == "post_1")
            .returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, _| key == "post_1")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .returning(|_| Ok(Some(mock_post())));

        let result = service(posts, cache).get_post(1).await.expect("found");
        assert_eq!(result, mock_post());
    }

    #[actix_web::test]
    async fn get_post_missing_is_not_found() {
        let mut cache = MockCacheStore::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_set().times(0);

        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().returning(|_| Ok(None));

        let result = service(posts, cache).get_post(999).await;
        assert!(matches!(result, Err(CustomError::NotFoundError(_))));
    }

    #[actix_web::test]
    async fn get_posts_by_username_uses_cache() {
        let cached = serde_json::to_string(&vec![mock_post()]).expect("json");
        let mut cache = MockCacheStore::new();
        cache
            .expect_get()
            .withf(|key| key == "user_posts_testuser")
            .times(1)
            .returning(move |_| Ok(Some(cached.clone())));

        let mut posts = MockPostRepository::new();
        posts.expect_find_by_username().times(0);

        let result = service(posts, cache)
            .get_posts_by_username("testuser")
            .await
            .expect("cached");
        assert_eq!(result.len(), 1);
    }

    #[actix_web::test]
    async fn get_posts_by_unknown_username_is_empty() {
        let mut cache = MockCacheStore::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_set().returning(|_, _| Ok(()));

        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_username()
            .withf(|username| username == "nobody")
            .returning(|_| Ok(Vec::new()));

        let result = service(posts, cache)
            .get_posts_by_username("nobody")
            .await
            .expect("empty list");
        assert!(result.is_empty());
    }

    #[actix_web::test]
    async fn update_post() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_update()
            .withf(|id, changes| {
                *id == 1
                    && changes.title.as_deref() == Some("Updated Title")
                    && changes.text.as_deref() == Some("Updated Content")
            })
            .returning(|_, changes| {
                let mut post = mock_post();
                post.title = changes.title.clone().unwrap_or_default();
                post.text = changes.text.clone().unwrap_or_default();
                Ok(Some(post))
            });

        let mut cache = MockCacheStore::new();
        cache
            .expect_set()
            .withf(|key, _| key == "post_1")
            .times(1)
            .returning(|_, _| Ok(()));
        cache
            .expect_delete()
            .withf(|key| key == "user_posts_testuser")
            .times(1)
            .returning(|_| Ok(()));

        let result = service(posts, cache)
            .update_post(
                1,
                UpdatePostRequest {
                    title: Some("Updated Title".to_string()),
                    text: Some("Updated Content".to_string()),
                },
            )
            .await
            .expect("updated");

        assert_eq!(result.title, "Updated Title");
        assert_eq!(result.text, "Updated Content");
        assert_eq!(result.publishing_date, mock_post().publishing_date);
    }

    #[actix_web::test]
    async fn update_missing_post_is_not_found() {
        let mut posts = MockPostRepository::new();
        posts.expect_update().returning(|_, _| Ok(None));

        let mut cache = MockCacheStore::new();
        cache.expect_set().times(0);

        let result = service(posts, cache)
            .update_post(999, UpdatePostRequest::default())
            .await;
        assert!(matches!(result, Err(CustomError::NotFoundError(_))));
    }

    #[actix_web::test]
    async fn delete_post() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|_| Ok(Some(mock_post())));
        posts
            .expect_delete()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(true));

        let mut cache = MockCacheStore::new();
        cache
            .expect_delete()
            .withf(|key| key == "post_1")
            .times(1)
            .returning(|_| Ok(()));
        cache
            .expect_delete()
            .withf(|key| key == "user_posts_testuser")
            .times(1)
            .returning(|_| Ok(()));

        service(posts, cache).delete_post(1).await.expect("deleted");
    }
}
