use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::model::User;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub publishing_date: DateTime<Utc>,
    pub user: PostAuthor,
}

/// Author summary embedded in every post.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PostAuthor {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for PostAuthor {
    fn from(user: &User) -> Self {
        PostAuthor {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Flat row produced by the `posts JOIN users` queries.
#[derive(Debug, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub publishing_date: DateTime<Utc>,
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            text: row.text,
            publishing_date: row.publishing_date,
            user: PostAuthor {
                id: row.user_id,
                username: row.username,
                email: row.email,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub text: String,
    pub publishing_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: i64,
}

/// A post ready for insertion, with its publishing date resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub text: String,
    pub publishing_date: DateTime<Utc>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(request: CreatePostRequest) -> Self {
        NewPost {
            title: request.title,
            text: request.text,
            publishing_date: request.publishing_date.unwrap_or_else(Utc::now),
        }
    }
}
