use crate::post::post_model::{CreatePostRequest, UpdatePostRequest, UserIdQuery};
use crate::post::post_service::PostService;
use crate::user::service::UserService;
use crate::utils::error::CustomError;
use actix_web::{HttpResponse, web};

/// POST /posts/create?userId={id}
pub async fn create_post(
    post_service: web::Data<PostService>,
    user_service: web::Data<UserService>,
    query: web::Query<UserIdQuery>,
    post: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    // Author comes from the query string and must exist
    let author = user_service.get_user(query.user_id).await?;
    let created = post_service.create_post(post.into_inner(), &author).await?;

    Ok(HttpResponse::Ok().json(created))
}

/// POST /posts/bulk-create?userId={id}
pub async fn bulk_create_posts(
    post_service: web::Data<PostService>,
    user_service: web::Data<UserService>,
    query: web::Query<UserIdQuery>,
    posts: web::Json<Vec<CreatePostRequest>>,
) -> Result<HttpResponse, CustomError> {
    let author = user_service.get_user(query.user_id).await?;
    let created = post_service
        .bulk_create_posts(posts.into_inner(), &author)
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// GET /posts
pub async fn get_posts(post_service: web::Data<PostService>) -> Result<HttpResponse, CustomError> {
    let posts = post_service.get_all_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/byuser/{username}
pub async fn get_posts_by_user(
    username: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let posts = post_service.get_posts_by_username(&username).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/{id}
pub async fn get_post(
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service.get_post(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /posts/{id}
pub async fn update_post(
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
    body: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .update_post(post_id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    post_service.delete_post(post_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
