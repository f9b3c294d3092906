use actix_web::{HttpResponse, web};

use crate::user::model::{CreateUserRequest, UpdateUserRequest};
use crate::user::service::UserService;
use crate::utils::error::CustomError;

/// POST /users/create
pub async fn create_user(
    user_service: web::Data<UserService>,
    user_info: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, CustomError> {
    let user = user_service.create_user(user_info.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// GET /users
pub async fn get_users(user_service: web::Data<UserService>) -> Result<HttpResponse, CustomError> {
    let users = user_service.get_all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id}
pub async fn get_user(
    user_id: web::Path<i64>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, CustomError> {
    let user = user_service.get_user(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// GET /users/username/{username}
pub async fn get_user_by_username(
    username: web::Path<String>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, CustomError> {
    let user = user_service.get_user_by_username(&username).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/{id}
pub async fn update_user(
    user_id: web::Path<i64>,
    user_service: web::Data<UserService>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, CustomError> {
    let user = user_service
        .update_user(user_id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    user_id: web::Path<i64>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, CustomError> {
    user_service.delete_user(user_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
