use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, Error, web};

use crate::database::Cache;
use crate::frontend::index::frontend_routes;
use crate::middleware::error_handler::extractor_config;
use crate::middleware::not_found::{method_not_allowed, not_found};
use crate::post::post_index::post_routes;
use crate::post::post_repository::PostRepository;
use crate::post::post_service::PostService;
use crate::status::index::status_routes;
use crate::status::model::{RequestCounter, ServerStatus};
use crate::user::index::user_routes;
use crate::user::repository::UserRepository;
use crate::user::service::UserService;

/// Shared application state, cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    pub user_service: web::Data<UserService>,
    pub post_service: web::Data<PostService>,
    pub server_status: web::Data<ServerStatus>,
    pub request_counter: web::Data<RequestCounter>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        cache: Cache,
    ) -> Self {
        AppState {
            user_service: web::Data::new(UserService::new(
                users,
                posts.clone(),
                cache.clone(),
            )),
            post_service: web::Data::new(PostService::new(posts, cache)),
            server_status: web::Data::new(ServerStatus::new()),
            request_counter: web::Data::new(RequestCounter::default()),
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(extractor_config);
    cfg.configure(status_routes);
    cfg.configure(user_routes);
    cfg.configure(post_routes);
    cfg.configure(frontend_routes);
}

pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state.user_service)
        .app_data(state.post_service)
        .app_data(state.server_status)
        .app_data(state.request_counter)
        .configure(routes)
        .wrap(
            ErrorHandlers::new()
                .handler(StatusCode::NOT_FOUND, not_found)
                .handler(StatusCode::METHOD_NOT_ALLOWED, method_not_allowed),
        )
        .wrap(Logger::default())
}
