use super::post_controller::{
    bulk_create_posts, create_post, delete_post, get_post, get_posts, get_posts_by_user,
    update_post,
};
use crate::middleware::availability::availability_gate;
use actix_web::middleware::from_fn;
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .wrap(from_fn(availability_gate))
            .service(web::resource("").route(web::get().to(get_posts)))
            .service(web::resource("/create").route(web::post().to(create_post)))
            .service(web::resource("/bulk-create").route(web::post().to(bulk_create_posts)))
            .service(web::resource("/byuser/{username}").route(web::get().to(get_posts_by_user)))
            .service(web::resource("/by-user/{username}").route(web::get().to(get_posts_by_user)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_post))
                    .route(web::put().to(update_post))
                    .route(web::delete().to(delete_post)),
            ),
    );
}
