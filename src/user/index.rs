use super::controller::{
    create_user, delete_user, get_user, get_user_by_username, get_users, update_user,
};
use crate::middleware::availability::availability_gate;
use actix_web::middleware::from_fn;
use actix_web::web;

pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(from_fn(availability_gate))
            .service(web::resource("").route(web::get().to(get_users)))
            .service(web::resource("/create").route(web::post().to(create_user)))
            .service(
                web::resource("/username/{username}").route(web::get().to(get_user_by_username)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            ),
    );
}
