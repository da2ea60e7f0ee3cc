use actix_web::web;

use crate::handlers::match_handler::{self, MATCHES_PATH};
use crate::handlers::odds_handler;

pub fn init_match_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(MATCHES_PATH)
            // Matches
            .service(
                web::resource("")
                    .route(web::get().to(match_handler::get_matches))
                    .route(web::post().to(match_handler::create_match))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(match_handler::get_match_by_id))
                    .route(web::patch().to(match_handler::update_match))
                    .route(web::delete().to(match_handler::delete_match))
            )

            // Odds of a match
            .service(
                web::resource("/{match_id}/odds")
                    .route(web::get().to(odds_handler::get_odds_for_match))
                    .route(web::post().to(odds_handler::create_odd_for_match))
            )
            .service(
                web::resource("/{match_id}/odds/{odd_id}")
                    .route(web::patch().to(odds_handler::update_odd_for_match))
                    .route(web::delete().to(odds_handler::delete_odd_for_match))
            )
    );
}
