use actix_web::http::header;
use actix_web::{web, HttpResponse, Result};

use crate::db::store::odd_not_found_message;
use crate::handlers::match_handler::MATCHES_PATH;
use crate::models::common::ErrorDetails;
use crate::models::odds::{OddDto, UpdateOddDto};
use crate::services::OddsService;

// POST /api/v1/matches/{match_id}/odds
#[tracing::instrument(
    name = "Create odd for match",
    skip(service, body),
    fields(specifier = ?body.specifier)
)]
pub async fn create_odd_for_match(
    service: web::Data<OddsService>,
    path: web::Path<i64>,
    body: web::Json<OddDto>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    let saved = service.create_odd_for_match(match_id, body.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("{}/{}/odds/{}", MATCHES_PATH, match_id, saved.id),
        ))
        .json(OddDto::from(&saved)))
}

// GET /api/v1/matches/{match_id}/odds
#[tracing::instrument(name = "Get odds for match", skip(service))]
pub async fn get_odds_for_match(
    service: web::Data<OddsService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let odds = service.get_odds_for_match(path.into_inner()).await?;
    let body: Vec<OddDto> = odds.iter().map(OddDto::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// PATCH /api/v1/matches/{match_id}/odds/{odd_id}
#[tracing::instrument(name = "Update odd", skip(service, body))]
pub async fn update_odd_for_match(
    service: web::Data<OddsService>,
    path: web::Path<(i64, i64)>,
    body: web::Json<UpdateOddDto>,
) -> Result<HttpResponse> {
    let (match_id, odd_id) = path.into_inner();
    service.update_odd(match_id, odd_id, body.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// DELETE /api/v1/matches/{match_id}/odds/{odd_id}
#[tracing::instrument(name = "Delete odd", skip(service))]
pub async fn delete_odd_for_match(
    service: web::Data<OddsService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (match_id, odd_id) = path.into_inner();
    if service.delete(match_id, odd_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().json(ErrorDetails::new(odd_not_found_message(match_id, odd_id))))
    }
}
