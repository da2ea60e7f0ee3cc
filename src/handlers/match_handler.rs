use actix_web::http::header;
use actix_web::{web, HttpResponse, Result};

use crate::db::store::match_not_found_message;
use crate::models::common::ErrorDetails;
use crate::models::matches::{MatchDto, UpdateMatchDto};
use crate::models::page::{MatchPage, PageQuery, PageRequest};
use crate::services::{MatchService, ServiceError};

pub const MATCHES_PATH: &str = "/api/v1/matches";

// POST /api/v1/matches - Create a match, optionally with its odds
#[tracing::instrument(
    name = "Create match",
    skip(service, body),
    fields(team_a = ?body.team_a, team_b = ?body.team_b, sport = ?body.sport)
)]
pub async fn create_match(
    service: web::Data<MatchService>,
    body: web::Json<MatchDto>,
) -> Result<HttpResponse> {
    let saved = service.save(body.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{}/{}", MATCHES_PATH, saved.id)))
        .json(MatchDto::from(&saved)))
}

// GET /api/v1/matches/{id}
#[tracing::instrument(name = "Get match", skip(service))]
pub async fn get_match_by_id(
    service: web::Data<MatchService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let found = service.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MatchDto::from(&found)))
}

// GET /api/v1/matches?page=0&size=20&sort=matchDate,desc
#[tracing::instrument(name = "List matches", skip(service))]
pub async fn get_matches(
    service: web::Data<MatchService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let request = PageRequest::try_from(query.into_inner()).map_err(ServiceError::Validation)?;
    let page = service.list(request).await?;
    Ok(HttpResponse::Ok().json(MatchPage::from(&page)))
}

// DELETE /api/v1/matches/{id}
#[tracing::instrument(name = "Delete match", skip(service))]
pub async fn delete_match(
    service: web::Data<MatchService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    if service.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().json(ErrorDetails::new(match_not_found_message(id))))
    }
}

// PATCH /api/v1/matches/{id} - Update time and/or description
#[tracing::instrument(name = "Update match", skip(service, body))]
pub async fn update_match(
    service: web::Data<MatchService>,
    path: web::Path<i64>,
    body: web::Json<UpdateMatchDto>,
) -> Result<HttpResponse> {
    service.update(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
