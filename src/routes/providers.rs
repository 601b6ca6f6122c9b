use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::providers::{
    list_providers as list_providers_service, show_provider as show_provider_service,
};

#[derive(Deserialize, Debug)]
struct ProvidersQueryParams {
    page: Option<usize>,
}

#[get("/v1/providers")]
pub async fn list_providers(
    params: web::Query<ProvidersQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_providers_service(params.page.unwrap_or(1), repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(&err, "Provider not found"),
    }
}

#[get("/v1/providers/{provider_id}")]
pub async fn show_provider(
    provider_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_provider_service(provider_id.into_inner(), repo.get_ref()) {
        Ok(provider) => HttpResponse::Ok().json(provider),
        Err(err) => service_error_response(&err, "Provider not found"),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_providers).service(show_provider);
}
