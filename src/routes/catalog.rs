use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::catalog::{
    ServiceListParams, list_services as list_services_service,
    search_categories as search_categories_service,
    search_subcategories as search_subcategories_service, show_service as show_service_service,
    site_summary as site_summary_service,
};

#[derive(Deserialize, Debug)]
struct ServicesQueryParams {
    keyword: Option<String>,
    page: Option<usize>,
}

#[derive(Deserialize, Debug)]
struct SearchQueryParams {
    q: Option<String>,
}

/// Collect every occurrence of a repeated query parameter. `web::Query`
/// keeps only the last value, and the listing UI submits `category=` and
/// `subcategory=` multiple times.
fn repeated_query_params(query_string: &str, name: &str) -> Vec<String> {
    query_string
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == name)
        .filter_map(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
        .collect()
}

#[get("/v1/services")]
pub async fn list_services(
    req: HttpRequest,
    params: web::Query<ServicesQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let list_params = ServiceListParams {
        keyword: params.keyword.clone(),
        categories: repeated_query_params(req.query_string(), "category"),
        subcategories: repeated_query_params(req.query_string(), "subcategory"),
        page: params.page.unwrap_or(1),
    };

    match list_services_service(list_params, repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(&err, "Service not found"),
    }
}

#[get("/v1/services/{service_id}")]
pub async fn show_service(
    service_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_service_service(service_id.into_inner(), repo.get_ref()) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(err) => service_error_response(&err, "Service not found"),
    }
}

#[get("/v1/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match search_categories_service(None, repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => service_error_response(&err, "Category not found"),
    }
}

#[get("/v1/categories/search")]
pub async fn search_categories(
    params: web::Query<SearchQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_categories_service(params.q.clone(), repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => service_error_response(&err, "Category not found"),
    }
}

#[get("/v1/subcategories/search")]
pub async fn search_subcategories(
    params: web::Query<SearchQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_subcategories_service(params.q.clone(), repo.get_ref()) {
        Ok(subcategories) => HttpResponse::Ok().json(subcategories),
        Err(err) => service_error_response(&err, "Subcategory not found"),
    }
}

#[get("/v1/summary")]
pub async fn site_summary(repo: web::Data<DieselRepository>) -> impl Responder {
    match site_summary_service(repo.get_ref()) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => service_error_response(&err, "not found"),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_services)
        .service(show_service)
        .service(list_categories)
        .service(search_categories)
        .service(search_subcategories)
        .service(site_summary);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_params_are_collected_in_order() {
        let parsed = repeated_query_params(
            "keyword=deep&category=cleaning&category=plumbing&page=2",
            "category",
        );
        assert_eq!(parsed, vec!["cleaning", "plumbing"]);
    }

    #[test]
    fn encoded_values_are_decoded() {
        let parsed = repeated_query_params("category=home%2Dcare", "category");
        assert_eq!(parsed, vec!["home-care"]);
    }

    #[test]
    fn empty_values_are_skipped() {
        assert!(repeated_query_params("category=&page=1", "category").is_empty());
    }
}
