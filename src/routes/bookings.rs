use actix_web::{Either, HttpResponse, Responder, post, web};

use crate::config::SiteConfig;
use crate::forms::bookings::CreateBookingForm;
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::bookings::create_booking as create_booking_service;

#[post("/v1/bookings")]
pub async fn create_booking(
    form: Either<web::Json<CreateBookingForm>, web::Form<CreateBookingForm>>,
    site: web::Data<SiteConfig>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    match create_booking_service(form, site.get_ref(), repo.get_ref()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => service_error_response(&err, "Service not found"),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_booking);
}
