use std::path::Path;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::guard::GuardContext;
use actix_web::http::header;
use actix_web::{Either, HttpResponse, Responder, guard, web};
use chrono::Utc;
use rand::Rng;

use crate::config::SiteConfig;
use crate::domain::request::NewRequestAttachment;
use crate::domain::types::AttachmentKind;
use crate::forms::requests::CreateRequestForm;
use crate::repository::DieselRepository;
use crate::routes::{error_body, service_error_response};
use crate::services::requests::create_service_request as create_service_request_service;

/// Multipart variant of the quotation submission: the same text fields as
/// the JSON body plus any number of file attachments.
#[derive(MultipartForm)]
pub struct CreateRequestMultipart {
    #[multipart(limit = "25MB")]
    pub attachments: Vec<TempFile>,
    pub service_id: Option<Text<String>>,
    pub first_name: Option<Text<String>>,
    pub last_name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub phone: Option<Text<String>>,
    pub pricing_tier: Option<Text<String>>,
    pub booking_date: Option<Text<String>>,
    pub booking_time: Option<Text<String>>,
    pub number_of_people: Option<Text<String>>,
    pub hourly_rate: Option<Text<String>>,
    pub location_address: Option<Text<String>>,
    pub location_latitude: Option<Text<String>>,
    pub location_longitude: Option<Text<String>>,
    pub additional_notes: Option<Text<String>>,
    pub cc_zone: Option<Text<String>>,
}

fn text(value: Option<Text<String>>) -> Option<String> {
    value
        .map(|t| t.into_inner().trim().to_string())
        .filter(|s| !s.is_empty() && s != "null")
}

impl From<&mut CreateRequestMultipart> for CreateRequestForm {
    fn from(form: &mut CreateRequestMultipart) -> Self {
        Self {
            service_id: text(form.service_id.take()),
            first_name: text(form.first_name.take()),
            last_name: text(form.last_name.take()),
            email: text(form.email.take()),
            phone: text(form.phone.take()),
            pricing_tier: text(form.pricing_tier.take()),
            booking_date: text(form.booking_date.take()),
            booking_time: text(form.booking_time.take()),
            number_of_people: text(form.number_of_people.take()),
            hourly_rate: text(form.hourly_rate.take()),
            location_address: text(form.location_address.take()),
            location_latitude: text(form.location_latitude.take()),
            location_longitude: text(form.location_longitude.take()),
            additional_notes: text(form.additional_notes.take()),
            cc_zone: text(form.cc_zone.take()),
        }
    }
}

fn random_token() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..8)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Copy an uploaded temp file under the media root and return its
/// persistence metadata. Attachment rows are written later, in the same
/// transaction as the request itself.
fn store_attachment(file: &TempFile, media_root: &str) -> std::io::Result<NewRequestAttachment> {
    let file_name = file
        .file_name
        .clone()
        .unwrap_or_else(|| "attachment".to_string());
    let kind = file
        .content_type
        .as_ref()
        .map(|mime| AttachmentKind::from_content_type(mime.essence_str()))
        .unwrap_or(AttachmentKind::Document);

    let dir = Path::new(media_root).join("quotations");
    std::fs::create_dir_all(&dir)?;
    let stored = dir.join(format!("{}-{}", random_token(), file_name));
    std::fs::copy(file.file.path(), &stored)?;

    Ok(NewRequestAttachment {
        file_name,
        kind,
        file_size: file.size as i64,
        stored_path: stored.to_string_lossy().into_owned(),
        uploaded_at: Utc::now().naive_utc(),
    })
}

pub async fn create_request_multipart(
    MultipartForm(mut form): MultipartForm<CreateRequestMultipart>,
    site: web::Data<SiteConfig>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request_form = CreateRequestForm::from(&mut form);

    let mut attachments = Vec::with_capacity(form.attachments.len());
    for file in &form.attachments {
        match store_attachment(file, &site.media_root) {
            Ok(attachment) => attachments.push(attachment),
            Err(e) => {
                log::error!("Failed to store attachment: {e}");
                return HttpResponse::InternalServerError()
                    .json(error_body("Failed to store attachment"));
            }
        }
    }

    match create_service_request_service(request_form, attachments, site.get_ref(), repo.get_ref())
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => service_error_response(&err, "Service not found"),
    }
}

pub async fn create_request_json(
    form: Either<web::Json<CreateRequestForm>, web::Form<CreateRequestForm>>,
    site: web::Data<SiteConfig>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let form = form.into_inner();
    match create_service_request_service(form, Vec::new(), site.get_ref(), repo.get_ref()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => service_error_response(&err, "Service not found"),
    }
}

fn is_multipart(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/v1/requests")
            .route(
                web::post()
                    .guard(guard::fn_guard(is_multipart))
                    .to(create_request_multipart),
            )
            .route(web::post().to(create_request_json)),
    );
}
