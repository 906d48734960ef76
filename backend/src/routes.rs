use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{error, info, warn};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use shared::{DonationRequest, DonationResponse, HealthResponse, VerifyResponse};

use crate::analysis::{enrichment, report};
use crate::config::ServiceConfig;
use crate::inference::model::Classifier;
use crate::inference::preprocess::{self, PreprocessError};
use crate::ledger::DonationLedger;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(health)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/predict").route(web::post().to(predict)))
        .service(web::resource("/donate").route(web::post().to(donate)))
        .service(web::resource("/verify-donation/{hash}").route(web::get().to(verify_donation)));
}

async fn health(classifier: web::Data<Classifier>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: classifier.model_loaded(),
    })
}

async fn predict(
    classifier: web::Data<Classifier>,
    config: web::Data<ServiceConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut image_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let (is_image, field_filename) = match field.content_disposition() {
            Some(disposition) => (
                disposition.get_name() == Some("image"),
                disposition.get_filename().map(str::to_string),
            ),
            None => (false, None),
        };
        if !is_image {
            continue;
        }

        filename = field_filename;
        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            data.write_all(&chunk?)?;
        }
        image_data = Some(data);
    }

    let (image_data, filename) = match preprocess::validate_upload(image_data, filename) {
        Ok(validated) => validated,
        Err(e) => return Ok(bad_request(&e.to_string())),
    };

    let image_config = config.image.clone();
    let classifier = classifier.clone();
    let timeout = Duration::from_secs(config.server.request_timeout_secs);

    let pipeline = web::block(move || {
        let tensor = preprocess::decode_and_normalize(&image_data, &image_config)?;
        Ok::<_, PreprocessError>(classifier.classify(&tensor))
    });

    let classification = match actix_web::rt::time::timeout(timeout, pipeline).await {
        Err(_) => {
            error!("Prediction timed out after {}s", timeout.as_secs());
            return Ok(internal_error("Prediction timed out"));
        }
        Ok(Err(e)) => {
            error!("Prediction pipeline failure: {e}");
            return Ok(internal_error(&e.to_string()));
        }
        Ok(Ok(Err(e))) => {
            warn!("Rejected upload {filename}: {e}");
            return Ok(bad_request(&e.to_string()));
        }
        Ok(Ok(Ok(classification))) => classification,
    };

    let response = report::assemble(&classification, enrichment::generate());
    info!(
        "Predicted blood group {} with confidence {:.3}",
        response.blood_group, response.confidence
    );
    Ok(HttpResponse::Ok().json(response))
}

async fn donate(ledger: web::Data<DonationLedger>, body: web::Bytes) -> HttpResponse {
    let request: DonationRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected donation request: {e}");
            return bad_request(&format!("Invalid request body: {e}"));
        }
    };

    let (Some(donor_id), Some(blood_type), Some(amount)) =
        (request.donor_id, request.blood_type, request.amount)
    else {
        return bad_request("Missing required fields");
    };

    let record = ledger.record(&donor_id, &blood_type, amount);
    HttpResponse::Ok().json(DonationResponse {
        status: "success".to_string(),
        donation_hash: record.hash,
        message: "Blood donation recorded successfully".to_string(),
    })
}

async fn verify_donation(
    ledger: web::Data<DonationLedger>,
    path: web::Path<String>,
) -> HttpResponse {
    let hash = path.into_inner();
    HttpResponse::Ok().json(VerifyResponse {
        valid: ledger.verify(&hash),
        donation_data: ledger.get(&hash),
    })
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: message.to_string(),
    })
}

fn internal_error(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: message.to_string(),
    })
}
