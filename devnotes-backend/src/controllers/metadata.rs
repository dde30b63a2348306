//! `/metadata` — profile document pointing clients at the notes listing.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::AppState;

/// Base URL for absolute links: the configured public URL, else the request's own origin.
fn base_url(state: &AppState, req: &HttpRequest) -> String {
    match &state.config.public_url {
        Some(url) => url.clone(),
        None => {
            let info = req.connection_info();
            format!("{}://{}", info.scheme(), info.host())
        }
    }
}

async fn get_metadata(data: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let base = base_url(&data, &req);
    HttpResponse::Ok().json(data.profile.to_metadata(&base, chrono::Utc::now()))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/metadata").route(web::get().to(get_metadata)));
}
