//! `/proxy?url=` — fetch remote notes for the web UI when the remote lacks CORS.
//!
//! Blocked hosts answer 403, upstream failures 502/504, so clients can tell a
//! refused target from an unreachable one.

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::outbound::{ProxiedResponse, ProxyError};
use crate::AppState;

#[derive(Debug, Deserialize)]
struct ProxyQuery {
    url: String,
}

/// Relay the upstream status, content type and body unchanged
fn relay(upstream: ProxiedResponse) -> HttpResponse {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = HttpResponse::build(status);
    if let Some(content_type) = upstream.content_type {
        response.insert_header((header::CONTENT_TYPE, content_type));
    }
    response.body(upstream.body)
}

async fn proxy(data: web::Data<AppState>, query: web::Query<ProxyQuery>) -> HttpResponse {
    match data.proxy.fetch(&query.url).await {
        Ok(upstream) => relay(upstream),
        Err(ProxyError::InvalidUrl(e)) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Invalid url: {}", e)
        })),
        Err(ProxyError::Blocked(reason)) => HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Host not allowed",
            "reason": reason.to_string()
        })),
        Err(e @ ProxyError::Timeout(_)) => {
            log::error!("[PROXY] {} for {}", e, query.url);
            HttpResponse::GatewayTimeout().json(serde_json::json!({
                "error": format!("Upstream error: {}", e)
            }))
        }
        Err(e @ ProxyError::Upstream(_)) => {
            log::error!("[PROXY] {} for {}", e, query.url);
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": format!("Upstream error: {}", e)
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/proxy").route(web::get().to(proxy)));
}
