//! Notes REST API — read-only listing and raw note download.
//!
//! Disk access runs on the blocking pool so slow filesystems never stall
//! other requests.

use actix_web::{web, HttpResponse, Responder};

use crate::models::NotesListResponse;
use crate::AppState;

/// List published notes, newest first
async fn list_notes(data: web::Data<AppState>) -> impl Responder {
    let repo = data.notes.clone();
    let include_drafts = data.config.include_drafts;

    match web::block(move || repo.load_all(include_drafts)).await {
        Ok(Ok(notes)) => HttpResponse::Ok().json(NotesListResponse::from_notes(&notes)),
        Ok(Err(e)) => {
            log::error!("[NOTES] Failed to list notes in {:?}: {}", data.notes.notes_dir(), e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to read notes: {}", e)
            }))
        }
        Err(e) => {
            log::error!("[NOTES] Blocking task failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}

/// Serve the raw markdown of a note, frontmatter included
async fn get_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let slug = path.into_inner();
    let repo = data.notes.clone();

    match web::block(move || repo.read_raw(&slug)).await {
        Ok(Some(text)) => HttpResponse::Ok()
            .content_type("text/markdown; charset=utf-8")
            .body(text),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "detail": "Note not found"
        })),
        Err(e) => {
            log::error!("[NOTES] Blocking task failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .route("", web::get().to(list_notes))
            .route("/{slug}", web::get().to(get_note)),
    );
}
