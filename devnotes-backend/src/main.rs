use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

use devnotes_backend::config::{self, Config};
use devnotes_backend::models::ProfileConfig;
use devnotes_backend::notes::NoteRepository;
use devnotes_backend::outbound::{HostGuard, OutboundProxy};
use devnotes_backend::{controllers, http, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    log::info!("Dev notes API v{}", env!("CARGO_PKG_VERSION"));

    let notes = NoteRepository::new(config.notes_dir.clone());
    let slugs = notes.list_slugs()?;
    log::info!("Notes directory: {:?} ({} files)", notes.notes_dir(), slugs.len());

    let profile_path = config::profile_path();
    let profile = ProfileConfig::load(&profile_path);
    log::info!("Profile: {} (from {:?})", profile.name, profile_path);

    let client = http::build_proxy_client(config.proxy_timeout)
        .map_err(|e| std::io::Error::other(format!("Failed to build HTTP client: {}", e)))?;
    let proxy = OutboundProxy::new(client, HostGuard::system(), config.proxy_timeout);
    log::info!("Outbound proxy timeout: {}s", config.proxy_timeout.as_secs());

    let web_dir = if config.web_dir.is_dir() {
        log::info!("Serving web UI from: {:?}", config.web_dir);
        Some(config.web_dir.clone())
    } else {
        log::warn!("Web directory {:?} not found - static file serving disabled", config.web_dir);
        None
    };

    let bind = (config.bind_addr.clone(), config.port);
    log::info!("Starting server on {}:{}", bind.0, bind.1);

    let state = web::Data::new(AppState {
        config,
        notes,
        proxy,
        profile,
    });

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::metadata::config)
            .configure(controllers::notes::config)
            .configure(controllers::proxy::config);

        // Static files last so API routes take precedence
        if let Some(dir) = &web_dir {
            app = app.service(Files::new("/", dir.clone()).index_file("index.html"));
        }

        app
    })
    .bind(bind)?
    .run()
    .await
}
