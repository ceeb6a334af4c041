// API server implementation using actix-web

use crate::api::{handlers, middleware, routes};
use crate::config::MovieConfig;
use crate::movies::MovieService;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

pub struct ApiServer {
    config: MovieConfig,
}

impl ApiServer {
    pub fn new(config: MovieConfig) -> Self {
        Self { config }
    }

    /// Start the HTTP server. Returns once SIGINT/SIGTERM has drained in-flight requests.
    pub async fn run(self, service: MovieService) -> Result<()> {
        let bind_addr = self.config.bind_addr();

        tracing::info!(
            host = %self.config.host,
            port = %self.config.port,
            default_limit = service.default_limit(),
            "Starting movie API server"
        );

        let service = web::Data::new(service);
        let allowed_origins = self.config.allowed_origins.clone();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(allowed_origins.as_deref());

            App::new()
                .app_data(service.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(cors)
                .configure(routes::configure_routes)
                .default_service(web::to(handlers::route_not_found))
        })
        .shutdown_timeout(30)
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        tracing::info!("Server closed");
        Ok(())
    }
}
