//! ServerBuilder for fluent API to build the gateway

use super::registry::{ScreenDescriptor, ScreenRegistry};
use super::router::build_common_routes;
use crate::client::api::ApiClient;
use crate::client::source::{RecordSource, RestSource};
use crate::config::{AppConfig, ScreenConfig};
use crate::core::error::ConfigError;
use crate::core::record::Record;
use crate::list::view::ListSpec;
use crate::screens::{
    Booking, Coupon, NoFilter, Review, ScreenFilter, ScreenService, Tour, TourFilter, bookings,
    coupons, reviews, tours,
};
use anyhow::Result;
use axum::Router;
use axum::http::HeaderValue;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for the list gateway
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::load(Some("tourdesk.yaml"))?;
/// ServerBuilder::from_config(&config)?
///     .serve(&config.server.bind)
///     .await?;
/// ```
pub struct ServerBuilder {
    registry: ScreenRegistry,
    custom_routes: Vec<Router>,
    cors_origins: Vec<String>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with no screens
    pub fn new() -> Self {
        Self {
            registry: ScreenRegistry::new(),
            custom_routes: Vec::new(),
            cors_origins: Vec::new(),
        }
    }

    /// Register every screen named in `config`, loading from its backend
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.check()?;
        let client = ApiClient::new(&config.api)?;

        let mut builder = Self::new().with_cors_origins(config.server.cors_origins.clone());
        for (name, screen) in &config.screens {
            let source = RestSource::new(client.clone(), screen.path.clone());
            builder = builder.register_configured(name, screen, source)?;
            tracing::debug!(screen = %name, path = %screen.path, "screen configured");
        }
        Ok(builder)
    }

    /// Register a screen service
    pub fn register_screen<R, F>(mut self, screen: ScreenService<R, F>) -> Self
    where
        R: Record,
        F: ScreenFilter<R>,
    {
        self.registry.register(Arc::new(screen));
        self
    }

    /// Register any screen descriptor
    pub fn register(mut self, screen: Arc<dyn ScreenDescriptor>) -> Self {
        self.registry.register(screen);
        self
    }

    /// Add custom routes to the gateway
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Restrict CORS to these origins; any origin when empty
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Names of the registered screens
    pub fn screen_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let mut app = build_common_routes(self.registry.infos()).merge(self.registry.build_routes());

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(cors_layer(&self.cors_origins)?)
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the gateway with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let screens = self.screen_names().join(",");
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(%screens, "Gateway listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Gateway shutdown complete");
        Ok(())
    }

    fn register_configured(
        self,
        name: &str,
        config: &ScreenConfig,
        source: RestSource,
    ) -> Result<Self> {
        let builder = match name {
            reviews::NAME => self.register_screen(configured::<Review, NoFilter>(
                reviews::spec(),
                config,
                Arc::new(source),
            )?),
            bookings::NAME => self.register_screen(configured::<Booking, NoFilter>(
                bookings::spec(),
                config,
                Arc::new(source),
            )?),
            coupons::NAME => self.register_screen(configured::<Coupon, NoFilter>(
                coupons::spec(),
                config,
                Arc::new(source),
            )?),
            tours::NAME => self.register_screen(configured::<Tour, TourFilter>(
                tours::spec(),
                config,
                Arc::new(source),
            )?),
            other => {
                return Err(ConfigError::Invalid(format!("unknown screen '{}'", other)).into());
            }
        };
        Ok(builder)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply per-screen configuration on top of the screen's built-in `ListSpec`
///
/// `default_sort` must name one of the record's sortable fields.
fn configured<R, F>(
    spec: ListSpec,
    config: &ScreenConfig,
    source: Arc<dyn RecordSource<R>>,
) -> Result<ScreenService<R, F>, ConfigError>
where
    R: Record,
    F: ScreenFilter<R>,
{
    let mut spec = spec.with_page_size(config.page_size);
    if let Some(field) = &config.default_sort {
        if !R::is_sortable(field) {
            return Err(ConfigError::Invalid(format!(
                "screen '{}': cannot sort on '{}' (allowed: {})",
                spec.name,
                field,
                R::sortable_fields().join(", ")
            )));
        }
        spec.default_sort_field = field.clone();
    }
    if let Some(fields) = &config.search_fields {
        spec.search_fields = fields.clone();
    }
    Ok(ScreenService::new(spec, source))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    if origins.is_empty() {
        return Ok(layer.allow_origin(AllowOrigin::any()));
    }

    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::Invalid(format!("invalid CORS origin: {}", e)))?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
