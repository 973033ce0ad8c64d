use axum::{http::HeaderValue, middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::agenda::{Caller, Clock};
use crate::config::AppConfig;
use crate::database::AgendaStore;
use crate::handlers;
use crate::middleware::resolve_profile_middleware;
use crate::permissions::{AnonymousAccess, PermissionProfile};

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AgendaStore>,
    pub jwt_secret: Arc<str>,
    pub anonymous: AnonymousAccess,
    pub clock: Clock,
    pub default_limit: i64,
    pub max_limit: Option<i64>,
}

impl AppState {
    pub fn new(store: Arc<dyn AgendaStore>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
            anonymous: AnonymousAccess::Deny,
            clock: Clock::System,
            default_limit: 100,
            max_limit: None,
        }
    }

    pub fn from_config(store: Arc<dyn AgendaStore>, config: &AppConfig) -> Self {
        let anonymous = if config.security.anonymous_read {
            AnonymousAccess::Passthrough
        } else {
            AnonymousAccess::Deny
        };

        Self {
            anonymous,
            default_limit: config.filter.default_limit,
            max_limit: config.filter.max_limit,
            ..Self::new(store, config.security.jwt_secret.as_str())
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_anonymous(mut self, anonymous: AnonymousAccess) -> Self {
        self.anonymous = anonymous;
        self
    }

    pub fn caller<'a>(&self, profile: Option<&'a PermissionProfile>) -> Caller<'a> {
        Caller { profile, anonymous: self.anonymous }
    }
}

/// Full router. `cors` of `None` disables CORS; an empty origin list allows any origin.
pub fn app(state: AppState, cors: Option<&[String]>, request_logging: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Profile-scoped API
        .merge(api_routes(state.clone()));

    let router = match cors {
        Some(origins) => router.layer(cors_layer(origins)),
        None => router,
    };

    let router = if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    use handlers::{agenda, auth};

    Router::new()
        .route("/api/agenda/dados", get(agenda::dados_get))
        .route("/api/agenda/semaforo-fatal", get(agenda::semaforo_get))
        .route("/api/agenda/grafico/:dimensao", get(agenda::grafico_get))
        .route("/api/agenda/filtros", get(agenda::filtros_get))
        .route("/api/agenda/metricas", get(agenda::metricas_get))
        .route("/api/auth/whoami", get(auth::whoami_get))
        .route_layer(from_fn_with_state(state, resolve_profile_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
