// Bank Clients Viewer - Web Server
// List route `/`, detail route `/clientes/:id`, JSON API under `/api`

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bank_clients::parser::parse_int;
use bank_clients::{
    load_detail, Config, Customer, HttpSheetSource, ListView, LoadStatus, SheetSource,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    source: Arc<dyn SheetSource>,
    page_size: usize,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Query string of the list endpoint.
///
/// Everything is taken as text so a malformed value never trips the
/// extractor; `page` is read like an integer cell.
#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    search: String,
    page: Option<String>,
    all: Option<String>,
}

impl ListQuery {
    fn page(&self) -> Option<usize> {
        self.page
            .as_deref()
            .and_then(parse_int)
            .map(|page| usize::try_from(page).unwrap_or(1))
    }

    fn wants_all(&self) -> bool {
        matches!(self.all.as_deref(), Some("true") | Some("1"))
    }
}

/// The whole customer sheet, for clients that search and paginate locally
#[derive(Serialize)]
struct CustomerList {
    items: Vec<Customer>,
    page_size: usize,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/customers?search=&page= - One page of the filtered list
/// GET /api/customers?all=true - Every customer plus the page size
async fn list_customers(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let mut view = ListView::new(state.page_size);
    view.load(state.source.as_ref()).await;

    if let LoadStatus::Failed(message) = view.status() {
        return (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::<()>::err(format!("Erro ao carregar clientes: {}", message))),
        )
            .into_response();
    }

    if query.wants_all() {
        let list = CustomerList {
            items: view.customers().to_vec(),
            page_size: view.page_size(),
        };
        return (StatusCode::OK, Json(ApiResponse::ok(list))).into_response();
    }

    view.search(&query.search);
    if let Some(page) = query.page() {
        view.go_to_page(page);
    }

    (StatusCode::OK, Json(ApiResponse::ok(view.current_page()))).into_response()
}

/// GET /api/customers/:id - Customer with accounts and branch
async fn get_customer(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match load_detail(state.source.as_ref(), &id).await {
        Ok(Some(detail)) => (StatusCode::OK, Json(ApiResponse::ok(detail))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::err(format!("Cliente não encontrado: {}", id))),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(customer_id = %id, error = %e, "Error loading customer detail");
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<()>::err(format!(
                    "Erro ao carregar detalhes do cliente: {}",
                    e
                ))),
            )
                .into_response()
        }
    }
}

/// GET / - Serve list page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /clientes/:id - Serve detail page (reads the id from its own URL)
async fn serve_detail() -> impl IntoResponse {
    Html(include_str!("../web/detail.html"))
}

fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/customers", get(list_customers))
        .route("/customers/:id", get(get_customer))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .route("/clientes/:id", get(serve_detail))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bank_clients=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let source = HttpSheetSource::new(config.clone())?;

    let state = AppState {
        source: Arc::new(source),
        page_size: config.page_size,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "🚀 Server running");
    tracing::info!("   List:   http://{}/", config.bind_addr);
    tracing::info!("   API:    http://{}/api/customers", config.bind_addr);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
