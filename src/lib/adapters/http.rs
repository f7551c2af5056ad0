use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

#[cfg(feature = "tracing")]
use tracing::{error, info, warn};

use crate::core::{CreateTodo, Todo, TodoError, UpdateTodo, DEFAULT_ORDER, DEFAULT_SORT};
use crate::service::TodoService;
use crate::storage::TodoStore;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

pub struct AppState<S: TodoStore> {
    pub todo_service: Arc<TodoService<S>>,
}

impl<S: TodoStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            todo_service: Arc::clone(&self.todo_service),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            TodoError::InvalidSortField(_) => {
                (StatusCode::BAD_REQUEST, "Invalid sort field".to_string())
            }
            TodoError::InvalidSortOrder(_) => {
                (StatusCode::BAD_REQUEST, "Invalid order".to_string())
            }
            TodoError::InvalidField { .. } => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            TodoError::NotFound(_) => (StatusCode::NOT_FOUND, "Todo not found".to_string()),
            TodoError::SchemaUnreachable(_) | TodoError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        #[cfg(feature = "tracing")]
        {
            if self.is_client_error() {
                warn!(error = %self, "Rejected request");
            } else {
                error!(error = %self, "Request failed");
            }
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_order")]
    pub order: String,
    pub assignee: Option<String>,
}

fn default_sort() -> String {
    DEFAULT_SORT.to_string()
}

fn default_order() -> String {
    DEFAULT_ORDER.to_string()
}

pub async fn list_todos<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Todo>>, TodoError> {
    let todos = state
        .todo_service
        .list_todos(&params.sort, &params.order, params.assignee.as_deref())
        .await?;
    Ok(Json(todos))
}

pub async fn get_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, TodoError> {
    Ok(Json(state.todo_service.get_todo(id).await?))
}

pub async fn create_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Json(body): Json<CreateTodo>,
) -> Result<Json<Todo>, TodoError> {
    Ok(Json(state.todo_service.create_todo(body).await?))
}

pub async fn update_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTodo>,
) -> Result<Json<Todo>, TodoError> {
    Ok(Json(state.todo_service.update_todo(id, body).await?))
}

pub async fn delete_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, TodoError> {
    state.todo_service.delete_todo(id).await?;
    Ok(Json(json!({ "ok": true })))
}

async fn health_route() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {origin:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    // Wildcards are not allowed together with credentials, so methods and
    // headers are mirrored from the preflight instead.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn router<S: TodoStore + 'static>(
    todo_service: TodoService<S>,
    config: &HttpConfig,
) -> anyhow::Result<Router> {
    let state = AppState {
        todo_service: Arc::new(todo_service),
    };

    let router = Router::new()
        .route("/health", get(health_route))
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route(
            "/todos/{id}",
            get(get_todo::<S>)
                .put(update_todo::<S>)
                .delete(delete_todo::<S>),
        )
        .with_state(state)
        .layer(cors_layer(&config.cors_origins)?);

    #[cfg(feature = "tracing")]
    let router = router.layer(tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request<_>| {
            let uri = request.uri().to_string();
            tracing::info_span!("http_request", method = ?request.method(), uri)
        },
    ));

    Ok(router)
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn bind(router: Router, addr: SocketAddr) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to listen on {addr}"))?;
        Ok(Self { router, listener })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn run(self) -> anyhow::Result<()> {
        #[cfg(feature = "tracing")]
        {
            if let Ok(addr) = self.listener.local_addr() {
                info!(addr = %addr, "HTTP server started");
            }
        }
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("received error from running server")?;
        #[cfg(feature = "tracing")]
        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    #[cfg(feature = "tracing")]
    info!("Shutdown signal received");
}
