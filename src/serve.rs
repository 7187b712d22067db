//! Local HTTP server for the rendered page.
//!
//! The page and its graph payload are rendered once at startup and served
//! as immutable bytes.

use crate::error::{Result, VizError};
use crate::graph::{to_json, VizGraph};
use crate::pipeline::{render_schema, visualize};
use crate::schema::SchemaGraph;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use log::info;

/// Default listen address
pub const DEFAULT_ADDR: &str = "127.0.0.1:3002";

#[derive(Clone)]
struct PageState {
    page: Bytes,
    graph_json: Bytes,
}

/// Serves one rendered schema page
#[derive(Clone)]
pub struct PageServer {
    state: PageState,
}

impl PageServer {
    /// Serve an already rendered page together with its graph
    pub fn new(page: Vec<u8>, graph: &VizGraph) -> Result<Self> {
        Ok(Self {
            state: PageState {
                page: Bytes::from(page),
                graph_json: Bytes::from(to_json(graph)?),
            },
        })
    }

    /// Render the page for a schema graph and serve it
    pub fn from_schema(graph: &SchemaGraph) -> Result<Self> {
        let page = render_schema(graph)?;
        Self::new(page, &visualize(graph))
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handle_page))
            .route("/schema-viz.html", get(handle_page))
            .route("/graph.json", get(handle_graph))
            .with_state(self.state.clone())
    }

    /// Serve until interrupted with Ctrl-C
    pub async fn run(self, addr: &str) -> Result<()> {
        let serve_err = |source: std::io::Error| VizError::Serve {
            addr: addr.to_string(),
            source,
        };

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(serve_err)?;
        info!(
            "Serving schema page on http://{}",
            listener.local_addr().map_err(serve_err)?
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(serve_err)
    }

    /// Run the server on a fresh tokio runtime, blocking the caller
    pub fn run_blocking(self, addr: &str) -> Result<()> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|source| VizError::Serve {
                addr: addr.to_string(),
                source,
            })?
            .block_on(self.run(addr))
    }
}

async fn handle_page(State(state): State<PageState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        state.page,
    )
}

async fn handle_graph(State(state): State<PageState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], state.graph_json)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
