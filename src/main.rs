//! Demo server for the tiny-router crate.
//!
//! Registers a handful of movie and article routes and serves them.

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    Json,
};
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;

use tiny_router::config::{load_config, AppConfig};
use tiny_router::http::middleware::{access_log, request_id, Compose, Middleware};
use tiny_router::observability::{logging, metrics};
use tiny_router::{BoxHandler, HttpServer, RequestParamsExt, RouteError, RouteTable};

#[derive(Parser)]
#[command(name = "tiny-router")]
#[command(about = "Demo server for the tiny-router request router", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Redirect trailing-slash-only matches with a 303.
    #[arg(long)]
    redirect_trailing_slash: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if cli.redirect_trailing_slash {
        config.router.redirect_trailing_slash = true;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("tiny-router v0.1.0 starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let router = build_routes()?.into_router(config.router.clone());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    HttpServer::new(router).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_routes() -> Result<RouteTable, RouteError> {
    let stack = Compose::new().with(request_id()).with(access_log());
    let mut table = RouteTable::new();

    table.get(
        "/movie/:id/genre/action",
        stack.wrap(BoxHandler::new(get_movie)),
    )?;
    table.post("/movie", stack.wrap(BoxHandler::new(create_movie)))?;

    table.group("/articles", |articles| {
        articles.post("/*wild", stack.wrap(BoxHandler::new(create_article)))?;
        articles.get("/search", stack.wrap(BoxHandler::new(search_articles)))?;

        articles.group("/:articlesId", |article| {
            article.get("/", stack.wrap(BoxHandler::new(get_article)))?;
            article.put("/", stack.wrap(BoxHandler::new(update_article)))?;
            article.delete("/", stack.wrap(BoxHandler::new(delete_article)))?;
            Ok(())
        })?;
        Ok(())
    })?;

    Ok(table)
}

async fn get_movie(req: Request<Body>) -> impl IntoResponse {
    Json(json!({ "id": req.param("id"), "genre": "action" }))
}

async fn create_movie(_req: Request<Body>) -> impl IntoResponse {
    (StatusCode::CREATED, "inserted movie")
}

async fn create_article(req: Request<Body>) -> impl IntoResponse {
    (StatusCode::CREATED, format!("inserted article {}", req.param("wild")))
}

async fn search_articles(_req: Request<Body>) -> impl IntoResponse {
    "searching articles"
}

async fn get_article(req: Request<Body>) -> impl IntoResponse {
    format!("article {}", req.param("articlesId"))
}

async fn update_article(req: Request<Body>) -> impl IntoResponse {
    format!("updated article {}", req.param("articlesId"))
}

async fn delete_article(req: Request<Body>) -> impl IntoResponse {
    format!("deleted article {}", req.param("articlesId"))
}
