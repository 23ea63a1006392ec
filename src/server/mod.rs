//! JSON API server for the reader-facing app

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tower_http::trace::TraceLayer;

use crate::content::{AboutLoader, GlobSource, Post, PostLoader, WatchHandle};
use crate::posts::{filter_posts_by_tag, filter_published_posts, find_related_posts, tag_counts, tag_query};
use crate::theme::{current_decoration, Decoration, Theme, ThemeState};
use crate::Blog;

/// Server state
pub struct ServerState {
    loader: Arc<PostLoader<GlobSource>>,
    about: AboutLoader,
    theme: Mutex<ThemeState>,
    /// Latest polled posts; `None` loads on every request
    snapshot: RwLock<Option<Vec<Post>>>,
    related_limit: usize,
}

impl ServerState {
    pub fn new(blog: &Blog) -> Self {
        Self {
            loader: Arc::new(blog.post_loader()),
            about: blog.about_loader(),
            theme: Mutex::new(ThemeState::load(blog.theme_store())),
            snapshot: RwLock::new(None),
            related_limit: blog.config.related_limit,
        }
    }

    /// All posts, newest first
    async fn posts(&self) -> Vec<Post> {
        let snapshot = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match snapshot {
            Some(posts) => posts,
            None => self.loader.load_all_posts().await,
        }
    }

    fn replace_snapshot(&self, posts: Vec<Post>) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(posts);
    }

    async fn published_post(&self, slug: &str) -> Option<(Post, Vec<Post>)> {
        let published = filter_published_posts(&self.posts().await);
        let post = published.iter().find(|post| post.slug == slug)?.clone();
        Some((post, published))
    }

    /// Keep the snapshot fresh by polling the post sources
    async fn start_polling(self: &Arc<Self>, blog: &Blog) -> WatchHandle {
        self.replace_snapshot(self.loader.load_all_posts().await);

        let state = Arc::clone(self);
        self.loader
            .clone()
            .watch_for_changes(blog.config.watch.interval(), move |posts| {
                tracing::debug!("Refreshed {} posts", posts.len());
                state.replace_snapshot(posts);
            })
    }
}

/// Build the API router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/posts/:slug/related", get(related_posts))
        .route("/api/tags", get(list_tags))
        .route("/api/about", get(about_page))
        .route("/api/theme", get(get_theme).put(set_theme))
        .route("/api/theme/toggle", post(toggle_theme))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(blog));

    // Keep the handle alive for as long as the server runs
    let _poller = if watch {
        Some(state.start_polling(blog).await)
    } else {
        None
    };

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!(
            "Polling for post changes every {:?}",
            blog.config.watch.interval()
        );
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    (status, Json(json!({ "error": message.to_string() }))).into_response()
}

#[derive(Debug, Deserialize)]
pub struct TagFilter {
    tag: Option<String>,
}

async fn list_posts(
    State(state): State<Arc<ServerState>>,
    Query(filter): Query<TagFilter>,
) -> Json<Vec<Post>> {
    let posts = state.posts().await;
    let tag = filter.tag.as_deref().filter(|tag| !tag.trim().is_empty());
    Json(filter_posts_by_tag(&posts, tag))
}

async fn get_post(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    match state.published_post(&slug).await {
        Some((post, _)) => Json(post).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Post not found"),
    }
}

async fn related_posts(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.published_post(&slug).await {
        Some((post, published)) => {
            Json(find_related_posts(&post, &published, state.related_limit)).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "Post not found"),
    }
}

#[derive(Debug, Serialize)]
pub struct TagSummary {
    tag: String,
    count: usize,
    link: String,
}

async fn list_tags(State(state): State<Arc<ServerState>>) -> Json<Vec<TagSummary>> {
    let published = filter_published_posts(&state.posts().await);
    let tags = tag_counts(&published)
        .into_iter()
        .map(|(tag, count)| TagSummary {
            link: tag_query(&tag),
            tag,
            count,
        })
        .collect();
    Json(tags)
}

async fn about_page(State(state): State<Arc<ServerState>>) -> Response {
    match state.about.load_about_page().await {
        Ok(page) => Json(page).into_response(),
        Err(e) => {
            tracing::error!("Failed to load about page: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    theme: Theme,
    decoration: Option<Decoration>,
}

impl ThemeResponse {
    fn new(theme: Theme) -> Self {
        Self {
            theme,
            decoration: current_decoration(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    theme: String,
}

async fn get_theme(State(state): State<Arc<ServerState>>) -> Json<ThemeResponse> {
    let theme = state
        .theme
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .current();
    Json(ThemeResponse::new(theme))
}

async fn set_theme(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ThemeRequest>,
) -> Response {
    let result = state
        .theme
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .set(&request.theme);
    match result {
        Ok(theme) => Json(ThemeResponse::new(theme)).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e),
    }
}

async fn toggle_theme(State(state): State<Arc<ServerState>>) -> Json<ThemeResponse> {
    let theme = state
        .theme
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .toggle();
    Json(ThemeResponse::new(theme))
}
