//! Library API twin
//!
//! Serves the same three endpoints as the remote Library service from an
//! in-memory map so the harness can run without network access.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock, task::JoinHandle};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

pub const ADDED_MESSAGE: &str = "successfully added";
pub const ALREADY_EXISTS_MESSAGE: &str =
    "Add Book operation failed, looks like the book already exists";
pub const NOT_FOUND_MESSAGE: &str = "The book by requested bookid / author name does not exists!";
pub const DELETED_MESSAGE: &str = "book is successfully deleted";
pub const DELETE_FAILED_MESSAGE: &str =
    "Delete Book operation failed, looks like the book doesnt exists";

/// A book as the service stores and returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBook {
    pub book_name: String,
    pub isbn: String,
    pub aisle: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub isbn: String,
    pub aisle: String,
    pub name: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookRequest {
    #[serde(rename = "ID")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct GetBookQuery {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "AuthorName")]
    pub author_name: Option<String>,
}

/// Shared book table, keyed by `isbn + aisle`
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    books: Arc<RwLock<im::HashMap<String, StoredBook>>>,
}

impl LibraryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.books.read().await.contains_key(id)
    }
}

/// Routes of the Library API
pub fn router(state: LibraryState) -> Router {
    Router::new()
        .route("/Library/Addbook.php", post(add_book))
        .route("/Library/GetBook.php", get(get_book))
        .route("/Library/DeleteBook.php", post(delete_book))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr`, serve in the background and return the bound address
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn spawn(
    addr: SocketAddr,
    state: LibraryState,
) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router(state)).await {
            error!("library twin stopped: {e}");
        }
    });
    Ok((local, handle))
}

async fn add_book(State(state): State<LibraryState>, Json(req): Json<AddBookRequest>) -> Response {
    let id = format!("{}{}", req.isbn, req.aisle);
    let mut books = state.books.write().await;

    if books.contains_key(&id) {
        debug!(%id, "duplicate add rejected");
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "msg": ALREADY_EXISTS_MESSAGE })),
        )
            .into_response();
    }

    books.insert(
        id.clone(),
        StoredBook {
            book_name: req.name,
            isbn: req.isbn,
            aisle: req.aisle,
            author: req.author,
        },
    );
    debug!(%id, total = books.len(), "book added");
    (StatusCode::OK, Json(json!({ "Msg": ADDED_MESSAGE, "ID": id }))).into_response()
}

async fn get_book(
    State(state): State<LibraryState>,
    Query(query): Query<GetBookQuery>,
) -> Response {
    let books = state.books.read().await;

    let found: Vec<StoredBook> = match (&query.id, &query.author_name) {
        (Some(id), _) => books.get(id).cloned().into_iter().collect(),
        (None, Some(author)) => books
            .values()
            .filter(|b| &b.author == author)
            .cloned()
            .collect(),
        (None, None) => Vec::new(),
    };

    if found.is_empty() {
        return (StatusCode::NOT_FOUND, Json(json!({ "msg": NOT_FOUND_MESSAGE }))).into_response();
    }
    (StatusCode::OK, Json(found)).into_response()
}

async fn delete_book(
    State(state): State<LibraryState>,
    Json(req): Json<DeleteBookRequest>,
) -> Response {
    let mut books = state.books.write().await;

    match books.remove(&req.id) {
        Some(_) => {
            debug!(id = %req.id, "book deleted");
            (StatusCode::OK, Json(json!({ "msg": DELETED_MESSAGE }))).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "msg": DELETE_FAILED_MESSAGE })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn call(app: Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let response = app.oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Ok((status, body))
    }

    fn post_json(path: &str, body: &Value) -> anyhow::Result<Request<Body>> {
        Ok(Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?)
    }

    fn book() -> Value {
        json!({ "isbn": "12345678", "aisle": "Fiction", "name": "T", "author": "A" })
    }

    #[tokio::test]
    async fn test_add_returns_composite_id() -> anyhow::Result<()> {
        let state = LibraryState::new();
        let request = post_json("/Library/Addbook.php", &book())?;
        let (status, body) = call(router(state.clone()), request).await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "Msg": "successfully added", "ID": "12345678Fiction" }));
        assert!(state.contains("12345678Fiction").await);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_add_is_rejected() -> anyhow::Result<()> {
        let state = LibraryState::new();
        call(router(state.clone()), post_json("/Library/Addbook.php", &book())?).await?;
        let request = post_json("/Library/Addbook.php", &book())?;
        let (status, body) = call(router(state.clone()), request).await?;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], ALREADY_EXISTS_MESSAGE);
        assert_eq!(state.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_then_delete_lifecycle() -> anyhow::Result<()> {
        let state = LibraryState::new();
        call(router(state.clone()), post_json("/Library/Addbook.php", &book())?).await?;

        let get = Request::get("/Library/GetBook.php?ID=12345678Fiction").body(Body::empty())?;
        let (status, body) = call(router(state.clone()), get).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["book_name"], "T");

        let delete = json!({ "ID": "12345678Fiction" });
        let request = post_json("/Library/DeleteBook.php", &delete)?;
        let (status, body) = call(router(state.clone()), request).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], DELETED_MESSAGE);

        let request = post_json("/Library/DeleteBook.php", &delete)?;
        let (status, _) = call(router(state.clone()), request).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let get = Request::get("/Library/GetBook.php?ID=12345678Fiction").body(Body::empty())?;
        let (status, body) = call(router(state.clone()), get).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], NOT_FOUND_MESSAGE);
        assert!(state.is_empty().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_author_name() -> anyhow::Result<()> {
        let state = LibraryState::new();
        call(router(state.clone()), post_json("/Library/Addbook.php", &book())?).await?;

        let get = Request::get("/Library/GetBook.php?AuthorName=A").body(Body::empty())?;
        let (status, body) = call(router(state), get).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_by_extractor() -> anyhow::Result<()> {
        let request = Request::post("/Library/Addbook.php")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))?;
        let (status, _) = call(router(LibraryState::new()), request).await?;
        assert!(status.is_client_error());
        Ok(())
    }
}
