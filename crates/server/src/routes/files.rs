use crate::error::{ServerError, ServerResult};
use crate::extract::ClientAddr;
use crate::state::ServerState;
use axum::body::Body;
use axum::extract::{RawPathParams, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use docshelf::{decode_file_name, list_collection, Collection, FileEntry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

/// Name of the path parameter carrying the requested file.
pub const FILE_NAME_PARAM: &str = "file_name";

/// Listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FileEntry>,
}

/// `GET /allFiles`
pub async fn list_norms(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    list_files(&state, Collection::Norms).await
}

/// `GET /allKnowledgeBaseFiles`
pub async fn list_knowledge_base(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    list_files(&state, Collection::KnowledgeBase).await
}

/// `GET /file/Norms/{file_name}`
pub async fn serve_norms_file(
    State(state): State<Arc<ServerState>>,
    client: ClientAddr,
    params: RawPathParams,
) -> ServerResult<Response> {
    serve_file(&state, Collection::Norms, &client, &params).await
}

/// `GET /file/KnowledgeBase/{file_name}`
pub async fn serve_knowledge_base_file(
    State(state): State<Arc<ServerState>>,
    client: ClientAddr,
    params: RawPathParams,
) -> ServerResult<Response> {
    serve_file(&state, Collection::KnowledgeBase, &client, &params).await
}

async fn list_files(
    state: &ServerState,
    collection: Collection,
) -> ServerResult<Json<FileListResponse>> {
    match list_collection(&state.collections, collection).await {
        Ok(files) => Ok(Json(FileListResponse { files })),
        Err(err) => {
            tracing::error!(collection = %collection, error = %err, "failed to list collection");
            let context = match collection {
                Collection::Norms => "An error occurred while fetching files.".to_string(),
                other => format!(
                    "An error occurred while fetching {} files.",
                    other.display_name()
                ),
            };
            Err(ServerError::from_shelf(err, context))
        }
    }
}

async fn serve_file(
    state: &ServerState,
    collection: Collection,
    client: &ClientAddr,
    params: &RawPathParams,
) -> ServerResult<Response> {
    // Raw params are still percent-encoded; decoding happens once, in the core.
    let raw_name = params
        .iter()
        .find(|(key, _)| *key == FILE_NAME_PARAM)
        .map(|(_, value)| value)
        .ok_or_else(|| ServerError::BadRequest("Missing file name.".to_string()))?;

    let opened = match state.streamer.open(collection, raw_name, &client.0).await {
        Ok(opened) => opened,
        Err(err) => {
            let shown = decode_file_name(raw_name).unwrap_or_else(|_| raw_name.to_string());
            tracing::error!(
                collection = %collection,
                file = %shown,
                error = %err,
                "failed to serve file"
            );
            let context = format!(
                "An error occurred while reading the {tag} file ({tag}/{shown}).",
                tag = collection.tag()
            );
            return Err(ServerError::from_shelf(err, context));
        }
    };

    let disposition = HeaderValue::from_str(&opened.content_disposition).map_err(|err| {
        ServerError::internal("Invalid Content-Disposition header.", err.to_string())
    })?;
    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(opened.content_type),
        ),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    // Read errors after this point truncate the body; the status is already sent.
    let body = Body::from_stream(ReaderStream::new(opened.file));
    Ok((headers, body).into_response())
}
