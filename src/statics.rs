//! Static asset fallback.
//!
//! GET and HEAD requests that match no route are looked up under the public
//! directory. A directory path serves its `index.html`. Anything that would
//! climb out of the directory, or does not exist, is a 404.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::app::AppState;
use crate::method::Method;
use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::status::Status;

/// Router fallback serving files from [`AppState::public_dir`].
pub async fn serve(state: AppState, req: Request) -> Response {
    if !matches!(req.method(), Method::Get | Method::Head) {
        return Response::status(Status::NotFound);
    }
    let Some(path) = resolve(&state.public_dir, req.path()) else {
        return Response::status(Status::NotFound);
    };

    match read(&path).await {
        Ok(Some((body, file))) => Response::builder().bytes(content_type(&file), body),
        Ok(None) => Response::status(Status::NotFound),
        Err(e) => {
            warn!(path = %path.display(), "failed to read static file: {e}");
            Response::status(Status::InternalServerError)
        }
    }
}

/// Reads `path`, or `path/index.html` when `path` is a directory.
/// Returns the bytes and the file actually read.
async fn read(path: &Path) -> std::io::Result<Option<(Vec<u8>, PathBuf)>> {
    let file = match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => path.join("index.html"),
        Ok(_) => path.to_path_buf(),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    match tokio::fs::read(&file).await {
        Ok(body) => Ok(Some((body, file))),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Maps a URL path onto `root`. `None` for traversal attempts.
pub(crate) fn resolve(root: &Path, url_path: &str) -> Option<PathBuf> {
    let mut out = root.to_path_buf();
    for segment in url_path.split('/').filter(|s| !s.is_empty()) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => out.push(part),
            (Some(Component::CurDir), None) => {}
            _ => return None,
        }
    }
    Some(out)
}

fn content_type(file: &Path) -> ContentType {
    let ext = file.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => ContentType::Html,
        "css"          => ContentType::Css,
        "js" | "mjs"   => ContentType::Javascript,
        "json"         => ContentType::Json,
        "png"          => ContentType::Png,
        "svg"          => ContentType::Svg,
        "txt"          => ContentType::Text,
        _              => ContentType::OctetStream,
    }
}
