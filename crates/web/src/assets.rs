//! Static files and the not-found fallback.

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use salvo::prelude::*;
use serde_json::json;
use tracing::error;

use crate::extensions::*;

/// Page served for `/` and for unknown non-API paths.
pub(crate) const INDEX_VIEW: &str = "index.html";

/// Page served for the sign-in redirect.
pub(crate) const CALLBACK_VIEW: &str = "callback.html";

/// Files under the assets root.
#[derive(Debug, Clone)]
pub(crate) struct Assets {
    root: PathBuf,
}

impl Assets {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of `relative` under the root; `None` when it would escape it.
    pub(crate) fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let mut resolved = self.root.clone();

        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        (resolved != self.root).then_some(resolved)
    }

    /// Contents of `Views/{name}`.
    pub(crate) async fn view(&self, name: &str) -> io::Result<String> {
        tokio::fs::read_to_string(self.root.join("Views").join(name)).await
    }

    async fn file(&self, relative: &str) -> Option<PathBuf> {
        let path = self.resolve(relative)?;

        tokio::fs::metadata(&path)
            .await
            .ok()
            .filter(std::fs::Metadata::is_file)
            .map(|_metadata| path)
    }
}

fn is_api_path(path: &str) -> bool {
    path == "api" || path.starts_with("api/")
}

/// Serves static files; unknown API paths get a JSON 404, anything else the index page.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            return;
        }
    };

    let path = req.param::<String>("path").unwrap_or_default();

    if is_api_path(&path) {
        res.status_code(StatusCode::NOT_FOUND);
        res.render(Json(json!({ "error": "Not Found" })));
        return;
    }

    if let Some(file) = state.assets.file(&path).await {
        res.send_file(file, req.headers()).await;
        return;
    }

    match state.assets.view(INDEX_VIEW).await {
        Ok(page) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Text::Html(page));
        }
        Err(source) => {
            error!("failed to read index page: {source}");

            res.render(StatusError::not_found());
        }
    }
}
