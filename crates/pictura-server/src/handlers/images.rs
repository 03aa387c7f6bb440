//! Corpus image serving

use crate::state::AppState;
use rocket::fs::NamedFile;
use rocket::{State, get};
use std::path::{Component, PathBuf};

/// Serve a corpus image by filename.
///
/// GET /images/<filename>
///
/// The segment guard already rejects `..`; the component check below also
/// refuses absolute paths and anything that is not a plain filename.
#[get("/<filename..>")]
pub async fn serve_image(state: &State<AppState>, filename: PathBuf) -> Option<NamedFile> {
    if filename
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    NamedFile::open(state.images_dir.join(filename)).await.ok()
}
