//! HTTP request handlers
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | `/api/health` | GET | Engine readiness and index size |
//! | `/api/search/text` | POST | Text query against the image corpus |
//! | `/api/search/image` | POST | Image query (base64) against the corpus |
//! | `/images/<filename>` | GET | Serve a corpus image file |

mod error;
pub mod health;
mod images;
mod search;

pub use error::{ApiError, ErrorResponse};
pub use images::serve_image;
pub use search::{HitResponse, SearchResponse, search_image, search_text};
