//! Provider-specific constants

/// Default dimensionality of the null provider's vectors
pub const EMBEDDING_DIMENSION_NULL: usize = 64;

/// Default dimensionality of CLIP ViT-B/32 embeddings
pub const EMBEDDING_DIMENSION_CLIP: usize = 512;

/// Default CLIP model identifier
pub const CLIP_DEFAULT_MODEL: &str = "clip-vit-base-patch32";

/// Default base URL for the CLIP embedding service
pub const CLIP_DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds for HTTP providers
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Content-Type header value for JSON requests
pub const CONTENT_TYPE_JSON: &str = "application/json";
