/// Convenience result type used across the thumbnail pipeline.
pub type ThumbnailResult<T> = Result<T, ThumbnailError>;

/// Top-level error taxonomy for a render request.
///
/// Every variant is fatal for the request that produced it: the pipeline never returns a partial
/// [`ImageResponse`](crate::ImageResponse).
#[derive(thiserror::Error, Debug)]
pub enum ThumbnailError {
    /// The namespace (or another process-level setting) could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid request input, such as a zero output size.
    #[error("validation error: {0}")]
    Validation(String),

    /// The external mesh exporter could not be launched or exited unsuccessfully.
    #[error("export error: {0}")]
    Export(String),

    /// A mesh or texture artifact was missing, unreadable or malformed.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// The rendered buffer could not be encoded to PNG.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbnailError {
    /// Build a [`ThumbnailError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ThumbnailError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThumbnailError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`ThumbnailError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`ThumbnailError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
