//! Crate error type.
//!
//! Only resource failures and bad startup constants are errors. A
//! zero-length surface normal is handled in place by skipping the pixel.

/// Fatal errors; any of these ends the process with a non-zero exit
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// SDL initialisation, window, canvas or event pump failure.
    #[error("SDL error: {0}")]
    Sdl(String),

    /// Streaming texture could not be created or updated.
    #[error("texture error: {0}")]
    Texture(String),

    /// A startup constant breaks an invariant the renderer relies on.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
