use thiserror::Error;

/// Errors raised synchronously at construction time for a degenerate
/// primitive, camera, or transform. The teacher mixes `.expect()` panics
/// and ad-hoc `String` errors (`sdl::parse`'s `Result<Scene, String>`); we
/// standardize on typed `thiserror` errors for library code and keep
/// `.expect()` only in `main()`.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("image error: {0}")]
    Image(#[from] ImageError),
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("degenerate primitive: {0}")]
    DegeneratePrimitive(String),

    #[error("camera look vector is zero-length or parallel to the reference up axis")]
    DegenerateCameraLook,

    #[error("attempted to use a null medium for object {0:?}")]
    NullMedium(String),
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("unrecognized output extension: {0:?}")]
    UnknownFormat(String),

    #[error("I/O error writing image: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] image::ImageError),
}
