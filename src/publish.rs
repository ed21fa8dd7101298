//! The daily publishing pipeline.
//!
//! Strictly sequential, with a fixed pause between stages:
//!
//! ```text
//! 1. Generate  category → Post          (ContentGenerator)
//! 2. Caption   Post     → caption        (ContentGenerator)
//! 3. Render    Post     → post.png       (render::render_post)
//! 4. Upload    post.png + caption        (Uploader)
//! ```
//!
//! Content generation and upload sit behind traits so the pipeline can run
//! against mocks in tests and against [`crate::openai`] in production. There
//! is no retry: the first failing stage ends the run.

use crate::post::{Post, PostError};
use crate::render::{RenderError, RenderReport};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Model returned no content")]
    EmptyResponse,
    #[error("Invalid post: {0}")]
    Post(#[from] PostError),
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Content generation failed: {0}")]
    Generate(#[from] GenerateError),
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Secrets read from the environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Key for the content-generation API.
    pub api_key: String,
    /// Social account the post is published to. Handed to the
    /// [`Uploader`]; the outbox names it in the delivery notice so the
    /// external poster knows which account to sign in to.
    pub username: Option<String>,
    /// Password for `username`, only ever passed on to the uploader.
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    /// Read `OPENAI_API_KEY` (required), `IG_USERNAME` and `IG_PASSWORD`.
    pub fn from_env() -> Result<Self, PublishError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PublishError> {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Ok(Self {
            api_key: present("OPENAI_API_KEY")
                .ok_or_else(|| PublishError::MissingEnv("OPENAI_API_KEY".into()))?,
            username: present("IG_USERNAME"),
            password: present("IG_PASSWORD"),
        })
    }
}

/// Produces post content and captions.
pub trait ContentGenerator {
    fn generate_post(&self, category: &str) -> Result<Post, GenerateError>;

    fn create_caption(&self, post: &Post) -> Result<String, GenerateError>;
}

/// Publishes a rendered image with its caption.
pub trait Uploader {
    fn upload(
        &self,
        image: &Path,
        caption: &str,
        credentials: &Credentials,
    ) -> Result<(), PublishError>;
}

/// Uploader that drops the image and caption into a local directory.
///
/// Files are named after the image: `post.png` is copied as `post.png` and
/// the caption is written next to it as `post.txt`. A poster watching the
/// directory does the actual upload; the password is never written out.
pub struct OutboxUploader {
    dir: PathBuf,
}

impl OutboxUploader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Uploader for OutboxUploader {
    fn upload(
        &self,
        image: &Path,
        caption: &str,
        credentials: &Credentials,
    ) -> Result<(), PublishError> {
        let name = image
            .file_name()
            .ok_or_else(|| PublishError::Upload(format!("not a file: {}", image.display())))?;
        std::fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(name);
        std::fs::copy(image, &target)?;
        std::fs::write(target.with_extension("txt"), caption)?;
        log::info!(
            "Delivered {} to {} for account {}",
            name.to_string_lossy(),
            self.dir.display(),
            credentials.username.as_deref().unwrap_or("<unset>")
        );
        Ok(())
    }
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub category: String,
    pub post: Post,
    pub caption: String,
    pub report: RenderReport,
}

/// Run the pipeline once.
///
/// `render` turns the generated post into an image file; in production it is
/// [`render_post`](crate::render::render_post) bound to the loaded config.
pub fn publish(
    category: &str,
    generator: &impl ContentGenerator,
    render: impl FnOnce(&Post) -> Result<RenderReport, RenderError>,
    uploader: &impl Uploader,
    credentials: &Credentials,
    pause: Duration,
) -> Result<PublishOutcome, PublishError> {
    log::info!("Generating post for category '{category}'");
    let post = generator.generate_post(category)?;
    std::thread::sleep(pause);

    log::info!("Creating caption for '{}'", post.title);
    let caption = generator.create_caption(&post)?;
    std::thread::sleep(pause);

    log::info!("Rendering image");
    let report = render(&post)?;
    std::thread::sleep(pause);

    log::info!("Uploading {}", report.output.display());
    uploader.upload(&report.output, &caption, credentials)?;

    Ok(PublishOutcome {
        category: category.to_string(),
        post,
        caption,
        report,
    })
}
