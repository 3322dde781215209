//! Cover thumbnails, downloaded in the background and kept for the session.
//!
//! Thumbnails never touch the search state. A failed download simply means
//! the card is drawn without an image. Only bytes that decode as an image
//! are ever handed to the renderer.

use eframe::egui;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{self, Read};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Covers are small; anything bigger is not a thumbnail
const MAX_THUMBNAIL_BYTES: u64 = 2 * 1024 * 1024;

type FetchError = Box<dyn std::error::Error + Send + Sync>;
type Fetcher = Arc<dyn Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync>;
type Job = Box<dyn FnOnce() + Send + 'static>;
type Spawner = fn(Job) -> io::Result<()>;

#[derive(Debug, Clone)]
enum Thumb {
    Loading,
    Ready(Arc<[u8]>),
    Failed,
}

pub struct ThumbnailCache {
    entries: Arc<Mutex<HashMap<String, Thumb>>>,
    fetcher: Fetcher,
    spawn: Spawner,
}

impl ThumbnailCache {
    pub fn new(user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(20))
            .user_agent(user_agent)
            .build();
        Self::with_fetcher(Arc::new(move |url: &str| fetch_bytes(&agent, url)))
    }

    fn with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            fetcher,
            spawn: spawn_download,
        }
    }

    /// Image bytes for `url` if downloaded. Starts the download on first use.
    pub fn get(&self, url: &str, ctx: &egui::Context) -> Option<Arc<[u8]>> {
        let mut entries = self.entries.lock();
        match entries.get(url) {
            Some(Thumb::Ready(bytes)) => return Some(Arc::clone(bytes)),
            Some(Thumb::Loading) | Some(Thumb::Failed) => return None,
            None => {}
        }
        entries.insert(url.to_string(), Thumb::Loading);
        drop(entries);

        let entries = Arc::clone(&self.entries);
        let fetcher = Arc::clone(&self.fetcher);
        let ctx = ctx.clone();
        let job_url = url.to_string();
        let spawned = (self.spawn)(Box::new(move || {
            let thumb = match fetcher(&job_url).and_then(decoded) {
                Ok(bytes) => Thumb::Ready(bytes.into()),
                Err(e) => {
                    tracing::debug!(url = %job_url, error = %e, "thumbnail download failed");
                    Thumb::Failed
                }
            };
            entries.lock().insert(job_url, thumb);
            ctx.request_repaint();
        }));

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "could not start thumbnail thread");
            self.entries.lock().insert(url.to_string(), Thumb::Failed);
        }
        None
    }
}

fn spawn_download(job: Job) -> io::Result<()> {
    thread::Builder::new()
        .name("booksearch-thumbnail".to_string())
        .spawn(job)
        .map(|_| ())
}

/// Keep `bytes` only if they decode as an image
fn decoded(bytes: Vec<u8>) -> Result<Vec<u8>, FetchError> {
    image::load_from_memory(&bytes)?;
    Ok(bytes)
}

fn is_image_type(content_type: &str) -> bool {
    content_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// Read at most `limit` bytes; a longer body is an error, not a truncated image
fn read_capped(reader: impl Read, limit: u64) -> Result<Vec<u8>, FetchError> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(format!("thumbnail larger than {} bytes", limit).into());
    }
    Ok(bytes)
}

fn fetch_bytes(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>, FetchError> {
    let resp = agent.get(url).call().map_err(|e| e.to_string())?;
    if !is_image_type(resp.content_type()) {
        return Err(format!("not an image: {}", resp.content_type()).into());
    }
    read_capped(resp.into_reader(), MAX_THUMBNAIL_BYTES)
}
