use image::imageops::FilterType;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::{
    slot::{LoadedImage, SlotTicket},
    view::ImageLoader,
};

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("image request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Fetches row images over HTTP on a tokio runtime.
///
/// Each `load` spawns one independent task; there is no bound on how many
/// run at once and they complete in any order.
#[derive(Clone)]
pub struct HttpImageLoader {
    http: Client,
    runtime: Handle,
    target_box: Option<(u32, u32)>,
}

impl HttpImageLoader {
    pub fn new(runtime: Handle) -> Self {
        Self::with_http(runtime, Client::new())
    }

    pub fn with_http(runtime: Handle, http: Client) -> Self {
        Self {
            http,
            runtime,
            target_box: None,
        }
    }

    /// Centre-crop every image to `width` x `height` pixels.
    pub fn with_target_box(mut self, width: u32, height: u32) -> Self {
        self.target_box = Some((width, height));
        self
    }
}

impl ImageLoader for HttpImageLoader {
    fn load(&self, url: &str, ticket: SlotTicket) {
        let http = self.http.clone();
        let target_box = self.target_box;
        let url = url.to_string();
        self.runtime.spawn(async move {
            match fetch_image(&http, &url, target_box).await {
                Ok(image) => {
                    if !ticket.fulfil(image) {
                        debug!(%url, "row rebound before image arrived; dropping it");
                    }
                }
                Err(error) => {
                    if ticket.fail(error.to_string()) {
                        warn!(%url, %error, "image load failed");
                    } else {
                        debug!(%url, %error, "row rebound before image failed; dropping it");
                    }
                }
            }
        });
    }
}

async fn fetch_image(
    http: &Client,
    url: &str,
    target_box: Option<(u32, u32)>,
) -> Result<LoadedImage, ImageLoadError> {
    let bytes = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(decode_image(&bytes, target_box)?)
}

pub fn decode_image(
    bytes: &[u8],
    target_box: Option<(u32, u32)>,
) -> Result<LoadedImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let fitted = match target_box {
        Some((width, height)) => decoded.resize_to_fill(width, height, FilterType::Triangle),
        None => decoded,
    };
    let rgba = fitted.to_rgba8();
    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
#[path = "tests/image_loader_tests.rs"]
mod tests;
