use super::{FeedData, FeedFetcher};
use anyhow::{Context, Result};
use async_trait::async_trait;
use image::imageops::FilterType;
use reqwest::Client;
use tracing::debug;

/// Largest side an avatar is resized to, whatever the config asks for.
pub const MAX_AVATAR_SIZE: u32 = 256;

/// A downscaled avatar as rows of RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    pub pixels: Vec<Vec<[u8; 3]>>,
    pub width: u32,
    pub height: u32,
}

impl AvatarImage {
    /// Decodes any format the `image` crate understands and resizes it so
    /// the longer side is `target_size` (clamped to `1..=MAX_AVATAR_SIZE`),
    /// keeping the aspect ratio.
    pub fn from_bytes(bytes: &[u8], target_size: u32) -> Result<Self> {
        let img = image::load_from_memory(bytes).context("Failed to decode avatar image")?;

        let (original_width, original_height) = (img.width().max(1), img.height().max(1));
        let target_size = target_size.clamp(1, MAX_AVATAR_SIZE);

        let (width, height) = if original_width > original_height {
            let ratio = original_height as f64 / original_width as f64;
            (target_size, ((target_size as f64 * ratio) as u32).max(1))
        } else {
            let ratio = original_width as f64 / original_height as f64;
            (((target_size as f64 * ratio) as u32).max(1), target_size)
        };

        let rgb = img
            .resize_exact(width, height, FilterType::Nearest)
            .to_rgb8();

        let pixels = (0..height)
            .map(|y| (0..width).map(|x| rgb.get_pixel(x, y).0).collect())
            .collect();

        Ok(Self {
            pixels,
            width,
            height,
        })
    }
}

pub struct AvatarFetcher {
    url: String,
    size: u32,
    client: Client,
}

impl AvatarFetcher {
    pub fn new(url: String, size: u32, client: Client) -> Self {
        Self { url, size, client }
    }
}

#[async_trait]
impl FeedFetcher for AvatarFetcher {
    async fn fetch(&self) -> Result<FeedData> {
        debug!(url = %self.url, "downloading avatar");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to download avatar")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Avatar download error: {}", response.status()));
        }

        let bytes = response.bytes().await.context("Failed to read avatar body")?;
        let image = AvatarImage::from_bytes(&bytes, self.size)?;
        Ok(FeedData::Avatar(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_square_avatar_resized() {
        let avatar = AvatarImage::from_bytes(&png(64, 64), 16).unwrap();
        assert_eq!((avatar.width, avatar.height), (16, 16));
        assert_eq!(avatar.pixels.len(), 16);
        assert_eq!(avatar.pixels[0][0], [255, 0, 0]);
        assert_eq!(avatar.pixels[0][15], [0, 0, 255]);
    }

    #[test]
    fn test_wide_avatar_keeps_aspect() {
        let avatar = AvatarImage::from_bytes(&png(80, 40), 20).unwrap();
        assert_eq!((avatar.width, avatar.height), (20, 10));
    }

    #[test]
    fn test_oversized_target_is_clamped() {
        let avatar = AvatarImage::from_bytes(&png(64, 32), 70_000).unwrap();
        assert_eq!((avatar.width, avatar.height), (MAX_AVATAR_SIZE, 128));
        assert_eq!(avatar.pixels.len(), 128);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(AvatarImage::from_bytes(b"not an image", 16).is_err());
    }
}
