use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use mintpack_core::mime::IMAGE_JPEG;
use mintpack_core::naming::{change_file_extension, JPEG_EXTENSION};
use mintpack_core::{Asset, Dimensions};
use std::io::Cursor;

use super::{DerivationError, DerivedAssetGenerator, RenditionOptions};

/// JPEG renditions produced with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRenditionGenerator;

impl ImageRenditionGenerator {
    pub fn new() -> Self {
        Self
    }

    fn render(data: &[u8], options: RenditionOptions) -> Result<(Vec<u8>, Dimensions), DerivationError> {
        let img = decode(data)?;
        let (width, height) = img.dimensions();
        let target = fit_within(width, height, options.max_width, options.max_height);

        let resized = if (target.width, target.height) == (width, height) {
            img
        } else {
            img.resize_exact(target.width, target.height, FilterType::Lanczos3)
        };

        let rgb = resized.to_rgb8();
        let quality = (options.quality * 100.0).round().clamp(1.0, 100.0) as u8;
        let estimated_size = (target.width * target.height) as usize / 4;
        let mut buffer = Vec::with_capacity(estimated_size);
        JpegEncoder::new_with_quality(&mut buffer, quality).encode_image(&rgb)?;

        Ok((buffer, target))
    }
}

#[async_trait]
impl DerivedAssetGenerator for ImageRenditionGenerator {
    async fn generate(
        &self,
        source: &Asset,
        options: &RenditionOptions,
    ) -> Result<Asset, DerivationError> {
        let start = std::time::Instant::now();
        let data = source.data.clone();
        let options = *options;

        // Decoding and encoding are CPU-bound; keep them off the async workers.
        let (buffer, dimensions) =
            tokio::task::spawn_blocking(move || Self::render(&data, options)).await??;

        tracing::debug!(
            file_name = %source.file_name,
            dimensions = %dimensions,
            size_bytes = buffer.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Rendition generated"
        );

        Ok(Asset::new(
            buffer,
            IMAGE_JPEG,
            change_file_extension(&source.file_name, JPEG_EXTENSION),
        )
        .with_dimensions(dimensions))
    }
}

/// Largest size that fits in `max_width`×`max_height` with the same aspect
/// ratio. Images already inside the box are never enlarged.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> Dimensions {
    if width <= max_width && height <= max_height {
        return Dimensions { width, height };
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    Dimensions {
        width: ((width as f64 * scale).round() as u32).max(1),
        height: ((height as f64 * scale).round() as u32).max(1),
    }
}

/// Pixel dimensions of an encoded image, or `None` if it cannot be decoded.
pub fn read_dimensions(data: &[u8]) -> Option<Dimensions> {
    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format().ok()?;
    let (width, height) = reader.into_dimensions().ok()?;
    Some(Dimensions { width, height })
}

fn decode(data: &[u8]) -> Result<DynamicImage, DerivationError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    Ok(reader.decode()?)
}
