//! Image operations used by the synchronizer.

use crate::error::{PackerError, Result};
use crate::resource_pack::probe;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, ImageFormat};
use std::path::Path;

/// The image operations tile synchronization depends on.
pub trait SpriteTools {
    /// Cut a spritesheet into `tile_size` squares, row by row, writing
    /// `<index>.png` into `out_dir` starting at `start_index`.
    ///
    /// Returns the written file names in slice order.
    fn slice(
        &self,
        sheet: &Path,
        tile_size: u32,
        start_index: u32,
        out_dir: &Path,
    ) -> Result<Vec<String>>;

    /// Whether two images have the same dimensions and identical pixels.
    fn images_equal(&self, a: &Path, b: &Path) -> Result<bool>;

    /// Losslessly shrink every PNG in a directory.
    ///
    /// Returns the number of files rewritten.
    fn optimize_dir(&self, dir: &Path) -> Result<usize>;
}

/// [`SpriteTools`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSpriteTools;

impl SpriteTools for ImageSpriteTools {
    fn slice(
        &self,
        sheet: &Path,
        tile_size: u32,
        start_index: u32,
        out_dir: &Path,
    ) -> Result<Vec<String>> {
        let img = image::open(sheet)?;
        let (width, height) = (img.width(), img.height());

        if tile_size == 0
            || width == 0
            || height == 0
            || width % tile_size != 0
            || height % tile_size != 0
        {
            return Err(PackerError::InvalidSpritesheet {
                path: sheet.display().to_string(),
                reason: format!(
                    "{}x{} is not a multiple of the {}px tile size",
                    width, height, tile_size
                ),
            });
        }

        let mut names = Vec::new();
        let mut index = start_index;
        for row in 0..height / tile_size {
            for col in 0..width / tile_size {
                let tile = img.crop_imm(col * tile_size, row * tile_size, tile_size, tile_size);
                let name = format!("{}.png", index);
                tile.save_with_format(out_dir.join(&name), ImageFormat::Png)?;
                names.push(name);
                index += 1;
            }
        }

        Ok(names)
    }

    fn images_equal(&self, a: &Path, b: &Path) -> Result<bool> {
        // 16 bits per channel holds every PNG sample depth without loss.
        let a = image::open(a)?.to_rgba16();
        let b = image::open(b)?.to_rgba16();
        Ok(a.dimensions() == b.dimensions() && a.as_raw() == b.as_raw())
    }

    fn optimize_dir(&self, dir: &Path) -> Result<usize> {
        let listing = probe(dir)?;
        let mut rewritten = 0;

        for name in listing.with_extension("png") {
            let path = dir.join(name);
            let original = std::fs::read(&path)?;
            let encoded = encode_best(&original)?;

            // Keep the smaller file so a second pass is a no-op.
            if encoded.len() < original.len() {
                std::fs::write(&path, &encoded)?;
                rewritten += 1;
            }
        }

        Ok(rewritten)
    }
}

/// Re-encode PNG bytes with maximum compression, keeping the color type.
fn encode_best(data: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory_with_format(data, ImageFormat::Png)?;

    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    encoder.write_image(
        img.as_bytes(),
        img.width(),
        img.height(),
        img.color().into(),
    )?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};

    fn sheet(cols: u32, rows: u32) -> RgbaImage {
        RgbaImage::from_fn(cols * 16, rows * 16, |x, y| {
            Rgba([(x / 16) as u8 * 40, (y / 16) as u8 * 40, 7, 255])
        })
    }

    #[test]
    fn test_slice_row_major() {
        let dir = tempfile::tempdir().unwrap();
        let sheet_path = dir.path().join("sheet.png");
        sheet(3, 2).save(&sheet_path).unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();

        let names = ImageSpriteTools.slice(&sheet_path, 16, 1, &out).unwrap();
        assert_eq!(
            names,
            vec!["1.png", "2.png", "3.png", "4.png", "5.png", "6.png"]
        );

        // 4.png is the first tile of the second row.
        let tile = image::open(out.join("4.png")).unwrap().to_rgba8();
        assert_eq!(tile.dimensions(), (16, 16));
        assert_eq!(tile.get_pixel(0, 0), &Rgba([0, 40, 7, 255]));

        let tile = image::open(out.join("3.png")).unwrap().to_rgba8();
        assert_eq!(tile.get_pixel(15, 15), &Rgba([80, 0, 7, 255]));
    }

    #[test]
    fn test_slice_rejects_partial_tiles() {
        let dir = tempfile::tempdir().unwrap();
        let sheet_path = dir.path().join("sheet.png");
        RgbaImage::new(20, 16).save(&sheet_path).unwrap();

        let result = ImageSpriteTools.slice(&sheet_path, 16, 0, dir.path());
        assert!(matches!(result, Err(PackerError::InvalidSpritesheet { .. })));
    }

    #[test]
    fn test_images_equal_ignores_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let rgb = dir.path().join("rgb.png");
        let rgba = dir.path().join("rgba.png");
        let other = dir.path().join("other.png");

        RgbImage::from_pixel(16, 16, Rgb([10, 20, 30])).save(&rgb).unwrap();
        RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255])).save(&rgba).unwrap();
        let mut changed = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        changed.put_pixel(3, 9, Rgba([10, 20, 31, 255]));
        changed.save(&other).unwrap();

        assert_ne!(std::fs::read(&rgb).unwrap(), std::fs::read(&rgba).unwrap());
        assert!(ImageSpriteTools.images_equal(&rgb, &rgba).unwrap());
        assert!(!ImageSpriteTools.images_equal(&rgba, &other).unwrap());

        // 16-bit tiles that differ only in the low byte of a sample.
        let deep = dir.path().join("deep.png");
        let deep_changed = dir.path().join("deep_changed.png");
        let deep_widened = dir.path().join("deep_widened.png");
        ImageBuffer::from_pixel(16, 16, Rgba([0x1200u16, 0, 0, u16::MAX]))
            .save(&deep)
            .unwrap();
        ImageBuffer::from_pixel(16, 16, Rgba([0x1201u16, 0, 0, u16::MAX]))
            .save(&deep_changed)
            .unwrap();
        ImageBuffer::from_pixel(16, 16, Rgba([10u16 * 257, 20 * 257, 30 * 257, u16::MAX]))
            .save(&deep_widened)
            .unwrap();

        assert!(!ImageSpriteTools.images_equal(&deep, &deep_changed).unwrap());
        assert!(ImageSpriteTools.images_equal(&deep, &deep).unwrap());
        assert!(ImageSpriteTools.images_equal(&rgb, &deep_widened).unwrap());
    }

    #[test]
    fn test_images_equal_checks_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("small.png");
        let wide = dir.path().join("wide.png");
        RgbaImage::new(16, 16).save(&small).unwrap();
        RgbaImage::new(32, 8).save(&wide).unwrap();

        assert!(!ImageSpriteTools.images_equal(&small, &wide).unwrap());
    }

    #[test]
    fn test_optimize_is_lossless_and_stable() {
        let dir = tempfile::tempdir().unwrap();
        sheet(4, 4).save(dir.path().join("0.png")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        let before = image::open(dir.path().join("0.png")).unwrap().to_rgba8();

        ImageSpriteTools.optimize_dir(dir.path()).unwrap();
        let after = image::open(dir.path().join("0.png")).unwrap().to_rgba8();
        assert_eq!(before, after);

        let bytes = std::fs::read(dir.path().join("0.png")).unwrap();
        assert_eq!(ImageSpriteTools.optimize_dir(dir.path()).unwrap(), 0);
        assert_eq!(std::fs::read(dir.path().join("0.png")).unwrap(), bytes);
    }
}
