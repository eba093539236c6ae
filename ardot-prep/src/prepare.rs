//! Resize reference images and write the manifest that indexes them.
//!
//! Files are handled one at a time in directory order. The first failure
//! aborts the run: images already written stay on disk, but the manifest is
//! only written once every file has been processed.

use std::fs;
use std::path::{Path, PathBuf};

use ardot_core::{Manifest, ReferenceEntry};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::config::PrepConfig;
use crate::error::{PrepError, Result};

/// Extensions accepted as reference images (compared case-insensitively)
const REFERENCE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PrepSummary {
    pub manifest: Manifest,
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
}

impl PrepSummary {
    pub fn processed(&self) -> usize {
        self.manifest.len()
    }
}

pub fn is_reference_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            REFERENCE_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// Output size for a `width` x `height` image scaled to `target_width`.
///
/// Width is exact (smaller images are scaled up); height keeps the aspect
/// ratio, rounded, and never drops below one pixel.
pub fn target_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    let scale = f64::from(target_width) / f64::from(width.max(1));
    let target_height = (f64::from(height) * scale).round().max(1.0) as u32;
    (target_width, target_height)
}

/// Reference images directly inside `dir`, in directory order
pub fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).map_err(PrepError::io(dir))? {
        let entry = entry.map_err(PrepError::io(dir))?;
        let path = entry.path();
        if path.is_file() && is_reference_image(&path) {
            sources.push(path);
        } else {
            log::debug!("skipping {}", path.display());
        }
    }
    Ok(sources)
}

/// Resize `input` to `target_width` and save it to `output`, returning the
/// written dimensions. The format follows `output`'s extension.
pub fn resize_image(input: &Path, output: &Path, target_width: u32) -> Result<(u32, u32)> {
    let image = image::open(input).map_err(PrepError::image(input))?;
    let (width, height) = image.dimensions();
    let (out_width, out_height) = target_dimensions(width, height, target_width);

    let resized = image.resize_exact(out_width, out_height, FilterType::Lanczos3);
    let format = ImageFormat::from_path(output).map_err(PrepError::image(output))?;
    // JPEG has no alpha channel
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        _ => resized,
    };
    resized
        .save_with_format(output, format)
        .map_err(PrepError::image(output))?;

    log::debug!(
        "{} ({width}x{height}) -> {} ({out_width}x{out_height})",
        input.display(),
        output.display()
    );
    Ok((out_width, out_height))
}

fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(PrepError::io(parent))?;
    }
    let json = manifest.to_json_pretty()?;
    fs::write(path, json).map_err(PrepError::io(path))
}

/// Resize every reference image and write the manifest
pub fn prepare(config: &PrepConfig) -> Result<PrepSummary> {
    config.validate()?;
    fs::create_dir_all(&config.output_dir).map_err(PrepError::io(&config.output_dir))?;

    let sources = collect_sources(&config.source_dir)?;
    log::info!(
        "found {} reference image(s) in {}",
        sources.len(),
        config.source_dir.display()
    );

    let mut manifest = Manifest::new();
    for input in &sources {
        let file_name = input
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PrepError::FileName(input.clone()))?;
        let output = config.output_dir.join(file_name);

        let (width, height) = resize_image(input, &output, config.target_width)?;
        log::info!("resized {file_name} to {width}x{height}");

        manifest.push(ReferenceEntry::for_file(file_name, &config.url_prefix));
    }

    write_manifest(&config.manifest_path, &manifest)?;

    Ok(PrepSummary {
        manifest,
        output_dir: config.output_dir.clone(),
        manifest_path: config.manifest_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{config_in, write_image, TempDir};

    #[test]
    fn test_is_reference_image() {
        for accepted in ["a.jpg", "b.JPEG", "c.png", "d.Bmp", "e.webp"] {
            assert!(is_reference_image(Path::new(accepted)), "{accepted}");
        }
        for rejected in ["notes.txt", "img.gif", "png", "archive.png.zip"] {
            assert!(!is_reference_image(Path::new(rejected)), "{rejected}");
        }
    }

    #[test]
    fn test_target_dimensions() {
        assert_eq!(target_dimensions(1200, 800, 600), (600, 400));
        assert_eq!(target_dimensions(300, 200, 600), (600, 400));
        assert_eq!(target_dimensions(1000, 333, 600), (600, 200));
        assert_eq!(target_dimensions(6000, 1, 600), (600, 1));
    }

    #[test]
    fn test_prepare_resizes_every_image() {
        let dir = TempDir::new("prepare-ok");
        let config = config_in(&dir);
        write_image(&config.source_dir.join("dog.png"), 1200, 900);
        write_image(&config.source_dir.join("cat.jpg"), 800, 533);
        write_image(&config.source_dir.join("bird.bmp"), 300, 150);
        std::fs::write(config.source_dir.join("README.txt"), "not an image").unwrap();

        let summary = prepare(&config).unwrap();
        assert_eq!(summary.processed(), 3);

        let written = Manifest::from_json(&std::fs::read_to_string(&config.manifest_path).unwrap()).unwrap();
        assert_eq!(written, summary.manifest);
        assert_eq!(written.get("dog.png").unwrap().url, "./references/dog.png");
        assert!(written.get("README.txt").is_none());

        for entry in written.iter() {
            let output = image::open(config.output_dir.join(&entry.name)).unwrap();
            let source = image::open(config.source_dir.join(&entry.name)).unwrap();
            let (width, height) = output.dimensions();
            let (src_width, src_height) = source.dimensions();

            assert!(width <= config.target_width);
            let expected = f64::from(src_height) * f64::from(width) / f64::from(src_width);
            assert!((f64::from(height) - expected).abs() <= 1.0, "{}", entry.name);
        }
    }

    #[test]
    fn test_corrupt_image_aborts_without_manifest() {
        let dir = TempDir::new("prepare-corrupt");
        let config = config_in(&dir);
        write_image(&config.source_dir.join("dog.png"), 640, 480);
        write_image(&config.source_dir.join("cat.png"), 640, 480);
        std::fs::write(config.source_dir.join("broken.png"), b"definitely not a png").unwrap();

        let err = prepare(&config).unwrap_err();
        match err {
            PrepError::Image { path, .. } => assert!(path.ends_with("broken.png")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!config.manifest_path.exists());
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = TempDir::new("prepare-missing");
        let mut config = config_in(&dir);
        config.source_dir = dir.path().join("nope");
        assert!(matches!(prepare(&config), Err(PrepError::Io { .. })));
    }

    #[test]
    fn test_empty_source_writes_empty_manifest() {
        let dir = TempDir::new("prepare-empty");
        let config = config_in(&dir);
        let summary = prepare(&config).unwrap();
        assert_eq!(summary.processed(), 0);
        assert_eq!(std::fs::read_to_string(&config.manifest_path).unwrap(), "[]");
    }
}
