//! Scratch directories and fixture images for tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{Rgb, RgbImage};

use crate::config::PrepConfig;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A directory under the system temp dir, removed on drop
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(label: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "ardot-prep-{label}-{}-{id}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Config rooted in `dir` with an existing, empty source directory
pub fn config_in(dir: &TempDir) -> PrepConfig {
    let config = PrepConfig {
        source_dir: dir.path().join("references-source"),
        output_dir: dir.path().join("public/references"),
        manifest_path: dir.path().join("public/references.json"),
        ..PrepConfig::default()
    };
    std::fs::create_dir_all(&config.source_dir).unwrap();
    config
}

/// Write a gradient image; the format follows the extension
pub fn write_image(path: &Path, width: u32, height: u32) {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    image.save(path).unwrap();
}
