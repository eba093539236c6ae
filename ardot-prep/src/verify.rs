//! Re-read the written manifest through the reference loader.

use std::path::PathBuf;

use ardot_core::{load_references, ImageDecoder, Manifest};
use futures::executor::block_on;
use image::{DynamicImage, GenericImageView};

use crate::config::PrepConfig;
use crate::error::{PrepError, Result};

/// Decodes manifest URLs from the directory they were published to
pub struct FsDecoder {
    url_prefix: String,
    dir: PathBuf,
}

impl FsDecoder {
    pub fn new(url_prefix: &str, dir: impl Into<PathBuf>) -> Self {
        Self {
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            dir: dir.into(),
        }
    }

    pub fn from_config(config: &PrepConfig) -> Self {
        Self::new(&config.url_prefix, &config.output_dir)
    }

    /// Map a manifest URL back to the file it was written to
    pub fn resolve(&self, url: &str) -> PathBuf {
        let relative = url
            .strip_prefix(self.url_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(url);
        self.dir.join(relative)
    }
}

impl ImageDecoder for FsDecoder {
    type Image = DynamicImage;
    type Error = PrepError;

    async fn decode(&self, url: &str) -> Result<DynamicImage> {
        let path = self.resolve(url);
        image::open(&path).map_err(PrepError::image(path))
    }
}

/// Check that every manifest entry decodes at the configured width
pub fn verify(config: &PrepConfig) -> Result<usize> {
    let json = std::fs::read_to_string(&config.manifest_path)
        .map_err(PrepError::io(&config.manifest_path))?;
    let manifest = Manifest::from_json(&json)?;

    let decoder = FsDecoder::from_config(config);
    let references = block_on(load_references(&manifest, &decoder)).into_references()?;

    for reference in &references {
        let (width, _) = reference.image.dimensions();
        if width != config.target_width {
            log::warn!(
                "{} is {width}px wide, expected {}",
                reference.name(),
                config.target_width
            );
        }
    }
    log::info!("verified {} reference image(s)", references.len());
    Ok(references.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepare::prepare;
    use crate::test_support::{config_in, write_image, TempDir};
    use ardot_core::ArError;

    #[test]
    fn test_resolve() {
        let decoder = FsDecoder::new("./references/", "public/references");
        assert_eq!(
            decoder.resolve("./references/dog.png"),
            PathBuf::from("public/references/dog.png")
        );
        assert_eq!(
            decoder.resolve("elsewhere/cat.png"),
            PathBuf::from("public/references/elsewhere/cat.png")
        );
    }

    #[test]
    fn test_verify_after_prepare() {
        let dir = TempDir::new("verify-ok");
        let config = config_in(&dir);
        write_image(&config.source_dir.join("dog.png"), 900, 600);
        write_image(&config.source_dir.join("cat.bmp"), 700, 700);

        prepare(&config).unwrap();
        assert_eq!(verify(&config).unwrap(), 2);
    }

    #[test]
    fn test_verify_names_missing_output() {
        let dir = TempDir::new("verify-missing");
        let config = config_in(&dir);
        write_image(&config.source_dir.join("dog.png"), 900, 600);
        prepare(&config).unwrap();
        std::fs::remove_file(config.output_dir.join("dog.png")).unwrap();

        match verify(&config) {
            Err(PrepError::Core(ArError::ReferenceLoad { name, .. })) => assert_eq!(name, "dog.png"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
