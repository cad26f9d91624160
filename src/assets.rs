//! Asset loading
//!
//! What kind of asset a path holds is inferred from its extension; loading
//! decodes eagerly and hands back typed errors. The store caches decoded
//! assets by path so everything can be preloaded at startup and looked up
//! cheaply after.

use std::collections::HashMap;
use std::path::Path;

use image::DynamicImage;
use kira::sound::static_sound::StaticSoundData;
use kira::sound::FromFileError;
use thiserror::Error;

/// What a path loads as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Audio,
}

/// A loaded asset
#[derive(Debug)]
pub enum Asset {
    Image(DynamicImage),
    Audio(StaticSoundData),
}

/// Errors from asset loading
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("unsupported asset type: {0}")]
    UnsupportedType(String),
    #[error("failed to load image: {path}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to load audio: {path}")]
    Audio {
        path: String,
        #[source]
        source: FromFileError,
    },
}

/// Infer the asset kind from a path's extension
///
/// `png`/`jpg`/`jpeg` are images, `mp3`/`wav` are audio, case-insensitive.
/// Anything else is unsupported.
pub fn kind_for_path(path: &str) -> Option<AssetKind> {
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" | "jpg" | "jpeg" => Some(AssetKind::Image),
        "mp3" | "wav" => Some(AssetKind::Audio),
        _ => None,
    }
}

/// Load a single asset, inferring its kind from the extension
pub fn load(path: &str) -> Result<Asset, AssetError> {
    match kind_for_path(path) {
        Some(AssetKind::Image) => image::open(path).map(Asset::Image).map_err(|source| {
            AssetError::Image {
                path: path.to_string(),
                source,
            }
        }),
        Some(AssetKind::Audio) => StaticSoundData::from_file(path)
            .map(Asset::Audio)
            .map_err(|source| AssetError::Audio {
                path: path.to_string(),
                source,
            }),
        None => Err(AssetError::UnsupportedType(path.to_string())),
    }
}

/// Path-keyed cache of decoded assets
#[derive(Default)]
pub struct AssetStore {
    images: HashMap<String, DynamicImage>,
    sounds: HashMap<String, StaticSoundData>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a path into the cache; already-cached paths are a no-op
    pub fn load_into(&mut self, path: &str) -> Result<AssetKind, AssetError> {
        if self.images.contains_key(path) {
            return Ok(AssetKind::Image);
        }
        if self.sounds.contains_key(path) {
            return Ok(AssetKind::Audio);
        }
        match load(path)? {
            Asset::Image(image) => {
                log::debug!("Loaded image asset {}", path);
                self.images.insert(path.to_string(), image);
                Ok(AssetKind::Image)
            }
            Asset::Audio(sound) => {
                log::debug!("Loaded audio asset {}", path);
                self.sounds.insert(path.to_string(), sound);
                Ok(AssetKind::Audio)
            }
        }
    }

    pub fn get_image(&self, path: &str) -> Option<&DynamicImage> {
        self.images.get(path)
    }

    pub fn get_sound(&self, path: &str) -> Option<&StaticSoundData> {
        self.sounds.get(path)
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.sounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inference_by_extension() {
        assert_eq!(kind_for_path("sprites/rabbit.png"), Some(AssetKind::Image));
        assert_eq!(kind_for_path("photo.jpg"), Some(AssetKind::Image));
        assert_eq!(kind_for_path("photo.JPEG"), Some(AssetKind::Image));
        assert_eq!(kind_for_path("sounds/chirp.mp3"), Some(AssetKind::Audio));
        assert_eq!(kind_for_path("sounds/rain.wav"), Some(AssetKind::Audio));

        assert_eq!(kind_for_path("notes.txt"), None);
        assert_eq!(kind_for_path("no_extension"), None);
    }

    #[test]
    fn test_unsupported_extension_is_an_error() {
        let err = load("config/settings.toml").unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedType(_)));
        assert!(err.to_string().contains("unsupported asset type"));
    }

    #[test]
    fn test_missing_image_fails_with_image_error() {
        let err = load("/nonexistent/missing_sprite.png").unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
    }

    #[test]
    fn test_missing_audio_fails_with_audio_error() {
        let err = load("/nonexistent/missing_chirp.wav").unwrap_err();
        assert!(matches!(err, AssetError::Audio { .. }));
    }

    #[test]
    fn test_store_misses_return_none() {
        let store = AssetStore::new();
        assert!(store.is_empty());
        assert!(store.get_image("anything.png").is_none());
        assert!(store.get_sound("anything.wav").is_none());
    }
}
