//! Wood-board material maps.
//!
//! The box material uses six maps. They are fetched as one batch: all six
//! requests run concurrently and the batch succeeds only when every map
//! decoded, otherwise a single [`TextureSetError`] lists every channel that
//! failed. Native builds read files on scoped worker threads
//! ([`load_texture_set`]); the browser build fetches over HTTP
//! (`fetch::fetch_texture_set`, `web` feature).

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod fetch;
#[cfg(not(target_arch = "wasm32"))]
mod loader;

use std::fmt;

use image::RgbaImage;
#[cfg(not(target_arch = "wasm32"))]
pub use loader::load_texture_set;

/// One material map of the wood-board set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    /// Albedo.
    BaseColor,
    /// Tangent-space normal map.
    Normal,
    /// Metalness (shares the roughness image).
    Metalness,
    /// Roughness.
    Roughness,
    /// Ambient occlusion.
    AmbientOcclusion,
    /// Height map driving vertex displacement.
    Displacement,
}

impl TextureChannel {
    /// All channels in binding order.
    pub const ALL: [Self; 6] = [
        Self::BaseColor,
        Self::Normal,
        Self::Metalness,
        Self::Roughness,
        Self::AmbientOcclusion,
        Self::Displacement,
    ];

    /// Position in [`Self::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// File name under the texture root.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::BaseColor => "wood-board-basecolor.png",
            Self::Normal => "wood-board-normal.png",
            Self::Metalness | Self::Roughness => "wood-board-roughness.png",
            Self::AmbientOcclusion => "wood-board-ambientOcclusion.png",
            Self::Displacement => "wood-board-height.png",
        }
    }

    /// Whether the map holds color (sampled as sRGB) rather than data.
    #[must_use]
    pub fn is_color(self) -> bool {
        self == Self::BaseColor
    }

    /// Short label for GPU resources and log lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BaseColor => "basecolor",
            Self::Normal => "normal",
            Self::Metalness => "metalness",
            Self::Roughness => "roughness",
            Self::AmbientOcclusion => "ambient-occlusion",
            Self::Displacement => "displacement",
        }
    }
}

/// Why a single map failed.
#[derive(Debug)]
pub enum TextureLoadErrorKind {
    /// The file could not be read.
    Io(std::io::Error),
    /// The bytes are not a decodable image.
    Decode(image::ImageError),
    /// The HTTP request failed or returned a non-success status.
    Fetch(String),
}

/// Failure of one map in a batch.
#[derive(Debug)]
pub struct TextureLoadError {
    /// Which map.
    pub channel: TextureChannel,
    /// Path or URL that was requested.
    pub source_path: String,
    /// What went wrong.
    pub kind: TextureLoadErrorKind,
}

impl fmt::Display for TextureLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.channel.label();
        let path = &self.source_path;
        match &self.kind {
            TextureLoadErrorKind::Io(e) => {
                write!(f, "{label} ({path}): read failed: {e}")
            }
            TextureLoadErrorKind::Decode(e) => {
                write!(f, "{label} ({path}): decode failed: {e}")
            }
            TextureLoadErrorKind::Fetch(msg) => {
                write!(f, "{label} ({path}): fetch failed: {msg}")
            }
        }
    }
}

impl std::error::Error for TextureLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            TextureLoadErrorKind::Io(e) => Some(e),
            TextureLoadErrorKind::Decode(e) => Some(e),
            TextureLoadErrorKind::Fetch(_) => None,
        }
    }
}

/// Aggregated failure of a texture batch: every map that did not load.
#[derive(Debug)]
pub struct TextureSetError {
    /// One entry per failed channel, in channel order.
    pub failures: Vec<TextureLoadError>,
}

impl TextureSetError {
    /// Channels that failed.
    #[must_use]
    pub fn channels(&self) -> Vec<TextureChannel> {
        self.failures.iter().map(|f| f.channel).collect()
    }
}

impl fmt::Display for TextureSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of 6 material maps failed", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "; {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TextureSetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let first = self.failures.first()?;
        Some(first)
    }
}

/// The six decoded maps.
#[derive(Debug, Clone)]
pub struct TextureSet {
    images: [RgbaImage; 6],
}

impl TextureSet {
    /// Decoded image of one channel.
    #[must_use]
    pub fn image(&self, channel: TextureChannel) -> &RgbaImage {
        &self.images[channel.index()]
    }

    /// Assemble a set from per-channel results (in any order). Every
    /// failure is kept; a channel missing from `results` is an error too.
    ///
    /// # Errors
    ///
    /// Returns [`TextureSetError`] listing every failed channel.
    pub fn assemble(
        results: Vec<(TextureChannel, Result<RgbaImage, TextureLoadError>)>,
    ) -> Result<Self, TextureSetError> {
        let mut slots: [Option<RgbaImage>; 6] = Default::default();
        let mut failures = Vec::new();
        for (channel, result) in results {
            match result {
                Ok(img) => slots[channel.index()] = Some(img),
                Err(e) => failures.push(e),
            }
        }
        for channel in TextureChannel::ALL {
            let failed = failures.iter().any(|f| f.channel == channel);
            if slots[channel.index()].is_none() && !failed {
                failures.push(TextureLoadError {
                    channel,
                    source_path: channel.file_name().to_owned(),
                    kind: TextureLoadErrorKind::Fetch("not requested".into()),
                });
            }
        }
        if !failures.is_empty() {
            failures.sort_by_key(|f| f.channel.index());
            for failure in &failures {
                log::error!("texture load failed: {failure}");
            }
            return Err(TextureSetError { failures });
        }

        // Every slot is filled once no failure was recorded.
        Ok(Self {
            images: slots.map(Option::unwrap_or_default),
        })
    }
}

/// Decode encoded image bytes into RGBA8.
///
/// # Errors
///
/// Returns [`image::ImageError`] if the format is unsupported or the data
/// is corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Join a texture root (directory or URL prefix) and a channel file name.
#[must_use]
pub fn channel_path(root: &str, channel: TextureChannel) -> String {
    if root.is_empty() {
        return channel.file_name().to_owned();
    }
    format!("{}/{}", root.trim_end_matches('/'), channel.file_name())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    /// A tiny PNG for loader tests.
    pub(crate) fn png_bytes(color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 2, Rgba(color));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(channel: TextureChannel) -> (TextureChannel, Result<RgbaImage, TextureLoadError>) {
        (channel, Ok(RgbaImage::new(1, 1)))
    }

    fn failed(
        channel: TextureChannel,
    ) -> (TextureChannel, Result<RgbaImage, TextureLoadError>) {
        (
            channel,
            Err(TextureLoadError {
                channel,
                source_path: channel.file_name().to_owned(),
                kind: TextureLoadErrorKind::Fetch("404".into()),
            }),
        )
    }

    #[test]
    fn assemble_complete_batch_in_any_order() {
        let mut results: Vec<_> =
            TextureChannel::ALL.into_iter().map(ok).collect();
        results.reverse();
        let set = TextureSet::assemble(results).unwrap();
        assert_eq!(set.image(TextureChannel::Normal).dimensions(), (1, 1));
    }

    #[test]
    fn assemble_reports_every_failure() {
        let results = vec![
            ok(TextureChannel::BaseColor),
            failed(TextureChannel::Displacement),
            ok(TextureChannel::Normal),
            failed(TextureChannel::Normal),
            ok(TextureChannel::Metalness),
            ok(TextureChannel::Roughness),
        ];
        let err = TextureSet::assemble(results).unwrap_err();
        assert_eq!(
            err.channels(),
            vec![
                TextureChannel::Normal,
                TextureChannel::AmbientOcclusion,
                TextureChannel::Displacement,
            ]
        );
        assert!(err.to_string().starts_with("3 of 6 material maps failed"));

        let first = std::error::Error::source(&err).unwrap();
        assert!(first.to_string().contains("wood-board-normal.png"));
    }

    #[test]
    fn metalness_and_roughness_share_a_file() {
        assert_eq!(
            TextureChannel::Metalness.file_name(),
            TextureChannel::Roughness.file_name()
        );
        assert!(TextureChannel::BaseColor.is_color());
        assert!(!TextureChannel::Normal.is_color());
    }

    #[test]
    fn channel_paths_join_cleanly() {
        assert_eq!(
            channel_path("/textures/wood-board/", TextureChannel::Displacement),
            "/textures/wood-board/wood-board-height.png"
        );
        assert_eq!(
            channel_path("", TextureChannel::BaseColor),
            "wood-board-basecolor.png"
        );
    }

    #[test]
    fn decode_round_trips_png() {
        let bytes = test_support::png_bytes([10, 20, 30, 255]);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);
        assert!(decode_image(b"not an image").is_err());
    }
}
