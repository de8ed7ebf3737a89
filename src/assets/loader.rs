use std::path::Path;

use image::RgbaImage;

use super::{
    decode_image, TextureChannel, TextureLoadError, TextureLoadErrorKind,
    TextureSet, TextureSetError,
};

/// Load all six maps from `root`, one worker thread per map.
///
/// Returns only after every worker finished. Metalness and roughness read
/// the same file independently.
///
/// # Errors
///
/// Returns [`TextureSetError`] naming every map that could not be read or
/// decoded.
pub fn load_texture_set(root: &Path) -> Result<TextureSet, TextureSetError> {
    log::info!("loading wood-board maps from {}", root.display());
    let results = std::thread::scope(|scope| {
        let workers: Vec<_> = TextureChannel::ALL
            .into_iter()
            .map(|channel| {
                let path = root.join(channel.file_name());
                let spawned = std::thread::Builder::new()
                    .name(format!("texture-{}", channel.label()))
                    .spawn_scoped(scope, move || load_one(channel, &path));
                (channel, spawned)
            })
            .collect();

        workers
            .into_iter()
            .map(|(channel, spawned)| {
                let source_path = root.join(channel.file_name()).display().to_string();
                let result = match spawned {
                    Ok(handle) => handle.join().unwrap_or_else(|_| {
                        Err(TextureLoadError {
                            channel,
                            source_path,
                            kind: TextureLoadErrorKind::Fetch(
                                "loader thread panicked".into(),
                            ),
                        })
                    }),
                    Err(e) => Err(TextureLoadError {
                        channel,
                        source_path,
                        kind: TextureLoadErrorKind::Io(e),
                    }),
                };
                (channel, result)
            })
            .collect::<Vec<_>>()
    });
    let set = TextureSet::assemble(results)?;
    log::info!("wood-board maps loaded");
    Ok(set)
}

fn load_one(
    channel: TextureChannel,
    path: &Path,
) -> Result<RgbaImage, TextureLoadError> {
    let error = |kind| TextureLoadError {
        channel,
        source_path: path.display().to_string(),
        kind,
    };
    let bytes = std::fs::read(path).map_err(|e| error(TextureLoadErrorKind::Io(e)))?;
    let image =
        decode_image(&bytes).map_err(|e| error(TextureLoadErrorKind::Decode(e)))?;
    log::debug!(
        "{} map decoded: {}x{}",
        channel.label(),
        image.width(),
        image.height()
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::test_support::png_bytes;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("woodbox-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_all(dir: &Path) {
        for channel in TextureChannel::ALL {
            std::fs::write(dir.join(channel.file_name()), png_bytes([90, 60, 30, 255]))
                .unwrap();
        }
    }

    #[test]
    fn loads_complete_directory() {
        let dir = temp_dir("complete");
        write_all(&dir);
        let set = load_texture_set(&dir).unwrap();
        for channel in TextureChannel::ALL {
            assert_eq!(set.image(channel).dimensions(), (2, 2));
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_reports_all_six() {
        let err = load_texture_set(Path::new("/nonexistent/woodbox/textures"))
            .unwrap_err();
        assert_eq!(err.channels(), TextureChannel::ALL.to_vec());
        assert!(matches!(err.failures[0].kind, TextureLoadErrorKind::Io(_)));
    }

    #[test]
    fn one_corrupt_map_fails_the_batch() {
        let dir = temp_dir("corrupt");
        write_all(&dir);
        std::fs::write(
            dir.join(TextureChannel::AmbientOcclusion.file_name()),
            b"garbage",
        )
        .unwrap();
        let err = load_texture_set(&dir).unwrap_err();
        assert_eq!(err.channels(), vec![TextureChannel::AmbientOcclusion]);
        assert!(matches!(
            err.failures[0].kind,
            TextureLoadErrorKind::Decode(_)
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
