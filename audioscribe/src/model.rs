use std::io::Write;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::Model;
use crate::error::{Error, Result};
use crate::output;

/// Where whisper.cpp ggml weights are published.
const MODEL_REPO_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Smallest plausible ggml file. A response under this is a failed transfer
/// or an HTML error body, not model weights.
const MIN_MODEL_BYTES: u64 = 1_000_000;

/// Make sure the requested model exists on disk, fetching it on first use.
/// Returns the path to the weights file.
pub async fn ensure_model(model: &Model, cache_dir: &Path) -> Result<PathBuf> {
    if let Model::Custom(path) = model {
        return if path.exists() {
            Ok(path.clone())
        } else {
            Err(Error::ModelNotFound { path: path.clone() })
        };
    }

    let dest = cache_dir.join(model.filename());
    if dest.exists() {
        info!(path = %dest.display(), "using cached model");
        return Ok(dest);
    }

    std::fs::create_dir_all(cache_dir).map_err(|e| {
        Error::Model(format!(
            "cannot create model cache {}: {e}",
            cache_dir.display()
        ))
    })?;

    let url = format!("{MODEL_REPO_URL}/{}", model.filename());
    info!(model = model.name(), %url, "fetching model");
    fetch_model(&url, &dest).await?;
    info!(path = %dest.display(), "model ready");

    Ok(dest)
}

/// Stream the weights into a sibling `.part` file, validate the size, and
/// move the file into place. Same all-or-nothing shape as the transcript
/// write: a failed fetch leaves nothing at `dest`.
async fn fetch_model(url: &str, dest: &Path) -> Result<()> {
    let response = reqwest::get(url)
        .await?
        .error_for_status()
        .map_err(|e| Error::ModelDownload(e.to_string()))?;

    let expected = response.content_length();
    let bar = fetch_bar(expected.unwrap_or(0), &display_name(dest));

    let tmp = output::part_path(dest);
    if let Err(e) = stream_to_file(response, &tmp, &bar).await {
        std::fs::remove_file(&tmp).ok();
        return Err(e);
    }

    let received = std::fs::metadata(&tmp)?.len();
    if received < MIN_MODEL_BYTES {
        std::fs::remove_file(&tmp).ok();
        return Err(Error::ModelDownload(format!(
            "server sent {received} bytes for {url}, which is not a model file"
        )));
    }
    if let Some(expected) = expected {
        if expected != received {
            warn!(expected, received, "model size differs from Content-Length");
        }
    }

    std::fs::rename(&tmp, dest)?;
    bar.finish_and_clear();
    Ok(())
}

async fn stream_to_file(response: reqwest::Response, tmp: &Path, bar: &ProgressBar) -> Result<()> {
    let mut file = std::fs::File::create(tmp)?;
    let mut stream = response.bytes_stream();
    let mut received: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        received += chunk.len() as u64;
        bar.set_position(received);
    }

    file.flush()?;
    Ok(())
}

fn fetch_bar(total: u64, name: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template(
            "{prefix} {wide_bar:.green} {bytes}/{total_bytes} ({bytes_per_sec}, eta {eta})",
        )
        .expect("static template"),
    );
    bar.set_prefix(name.to_string());
    bar
}

/// File name component of a weights path, for progress display.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Models currently present in the cache directory, sorted by name.
/// An unreadable or missing directory counts as an empty cache.
pub fn list_cached_models(cache_dir: &Path) -> Vec<PathBuf> {
    let mut models: Vec<PathBuf> = match std::fs::read_dir(cache_dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "bin"))
            .collect(),
        Err(_) => Vec::new(),
    };
    models.sort();
    models
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cache_fixture(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_cached_weights_short_circuit_the_fetch() {
        let cache = cache_fixture("audioscribe_model_cache_hit");
        let weights = cache.join(Model::Base.filename());
        fs::write(&weights, b"weights").unwrap();

        let path = ensure_model(&Model::Base, &cache).await.unwrap();
        assert_eq!(path, weights);
        // Nothing else appeared in the cache
        assert_eq!(fs::read_dir(&cache).unwrap().count(), 1);

        fs::remove_dir_all(&cache).ok();
    }

    #[tokio::test]
    async fn test_custom_model_path_is_used_as_is() {
        let weights = std::env::temp_dir().join("audioscribe_custom_weights.bin");
        fs::write(&weights, b"weights").unwrap();

        let model = Model::Custom(weights.clone());
        let path = ensure_model(&model, Path::new("/ignored")).await.unwrap();
        assert_eq!(path, weights);

        fs::remove_file(&weights).ok();
    }

    #[tokio::test]
    async fn test_custom_model_path_must_exist() {
        let model = Model::Custom(PathBuf::from("/missing/weights.bin"));
        let err = ensure_model(&model, Path::new("/ignored")).await.unwrap_err();
        match err {
            Error::ModelNotFound { path } => {
                assert_eq!(path, PathBuf::from("/missing/weights.bin"));
            }
            other => panic!("expected ModelNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_list_cached_models_only_reports_weights() {
        let cache = cache_fixture("audioscribe_model_cache_list");
        fs::write(cache.join("ggml-small.bin"), b"weights").unwrap();
        fs::write(cache.join("ggml-base.bin"), b"weights").unwrap();
        fs::write(cache.join("ggml-base.bin.part"), b"half").unwrap();
        fs::write(cache.join("notes.txt"), b"text").unwrap();

        let models = list_cached_models(&cache);
        let names: Vec<_> = models
            .iter()
            .filter_map(|p| p.file_name())
            .map(|f| f.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["ggml-base.bin", "ggml-small.bin"]);

        fs::remove_dir_all(&cache).ok();
    }

    #[test]
    fn test_list_cached_models_missing_dir_is_empty() {
        assert!(list_cached_models(Path::new("/missing/cache")).is_empty());
    }
}
