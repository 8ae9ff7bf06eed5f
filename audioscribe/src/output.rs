use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

/// Compute the destination for transcription text.
///
/// An explicit path is returned verbatim. Otherwise the output lands next to
/// the audio file: same directory, same base name, `.txt` extension (only the
/// final extension is stripped, so `a.b.wav` becomes `a.b.txt`).
pub fn resolve_output_path(audio_path: &Path, explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(path) => path,
        None => audio_path.with_extension("txt"),
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a tilde pass through unchanged, as does `~` when no home
/// directory can be determined.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };

    if s == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }

    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    path.to_path_buf()
}

/// Write transcription text to `path`, fully or not at all.
///
/// The text is streamed to a sibling `.part` file and renamed into place, so
/// a failure partway through never leaves a truncated file at `path`. Any
/// failure surfaces as [`Error::OutputWrite`] with the destination attached.
pub fn write_transcription(path: &Path, text: &str) -> Result<()> {
    let tmp_path = part_path(path);

    let write_and_rename = || -> std::io::Result<()> {
        std::fs::write(&tmp_path, text)?;
        std::fs::rename(&tmp_path, path)
    };

    write_and_rename().map_err(|source| {
        std::fs::remove_file(&tmp_path).ok();
        Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(path = %path.display(), bytes = text.len(), "transcription saved");
    Ok(())
}

/// Sibling temp path: `out.txt` -> `out.txt.part`.
pub(crate) fn part_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|f| f.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
