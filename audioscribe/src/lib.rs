//! Audio transcription library — audio file in, plain-text transcript out.
//!
//! **audioscribe** handles the full pipeline: model download/caching, audio
//! decoding (via ffmpeg), transcription (via whisper.cpp), and saving the
//! text next to the input (or wherever you point it). The transcript is
//! written verbatim, exactly as the model produced it.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> audioscribe::Result<()> {
//! use audioscribe::TranscribeOptions;
//!
//! // meeting.mp3 in, meeting.txt out
//! let result = audioscribe::transcribe_to_file(
//!     "meeting.mp3",
//!     None,
//!     &TranscribeOptions::default(),
//! ).await?;
//! println!("saved to {}", result.output_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! The model boundary is the [`SpeechEngine`] trait; [`process_audio`] takes
//! any implementation, so tests (and alternative backends) can plug in
//! without touching whisper.

pub(crate) mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod types;

pub use config::{Language, Model, TranscribeOptions};
pub use engine::{SpeechEngine, WhisperEngine};
pub use error::{Error, Result};
pub use output::resolve_output_path;
pub use types::Transcription;

use std::path::{Path, PathBuf};

use tracing::info;

/// Transcribe `audio_path` and write the text to a file.
///
/// This is the end-to-end entry point: it ensures the configured model is
/// cached locally (downloading on first use), loads the whisper engine, and
/// runs [`process_audio`]. Loading is the expensive part — callers doing
/// many files should load a [`WhisperEngine`] once and call
/// [`process_audio`] per file instead.
///
/// `output_path` of `None` derives the destination from the input: same
/// directory, same base name, `.txt` extension.
pub async fn transcribe_to_file(
    audio_path: impl AsRef<Path>,
    output_path: Option<PathBuf>,
    options: &TranscribeOptions,
) -> Result<Transcription> {
    let audio_path = output::expand_tilde(audio_path.as_ref());

    // Fail before paying the model load/download cost
    if !audio_path.exists() {
        return Err(Error::AudioNotFound { path: audio_path });
    }

    let cache_dir = options.resolve_cache_dir();
    let model_path = model::ensure_model(&options.model, &cache_dir).await?;

    let engine = WhisperEngine::load(&model_path, options.clone())?;

    process_audio(&engine, &audio_path, output_path)
}

/// Transcribe one audio file with an already-loaded engine.
///
/// The orchestration is: verify the input exists, invoke the engine, resolve
/// the output path, write the text. The engine is never invoked for a
/// missing input, and no output file is left behind when the write fails.
/// The text lands in the file exactly as the engine returned it.
pub fn process_audio(
    engine: &impl SpeechEngine,
    audio_path: impl AsRef<Path>,
    output_path: Option<PathBuf>,
) -> Result<Transcription> {
    let audio_path = output::expand_tilde(audio_path.as_ref());

    if !audio_path.exists() {
        return Err(Error::AudioNotFound { path: audio_path });
    }

    info!(path = %audio_path.display(), "processing audio file");
    let text = engine.transcribe(&audio_path)?;

    let resolved = resolve_output_path(
        &audio_path,
        output_path.map(|p| output::expand_tilde(&p)),
    );
    output::write_transcription(&resolved, &text)?;

    Ok(Transcription {
        text,
        output_path: resolved,
    })
}
