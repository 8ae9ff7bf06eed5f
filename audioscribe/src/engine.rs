use std::path::Path;

use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio;
use crate::config::{Language, TranscribeOptions};
use crate::error::{Error, Result};

/// The speech-recognition capability the orchestrator depends on.
///
/// One model load serves many transcriptions: construct the engine once
/// (e.g. [`WhisperEngine::load`]) and reuse it across calls. Tests substitute
/// a deterministic stub.
pub trait SpeechEngine {
    /// Transcribe the audio file at `audio_path`, returning the raw text.
    fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Speech engine backed by whisper.cpp.
///
/// Owns the loaded `WhisperContext` (the expensive part); per-call decoding
/// state is created inside [`SpeechEngine::transcribe`], so a single engine
/// can serve sequential transcriptions without reloading the model.
pub struct WhisperEngine {
    ctx: WhisperContext,
    options: TranscribeOptions,
}

impl WhisperEngine {
    /// Load the whisper model at `model_path`.
    pub fn load(model_path: &Path, options: TranscribeOptions) -> Result<Self> {
        info!(model = %model_path.display(), "loading whisper model");

        let mut ctx_params = WhisperContextParameters::new();
        ctx_params.use_gpu(options.gpu);
        ctx_params.gpu_device(options.gpu_device as i32);

        let ctx = WhisperContext::new_with_params(
            model_path
                .to_str()
                .ok_or_else(|| Error::Model("model path contains invalid UTF-8".into()))?,
            ctx_params,
        )?;

        Ok(Self { ctx, options })
    }
}

impl SpeechEngine for WhisperEngine {
    fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let samples = audio::load_audio(audio_path)?;

        let mut state = self.ctx.create_state()?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 5 });

        match &self.options.language {
            Language::Auto => params.set_detect_language(true),
            Language::Code(code) => params.set_language(Some(code)),
        }

        if let Some(n) = self.options.n_threads {
            params.set_n_threads(n as i32);
        }

        // Keep whisper.cpp from printing to stderr
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        info!(samples = samples.len(), "running transcription");
        state.full(params, &samples)?;

        let num_segments = state.full_n_segments();
        debug!(num_segments, "transcription complete");

        let mut pieces = Vec::with_capacity(num_segments as usize);
        for i in 0..num_segments {
            let segment = state
                .get_segment(i)
                .ok_or_else(|| Error::Transcription(format!("segment {i} not found")))?;
            let text = segment
                .to_str_lossy()
                .map_err(|e| Error::Transcription(format!("segment text error: {e}")))?
                .into_owned();
            pieces.push(text.trim().to_string());
        }

        Ok(pieces.join(" "))
    }
}
