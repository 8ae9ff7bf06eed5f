//! Load the whisper model once and transcribe several files with it.
//!
//! Usage: cargo run --example reuse_engine -- a.mp3 b.wav c.ogg

use audioscribe::{Model, TranscribeOptions, WhisperEngine};

#[tokio::main]
async fn main() -> audioscribe::Result<()> {
    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("usage: reuse_engine <audio-file>...");
        std::process::exit(1);
    }

    let opts = TranscribeOptions::new().model(Model::Base);
    let model_path = audioscribe::model::ensure_model(&opts.model, &opts.resolve_cache_dir()).await?;
    let engine = WhisperEngine::load(&model_path, opts)?;

    for file in files {
        let result = audioscribe::process_audio(&engine, &file, None)?;
        println!("{} -> {}", file, result.output_path.display());
    }

    Ok(())
}
