use std::path::PathBuf;

use audioscribe::{Model, TranscribeOptions};
use clap::Parser;

#[derive(Parser)]
#[command(name = "audioscribe", about = "Transcribe an audio file to plain text")]
struct Cli {
    /// Path to the audio file to transcribe.
    #[arg(required_unless_present_any = ["list_models", "download_model"])]
    audio: Option<PathBuf>,

    /// Where to write the transcription (default: next to the audio file, .txt).
    output: Option<PathBuf>,

    /// Whisper model to use.
    #[arg(short, long, default_value = "base")]
    model: String,

    /// Language code (e.g. "en", "de") or "auto" for detection.
    #[arg(short, long, default_value = "auto")]
    language: String,

    /// Print the result (text and output path) as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Disable GPU acceleration.
    #[arg(long)]
    no_gpu: bool,

    /// GPU device ID.
    #[arg(long, default_value = "0")]
    gpu_device: u32,

    /// Number of threads (default: auto).
    #[arg(long)]
    threads: Option<u32>,

    /// Model cache directory.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// List available models.
    #[arg(long)]
    list_models: bool,

    /// Download a model without transcribing.
    #[arg(long)]
    download_model: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("audioscribe=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.list_models {
        let models = [
            ("tiny", "75 MB"),
            ("tiny.en", "75 MB"),
            ("base", "142 MB"),
            ("base.en", "142 MB"),
            ("small", "466 MB"),
            ("small.en", "466 MB"),
            ("medium", "1.5 GB"),
            ("medium.en", "1.5 GB"),
            ("large-v2", "2.9 GB"),
            ("large-v3", "2.9 GB"),
            ("large-v3-turbo", "~1.6 GB"),
        ];
        println!("{:<16} {}", "MODEL", "SIZE");
        println!("{:<16} {}", "-----", "----");
        for (name, size) in models {
            println!("{name:<16} {size}");
        }

        let opts = TranscribeOptions::default();
        let cache_dir = cli.cache_dir.unwrap_or_else(|| opts.resolve_cache_dir());
        let cached = audioscribe::model::list_cached_models(&cache_dir);
        if !cached.is_empty() {
            println!("\nCached models in {}:", cache_dir.display());
            for path in cached {
                println!(
                    "  {}",
                    path.file_name()
                        .map(|f| f.to_string_lossy().into_owned())
                        .unwrap_or_default()
                );
            }
        }
        return;
    }

    if let Some(model_name) = &cli.download_model {
        let model = match Model::parse_name(model_name) {
            Some(m) => m,
            None => {
                eprintln!("Unknown model: {model_name}");
                eprintln!("Use --list-models to see available models");
                std::process::exit(1);
            }
        };
        let cache_dir = cli
            .cache_dir
            .unwrap_or_else(|| TranscribeOptions::default().resolve_cache_dir());
        match audioscribe::model::ensure_model(&model, &cache_dir).await {
            Ok(path) => println!("Model ready: {}", path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let audio = cli.audio.unwrap();

    let model = match Model::parse_name(&cli.model) {
        Some(m) => m,
        None => {
            // Try as custom model path
            let path = PathBuf::from(&cli.model);
            if path.exists() {
                Model::Custom(path)
            } else {
                eprintln!("Unknown model: {}", cli.model);
                eprintln!("Use --list-models to see available models, or provide a path to a ggml file");
                std::process::exit(1);
            }
        }
    };

    let mut opts = match TranscribeOptions::new()
        .model(model)
        .gpu(!cli.no_gpu)
        .gpu_device(cli.gpu_device)
        .language(&cli.language)
    {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(n) = cli.threads {
        opts = opts.n_threads(n);
    }
    if let Some(dir) = cli.cache_dir {
        opts = opts.cache_dir(dir);
    }

    match audioscribe::transcribe_to_file(&audio, cli.output, &opts).await {
        Ok(result) => {
            if cli.json {
                match result.to_json_pretty() {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("JSON error: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                println!("Transcription saved to {}", result.output_path.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
