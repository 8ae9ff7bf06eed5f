//! Transcribe a local audio file and save the text next to it.
//!
//! Usage: cargo run --example basic -- path/to/audio.mp3

use audioscribe::TranscribeOptions;

#[tokio::main]
async fn main() -> audioscribe::Result<()> {
    let path = std::env::args().nth(1).expect("usage: basic <audio-file>");

    let result = audioscribe::transcribe_to_file(&path, None, &TranscribeOptions::default()).await?;

    println!("{}", result.text);
    println!("(saved to {})", result.output_path.display());

    Ok(())
}
