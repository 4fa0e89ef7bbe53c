use log::info;

use ngram_core::model::backoff_model::BackoffModel;
use ngram_core::model::composer::Composer;
use ngram_core::model::generation_config::GenerationConfig;
use ngram_core::model::note::MusicSymbol;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows which n-gram order answered each step
    env_logger::init();

    // Seed, length limits and key signature
    let config = GenerationConfig::from_file("./data/config.json")?;

    // Train from the corpus, or load "./data/<name>.bin" if it already exists
    let words = BackoffModel::<String>::load_or_train("./data/words.txt")?;
    let notes = BackoffModel::<MusicSymbol>::load_or_train("./data/notes.txt")?;

    // Human-readable tables, sorted by context
    if std::env::args().any(|arg| arg == "--dump") {
        println!("{}", words.dump()?);
        println!("{}", notes.dump()?);
    }

    // The same random source drives both composers, so a seeded config
    // replays the same output
    let mut rng = config.rng();

    let composer = Composer::new(&words, config.clone());
    for i in 0..5 {
        println!("Generated sentence {}: {}", i + 1, composer.compose_text(&mut rng)?);
    }

    // Lines are restricted to the configured key; notes out of key are
    // replaced by random ones in octave 4
    let composer = Composer::new(&notes, config);
    for i in 0..3 {
        let line = composer.compose_line(&mut rng)?;
        info!("Line {} has {} notes", i + 1, line.len());
        let rendered: Vec<String> = line.iter().map(ToString::to_string).collect();
        println!("Generated line {}: {}", i + 1, rendered.join(" "));
    }

    Ok(())
}
