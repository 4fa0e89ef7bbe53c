use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use ngram_core::GenError;
use ngram_core::model::backoff_model::BackoffModel;
use ngram_core::model::composer::Composer;
use ngram_core::model::framer::frame;
use ngram_core::model::frequency::FrequencyModel;
use ngram_core::model::generation_config::GenerationConfig;
use ngram_core::model::generator::{NoteGenerator, TokenGenerator};
use ngram_core::model::note::{Duration, MusicSymbol};
use ngram_core::model::sampler::sample;
use ngram_core::model::symbol::{END, START1, START2, Symbol};

const WORDS: &str = "\
I do not like green eggs and ham
I do not like them Sam I am

would you like them here or there
I would not like them anywhere
";

const SONGS: &str = "\
C4:4 E4:4 G4:2 E4:4 C4:2 $::$
D4:8 F#4:8 A4:4 D5:-4 $::$
G4:4 A4:4 B4:4 C5:1 $::$
";

fn scratch_file(name: &str, contents: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("ngram-it-{}-{name}", std::process::id()));
	fs::create_dir_all(&dir).unwrap();
	let path = dir.join(format!("{name}.txt"));
	fs::write(&path, contents).unwrap();
	path
}

#[test]
fn weighted_choice_frequencies() {
	let candidates = [("green", 10u64), ("eggs", 2), ("and", 3), ("ham", 3)];
	let mut rng = StdRng::seed_from_u64(0xC0FFEE);
	let trials = 10_000;
	let green = (0..trials)
		.filter(|_| *sample(candidates.iter().map(|(t, w)| (t, *w)), &mut rng).unwrap() == "green")
		.count();
	let frequency = green as f64 / trials as f64;
	assert!((frequency - 10.0 / 18.0).abs() < 0.03, "green drawn with frequency {frequency}");
}

#[test]
fn framing_literals() {
	let framed = frame(&[vec!["a".to_owned(), "b".to_owned()]]);
	assert_eq!(framed, vec![vec![START1, START2, "a", "b", END]]);
}

#[test]
fn word_corpus_end_to_end() {
	let path = scratch_file("words", WORDS);
	let model = BackoffModel::<String>::load_or_train(&path).unwrap();
	let cache = path.with_extension("bin");
	assert!(cache.exists());

	// The second call reads the cache and must answer the same way.
	let cached = BackoffModel::<String>::load_or_train(&path).unwrap();
	assert_eq!(cached.dump().unwrap(), model.dump().unwrap());
	fs::remove_dir_all(path.parent().unwrap()).unwrap();

	let start = String::start_context();
	assert!(model.has_context(&start));
	let openers = model.candidates_for(&start).unwrap();
	assert_eq!(openers.count(&"I".to_owned()), 3);
	assert_eq!(openers.count(&"would".to_owned()), 1);

	let generator = TokenGenerator::new(&model);
	let mut rng = StdRng::seed_from_u64(21);
	for _ in 0..50 {
		let first = generator.next_token(&start, &mut rng).unwrap();
		assert!(openers.contains(&first));
	}

	let mut config = GenerationConfig::default();
	config.seed = Some(3);
	let composer = Composer::new(&model, config);
	let mut rng = composer.config().rng();
	let vocabulary: BTreeSet<String> = WORDS.split_whitespace().map(str::to_owned).collect();
	for _ in 0..20 {
		let sentence = composer.compose_sentence(&mut rng).unwrap();
		assert!(!sentence.is_empty());
		assert!(sentence.len() <= composer.config().max_tokens());
		assert!(sentence.iter().all(|word| vocabulary.contains(word)));
	}
}

#[test]
fn note_corpus_end_to_end() {
	let path = scratch_file("songs", SONGS);
	let model = BackoffModel::<MusicSymbol>::train_file(&path).unwrap();
	fs::remove_dir_all(path.parent().unwrap()).unwrap();

	let generator = NoteGenerator::new(&model);
	let key: BTreeSet<String> = ["C", "E", "G"].iter().map(|p| (*p).to_owned()).collect();
	let mut rng = StdRng::seed_from_u64(8);
	let start = MusicSymbol::start_context();
	for _ in 0..100 {
		let next = generator.next_note(&start, &key, &mut rng).unwrap();
		let note = next.as_note().unwrap();
		assert!(key.contains(note.pitch_class()));
		assert!(Duration::ALL.contains(&note.duration()));
	}

	let mut config = GenerationConfig::default();
	config.set_possible_pitches(["C", "E", "G"]).unwrap();
	config.set_max_notes(32).unwrap();
	let composer = Composer::new(&model, config);
	for _ in 0..20 {
		let line = composer.compose_line(&mut rng).unwrap();
		assert!(!line.is_empty() && line.len() <= 32);
		assert!(line.iter().all(|note| ["C", "E", "G"].contains(&note.pitch_class())));
	}
}

#[test]
fn malformed_note_corpus_is_rejected() {
	let path = scratch_file("broken", "C4:4 H:4\n");
	let result = BackoffModel::<MusicSymbol>::train_file(&path);
	fs::remove_dir_all(path.parent().unwrap()).unwrap();
	assert!(matches!(result, Err(GenError::InvalidNote(_))));
}
