use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rs_ngram_core::evaluation::{evaluate, rank_predictions};
use rs_ngram_core::io::read_corpus;
use rs_ngram_core::{Counter, NGramModel, RunConfig, Token};

/// Trains a backoff n-gram model on token streams and scores a held-out one.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Token corpus: one stream per line, whitespace separated ids.
	/// A synthetic corpus is generated when omitted.
	#[arg(short, long)]
	input: Option<PathBuf>,

	/// TOML file with `order` and `prediction_cutoff`
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Overrides the configured order
	#[arg(short = 'n', long)]
	order: Option<usize>,

	/// Overrides the configured prediction cutoff
	#[arg(short = 'k', long)]
	cutoff: Option<usize>,

	/// Smoothing strategy: jm, wb or ad
	#[arg(short, long, default_value = "jm")]
	smoother: String,

	/// Seed of the synthetic corpus
	#[arg(long, default_value_t = 42)]
	seed: u64,
}

/// Streams drawn from a few repeated "phrases" with random noise in between.
fn synthetic_corpus(seed: u64) -> Vec<Vec<Token>> {
	let phrases: [&[Token]; 4] = [&[1, 2, 3, 4], &[1, 2, 5], &[6, 7, 3, 4], &[8, 2, 3]];
	let mut rng = StdRng::seed_from_u64(seed);
	(0..50)
		.map(|_| {
			let mut stream = Vec::new();
			for _ in 0..rng.random_range(3..10) {
				stream.extend_from_slice(phrases[rng.random_range(0..phrases.len())]);
				if rng.random_bool(0.2) {
					stream.push(rng.random_range(9..20));
				}
			}
			stream
		})
		.collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let args = Args::parse();

	let mut config = match &args.config {
		Some(path) => RunConfig::from_toml_file(path)?,
		None => RunConfig::default(),
	};
	if let Some(order) = args.order {
		config = config.with_order(order)?;
	}
	if let Some(cutoff) = args.cutoff {
		config = config.with_prediction_cutoff(cutoff)?;
	}

	let mut corpus = match &args.input {
		Some(path) => read_corpus(path)?,
		None => synthetic_corpus(args.seed),
	};
	let held_out = match corpus.pop() {
		Some(stream) if !corpus.is_empty() => stream,
		_ => return Err("Need at least two streams: one to train on, one to test".into()),
	};

	// Unknown names fall back to Jelinek–Mercer with a warning
	let mut model = NGramModel::standard(config, &args.smoother);
	info!("order {}, cutoff {}, smoother {}", config.order(), config.prediction_cutoff(), model.smoother_name());

	for stream in &corpus {
		model.learn(stream);
	}
	println!("Trained on {} streams, {} tokens", corpus.len(), model.counter().count());

	let evaluation = evaluate(&mut model, std::slice::from_ref(&held_out))?;
	println!("Held-out tokens: {}", evaluation.tokens);
	println!("Entropy: {:.4} bits/token", evaluation.entropy);
	println!("MRR: {:.4}", evaluation.mrr);

	// Top predictions after the middle of the held-out stream
	let index = held_out.len() / 2;
	let predictions = model.predict_token(&held_out, index)?;
	match held_out.get(index + 1) {
		Some(next) => println!("Token after position {}: {}", index, next),
		None => println!("Nothing follows position {}", index),
	}
	for (rank, (token, estimate)) in rank_predictions(&predictions).iter().take(config.prediction_cutoff()).enumerate() {
		println!(
			"{:>3}. token {:>5}  p={:.4}  confidence={:.4}",
			rank + 1,
			token,
			estimate.probability,
			estimate.confidence
		);
	}

	// Dynamic updating: learning the held-out stream makes it cheaper to encode
	model.learn(&held_out);
	let after = evaluate(&mut model, std::slice::from_ref(&held_out))?;
	println!("Entropy after learning it: {:.4} bits/token", after.entropy);
	model.forget(&held_out);

	Ok(())
}
