//! rs-bigram - command-line front end of the bigram word generator.

mod cli;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_bigram_core::BigramModel;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
	if debug {
		tracing_subscriber::fmt()
			.with_env_filter(
				EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
			)
			.with_writer(std::io::stderr)
			.init();
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.debug);

	// Validate before doing any work
	let request = cli.generate_request()?;

	let mut model = match &cli.load {
		Some(path) => BigramModel::load(path)
			.with_context(|| format!("Failed to load model from {}", path.display()))?,
		None => BigramModel::new(),
	};

	for path in &cli.fit {
		model
			.fit_file(path)
			.with_context(|| format!("Failed to fit {}", path.display()))?;
	}
	if !cli.fit.is_empty() {
		info!(files = cli.fit.len(), words = model.len(), "fitting done");
	}

	if let Some(request) = request {
		let first_word = cli.first_word.as_deref();
		let text = match cli.seed {
			Some(seed) => model.generate(request.length, first_word, &mut StdRng::seed_from_u64(seed)),
			None => model.generate(request.length, first_word, &mut rand::rng()),
		}
		.context("Failed to generate text")?;

		fs::write(&request.output, &text)
			.with_context(|| format!("Failed to write {}", request.output.display()))?;
		debug!(path = %request.output.display(), length = request.length, "text written");
	}

	if let Some(path) = &cli.save {
		model
			.save(path)
			.with_context(|| format!("Failed to save model to {}", path.display()))?;
	}

	Ok(())
}
