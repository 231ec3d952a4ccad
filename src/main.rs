//! Mixer - hybrid movie recommendations
//!
//! Pick two movies, get the ones that sit in their shared taste.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;

use mixer::cli::{Cli, Command};
use mixer::commands;
use mixer::config::{self, Settings};
use mixer::poster::TmdbPosters;
use mixer::ui::{self, Log};
use mixer::Engine;

fn main() {
	if let Err(e) = run() {
		let unknown = e
			.downcast_ref::<mixer::MixerError>()
			.is_some_and(|m| m.is_unknown_movie());
		ui::error(&format!("{:#}", e));
		if unknown {
			ui::info(&format!("Try {} to look up ids", "mixer search <title>".yellow()));
		}
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();

	Log::set_verbose(cli.verbose);
	config::load_env();

	if let Some(dir) = cli.assets {
		config::set_assets_dir(dir);
	}
	if let Some(path) = cli.movies {
		config::set_movies_file(path);
	}
	if let Some(path) = cli.keywords {
		config::set_keywords_file(path);
	}

	match cli.command {
		Command::Recommend { first, second, top_n, json, posters, open, explain } => {
			Log::set_quiet(json);
			let settings = Settings::resolve(cli.min_votes.as_deref(), top_n.as_deref())?;
			ui::print_logo();
			let engine = init_engine(&settings)?;
			let lookup = posters.then(TmdbPosters::from_env);
			let opts = commands::recommend::Options {
				top_n: settings.top_n,
				json,
				posters: lookup.as_deref(),
				open_first: open,
				explain,
			};
			commands::recommend::run(&engine, &first, &second, &opts)
		}
		Command::Search { query, limit } => {
			let settings = Settings::for_catalog(cli.min_votes.as_deref())?;
			let engine = init_engine(&settings)?;
			commands::search::run(&engine, &query, limit)
		}
		Command::Stats { limit } => {
			let settings = Settings::for_catalog(cli.min_votes.as_deref())?;
			ui::print_logo();
			let engine = init_engine(&settings)?;
			commands::stats::run(&engine, limit)
		}
		Command::Repl { top_n } => {
			let settings = Settings::resolve(cli.min_votes.as_deref(), top_n.as_deref())?;
			ui::print_logo();
			let engine = init_engine(&settings)?;
			commands::repl::run(&engine, settings.top_n)
		}
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
					return Ok(());
				}
				ui::warn(&format!("Unknown subcommand: {}", sub));
			}
			cmd.print_help()?;
			Ok(())
		}
	}
}

fn init_engine(settings: &Settings) -> Result<Engine> {
	let start = std::time::Instant::now();
	let engine = Engine::init(settings).with_context(|| {
		format!(
			"Could not load catalog from {}",
			settings.movies_path.display()
		)
	})?;

	ui::debug(&format!(
		"Loaded {} movies, {} terms in {:.2}s",
		engine.catalog().len(),
		engine.space().dimensions(),
		start.elapsed().as_secs_f32()
	));

	Ok(engine)
}
