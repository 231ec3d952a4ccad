use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::engine::MovieRef;

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Magenta.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Magenta.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Magenta.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

#[derive(Parser, Debug)]
#[command(
	name = "mixer",
	author,
	version,
	about = "Hybrid movie recommendations from two favourite films",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {mixer} {recommend} {rec_args}     {rec_desc}
  {mixer} {recommend} {rec_id_args}      {rec_id_desc}
  {mixer} {search}    {search_args}                 {search_desc}
  {mixer} {repl}                              {repl_desc}",
		title = "Examples:".bright_magenta().bold(),
		mixer = "mixer".bright_magenta(),
		recommend = "recommend".yellow(),
		rec_args = "\"Heat\" \"Toy Story\" -n 5",
		rec_desc = "Blend two titles".dimmed(),
		rec_id_args = "949 862 --json --posters",
		rec_id_desc = "Blend by id, JSON output".dimmed(),
		search = "search".yellow(),
		search_args = "matrix",
		search_desc = "Find titles and ids".dimmed(),
		repl = "repl".yellow(),
		repl_desc = "Interactive session".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Directory holding movies.csv and keywords.csv
	#[arg(short = 'a', long = "assets", global = true, value_name = "DIR")]
	pub assets: Option<PathBuf>,

	/// Movies CSV (overrides --assets)
	#[arg(long = "movies", global = true, value_name = "PATH")]
	pub movies: Option<PathBuf>,

	/// Keywords CSV (overrides --assets)
	#[arg(long = "keywords", global = true, value_name = "PATH")]
	pub keywords: Option<PathBuf>,

	/// Minimum vote count for a movie to be recommendable (default: 1000)
	#[arg(short = 'm', long = "min-votes", global = true, allow_negative_numbers = true)]
	pub min_votes: Option<String>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Recommend movies that blend two movies
	Recommend {
		/// First movie (id or exact title)
		#[arg(value_name = "FIRST")]
		first: MovieRef,

		/// Second movie (id or exact title)
		#[arg(value_name = "SECOND")]
		second: MovieRef,

		/// Number of recommendations (default: 3)
		#[arg(short = 'n', long = "top", allow_negative_numbers = true)]
		top_n: Option<String>,

		/// Print results as JSON
		#[arg(long = "json")]
		json: bool,

		/// Look up posters on TMDB (needs TMDB_TOKEN)
		#[arg(short = 'p', long = "posters")]
		posters: bool,

		/// Open the best match's poster in the default viewer
		#[arg(short = 'o', long = "open")]
		open: bool,

		/// Show the shared features that drove the ranking
		#[arg(short = 'e', long = "explain")]
		explain: bool,
	},

	/// Search the catalog by title
	Search {
		/// Part of a title
		#[arg(value_name = "QUERY")]
		query: String,

		/// Maximum number of matches
		#[arg(short = 'n', long = "limit", default_value_t = 10)]
		limit: usize,
	},

	/// Catalog and vocabulary statistics
	Stats {
		/// Number of genres and terms to list
		#[arg(short = 'n', long = "limit", default_value_t = 10)]
		limit: usize,
	},

	/// Interactive session reusing one loaded catalog
	Repl {
		/// Number of recommendations (default: 3)
		#[arg(short = 'n', long = "top", allow_negative_numbers = true)]
		top_n: Option<String>,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_recommend_with_titles_and_ids() {
		let cli = Cli::parse_from(["mixer", "recommend", "Heat", "862", "-n", "5", "--json"]);
		match cli.command {
			Command::Recommend { first, second, top_n, json, .. } => {
				assert_eq!(first, MovieRef::Title("Heat".into()));
				assert_eq!(second, MovieRef::Id(862));
				assert_eq!(top_n.as_deref(), Some("5"));
				assert!(json);
			}
			other => panic!("unexpected command: {:?}", other),
		}
	}

	#[test]
	fn negative_counts_reach_validation() {
		let cli = Cli::parse_from(["mixer", "--min-votes", "-5", "repl", "-n", "-1"]);
		assert_eq!(cli.min_votes.as_deref(), Some("-5"));
		assert!(matches!(cli.command, Command::Repl { top_n: Some(ref n) } if n == "-1"));
	}
}
