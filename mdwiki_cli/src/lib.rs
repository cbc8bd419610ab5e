use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Publish a markdown documentation tree as a wiki-importable document set.",
	long_about = "mdwiki walks a documentation tree of markdown files and re-emits it under an \
	              output directory as a flat, directive-annotated document set suitable for \
	              import into an external wiki.\n\nEach published document carries leading \
	              `Space:`, `Parent:`, and `Title:` comment directives derived from its content \
	              and its place in the directory hierarchy. Reference fragments produced by \
	              configured generator commands are merged into the matching directory's README, \
	              or published standalone when no README exists.\n\nDefaults are read from \
	              `mdwiki.toml` in the input root; command-line flags override them."
)]
pub struct MdwikiCli {
	/// Input directory containing the documentation tree.
	#[arg(long, short, default_value = ".")]
	pub input: PathBuf,

	/// Output directory the published documents are written under.
	#[arg(long, short, default_value = "./out")]
	pub output: PathBuf,

	/// Target wiki space id injected into documents without a `Space:`
	/// directive.
	#[arg(long)]
	pub space: Option<String>,

	/// Run title, used for the landing page and as the default parent.
	#[arg(long)]
	pub title: Option<String>,

	/// Directory or file basenames to skip during traversal.
	#[arg(long, short = 'X', value_delimiter = ',', value_name = "NAME,NAME...")]
	pub exclude: Option<Vec<String>>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,
}
