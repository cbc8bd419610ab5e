use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::WikiError;
use crate::WikiResult;
use crate::document::titleize;
use crate::reference::ReferenceSource;

/// Config file read from the input root.
pub const CONFIG_FILE_NAME: &str = "mdwiki.toml";

/// Publishing space used when neither the config file nor the command
/// line declares one.
pub const DEFAULT_SPACE: &str = "Docs";

/// Directory basenames pruned from traversal by default.
pub const DEFAULT_EXCLUDES: [&str; 2] = ["node_modules", "target"];

/// Documents never published, regardless of location.
pub const DEFAULT_IGNORED_DOCUMENTS: [&str; 4] = [
	"PULL_REQUEST_TEMPLATE.md",
	"CODEOWNERS.md",
	"LICENSE.md",
	"CONTRIBUTING.md",
];

/// Configuration loaded from an `mdwiki.toml` file.
///
/// ```toml
/// space = "DOCS"
/// title = "My Project"
/// exclude = ["node_modules", "target", "vendor"]
/// ignored_documents = ["LICENSE.md", "CONTRIBUTING.md"]
/// git_base_url = "https://github.com/acme/project/"
///
/// [[reference]]
/// dir = "src"
/// title = "API Reference"
/// command = "cargo run --quiet --bin apidoc -- src"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct WikiConfig {
	/// Target publishing space id.
	#[serde(default)]
	pub space: Option<String>,
	/// Run title, used for the landing page and as the default parent.
	#[serde(default)]
	pub title: Option<String>,
	/// Directory and file basenames to prune from traversal.
	#[serde(default)]
	pub exclude: Option<Vec<String>>,
	/// Document basenames to skip without publishing.
	#[serde(default)]
	pub ignored_documents: Option<Vec<String>>,
	/// Base URL for the provenance banner. When absent it is derived from
	/// the input root's `Cargo.toml` repository field, if present.
	#[serde(default)]
	pub git_base_url: Option<String>,
	/// Reference generator sources.
	#[serde(default, rename = "reference")]
	pub references: Vec<ReferenceSource>,
}

impl WikiConfig {
	/// Load `mdwiki.toml` from the given root. Returns `Ok(None)` when no
	/// config file exists.
	pub fn load(root: &Path) -> WikiResult<Option<Self>> {
		let path = root.join(CONFIG_FILE_NAME);
		if !path.is_file() {
			return Ok(None);
		}

		let raw = std::fs::read_to_string(&path)?;
		let config = toml::from_str(&raw).map_err(|error| WikiError::ConfigParse(error.to_string()))?;
		Ok(Some(config))
	}
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
	pub space: Option<String>,
	pub title: Option<String>,
	pub exclude: Option<Vec<String>>,
}

/// Immutable configuration for a single publishing run.
///
/// Resolved once before the pipeline starts and passed by reference into
/// every component; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
	/// Absolute path to the documentation tree being published.
	pub input_root: PathBuf,
	/// Absolute path the rendered documents are written under.
	pub output_root: PathBuf,
	/// Default publishing space injected into documents without a
	/// `Space:` directive.
	pub space: String,
	/// Run title: the landing-page title and the default parent.
	pub title: String,
	/// Directory and file basenames pruned from traversal.
	pub exclude: Vec<String>,
	/// Document basenames skipped without publishing.
	pub ignored_documents: Vec<String>,
	/// Base URL for the provenance banner, always slash-terminated.
	pub git_base_url: Option<String>,
	/// Reference generator sources.
	pub references: Vec<ReferenceSource>,
}

impl RunConfig {
	/// Resolve a run configuration from the input root's `mdwiki.toml`
	/// plus command-line overrides. Overrides win over the config file,
	/// which wins over manifest-derived defaults.
	pub fn resolve(input_root: &Path, output_root: &Path, overrides: ConfigOverrides) -> WikiResult<Self> {
		let input_root = std::path::absolute(input_root)?;
		let output_root = std::path::absolute(output_root)?;

		let file = WikiConfig::load(&input_root)?.unwrap_or_default();

		let title = overrides
			.title
			.or(file.title)
			.unwrap_or_else(|| default_run_title(&input_root));
		let space = overrides
			.space
			.or(file.space)
			.unwrap_or_else(|| DEFAULT_SPACE.to_string());
		let exclude = overrides
			.exclude
			.or(file.exclude)
			.unwrap_or_else(|| DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect());
		let ignored_documents = file.ignored_documents.unwrap_or_else(|| {
			DEFAULT_IGNORED_DOCUMENTS
				.iter()
				.map(ToString::to_string)
				.collect()
		});
		let git_base_url = file
			.git_base_url
			.map(|url| ensure_trailing_slash(&url))
			.or_else(|| manifest_repository_url(&input_root));

		Ok(Self {
			input_root,
			output_root,
			space,
			title,
			exclude,
			ignored_documents,
			git_base_url,
			references: file.references,
		})
	}
}

/// Titleized basename of the input root, used when no title is declared.
fn default_run_title(input_root: &Path) -> String {
	input_root
		.file_name()
		.and_then(|name| name.to_str())
		.map_or_else(|| "Docs".to_string(), titleize)
}

/// Repository URL from the input root's `Cargo.toml`, normalized for use
/// as a provenance base URL. Any read or parse failure yields `None`.
fn manifest_repository_url(input_root: &Path) -> Option<String> {
	let raw = std::fs::read_to_string(input_root.join("Cargo.toml")).ok()?;
	let manifest: toml::Value = toml::from_str(&raw).ok()?;
	let repository = manifest.get("package")?.get("repository")?.as_str()?;
	Some(normalize_repository_url(repository))
}

/// Turn a manifest repository URL into a browsable, slash-terminated base
/// URL: the `.git` suffix and `git+` scheme prefix are dropped, and scp
/// style `git@host:owner/repo` addresses become `https://` URLs.
pub fn normalize_repository_url(url: &str) -> String {
	let url = url.strip_suffix(".git").unwrap_or(url);
	let url = url.strip_prefix("git+").unwrap_or(url);
	let url = match url.strip_prefix("git@") {
		Some(rest) => format!("https://{}", rest.replacen(':', "/", 1)),
		None => url.to_string(),
	};
	ensure_trailing_slash(&url)
}

fn ensure_trailing_slash(url: &str) -> String {
	if url.ends_with('/') {
		url.to_string()
	} else {
		format!("{url}/")
	}
}
