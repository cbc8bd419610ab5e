use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use tracing::warn;

use crate::WikiError;
use crate::WikiResult;
use crate::document::DocumentRecord;
use crate::document::ROOT_DOCUMENT;
use crate::document::titleize;

/// One configured reference source from a `[[reference]]` table.
///
/// ```toml
/// [[reference]]
/// dir = "src"
/// title = "API Reference"
/// command = "cargo run --quiet --bin apidoc -- src"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReferenceSource {
	/// Source directory, relative to the input root.
	pub dir: String,
	/// Display title for the fragment when it is promoted to a standalone
	/// document. Optional; defaults to the titleized directory basename.
	#[serde(default)]
	pub title: Option<String>,
	/// Shell command whose stdout is the generated markdown fragment.
	pub command: String,
}

/// A generated reference fragment awaiting a matching root document.
#[derive(Debug, Clone)]
pub struct ReferenceFragment {
	/// Source directory the fragment was generated for.
	pub source_dir: String,
	/// Title declared on the reference source, if any.
	pub declared_title: Option<String>,
	/// Generated markdown text.
	pub body: String,
	/// Set on the first match against a root document. Unconsumed
	/// fragments are promoted to standalone documents after the main pass.
	pub consumed: bool,
}

impl ReferenceFragment {
	/// Promote an unmatched fragment into a synthetic standalone document
	/// at the source directory's root-document path, parented under the
	/// run title.
	pub fn to_standalone_record(&self, run_title: &str) -> DocumentRecord {
		let title = self.declared_title.clone().unwrap_or_else(|| {
			let basename = Path::new(&self.source_dir)
				.file_name()
				.and_then(|name| name.to_str())
				.unwrap_or(&self.source_dir);
			titleize(basename)
		});

		DocumentRecord {
			source_path: format!("{}/{ROOT_DOCUMENT}", self.source_dir),
			title,
			wiki_space: None,
			wiki_title: None,
			wiki_skip: false,
			content: xhtml_safe(&self.body),
			parent_title: Some(run_title.to_string()),
			reference_fragment: None,
		}
	}
}

/// External reference generator: given one configured source, produce a
/// markdown fragment or fail. Failures are tolerated per source.
pub trait ReferenceGenerator: Send + Sync {
	fn generate(&self, source: &ReferenceSource)
	-> impl Future<Output = WikiResult<String>> + Send;
}

/// Default generator: runs the source's configured command through the
/// shell with the input root as working directory and captures stdout as
/// the fragment body.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
	pub working_dir: PathBuf,
}

impl ReferenceGenerator for CommandGenerator {
	async fn generate(&self, source: &ReferenceSource) -> WikiResult<String> {
		let output = tokio::process::Command::new("sh")
			.arg("-c")
			.arg(&source.command)
			.current_dir(&self.working_dir)
			.output()
			.await
			.map_err(|error| {
				WikiError::Generator {
					dir: source.dir.clone(),
					reason: error.to_string(),
				}
			})?;

		if !output.status.success() {
			return Err(WikiError::Generator {
				dir: source.dir.clone(),
				reason: format!(
					"command exited with {}: {}",
					output.status,
					String::from_utf8_lossy(&output.stderr).trim()
				),
			});
		}

		Ok(String::from_utf8_lossy(&output.stdout).into_owned())
	}
}

/// Generated fragments keyed by source directory, with consumption
/// tracking for the post-traversal promotion pass.
#[derive(Debug, Default)]
pub struct FragmentSet {
	fragments: HashMap<String, ReferenceFragment>,
}

impl FragmentSet {
	/// Generate fragments for every configured source concurrently. All
	/// sources are awaited before returning, so lookups never race with
	/// generation. A failed source is logged and yields no fragment; it
	/// never aborts the run.
	pub async fn build<G>(generator: &Arc<G>, sources: &[ReferenceSource]) -> Self
	where
		G: ReferenceGenerator + 'static,
	{
		let mut handles = Vec::with_capacity(sources.len());
		for source in sources.iter().cloned() {
			let generator = Arc::clone(generator);
			handles.push(tokio::spawn(async move {
				match generator.generate(&source).await {
					Ok(body) => {
						info!(dir = %source.dir, "generated reference fragment");
						Some(ReferenceFragment {
							source_dir: source.dir,
							declared_title: source.title,
							body,
							consumed: false,
						})
					}
					Err(error) => {
						warn!(dir = %source.dir, %error, "reference generator failed");
						None
					}
				}
			}));
		}

		let mut fragments = HashMap::new();
		for handle in handles {
			if let Ok(Some(fragment)) = handle.await {
				fragments.insert(fragment.source_dir.clone(), fragment);
			}
		}

		Self { fragments }
	}

	/// Take the fragment matching a document's containing directory,
	/// marking it consumed. Only root documents receive fragments; other
	/// documents and cache misses yield `None`.
	pub fn take_for(&mut self, source_path: &str) -> Option<String> {
		let path = Path::new(source_path);
		if path.file_name().and_then(|name| name.to_str()) != Some(ROOT_DOCUMENT) {
			return None;
		}

		let dir = containing_dir(source_path);
		let fragment = self.fragments.get_mut(&dir)?;
		fragment.consumed = true;
		Some(xhtml_safe(&fragment.body))
	}

	/// Fragments never matched during the main pass, in directory order.
	pub fn unconsumed(&self) -> Vec<&ReferenceFragment> {
		let mut orphans: Vec<_> = self
			.fragments
			.values()
			.filter(|fragment| !fragment.consumed)
			.collect();
		orphans.sort_by(|a, b| a.source_dir.cmp(&b.source_dir));
		orphans
	}

	pub fn len(&self) -> usize {
		self.fragments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fragments.is_empty()
	}
}

/// Containing directory of a relative path, with the input root itself
/// normalized to `"."` so a reference source for the root can match.
fn containing_dir(source_path: &str) -> String {
	let dir = Path::new(source_path)
		.parent()
		.and_then(|parent| parent.to_str())
		.unwrap_or("");
	if dir.is_empty() {
		".".to_string()
	} else {
		dir.to_string()
	}
}

/// Rewrite bare `<hr>` tags as self-closing so fragments survive an XHTML
/// import.
pub fn xhtml_safe(markdown: &str) -> String {
	markdown.replace("<hr>", "<hr/>")
}
