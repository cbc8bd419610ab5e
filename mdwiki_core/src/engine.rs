use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::WikiResult;
use crate::assembler;
use crate::config::RunConfig;
use crate::document;
use crate::document::ROOT_DOCUMENT;
use crate::hierarchy;
use crate::reference::FragmentSet;
use crate::reference::ReferenceGenerator;
use crate::visitor;

/// Counters reported after a publishing run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
	/// Documents written under the output root.
	pub written: usize,
	/// Documents fully processed but withheld by a skip directive.
	pub skipped: usize,
	/// Reference fragments merged into a matching root document.
	pub merged_fragments: usize,
	/// Reference fragments promoted to standalone documents.
	pub standalone_fragments: usize,
}

/// Run the full publishing pipeline.
///
/// Reference fragments are generated first (concurrently, tolerating
/// per-source failures), then the input tree is traversed sequentially:
/// each accepted document is extracted, cross-referenced against the
/// fragment map, annotated with its parent title, rendered, and written.
/// Fragments never matched to a document are promoted to standalone
/// documents after the traversal.
pub async fn publish<G>(config: &RunConfig, generator: &Arc<G>) -> WikiResult<RunSummary>
where
	G: ReferenceGenerator + 'static,
{
	let mut fragments = FragmentSet::build(generator, &config.references).await;
	let mut summary = RunSummary::default();

	let accept_file = |path: &Path| {
		path.extension().and_then(|ext| ext.to_str()) == Some("md")
			&& !is_excluded(path, &config.exclude)
	};
	let accept_dir = |path: &Path| path != config.output_root && !is_excluded(path, &config.exclude);

	let mut consumer = |path: &Path| -> WikiResult<()> {
		let basename = path
			.file_name()
			.and_then(|name| name.to_str())
			.unwrap_or_default();
		if config
			.ignored_documents
			.iter()
			.any(|ignored| ignored == basename)
		{
			info!(path = %path.display(), "ignoring document");
			return Ok(());
		}

		let source_path = relative_source_path(path, &config.input_root);
		let content = std::fs::read_to_string(path)?;
		let mut record = document::extract(&source_path, &content)?;

		if basename == ROOT_DOCUMENT {
			if let Some(body) = fragments.take_for(&source_path) {
				info!(path = %source_path, "merging reference fragment");
				record.reference_fragment = Some(body);
				summary.merged_fragments += 1;
			}
		}

		if source_path == ROOT_DOCUMENT {
			// The input root's own README is the space landing page: it
			// carries the run title, pre-declares it, and has no parent.
			record.title = config.title.clone();
			record.wiki_title = Some(config.title.clone());
		} else {
			record.parent_title = hierarchy::resolve_parent_title(path, &config.input_root)
				.or_else(|| Some(config.title.clone()));
		}

		let text = assembler::render(&record, config);
		if assembler::persist(&record, &text, config)? {
			info!(path = %record.source_path, title = %record.title, "published");
			summary.written += 1;
		} else {
			summary.skipped += 1;
		}

		Ok(())
	};

	visitor::visit_files(&config.input_root, &accept_file, &accept_dir, &mut consumer)?;

	for fragment in fragments.unconsumed() {
		info!(dir = %fragment.source_dir, "publishing standalone reference fragment");
		let record = fragment.to_standalone_record(&config.title);
		let text = assembler::render(&record, config);
		if assembler::persist(&record, &text, config)? {
			summary.written += 1;
			summary.standalone_fragments += 1;
		}
	}

	Ok(summary)
}

/// Whether a path's basename is in the configured exclusion set. Applies
/// to files and directories alike.
fn is_excluded(path: &Path, exclude: &[String]) -> bool {
	path.file_name()
		.and_then(|name| name.to_str())
		.is_some_and(|name| exclude.iter().any(|excluded| excluded == name))
}

/// Path relative to the input root, normalized to forward slashes.
fn relative_source_path(path: &Path, input_root: &Path) -> String {
	path.strip_prefix(input_root)
		.unwrap_or(path)
		.to_string_lossy()
		.replace('\\', "/")
}
