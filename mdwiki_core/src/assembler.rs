use tracing::info;

use crate::WikiResult;
use crate::config::RunConfig;
use crate::document::DocumentRecord;
use crate::document::ROOT_DOCUMENT;

/// Compose the final output text for a record.
///
/// The pipeline runs in fixed order: strip the leading heading matching
/// the resolved title, prepend the provenance banner, then the `Title:`,
/// `Parent:`, and `Space:` directives as required, and finally append any
/// merged reference fragment. Because directives are prepended one at a
/// time, they appear in the output as `Space:`, `Parent:`, `Title:`.
pub fn render(record: &DocumentRecord, config: &RunConfig) -> String {
	let heading = format!("# {}\n", record.title);
	let mut text = record.content.replacen(&heading, "\n", 1);

	if let Some(base) = &config.git_base_url {
		let url = format!("{base}tree/master/{}", record.source_path);
		// Root-document links collapse to the containing directory.
		let url = url
			.strip_suffix(&format!("/{ROOT_DOCUMENT}"))
			.unwrap_or(url.as_str());
		text = format!("\nAutogenerated from {url}\n{text}");
	}

	if record.wiki_title.is_none() {
		text = format!("<!-- Title: {} -->\n{text}", record.title);
	}

	if let Some(parent) = &record.parent_title {
		text = format!("<!-- Parent: {parent} -->\n{text}");
	}

	if record.wiki_space.is_none() {
		text = format!("<!-- Space: {} -->\n{text}", config.space);
	}

	if let Some(fragment) = &record.reference_fragment {
		text = format!("{text}\n\n{fragment}");
	}

	text
}

/// Write the rendered text to the record's path under the output root,
/// creating directories as needed and overwriting unconditionally.
///
/// A record with the skip directive set is not written and `Ok(false)` is
/// returned; write failures propagate to the caller.
pub fn persist(record: &DocumentRecord, text: &str, config: &RunConfig) -> WikiResult<bool> {
	if record.wiki_skip {
		info!(path = %record.source_path, "skip directive set, not writing");
		return Ok(false);
	}

	let target = config.output_root.join(&record.source_path);
	if let Some(parent) = target.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(&target, text)?;

	Ok(true)
}
