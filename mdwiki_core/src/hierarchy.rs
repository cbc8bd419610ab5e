use std::path::Path;

use tracing::debug;

use crate::document::ROOT_DOCUMENT;
use crate::document::first_heading;

/// Title of the nearest ancestor root document for a nested document.
///
/// Ancestor directories strictly above the document's own directory are
/// inspected bottom-up, stopping before the input root (exclusive); the
/// walk never escapes the input root. The first ancestor whose root
/// document yields a top-level heading wins; an ancestor root document
/// without a heading supplies no title and the walk continues past it.
///
/// Returns `None` when no ancestor supplies a title — the caller falls
/// back to the run's default title. Documents located directly in the
/// input root need no walk at all and should be given the default title
/// by the caller.
pub fn resolve_parent_title(document: &Path, input_root: &Path) -> Option<String> {
	let mut ancestor = document.parent()?.parent()?;

	while ancestor != input_root && ancestor.starts_with(input_root) {
		let root_document = ancestor.join(ROOT_DOCUMENT);
		if root_document.is_file() {
			if let Ok(content) = std::fs::read_to_string(&root_document) {
				if let Some(title) = first_heading(&content) {
					debug!(parent = %root_document.display(), %title, "resolved parent document");
					return Some(title);
				}
			}
		}
		ancestor = ancestor.parent()?;
	}

	None
}
