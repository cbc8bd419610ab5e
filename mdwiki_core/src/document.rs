use std::path::Path;

use markdown::ParseOptions;
use markdown::mdast::Node;

use crate::WikiError;
use crate::WikiResult;

/// Basename of the document that supplies a directory's default title.
pub const ROOT_DOCUMENT: &str = "README.md";

/// One discovered document, ready for rendering.
///
/// `source_path` is always relative to the input root and uses forward
/// slashes; it identifies the document within a run and doubles as its
/// relative location under the output root.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
	/// Path relative to the input root.
	pub source_path: String,
	/// Resolved display title. Never empty.
	pub title: String,
	/// Publishing space declared by a `Space:` directive, if any. When
	/// absent the assembler injects the run's default space.
	pub wiki_space: Option<String>,
	/// Pre-declared external title from a `Title:` directive. When absent
	/// the assembler injects a `Title:` directive with the resolved title.
	pub wiki_title: Option<String>,
	/// When true the record is fully processed but never written.
	pub wiki_skip: bool,
	/// Raw original text.
	pub content: String,
	/// Title of the nearest ancestor root document, or the run title for
	/// documents without one. `None` only for the run's own landing page.
	pub parent_title: Option<String>,
	/// Generated reference markdown merged in for matching root documents.
	pub reference_fragment: Option<String>,
}

/// Parse a document's leading structure into a [`DocumentRecord`].
///
/// The title is resolved in order of preference: the first top-level
/// heading, then (for root documents) the titleized containing-directory
/// name, then the titleized basename with its extension stripped.
/// Publishing directives are read from HTML comments; only the first
/// occurrence of each directive kind is honored.
pub fn extract(source_path: &str, content: &str) -> WikiResult<DocumentRecord> {
	let tree = markdown::to_mdast(content, &ParseOptions::default())
		.map_err(|message| WikiError::Markdown(message.to_string()))?;

	let title = first_heading_in_tree(&tree).unwrap_or_else(|| default_title(source_path));

	let mut comments = Vec::new();
	collect_comments(&tree, &mut comments);

	let wiki_space = directive_value(&comments, "Space:");
	let wiki_title = directive_value(&comments, "Title:");
	let wiki_skip = directive_value(&comments, "Skip:").is_some_and(|value| value == "true");

	Ok(DocumentRecord {
		source_path: source_path.to_string(),
		title,
		wiki_space,
		wiki_title,
		wiki_skip,
		content: content.to_string(),
		parent_title: None,
		reference_fragment: None,
	})
}

/// Text of the first top-level heading in `content`, if any. Unparsable
/// content yields `None` rather than failing.
pub fn first_heading(content: &str) -> Option<String> {
	let tree = markdown::to_mdast(content, &ParseOptions::default()).ok()?;
	first_heading_in_tree(&tree)
}

fn first_heading_in_tree(tree: &Node) -> Option<String> {
	let children = tree.children()?;
	children.iter().find_map(|node| match node {
		Node::Heading(heading) if heading.depth == 1 => {
			let text = inline_text(node);
			let text = text.trim();
			if text.is_empty() {
				None
			} else {
				Some(text.to_string())
			}
		}
		_ => None,
	})
}

/// Concatenated literal text of a node's inline children.
fn inline_text(node: &Node) -> String {
	match node {
		Node::Text(text) => text.value.clone(),
		Node::InlineCode(code) => code.value.clone(),
		_ => node
			.children()
			.map(|children| children.iter().map(inline_text).collect())
			.unwrap_or_default(),
	}
}

/// Gather HTML comments in document order.
fn collect_comments(node: &Node, comments: &mut Vec<String>) {
	if let Node::Html(html) = node {
		if html.value.starts_with("<!--") {
			comments.push(html.value.clone());
		}
	}

	if let Some(children) = node.children() {
		for child in children {
			collect_comments(child, comments);
		}
	}
}

/// First usable value for a directive keyword across the comments.
/// Comments that contain the keyword but carry no value are passed over,
/// so a malformed directive never fails the run.
fn directive_value(comments: &[String], keyword: &str) -> Option<String> {
	comments.iter().find_map(|comment| {
		let start = comment.find(keyword)? + keyword.len();
		let raw = &comment[start..];
		let raw = raw.find("-->").map_or(raw, |end| &raw[..end]);
		let value = raw.trim();
		if value.is_empty() {
			None
		} else {
			Some(value.to_string())
		}
	})
}

fn default_title(source_path: &str) -> String {
	let path = Path::new(source_path);
	let basename = path
		.file_name()
		.and_then(|name| name.to_str())
		.unwrap_or(source_path);

	if basename == ROOT_DOCUMENT {
		if let Some(dir) = path
			.parent()
			.and_then(Path::file_name)
			.and_then(|name| name.to_str())
		{
			return titleize(dir);
		}
	}

	let stem = Path::new(basename)
		.file_stem()
		.and_then(|stem| stem.to_str())
		.unwrap_or(basename);
	titleize(stem)
}

/// Capitalize the first character and replace the first hyphen and the
/// first underscore (each, if present) with a space.
///
/// Only the first occurrence of each separator is replaced:
/// `titleize("my-doc-two")` is `"My doc-two"`.
pub fn titleize(value: &str) -> String {
	let capitalized = match value.chars().next() {
		Some(first) => first.to_uppercase().collect::<String>() + &value[first.len_utf8()..],
		None => String::new(),
	};
	capitalized.replacen('-', " ", 1).replacen('_', " ", 1)
}
