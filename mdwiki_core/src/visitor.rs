use std::path::Path;

use crate::WikiError;
use crate::WikiResult;

/// Visit every file reachable from `root` depth-first, feeding accepted
/// paths to `consumer`.
///
/// A directory is entered only when `accept_dir` returns true for it (the
/// root included); a rejected directory is pruned entirely, so none of its
/// descendants are visited. Files are passed to `consumer` only when
/// `accept_file` returns true. Siblings are visited in name order so that
/// repeated runs produce identical logs, and a directory's descendants are
/// always visited contiguously.
///
/// A `root` that does not exist fails with [`WikiError::RootNotFound`]. A
/// `root` that is a plain file is handed to `consumer` directly.
pub fn visit_files<F, D, C>(
	root: &Path,
	accept_file: &F,
	accept_dir: &D,
	consumer: &mut C,
) -> WikiResult<()>
where
	F: Fn(&Path) -> bool,
	D: Fn(&Path) -> bool,
	C: FnMut(&Path) -> WikiResult<()>,
{
	if !root.exists() {
		return Err(WikiError::RootNotFound {
			path: root.display().to_string(),
		});
	}

	if root.is_dir() {
		if !accept_dir(root) {
			return Ok(());
		}
		walk_dir(root, accept_file, accept_dir, consumer)
	} else if accept_file(root) {
		consumer(root)
	} else {
		Ok(())
	}
}

fn walk_dir<F, D, C>(dir: &Path, accept_file: &F, accept_dir: &D, consumer: &mut C) -> WikiResult<()>
where
	F: Fn(&Path) -> bool,
	D: Fn(&Path) -> bool,
	C: FnMut(&Path) -> WikiResult<()>,
{
	let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<Result<_, _>>()?;
	entries.sort_by_key(std::fs::DirEntry::file_name);

	for entry in entries {
		let path = entry.path();
		if path.is_dir() {
			if accept_dir(&path) {
				walk_dir(&path, accept_file, accept_dir, consumer)?;
			}
		} else if accept_file(&path) {
			consumer(&path)?;
		}
	}

	Ok(())
}
