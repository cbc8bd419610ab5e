use std::path::Path;

use mdwiki_core::AnyEmptyResult;
use similar_asserts::assert_eq;

mod common;

use common::mdwiki_cmd;

fn run_publish(input: &Path, output: &Path, title: &str) -> assert_cmd::assert::Assert {
	mdwiki_cmd()
		.arg("--input")
		.arg(input)
		.arg("--output")
		.arg(output)
		.arg("--space")
		.arg("DOCS")
		.arg("--title")
		.arg(title)
		.assert()
}

#[test]
fn publishes_tree_with_injected_directives() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("in");
	let output = tmp.path().join("out");
	std::fs::create_dir_all(input.join("docs"))?;
	std::fs::write(input.join("README.md"), "# Project\n\nWelcome.\n")?;
	std::fs::write(input.join("docs/guide.md"), "# Guide\n\nHow to use it.\n")?;

	run_publish(&input, &output, "Project")
		.success()
		.stdout(predicates::str::contains("Published 2 document(s)"));

	let landing = std::fs::read_to_string(output.join("README.md"))?;
	assert!(landing.starts_with("<!-- Space: DOCS -->\n"));
	assert!(!landing.contains("<!-- Parent:"));

	let guide = std::fs::read_to_string(output.join("docs/guide.md"))?;
	assert!(guide.contains("<!-- Space: DOCS -->"));
	assert!(guide.contains("<!-- Parent: Project -->"));
	assert!(guide.contains("<!-- Title: Guide -->"));
	assert!(guide.contains("How to use it.\n"));

	Ok(())
}

#[test]
fn skip_directive_withholds_the_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("in");
	let output = tmp.path().join("out");
	std::fs::create_dir_all(&input)?;
	std::fs::write(input.join("hidden.md"), "<!-- Skip: true -->\n\n# Hidden\n")?;
	std::fs::write(input.join("shown.md"), "<!-- Skip: false -->\n\n# Shown\n")?;

	run_publish(&input, &output, "Project").success();

	assert!(!output.join("hidden.md").exists());
	assert!(output.join("shown.md").exists());

	Ok(())
}

#[test]
fn nested_document_inherits_ancestor_parent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("in");
	let output = tmp.path().join("out");
	std::fs::create_dir_all(input.join("alpha/beta"))?;
	std::fs::write(input.join("README.md"), "# Project\n")?;
	std::fs::write(input.join("alpha/README.md"), "# Alpha\n")?;
	std::fs::write(input.join("alpha/beta/doc.md"), "# Deep Doc\n")?;

	run_publish(&input, &output, "Project").success();

	let deep = std::fs::read_to_string(output.join("alpha/beta/doc.md"))?;
	assert!(deep.contains("<!-- Parent: Alpha -->"));

	Ok(())
}

#[test]
fn reference_fragments_merge_and_promote() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("in");
	let output = tmp.path().join("out");
	std::fs::create_dir_all(input.join("api"))?;
	std::fs::write(input.join("README.md"), "# Project\n")?;
	std::fs::write(input.join("api/README.md"), "# Api\n\nIntro.\n")?;
	std::fs::write(input.join("apifrag.txt"), "## Generated API\n\napi reference\n")?;
	std::fs::write(input.join("libfrag.txt"), "library reference\n")?;
	std::fs::write(
		input.join("mdwiki.toml"),
		"[[reference]]\ndir = \"api\"\ncommand = \"cat apifrag.txt\"\n\n[[reference]]\ndir = \
		 \"lib\"\ntitle = \"Library Reference\"\ncommand = \"cat libfrag.txt\"\n",
	)?;

	run_publish(&input, &output, "Project").success();

	// Fragment merged into the directory's root document.
	let api = std::fs::read_to_string(output.join("api/README.md"))?;
	assert!(api.contains("Intro.\n"));
	assert!(api.contains("## Generated API"));

	// Unmatched fragment promoted to a standalone document.
	let lib = std::fs::read_to_string(output.join("lib/README.md"))?;
	assert!(lib.contains("<!-- Title: Library Reference -->"));
	assert!(lib.contains("<!-- Parent: Project -->"));
	assert!(lib.contains("library reference\n"));

	Ok(())
}

#[test]
fn failing_generator_does_not_abort_the_run() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("in");
	let output = tmp.path().join("out");
	std::fs::create_dir_all(&input)?;
	std::fs::write(input.join("README.md"), "# Project\n")?;
	std::fs::write(input.join("goodfrag.txt"), "good reference\n")?;
	std::fs::write(
		input.join("mdwiki.toml"),
		"[[reference]]\ndir = \"bad\"\ncommand = \"false\"\n\n[[reference]]\ndir = \
		 \"good\"\ncommand = \"cat goodfrag.txt\"\n",
	)?;

	run_publish(&input, &output, "Project").success();

	assert!(!output.join("bad").exists());
	let good = std::fs::read_to_string(output.join("good/README.md"))?;
	assert!(good.contains("good reference\n"));

	Ok(())
}

#[test]
fn exclude_flag_prunes_directories() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("in");
	let output = tmp.path().join("out");
	std::fs::create_dir_all(input.join("drafts"))?;
	std::fs::write(input.join("README.md"), "# Project\n")?;
	std::fs::write(input.join("drafts/wip.md"), "# WIP\n")?;

	mdwiki_cmd()
		.arg("--input")
		.arg(&input)
		.arg("--output")
		.arg(&output)
		.arg("--title")
		.arg("Project")
		.arg("-X")
		.arg("drafts")
		.assert()
		.success();

	assert!(output.join("README.md").exists());
	assert!(!output.join("drafts").exists());

	Ok(())
}

#[test]
fn exclude_flag_prunes_file_basenames() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("in");
	let output = tmp.path().join("out");
	std::fs::create_dir_all(&input)?;
	std::fs::write(input.join("README.md"), "# Project\n")?;
	std::fs::write(input.join("internal.md"), "# Internal\n")?;

	mdwiki_cmd()
		.arg("--input")
		.arg(&input)
		.arg("--output")
		.arg(&output)
		.arg("--title")
		.arg("Project")
		.arg("-X")
		.arg("internal.md")
		.assert()
		.success();

	assert!(output.join("README.md").exists());
	assert!(!output.join("internal.md").exists());

	Ok(())
}

#[test]
fn reruns_produce_identical_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let input = tmp.path().join("in");
	let output = tmp.path().join("out");
	std::fs::create_dir_all(input.join("docs"))?;
	std::fs::write(input.join("README.md"), "# Project\n\nWelcome.\n")?;
	std::fs::write(input.join("docs/guide.md"), "# Guide\n\nBody.\n")?;

	run_publish(&input, &output, "Project").success();
	let first = std::fs::read_to_string(output.join("docs/guide.md"))?;

	run_publish(&input, &output, "Project").success();
	let second = std::fs::read_to_string(output.join("docs/guide.md"))?;

	assert_eq!(first, second);

	Ok(())
}

#[test]
fn missing_input_root_fails_with_diagnostic() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let output = tmp.path().join("out");

	mdwiki_cmd()
		.arg("--input")
		.arg(tmp.path().join("no-such-dir"))
		.arg("--output")
		.arg(&output)
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("not found"));

	Ok(())
}
