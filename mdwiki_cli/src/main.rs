use std::process;
use std::sync::Arc;

use clap::Parser;
use mdwiki_cli::MdwikiCli;
use mdwiki_core::CommandGenerator;
use mdwiki_core::ConfigOverrides;
use mdwiki_core::RunConfig;
use mdwiki_core::RunSummary;
use mdwiki_core::publish;
use tracing_subscriber::EnvFilter;

fn main() {
	let args = MdwikiCli::parse();

	let use_color = std::env::var_os("NO_COLOR").is_none();

	let default_filter = if args.verbose { "info" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
		)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if let Err(e) = run(&args) {
		// Render through miette for rich diagnostics with help text and
		// error codes.
		match e.downcast::<mdwiki_core::WikiError>() {
			Ok(wiki_err) => {
				let report: miette::Report = (*wiki_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("error: {e}");
			}
		}
		process::exit(2);
	}
}

fn run(args: &MdwikiCli) -> Result<(), Box<dyn std::error::Error>> {
	let overrides = ConfigOverrides {
		space: args.space.clone(),
		title: args.title.clone(),
		exclude: args.exclude.clone(),
	};
	let config = RunConfig::resolve(&args.input, &args.output, overrides)?;
	let generator = Arc::new(CommandGenerator {
		working_dir: config.input_root.clone(),
	});

	let rt = tokio::runtime::Runtime::new()?;
	let summary = rt.block_on(publish(&config, &generator))?;

	print_summary(&summary, &config);
	Ok(())
}

fn print_summary(summary: &RunSummary, config: &RunConfig) {
	println!(
		"Published {} document(s) to {}",
		summary.written,
		config.output_root.display()
	);
	if summary.skipped > 0 {
		println!("  skipped (Skip: true): {}", summary.skipped);
	}
	if summary.merged_fragments > 0 {
		println!("  merged reference fragments: {}", summary.merged_fragments);
	}
	if summary.standalone_fragments > 0 {
		println!(
			"  standalone reference documents: {}",
			summary.standalone_fragments
		);
	}
}
