use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WikiError {
	#[error(transparent)]
	#[diagnostic(code(mdwiki::io_error))]
	Io(#[from] std::io::Error),

	#[error("input root not found: `{path}`")]
	#[diagnostic(
		code(mdwiki::root_not_found),
		help("check that the --input directory exists")
	)]
	RootNotFound { path: String },

	#[error("failure to load markdown: {0}")]
	#[diagnostic(code(mdwiki::markdown))]
	Markdown(String),

	#[error("reference generator failed for `{dir}`: {reason}")]
	#[diagnostic(
		code(mdwiki::generator),
		help("the directory is published without a reference fragment")
	)]
	Generator { dir: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdwiki::config_parse),
		help("check that mdwiki.toml is valid TOML with the expected keys")
	)]
	ConfigParse(String),
}

pub type WikiResult<T> = Result<T, WikiError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
