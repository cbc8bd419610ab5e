//! `mdwiki_core` walks a documentation tree of markdown files and re-emits
//! it as a flat, directive-annotated document set ready for import into an
//! external wiki.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Input tree
//!   → Reference generation (all configured sources, concurrently)
//!   → PathVisitor (depth-first traversal under exclusion rules)
//!   → MetadataExtractor (title + Space/Title/Skip directives per document)
//!   → ReferenceMerger (directory-keyed fragment lookup for root documents)
//!   → HierarchyResolver (nearest ancestor root-document title)
//!   → DocumentAssembler (directive injection, provenance banner, persist)
//! ```
//!
//! ## Key Types
//!
//! - [`RunConfig`] — Immutable configuration resolved once per run.
//! - [`DocumentRecord`] — One discovered document with its publishing
//!   metadata.
//! - [`FragmentSet`] — Generated reference fragments keyed by source
//!   directory, with consumption tracking.
//! - [`ReferenceGenerator`] — The external generator collaborator;
//!   [`CommandGenerator`] shells out to a configured command.
//! - [`RunSummary`] — Counters returned by [`publish`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mdwiki_core::CommandGenerator;
//! use mdwiki_core::ConfigOverrides;
//! use mdwiki_core::RunConfig;
//! use mdwiki_core::publish;
//! use std::path::Path;
//!
//! # async fn run() -> mdwiki_core::WikiResult<()> {
//! let config = RunConfig::resolve(
//! 	Path::new("./docs"),
//! 	Path::new("./out"),
//! 	ConfigOverrides::default(),
//! )?;
//! let generator = Arc::new(CommandGenerator {
//! 	working_dir: config.input_root.clone(),
//! });
//! let summary = publish(&config, &generator).await?;
//! println!("published {} document(s)", summary.written);
//! # Ok(())
//! # }
//! ```

pub use assembler::*;
pub use config::*;
pub use document::*;
pub use engine::*;
pub use error::*;
pub use hierarchy::*;
pub use reference::*;
pub use visitor::*;

pub mod assembler;
pub mod config;
pub mod document;
mod engine;
mod error;
pub mod hierarchy;
pub mod reference;
mod visitor;
