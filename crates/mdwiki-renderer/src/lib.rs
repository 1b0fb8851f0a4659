//! Atlassian wiki markup renderer for markdown document trees.
//!
//! [`WikiRenderer`] walks a [`mdwiki_tree::Document`] and writes wiki markup
//! (Confluence/Jira notation) to any [`std::io::Write`] destination.
//!
//! # Architecture
//!
//! Output is driven by a [`Registry`] that maps each node kind to a pair of
//! emission routines, one for the entry visit and one for the exit visit.
//! [`Registry::wiki`] holds the standard table; callers can override single
//! kinds or start from [`Registry::empty`].
//!
//! Routines receive a [`RenderContext`] carrying the output buffer, the
//! source text the tree's segments point into, and the footnote labels of
//! the document.
//!
//! # Example
//!
//! ```
//! use mdwiki_markdown::{ParseOptions, parse};
//! use mdwiki_renderer::WikiRenderer;
//!
//! let parsed = parse("# Hello\n\n**Bold** text", &ParseOptions::default());
//! let output = WikiRenderer::new()
//!     .render_to_string(parsed.source(), parsed.document().root())
//!     .unwrap();
//! assert_eq!(output, "h1.Hello\n\n\n*Bold* text\n");
//! ```

mod context;
mod error;
mod markup;
mod registry;
mod renderer;
mod routines;
mod sink;
mod substitution;

pub use context::RenderContext;
pub use error::RenderError;
pub use registry::{Handlers, Registry, RenderFn};
pub use renderer::WikiRenderer;
pub use substitution::html_to_wiki;
