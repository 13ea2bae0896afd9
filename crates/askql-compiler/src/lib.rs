#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Query segment compiler.
//!
//! Turns a [`Description`](askql_core::Description) tree into a graph of
//! [`QuerySegment`]s: joins against property tables, hierarchy closures and
//! boolean combinations, ready for a relational executor.
//!
//! # Example
//!
//! ```
//! use askql_compiler::{Collaborators, CompilerConfig, QueryBuilder};
//! use askql_core::{Description, MemoryStore};
//!
//! let store = MemoryStore::new().with_category("City", 5);
//! let config = CompilerConfig::default();
//!
//! let compiled = QueryBuilder::new(Collaborators::from_store(&store), &config)
//!     .compile(&Description::class(["City"]))
//!     .expect("well-formed description");
//!
//! assert_eq!(compiled.len(), 2);
//! assert!(compiled.diagnostics().is_empty());
//! ```

pub mod builder;
pub mod comparator;
pub mod compiled;
pub mod config;
pub mod diagnostics;
pub mod printer;
pub mod segment;

mod guard;
mod interpret;

#[cfg(test)]
mod test_utils;

use askql_core::Comparator;

pub use builder::{Collaborators, QueryBuilder};
pub use comparator::ComparatorMapper;
pub use compiled::CompiledQuery;
pub use config::{CompilerConfig, ConceptCaching};
pub use diagnostics::{DiagnosticKind, DiagnosticMessage, Diagnostics, Severity};
pub use printer::SegmentPrinter;
pub use segment::{Component, JoinField, QuerySegment, SegmentId, SegmentKind};

/// Contract violations that abort a compilation pass.
///
/// A well-formed description never produces these; they point at a parser
/// or host configuration that broke the compiler's input contract.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    #[error("comparator {0} has no backend operator")]
    UnsupportedComparator(Comparator),

    #[error("cannot process a {0} description inside a scalar property restriction")]
    UnsupportedScalarDescription(&'static str),
}

pub type Result<T> = std::result::Result<T, CompileError>;
