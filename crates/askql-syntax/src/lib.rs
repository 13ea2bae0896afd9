#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Ask query-string syntax.
//!
//! [`AskParser`] turns text such as `[[Category:City]][[Population::>1000]]`
//! into a [`Description`](askql_core::Description). Property datatypes
//! decide how each literal is read, so the parser borrows a
//! [`DatatypeRegistry`](askql_core::store::DatatypeRegistry).
//!
//! ```
//! use askql_core::{Description, MemoryStore};
//! use askql_syntax::AskParser;
//!
//! let store = MemoryStore::new();
//! let parsed = AskParser::new(&store).parse_query("[[Category:City]]").unwrap();
//! assert_eq!(parsed, Description::class(["City"]));
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;

#[cfg(test)]
mod printer_tests;

pub use error::{ParseError, ParseErrorKind};
pub use parser::AskParser;
pub use printer::ErrorPrinter;
