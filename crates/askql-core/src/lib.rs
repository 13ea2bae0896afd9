#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for askql.
//!
//! Two layers:
//! - **Description algebra**: the typed query tree (`Description`) and the
//!   literals it refers to
//! - **Store interfaces**: the collaborator traits the segment compiler
//!   consumes, plus an in-memory implementation for tests and tooling

pub mod data_item;
pub mod description;
pub mod features;
pub mod memory;
pub mod namespace;
pub mod printer;
pub mod store;

#[cfg(test)]
mod data_item_tests;

pub use data_item::{Comparator, DataItem, DataItemType, PageRef, PropertyRef};
pub use description::{
    ClassDescription, ConceptDescription, Description, Junction, NamespaceDescription,
    SomePropertyDescription, ValueDescription,
};
pub use features::QueryFeatures;
pub use memory::{MemoryStore, PropertySpec, StoreError};
pub use namespace::NamespaceId;
pub use printer::DescriptionPrinter;
pub use store::{EntityId, UNKNOWN_ID};
