//! Swagger Document Merger
//!
//! Merges independently generated, per-service Swagger 2.0 documents into a
//! single consistent document for downstream consumption (e.g. an API
//! browser). Every service is generated in isolation, so schema names
//! collide across services; each document's names are disambiguated with the
//! package declared in its companion `.proto` file before merging.
//!
//! ## Features
//!
//! - **Namespace Disambiguation**: top-level definition names are qualified
//!   with the originating protobuf package
//! - **Reference Rewriting**: every `$ref` inside a document is rewritten to
//!   its qualified target
//! - **Deterministic Output**: documents are folded in sorted path order and
//!   rendered with sorted keys, so repeated runs are byte-identical
//! - **Verbatim Passthrough**: documents without a companion `.proto` are
//!   merged unchanged
//!
//! ## Input layout
//!
//! ```text
//! <root>/
//! └── api/
//!     ├── inference/v1/
//!     │   ├── service.swagger.json
//!     │   └── service.proto
//!     └── management/v1/
//!         ├── service.swagger.json
//!         └── service.proto
//! ```

pub mod checksum;
pub mod config;
pub mod discover;
pub mod error;
pub mod merge;
pub mod package;
pub mod rewrite;

pub use checksum::Checksum;
pub use config::MergeConfig;
pub use discover::{discover_documents, SortedDocumentPaths};
pub use error::{MergeError, Result};
pub use merge::{merge, MergeOptions, MergedDocument};
pub use package::PackageName;
