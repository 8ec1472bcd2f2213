// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use
#![allow(clippy::format_push_string)] // String building style preference
#![allow(clippy::cast_precision_loss)] // Integer/float key comparison
#![allow(clippy::double_must_use)] // Functions returning must_use types can have their own docs

//! # cursor-paginator - Keyset Pagination with Opaque Cursors
//!
//! Pages through an ordered collection without offsets. Every page is one
//! bounded read: items strictly after (or before) a cursor, in a fixed
//! multi-key ordering, limited to the page size plus one.
//!
//! ## Quick Start
//!
//! ```
//! use cursor_paginator::prelude::*;
//!
//! #[derive(Debug, Clone)]
//! struct Post {
//!     id: i64,
//!     created: String,
//! }
//!
//! impl Record for Post {
//!     fn field(&self, name: &str) -> Option<Field<'_>> {
//!         match name {
//!             "id" => Some(Field::Value(self.id.into())),
//!             "created" => Some(Field::Value(self.created.as_str().into())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let posts: MemorySource<Post> = (1..=5)
//!     .map(|id| Post { id, created: format!("2024-01-0{id}") })
//!     .collect();
//! let paginator = Paginator::try_new(posts, &["-created", "id"])?;
//!
//! // Newest two
//! let page = paginator.page(PageRequest::new().first(2))?;
//! assert_eq!(page.iter().map(|p| p.id).collect::<Vec<_>>(), [5, 4]);
//! assert!(page.has_next());
//!
//! // The two after them
//! let info = paginator.page_info(&page)?;
//! let next = paginator.page(PageRequest::new().first(2).after(info.end_cursor.unwrap()))?;
//! assert_eq!(next.iter().map(|p| p.id).collect::<Vec<_>>(), [3, 2]);
//! assert!(next.has_previous());
//! # Ok::<(), cursor_paginator::Error>(())
//! ```
//!
//! ## Orderings
//!
//! An ordering is a list of keys such as `"-created"` (descending) or
//! `"author.name"` (a field reached through a relation). NULLs sort after
//! every value on each key. End the list with a unique key so that no two
//! items share a position.
//!
//! ## Sources
//!
//! The paginator delegates storage to a [`Source`] (or [`AsyncSource`]),
//! which receives a [`Window`]: an ordering, keyset boundaries and a limit.
//! [`MemorySource`] evaluates windows in memory; [`sql::SqlQuery`] renders
//! them as parameterized SQL for Postgres, `SQLite` and `MySQL`.
//!
//! ## Cursors
//!
//! Cursors are opaque, URL-safe and bound to the ordering that minted them.
//! A cursor from another ordering, a tampered cursor or an oversized one is
//! rejected with [`Error::InvalidCursor`].

mod boundary;
mod config;
mod cursor;
mod error;
mod ordering;
mod paginator;
mod record;
mod source;
mod value;

pub mod sql;

pub use boundary::{
    Boundary, CoercionError, CompoundFilter, Filter, FilterExpr, LogicalOp, Operator, Side,
    compare_records, compare_values,
};
pub use config::{ENV_MAX_CURSOR_LEN, ENV_MAX_PAGE_SIZE, PaginatorConfig};
pub use cursor::{Cursor, CursorCodec, CursorError, DEFAULT_MAX_CURSOR_LEN, Position};
pub use error::{Error, SourceError};
pub use ordering::{
    Direction, FieldPath, NullsOrder, OrderingError, OrderingKey, OrderingSpec,
    is_valid_identifier,
};
pub use paginator::{Page, PageInfo, PageRequest, Paginator};
pub use record::{Field, Record, resolve};
pub use source::{AsyncSource, MemoryError, MemorySource, Source, Window};
pub use value::Value;

/// Prelude module for convenient imports.
///
/// ```
/// use cursor_paginator::prelude::*;
/// let ordering = OrderingSpec::parse(&["-created", "id"]).unwrap();
/// assert_eq!(ordering.to_string(), "-created,id");
/// ```
pub mod prelude {
    pub use crate::{
        AsyncSource, Cursor, Direction, Error, Field, MemorySource, OrderingSpec, Page,
        PageInfo, PageRequest, Paginator, PaginatorConfig, Record, Source, Value, Window,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
