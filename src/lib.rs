//! # shapecast - runtime attribute access and shape-to-shape conversion
//!
//! shapecast lets a caller read, write, and copy named attributes of
//! record-like values by string name, including dotted paths into nested
//! aggregates, without knowing the concrete shape at compile time. It also
//! performs best-effort structural conversion between differently-shaped
//! aggregates and upsert-by-index into typed sequences.
//!
//! ## Core Concepts
//!
//! - **Shape**: an explicit descriptor of an aggregate type (ordered,
//!   named, typed fields)
//! - **Record**: an aggregate instance whose slots always satisfy its shape
//! - **Doc**: an insertion-ordered string-keyed map, the shape-agnostic
//!   fallback destination
//! - **Accessor**: a session over one root value that buffers writes and
//!   commits atomically on flush
//!
//! ## Usage
//!
//! ```rust
//! use shapecast::{Accessor, FieldType, Record, Shape, Value};
//!
//! let person = Shape::builder("Person")
//!     .field("Name", FieldType::Str)
//!     .field("Salutation", FieldType::Str)
//!     .build()?;
//! let employee = Shape::builder("Employee")
//!     .field("Person", FieldType::OptionalRecord(person))
//!     .field("Role", FieldType::Str)
//!     .build()?;
//!
//! let mut root = Value::Record(Record::zeroed(employee));
//! Accessor::from_root(&mut root)
//!     .set("Role", "Founder")
//!     .set("Person.Salutation", "Tn.") // allocates the null Person
//!     .flush()?;
//!
//! let salutation = Accessor::from_root(&mut root).get("Person.Salutation")?;
//! assert_eq!(salutation, Value::Str("Tn.".into()));
//! # Ok::<(), shapecast::AccessError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod accessor;
pub mod assign;
pub mod copy;
pub mod doc;
pub mod error;
mod path;
pub mod record;
pub mod shape;
pub mod upsert;
pub mod value;

// Re-export primary types at crate root for convenience
pub use accessor::Accessor;
pub use assign::assign_value;
pub use copy::{copy_attributes, copy_attributes_by_name, create_from};
pub use doc::Doc;
pub use error::{AccessError, AccessResult};
pub use record::Record;
pub use shape::{FieldDef, FieldType, Shape, ShapeBuilder};
pub use upsert::assign_slice_item;
pub use value::{FromValue, List, Value};
