//! Typed, read-only HTML document tree.
//!
//! [`Document::parse`] turns markup into an arena of elements and trimmed
//! text runs. [`Element`] and [`Text`] are cheap `Copy` handles into that
//! arena; queries and table reconstruction work on those handles.

mod builder;
mod document;
mod element;
mod node;
mod select;
mod table;
mod text;

pub use document::Document;
pub use element::{Element, SelectorRoot};
pub use node::{Child, NodeId, Parent};
pub use select::Selection;
pub(crate) use table::distinct_text;
pub use table::{count_columns, read_table, read_table_rows, TableColumn, TableGrid, TableRow};
pub use text::Text;
