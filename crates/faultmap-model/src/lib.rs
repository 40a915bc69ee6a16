#![deny(unsafe_code)]

pub mod alias;
pub mod error;
pub mod table;
pub mod taxonomy;

pub use alias::{AliasEntry, AliasTable};
pub use error::{EngineError, Result};
pub use table::{Row, Table};
pub use taxonomy::{TaxonomyNode, TaxonomyTree};
