#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod reader;
pub mod skeleton;

pub use config::{
    DatasetConfig, MatchConfig, OutputColumnConfig, RelationConfig, load_alias_table,
    load_match_config, load_taxonomy_tree,
};
pub use error::{IngestError, Result};
pub use reader::read_table;
pub use skeleton::{AliasSkeleton, SkeletonFilter, build_alias_skeleton};
