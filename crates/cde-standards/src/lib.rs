#![deny(unsafe_code)]

pub mod csv;
pub mod error;
pub mod hash;
pub mod layout;
pub mod loaders;
pub mod registry;
pub mod version;

pub use crate::csv::cde::{CdeRow, Specificity, parse_cde_csv, parse_cde_reader};
pub use crate::error::StandardsError;
pub use crate::layout::{ModalityTables, TableGroup, TableLayout};
pub use crate::loaders::{STANDARDS_ENV_VAR, default_standards_root, load_registry, load_release};
pub use crate::registry::{CdeRegistry, CdeRelease, SchemaSet};
pub use crate::version::canonical_version;
