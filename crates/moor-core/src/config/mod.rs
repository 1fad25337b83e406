//! Project configuration (moor.toml)
//!
//! Declares the providers to install and how to install them.

pub mod parser;
pub mod schema;
pub mod store;

pub use parser::{parse_moor_toml, parse_moor_toml_str, to_toml};
pub use schema::{InstallSettings, MoorConfig, ProviderArgs, ProviderDecl};
pub use store::{CONFIG_FILE_NAME, ConfigStore};
