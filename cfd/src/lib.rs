//! configdumper - sorted viewer for flat configuration registries
//!
//! Reads a flat `key=value` (or `key: value`) registry file, sorts the
//! entries by key and shows them either in a scrollable terminal window or
//! as plain text on stdout.
//!
//! # Pipeline
//!
//! ```text
//! base.conf ──load──▶ ConfigStore ──┬─▶ build_header ─┐
//!                                   └─▶ format_dump ──┴─▶ Presenter
//!                                                           ├─ WindowPresenter
//!                                                           └─ ConsolePresenter
//! ```
//!
//! # Example
//!
//! ```ignore
//! use configdumper::{ConfigStore, build_header, format_dump};
//!
//! let store = ConfigStore::load("/etc/univention/base.conf")?;
//! let header = build_header("UCS", store.get(VERSION_KEY), store.get(PATCHLEVEL_KEY));
//! print!("{}\n{}", header, format_dump(&store));
//! ```

pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod header;
pub mod present;
mod store;

pub use dump::{DumpOptions, format_dump, format_dump_with};
pub use error::DumpError;
pub use header::{build_header, build_header_strict};
pub use present::{Completion, ConsolePresenter, Presenter, WindowPresenter, interactive_available};
pub use store::ConfigStore;

/// Registry file read when neither CLI nor config names one
pub const DEFAULT_REGISTRY_PATH: &str = "/etc/univention/base.conf";

/// Product name shown in the header
pub const DEFAULT_PRODUCT: &str = "Univention Corporate Server";

/// Key holding the product version
pub const VERSION_KEY: &str = "version/repository-version";

/// Key holding the optional patch level
pub const PATCHLEVEL_KEY: &str = "version/patchlevel";
