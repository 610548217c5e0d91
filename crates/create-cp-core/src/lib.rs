//! # create-cp-core
//!
//! Core library for the create-cp CLI providing:
//! - The owner/variant template catalog and its flat name lookup
//! - Target directory and package name normalization
//! - The interactive resolver deciding what to clone, and where
//! - Target directory preparation, cloning, and manifest patching
//!
//! # Example
//!
//! ```no_run
//! use create_cp_core::{CancellationToken, InitialFlags, RuntimeConfig, Scaffolder};
//! use create_cp_core::fetch::FetchProgress;
//! use create_cp_core::resolver::Prompter;
//! use camino::Utf8PathBuf;
//!
//! # async fn example(
//! #     prompter: &mut dyn Prompter,
//! #     progress: &dyn FetchProgress,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let scaffolder = Scaffolder::new(RuntimeConfig::default(), Utf8PathBuf::from("/tmp"));
//! let flags = InitialFlags::new(Some("my-app"), Some("vitesse".to_string()));
//! let outcome = scaffolder
//!     .run(flags, prompter, progress, &CancellationToken::new(), None)
//!     .await?;
//! std::process::exit(outcome.exit_code());
//! # }
//! ```

pub mod cancel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod fsutil;
pub mod naming;
pub mod patch;
pub mod resolver;
pub mod scaffold;

pub use cancel::CancellationToken;
pub use catalog::{builtin_owners, ColorTag, TemplateCatalog, TemplateNode};
pub use config::{ConfigLoader, RuntimeConfig};
pub use error::{Error, Result};
pub use resolver::{InitialFlags, Resolution, ResolvedSession};
pub use scaffold::{Outcome, Scaffolder};
