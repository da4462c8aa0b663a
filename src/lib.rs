//! organizer - sort a flat folder into category subfolders by extension
//!
//! The library is a linear pipeline:
//! [`discover`] the files of a source folder, [`plan`] where each one goes
//! (category folder plus a collision-free name), optionally [`execute`] the
//! plan, then [`summarize`] it per category.
//!
//! ```no_run
//! use organizer::{CategoryTable, discover, execute, plan, summarize};
//! use std::path::Path;
//!
//! let table = CategoryTable::builtin();
//! let files = discover(Path::new("/home/me/Downloads"))?;
//! let plan = plan(&files, Path::new("/home/me/Downloads/Organized"), &table);
//! execute(&plan)?;
//! for (category, count) in summarize(&plan).iter() {
//!     println!("- {}: {}", category, count);
//! }
//! # Ok::<(), organizer::OrganizeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod conflict;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod file_category;
pub mod logging;
pub mod output;
pub mod planner;
pub mod summary;

pub use config::{CompiledFilters, ConfigError, OrganizerConfig};
pub use conflict::{disambiguate, disambiguate_against};
pub use discovery::discover;
pub use error::{OrganizeError, OrganizeResult};
pub use executor::{ExecutionReport, execute, execute_best_effort, execute_with};
pub use file_category::{CategoryTable, OTHERS, extension_of};
pub use planner::{MovePair, Plan, plan, resolve};
pub use summary::{Summary, summarize};

pub use cli::{Args, run_cli};
