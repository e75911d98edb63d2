pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::PeeringDbClient;
pub use crate::app::{OutputFormat, Report};
pub use crate::config::Settings;
pub use crate::core::finder::PeerFinder;
pub use crate::core::sets::{common_names, divergent_names, lookup_by_name, Selector};
pub use crate::domain::model::{Facility, Ixp, Peer};
pub use crate::utils::error::{PeerFinderError, Result};
