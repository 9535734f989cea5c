//! Store Git identities and switch the global Git configuration between them.
//!
//! ```text
//!            cli / menu / commands
//!                     |
//!         +-----------+-----------+
//!         v                       v
//!   AccountManager         ProfileSwitcher
//!    |          |            |          |
//!    v          v            v          v
//! validation  Store <------ Store    GitBridge
//!            (accounts,              (GitCli -> git)
//!             marker)
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod manager;
pub mod menu;
pub mod profile;
pub mod settings;
pub mod storage;
pub mod switcher;
pub mod validation;
