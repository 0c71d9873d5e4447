#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::module_name_repetitions)]
//#![warn(clippy::cargo)]

pub mod clause;
pub mod config;
mod datastructure;
pub mod literal;
pub mod search;

// Re-export
pub use config::{ConfigError, LeafScope, Options};
pub use literal::{Lit, Var};
pub use search::{
    assignment::Reason,
    report::{Report, RestartEvent},
    trail::DecLvl,
    Mode, Search,
};
