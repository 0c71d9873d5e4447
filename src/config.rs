//! Options of the restart subsystem.
//!
//! [`Options`] derives [`clap::Args`], so a command line interface can embed
//! it with `#[command(flatten)]`.

use clap::{ArgAction, Args, ValueEnum};
use derivative::Derivative;
use thiserror::Error;

/// Largest accepted restart margin in percent.
pub const MAX_RESTART_MARGIN: u32 = 25;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Restart margin {margin}% exceeds the maximum of {MAX_RESTART_MARGIN}%")]
    MarginOutOfRange { margin: u32 },

    #[error("Restart interval has to be at least 1 conflict")]
    ZeroRestartInterval,

    #[error("Moving average window has to be at least 1")]
    ZeroWindow,

    #[error("Slow glue window {slow} is smaller than fast glue window {fast}")]
    WindowOrder { fast: u32, slow: u32 },
}

/// Which part of the trail the leaf reinforcement pass considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LeafScope {
    /// Scan the whole trail on every pass.
    #[default]
    Trail,
    /// Scan only the literals assigned since the previous restart.
    SinceRestart,
}

#[derive(Debug, Clone, PartialEq, Derivative, Args)]
#[derivative(Default)]
pub struct Options {
    /// Enable restarts.
    #[arg(long = "restart", default_value_t = true, action = ArgAction::Set)]
    #[derivative(Default(value = "true"))]
    pub restart: bool,

    /// Margin in percent the fast glue average has to exceed the slow one
    /// before a focused mode restart fires.
    #[arg(long = "restartmargin", default_value_t = 10)]
    #[derivative(Default(value = "10"))]
    pub restart_margin: u32,

    /// Base number of conflicts between focused mode restarts.
    #[arg(long = "restartint", default_value_t = 1)]
    #[derivative(Default(value = "1"))]
    pub restart_interval: u64,

    /// Keep the decision levels that would be re-decided after a restart.
    #[arg(long = "restartreusetrail", default_value_t = true, action = ArgAction::Set)]
    #[derivative(Default(value = "true"))]
    pub restart_reuse_trail: bool,

    /// Base period of stable mode restarts in conflicts, `0` disables them.
    #[arg(long = "reluctantint", default_value_t = 1024)]
    #[derivative(Default(value = "1024"))]
    pub reluctant_interval: u64,

    /// Maximal period of stable mode restarts, `0` means unlimited.
    #[arg(long = "reluctantlim", default_value_t = 1_048_576)]
    #[derivative(Default(value = "1_048_576"))]
    pub reluctant_limit: u64,

    /// Bump leaves of the implication graph before stable mode restarts.
    #[arg(long = "reinforceleaves", default_value_t = true, action = ArgAction::Set)]
    #[derivative(Default(value = "true"))]
    pub reinforce_leaves: bool,

    /// Trail range considered by the leaf reinforcement.
    #[arg(long = "leafscope", value_enum, default_value_t = LeafScope::Trail)]
    pub leaf_scope: LeafScope,

    /// Window of the fast glue moving average.
    #[arg(long = "emafast", default_value_t = 33)]
    #[derivative(Default(value = "33"))]
    pub ema_fast: u32,

    /// Window of the slow glue moving average.
    #[arg(long = "emaslow", default_value_t = 100_000)]
    #[derivative(Default(value = "100_000"))]
    pub ema_slow: u32,
}

impl Options {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.restart_margin > MAX_RESTART_MARGIN {
            return Err(ConfigError::MarginOutOfRange { margin: self.restart_margin });
        }
        if self.restart_interval == 0 {
            return Err(ConfigError::ZeroRestartInterval);
        }
        if self.ema_fast == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.ema_slow < self.ema_fast {
            return Err(ConfigError::WindowOrder { fast: self.ema_fast, slow: self.ema_slow });
        }
        Ok(())
    }

    /// Factor applied to the slow glue average in focused mode.
    pub(crate) fn margin(&self) -> f64 {
        (100.0 + f64::from(self.restart_margin)) / 100.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        options: Options,
    }

    #[test]
    fn defaults_are_valid() {
        let options = Options::default();
        assert!(options.restart);
        assert!(options.restart_reuse_trail);
        assert_eq!(options.restart_margin, 10);
        assert_eq!(options.leaf_scope, LeafScope::Trail);
        assert_eq!(options.validate(), Ok(()));
        assert!((options.margin() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn command_line_matches_defaults() {
        let cli = Cli::try_parse_from(["restartium"]).unwrap();
        assert_eq!(cli.options, Options::default());
    }

    #[test]
    fn command_line_flags() {
        let cli = Cli::try_parse_from([
            "restartium",
            "--restartreusetrail",
            "false",
            "--restartmargin",
            "20",
            "--leafscope",
            "since-restart",
        ])
        .unwrap();
        assert!(!cli.options.restart_reuse_trail);
        assert_eq!(cli.options.restart_margin, 20);
        assert_eq!(cli.options.leaf_scope, LeafScope::SinceRestart);
    }

    #[test]
    fn invalid_options() {
        let options = Options { restart_margin: 30, ..Options::default() };
        assert_eq!(options.validate(), Err(ConfigError::MarginOutOfRange { margin: 30 }));
        let options = Options { restart_interval: 0, ..Options::default() };
        assert_eq!(options.validate(), Err(ConfigError::ZeroRestartInterval));
        let options = Options { ema_fast: 50, ema_slow: 10, ..Options::default() };
        assert_eq!(options.validate(), Err(ConfigError::WindowOrder { fast: 50, slow: 10 }));
    }
}
