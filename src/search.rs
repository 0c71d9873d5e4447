//! Search state of the CDCL engine as seen by the restart policy.
//!
//! [`Search`] owns the trail, the assignment, the clause arena and both
//! decision orders. The host search loop records assignments and conflicts;
//! after every conflict it asks [`Search::restarting`] and, if so, calls
//! [`Search::restart`].

use self::{
    assignment::{Assignment, Flags, Reason},
    averages::GlueAverages,
    order::DecisionOrder,
    queue::Queue,
    reluctant::Reluctant,
    report::{Report, TracingReport},
    restart::Limits,
    stats::Statistics,
    trail::{DecLvl, Trail},
    vsids::Vsids,
};
use crate::{
    clause::arena::{Arena, ClauseRef},
    config::{ConfigError, Options},
    datastructure::VarVec,
    literal::{Lit, LitSlice, Var},
};
use derivative::Derivative;
use tracing::{debug, trace};

pub mod assignment;
pub mod averages;
pub mod order;
pub mod queue;
pub mod reluctant;
pub mod report;
pub mod restart;
pub mod stats;
pub mod trail;
pub mod vsids;

mod leaf;
mod reuse;


/// The two alternating search regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Frequent glue based restarts, decisions from the VMTF queue.
    #[default]
    Focused,
    /// Reluctant doubling restarts, decisions from the VSIDS heap.
    Stable,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Focused => write!(f, "focused"),
            Mode::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct Search {
    options: Options,
    mode: Mode,
    arena: Arena,
    assignment: Assignment,
    trail: Trail,
    flags: VarVec<Flags>,
    vsids: Vsids,
    queue: Queue,
    averages: GlueAverages,
    reluctant: Reluctant,
    limits: Limits,
    /// trail length after the last restart
    leaf_mark: usize,
    /// leaves found by the running reinforcement, empty otherwise
    promote: Vec<Lit>,
    stats: Statistics,
    #[derivative(Debug = "ignore")]
    report: Box<dyn Report>,
}

impl Search {
    pub fn new(options: Options) -> Result<Self, ConfigError> {
        options.validate()?;
        let mut search = Self {
            mode: Mode::default(),
            arena: Arena::default(),
            assignment: Assignment::default(),
            trail: Trail::default(),
            flags: VarVec::default(),
            vsids: Vsids::default(),
            queue: Queue::default(),
            averages: GlueAverages::new(options.ema_fast, options.ema_slow),
            reluctant: Reluctant::new(options.reluctant_interval, options.reluctant_limit),
            limits: Limits::default(),
            leaf_mark: 0,
            promote: Vec::new(),
            stats: Statistics::default(),
            report: Box::new(TracingReport),
            options,
        };
        search.update_focused_restart_limit();
        Ok(search)
    }

    /// Replaces the sink of restart events.
    #[must_use]
    pub fn with_report(mut self, report: Box<dyn Report>) -> Self {
        self.report = report;
        self
    }

    /// Adds `count` fresh unassigned variables.
    pub fn new_variables(&mut self, count: u32) -> impl Iterator<Item = Var> {
        let first = self.var_count();
        let end = first + usize::try_from(count).unwrap();
        self.assignment.set_var_count(end);
        self.flags.set_var_count(end);
        self.vsids.set_var_count(end);
        self.queue.set_var_count(end);
        let vars = (first..end).map(|idx| Var::from_index(idx.try_into().unwrap()));
        vars.clone().for_each(|var| self.vsids.add(var));
        vars
    }

    pub fn var_count(&self) -> usize {
        self.flags.var_count()
    }

    pub fn unassigned(&self) -> usize {
        self.var_count() - self.trail.len()
    }

    pub fn add_clause(&mut self, lits: &[Lit]) -> ClauseRef {
        trace!("add clause {}", LitSlice::from(lits));
        self.arena.add(lits)
    }

    /// Opens a new decision level with `lit` as decision.
    pub fn decide(&mut self, lit: Lit) {
        self.stats.decisions += 1;
        self.trail.add_decision(lit);
        trace!("decide {lit} at level {}", self.trail.decision_level());
        self.assign(lit, Reason::Decision);
    }

    /// Assigns `lit` on the root level as the consequence of a unit clause.
    pub fn assign_unit(&mut self, lit: Lit) {
        assert!(self.trail.decision_level().is_root(), "units are assigned on the root level");
        self.trail.push(lit);
        self.assign(lit, Reason::Unit);
    }

    /// Assigns `lit` implied by the binary clause `(lit other)`.
    pub fn assign_binary(&mut self, lit: Lit, other: Lit) {
        assert_eq!(self.assignment.lit_value(other), Some(false), "{other} is not false");
        self.trail.push(lit);
        self.assign(lit, Reason::Binary(other));
    }

    /// Assigns `lit` implied by the clause `cref`, all of its other literals are false.
    pub fn assign_clause(&mut self, lit: Lit, cref: ClauseRef) {
        let clause = &self.arena[cref];
        assert!(clause.len() > 1, "reason clause {cref} is a unit");
        assert!(clause.iter().any(|&l| l == lit), "{lit} is not in {clause}");
        debug_assert!(clause
            .iter()
            .filter(|&&other| other != lit)
            .all(|&other| self.assignment.lit_value(other) == Some(false)));
        self.trail.push(lit);
        self.assign(lit, Reason::Clause(cref));
    }

    fn assign(&mut self, lit: Lit, reason: Reason) {
        self.assignment.assign(lit, self.trail.decision_level(), reason);
        self.vsids.remove(lit.var());
    }

    /// Records a conflict whose learned clause has the given glue.
    pub fn conflict(&mut self, glue: u32) {
        self.stats.conflicts += 1;
        self.averages.update(glue);
        if self.mode == Mode::Stable {
            self.vsids.decay();
            self.reluctant.tick();
        }
    }

    /// Switches the search regime.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        debug!("switching from {} to {mode} mode", self.mode);
        self.mode = mode;
        match mode {
            Mode::Stable => self.reluctant.reset(),
            Mode::Focused => self.update_focused_restart_limit(),
        }
    }

    /// Unassigns every variable above `level`.
    pub fn backtrack_to(&mut self, level: DecLvl) {
        debug!("backtrack to {level}");
        let Self { trail, assignment, vsids, queue, .. } = self;
        trail.backtrack_to(level, |lit| {
            assignment.unassign(lit.var());
            vsids.add(lit.var());
            queue.unassigned(lit.var());
        });
        self.leaf_mark = self.leaf_mark.min(self.trail.len());
    }

    /// The variable the decision routine of the current mode picks next.
    pub fn next_decision_variable(&self) -> Option<Var> {
        match self.mode {
            Mode::Stable => self.vsids.next_decision_variable(&self.assignment),
            Mode::Focused => self.queue.next_decision_variable(&self.assignment),
        }
    }

    pub fn decision_level(&self) -> DecLvl {
        self.trail.decision_level()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn vsids(&self) -> &Vsids {
        &self.vsids
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn averages(&self) -> &GlueAverages {
        &self.averages
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }
}
