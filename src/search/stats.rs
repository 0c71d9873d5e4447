#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub conflicts: u64,
    pub decisions: u64,
    pub restarts: RestartStats,
    pub leaves: LeafStats,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RestartStats {
    pub restarts: u64,
    /// sum of the decision levels restarts happened at
    pub levels: u64,
    pub stable: u64,
    pub focused: u64,
    pub reused_trails: u64,
    pub reused_levels: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LeafStats {
    pub reinforcements: u64,
    pub promoted: u64,
}
