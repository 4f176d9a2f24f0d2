use crate::agent::GhostId;
use memory_stats::memory_stats;
use std::fmt;
use std::time::Duration;

/// Performance counters for a single search call. Never accumulated across
/// calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    pub expanded_nodes: usize,
    /// Wall-clock duration in seconds.
    pub search_time: f64,
    /// Resident set size delta in MB, `0.0` when it cannot be measured.
    pub memory_usage: f64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Expanded Nodes: {}", self.expanded_nodes)?;
        writeln!(f, "Search Time: {:.6} sec", self.search_time)?;
        writeln!(f, "Memory Usage: {:.2} MB", self.memory_usage)?;
        Ok(())
    }
}

/// Current resident set size of the process in MB.
pub fn resident_memory_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

/// Search timings gathered over a whole run, per ghost.
#[derive(Debug, Clone, Default)]
pub struct TimingData {
    samples: Vec<(GhostId, SearchStats)>,
}

impl TimingData {
    pub fn new() -> Self {
        TimingData::default()
    }

    pub fn record(&mut self, ghost: GhostId, stats: SearchStats) {
        self.samples.push((ghost, stats));
    }

    pub fn total_calls(&self) -> usize {
        self.samples.len()
    }

    pub fn calls_for(&self, ghost: GhostId) -> usize {
        self.samples_for(ghost).count()
    }

    pub fn average_search_time(&self, ghost: GhostId) -> Duration {
        let calls = self.calls_for(ghost);
        if calls == 0 {
            return Duration::from_nanos(0);
        }
        let total: f64 = self.samples_for(ghost).map(|s| s.search_time).sum();
        Duration::from_secs_f64(total / calls as f64)
    }

    pub fn average_expanded_nodes(&self, ghost: GhostId) -> f64 {
        let calls = self.calls_for(ghost);
        if calls == 0 {
            return 0.0;
        }
        let total: usize = self.samples_for(ghost).map(|s| s.expanded_nodes).sum();
        total as f64 / calls as f64
    }

    fn samples_for(&self, ghost: GhostId) -> impl Iterator<Item = &SearchStats> {
        self.samples
            .iter()
            .filter(move |(id, _)| *id == ghost)
            .map(|(_, stats)| stats)
    }
}

impl fmt::Display for TimingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total pathfinding calls: {}", self.total_calls())?;
        for ghost in GhostId::PRECEDENCE {
            let calls = self.calls_for(ghost);
            if calls == 0 {
                continue;
            }
            writeln!(
                f,
                "{:<7} {} calls, avg {:.2?}, avg {:.1} expanded",
                ghost.name(),
                calls,
                self.average_search_time(ghost),
                self.average_expanded_nodes(ghost)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(expanded_nodes: usize, search_time: f64) -> SearchStats {
        SearchStats {
            expanded_nodes,
            search_time,
            memory_usage: 0.0,
        }
    }

    #[test]
    fn averages_are_per_ghost() {
        let mut timing = TimingData::new();
        timing.record(GhostId::Blue, stats(10, 0.002));
        timing.record(GhostId::Blue, stats(20, 0.004));
        timing.record(GhostId::Red, stats(4, 0.001));

        assert_eq!(timing.total_calls(), 3);
        assert_eq!(timing.calls_for(GhostId::Blue), 2);
        assert_eq!(timing.average_expanded_nodes(GhostId::Blue), 15.0);
        assert!((timing.average_search_time(GhostId::Blue).as_secs_f64() - 0.003).abs() < 1e-9);
        assert_eq!(timing.average_expanded_nodes(GhostId::Pink), 0.0);
        assert_eq!(timing.average_search_time(GhostId::Pink), Duration::ZERO);
    }

    #[test]
    fn resident_memory_is_never_negative() {
        assert!(resident_memory_mb() >= 0.0);
    }
}
