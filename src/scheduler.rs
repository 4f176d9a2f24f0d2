use crate::agent::{Ghost, GhostId};
use crate::algorithms::common::validate_endpoint;
use crate::error::{ConfigError, SearchError};
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use rustc_hash::FxHashSet;

/// Seconds between ghost steps.
pub const GHOST_MOVE_DELAY: f64 = 0.2;
/// Seconds between Pac-Man steps.
pub const PACMAN_MOVE_DELAY: f64 = 0.15;

/// Consecutive holds after which a ghost is reported as starving.
const STARVATION_WARNING: usize = 8;

/// Accumulates elapsed time and fires once it reaches `delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveTimer {
    elapsed: f64,
    delay: f64,
}

impl MoveTimer {
    pub fn new(delay: f64) -> Self {
        MoveTimer { elapsed: 0.0, delay }
    }

    /// Adds `dt` seconds. Returns `true` and restarts from zero when the
    /// accumulated time reaches the delay.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.delay {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// What happened during one call to [`Scheduler::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// The move timer fired and ghosts were allowed to plan and move.
    pub stepped: bool,
    /// Searches run this tick, in precedence order.
    pub searches: Vec<(GhostId, SearchStats)>,
    /// Committed moves with the cell each ghost entered.
    pub moves: Vec<(GhostId, Position)>,
    /// Ghosts whose proposed move lost arbitration. Their paths were cleared.
    pub held: Vec<GhostId>,
    /// First ghost, in precedence order, whose committed move landed on the
    /// target.
    pub capture: Option<GhostId>,
}

/// Drives every ghost along its cached path towards a moving target.
pub struct Scheduler {
    ghosts: Vec<Ghost>,
    spawns: Vec<Position>,
    timer: MoveTimer,
    hold_streaks: [usize; 4],
}

impl Scheduler {
    /// Ghosts are kept in precedence order. A repeated id keeps its first
    /// occurrence.
    pub fn new(mut ghosts: Vec<Ghost>, delay: f64) -> Self {
        ghosts.sort_by_key(|g| g.id.precedence());
        ghosts.dedup_by_key(|g| g.id);
        let spawns = ghosts.iter().map(|g| g.position).collect();
        Scheduler {
            ghosts,
            spawns,
            timer: MoveTimer::new(delay),
            hold_streaks: [0; 4],
        }
    }

    /// Places each ghost of `roster` on its spawn cell. Spawns are handed out
    /// in row-major order following [`GhostId::PRECEDENCE`], whichever ghosts
    /// are actually in play.
    pub fn from_spawns(grid: &Grid, roster: &[GhostId], delay: f64) -> Result<Self, ConfigError> {
        let spawns = grid.ghost_spawns();
        let ghosts = roster
            .iter()
            .map(|&id| {
                spawns
                    .get(id.precedence())
                    .map(|&spawn| Ghost::new(id, spawn))
                    .ok_or(ConfigError::NotEnoughSpawns {
                        requested: id.precedence() + 1,
                        available: spawns.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Scheduler::new(ghosts, delay))
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghost(&self, id: GhostId) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.id == id)
    }

    pub fn ghost_mut(&mut self, id: GhostId) -> Option<&mut Ghost> {
        self.ghosts.iter_mut().find(|g| g.id == id)
    }

    pub fn timer(&self) -> &MoveTimer {
        &self.timer
    }

    /// Forces `id` to replan on its next step.
    pub fn invalidate(&mut self, id: GhostId) {
        if let Some(ghost) = self.ghost_mut(id) {
            ghost.clear_path();
        }
    }

    /// First ghost in precedence order standing on `pos`.
    pub fn ghost_at(&self, pos: Position) -> Option<GhostId> {
        self.ghosts.iter().find(|g| g.position == pos).map(|g| g.id)
    }

    /// Puts every ghost back on its spawn with an empty path.
    pub fn reset(&mut self) {
        for (ghost, &spawn) in self.ghosts.iter_mut().zip(&self.spawns) {
            ghost.move_to(spawn);
            ghost.clear_path();
            ghost.last_stats = None;
        }
        self.timer.reset();
        self.hold_streaks = [0; 4];
    }

    /// Advances the schedule by `dt` seconds with the target at `target`.
    ///
    /// Below the move delay nothing but the timer changes. Otherwise ghosts
    /// with no steps left replan from their current cell to `target`, every
    /// ghost proposes its next cell and the proposals are arbitrated in
    /// precedence order.
    ///
    /// Endpoints are checked before anything else, so an error leaves the
    /// timer and every ghost untouched.
    pub fn tick(&mut self, grid: &Grid, dt: f64, target: Position) -> Result<TickReport, SearchError> {
        validate_endpoint(grid, target)?;
        for ghost in self.ghosts.iter().filter(|g| g.needs_replan()) {
            validate_endpoint(grid, ghost.position)?;
        }

        if !self.timer.advance(dt) {
            return Ok(TickReport::default());
        }

        let mut report = TickReport {
            stepped: true,
            ..TickReport::default()
        };

        for ghost in &mut self.ghosts {
            if ghost.needs_replan() {
                let stats = ghost.replan(grid, target)?;
                report.searches.push((ghost.id, stats));
            }
        }

        let current: Vec<Position> = self.ghosts.iter().map(|g| g.position).collect();
        let proposals: Vec<Option<Position>> = self.ghosts.iter().map(Ghost::next_step).collect();
        let accepted = arbitrate(&current, &proposals);

        for ((ghost, proposal), accepted) in self.ghosts.iter_mut().zip(&proposals).zip(accepted) {
            let Some(cell) = *proposal else {
                continue;
            };
            let streak = &mut self.hold_streaks[ghost.id.precedence()];
            if accepted {
                ghost.advance();
                *streak = 0;
                report.moves.push((ghost.id, cell));
                if cell == target && report.capture.is_none() {
                    report.capture = Some(ghost.id);
                }
            } else {
                ghost.clear_path();
                *streak += 1;
                log::trace!("{} held at {}, wanted {}", ghost.id, ghost.position, cell);
                if *streak == STARVATION_WARNING {
                    log::warn!("{} has been held for {} consecutive steps", ghost.id, streak);
                }
                report.held.push(ghost.id);
            }
        }

        if let Some(id) = report.capture {
            log::info!("{} caught the target at {}", id, target);
        }

        Ok(report)
    }
}

/// Decides which proposals may be committed. `current[i]` is ghost `i`'s
/// cell and `proposals[i]` the cell it wants to enter, with ghosts in
/// precedence order.
///
/// A ghost that does not move keeps its cell. The first ghost claiming a
/// free cell wins it and later claimants are held. Holding a ghost turns its
/// cell into a claimed one, so resolution restarts until no new ghost is
/// held.
fn arbitrate(current: &[Position], proposals: &[Option<Position>]) -> Vec<bool> {
    let mut moving: Vec<bool> = proposals.iter().map(Option::is_some).collect();

    loop {
        let mut claimed: FxHashSet<Position> = current
            .iter()
            .zip(&moving)
            .filter(|(_, &is_moving)| !is_moving)
            .map(|(&pos, _)| pos)
            .collect();

        let blocked = proposals
            .iter()
            .enumerate()
            .filter(|&(i, _)| moving[i])
            .find_map(|(i, proposal)| match proposal {
                Some(cell) if !claimed.insert(*cell) => Some(i),
                _ => None,
            });

        match blocked {
            Some(i) => moving[i] = false,
            None => return moving,
        }
    }
}
