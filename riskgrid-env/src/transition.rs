//! Movement of the agent: facing, slip and collision handling.
use crate::{error::ConfigError, Direction, Grid, Pos, RiskyPathAct, Tile};
use rand::Rng;

/// Result of resolving one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Position after the move.
    pub pos: Pos,

    /// Facing after the move, always the direction of the action.
    pub dir: Direction,

    /// `true` if the agent slipped.
    pub slipped: bool,
}

/// Returns `true` unless the agent stands on a goal or lava tile.
///
/// Risky tiles do not freeze the agent.
pub fn can_move(grid: &Grid, pos: Pos) -> bool {
    !matches!(grid.get(pos), Tile::Goal | Tile::Lava)
}

/// Cells the agent may be relocated to on rebound or slip, in draw order:
/// behind, both sides, front.
pub fn rebound_candidates(pos: Pos, dir: Direction) -> [Pos; 4] {
    let (dx, dy) = dir.vec();
    let side = (dy, dx);
    [
        pos.offset((-dx, -dy)),
        pos.offset(side),
        pos.offset((-side.0, -side.1)),
        pos.offset((dx, dy)),
    ]
}

/// Resolves actions into movements under slip and the collision policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionResolver {
    slip_proba: f64,
    wall_rebound: bool,
}

impl TransitionResolver {
    /// Constructs the resolver. `slip_proba` must be in `[0, 1)`.
    pub fn new(slip_proba: f64, wall_rebound: bool) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&slip_proba) {
            return Err(ConfigError::InvalidSlipProbability(slip_proba));
        }
        Ok(Self {
            slip_proba,
            wall_rebound,
        })
    }

    /// Probability of slipping.
    pub fn slip_proba(&self) -> f64 {
        self.slip_proba
    }

    /// Whether blocked moves rebound to a random open neighbour.
    pub fn wall_rebound(&self) -> bool {
        self.wall_rebound
    }

    /// Computes the facing and position after taking `act` at `pos`.
    ///
    /// At most two values are drawn from `rng`: one for the slip test, only
    /// if the slip probability is positive, and one to choose among several
    /// rebound candidates.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        pos: Pos,
        act: RiskyPathAct,
        rng: &mut R,
    ) -> Transition {
        let dir = act.direction();
        let stay = Transition {
            pos,
            dir,
            slipped: false,
        };

        if !can_move(grid, pos) {
            return stay;
        }

        let fwd = pos.offset(dir.vec());
        let slipped = self.slip_proba > 0.0 && rng.gen::<f64>() < self.slip_proba;

        if grid.can_overlap(fwd) && !slipped {
            return Transition {
                pos: fwd,
                dir,
                slipped,
            };
        }

        if !(self.wall_rebound || slipped) {
            return stay;
        }

        let options: Vec<Pos> = rebound_candidates(pos, dir)
            .iter()
            .copied()
            .filter(|&p| grid.can_overlap(p))
            .collect();

        let pos = match options.len() {
            0 => pos,
            1 => options[0],
            n => {
                // Exactly one draw per choice.
                let ix = ((rng.gen::<f64>() * n as f64) as usize).min(n - 1);
                options[ix]
            }
        };

        Transition { pos, dir, slipped }
    }
}
