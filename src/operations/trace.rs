use std::f64::consts::PI;

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::Segment;
use crate::math::angle_2d::signed_angle;
use crate::math::Tolerances;

use super::iteration::IterationGuard;

slotmap::new_key_type! {
    /// Identifier of a piece in a [`PieceStore`].
    pub struct PieceId;
}

/// Which exit to take where several pieces leave the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalBias {
    /// Turn as far left as possible.
    Leftmost,
    /// Turn as far right as possible.
    Rightmost,
}

#[derive(Debug, Clone)]
struct PieceData {
    segment: Segment,
    consumed: bool,
}

/// Arena of cut pieces waiting to be chained into loops.
#[derive(Debug, Default)]
pub struct PieceStore {
    pieces: SlotMap<PieceId, PieceData>,
}

impl PieceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, segment: Segment) -> PieceId {
        self.pieces.insert(PieceData {
            segment,
            consumed: false,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Chains every piece into closed loops.
    ///
    /// Starting from each unused piece, the walk repeatedly picks, among the
    /// unused pieces starting where the current one ends, the exit preferred
    /// by `bias`. Returning to the first piece closes the loop; a walk that
    /// runs out of exits is dropped.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::StuckIteration` if the walk does not finish.
    pub fn trace_loops(
        &mut self,
        bias: TraversalBias,
        tol: &Tolerances,
    ) -> Result<Vec<Vec<Segment>>> {
        let mut guard = IterationGuard::for_items("loop walk", self.pieces.len());
        let order: Vec<PieceId> = self.pieces.keys().collect();
        let mut loops = Vec::new();

        for first in order {
            let Some(data) = self.pieces.get_mut(first) else {
                continue;
            };
            if data.consumed {
                continue;
            }
            data.consumed = true;
            let origin = data.segment.start();
            let mut chain = vec![data.segment];

            loop {
                let Some(current) = chain.last().copied() else {
                    break;
                };
                let here = current.end();
                guard.tick(here)?;

                let mut candidates: Vec<(Option<PieceId>, Segment)> = self
                    .pieces
                    .iter()
                    .filter(|(_, p)| !p.consumed && tol.points_close(&p.segment.start(), &here))
                    .map(|(id, p)| (Some(id), p.segment))
                    .collect();
                if tol.points_close(&here, &origin) {
                    candidates.push((None, chain[0]));
                }

                let Some(choice) = choose_exit(&current, &candidates, bias, tol) else {
                    warn!(
                        x = here.x,
                        y = here.y,
                        pieces = chain.len(),
                        "dead end while chaining loop; dropping partial chain"
                    );
                    break;
                };
                match candidates[choice].0 {
                    None => {
                        debug!(segments = chain.len(), "closed loop");
                        loops.push(chain);
                        break;
                    }
                    Some(id) => {
                        if let Some(next) = self.pieces.get_mut(id) {
                            next.consumed = true;
                            chain.push(next.segment);
                        }
                    }
                }
            }
        }
        Ok(loops)
    }
}

/// Chains `pieces` into closed loops. See [`PieceStore::trace_loops`].
///
/// # Errors
///
/// Returns `GeometryError::StuckIteration` if the walk does not finish.
pub fn trace_loops(
    pieces: &[Segment],
    bias: TraversalBias,
    tol: &Tolerances,
) -> Result<Vec<Vec<Segment>>> {
    let mut store = PieceStore::new();
    for piece in pieces {
        store.add(*piece);
    }
    store.trace_loops(bias, tol)
}

/// Turn from the end of `incoming` onto the start of `exit`, in `[-PI, PI]`.
///
/// A full reversal is resolved by curvature: an exit bending more to the left
/// than the way back counts as the sharpest right turn, and vice versa.
fn turn_angle(incoming: &Segment, exit: &Segment, tol: &Tolerances) -> f64 {
    let angle = signed_angle(&incoming.end_tangent(), &exit.start_tangent());
    if tol.angles_close(angle.abs(), PI) {
        if exit.curvature() > -incoming.curvature() {
            -PI
        } else {
            PI
        }
    } else {
        angle
    }
}

/// Index of the exit preferred by `bias`, or `None` if there is none.
///
/// Exits leaving in the same direction are ordered by curvature, tighter
/// left-bending curves counting as further left.
fn choose_exit<K>(
    incoming: &Segment,
    candidates: &[(K, Segment)],
    bias: TraversalBias,
    tol: &Tolerances,
) -> Option<usize> {
    let mut best: Option<(usize, f64, f64)> = None;
    for (i, (_, exit)) in candidates.iter().enumerate() {
        let angle = turn_angle(incoming, exit, tol);
        let curvature = exit.curvature();
        let better = match best {
            None => true,
            Some((_, best_angle, best_curvature)) => {
                let further_left = if tol.angles_close(angle, best_angle) {
                    curvature > best_curvature
                } else {
                    angle > best_angle
                };
                let further_right = if tol.angles_close(angle, best_angle) {
                    curvature < best_curvature
                } else {
                    angle < best_angle
                };
                match bias {
                    TraversalBias::Leftmost => further_left,
                    TraversalBias::Rightmost => further_right,
                }
            }
        };
        if better {
            best = Some((i, angle, curvature));
        }
    }
    best.map(|(i, _, _)| i)
}
