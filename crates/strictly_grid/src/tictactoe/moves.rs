//! Prioritized move resolution.

use super::segments::LineSegments;
use crate::board::Board;
use crate::error::GridResult;
use crate::intersection::{IntersectionPoints, LineRating, OccupancyBonusRating};
use crate::types::{Mark, Point};
use crate::vector::Vector;
use rand::RngCore;
use rand::seq::IndexedRandom;
use std::fmt;
use tracing::{debug, instrument};

/// Everything a resolver may read while deciding one move.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    /// Board under consideration.
    pub board: &'a Board,
    /// Mark to move.
    pub mark: Mark,
    /// Win length.
    pub cnt_in_row: usize,
    /// Segments usable by `mark`.
    pub lines: &'a [Vector],
}

/// One strategy in the resolution chain. Resolvers never mutate the board.
pub trait MoveResolver: fmt::Debug + Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Suggests a point, or `None` to defer to the next resolver.
    fn resolve(&self, ctx: &MoveContext<'_>, rng: &mut dyn RngCore) -> GridResult<Option<Point>>;
}

/// Finds the single empty cell that completes a run of `cnt_in_row`.
///
/// Slides a window of `cnt_in_row` cells along `line` and returns the empty
/// cell of the first window holding exactly one. `line` must already be a
/// segment for one mark, so the other cells of that window are own pieces.
#[instrument(level = "trace", skip(line), fields(direction = %line.direction(), len = line.len()))]
pub fn win_case(line: &Vector, cnt_in_row: usize) -> Option<Point> {
    if cnt_in_row == 0 || line.occupied_count() + 1 < cnt_in_row {
        return None;
    }
    line.cells().windows(cnt_in_row).find_map(|window| {
        let mut empties = window.iter().filter(|(_, item)| item.is_none());
        match (empties.next(), empties.next()) {
            (Some((point, _)), None) => Some(point.clone()),
            _ => None,
        }
    })
}

fn first_win(lines: &[Vector], cnt_in_row: usize) -> Option<Point> {
    lines.iter().find_map(|line| win_case(line, cnt_in_row))
}

/// Completes an own run.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinMove;

impl MoveResolver for WinMove {
    fn name(&self) -> &'static str {
        "win"
    }

    fn resolve(&self, ctx: &MoveContext<'_>, _rng: &mut dyn RngCore) -> GridResult<Option<Point>> {
        Ok(first_win(ctx.lines, ctx.cnt_in_row))
    }
}

/// Blocks the cell that would complete an opponent run.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentWinMove;

impl MoveResolver for OpponentWinMove {
    fn name(&self) -> &'static str {
        "block"
    }

    fn resolve(&self, ctx: &MoveContext<'_>, _rng: &mut dyn RngCore) -> GridResult<Option<Point>> {
        let opponent = LineSegments::new(ctx.mark.opponent(), ctx.cnt_in_row).compute(ctx.board)?;
        Ok(first_win(&opponent, ctx.cnt_in_row))
    }
}

/// Picks an empty point where the most valuable own segments cross.
#[derive(Debug)]
pub struct IntersectionMove {
    rating: Box<dyn LineRating + Send>,
}

impl IntersectionMove {
    /// Resolver with a custom rating policy.
    pub fn with_rating(rating: Box<dyn LineRating + Send>) -> Self {
        Self { rating }
    }
}

impl Default for IntersectionMove {
    fn default() -> Self {
        Self::with_rating(Box::new(OccupancyBonusRating::default()))
    }
}

impl MoveResolver for IntersectionMove {
    fn name(&self) -> &'static str {
        "intersection"
    }

    fn resolve(&self, ctx: &MoveContext<'_>, rng: &mut dyn RngCore) -> GridResult<Option<Point>> {
        let index = IntersectionPoints::create(ctx.lines, self.rating.as_ref());
        Ok(index.get_largest(rng))
    }
}

/// Any empty point.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMove;

impl MoveResolver for RandomMove {
    fn name(&self) -> &'static str {
        "random"
    }

    fn resolve(&self, ctx: &MoveContext<'_>, rng: &mut dyn RngCore) -> GridResult<Option<Point>> {
        Ok(ctx.board.empty_points().choose(rng).cloned())
    }
}

/// Ordered resolver chain; the first suggestion wins.
#[derive(Debug)]
pub struct MoveDispatcher {
    resolvers: Vec<Box<dyn MoveResolver>>,
}

impl MoveDispatcher {
    /// Chain from an explicit resolver list.
    pub fn new(resolvers: Vec<Box<dyn MoveResolver>>) -> Self {
        Self { resolvers }
    }

    /// Win, block, best intersection, random.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(WinMove),
            Box::new(OpponentWinMove),
            Box::new(IntersectionMove::default()),
            Box::new(RandomMove),
        ])
    }

    /// Resolver names in consultation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|resolver| resolver.name()).collect()
    }

    /// Consults every resolver in order.
    #[instrument(skip_all, fields(mark = %ctx.mark, lines = ctx.lines.len()))]
    pub fn resolve(&self, ctx: &MoveContext<'_>, rng: &mut dyn RngCore) -> GridResult<Option<Point>> {
        for resolver in &self.resolvers {
            if let Some(point) = resolver.resolve(ctx, rng)? {
                debug!(resolver = resolver.name(), point = %point, "Move resolved");
                return Ok(Some(point));
            }
        }
        debug!("No move available");
        Ok(None)
    }
}

impl Default for MoveDispatcher {
    fn default() -> Self {
        Self::standard()
    }
}
