//! Intersection index: which candidate lines pass through each point.

use crate::types::Point;
use crate::vector::Vector;
use rand::RngCore;
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, instrument};

/// Bonus per occupied cell used by the game rating.
pub const OCCUPIED_CELL_BONUS: usize = 20;

/// Rating policy for lines passing through a point.
pub trait LineRating: fmt::Debug {
    /// Weight contributed by `line` to every point it admits.
    fn rate(&self, line: &Vector) -> usize;

    /// Whether `point` on `line` takes part in the index.
    fn admits(&self, line: &Vector, point: &Point) -> bool;
}

/// Sum of line lengths over every point, occupied or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthRating;

impl LineRating for LengthRating {
    fn rate(&self, line: &Vector) -> usize {
        line.len()
    }

    fn admits(&self, _line: &Vector, _point: &Point) -> bool {
        true
    }
}

/// Line length plus a bonus per occupied cell, over empty points only.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyBonusRating {
    bonus: usize,
}

impl OccupancyBonusRating {
    /// Rating with a custom per-cell bonus.
    pub fn new(bonus: usize) -> Self {
        Self { bonus }
    }
}

impl Default for OccupancyBonusRating {
    fn default() -> Self {
        Self::new(OCCUPIED_CELL_BONUS)
    }
}

impl LineRating for OccupancyBonusRating {
    fn rate(&self, line: &Vector) -> usize {
        line.len() + self.bonus * line.occupied_count()
    }

    fn admits(&self, line: &Vector, point: &Point) -> bool {
        matches!(line.get(point), Some(None))
    }
}

/// A point and the candidate lines through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionPoint {
    point: Point,
    lines: Vec<usize>,
    rating: usize,
}

impl IntersectionPoint {
    /// The coordinate.
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Indices of the lines through this point, into the input slice.
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// Number of lines through this point.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Never true for a built index; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Summed rating of the lines.
    pub fn rating(&self) -> usize {
        self.rating
    }
}

/// Index of points over a set of candidate lines, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct IntersectionPoints {
    points: Vec<IntersectionPoint>,
}

impl IntersectionPoints {
    /// Builds the index over `lines` using `rating`.
    #[instrument(skip_all, fields(lines = lines.len(), rating = ?rating))]
    pub fn create(lines: &[Vector], rating: &dyn LineRating) -> Self {
        let mut points: Vec<IntersectionPoint> = Vec::new();
        let mut positions: HashMap<Point, usize> = HashMap::new();
        for (index, line) in lines.iter().enumerate() {
            let weight = rating.rate(line);
            for point in line.points() {
                if !rating.admits(line, point) {
                    continue;
                }
                let position = *positions.entry(point.clone()).or_insert_with(|| {
                    points.push(IntersectionPoint {
                        point: point.clone(),
                        lines: Vec::new(),
                        rating: 0,
                    });
                    points.len() - 1
                });
                let entry = &mut points[position];
                if !entry.lines.contains(&index) {
                    entry.lines.push(index);
                    entry.rating += weight;
                }
            }
        }
        debug!(points = points.len(), "Built intersection index");
        Self { points }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no line admitted any point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Indexed points, first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &IntersectionPoint> + '_ {
        self.points.iter()
    }

    /// Entry for `point`.
    pub fn get(&self, point: &Point) -> Option<&IntersectionPoint> {
        self.points.iter().find(|entry| entry.point == *point)
    }

    /// Highest rating in the index.
    pub fn best_rating(&self) -> Option<usize> {
        self.points.iter().map(IntersectionPoint::rating).max()
    }

    /// All points tied for the highest rating, first-seen order.
    pub fn get_largest_list(&self) -> Vec<Point> {
        let Some(best) = self.best_rating() else {
            return Vec::new();
        };
        self.points
            .iter()
            .filter(|entry| entry.rating == best)
            .map(|entry| entry.point.clone())
            .collect()
    }

    /// One of the best points, chosen uniformly at random.
    #[instrument(skip_all, fields(points = self.points.len()))]
    pub fn get_largest(&self, rng: &mut dyn RngCore) -> Option<Point> {
        let best = self.get_largest_list();
        let choice = best.choose(rng).cloned();
        debug!(tied = best.len(), choice = ?choice, "Best intersection chosen");
        choice
    }
}
