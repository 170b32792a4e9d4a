//! Collatz Ant: Global-Height Lattice Walk
//!
//! The ant starts at the origin facing up and carries a Collatz value N.
//! Each transition:
//!
//!   N even: turn right, N ← N / 2
//!   N odd:  turn left,  N ← 3N + 1
//!
//! then moves one cell forward. Landing on a cell that was already visited
//! raises a single global height counter ("climbs a story"); landing on a
//! fresh cell marks it visited. The walk stops once N reaches 1.
//!
//! The lattice is unbounded and every transition is recorded in a
//! [`PathLog`], so the full trace is available to downstream statistics.

use std::collections::HashSet;

use super::path::{PathEntry, PathLog};
use crate::error::{Error, Result};

/// Heading of the ant on the lattice, in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// Quarter turn to the right
    pub fn clockwise(self) -> Self {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    /// Quarter turn to the left
    pub fn counter_clockwise(self) -> Self {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }

    /// Unit lattice displacement (dx, dy)
    pub fn delta(self) -> (i64, i64) {
        match self {
            Orientation::Up => (0, 1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, -1),
            Orientation::Left => (-1, 0),
        }
    }
}

/// Collatz ant with a global height counter
#[derive(Debug, Clone)]
pub struct AntSimulator {
    /// Current lattice cell
    position: (i64, i64),
    /// Number of revisits so far
    height: u64,
    orientation: Orientation,
    /// Current Collatz value
    value: u64,
    /// Every cell ever occupied, origin included
    visited: HashSet<(i64, i64)>,
    path: PathLog,
    finished: bool,
}

impl AntSimulator {
    /// Create an ant at the origin carrying `start_value`
    ///
    /// # Errors
    /// * [`Error::InvalidSeed`] if `start_value` is zero
    pub fn new(start_value: u64) -> Result<Self> {
        if start_value == 0 {
            return Err(Error::InvalidSeed(start_value));
        }

        let origin = (0, 0);
        let mut visited = HashSet::new();
        visited.insert(origin);

        Ok(Self {
            position: origin,
            height: 0,
            orientation: Orientation::Up,
            value: start_value,
            visited,
            path: PathLog::starting_at(start_value),
            finished: false,
        })
    }

    /// Advance by exactly one transition
    ///
    /// Returns the newly recorded entry, or `None` once the walk has
    /// terminated (value 1 reached). Calls after termination are no-ops.
    ///
    /// # Errors
    /// * [`Error::ValueOverflow`] if `3N + 1` does not fit in a `u64`;
    ///   the ant is left unchanged
    pub fn step(&mut self) -> Result<Option<PathEntry>> {
        if self.finished {
            return Ok(None);
        }

        if self.value == 1 {
            self.finished = true;
            return Ok(None);
        }

        let (orientation, next_value) = if self.value % 2 == 0 {
            (self.orientation.clockwise(), self.value / 2)
        } else {
            let next = self
                .value
                .checked_mul(3)
                .and_then(|v| v.checked_add(1))
                .ok_or(Error::ValueOverflow { value: self.value })?;
            (self.orientation.counter_clockwise(), next)
        };

        let (dx, dy) = orientation.delta();
        self.orientation = orientation;
        self.position = (self.position.0 + dx, self.position.1 + dy);

        // insert() is false for a cell we have stood on before
        if !self.visited.insert(self.position) {
            self.height += 1;
        }

        self.value = next_value;

        let entry = PathEntry {
            x: self.position.0,
            y: self.position.1,
            height: self.height,
            value: self.value,
        };
        self.path.push(entry);

        Ok(Some(entry))
    }

    /// Step until the walk terminates or `max_steps` transitions elapsed
    ///
    /// The returned log is cumulative over every call on this instance.
    /// Hitting `max_steps` is not an error; check [`is_finished`](Self::is_finished).
    pub fn run(&mut self, max_steps: usize) -> Result<&PathLog> {
        for _ in 0..max_steps {
            if self.step()?.is_none() {
                break;
            }
        }
        Ok(&self.path)
    }

    pub fn position(&self) -> (i64, i64) {
        self.position
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Number of distinct cells occupied so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_visited(&self, cell: (i64, i64)) -> bool {
        self.visited.contains(&cell)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn path(&self) -> &PathLog {
        &self.path
    }

    /// Consume the ant, keeping only its trace
    pub fn into_path(self) -> PathLog {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(x: i64, y: i64, height: u64, value: u64) -> PathEntry {
        PathEntry { x, y, height, value }
    }

    #[test]
    fn test_orientation_cycles() {
        let mut o = Orientation::Up;
        for _ in 0..4 {
            o = o.clockwise();
        }
        assert_eq!(o, Orientation::Up);
        assert_eq!(Orientation::Up.counter_clockwise(), Orientation::Left);
        assert_eq!(Orientation::Left.clockwise(), Orientation::Up);
    }

    #[test]
    fn test_zero_seed_rejected() {
        assert!(matches!(AntSimulator::new(0), Err(Error::InvalidSeed(0))));
    }

    #[test]
    fn test_seed_one_terminates_immediately() {
        let mut ant = AntSimulator::new(1).unwrap();
        let path = ant.run(100).unwrap();
        assert_eq!(path.entries(), &[entry(0, 0, 0, 1)]);
        assert!(ant.is_finished());
    }

    #[test]
    fn test_seed_two_turns_right() {
        let mut ant = AntSimulator::new(2).unwrap();
        let first = ant.step().unwrap();
        assert_eq!(first, Some(entry(1, 0, 0, 1)));
        assert_eq!(ant.orientation(), Orientation::Right);
        assert!(!ant.is_finished());

        assert_eq!(ant.step().unwrap(), None);
        assert!(ant.is_finished());
        assert_eq!(ant.path().len(), 2);
    }

    #[test]
    fn test_odd_value_turns_left() {
        let mut ant = AntSimulator::new(3).unwrap();
        let first = ant.step().unwrap().unwrap();
        assert_eq!(ant.orientation(), Orientation::Left);
        assert_eq!(first, entry(-1, 0, 0, 10));
    }

    #[test]
    fn test_finished_is_idempotent() {
        let mut ant = AntSimulator::new(6).unwrap();
        ant.run(1_000).unwrap();
        assert!(ant.is_finished());

        let len = ant.path().len();
        let position = ant.position();
        let height = ant.height();
        for _ in 0..5 {
            assert_eq!(ant.step().unwrap(), None);
        }
        assert_eq!(ant.path().len(), len);
        assert_eq!(ant.position(), position);
        assert_eq!(ant.height(), height);
    }

    #[test]
    fn test_revisit_raises_height_at_origin() {
        // 5 → 16 → 8 → 4 → 2 → 1 traces a unit square back onto the origin
        let mut ant = AntSimulator::new(5).unwrap();
        let path = ant.run(100).unwrap();
        assert_eq!(
            path.entries(),
            &[
                entry(0, 0, 0, 5),
                entry(-1, 0, 0, 16),
                entry(-1, 1, 0, 8),
                entry(0, 1, 0, 4),
                entry(0, 0, 1, 2),
                entry(-1, 0, 2, 1),
            ]
        );
        assert_eq!(ant.visited_count(), 4);
    }

    #[test]
    fn test_run_is_cumulative() {
        let mut ant = AntSimulator::new(27).unwrap();
        assert_eq!(ant.run(10).unwrap().len(), 11);
        assert!(!ant.is_finished());
        assert_eq!(ant.run(10).unwrap().len(), 21);
    }

    #[test]
    fn test_max_steps_zero_records_only_start() {
        let mut ant = AntSimulator::new(27).unwrap();
        assert_eq!(ant.run(0).unwrap().len(), 1);
    }

    #[test]
    fn test_overflow_leaves_state_untouched() {
        let start = u64::MAX / 3 + 1;
        let start = if start % 2 == 0 { start + 1 } else { start };
        let mut ant = AntSimulator::new(start).unwrap();

        assert!(matches!(ant.step(), Err(Error::ValueOverflow { .. })));
        assert_eq!(ant.position(), (0, 0));
        assert_eq!(ant.value(), start);
        assert_eq!(ant.path().len(), 1);
    }

    #[test]
    fn test_seed_27_trace() {
        let mut ant = AntSimulator::new(27).unwrap();
        let path = ant.run(10_000).unwrap();
        assert_eq!(path.len(), 112);
        assert_eq!(path.last(), Some(&entry(8, 11, 38, 1)));
        assert!(ant.is_finished());
    }
}
