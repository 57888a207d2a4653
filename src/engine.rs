use std::mem;

use rand::Rng;
use tracing::trace;

use crate::CellOffset;
use crate::grid::Grid;
use crate::rule_set::RuleSet;

/// Compute the generation following `current` under `rule`.
///
/// `current` is only read, never written, so the result depends on the previous generation
/// alone.
pub fn step(current: &Grid, rule: &RuleSet) -> Grid {
    let mut next = Grid::new(current.width(), current.height());
    step_into(current, &mut next, rule);

    next
}

/// Like [`step`], but writes the next generation into a caller-supplied buffer of the same
/// dimensions. Every cell of `next` is overwritten.
pub fn step_into(current: &Grid, next: &mut Grid, rule: &RuleSet) {
    assert!(
        current.same_dimensions(next),
        "next generation must have the same dimensions as the current one"
    );

    for y in 0..current.height() {
        for x in 0..current.width() {
            let neighbors = current.live_neighbors(x, y);
            next.set(x, y, rule.next_state(current.get(x, y), neighbors));
        }
    }
}

/// Owns the two generations of a running simulation.
///
/// `current` is what gets displayed, `next` is scratch space the following generation is
/// computed into before the two are swapped.
pub struct Engine {
    current: Grid,
    next: Grid,

    /// Transition rule applied on every step
    rule: RuleSet,

    /// Number of steps taken since the grid was last seeded
    generation: u64,
}

impl Engine {
    pub fn new(grid: Grid, rule: RuleSet) -> Self {
        let next = Grid::new(grid.width(), grid.height());

        Self {
            current: grid,
            next,
            rule,
            generation: 0,
        }
    }

    /// Create an engine seeded with a random grid
    pub fn random<R>(width: CellOffset, height: CellOffset, rule: RuleSet, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(Grid::random(width, height, rng), rule)
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance the simulation by one generation
    pub fn step(&mut self) {
        step_into(&self.current, &mut self.next, &self.rule);
        mem::swap(&mut self.current, &mut self.next);

        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.current.population(),
            "stepped"
        );
    }

    /// Re-randomize the current generation and start counting generations from zero again
    pub fn reseed<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.current.randomize(rng);
        self.generation = 0;
    }
}
