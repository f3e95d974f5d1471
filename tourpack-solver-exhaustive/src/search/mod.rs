//! Include/exclude backtracking over a fixed tour sequence.
//!
//! Every position of the sequence is a binary decision. The include branch is
//! explored first and only when the tour keeps the package within both limits
//! and shares no attraction with the tours already selected; the exclude
//! branch is always explored. The best value is checked at every node, root
//! included, so the empty package is the fallback whenever nothing fits.
//! Exploring include first, with strict improvement, is what makes ties keep
//! the package that prefers earlier tours.
//!
//! All mutable state lives in one [`SearchContext`] and one [`Selection`] per
//! call. Including a tour hands back an [`Inclusion`] guard whose drop undoes
//! the mutation, so the selection is restored on every exit path.

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use log::{debug, trace};
use tourpack_core::catalog::validate_tours;
use tourpack_core::{AttractionId, Limits, OptimizeError, Package, Tour};

/// Nodes between two reads of the clock when a time limit is set.
const CLOCK_CHECK_INTERVAL: u64 = 1 << 10;

/// Counters describing one search.
///
/// `leaves_reached + leaves_pruned` is `2^n` for `n` tours: a rejected include
/// branch accounts for every leaf beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct SearchStats {
    /// Decision nodes visited, the root included.
    pub nodes_visited: u64,
    /// Complete decision vectors evaluated.
    pub leaves_reached: u64,
    /// Leaves beneath include branches rejected by a limit or a shared
    /// attraction.
    pub leaves_pruned: u64,
    /// Times the best package so far was replaced, the empty package included.
    pub improvements: u64,
}

impl SearchStats {
    /// Leaves reached or pruned, saturating at `u64::MAX`.
    pub const fn leaves_accounted(&self) -> u64 {
        self.leaves_reached.saturating_add(self.leaves_pruned)
    }
}

/// The optimal package together with the search counters.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct SearchOutcome {
    /// The package with the greatest cultural value, possibly empty.
    pub package: Package,
    /// How the search went.
    pub stats: SearchStats,
}

/// Select the package with the greatest cultural value from `tours`.
///
/// Ties keep the package discovered first, which prefers tours earlier in
/// `tours`. See [`search`] for the errors.
///
/// # Examples
/// ```
/// use tourpack_core::{Limit, Limits, Tour};
/// use tourpack_solver_exhaustive::optimize;
///
/// let tours = [
///     Tour::new(1, "Castles", 2, 100.0, 5.0).with_attractions([1]),
///     Tour::new(2, "Abbeys", 3, 150.0, 8.0).with_attractions([2]),
///     Tour::new(3, "Castle night walk", 1, 50.0, 3.0).with_attractions([1]),
/// ];
/// let limits = Limits::new(Limit::AtMost(5), Limit::AtMost(300.0));
/// let package = optimize(&tours, &limits)?;
/// assert_eq!(package.tour_ids(), vec![1, 2]);
/// assert_eq!(package.total_cost, 250.0);
/// assert_eq!(package.total_value, 13.0);
/// # Ok::<(), tourpack_core::OptimizeError>(())
/// ```
pub fn optimize(tours: &[Tour], limits: &Limits) -> Result<Package, OptimizeError> {
    search(tours, limits).map(|outcome| outcome.package)
}

/// Run the search and report its counters alongside the package.
///
/// # Errors
/// Returns [`OptimizeError::InvalidRequest`] when the budget is negative or
/// NaN, and [`OptimizeError::InvalidCatalog`] when `tours` repeats an id or
/// holds a tour with a negative or non-finite cost or a non-finite value.
/// A search without feasible tours is not an error.
pub fn search(tours: &[Tour], limits: &Limits) -> Result<SearchOutcome, OptimizeError> {
    search_within(tours, limits, None)
}

/// Run the search, aborting once `time_limit` has elapsed.
pub(crate) fn search_within(
    tours: &[Tour],
    limits: &Limits,
    time_limit: Option<Duration>,
) -> Result<SearchOutcome, OptimizeError> {
    limits.validate()?;
    validate_tours(tours)?;

    let mut context = SearchContext::new(tours, limits, time_limit.map(Deadline::start));
    let mut selection = Selection::default();
    context.explore(&mut selection, 0)?;

    let SearchContext { best, stats, .. } = context;
    let selected = best
        .path
        .iter()
        .filter_map(|&position| tours.get(position))
        .cloned()
        .collect();
    let package = Package::from_tours(selected, best.value);
    debug!(
        "searched {} tours: {} nodes, {} leaves reached, {} pruned; best value {}",
        tours.len(),
        stats.nodes_visited,
        stats.leaves_reached,
        stats.leaves_pruned,
        package.total_value
    );
    Ok(SearchOutcome { package, stats })
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    duration_days: u64,
    cost: f64,
    value: f64,
}

impl Totals {
    #[expect(
        clippy::float_arithmetic,
        reason = "package cost and value are floating-point sums"
    )]
    fn with(self, tour: &Tour) -> Self {
        Self {
            duration_days: self
                .duration_days
                .saturating_add(u64::from(tour.duration_days)),
            cost: self.cost + tour.cost,
            value: self.value + tour.cultural_value,
        }
    }
}

/// The tours currently chosen and what they add up to.
#[derive(Debug, Default)]
struct Selection {
    /// Positions in the tour sequence, ascending.
    path: Vec<usize>,
    used_attractions: HashSet<AttractionId>,
    totals: Totals,
}

impl Selection {
    /// Add `tour` if it fits, returning a guard that removes it again.
    ///
    /// A rejected tour leaves the selection untouched.
    fn include<'s, 't>(
        &'s mut self,
        position: usize,
        tour: &'t Tour,
        limits: &Limits,
    ) -> Option<Inclusion<'s, 't>> {
        if tour
            .attractions
            .iter()
            .any(|attraction| self.used_attractions.contains(attraction))
        {
            return None;
        }
        let next = self.totals.with(tour);
        if !limits.admits(next.duration_days, next.cost) {
            return None;
        }

        let previous = std::mem::replace(&mut self.totals, next);
        self.path.push(position);
        self.used_attractions.extend(tour.attractions.iter().copied());
        Some(Inclusion {
            selection: self,
            tour,
            previous,
        })
    }
}

/// A tour held in the selection for the lifetime of the guard.
struct Inclusion<'s, 't> {
    selection: &'s mut Selection,
    tour: &'t Tour,
    previous: Totals,
}

impl Deref for Inclusion<'_, '_> {
    type Target = Selection;

    fn deref(&self) -> &Self::Target {
        self.selection
    }
}

impl DerefMut for Inclusion<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.selection
    }
}

impl Drop for Inclusion<'_, '_> {
    fn drop(&mut self) {
        self.selection.path.pop();
        for attraction in &self.tour.attractions {
            self.selection.used_attractions.remove(attraction);
        }
        // Restored rather than subtracted so float sums come back bit for bit.
        self.selection.totals = self.previous;
    }
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    started_at: Instant,
    limit: Duration,
}

impl Deadline {
    fn start(limit: Duration) -> Self {
        Self {
            started_at: Instant::now(),
            limit,
        }
    }

    fn check(&self, nodes_visited: u64) -> Result<(), OptimizeError> {
        if self.started_at.elapsed() >= self.limit {
            return Err(OptimizeError::DeadlineExceeded {
                limit: self.limit,
                nodes_visited,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
struct BestSoFar {
    value: f64,
    path: Vec<usize>,
}

/// Per-call search state threaded through the recursion.
struct SearchContext<'t> {
    tours: &'t [Tour],
    limits: &'t Limits,
    deadline: Option<Deadline>,
    best: BestSoFar,
    stats: SearchStats,
}

impl<'t> SearchContext<'t> {
    fn new(tours: &'t [Tour], limits: &'t Limits, deadline: Option<Deadline>) -> Self {
        Self {
            tours,
            limits,
            deadline,
            best: BestSoFar {
                value: f64::NEG_INFINITY,
                path: Vec::with_capacity(tours.len()),
            },
            stats: SearchStats::default(),
        }
    }

    fn explore(&mut self, selection: &mut Selection, level: usize) -> Result<(), OptimizeError> {
        self.visit(selection)?;

        let tours = self.tours;
        let Some(tour) = tours.get(level) else {
            self.stats.leaves_reached += 1;
            return Ok(());
        };

        match selection.include(level, tour, self.limits) {
            Some(mut included) => self.explore(&mut included, level + 1)?,
            None => self.prune(level),
        }
        self.explore(selection, level + 1)
    }

    fn visit(&mut self, selection: &Selection) -> Result<(), OptimizeError> {
        self.stats.nodes_visited += 1;
        if let Some(deadline) = &self.deadline
            && self.stats.nodes_visited & (CLOCK_CHECK_INTERVAL - 1) == 0
        {
            deadline.check(self.stats.nodes_visited)?;
        }

        if selection.totals.value > self.best.value {
            self.best.value = selection.totals.value;
            self.best.path.clone_from(&selection.path);
            self.stats.improvements += 1;
            trace!(
                "new best value {} with tour positions {:?}",
                self.best.value, self.best.path
            );
        }
        Ok(())
    }

    /// Account for the leaves beneath the include branch skipped at `level`.
    fn prune(&mut self, level: usize) {
        let remaining = self.tours.len().saturating_sub(level + 1);
        let leaves = u32::try_from(remaining)
            .ok()
            .and_then(|shift| 1_u64.checked_shl(shift))
            .unwrap_or(u64::MAX);
        self.stats.leaves_pruned = self.stats.leaves_pruned.saturating_add(leaves);
    }
}
