//! Folding worker outcomes into per-category tallies.
//!
//! Aggregation only starts once every worker has finished. It is
//! commutative, so the order in which outcomes arrive never changes the
//! result.

use std::collections::HashSet;

use crate::category::Category;
use crate::models::{Assignment, RelocationFailure, WorkerOutcome};

/// Tallies plus the full assignment set for one run.
#[derive(Debug, Clone, Default)]
pub struct AssignmentsTracker {
    counts: [usize; 6],
    assignments: HashSet<Assignment>,
    failures: Vec<RelocationFailure>,
}

impl AssignmentsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the assignment and records it. A repeated stem is tallied
    /// again but collapses in the set.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.counts[assignment.category.index()] += 1;
        self.assignments.insert(assignment);
    }

    pub fn add_failure(&mut self, failure: RelocationFailure) {
        self.failures.push(failure);
    }

    pub fn count(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    /// Number of successfully classified and relocated documents.
    pub fn classified(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn assignments(&self) -> &HashSet<Assignment> {
        &self.assignments
    }

    pub fn failures(&self) -> &[RelocationFailure] {
        &self.failures
    }
}

/// Drains every outcome exactly once.
pub fn aggregate<I>(outcomes: I) -> AssignmentsTracker
where
    I: IntoIterator<Item = WorkerOutcome>,
{
    let mut tracker = AssignmentsTracker::new();
    for outcome in outcomes {
        match outcome {
            Ok(assignment) => tracker.add_assignment(assignment),
            Err(failure) => tracker.add_failure(failure),
        }
    }
    tracker
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentHandle;

    fn ok(stem: &str, category: Category) -> WorkerOutcome {
        Ok(Assignment::new(stem, category))
    }

    fn sample() -> Vec<WorkerOutcome> {
        vec![
            ok("rust_book", Category::Programming),
            ok("go_tour", Category::Programming),
            ok("neural_nets", Category::AI),
            ok("grocery_list", Category::Other),
        ]
    }

    #[test]
    fn tallies_each_category() {
        let tracker = aggregate(sample());
        assert_eq!(tracker.count(Category::Programming), 2);
        assert_eq!(tracker.count(Category::AI), 1);
        assert_eq!(tracker.count(Category::Math), 0);
        assert_eq!(tracker.count(Category::Other), 1);
        assert_eq!(tracker.classified(), 4);
        assert_eq!(tracker.assignments().len(), 4);
    }

    #[test]
    fn order_of_outcomes_does_not_matter() {
        let forward = aggregate(sample());
        let mut reversed = sample();
        reversed.reverse();
        let backward = aggregate(reversed);
        let mut rotated = sample();
        rotated.rotate_left(2);
        let rotated = aggregate(rotated);

        for other in [&backward, &rotated] {
            for category in Category::ALL {
                assert_eq!(forward.count(category), other.count(category));
            }
            assert_eq!(forward.assignments(), other.assignments());
        }
    }

    #[test]
    fn failures_are_kept_out_of_the_tally() {
        let mut outcomes = sample();
        outcomes.push(Err(RelocationFailure {
            document: DocumentHandle::new("/in/locked.pdf"),
            category: Category::Security,
            reason: "permission denied".into(),
        }));
        let tracker = aggregate(outcomes);
        assert_eq!(tracker.count(Category::Security), 0);
        assert_eq!(tracker.classified(), 4);
        assert_eq!(tracker.failures().len(), 1);
        assert_eq!(tracker.failures()[0].document.stem, "locked");
    }

    #[test]
    fn duplicate_stems_collapse_in_the_set_only() {
        let tracker = aggregate(vec![
            ok("notes", Category::Math),
            ok("notes", Category::Math),
        ]);
        assert_eq!(tracker.count(Category::Math), 2);
        assert_eq!(tracker.assignments().len(), 1);
    }

    #[test]
    fn empty_input_gives_empty_tracker() {
        let tracker = aggregate(Vec::new());
        assert_eq!(tracker.classified(), 0);
        assert!(tracker.assignments().is_empty());
        assert!(tracker.failures().is_empty());
    }
}
