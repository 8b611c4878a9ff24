use std::collections::BinaryHeap;

use relief_core::Point;

use crate::SearchRange;
use crate::searchrange::{NodeRef, PathNode, SearchError, UNREACHABLE};
use crate::traits::StepRule;

impl SearchRange {
    /// Compute the full distance map from `source`.
    ///
    /// Every cell reachable under `rules` is relaxed to its minimum number
    /// of unit steps from the source. Returns a slice of all reached nodes
    /// in visit order; individual cells can then be queried with
    /// [`distance_at`](Self::distance_at).
    ///
    /// Fails with [`SearchError::InvalidInput`] if `source` is outside the
    /// range.
    pub fn distance_map<R: StepRule>(
        &mut self,
        rules: &R,
        source: Point,
    ) -> Result<&[PathNode], SearchError> {
        let si = self.idx(source).ok_or(SearchError::InvalidInput)?;

        // Reset the flat distance map.
        for v in self.dist_map.iter_mut() {
            *v = UNREACHABLE;
        }
        self.results.clear();

        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        {
            let n = &mut self.nodes[si];
            n.g = 0;
            n.generation = cur_gen;
            n.open = true;
        }
        self.dist_map[si] = 0;
        open.push(NodeRef { idx: si, dist: 0 });

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.nodes[ci];
            // Skip stale entries.
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.nodes[ci].open = false;

            let cp = self.point(ci);
            self.results.push(PathNode {
                pos: cp,
                dist: current_g,
            });

            for np in cp.neighbors_4() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if !rules.can_step(cp, np) {
                    continue;
                }
                let tentative = current_g + 1;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.open = true;
                self.dist_map[ni] = tentative;
                open.push(NodeRef {
                    idx: ni,
                    dist: tentative,
                });
            }
        }

        Ok(&self.results)
    }

    /// Compute the minimum number of unit steps from `source` to `target`.
    ///
    /// Stops as soon as `target` is selected from the frontier; cells beyond
    /// it are not expanded. `source == target` returns 0.
    ///
    /// Fails with [`SearchError::InvalidInput`] if either endpoint is
    /// outside the range, and with [`SearchError::Unreachable`] if the
    /// frontier exhausts before the target is reached.
    pub fn distance_to<R: StepRule>(
        &mut self,
        rules: &R,
        source: Point,
        target: Point,
    ) -> Result<i32, SearchError> {
        let si = self.idx(source).ok_or(SearchError::InvalidInput)?;
        let ti = self.idx(target).ok_or(SearchError::InvalidInput)?;
        if si == ti {
            return Ok(0);
        }

        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        {
            let n = &mut self.nodes[si];
            n.g = 0;
            n.generation = cur_gen;
            n.open = true;
        }
        open.push(NodeRef { idx: si, dist: 0 });

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;

            if ci == ti {
                return Ok(current_g);
            }
            self.nodes[ci].open = false;

            let cp = self.point(ci);
            for np in cp.neighbors_4() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if !rules.can_step(cp, np) {
                    continue;
                }
                let tentative = current_g + 1;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.open = true;
                open.push(NodeRef {
                    idx: ni,
                    dist: tentative,
                });
            }
        }

        Err(SearchError::Unreachable)
    }

    /// Compute the minimum number of unit steps from `source` to any cell
    /// satisfying `is_target`.
    ///
    /// Performs a full traversal (no early exit), then scans the whole range
    /// and returns the smallest distance among matching reached cells.
    ///
    /// Fails with [`SearchError::InvalidInput`] if `source` is outside the
    /// range, and with [`SearchError::NoTargetFound`] if no matching cell
    /// was reached — whether none matched or none was reachable.
    pub fn distance_to_match<R: StepRule>(
        &mut self,
        rules: &R,
        source: Point,
        is_target: impl Fn(Point) -> bool,
    ) -> Result<i32, SearchError> {
        self.distance_map(rules, source)?;

        let mut best = UNREACHABLE;
        for p in self.rng.iter() {
            if is_target(p) {
                best = best.min(self.distance_at(p));
            }
        }
        if best == UNREACHABLE {
            return Err(SearchError::NoTargetFound);
        }
        Ok(best)
    }

    /// Query the distance at a specific point.
    ///
    /// Reflects the last [`distance_map`](Self::distance_map) or
    /// [`distance_to_match`](Self::distance_to_match) call; returns
    /// [`UNREACHABLE`] if the point is outside the range or was not reached.
    pub fn distance_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.dist_map[i],
            None => UNREACHABLE,
        }
    }
}
