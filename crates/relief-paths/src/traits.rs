use relief_core::Point;

/// Step-legality predicate — decides whether a single unit step is allowed.
///
/// The search engine only calls this on in-bounds, 4-directionally adjacent
/// pairs, so implementations need not re-check adjacency.
pub trait StepRule {
    /// Whether a step from `from` to the adjacent `to` is legal.
    fn can_step(&self, from: Point, to: Point) -> bool;
}

/// Any `Fn(Point, Point) -> bool` closure is a step rule.
impl<F> StepRule for F
where
    F: Fn(Point, Point) -> bool,
{
    fn can_step(&self, from: Point, to: Point) -> bool {
        self(from, to)
    }
}
