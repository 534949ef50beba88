//! Recording the steps taken by a rewriting algorithm.

/// Receives each step an algorithm takes, in the order they are taken.
///
/// Pass `&mut ()` to discard the steps, or a `&mut Vec<S>` to keep them.
pub trait StepCollector<S> {
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
