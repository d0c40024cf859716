use std::collections::VecDeque;

use crate::dims::Dims;

/// Cell waiting to be processed, with the visited cell that discovered it.
pub(crate) type Node = (Dims, Option<Dims>);

/// Discovered-but-not-yet-processed cells of a search.
pub(crate) trait Frontier: Default {
    /// Moves are pushed in reverse, so they still pop in up, left, down, right order.
    const REVERSED: bool;

    fn push(&mut self, node: Node);

    fn pop(&mut self) -> Option<Node>;
}

/// Last in, first out.
#[derive(Default)]
pub(crate) struct Stack(Vec<Node>);

impl Frontier for Stack {
    const REVERSED: bool = true;

    fn push(&mut self, node: Node) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<Node> {
        self.0.pop()
    }
}

/// First in, first out.
#[derive(Default)]
pub(crate) struct Queue(VecDeque<Node>);

impl Frontier for Queue {
    const REVERSED: bool = false;

    fn push(&mut self, node: Node) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<Node> {
        self.0.pop_front()
    }
}
