//! A stack of borrowed tree nodes,
//! recording the path from a search root down to a found node.

use crate::node::DcmObject;

/// A path of nodes in an object tree, with the deepest node on top.
///
/// The stack only borrows the nodes:
/// clearing or dropping it leaves the tree untouched.
#[derive(Debug, Clone, Default)]
pub struct DcmStack<'a> {
    nodes: Vec<&'a DcmObject>,
}

impl<'a> DcmStack<'a> {
    /// Create an empty stack.
    pub fn new() -> Self {
        DcmStack { nodes: Vec::new() }
    }

    /// Push a node on top of the stack.
    pub fn push(&mut self, obj: &'a DcmObject) {
        self.nodes.push(obj);
    }

    /// Remove the node on top of the stack.
    pub fn pop(&mut self) -> Option<&'a DcmObject> {
        self.nodes.pop()
    }

    /// The node on top of the stack.
    pub fn top(&self) -> Option<&'a DcmObject> {
        self.nodes.last().copied()
    }

    /// The node `n` levels below the top,
    /// where `0` is the top itself.
    pub fn elem(&self, n: usize) -> Option<&'a DcmObject> {
        let index = n
            .checked_add(1)
            .and_then(|k| self.nodes.len().checked_sub(k))?;
        self.nodes.get(index).copied()
    }

    /// The number of nodes in the stack.
    pub fn card(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the stack holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all nodes from the stack.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Iterate from the bottom of the stack to its top.
    pub fn iter(&self) -> impl Iterator<Item = &'a DcmObject> + '_ {
        self.nodes.iter().copied()
    }

    pub(crate) fn replace_with(&mut self, path: &[&'a DcmObject]) {
        self.nodes.clear();
        self.nodes.extend_from_slice(path);
    }
}

impl PartialEq for DcmStack<'_> {
    /// Two stacks are equal if they hold the very same nodes.
    fn eq(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self
                .nodes
                .iter()
                .zip(&other.nodes)
                .all(|(a, b)| std::ptr::eq(*a, *b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::PrimitiveElement;
    use dcmdata_core::{Tag, VR};

    fn node(element: u16) -> DcmObject {
        DcmObject::Element(PrimitiveElement::new_with_vr(Tag(0x0009, element), VR::LO))
    }

    #[test]
    fn stack_only_borrows() {
        let a = node(0x0010);
        let b = node(0x0011);
        let mut stack = DcmStack::new();
        stack.push(&a);
        stack.push(&b);
        assert_eq!(stack.card(), 2);
        assert!(std::ptr::eq(stack.top().unwrap(), &b));
        assert!(std::ptr::eq(stack.elem(1).unwrap(), &a));
        assert!(stack.elem(2).is_none());
        assert!(stack.elem(usize::MAX).is_none());

        let copy = stack.clone();
        assert_eq!(copy, stack);
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.pop().map(|o| o.tag()), None);
        drop(copy);

        // the nodes are still there
        assert_eq!(a.tag(), Tag(0x0009, 0x0010));
        assert_eq!(b.tag(), Tag(0x0009, 0x0011));
    }

    #[test]
    fn equality_is_by_identity() {
        let a = node(0x0010);
        let twin = a.clone();
        let mut left = DcmStack::new();
        let mut right = DcmStack::new();
        left.push(&a);
        right.push(&twin);
        assert_ne!(left, right);
        right.pop();
        right.push(&a);
        assert_eq!(left, right);
    }
}
