//! An owning list with a cursor.
//!
//! [`DcmList`] owns the nodes of one level of the object tree
//! and keeps a current position,
//! which insertions and removals move along.
//! Nodes removed from the list are handed back to the caller,
//! all others are dropped together with the list.

use std::collections::VecDeque;

/// A position for inserting into or moving through a [`DcmList`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ListPos {
    /// the current element
    AtCurrent,
    /// the first element
    First,
    /// the last element
    Last,
    /// the element before the current one
    BeforeCurrent,
    /// the element after the current one
    AfterCurrent,
}

/// An ordered list of owned nodes with a cursor.
#[derive(Debug, Clone)]
pub struct DcmList<T> {
    items: VecDeque<T>,
    current: Option<usize>,
}

impl<T: PartialEq> PartialEq for DcmList<T> {
    /// Lists are equal if they hold equal elements,
    /// regardless of their cursors.
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T> Default for DcmList<T> {
    fn default() -> Self {
        DcmList::new()
    }
}

impl<T> DcmList<T> {
    /// Create an empty list with an invalid cursor.
    pub fn new() -> Self {
        DcmList {
            items: VecDeque::new(),
            current: None,
        }
    }

    /// The number of elements in the list.
    #[inline]
    pub fn card(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the cursor points at an element.
    #[inline]
    pub fn valid(&self) -> bool {
        self.current.is_some()
    }

    /// The index of the element under the cursor.
    #[inline]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Add an element at the end of the list
    /// and move the cursor onto it.
    pub fn append(&mut self, obj: T) -> &mut T {
        self.items.push_back(obj);
        let last = self.items.len() - 1;
        self.current = Some(last);
        &mut self.items[last]
    }

    /// Add an element at the start of the list
    /// and move the cursor onto it.
    pub fn prepend(&mut self, obj: T) -> &mut T {
        self.items.push_front(obj);
        self.current = Some(0);
        &mut self.items[0]
    }

    /// Insert an element relative to the cursor
    /// and move the cursor onto it.
    ///
    /// With an invalid cursor,
    /// the relative positions insert at the end of the list.
    pub fn insert(&mut self, obj: T, pos: ListPos) -> &mut T {
        let index = match (pos, self.current) {
            (ListPos::First, _) => 0,
            (ListPos::Last, _) | (_, None) => self.items.len(),
            (ListPos::AtCurrent, Some(i)) | (ListPos::BeforeCurrent, Some(i)) => i,
            (ListPos::AfterCurrent, Some(i)) => i + 1,
        };
        self.insert_at(index, obj)
    }

    /// Insert an element at the given index,
    /// or at the end if the index is past the last element,
    /// and move the cursor onto it.
    pub fn insert_at(&mut self, index: usize, obj: T) -> &mut T {
        let index = index.min(self.items.len());
        self.items.insert(index, obj);
        self.current = Some(index);
        &mut self.items[index]
    }

    /// Detach the element under the cursor and hand it over.
    ///
    /// The cursor moves onto the following element,
    /// or becomes invalid if there is none.
    pub fn remove(&mut self) -> Option<T> {
        let index = self.current?;
        self.remove_at(index)
    }

    /// Detach the element at the given index and hand it over.
    /// The cursor is left on the element which took its place.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let obj = self.items.remove(index)?;
        self.current = if index < self.items.len() {
            Some(index)
        } else {
            None
        };
        Some(obj)
    }

    /// Drop all elements and invalidate the cursor.
    pub fn delete_all_elements(&mut self) {
        self.items.clear();
        self.current = None;
    }

    /// Move the cursor and retrieve the element under it.
    ///
    /// Moving before the first or after the last element
    /// invalidates the cursor.
    pub fn seek(&mut self, pos: ListPos) -> Option<&T> {
        let len = self.items.len();
        self.current = match (pos, self.current) {
            _ if len == 0 => None,
            (ListPos::First, _) => Some(0),
            (ListPos::Last, _) => Some(len - 1),
            (ListPos::AtCurrent, current) => current,
            (ListPos::BeforeCurrent, Some(i)) => i.checked_sub(1),
            (ListPos::AfterCurrent, Some(i)) => Some(i + 1).filter(|&i| i < len),
            (_, None) => None,
        };
        self.get()
    }

    /// Move the cursor to the given index and retrieve the element there.
    /// An index past the last element invalidates the cursor.
    pub fn seek_to(&mut self, index: usize) -> Option<&T> {
        self.current = Some(index).filter(|&i| i < self.items.len());
        self.get()
    }

    /// The element under the cursor.
    pub fn get(&self) -> Option<&T> {
        self.items.get(self.current?)
    }

    /// The element under the cursor, mutably.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let index = self.current?;
        self.items.get_mut(index)
    }

    /// The element at the given index, leaving the cursor alone.
    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// The element at the given index, mutably.
    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Replace the element at the given index,
    /// returning the previous one.
    pub fn replace_at(&mut self, index: usize, obj: T) -> Option<T> {
        let slot = self.items.get_mut(index)?;
        self.current = Some(index);
        Some(std::mem::replace(slot, obj))
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// Iterate mutably over the elements in order.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + ExactSizeIterator {
        self.items.iter_mut()
    }

    /// Find the index of an element by binary search
    /// over a list kept in order.
    pub(crate) fn binary_search_by_key<K, F>(&self, key: &K, f: F) -> Result<usize, usize>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.items.binary_search_by_key(key, f)
    }
}

impl<T> IntoIterator for DcmList<T> {
    type Item = T;
    type IntoIter = std::collections::vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T> std::iter::FromIterator<T> for DcmList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: VecDeque<T> = iter.into_iter().collect();
        let current = if items.is_empty() { None } else { Some(0) };
        DcmList { items, current }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts how many times it was dropped.
    #[derive(Debug)]
    struct Tracked {
        id: u32,
        drops: Rc<Cell<u32>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn tracked(id: u32, drops: &Rc<Cell<u32>>) -> Tracked {
        Tracked {
            id,
            drops: Rc::clone(drops),
        }
    }

    fn ids(list: &DcmList<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn insertion_moves_the_cursor() {
        let mut list = DcmList::new();
        assert!(!list.valid());
        list.append(2);
        list.prepend(1);
        assert_eq!(list.get(), Some(&1));
        list.insert(4, ListPos::Last);
        list.insert(3, ListPos::BeforeCurrent);
        assert_eq!(list.get(), Some(&3));
        list.insert(5, ListPos::AfterCurrent);
        assert_eq!(ids(&list), vec![1, 2, 3, 5, 4]);
        assert_eq!(list.current_index(), Some(3));
        list.insert(0, ListPos::First);
        assert_eq!(list.get(), Some(&0));
        assert_eq!(list.card(), 6);
    }

    #[test]
    fn seeking() {
        let mut list: DcmList<u32> = (1..=3).collect();
        assert_eq!(list.seek(ListPos::Last), Some(&3));
        assert_eq!(list.seek(ListPos::BeforeCurrent), Some(&2));
        assert_eq!(list.seek(ListPos::AtCurrent), Some(&2));
        assert_eq!(list.seek(ListPos::AfterCurrent), Some(&3));
        assert_eq!(list.seek(ListPos::AfterCurrent), None);
        assert!(!list.valid());
        assert_eq!(list.seek(ListPos::AfterCurrent), None);
        assert_eq!(list.seek(ListPos::First), Some(&1));
        assert_eq!(list.seek(ListPos::BeforeCurrent), None);
        assert_eq!(list.seek_to(1), Some(&2));
        assert_eq!(list.seek_to(3), None);
        assert!(!list.valid());
    }

    #[test]
    fn remove_hands_over_the_node() {
        let mut list: DcmList<u32> = (1..=3).collect();
        list.seek_to(1);
        assert_eq!(list.remove(), Some(2));
        // cursor on the following element
        assert_eq!(list.get(), Some(&3));
        assert_eq!(list.remove(), Some(3));
        assert!(!list.valid());
        assert_eq!(list.remove(), None);
        assert_eq!(ids(&list), vec![1]);
    }

    #[test]
    fn elements_are_dropped_exactly_once() {
        let drops = Rc::new(Cell::new(0));
        let mut list = DcmList::new();
        for id in 0..4 {
            list.append(tracked(id, &drops));
        }
        list.seek(ListPos::First);
        let removed = list.remove().unwrap();
        assert_eq!(removed.id, 0);
        // a detached node stays alive
        assert_eq!(drops.get(), 0);

        list.seek(ListPos::Last);
        list.get_mut().unwrap().id = 30;
        list.delete_all_elements();
        assert_eq!(drops.get(), 3);
        assert!(list.is_empty());

        list.append(tracked(4, &drops));
        list.append(tracked(5, &drops));
        drop(list);
        assert_eq!(drops.get(), 5);
        drop(removed);
        assert_eq!(drops.get(), 6);
    }

    #[test]
    fn replace_returns_the_previous_node() {
        let mut list: DcmList<u32> = (1..=3).collect();
        assert_eq!(list.replace_at(2, 9), Some(3));
        assert_eq!(list.replace_at(3, 9), None);
        assert_eq!(ids(&list), vec![1, 2, 9]);
        assert_eq!(list.get_at(2), Some(&9));
    }
}
