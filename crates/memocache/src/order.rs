//! Eviction order
//!
//! Index-linked list over a slot arena for O(1) append, unlink and
//! head eviction. The head is the next eviction candidate, the tail the
//! most recently retained entry.

use std::ops::{Index, IndexMut};

use crate::entry::Entry;

/// Node in the eviction-order list
struct Node<K, V> {
    entry: Entry<K, V>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked entry list owning every cached entry
pub(crate) struct OrderList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K, V> OrderList<K, V> {
    /// Create an empty list with room for `capacity` entries
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    /// Slot following `idx` towards the tail
    pub(crate) fn next(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].as_ref().and_then(|node| node.next)
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&Entry<K, V>> {
        self.nodes.get(idx)?.as_ref().map(|node| &node.entry)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Entry<K, V>> {
        self.nodes.get_mut(idx)?.as_mut().map(|node| &mut node.entry)
    }

    /// Append an entry at the tail and return its slot
    pub(crate) fn push_back(&mut self, entry: Entry<K, V>) -> usize {
        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            entry,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail_idx) => {
                if let Some(tail) = &mut self.nodes[tail_idx] {
                    tail.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);
        self.len += 1;
        idx
    }

    /// Unlink the entry at `idx` from any position and release its slot
    pub(crate) fn remove(&mut self, idx: usize) -> Option<Entry<K, V>> {
        self.unlink(idx);
        let node = self.nodes.get_mut(idx)?.take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some(node.entry)
    }

    /// Remove the head entry
    pub(crate) fn pop_front(&mut self) -> Option<Entry<K, V>> {
        let idx = self.head?;
        self.remove(idx)
    }

    /// Relink the entry at `idx` as the tail
    pub(crate) fn move_to_back(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = self.tail;
            node.next = None;
        }

        match self.tail {
            Some(tail_idx) => {
                if let Some(tail) = &mut self.nodes[tail_idx] {
                    tail.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);
    }

    /// Drop every entry and release the arena
    pub(crate) fn clear(&mut self) {
        self.nodes = Vec::new();
        self.free_list = Vec::new();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes.get(idx) {
            Some(Some(node)) => (node.prev, node.next),
            _ => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }
}

impl<K, V> Index<usize> for OrderList<K, V> {
    type Output = Entry<K, V>;

    /// Panics if `idx` is not a live slot
    fn index(&self, idx: usize) -> &Self::Output {
        match self.get(idx) {
            Some(entry) => entry,
            None => panic!("order slot {} is not live", idx),
        }
    }
}

impl<K, V> IndexMut<usize> for OrderList<K, V> {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        match self.get_mut(idx) {
            Some(entry) => entry,
            None => panic!("order slot {} is not live", idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn keys(list: &OrderList<u32, &'static str>) -> Vec<u32> {
        let mut out = Vec::new();
        let mut cursor = list.head();
        while let Some(idx) = cursor {
            out.push(*list.get(idx).unwrap().key());
            cursor = list.next(idx);
        }
        out
    }

    fn push(list: &mut OrderList<u32, &'static str>, key: u32, value: &'static str) -> usize {
        list.push_back(Entry::new(key, value, Instant::now()))
    }

    #[test]
    fn test_push_back_keeps_insertion_order() {
        let mut list = OrderList::with_capacity(4);
        push(&mut list, 1, "a");
        push(&mut list, 2, "b");
        push(&mut list, 3, "c");

        assert_eq!(keys(&list), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_to_back() {
        let mut list = OrderList::with_capacity(4);
        let a = push(&mut list, 1, "a");
        push(&mut list, 2, "b");
        let c = push(&mut list, 3, "c");

        list.move_to_back(a);
        assert_eq!(keys(&list), vec![2, 3, 1]);

        // Tail stays put
        list.move_to_back(a);
        assert_eq!(keys(&list), vec![2, 3, 1]);

        list.move_to_back(c);
        assert_eq!(keys(&list), vec![2, 1, 3]);
    }

    #[test]
    fn test_remove_from_middle() {
        let mut list = OrderList::with_capacity(4);
        push(&mut list, 1, "a");
        let b = push(&mut list, 2, "b");
        push(&mut list, 3, "c");

        let removed = list.remove(b).unwrap();
        assert_eq!(removed.into_value(), "b");
        assert_eq!(keys(&list), vec![1, 3]);
        assert_eq!(list.len(), 2);

        // Slot already released
        assert!(list.remove(b).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_pop_front_drains_in_order() {
        let mut list = OrderList::with_capacity(4);
        push(&mut list, 1, "a");
        push(&mut list, 2, "b");

        assert_eq!(list.pop_front().map(|e| e.key), Some(1));
        assert_eq!(list.pop_front().map(|e| e.key), Some(2));
        assert!(list.pop_front().is_none());
        assert_eq!(list.len(), 0);
        assert!(list.head().is_none());
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = OrderList::with_capacity(2);
        let a = push(&mut list, 1, "a");
        push(&mut list, 2, "b");
        list.remove(a);

        let c = push(&mut list, 3, "c");
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec![2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut list = OrderList::with_capacity(2);
        push(&mut list, 1, "a");
        push(&mut list, 2, "b");
        list.clear();

        assert_eq!(list.len(), 0);
        assert!(keys(&list).is_empty());

        push(&mut list, 3, "c");
        assert_eq!(keys(&list), vec![3]);
    }
}
