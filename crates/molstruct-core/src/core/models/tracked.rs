use std::ops::Index;

/// An insertion-order-preserving, duplicate-tolerant sequence that remembers
/// whether it has been mutated since the last checkpoint.
///
/// Every collection owned by a [`Structure`](super::structure::Structure) is
/// a `TrackedList`, so callers can cheaply ask "has anything changed since I
/// last looked?" without diffing the contents. The flag is monotonic: only
/// [`clear_changed`](TrackedList::clear_changed) (or an explicit
/// [`set_changed`](TrackedList::set_changed)) resets it, and no read
/// operation touches it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedList<T> {
    items: Vec<T>,
    changed: bool,
}

impl<T> Default for TrackedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TrackedList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            changed: false,
        }
    }

    /// Appends an item, marking the list changed.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.changed = true;
    }

    /// Removes and returns the item at `index`, marking the list changed.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds, like `Vec::remove`.
    pub fn remove(&mut self, index: usize) -> T {
        self.changed = true;
        self.items.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Whether the list has been mutated since the last checkpoint.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    pub fn clear_changed(&mut self) {
        self.changed = false;
    }
}

impl<T> Index<usize> for TrackedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a TrackedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_list_is_empty_and_unchanged() {
        let list: TrackedList<i32> = TrackedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(!list.changed());
    }

    #[test]
    fn push_appends_and_sets_changed() {
        let mut list = TrackedList::new();
        list.push(1);
        list.push(2);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], 1);
        assert_eq!(list[1], 2);
        assert!(list.changed());
    }

    #[test]
    fn push_tolerates_duplicates() {
        let mut list = TrackedList::new();
        list.push(7);
        list.push(7);
        assert_eq!(list.as_slice(), &[7, 7]);
    }

    #[test]
    fn remove_takes_item_at_position_and_sets_changed() {
        let mut list = TrackedList::new();
        list.push("a");
        list.push("b");
        list.push("c");
        list.clear_changed();

        assert_eq!(list.remove(1), "b");
        assert_eq!(list.as_slice(), &["a", "c"]);
        assert!(list.changed());
    }

    #[test]
    fn reads_do_not_clear_changed() {
        let mut list = TrackedList::new();
        list.push(1);
        let _ = list.get(0);
        let _ = list.last();
        let _ = list.iter().count();
        assert!(list.changed());
    }

    #[test]
    fn clear_changed_resets_flag_only() {
        let mut list = TrackedList::new();
        list.push(1);
        list.clear_changed();
        assert!(!list.changed());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn set_changed_can_raise_flag_without_mutation() {
        let mut list: TrackedList<i32> = TrackedList::new();
        list.set_changed(true);
        assert!(list.changed());
    }
}
