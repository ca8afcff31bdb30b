//! Load-once caches for context data.
//!
//! A context is confined to one invocation on one thread, so these use
//! `once_cell::unsync` cells and hand out plain shared references.
//! A failed load leaves the cell empty.

use once_cell::unsync::OnceCell;

/// A collection fetched from the host on first access.
#[derive(Debug)]
pub struct LazyCollection<T> {
    cell: OnceCell<Vec<T>>,
}

impl<T> Default for LazyCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LazyCollection<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached items, running `load` if this is the first access.
    pub fn get_or_try_load<E>(
        &self,
        load: impl FnOnce() -> Result<Vec<T>, E>,
    ) -> Result<&[T], E> {
        self.cell.get_or_try_init(load).map(Vec::as_slice)
    }

    pub fn get(&self) -> Option<&[T]> {
        self.cell.get().map(Vec::as_slice)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Per-entity memoization keyed by position in a loaded collection.
///
/// Slots are allocated on first use, sized to the collection.
#[derive(Debug)]
pub struct Memo<T> {
    slots: OnceCell<Box<[OnceCell<T>]>>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self {
            slots: OnceCell::new(),
        }
    }

    /// Return the memoized value for `index`, computing it with `init` once.
    ///
    /// `len` is the size of the owning collection. `index` must be below it.
    pub fn get_or_try_init<E>(
        &self,
        len: usize,
        index: usize,
        init: impl FnOnce() -> Result<T, E>,
    ) -> Result<&T, E> {
        let slots = self
            .slots
            .get_or_init(|| (0..len).map(|_| OnceCell::new()).collect());

        slots[index].get_or_try_init(init)
    }

    /// The memoized value for `index`, if already computed.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get()?.get(index)?.get()
    }
}

/// Memoized child index lists for a parent-to-children join.
pub type Relation = Memo<Vec<usize>>;

/// Positions of the items satisfying `pred`, in collection order.
pub fn matching_indices<T>(items: &[T], mut pred: impl FnMut(&T) -> bool) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| pred(item))
        .map(|(index, _)| index)
        .collect()
}
