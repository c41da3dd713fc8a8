//! Array-backed node storage with explicit compaction.
//!
//! `SlotArena` hands out [`SlotId`] handles that stay valid until the slot is
//! removed or until [`SlotArena::compact`] runs. Removal leaves a hole that a
//! later insert reuses; compaction squeezes every hole out, relocates the
//! survivors to the front of the slot vector and returns a [`Relocation`]
//! table so owners can translate the handles they hold.
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                                   |
//! |------------|------|-----------------------------------------|
//! | `insert`   | O(1) | Reuses a hole if one is available       |
//! | `remove`   | O(1) | Leaves a hole                           |
//! | `get`      | O(1) |                                         |
//! | `compact`  | O(n) | Invalidates every previously issued id  |

/// Handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Translation table produced by [`SlotArena::compact`].
///
/// Maps every id that was live before the compaction to its new id. Ids that
/// were holes map to `None`.
#[derive(Debug, Clone, Default)]
pub struct Relocation {
    map: Vec<Option<SlotId>>,
    moved: usize,
}

impl Relocation {
    /// Returns the post-compaction id for `old`.
    #[inline]
    pub fn get(&self, old: SlotId) -> Option<SlotId> {
        self.map.get(old.0).copied().flatten()
    }

    /// Number of live slots whose index changed.
    pub fn moved(&self) -> usize {
        self.moved
    }

    /// Number of live slots that survived the compaction.
    pub fn survivors(&self) -> usize {
        self.map.iter().filter(|slot| slot.is_some()).count()
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(value);
            idx
        } else {
            self.slots.push(Some(value));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let value = slot.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, live or hole.
    ///
    /// This is the quantity compaction shrinks back to [`len`](Self::len).
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Number of holes waiting to be reused.
    pub fn holes(&self) -> usize {
        self.free_list.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }

    /// Removes every hole and releases the spare storage.
    ///
    /// Survivors keep their relative slot order. Every id issued before this
    /// call is invalid afterwards; translate it through the returned table.
    pub fn compact(&mut self) -> Relocation {
        let mut map = Vec::with_capacity(self.slots.len());
        let mut moved = 0;
        let mut write = 0;
        for read in 0..self.slots.len() {
            if self.slots[read].is_none() {
                map.push(None);
                continue;
            }
            if read != write {
                self.slots.swap(read, write);
                moved += 1;
            }
            map.push(Some(SlotId(write)));
            write += 1;
        }
        debug_assert_eq!(write, self.len);
        self.slots.truncate(write);
        self.slots.shrink_to_fit();
        self.free_list.clear();
        Relocation { map, moved }
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.holes(), 1);

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
        assert_eq!(arena.holes(), 0);
    }

    #[test]
    fn slot_arena_remove_twice_is_none() {
        let mut arena = SlotArena::new();
        let id = arena.insert(1u32);
        assert_eq!(arena.remove(id), Some(1));
        assert_eq!(arena.remove(id), None);
        assert!(!arena.contains(id));
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn slot_arena_compact_squeezes_holes_in_order() {
        let mut arena = SlotArena::new();
        let ids: Vec<_> = (0..6u32).map(|v| arena.insert(v)).collect();
        arena.remove(ids[0]);
        arena.remove(ids[2]);
        arena.remove(ids[3]);
        assert_eq!(arena.allocated(), 6);

        let relocation = arena.compact();
        assert_eq!(arena.allocated(), 3);
        assert_eq!(arena.holes(), 0);
        assert_eq!(relocation.survivors(), 3);
        assert_eq!(relocation.moved(), 3);

        assert_eq!(relocation.get(ids[0]), None);
        assert_eq!(relocation.get(ids[1]), Some(SlotId(0)));
        assert_eq!(relocation.get(ids[4]), Some(SlotId(1)));
        assert_eq!(relocation.get(ids[5]), Some(SlotId(2)));

        let values: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1, 4, 5]);
    }

    #[test]
    fn slot_arena_compact_without_holes_moves_nothing() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let relocation = arena.compact();
        assert_eq!(relocation.moved(), 0);
        assert_eq!(relocation.get(a), Some(a));
        assert_eq!(relocation.get(b), Some(b));
    }

    #[test]
    fn slot_arena_insert_after_compact_appends() {
        let mut arena = SlotArena::new();
        let a = arena.insert(10);
        arena.insert(20);
        arena.remove(a);
        arena.compact();
        let c = arena.insert(30);
        assert_eq!(c.index(), 1);
        assert_eq!(arena.get(SlotId(0)), Some(&20));
    }
}
