//! Entity Pool with Swap-Remove Deletion
//!
//! A fixed-capacity, densely packed pool of [`Entity`] records:
//! - `create` hands out the slot at index `live_count`, O(1), no allocation
//! - `destroy` overwrites the target slot with the last live slot and
//!   shrinks the live count, O(1)
//!
//! All storage is allocated once at construction; slots below `live_count`
//! are alive, slots at or above it hold stale leftovers.
//!
//! Slot indices are not stable identity: a destroy relocates the last live
//! entity into the freed slot. Handles are therefore generation-counted -
//! each slot carries a generation that bumps whenever its occupant changes,
//! so a stale handle is detected instead of silently aliasing whatever moved
//! in. A destroy that relocates an entity reports the move in its return
//! value so callers tracking handles can update them.

use super::entity::Entity;

/// A generation-counted handle to a pool slot.
///
/// Two handles with the same index but different generations refer to
/// different entities. Handles go stale when their entity is destroyed or
/// relocated by a swap-remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    /// Slot index in the pool's live range
    index: u32,
    /// Generation of the slot when the handle was issued
    generation: u32,
}

impl EntityId {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Get the slot index of this handle (valid only until the next destroy).
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Get the generation of this handle.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Error type for pool operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Every slot is live; the caller must destroy before creating
    Exhausted,
    /// The handle's entity was destroyed or relocated since it was issued
    StaleHandle(EntityId),
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::Exhausted => write!(f, "entity pool is at capacity"),
            PoolError::StaleHandle(id) => write!(
                f,
                "stale entity handle (index {}, generation {})",
                id.index, id.generation
            ),
        }
    }
}

impl std::error::Error for PoolError {}

/// Reports a swap-remove that relocated the last live entity.
///
/// `from` is the handle the moved entity had before the destroy (now stale),
/// `to` is its new handle. Callers caching handles to the moved entity must
/// replace `from` with `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub from: EntityId,
    pub to: EntityId,
}

/// Fixed-capacity pool of entities with O(1) create/destroy.
///
/// Invariants: `live_count <= capacity`; slots with index below `live_count`
/// are alive; slots at or above it are stale. Index-based references must
/// not be held across a `destroy` call on a different entity.
pub struct EntityPool {
    /// All slots, allocated and default-initialized once at construction
    slots: Vec<Entity>,
    /// Per-slot generation, bumped whenever the slot's occupant changes
    generations: Vec<u32>,
    /// Number of live entities; the live range is `slots[..live_count]`
    live_count: usize,
}

impl EntityPool {
    /// Create a pool with every slot pre-allocated and default-initialized.
    /// This is the only point at which slots are initialized; `create` hands
    /// them out as-is afterwards.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Entity::default(); capacity],
            generations: vec![0; capacity],
            live_count: 0,
        }
    }

    // =========================================================================
    // Create / destroy
    // =========================================================================

    /// Make the next slot live and return its handle.
    ///
    /// Fails with [`PoolError::Exhausted`] at capacity, without mutating the
    /// live count. The slot's contents are whatever its previous occupant
    /// left behind (or the defaults from construction); the caller must
    /// populate every field it relies on.
    pub fn create(&mut self) -> Result<EntityId, PoolError> {
        if self.live_count == self.capacity() {
            return Err(PoolError::Exhausted);
        }
        let index = self.live_count;
        self.live_count += 1;
        Ok(EntityId::new(index as u32, self.generations[index]))
    }

    /// Destroy a live entity by swapping the last live slot into its place.
    ///
    /// Returns `Ok(Some(Relocation))` when another entity was moved to fill
    /// the freed slot, `Ok(None)` when the destroyed entity was the last
    /// live one (pure decrement, no copy). A stale or out-of-range handle is
    /// a contract violation reported as [`PoolError::StaleHandle`]; the pool
    /// is left untouched.
    pub fn destroy(&mut self, id: EntityId) -> Result<Option<Relocation>, PoolError> {
        let index = id.index as usize;
        if index >= self.live_count || self.generations[index] != id.generation {
            return Err(PoolError::StaleHandle(id));
        }

        let last = self.live_count - 1;
        self.live_count = last;

        if index == last {
            // Destroying the last live entity: nothing moves
            self.generations[index] += 1;
            return Ok(None);
        }

        // The destroyed entity's data becomes the stale leftover at `last`
        self.slots.swap(index, last);
        let from = EntityId::new(last as u32, self.generations[last]);
        self.generations[index] += 1;
        self.generations[last] += 1;
        let to = EntityId::new(index as u32, self.generations[index]);
        Ok(Some(Relocation { from, to }))
    }

    /// Destroy every live entity and invalidate all outstanding handles.
    pub fn clear(&mut self) {
        for generation in &mut self.generations {
            *generation += 1;
        }
        self.live_count = 0;
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Check whether a handle still refers to a live entity.
    pub fn is_alive(&self, id: EntityId) -> bool {
        let index = id.index as usize;
        index < self.live_count && self.generations[index] == id.generation
    }

    /// Get a reference to a live entity, `None` for a stale handle.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if self.is_alive(id) {
            Some(&self.slots[id.index as usize])
        } else {
            None
        }
    }

    /// Get a mutable reference to a live entity, `None` for a stale handle.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.is_alive(id) {
            Some(&mut self.slots[id.index as usize])
        } else {
            None
        }
    }

    /// Current handle for the entity at a live index, `None` out of range.
    /// The returned handle is only as stable as the index it came from.
    pub fn id_at(&self, index: usize) -> Option<EntityId> {
        if index < self.live_count {
            Some(EntityId::new(index as u32, self.generations[index]))
        } else {
            None
        }
    }

    /// Number of live entities.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Total slot count, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate the live range in index order.
    ///
    /// There is no iteration-safe mutation contract: to destroy while
    /// walking the live range, iterate indices backward with
    /// [`id_at`](Self::id_at) instead.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots[..self.live_count]
            .iter()
            .zip(self.generations.iter())
            .enumerate()
            .map(|(index, (entity, &generation))| {
                (EntityId::new(index as u32, generation), entity)
            })
    }

    /// Iterate the live range mutably in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.slots[..self.live_count]
            .iter_mut()
            .zip(self.generations.iter())
            .enumerate()
            .map(|(index, (entity, &generation))| {
                (EntityId::new(index as u32, generation), entity)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    /// Create an entity tagged by position.x so moves are observable
    fn spawn_tagged(pool: &mut EntityPool, tag: f32) -> EntityId {
        let id = pool.create().expect("pool should have room");
        pool.get_mut(id).unwrap().transform.position = vec2(tag, 0.0);
        id
    }

    fn tag_at(pool: &EntityPool, index: usize) -> f32 {
        let id = pool.id_at(index).unwrap();
        pool.get(id).unwrap().transform.position.x
    }

    #[test]
    fn test_create_until_exhausted() {
        let mut pool = EntityPool::new(3);
        for _ in 0..3 {
            pool.create().unwrap();
        }
        assert_eq!(pool.live_count(), 3);

        // The (C+1)-th create fails without mutating the live count
        assert_eq!(pool.create(), Err(PoolError::Exhausted));
        assert_eq!(pool.live_count(), 3);
    }

    #[test]
    fn test_destroy_middle_moves_last() {
        let mut pool = EntityPool::new(4);
        let ids: Vec<_> = (0..4).map(|i| spawn_tagged(&mut pool, i as f32)).collect();

        // Destroy index 1: entity formerly at index 3 now occupies index 1
        let relocation = pool.destroy(ids[1]).unwrap().unwrap();
        assert_eq!(pool.live_count(), 3);
        assert_eq!(tag_at(&pool, 1), 3.0);
        // Untouched slots keep their occupants
        assert_eq!(tag_at(&pool, 0), 0.0);
        assert_eq!(tag_at(&pool, 2), 2.0);

        // The relocation names the moved entity's old and new handles
        assert_eq!(relocation.from, ids[3]);
        assert!(!pool.is_alive(relocation.from));
        assert!(pool.is_alive(relocation.to));
        assert_eq!(pool.get(relocation.to).unwrap().transform.position.x, 3.0);
    }

    #[test]
    fn test_destroy_last_is_pure_decrement() {
        let mut pool = EntityPool::new(4);
        let ids: Vec<_> = (0..3).map(|i| spawn_tagged(&mut pool, i as f32)).collect();

        let relocation = pool.destroy(ids[2]).unwrap();
        assert_eq!(relocation, None);
        assert_eq!(pool.live_count(), 2);
        assert_eq!(tag_at(&pool, 0), 0.0);
        assert_eq!(tag_at(&pool, 1), 1.0);
    }

    #[test]
    fn test_drain_from_front() {
        let mut pool = EntityPool::new(8);
        for i in 0..8 {
            spawn_tagged(&mut pool, i as f32);
        }

        // Repeatedly destroying index 0 empties the pool
        while let Some(id) = pool.id_at(0) {
            pool.destroy(id).unwrap();
        }
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn test_stale_handle_rejected() {
        let mut pool = EntityPool::new(4);
        let a = spawn_tagged(&mut pool, 0.0);
        let b = spawn_tagged(&mut pool, 1.0);

        pool.destroy(a).unwrap();
        assert_eq!(pool.destroy(a), Err(PoolError::StaleHandle(a)));
        // A failed destroy mutates nothing
        assert_eq!(pool.live_count(), 1);

        // b was relocated into slot 0, so its old handle is stale too
        assert!(!pool.is_alive(b));
        assert_eq!(pool.destroy(b), Err(PoolError::StaleHandle(b)));
        assert!(pool.get(b).is_none());
        assert_eq!(pool.live_count(), 1);
    }

    #[test]
    fn test_slot_reuse_gets_fresh_generation() {
        let mut pool = EntityPool::new(2);
        let a = pool.create().unwrap();
        pool.destroy(a).unwrap();

        let reused = pool.create().unwrap();
        assert_eq!(reused.index(), a.index());
        assert_ne!(reused.generation(), a.generation());
        assert!(pool.is_alive(reused));
        assert!(!pool.is_alive(a));
    }

    #[test]
    fn test_create_does_not_reset_slot() {
        let mut pool = EntityPool::new(2);
        let a = spawn_tagged(&mut pool, 42.0);
        pool.destroy(a).unwrap();

        // The reused slot still holds the previous occupant's data; callers
        // must fully populate what they rely on
        let b = pool.create().unwrap();
        assert_eq!(pool.get(b).unwrap().transform.position.x, 42.0);
    }

    #[test]
    fn test_clear_invalidates_all_handles() {
        let mut pool = EntityPool::new(4);
        let ids: Vec<_> = (0..4).map(|i| spawn_tagged(&mut pool, i as f32)).collect();

        pool.clear();
        assert_eq!(pool.live_count(), 0);
        for id in ids {
            assert!(!pool.is_alive(id));
        }
        assert!(pool.create().is_ok());
    }

    #[test]
    fn test_iter_covers_live_range() {
        let mut pool = EntityPool::new(4);
        for i in 0..3 {
            spawn_tagged(&mut pool, i as f32);
        }

        let tags: Vec<f32> = pool.iter().map(|(_, e)| e.transform.position.x).collect();
        assert_eq!(tags, vec![0.0, 1.0, 2.0]);

        // Every yielded handle is live
        let ids: Vec<EntityId> = pool.iter().map(|(id, _)| id).collect();
        assert!(ids.into_iter().all(|id| pool.is_alive(id)));
    }
}
