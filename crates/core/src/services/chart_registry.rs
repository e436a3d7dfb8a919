use std::collections::{BTreeMap, HashMap};

use crate::models::chart::{ChartHandle, ChartSlot, ChartSpec};

/// Something that can draw charts: a canvas binding, a terminal, a test double.
///
/// Every `create` must eventually be paired with a `destroy` of the same
/// handle; `ChartRegistry` guarantees that for everything it creates.
pub trait ChartSurface: Send {
    /// Draw `spec` into `slot` and return a handle to the new instance.
    fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> ChartHandle;

    /// Tear down a previously created instance.
    fn destroy(&mut self, handle: ChartHandle);
}

/// Tracks the one live chart instance per slot.
///
/// `replace` destroys the old instance before creating the new one, so a
/// slot never holds two overlapping charts.
pub struct ChartRegistry {
    surface: Box<dyn ChartSurface>,
    live: BTreeMap<ChartSlot, ChartHandle>,
}

impl ChartRegistry {
    pub fn new(surface: Box<dyn ChartSurface>) -> Self {
        Self {
            surface,
            live: BTreeMap::new(),
        }
    }

    /// Bind a new chart to `slot`, destroying whatever was there.
    pub fn replace(&mut self, slot: ChartSlot, spec: &ChartSpec) -> ChartHandle {
        self.release(slot);
        let handle = self.surface.create(slot, spec);
        self.live.insert(slot, handle);
        handle
    }

    /// Destroy the chart bound to `slot`. Returns `false` if the slot was empty.
    pub fn release(&mut self, slot: ChartSlot) -> bool {
        match self.live.remove(&slot) {
            Some(handle) => {
                self.surface.destroy(handle);
                true
            }
            None => false,
        }
    }

    /// Destroy every live chart (logout, teardown).
    pub fn release_all(&mut self) {
        for (_, handle) in std::mem::take(&mut self.live) {
            self.surface.destroy(handle);
        }
    }

    #[must_use]
    pub fn handle(&self, slot: ChartSlot) -> Option<ChartHandle> {
        self.live.get(&slot).copied()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Drop for ChartRegistry {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// A surface that draws nothing and just remembers live instances.
///
/// Used when no real drawing target is attached (CLI, server-side rendering);
/// the rendered `ChartSpec`s are still available on the `DashboardView`.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_id: u64,
    live: HashMap<ChartHandle, ChartSlot>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.live.len()
    }
}

impl ChartSurface for HeadlessSurface {
    fn create(&mut self, slot: ChartSlot, _spec: &ChartSpec) -> ChartHandle {
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.live.insert(handle, slot);
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.live.remove(&handle);
    }
}
