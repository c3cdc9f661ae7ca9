use std::collections::BTreeMap;

use super::WaymarkPreset;

/// Identifies a registered zone id listener, so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

pub type ZoneIdListener = Box<dyn FnMut(&WaymarkPreset, u16)>;

/// Callbacks that are interested in a preset's zone id changing.
/// Handles only ever increase, so iterating the map is registration order.
#[derive(Default)]
pub(crate) struct ZoneIdListeners {
    next_handle: u64,
    listeners: BTreeMap<ListenerHandle, ZoneIdListener>,
}

impl ZoneIdListeners {
    pub fn add(&mut self, listener: ZoneIdListener) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.insert(handle, listener);
        handle
    }

    pub fn remove(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(&handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Takes every listener out, so they can be called while the preset is borrowed.
    pub fn take(&mut self) -> BTreeMap<ListenerHandle, ZoneIdListener> {
        std::mem::take(&mut self.listeners)
    }

    /// Puts listeners taken with `take` back.
    pub fn restore(&mut self, listeners: BTreeMap<ListenerHandle, ZoneIdListener>) {
        self.listeners = listeners;
    }
}

impl std::fmt::Debug for ZoneIdListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ZoneIdListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
