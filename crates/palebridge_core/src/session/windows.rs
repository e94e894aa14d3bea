use std::collections::HashMap;

use palebridge_protocol::java::packet::JavaItemSlot;

/// What the session remembers about one open inventory window: enough to
/// validate a later `SetSlot` against the window it was opened with, and a
/// contents cache so a single-slot update can be re-emitted as full content.
#[derive(Debug, Clone)]
pub struct WindowDescriptor {
    pub kind: i32,
    pub contents: Vec<Option<JavaItemSlot>>,
}

#[derive(Debug, Default)]
pub struct WindowTable {
    open: HashMap<u8, WindowDescriptor>,
}

impl WindowTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, window_id: u8, kind: i32, slot_count: usize) {
        self.open.insert(
            window_id,
            WindowDescriptor {
                kind,
                contents: vec![None; slot_count],
            },
        );
    }

    pub fn close(&mut self, window_id: u8) -> Option<WindowDescriptor> {
        self.open.remove(&window_id)
    }

    pub fn get(&self, window_id: u8) -> Option<&WindowDescriptor> {
        self.open.get(&window_id)
    }

    /// Updates one slot and returns the window's full contents afterward, or
    /// `None` if the window isn't open or the slot index is out of range.
    pub fn set_slot(
        &mut self,
        window_id: u8,
        slot: usize,
        item: Option<JavaItemSlot>,
    ) -> Option<&[Option<JavaItemSlot>]> {
        let descriptor = self.open.get_mut(&window_id)?;
        let cell = descriptor.contents.get_mut(slot)?;
        *cell = item;
        Some(&descriptor.contents)
    }
}
