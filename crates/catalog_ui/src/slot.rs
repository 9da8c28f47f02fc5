use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Decoded RGBA8 pixels ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Loading {
        url: String,
    },
    Ready(Arc<LoadedImage>),
    Failed {
        url: String,
        reason: String,
    },
}

#[derive(Debug, Default)]
struct SlotInner {
    generation: u64,
    state: SlotState,
}

/// Image area of one row.
///
/// Every [`ImageSlot::bind`] starts a new generation. Loads started for an
/// older generation still run to completion but their result is dropped, so
/// a recycled row never shows the image of the item it was bound to before.
#[derive(Debug, Clone, Default)]
pub struct ImageSlot {
    inner: Arc<Mutex<SlotInner>>,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, url: &str) -> SlotTicket {
        let mut guard = self.lock();
        guard.generation += 1;
        guard.state = SlotState::Loading {
            url: url.to_string(),
        };
        SlotTicket {
            slot: self.clone(),
            generation: guard.generation,
            url: url.to_string(),
        }
    }

    /// Detaches the slot from whatever it showed; pending loads become stale.
    pub fn clear(&self) {
        let mut guard = self.lock();
        guard.generation += 1;
        guard.state = SlotState::Empty;
    }

    pub fn state(&self) -> SlotState {
        self.lock().state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_if_current(&self, generation: u64, state: SlotState) -> bool {
        let mut guard = self.lock();
        if guard.generation != generation {
            return false;
        }
        guard.state = state;
        true
    }
}

/// Write permit for one bind of an [`ImageSlot`].
#[derive(Debug)]
pub struct SlotTicket {
    slot: ImageSlot,
    generation: u64,
    url: String,
}

impl SlotTicket {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_current(&self) -> bool {
        self.slot.lock().generation == self.generation
    }

    /// Returns `false` when the slot was rebound since this ticket was issued.
    pub fn fulfil(self, image: LoadedImage) -> bool {
        self.slot
            .write_if_current(self.generation, SlotState::Ready(Arc::new(image)))
    }

    pub fn fail(self, reason: impl Into<String>) -> bool {
        let state = SlotState::Failed {
            url: self.url,
            reason: reason.into(),
        };
        self.slot.write_if_current(self.generation, state)
    }
}
