//! Display shared between a refresh context and the drawing code
//!
//! The refresh usually runs from a periodic task or timer interrupt while
//! the application draws from its main loop. Wrapping the display in a
//! critical-section mutex lets both sides borrow it without `unsafe`
//! statics. A lock is held for at most one full refresh.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Display slot usable from a `static`
pub struct SharedDisplay<D> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Option<D>>>,
}

impl<D> SharedDisplay<D> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Install `display`, returning the one it replaces
    pub fn install(&self, display: D) -> Option<D> {
        self.inner
            .lock(|cell| cell.try_borrow_mut().ok().and_then(|mut slot| slot.replace(display)))
    }

    /// Remove the display from the slot
    pub fn take(&self) -> Option<D> {
        self.inner
            .lock(|cell| cell.try_borrow_mut().ok().and_then(|mut slot| slot.take()))
    }

    /// Check whether a display is installed
    pub fn is_installed(&self) -> bool {
        self.inner
            .lock(|cell| cell.try_borrow().map_or(true, |slot| slot.is_some()))
    }

    /// Run `f` with exclusive access to the display
    ///
    /// Returns `None` when the slot is empty or already borrowed by an
    /// enclosing `with` on the same context.
    pub fn with<R>(&self, f: impl FnOnce(&mut D) -> R) -> Option<R> {
        self.inner.lock(|cell| {
            let mut slot = cell.try_borrow_mut().ok()?;
            slot.as_mut().map(f)
        })
    }
}

impl<D> Default for SharedDisplay<D> {
    fn default() -> Self {
        Self::new()
    }
}
