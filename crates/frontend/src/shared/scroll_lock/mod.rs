//! Reference-counted lock on document scrolling.
//!
//! Every open modal holds a [`ScrollLockGuard`]. The body stops scrolling when the first
//! guard is taken and scrolls again only after the last one is dropped, so a modal
//! opened on top of another never unlocks the page underneath.

use std::cell::Cell;

/// Pure counter behind the lock
#[derive(Debug, Default)]
pub struct LockCounter {
    count: usize,
}

impl LockCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when this acquisition locked the page (0 -> 1)
    pub fn acquire(&mut self) -> bool {
        self.count += 1;
        self.count == 1
    }

    /// Returns true when this release unlocked the page (1 -> 0).
    ///
    /// Releasing an unheld lock is a no-op.
    pub fn release(&mut self) -> bool {
        match self.count {
            0 => false,
            1 => {
                self.count = 0;
                true
            }
            _ => {
                self.count -= 1;
                false
            }
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

thread_local! {
    static COUNTER: Cell<usize> = const { Cell::new(0) };
}

fn with_counter<R>(f: impl FnOnce(&mut LockCounter) -> R) -> R {
    COUNTER.with(|cell| {
        let mut counter = LockCounter { count: cell.get() };
        let out = f(&mut counter);
        cell.set(counter.count);
        out
    })
}

fn set_body_overflow(value: &str) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let style = body.style();
    let result = if value.is_empty() {
        style.remove_property("overflow").map(|_| ())
    } else {
        style.set_property("overflow", value)
    };
    if let Err(e) = result {
        log::warn!("failed to toggle body scroll: {:?}", e);
    }
}

/// Held while a modal is open; dropping it releases the lock
#[derive(Debug)]
pub struct ScrollLockGuard {
    _private: (),
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        if with_counter(|c| c.release()) {
            set_body_overflow("");
        }
    }
}

pub fn acquire() -> ScrollLockGuard {
    if with_counter(|c| c.acquire()) {
        set_body_overflow("hidden");
    }
    ScrollLockGuard { _private: () }
}
