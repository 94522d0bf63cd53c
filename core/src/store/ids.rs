// storefront/src/store/ids.rs

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source for cart rows.
#[derive(Debug)]
pub(crate) struct IdAllocator {
  next: AtomicU64,
}

impl IdAllocator {
  pub(crate) fn new() -> Self {
    Self { next: AtomicU64::new(1) }
  }

  /// Records that `id` is taken, so it is never handed out. Observing
  /// `u64::MAX - 1` or above exhausts the allocator.
  pub(crate) fn observe(&self, id: u64) {
    self.next.fetch_max(id.saturating_add(1), Ordering::SeqCst);
  }

  /// `None` once the id space is used up; `u64::MAX` is never issued.
  pub(crate) fn allocate(&self) -> Option<u64> {
    self
      .next
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| (next < u64::MAX).then_some(next + 1))
      .ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn never_reissues_observed_ids() {
    let ids = IdAllocator::new();
    assert_eq!(ids.allocate(), Some(1));
    ids.observe(10);
    assert_eq!(ids.allocate(), Some(11));
    ids.observe(4); // lower ids do not move the counter back
    assert_eq!(ids.allocate(), Some(12));
  }

  #[test]
  fn exhausted_allocator_never_wraps() {
    let ids = IdAllocator::new();
    ids.observe(u64::MAX - 2);
    assert_eq!(ids.allocate(), Some(u64::MAX - 1));
    assert_eq!(ids.allocate(), None);

    let ids = IdAllocator::new();
    ids.observe(u64::MAX);
    assert_eq!(ids.allocate(), None);
    assert_eq!(ids.allocate(), None);
  }
}
