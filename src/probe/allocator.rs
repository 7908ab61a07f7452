//! Global allocator wrapper maintaining a per-thread allocated-bytes counter.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

thread_local! {
    static THREAD_ALLOCATED: Cell<u64> = const { Cell::new(0) };
}

/// Allocator forwarding to [`System`] while counting requested bytes per
/// thread.
///
/// `alloc`, `alloc_zeroed` and `realloc` each add the size they hand out;
/// frees are not subtracted. The counter wraps on overflow.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingAllocator;

fn record(bytes: usize) {
    let bytes = u64::try_from(bytes).unwrap_or(u64::MAX);
    // `try_with` fails only while the thread is being torn down.
    let _ = THREAD_ALLOCATED.try_with(|total| total.set(total.get().wrapping_add(bytes)));
}

/// Bytes counted for the calling thread so far.
///
/// Stays at zero when [`CountingAllocator`] is not the global allocator.
#[must_use]
pub fn thread_allocated() -> u64 { THREAD_ALLOCATED.try_with(Cell::get).unwrap_or(0) }

// SAFETY: This allocator forwards all allocation operations directly to
// `System` while bumping a thread-local counter. It does not change pointer
// ownership or layout semantics, and the const-initialised `Cell<u64>` needs
// no lazy initialisation or destructor, so touching it never allocates.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        // SAFETY: Delegates to the system allocator with unchanged `layout`.
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: Delegates to the system allocator with unchanged arguments.
        unsafe { System.dealloc(ptr, layout) };
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        // SAFETY: Delegates to the system allocator with unchanged `layout`.
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record(new_size);
        // SAFETY: Delegates to the system allocator with unchanged arguments.
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}
