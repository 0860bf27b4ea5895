//! Memory accounting for tree release.
//!
//! Lives in its own test binary because it installs a counting global
//! allocator. Only allocations made on the thread that switched tracking
//! on are counted, so the harness's own threads do not disturb the total.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicIsize, Ordering};

use nogo_mcts::board::{Board, Color};
use nogo_mcts::budget::Budget;
use nogo_mcts::mcts::TreeSearch;

struct CountingAlloc;

static LIVE_BYTES: AtomicIsize = AtomicIsize::new(0);

thread_local! {
    static TRACKING: Cell<bool> = const { Cell::new(false) };
}

fn tracking() -> bool {
    TRACKING.try_with(Cell::get).unwrap_or(false)
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() && tracking() {
            LIVE_BYTES.fetch_add(layout.size() as isize, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if tracking() {
            LIVE_BYTES.fetch_sub(layout.size() as isize, Ordering::SeqCst);
        }
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() && tracking() {
            LIVE_BYTES.fetch_add(new_size as isize - layout.size() as isize, Ordering::SeqCst);
        }
        new_ptr
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn live_bytes() -> isize {
    LIVE_BYTES.load(Ordering::SeqCst)
}

#[test]
fn test_release_returns_memory_to_baseline() {
    TRACKING.with(|t| t.set(true));
    let baseline = live_bytes();

    let mut search = TreeSearch::new(Board::default(), Color::Black, fastrand::Rng::with_seed(9));
    let stats = search.run(Budget::Iterations(300));
    assert!(stats.nodes > 1);
    let peak = live_bytes();
    assert!(peak > baseline, "a searched tree should hold memory");

    assert_eq!(search.release(), stats.nodes);
    let after = live_bytes();
    TRACKING.with(|t| t.set(false));

    assert_eq!(after, baseline, "release left {} bytes allocated", after - baseline);
}
