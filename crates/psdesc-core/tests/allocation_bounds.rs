use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use psdesc_core::{DescriptorError, decode_descriptor};

mod common;

use common::builder::StreamBuilder;

// Tracks live heap bytes and their high-water mark for this test binary.
struct Tracking;

static LIVE: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for Tracking {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            let live = LIVE.fetch_add(layout.size(), Ordering::SeqCst) + layout.size();
            PEAK.fetch_max(live, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        LIVE.fetch_sub(layout.size(), Ordering::SeqCst);
    }
}

#[global_allocator]
static ALLOCATOR: Tracking = Tracking;

#[test]
fn corrupt_counts_do_not_reserve_beyond_input() {
    let mut builder = StreamBuilder::new().header("", "null", 1);
    for _ in 0..60 {
        builder = builder.key("Lyrs", b"VlLs").u32(u32::MAX);
    }
    let bytes = builder.raw(&vec![0; 1 << 20]).finish();

    let baseline = LIVE.load(Ordering::SeqCst);
    PEAK.store(baseline, Ordering::SeqCst);
    let result = decode_descriptor(&bytes);
    let growth = PEAK.load(Ordering::SeqCst).saturating_sub(baseline);

    assert!(matches!(result, Err(DescriptorError::UnknownTypeTag { .. })));
    assert!(
        growth < 8 << 20,
        "decoding {} bytes reserved {growth} bytes",
        bytes.len()
    );
}
