use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use falling_blocks::core::{Game, ManualPlatform};
use falling_blocks::types::GameEvents;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn core_update_does_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut game = Game::new(ManualPlatform::new());
    let mut now = 0u64;

    // Warm-up: play one game to the end so every log callsite is registered.
    while !game.is_over() {
        now += 16;
        game.update(GameEvents::DROP, now);
    }
    game.update(GameEvents::RESTART, now);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            now += 16;
            game.update(GameEvents::empty(), now);
        }

        for _ in 0..50 {
            now += 16;
            game.update(GameEvents::MOVE_LEFT | GameEvents::ROTATE_CW, now);
            now += 16;
            game.update(GameEvents::MOVE_RIGHT | GameEvents::ROTATE_CCW, now);
            now += 16;
            game.update(GameEvents::MOVE_DOWN | GameEvents::SHOW_NEXT, now);
        }

        // Hard drops drive locking, row clearing and piece promotion.
        for _ in 0..25 {
            now += 16;
            game.update(GameEvents::DROP, now);
            if game.is_over() {
                game.update(GameEvents::RESTART, now);
            }
        }
    });

    assert!(allocs == 0);
}
