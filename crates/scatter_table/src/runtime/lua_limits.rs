//! Table limits and sizing constants.
//!
//! Mirrors the `lmem.h` / `lobject.c` constants of the Lua 3 runtime.

// ===== Dimensions =====

/// Slot counts a table may have under the prime policy.
/// Each entry is roughly twice the previous one; the small leading primes
/// keep tiny tables tiny.
pub const DIMENSIONS: [usize; 32] = [
    3, 5, 7, 11, 23, 47, 97, 197, 397, 797, 1597, 3203, 6421, 12853, 25717, 51437, 102877,
    205759, 411527, 823117, 1646237, 3292489, 6584983, 13169977, 26339969, 52679969, 105359939,
    210719881, 421439783, 842879579, 1685759167, 2147483647,
];

/// Largest slot count any table may reach (`MAX_INT`).
pub const MAX_TABLE_SIZE: usize = i32::MAX as usize;

// ===== GC accounting =====

/// Slots charged as one block by the collector.
pub const GC_SLOTS_PER_BLOCK: usize = 16;

const _: () = assert!(DIMENSIONS[DIMENSIONS.len() - 1] == MAX_TABLE_SIZE);
