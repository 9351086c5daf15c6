//! open-int-map: an open-addressed map from `i32` keys to `i64` values
//! that stores keys and values in flat primitive arrays instead of boxed
//! entries.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, allocation-light associative container for integer
//!   keys with insert/overwrite, lookup, membership by key and by value,
//!   bulk insert, and full clear. Individual removal is not supported.
//! - Layers:
//!   - `probe::Probe`: the deterministic slot sequence for one key.
//!   - `table::Table`: one storage generation (key slots, value slots,
//!     key-zero side channel, occupancy count).
//!   - `OpenHashMap`: public API; owns the current `Table`, the default
//!     value, the load-factor check and the resize policy.
//!
//! Constraints
//! - Key `0` marks an empty slot, so the entry for key `0` is kept in a
//!   separate `Option<i64>` and never placed in the slot arrays.
//! - Load factor: after every mutation `len() <= capacity() / 2`.
//! - Initial capacity is 32. Growing allocates a fresh table of
//!   `(len + incoming) * 4` slots, rehashes every entry into it, then
//!   swaps it in; the old table is never mutated during the rehash.
//! - `put_all` grows at most once per call.
//!
//! Probing
//! - Attempt `0` is `key mod capacity`; attempt `a` is
//!   `|key + 7a + 3a²| mod capacity` up to `capacity` attempts, followed
//!   by a linear walk from the origin. The walk guarantees an insertion
//!   always finds a free slot even where the polynomial cycles through a
//!   subset of residues.
//! - Lookups stop after `max(len, longest insertion probe) + 1` attempts.
//!   `get` steps over empty slots; `contains_key` stops at the first one.
//!   Both give the same answer because slots are never vacated.
//!
//! Concurrency
//! - No internal synchronization. Mutation requires `&mut self`; callers
//!   that share a map across threads wrap it in their own lock.
//!
//! Notes and non-goals
//! - Lookup misses return the configured default value; a stored value
//!   equal to it is indistinguishable from absence through `get`.
//! - Capacity arithmetic overflow is not guarded.
//! - Only `i32 -> i64`; no generic key or value types.

mod open_map;
mod open_map_proptest;
mod probe;
mod table;

// Public surface
pub use open_map::OpenHashMap;
pub use table::Iter;
