//! Deterministic ordering of collected records.

use crate::collect::FileRecord;

/// Sort key for bundle members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Byte-wise ascending by path. The default; it is reproducible across
    /// machines and checkouts.
    #[default]
    Name,
    /// Ascending by modification time. Records the platform reported no
    /// timestamp for sort before all timestamped ones.
    ModTime,
}

/// Sorts `records` in place by the chosen key.
///
/// Both sorts are stable, so records that compare equal keep their
/// collection order and repeated runs over the same inputs produce the
/// same sequence.
pub fn sort_records(records: &mut [FileRecord], order: OrderBy) {
    match order {
        OrderBy::Name => records.sort_by(|a, b| a.path.cmp(&b.path)),
        OrderBy::ModTime => records.sort_by_key(|r| r.mod_time),
    }
}
