//! Concatenation of ordered records into one contiguous image.

use crate::collect::FileRecord;

/// Half-open byte range `[start, end)` of one asset inside a packed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRange {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// A packed bundle: every asset's bytes back to back, plus the range table
/// that slices them apart again.
#[derive(Debug, Clone, Default)]
pub struct PackedImage {
    pub bytes: Vec<u8>,
    pub ranges: Vec<NamedRange>,
}

/// Concatenates `records` in the order given.
///
/// Ranges are contiguous: each record's `start` equals the previous record's
/// `end`, the first starts at 0 and the last ends at `bytes.len()`. An empty
/// record still gets a (zero-length) range so its name stays addressable.
#[must_use]
pub fn pack(records: &[FileRecord]) -> PackedImage {
    let total = records.iter().map(|r| r.bytes.len()).sum();
    let mut image = PackedImage {
        bytes: Vec::with_capacity(total),
        ranges: Vec::with_capacity(records.len()),
    };
    for record in records {
        let start = image.bytes.len();
        image.bytes.extend_from_slice(&record.bytes);
        image.ranges.push(NamedRange {
            name: record.path.clone(),
            start,
            end: image.bytes.len(),
        });
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, bytes: &[u8]) -> FileRecord {
        FileRecord {
            path: path.to_owned(),
            bytes: bytes.to_vec(),
            mod_time: None,
        }
    }

    #[test]
    fn ranges_are_contiguous_and_cover_the_image() {
        let image = pack(&[record("a", b"hi"), record("b", b""), record("c", b"hello world")]);

        assert_eq!(image.bytes.len(), 13);
        assert_eq!(image.ranges.len(), 3);
        assert_eq!(image.ranges[0].start, 0);
        for pair in image.ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(image.ranges.last().unwrap().end, image.bytes.len());
    }

    #[test]
    fn slicing_by_range_restores_each_record() {
        let records = [record("x", b"abc"), record("y", b"\x00\xff"), record("z", b"tail")];
        let image = pack(&records);

        for (record, range) in records.iter().zip(&image.ranges) {
            assert_eq!(range.name, record.path);
            assert_eq!(&image.bytes[range.start..range.end], record.bytes.as_slice());
        }
    }

    #[test]
    fn empty_record_gets_a_zero_length_range() {
        let image = pack(&[record("only", b"")]);
        assert!(image.bytes.is_empty());
        assert_eq!(image.ranges[0].start, image.ranges[0].end);
    }

    #[test]
    fn no_records_packs_to_nothing() {
        let image = pack(&[]);
        assert!(image.bytes.is_empty());
        assert!(image.ranges.is_empty());
    }
}
