//! Property-based tests for the pipeline's lossless stages
//!
//! Uses proptest to verify that packing, compression and literal encoding
//! never alter the bytes they carry

use embed_assets::{
    Codec, Encoding, FileRecord, OrderBy, compress, decode, decompress, encode, pack, sort_records,
};
use proptest::prelude::*;

fn record(path: &str) -> FileRecord {
    FileRecord {
        path: path.to_owned(),
        bytes: path.as_bytes().to_vec(),
        mod_time: None,
    }
}

proptest! {
    #[test]
    fn prop_compression_is_lossless(
        data in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        for codec in [Codec::Gzip, Codec::Zstd] {
            let compressed = compress(&data, codec, None).unwrap();
            let restored = decompress(&compressed, codec).unwrap();
            prop_assert_eq!(&restored, &data, "{} altered the data", codec.name());
        }
    }

    #[test]
    fn prop_literal_round_trip_is_exact(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        width in 1usize..160
    ) {
        for encoding in [Encoding::Base64, Encoding::ByteString] {
            let literal = encode(&data, encoding, width, "    ");
            let restored = decode(&literal, encoding).unwrap();
            prop_assert_eq!(&restored, &data, "{} literal altered the data", encoding.name());
        }
    }

    #[test]
    fn prop_packing_preserves_every_member(
        files in prop::collection::vec((".{0,12}", prop::collection::vec(any::<u8>(), 0..64)), 0..16)
    ) {
        let records: Vec<FileRecord> = files
            .into_iter()
            .map(|(path, bytes)| FileRecord { path, bytes, mod_time: None })
            .collect();

        let image = pack(&records);

        prop_assert_eq!(image.ranges.len(), records.len());
        let mut cursor = 0usize;
        for (member, range) in records.iter().zip(&image.ranges) {
            prop_assert_eq!(range.start, cursor, "ranges must be contiguous");
            prop_assert_eq!(&image.bytes[range.start..range.end], member.bytes.as_slice());
            cursor = range.end;
        }
        prop_assert_eq!(cursor, image.bytes.len());
    }

    #[test]
    fn prop_name_order_ignores_collection_order(
        paths in prop::collection::vec("[a-z][a-z0-9./_-]{0,12}", 0..24)
    ) {
        let mut forward: Vec<FileRecord> = paths.iter().map(|p| record(p)).collect();
        let mut backward: Vec<FileRecord> = paths.iter().rev().map(|p| record(p)).collect();
        sort_records(&mut forward, OrderBy::Name);
        sort_records(&mut backward, OrderBy::Name);

        let forward_paths: Vec<&str> = forward.iter().map(|r| r.path.as_str()).collect();
        let backward_paths: Vec<&str> = backward.iter().map(|r| r.path.as_str()).collect();
        prop_assert_eq!(forward_paths, backward_paths);
    }

    #[test]
    fn prop_compression_is_deterministic(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        level in 1i32..9
    ) {
        for codec in [Codec::Gzip, Codec::Zstd] {
            let first = compress(&data, codec, Some(level)).unwrap();
            let second = compress(&data, codec, Some(level)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
