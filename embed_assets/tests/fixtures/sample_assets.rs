// @generated by embed_assets 0.1.0; do not edit.
//
// Bundled 3 files matching:
//   "*.txt"
//
// Compressed with gzip and embedded as base64. Reading it back needs the
// `flate2` and `base64` crates and Rust 1.80 or newer.

/// Embedded assets, decompressed once on first access.
pub mod assets {
    use std::collections::HashMap;
    use std::sync::LazyLock;

    const PACKED_LEN: usize = 13;

    static COMPRESSED: &str = "H4sIAAAAAAAEAwENAPL/aGloZWxsbyB3b3JsZEG5sogNAAAA";

    static RANGES: &[(&str, usize, usize)] = &[
        ("a.txt", 0, 2),
        ("b.txt", 2, 2),
        ("c.txt", 2, 13),
    ];

    static ASSETS: LazyLock<HashMap<&'static str, Vec<u8>>> = LazyLock::new(|| {
        let packed = unpack();
        debug_assert_eq!(packed.len(), PACKED_LEN);
        let mut map = HashMap::with_capacity(RANGES.len());
        for &(name, start, end) in RANGES {
            map.insert(name, packed[start..end].to_vec());
        }
        map
    });

    fn unpack() -> Vec<u8> {
        use base64::Engine as _;
        use std::io::Read as _;

        let compressed = base64::engine::general_purpose::STANDARD
            .decode(COMPRESSED)
            .expect("embedded asset data: invalid base64");
        let mut packed = Vec::with_capacity(PACKED_LEN);
        flate2::read::GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut packed)
            .expect("embedded asset data: invalid gzip stream");
        packed
    }

    /// Names of every bundled asset, ascending.
    pub fn asset_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = ASSETS.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// The bytes bundled under `name`, or `None` if nothing was bundled
    /// under that name.
    pub fn get(name: &str) -> Option<&'static [u8]> {
        ASSETS.get(name).map(Vec::as_slice)
    }

    /// Like [`get`], but panics when `name` was never bundled.
    pub fn must_get(name: &str) -> &'static [u8] {
        match get(name) {
            Some(bytes) => bytes,
            None => panic!("asset not bundled: {name:?}"),
        }
    }
}
