//! Rendering the generated Rust source file.
//!
//! The artifact is one `pub mod` holding the embedded data plus three
//! accessors (`asset_names`, `get`, `must_get`). Data is decoded and
//! decompressed once, on first access, behind a `std::sync::LazyLock`;
//! after that every lookup is a plain map read.

use std::fmt::Write as _;

use crate::compress::Codec;
use crate::encode::Encoding;
use crate::pack::NamedRange;

/// Everything the emitter needs besides the encoded data itself.
#[derive(Debug)]
pub struct EmitParams<'a> {
    /// Name of the generated `pub mod`.
    pub module: &'a str,
    /// Input patterns, echoed into the artifact header.
    pub patterns: &'a [String],
    pub codec: Codec,
    pub encoding: Encoding,
}

/// One asset of a per-file artifact: its lookup name and its already
/// encoded literal.
#[derive(Debug)]
pub struct PerFileEntry {
    pub name: String,
    pub literal: String,
}

/// Renders the packed layout: one compressed blob for the whole bundle and
/// a range table slicing it back into assets.
#[must_use]
pub fn render_packed(
    params: &EmitParams<'_>,
    literal: &str,
    packed_len: usize,
    ranges: &[NamedRange],
) -> String {
    let mut out = header(params, ranges.len());
    out.push_str("/// Embedded assets, decompressed once on first access.\n");
    let _ = writeln!(out, "pub mod {} {{", params.module);
    out.push_str("    use std::collections::HashMap;\n");
    out.push_str("    use std::sync::LazyLock;\n\n");
    let _ = writeln!(out, "    const PACKED_LEN: usize = {packed_len};\n");
    let _ = writeln!(out, "    static COMPRESSED: {} = {literal};\n", literal_type(params.encoding));
    out.push_str("    static RANGES: &[(&str, usize, usize)] = &[\n");
    for range in ranges {
        let _ = writeln!(out, "        ({:?}, {}, {}),", range.name, range.start, range.end);
    }
    out.push_str("    ];\n");
    out.push_str(ASSETS_FROM_RANGES);
    push_unpack(&mut out, params.codec, params.encoding, true);
    out.push_str(ACCESSORS);
    out
}

/// Renders the per-file layout: every asset compressed and encoded on its
/// own, the shape to pick when assets are fetched rarely and the decode
/// cost should stay per-asset.
#[must_use]
pub fn render_per_file(params: &EmitParams<'_>, entries: &[PerFileEntry]) -> String {
    let mut out = header(params, entries.len());
    out.push_str("/// Embedded assets, decompressed once on first access.\n");
    let _ = writeln!(out, "pub mod {} {{", params.module);
    out.push_str("    use std::collections::HashMap;\n");
    out.push_str("    use std::sync::LazyLock;\n\n");
    let _ = writeln!(out, "    static BLOBS: &[(&str, {})] = &[", literal_type(params.encoding));
    for entry in entries {
        let _ = writeln!(out, "        ({:?}, {}),", entry.name, entry.literal);
    }
    out.push_str("    ];\n");
    out.push_str(ASSETS_FROM_BLOBS);
    push_unpack(&mut out, params.codec, params.encoding, false);
    out.push_str(ACCESSORS);
    out
}

fn header(params: &EmitParams<'_>, file_count: usize) -> String {
    let mut out = format!(
        "// @generated by embed_assets {}; do not edit.\n//\n",
        env!("CARGO_PKG_VERSION"),
    );
    let plural = if file_count == 1 { "file" } else { "files" };
    let _ = writeln!(out, "// Bundled {file_count} {plural} matching:");
    for pattern in params.patterns {
        let _ = writeln!(out, "//   {pattern:?}");
    }
    out.push_str("//\n");
    let codec_crate = match params.codec {
        Codec::Gzip => "flate2",
        Codec::Zstd => "zstd",
    };
    match params.encoding {
        Encoding::Base64 => {
            let _ = writeln!(
                out,
                "// Compressed with {} and embedded as base64. Reading it back needs the\n\
                 // `{codec_crate}` and `base64` crates and Rust 1.80 or newer.",
                params.codec.name(),
            );
        }
        Encoding::ByteString => {
            let _ = writeln!(
                out,
                "// Compressed with {} and embedded as a byte string. Reading it back\n\
                 // needs the `{codec_crate}` crate and Rust 1.80 or newer.",
                params.codec.name(),
            );
        }
    }
    out.push('\n');
    out
}

const fn literal_type(encoding: Encoding) -> &'static str {
    match encoding {
        Encoding::Base64 => "&str",
        Encoding::ByteString => "&[u8]",
    }
}

const ASSETS_FROM_RANGES: &str = r#"
    static ASSETS: LazyLock<HashMap<&'static str, Vec<u8>>> = LazyLock::new(|| {
        let packed = unpack();
        debug_assert_eq!(packed.len(), PACKED_LEN);
        let mut map = HashMap::with_capacity(RANGES.len());
        for &(name, start, end) in RANGES {
            map.insert(name, packed[start..end].to_vec());
        }
        map
    });
"#;

const ASSETS_FROM_BLOBS: &str = r#"
    static ASSETS: LazyLock<HashMap<&'static str, Vec<u8>>> = LazyLock::new(|| {
        let mut map = HashMap::with_capacity(BLOBS.len());
        for &(name, blob) in BLOBS {
            map.insert(name, unpack(blob));
        }
        map
    });
"#;

const ACCESSORS: &str = r#"
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
"#;

fn push_unpack(out: &mut String, codec: Codec, encoding: Encoding, packed: bool) {
    let signature = match (packed, encoding) {
        (true, _) => "fn unpack() -> Vec<u8> {",
        (false, Encoding::Base64) => "fn unpack(blob: &str) -> Vec<u8> {",
        (false, Encoding::ByteString) => "fn unpack(blob: &[u8]) -> Vec<u8> {",
    };
    let _ = writeln!(out, "\n    {signature}");

    let mut imported = false;
    if encoding == Encoding::Base64 {
        out.push_str("        use base64::Engine as _;\n");
        imported = true;
    }
    if codec == Codec::Gzip {
        out.push_str("        use std::io::Read as _;\n");
        imported = true;
    }
    if imported {
        out.push('\n');
    }

    let source = if packed { "COMPRESSED" } else { "blob" };
    let input = match encoding {
        Encoding::Base64 => {
            let _ = writeln!(
                out,
                "        let compressed = base64::engine::general_purpose::STANDARD\n\
                 \x20           .decode({source})\n\
                 \x20           .expect(\"embedded asset data: invalid base64\");",
            );
            "compressed.as_slice()"
        }
        Encoding::ByteString => source,
    };

    match codec {
        Codec::Gzip => {
            let var = if packed { "packed" } else { "bytes" };
            if packed {
                out.push_str("        let mut packed = Vec::with_capacity(PACKED_LEN);\n");
            } else {
                out.push_str("        let mut bytes = Vec::new();\n");
            }
            let _ = writeln!(
                out,
                "        flate2::read::GzDecoder::new({input})\n\
                 \x20           .read_to_end(&mut {var})\n\
                 \x20           .expect(\"embedded asset data: invalid gzip stream\");\n\
                 \x20       {var}",
            );
        }
        Codec::Zstd => {
            let _ = writeln!(
                out,
                "        zstd::decode_all({input}).expect(\"embedded asset data: invalid zstd stream\")",
            );
        }
    }
    out.push_str("    }\n");
}
