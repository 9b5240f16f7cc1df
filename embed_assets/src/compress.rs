//! Lossless compression of the packed image.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::{Error, Result};

/// Compression codec for embedded data.
///
/// Gzip is the default: the generated artifact then needs only `flate2` on
/// the consumer side, which most trees already carry. Zstd trades that for a
/// better ratio on large bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    #[default]
    Gzip,
    Zstd,
}

impl Codec {
    /// Level used when the caller does not pick one.
    #[must_use]
    pub const fn default_level(self) -> i32 {
        match self {
            Codec::Gzip => 6,
            Codec::Zstd => 3,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Codec::Gzip => "gzip",
            Codec::Zstd => "zstd",
        }
    }
}

/// Compresses `data` with `codec`, clamping `level` into the codec's valid
/// range (gzip 0..=9, zstd 1..=21). `None` means the codec default.
///
/// Output is deterministic for a given input, codec and level; the gzip
/// header is written without a timestamp.
///
/// # Errors
///
/// Returns [`Error::Compression`] if the encoder fails, which with
/// in-memory buffers indicates a bug rather than an environmental problem.
pub fn compress(data: &[u8], codec: Codec, level: Option<i32>) -> Result<Vec<u8>> {
    let level = level.unwrap_or(codec.default_level());
    match codec {
        Codec::Gzip => {
            let level = level.clamp(0, 9) as u32;
            let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
            encoder
                .write_all(data)
                .map_err(|e| Error::Compression(format!("gzip write: {e}")))?;
            encoder
                .finish()
                .map_err(|e| Error::Compression(format!("gzip finish: {e}")))
        }
        Codec::Zstd => {
            let level = level.clamp(1, 21);
            zstd::encode_all(data, level).map_err(|e| Error::Compression(format!("zstd encode: {e}")))
        }
    }
}

/// Inverse of [`compress`]. The library runs this over every blob it emits
/// to prove the stream round-trips before the artifact is written.
///
/// # Errors
///
/// Returns [`Error::Compression`] if the stream is not a valid `codec`
/// stream.
pub fn decompress(data: &[u8], codec: Codec) -> Result<Vec<u8>> {
    match codec {
        Codec::Gzip => {
            let mut out = Vec::new();
            GzDecoder::new(data)
                .read_to_end(&mut out)
                .map_err(|e| Error::Compression(format!("gzip decode: {e}")))?;
            Ok(out)
        }
        Codec::Zstd => zstd::decode_all(data).map_err(|e| Error::Compression(format!("zstd decode: {e}"))),
    }
}
