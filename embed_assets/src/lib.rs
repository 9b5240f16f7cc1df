//! Bundle static files into a generated Rust source file.
//!
//! `embed_assets` resolves glob patterns, packs the matched files together,
//! compresses the result, and renders it as a compilable `.rs` file that
//! exposes the data through three functions: `asset_names()`, `get(name)`
//! and `must_get(name)`. The bundle is decompressed once, on first access,
//! and served from memory afterwards.
//!
//! The generated file does not depend on this crate. It needs only the
//! codec crate named in its header (`flate2` by default) and, for the
//! default encoding, `base64`.
//!
//! ## Usage
//!
//! ```no_run
//! // e.g. in an xtask or a small bin target
//! embed_assets::Config::new(["assets/**/*.css", "assets/**/*.js"])
//!     .module("static_files")
//!     .output("src/static_files.rs")
//!     .write()
//!     .expect("failed to bundle assets");
//! ```
//!
//! Output is deterministic: the same inputs at the same paths produce a
//! byte-identical file, whatever order the filesystem lists them in.

#![doc(html_root_url = "https://docs.rs/embed_assets/0.1.0")]

use std::fs;
use std::path::PathBuf;

mod collect;
mod compress;
mod emit;
mod encode;
mod error;
mod order;
mod pack;

pub use collect::{FileRecord, collect};
pub use compress::{Codec, compress, decompress};
pub use emit::{EmitParams, PerFileEntry, render_packed, render_per_file};
pub use encode::{DEFAULT_LINE_WIDTH, Encoding, decode, encode};
pub use error::{Error, Result};
pub use order::{OrderBy, sort_records};
pub use pack::{NamedRange, PackedImage, pack};

/// Overall shape of the generated data section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// All assets concatenated and compressed as one stream, with a range
    /// table to slice them apart at load time. Small files compress much
    /// better against each other than alone. The default.
    #[default]
    Packed,
    /// Every asset compressed and embedded on its own.
    PerFile,
}

/// A builder for one bundling run.
///
/// # Example
/// ```no_run
/// embed_assets::Config::new(["templates/*.html"])
///     .codec(embed_assets::Codec::Zstd)
///     .write()
///     .expect("failed to bundle assets");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    patterns: Vec<String>,
    module: String,
    output: PathBuf,
    order_by: OrderBy,
    codec: Codec,
    encoding: Encoding,
    layout: Layout,
    level: Option<i32>,
    line_width: usize,
}

impl Config {
    /// Creates a configuration for the given glob patterns.
    ///
    /// Patterns are resolved relative to the current directory, in the
    /// order given. Defaults: module `assets`, output `assets.rs`, packed
    /// layout, gzip, base64, name ordering.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            module: "assets".to_owned(),
            output: PathBuf::from("assets.rs"),
            order_by: OrderBy::default(),
            codec: Codec::default(),
            encoding: Encoding::default(),
            layout: Layout::default(),
            level: None,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Sets the name of the generated `pub mod`.
    #[must_use]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Sets the path the generated source is written to. Missing parent
    /// directories are created.
    #[must_use]
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the bundle member order.
    #[must_use]
    pub const fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Sets the source-literal encoding.
    #[must_use]
    pub const fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the data-section layout.
    #[must_use]
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the compression level, clamped into the codec's valid range
    /// (gzip 0-9, zstd 1-21). Unset means the codec's default.
    #[must_use]
    pub const fn level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the column the embedded literal wraps at.
    #[must_use]
    pub const fn line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Runs the pipeline and returns the generated source as a string.
    ///
    /// Every compressed blob is decompressed again and compared before it
    /// is accepted, and every literal is parsed back likewise, so a
    /// returned `Ok` is known to round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPatterns`] when the pattern list is empty,
    /// [`Error::EmptyBundle`] when the patterns match nothing, and the
    /// collection or compression error otherwise.
    pub fn generate(&self) -> Result<String> {
        if self.patterns.is_empty() {
            return Err(Error::NoPatterns);
        }
        let mut records = collect(&self.patterns)?;
        if records.is_empty() {
            return Err(Error::EmptyBundle);
        }
        sort_records(&mut records, self.order_by);
        log::info!(
            "bundling {} files into module {:?} ({}, {})",
            records.len(),
            self.module,
            self.codec.name(),
            self.encoding.name(),
        );

        let params = EmitParams {
            module: &self.module,
            patterns: &self.patterns,
            codec: self.codec,
            encoding: self.encoding,
        };
        match self.layout {
            Layout::Packed => {
                let image = pack(&records);
                let compressed = self.compress_verified(&image.bytes)?;
                if !image.bytes.is_empty() {
                    log::debug!(
                        "packed {} bytes, compressed to {} ({}%)",
                        image.bytes.len(),
                        compressed.len(),
                        compressed.len() * 100 / image.bytes.len(),
                    );
                }
                let literal = self.encode_verified(&compressed, "    ")?;
                Ok(render_packed(&params, &literal, image.bytes.len(), &image.ranges))
            }
            Layout::PerFile => {
                let mut entries = Vec::with_capacity(records.len());
                for record in &records {
                    let compressed = self.compress_verified(&record.bytes)?;
                    let literal = self.encode_verified(&compressed, "        ")?;
                    entries.push(PerFileEntry {
                        name: record.path.clone(),
                        literal,
                    });
                }
                Ok(render_per_file(&params, &entries))
            }
        }
    }

    /// Runs the pipeline and writes the generated source to the configured
    /// output path, creating parent directories as needed. An existing file
    /// is overwritten.
    ///
    /// # Errors
    ///
    /// Everything [`generate`](Self::generate) returns, plus
    /// [`Error::Write`] when the output cannot be written.
    pub fn write(self) -> Result<()> {
        let text = self.generate()?;
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| Error::Write {
                    path: self.output.clone(),
                    source,
                })?;
            }
        }
        fs::write(&self.output, &text).map_err(|source| Error::Write {
            path: self.output.clone(),
            source,
        })?;
        log::info!("wrote {} bytes to {}", text.len(), self.output.display());
        Ok(())
    }

    fn compress_verified(&self, data: &[u8]) -> Result<Vec<u8>> {
        let compressed = compress(data, self.codec, self.level)?;
        let restored = decompress(&compressed, self.codec)?;
        if restored != data {
            return Err(Error::Compression(format!(
                "{} round-trip produced different bytes",
                self.codec.name(),
            )));
        }
        Ok(compressed)
    }

    fn encode_verified(&self, data: &[u8], indent: &str) -> Result<String> {
        let literal = encode(data, self.encoding, self.line_width, indent);
        let restored = decode(&literal, self.encoding)?;
        if restored != data {
            return Err(Error::Compression(format!(
                "{} literal round-trip produced different bytes",
                self.encoding.name(),
            )));
        }
        Ok(literal)
    }
}
