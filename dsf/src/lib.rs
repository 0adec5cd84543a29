//! Writer for DSD Stream Files (DSF).
//!
//! Wraps a raw 1-bit PDM bitstream in a mono, raw-DSD DSF container:
//!
//! ```text
//! DSD  chunk   28 bytes   total file size, metadata pointer (always 0)
//! fmt  chunk   52 bytes   format version, format id, channels, bit rate, sample count, block size
//! data header  12 bytes   chunk size = padded payload + 12
//! payload      n bytes    PDM bytes, zero padded to a multiple of 4096
//! ```
//!
//! All integers are little-endian.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! let pdm = std::fs::read("capture.pdm")?;
//! let layout = dsf::encode(&pdm, 2_822_400, "out.dsf")?;
//! println!("{} bytes written", layout.total_file_size);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`DsfStream::write_to`] serializes into any [`std::io::Write`] when the
//! output is not a file.

pub mod byteorder;

/// Chunk records and format constants.
pub mod chunk;

/// Padding and size calculations.
pub mod layout;

pub mod stream;

/// Error types.
pub mod utils;

pub mod writer;

pub use chunk::{BLOCK_SIZE, HEADERS_SIZE};
pub use layout::{DsfLayout, padded_data_size};
pub use stream::{DsfStream, encode, encode_with_progress};
pub use utils::errors::DsfError;
pub use writer::{DsfStats, DsfWriter};
