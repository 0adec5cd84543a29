//! Size bookkeeping for one encoded stream.

use serde::Serialize;

use crate::chunk::{BLOCK_SIZE, HEADERS_SIZE};

/// Rounds a payload length up to a whole number of blocks.
///
/// An empty payload still occupies one (zero-filled) block, so every file
/// carries a non-empty `data` chunk.
pub fn padded_data_size(len: u64) -> u64 {
    let block = BLOCK_SIZE as u64;
    len.max(1).div_ceil(block) * block
}

/// Derived sizes of a DSF file wrapping `data_size` bytes of PDM data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DsfLayout {
    pub data_size: u64,
    pub padded_data_size: u64,
    pub padding_size: u64,
    pub sample_count: u64,
    pub bit_rate: u32,
    pub total_file_size: u64,
    pub duration_secs: f64,
}

impl DsfLayout {
    pub fn new(data_size: u64, bit_rate: u32) -> Self {
        let padded_data_size = padded_data_size(data_size);
        let sample_count = data_size * 8;

        Self {
            data_size,
            padded_data_size,
            padding_size: padded_data_size - data_size,
            sample_count,
            bit_rate,
            total_file_size: HEADERS_SIZE + padded_data_size,
            duration_secs: if bit_rate == 0 {
                0.0
            } else {
                sample_count as f64 / bit_rate as f64
            },
        }
    }

    /// Size of the `data` chunk including its header.
    pub fn data_chunk_size(&self) -> u64 {
        self.padded_data_size + crate::chunk::DATA_CHUNK_HEADER_SIZE
    }
}

#[test]
fn padding_rounds_up_to_block() {
    assert_eq!(padded_data_size(1), 4096);
    assert_eq!(padded_data_size(4095), 4096);
    assert_eq!(padded_data_size(4096), 4096);
    assert_eq!(padded_data_size(4097), 8192);
    assert_eq!(padded_data_size(3 * 4096 + 17), 4 * 4096);
}

#[test]
fn padding_invariants_hold() {
    for len in (1..20_000u64).step_by(97) {
        let padded = padded_data_size(len);
        assert!(padded >= len);
        assert_eq!(padded % 4096, 0);
        assert!(padded - len < 4096, "len {len} padded to {padded}");
    }
}

#[test]
fn empty_payload_is_one_block() {
    let layout = DsfLayout::new(0, 2_822_400);
    assert_eq!(layout.padded_data_size, 4096);
    assert_eq!(layout.padding_size, 4096);
    assert_eq!(layout.sample_count, 0);
    assert_eq!(layout.total_file_size, 4188);
    assert_eq!(layout.duration_secs, 0.0);
}

#[test]
fn layout_for_single_byte() {
    let layout = DsfLayout::new(1, 2_822_400);
    assert_eq!(layout.padded_data_size, 4096);
    assert_eq!(layout.padding_size, 4095);
    assert_eq!(layout.sample_count, 8);
    assert_eq!(layout.total_file_size, 4188);
    assert_eq!(layout.data_chunk_size(), 4108);
}

#[test]
fn layout_duration() {
    // one second of DSD64
    let layout = DsfLayout::new(352_800, 2_822_400);
    assert!((layout.duration_secs - 1.0).abs() < f64::EPSILON);
    assert_eq!(layout.padded_data_size, 86 * 4096 + 4096);
}
