//! DSF chunk records.
//!
//! A DSF file starts with three fixed-layout chunks, each introduced by a
//! four-byte id and a 64-bit little-endian size that counts the whole chunk
//! (id and size field included):
//!
//! | Chunk  | Size | Content                                          |
//! |--------|------|--------------------------------------------------|
//! | `DSD ` | 28   | total file size, metadata pointer                |
//! | `fmt ` | 52   | format description of the bitstream              |
//! | `data` | 12+n | header only here; the payload follows on the wire |

use std::io::{self, Write};

use crate::{impl_u32_enum, join_bytes_le};
use dsf_macros::{ToBytes, dsf_chunk_type};

/// Size of the id + size prefix shared by every chunk.
pub const CHUNK_HEADER_SIZE: u64 = 12;

pub const DSD_CHUNK_SIZE: u64 = 28;
pub const FMT_CHUNK_SIZE: u64 = 52;
pub const DATA_CHUNK_HEADER_SIZE: u64 = CHUNK_HEADER_SIZE;

/// Bytes preceding the payload in every file this crate writes.
pub const HEADERS_SIZE: u64 = DSD_CHUNK_SIZE + FMT_CHUNK_SIZE + DATA_CHUNK_HEADER_SIZE;

pub const FORMAT_VERSION: u32 = 1;

/// Payload alignment, per channel.
pub const BLOCK_SIZE: u32 = 4096;

pub trait DsfChunk {
    fn chunk_id(&self) -> &[u8; 4];

    /// Fields following the size field.
    fn chunk_data(&self) -> Vec<u8>;

    /// Value of the size field.
    fn chunk_size(&self) -> u64 {
        CHUNK_HEADER_SIZE + self.chunk_data().len() as u64
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = join_bytes_le!(*self.chunk_id(), self.chunk_size());
        bytes.extend_from_slice(&self.chunk_data());
        bytes
    }

    fn write_all<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

/// Leading `DSD ` chunk.
#[derive(Debug, Clone, PartialEq, Eq, ToBytes)]
#[dsf_chunk_type(b"DSD ")]
pub struct DsdChunk {
    pub total_file_size: u64,
    /// Offset of an ID3v2 metadata chunk, 0 when absent.
    pub metadata_pointer: u64,
}

impl DsdChunk {
    pub fn new(total_file_size: u64) -> Self {
        Self {
            total_file_size,
            metadata_pointer: 0,
        }
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatId {
    DsdRaw = 0,
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelType {
    Mono = 1,
}

impl_u32_enum!(FormatId);
impl_u32_enum!(ChannelType);

/// `fmt ` chunk describing a single-channel raw DSD stream.
#[derive(Debug, Clone, PartialEq, Eq, ToBytes)]
#[dsf_chunk_type(b"fmt ")]
pub struct FmtChunk {
    pub format_version: u32,
    pub format_id: FormatId,
    pub channel_type: ChannelType,
    pub channel_num: u32,
    pub sampling_frequency: u32,
    pub bits_per_sample: u32,
    pub sample_count: u64,
    pub block_size_per_channel: u32,
    pub reserved: u32,
}

impl FmtChunk {
    pub fn mono(sampling_frequency: u32, sample_count: u64) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            format_id: FormatId::DsdRaw,
            channel_type: ChannelType::Mono,
            channel_num: 1,
            sampling_frequency,
            bits_per_sample: 1,
            sample_count,
            block_size_per_channel: BLOCK_SIZE,
            reserved: 0,
        }
    }
}

/// Header of the `data` chunk. Its size field covers the padded payload
/// that follows it, so only the header is serialized here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunkHeader {
    pub padded_data_size: u64,
}

impl DsfChunk for DataChunkHeader {
    fn chunk_id(&self) -> &[u8; 4] {
        b"data"
    }

    fn chunk_data(&self) -> Vec<u8> {
        Vec::new()
    }

    fn chunk_size(&self) -> u64 {
        DATA_CHUNK_HEADER_SIZE + self.padded_data_size
    }
}
