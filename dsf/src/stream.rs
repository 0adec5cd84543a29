use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::chunk::{DataChunkHeader, DsdChunk, FmtChunk};
use crate::layout::DsfLayout;
use crate::utils::errors::DsfError;
use crate::writer::DsfWriter;

/// A PDM bitstream paired with its bit rate, ready to be wrapped in DSF.
#[derive(Debug, Clone, Copy)]
pub struct DsfStream<'a> {
    pdm: &'a [u8],
    bit_rate: u32,
}

impl<'a> DsfStream<'a> {
    pub fn new(pdm: &'a [u8], bit_rate: u32) -> Result<Self, DsfError> {
        if bit_rate == 0 {
            return Err(DsfError::InvalidBitRate(bit_rate));
        }
        Ok(Self { pdm, bit_rate })
    }

    pub fn layout(&self) -> DsfLayout {
        DsfLayout::new(self.pdm.len() as u64, self.bit_rate)
    }

    pub fn dsd_chunk(&self) -> DsdChunk {
        DsdChunk::new(self.layout().total_file_size)
    }

    pub fn fmt_chunk(&self) -> FmtChunk {
        let layout = self.layout();
        FmtChunk::mono(layout.bit_rate, layout.sample_count)
    }

    pub fn data_chunk(&self) -> DataChunkHeader {
        DataChunkHeader {
            padded_data_size: self.layout().padded_data_size,
        }
    }

    /// Serialize the complete file into `writer`, returning the byte count.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<u64> {
        self.write_to_with_progress(writer, |_| {})
    }

    /// Like [`DsfStream::write_to`], calling `progress` with the running
    /// payload byte count after every block.
    pub fn write_to_with_progress<W, F>(&self, writer: W, progress: F) -> io::Result<u64>
    where
        W: Write,
        F: FnMut(u64),
    {
        let mut dsf_writer = DsfWriter::new(writer, self.layout());
        dsf_writer.write_header()?;
        dsf_writer.write_data_with_progress(self.pdm, progress)?;
        dsf_writer.finish()
    }
}

/// Write `pdm` as a mono raw DSD file at `output_path`.
///
/// On failure the partially written file is left in place.
pub fn encode<P: AsRef<Path>>(
    pdm: &[u8],
    bit_rate: u32,
    output_path: P,
) -> Result<DsfLayout, DsfError> {
    encode_with_progress(pdm, bit_rate, output_path, |_| {})
}

/// [`encode`] with a payload progress callback.
pub fn encode_with_progress<P, F>(
    pdm: &[u8],
    bit_rate: u32,
    output_path: P,
    progress: F,
) -> Result<DsfLayout, DsfError>
where
    P: AsRef<Path>,
    F: FnMut(u64),
{
    let path = output_path.as_ref();
    let stream = DsfStream::new(pdm, bit_rate)?;
    let layout = stream.layout();

    log::debug!(
        "Writing {} ({} bytes, {} padding)",
        path.display(),
        layout.total_file_size,
        layout.padding_size
    );

    let file = File::create(path).map_err(|source| DsfError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    stream
        .write_to_with_progress(file, progress)
        .map_err(|source| DsfError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(layout)
}
