use std::io::{self, BufWriter, Write};

use crate::chunk::{BLOCK_SIZE, DataChunkHeader, DsdChunk, DsfChunk, FmtChunk, HEADERS_SIZE};
use crate::layout::DsfLayout;

const ZERO_BLOCK: [u8; BLOCK_SIZE as usize] = [0; BLOCK_SIZE as usize];

/// Mono raw DSD writer.
///
/// The layout is fixed up front, so the headers are written once and never
/// revisited; the output does not need to be seekable.
pub struct DsfWriter<W: Write> {
    writer: BufWriter<W>,
    layout: DsfLayout,
    header_written: bool,
    data_written: u64,
    finished: bool,
}

impl<W: Write> DsfWriter<W> {
    pub fn new(writer: W, layout: DsfLayout) -> Self {
        Self {
            writer: BufWriter::new(writer),
            layout,
            header_written: false,
            data_written: 0,
            finished: false,
        }
    }

    fn check_not_finished(&self) -> io::Result<()> {
        if self.finished {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Writer already finished",
            ));
        }
        Ok(())
    }

    fn ensure_header_written(&self) -> io::Result<()> {
        if !self.header_written {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Must call write_header() before this operation",
            ));
        }
        Ok(())
    }

    /// Write the `DSD `, `fmt ` and `data` chunk headers.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.check_not_finished()?;
        if self.header_written {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Header already written",
            ));
        }

        let dsd = DsdChunk::new(self.layout.total_file_size);
        let fmt = FmtChunk::mono(self.layout.bit_rate, self.layout.sample_count);
        let data = DataChunkHeader {
            padded_data_size: self.layout.padded_data_size,
        };

        log::trace!("{dsd:?}");
        log::trace!("{fmt:?}");
        log::trace!("{data:?}");

        dsd.write_all(&mut self.writer)?;
        fmt.write_all(&mut self.writer)?;
        data.write_all(&mut self.writer)?;

        self.header_written = true;
        Ok(())
    }

    /// Append PDM bytes to the `data` chunk.
    pub fn write_data(&mut self, data: &[u8]) -> io::Result<()> {
        self.check_not_finished()?;
        self.ensure_header_written()?;

        if self.data_written + data.len() as u64 > self.layout.data_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Payload exceeds declared size of {} bytes",
                    self.layout.data_size
                ),
            ));
        }

        self.writer.write_all(data)?;
        self.data_written += data.len() as u64;
        Ok(())
    }

    /// Append PDM bytes one block at a time, reporting the running payload
    /// byte count after each block.
    pub fn write_data_with_progress<F>(&mut self, data: &[u8], mut progress: F) -> io::Result<()>
    where
        F: FnMut(u64),
    {
        for block in data.chunks(BLOCK_SIZE as usize) {
            self.write_data(block)?;
            progress(self.data_written);
        }
        Ok(())
    }

    /// Pad the payload to its block boundary and flush.
    ///
    /// Returns the number of bytes written in total.
    pub fn finish(&mut self) -> io::Result<u64> {
        self.check_not_finished()?;
        self.ensure_header_written()?;

        if self.data_written != self.layout.data_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Payload is {} bytes, header declares {}",
                    self.data_written, self.layout.data_size
                ),
            ));
        }

        let mut padding = self.layout.padding_size;
        while padding > 0 {
            let len = padding.min(BLOCK_SIZE as u64) as usize;
            self.writer.write_all(&ZERO_BLOCK[..len])?;
            padding -= len as u64;
        }

        self.writer.flush()?;
        self.finished = true;

        let stats = self.stats();
        log::debug!(
            "Wrote {} payload bytes + {} padding bytes @ {} bits/second",
            stats.data_written,
            self.layout.padding_size,
            stats.bit_rate
        );

        Ok(HEADERS_SIZE + self.layout.padded_data_size)
    }

    /// Get the underlying writer
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }

    pub fn stats(&self) -> DsfStats {
        DsfStats {
            data_written: self.data_written,
            bit_rate: self.layout.bit_rate,
            finished: self.finished,
        }
    }
}

/// Statistics about DSF file writing
#[derive(Debug, Clone)]
pub struct DsfStats {
    pub data_written: u64,
    pub bit_rate: u32,
    pub finished: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Accepts `limit` bytes, then fails every write.
    struct LimitedWriter {
        written: usize,
        limit: usize,
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written >= self.limit {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "device full"));
            }
            let n = buf.len().min(self.limit - self.written);
            self.written += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts every write, fails on flush.
    struct FlushFailWriter;

    impl Write for FlushFailWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("flush failed"))
        }
    }

    fn writer_for(len: u64) -> DsfWriter<Cursor<Vec<u8>>> {
        DsfWriter::new(Cursor::new(Vec::new()), DsfLayout::new(len, 2_822_400))
    }

    #[test]
    fn test_dsf_writer_basic() -> io::Result<()> {
        let mut writer = writer_for(3);
        writer.write_header()?;
        writer.write_data(&[0x69, 0x96, 0xFF])?;
        let total = writer.finish()?;

        let buffer = writer.into_inner()?.into_inner();
        assert_eq!(total, 4188);
        assert_eq!(buffer.len(), 4188);
        assert_eq!(&buffer[0..4], b"DSD ");
        assert_eq!(&buffer[28..32], b"fmt ");
        assert_eq!(&buffer[80..84], b"data");
        assert_eq!(&buffer[92..95], &[0x69, 0x96, 0xFF]);
        assert!(buffer[95..].iter().all(|&b| b == 0));

        Ok(())
    }

    #[test]
    fn test_stats_track_payload() -> io::Result<()> {
        let mut writer = writer_for(5);
        writer.write_header()?;
        writer.write_data(&[1, 2, 3])?;

        let stats = writer.stats();
        assert_eq!(stats.data_written, 3);
        assert_eq!(stats.bit_rate, 2_822_400);
        assert!(!stats.finished);
        Ok(())
    }

    #[test]
    fn test_write_error_propagates() -> io::Result<()> {
        // fails inside the payload once the 8 KiB buffer spills
        let layout = DsfLayout::new(100_000, 2_822_400);
        let mut writer = DsfWriter::new(
            LimitedWriter {
                written: 0,
                limit: 10_000,
            },
            layout,
        );
        writer.write_header()?;

        let err = writer.write_data(&vec![0xAA; 100_000]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::StorageFull);
        assert_eq!(writer.stats().data_written, 0);
        Ok(())
    }

    #[test]
    fn test_flush_error_propagates() -> io::Result<()> {
        let mut writer = DsfWriter::new(FlushFailWriter, DsfLayout::new(4, 2_822_400));
        writer.write_header()?;
        writer.write_data(&[1, 2, 3, 4])?;

        let err = writer.finish().unwrap_err();
        assert_eq!(err.to_string(), "flush failed");
        assert!(!writer.stats().finished);
        Ok(())
    }

    #[test]
    fn test_data_before_header_rejected() {
        let mut writer = writer_for(1);
        let err = writer.write_data(&[0]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_header_written_once() -> io::Result<()> {
        let mut writer = writer_for(1);
        writer.write_header()?;
        assert!(writer.write_header().is_err());
        Ok(())
    }

    #[test]
    fn test_payload_overflow_rejected() -> io::Result<()> {
        let mut writer = writer_for(2);
        writer.write_header()?;
        writer.write_data(&[1, 2])?;
        assert!(writer.write_data(&[3]).is_err());
        assert_eq!(writer.stats().data_written, 2);
        Ok(())
    }

    #[test]
    fn test_short_payload_rejected_on_finish() -> io::Result<()> {
        let mut writer = writer_for(8);
        writer.write_header()?;
        writer.write_data(&[0; 4])?;
        assert!(writer.finish().is_err());
        assert!(!writer.stats().finished);
        Ok(())
    }

    #[test]
    fn test_finish_only_once() -> io::Result<()> {
        let mut writer = writer_for(0);
        writer.write_header()?;
        writer.finish()?;
        assert!(writer.finish().is_err());
        assert!(writer.write_data(&[]).is_err());
        Ok(())
    }

    #[test]
    fn test_progress_reports_every_block() -> io::Result<()> {
        let data = vec![0xAAu8; 2 * 4096 + 10];
        let mut writer = writer_for(data.len() as u64);
        writer.write_header()?;

        let mut reports = Vec::new();
        writer.write_data_with_progress(&data, |n| reports.push(n))?;
        writer.finish()?;

        assert_eq!(reports, vec![4096, 8192, 8202]);
        let buffer = writer.into_inner()?.into_inner();
        assert_eq!(buffer.len(), 92 + 3 * 4096);
        Ok(())
    }
}
