use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Reads a whole PDM bitstream from a file, or from stdin when the path is "-"
pub struct InputReader {
    reader: Box<dyn Read>,
    path: PathBuf,
    is_pipe: bool,
}

impl InputReader {
    pub fn new<P: AsRef<Path>>(input_path: P) -> Result<Self> {
        let path = input_path.as_ref().to_path_buf();
        let is_pipe = path.as_os_str() == "-";

        let reader: Box<dyn Read> = if is_pipe {
            Box::new(io::stdin().lock())
        } else {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            Box::new(BufReader::new(file))
        };

        Ok(Self {
            reader,
            path,
            is_pipe,
        })
    }

    /// Check if this is pipe input
    pub fn is_pipe(&self) -> bool {
        self.is_pipe
    }

    /// Name of the input for log messages
    pub fn name(&self) -> String {
        if self.is_pipe {
            "<stdin>".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    /// Read the complete bitstream into memory
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.reader
            .read_to_end(&mut data)
            .with_context(|| format!("Failed to read '{}'", self.name()))?;
        Ok(data)
    }
}

/// Read a PDM bitstream, logging where it came from and how large it is.
pub fn read_pdm<P: AsRef<Path>>(input_path: P) -> Result<Vec<u8>> {
    let mut reader = InputReader::new(input_path)?;
    let data = reader.read_all()?;

    log::debug!(
        "Read {} bytes from {}{}",
        data.len(),
        reader.name(),
        if reader.is_pipe() { " (pipe)" } else { "" }
    );

    if data.is_empty() {
        log::warn!(
            "{} is empty, output will contain a single silent block",
            reader.name()
        );
    }

    Ok(data)
}
