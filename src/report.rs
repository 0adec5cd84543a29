use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dsf::DsfLayout;
use serde::Serialize;

/// Formats a duration as `HH:MM:SS.mmm`.
pub fn time_str(sec: f64) -> String {
    let total_ms = (sec * 1000f64).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let milliseconds = total_ms % 1000;

    format!(
        "{hours:0width$}:{minutes:02}:{seconds:02}.{milliseconds:03}",
        width = if hours >= 100 { 0 } else { 2 }
    )
}

/// Human-readable description of a stream and its padding.
pub fn stream_lines(layout: &DsfLayout) -> Vec<String> {
    vec![
        format!(
            "PDM stream: {} bits ({} bytes) @ {} bits/second",
            layout.sample_count, layout.data_size, layout.bit_rate
        ),
        format!(
            "Duration: {} ({:.2} seconds)",
            time_str(layout.duration_secs),
            layout.duration_secs
        ),
        format!("Unpadded PDM data: {} bytes", layout.data_size),
        format!(
            "Padded PDM data: {} bytes ({} padding)",
            layout.padded_data_size, layout.padding_size
        ),
    ]
}

/// Offsets and sizes of each chunk in the output file.
pub fn layout_lines(layout: &DsfLayout) -> Vec<String> {
    let fmt_offset = dsf::chunk::DSD_CHUNK_SIZE;
    let data_offset = fmt_offset + dsf::chunk::FMT_CHUNK_SIZE;

    vec![
        format!("DSD  chunk @ {:>6}: {} bytes", 0, dsf::chunk::DSD_CHUNK_SIZE),
        format!(
            "fmt  chunk @ {fmt_offset:>6}: {} bytes",
            dsf::chunk::FMT_CHUNK_SIZE
        ),
        format!(
            "data chunk @ {data_offset:>6}: {} bytes",
            layout.data_chunk_size()
        ),
        format!("Total file size: {} bytes", layout.total_file_size),
    ]
}

pub fn log_stream_info(layout: &DsfLayout) {
    for line in stream_lines(layout) {
        log::info!("{line}");
    }
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    input: String,
    output: String,
    #[serde(flatten)]
    layout: &'a DsfLayout,
}

pub fn summary_yaml(layout: &DsfLayout, input: &Path, output: &Path) -> Result<String> {
    let summary = Summary {
        input: input.display().to_string(),
        output: output.display().to_string(),
        layout,
    };
    Ok(serde_yaml_ng::to_string(&summary)?)
}

pub fn write_summary(layout: &DsfLayout, input: &Path, output: &Path, path: &Path) -> Result<()> {
    let yaml = summary_yaml(layout, input, output)?;
    fs::write(path, yaml).with_context(|| format!("Failed to write '{}'", path.display()))?;
    log::info!("Summary written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_formatting() {
        assert_eq!(time_str(0.0), "00:00:00.000");
        assert_eq!(time_str(1.5), "00:00:01.500");
        assert_eq!(time_str(3723.25), "01:02:03.250");
        assert_eq!(time_str(360_000.0), "100:00:00.000");
    }

    #[test]
    fn stream_lines_for_one_second() {
        let layout = DsfLayout::new(352_800, 2_822_400);
        let lines = stream_lines(&layout);
        assert_eq!(
            lines[0],
            "PDM stream: 2822400 bits (352800 bytes) @ 2822400 bits/second"
        );
        assert_eq!(lines[1], "Duration: 00:00:01.000 (1.00 seconds)");
        assert_eq!(lines[3], "Padded PDM data: 356352 bytes (3552 padding)");
    }

    #[test]
    fn layout_lines_offsets() {
        let layout = DsfLayout::new(1, 2_822_400);
        let lines = layout_lines(&layout);
        assert!(lines[1].contains("@     28"));
        assert!(lines[2].contains("@     80: 4108 bytes"));
        assert_eq!(lines[3], "Total file size: 4188 bytes");
    }

    #[test]
    fn summary_fields() -> Result<()> {
        let layout = DsfLayout::new(4097, 2_822_400);
        let yaml = summary_yaml(&layout, Path::new("in.pdm"), Path::new("out.dsf"))?;

        assert!(yaml.contains("input: in.pdm"));
        assert!(yaml.contains("output: out.dsf"));
        assert!(yaml.contains("data_size: 4097"));
        assert!(yaml.contains("padded_data_size: 8192"));
        assert!(yaml.contains("padding_size: 4095"));
        assert!(yaml.contains("sample_count: 32776"));
        assert!(yaml.contains("total_file_size: 8284"));
        Ok(())
    }
}
