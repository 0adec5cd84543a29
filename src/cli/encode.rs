use anyhow::{Context, Result};
use indicatif::MultiProgress;

use super::command::EncodeArgs;
use super::progress::create_progress_bar;
use crate::input::read_pdm;
use crate::report::{log_stream_info, write_summary};

pub fn cmd_encode(args: &EncodeArgs, multi: Option<&MultiProgress>) -> Result<()> {
    log::info!("Reading PDM stream: {}", args.input.display());
    let pdm = read_pdm(&args.input)?;

    let stream = dsf::DsfStream::new(&pdm, args.bit_rate)?;
    log_stream_info(&stream.layout());

    let pb = multi
        .map(|multi| create_progress_bar(multi, pdm.len() as u64))
        .transpose()?;

    let start = std::time::Instant::now();
    let result = dsf::encode_with_progress(&pdm, args.bit_rate, &args.output, |written| {
        if let Some(ref pb) = pb {
            pb.set_position(written);
        }
    });

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    let layout = result.with_context(|| format!("Failed to encode {}", args.input.display()))?;

    log::info!(
        "Wrote {} ({} bytes) in {:.3}s",
        args.output.display(),
        layout.total_file_size,
        start.elapsed().as_secs_f64()
    );

    if let Some(ref summary_path) = args.summary {
        write_summary(&layout, &args.input, &args.output, summary_path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn encode_file_with_summary() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("capture.pdm");
        let output = dir.path().join("capture.dsf");
        let summary = dir.path().join("capture.yaml");
        std::fs::write(&input, [0xFFu8])?;

        let args = EncodeArgs {
            input: input.clone(),
            output: output.clone(),
            bit_rate: 2_822_400,
            summary: Some(summary.clone()),
        };
        cmd_encode(&args, None)?;

        let written = std::fs::read(&output)?;
        assert_eq!(written.len(), 4188);
        assert_eq!(written[92], 0xFF);

        let yaml = std::fs::read_to_string(&summary)?;
        assert!(yaml.contains("total_file_size: 4188"));
        Ok(())
    }

    #[test]
    fn missing_input_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("never.dsf");
        let args = EncodeArgs {
            input: PathBuf::from("/nonexistent/capture.pdm"),
            output: output.clone(),
            bit_rate: 2_822_400,
            summary: None,
        };

        assert!(cmd_encode(&args, None).is_err());
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn unwritable_output_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("capture.pdm");
        std::fs::write(&input, [0x69u8; 16])?;

        let args = EncodeArgs {
            input,
            output: dir.path().join("missing").join("out.dsf"),
            bit_rate: 2_822_400,
            summary: None,
        };

        let err = cmd_encode(&args, None).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to create"));
        Ok(())
    }
}
