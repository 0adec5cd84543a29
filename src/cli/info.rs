use anyhow::Result;

use super::command::InfoArgs;
use crate::input::read_pdm;
use crate::report::{layout_lines, stream_lines};

pub fn cmd_info(args: &InfoArgs) -> Result<()> {
    log::info!("Analyzing PDM stream: {}", args.input.display());

    let pdm = read_pdm(&args.input)?;
    let layout = dsf::DsfStream::new(&pdm, args.bit_rate)?.layout();

    println!("{:=^60}", " Stream ");
    for line in stream_lines(&layout) {
        println!("{line}");
    }

    println!("{:=^60}", " DSF layout ");
    for line in layout_lines(&layout) {
        println!("{line}");
    }

    Ok(())
}
