//! `graphmock combine <inputs...> -o <file>` – merge mock files.

use anyhow::{bail, Result};
use graphmock_core::mocks::{combine_mock_files, write_mock_file};
use std::path::{Path, PathBuf};

pub fn run_combine(inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.len() < 2 {
        bail!("combine needs at least two input files");
    }

    let paths: Vec<&Path> = inputs.iter().map(PathBuf::as_path).collect();
    let combined = combine_mock_files(&paths)?;
    write_mock_file(output, &combined)?;

    println!(
        "Combined {} files into {} ({} mocks)",
        inputs.len(),
        output.display(),
        combined.responses.len()
    );
    Ok(())
}
