use clap::Args;
use miette::{miette, Result};
use std::path::PathBuf;
use syno_spk::{ReadOptions, SpkReader};
use tracing::info;

#[derive(Args)]
pub struct FilesArgs {
    /// An input SPK file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl FilesArgs {
    pub fn handle(&self) -> Result<()> {
        let mut spk = SpkReader::new(super::open(&self.file)?);
        let contents = spk.read(
            ReadOptions::builder()
                .info(false)
                .icons(false)
                .build(),
        )?;

        let files = contents
            .files
            .ok_or_else(|| miette!("no file list read from {}", self.file.display()))?;
        info!("{} files in {}", files.len(), self.file.display());

        for name in files {
            println!("{name}");
        }

        Ok(())
    }
}
