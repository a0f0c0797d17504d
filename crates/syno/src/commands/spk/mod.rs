use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, io::BufReader, path::Path};

pub mod files;
pub mod icons;
pub mod info;

#[derive(clap::Subcommand)]
pub enum SpkCommands {
    /// Print the manifest of an SPK package
    Info(info::InfoArgs),
    /// List the files installed by an SPK package
    Files(files::FilesArgs),
    /// Extract the icons of an SPK package into a directory
    Icons(icons::IconsArgs),
}

impl SpkCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            SpkCommands::Info(info) => info.handle(),
            SpkCommands::Files(files) => files.handle(),
            SpkCommands::Icons(icons) => icons.handle(),
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))
}
