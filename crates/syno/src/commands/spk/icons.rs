use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use syno_spk::{ReadOptions, SpkReader};
use tracing::{info, warn};

#[derive(Args)]
pub struct IconsArgs {
    /// An input SPK file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl IconsArgs {
    pub fn handle(&self) -> Result<()> {
        let mut spk = SpkReader::new(super::open(&self.file)?);
        let contents = spk.read(ReadOptions::builder().info(false).files(false).build())?;

        if contents.icons.is_empty() {
            warn!("no icons found in {}", self.file.display());
            return Ok(());
        }

        std::fs::create_dir_all(&self.directory)
            .into_diagnostic()
            .context(format!("creating {}", &self.directory.display()))?;

        for (name, data) in contents.icons.iter() {
            // Entry names come from the package, keep only the final component
            let Some(file_name) = Path::new(name).file_name() else {
                warn!("skipping icon with unusable name {name}");
                continue;
            };
            let p = self.directory.join(file_name);
            info!("writing {}", p.display());

            let mut out = if !self.overwrite {
                File::create_new(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            } else {
                File::create(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            };

            out.write_all(data).into_diagnostic()?;
        }

        Ok(())
    }
}
