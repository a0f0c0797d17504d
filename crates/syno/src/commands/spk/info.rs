use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use std::path::PathBuf;
use syno_spk::{read_package_info, InfoValue};

#[derive(Args)]
pub struct InfoArgs {
    /// An input SPK file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print the manifest as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let (info, icons) = read_package_info(super::open(&self.file)?)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&info).into_diagnostic()?);
            return Ok(());
        }

        for (key, value) in info.iter() {
            let value = match value {
                InfoValue::Text(_) => value
                    .if_supports_color(Stdout, |v| v.green())
                    .to_string(),
                InfoValue::Integer(_) => value
                    .if_supports_color(Stdout, |v| v.cyan())
                    .to_string(),
            };
            println!("{} = {}", key.if_supports_color(Stdout, |k| k.bold()), value);
        }

        for (name, data) in icons.iter() {
            println!(
                "{} ({} bytes)",
                name.if_supports_color(Stdout, |n| n.dimmed()),
                data.len()
            );
        }

        Ok(())
    }
}
