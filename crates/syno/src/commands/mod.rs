pub mod spk;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle SPK packages
    Spk {
        #[command(subcommand)]
        command: spk::SpkCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Spk { command } => command.handle(),
        }
    }
}
