use clap::{Parser, Subcommand};

mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play batch games with a fixed weight vector
    Play(#[clap(flatten)] play::PlayArg),
    /// Train a weight vector with the population optimizer
    Train(#[clap(flatten)] train::TrainArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Play(arg) => play::run(&arg),
        Mode::Train(arg) => train::run(&arg),
    }
}
