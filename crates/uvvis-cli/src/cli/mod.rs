mod commands;
mod helpers;

use clap::Parser;
use uvvis_core::domain::SpectrumError;

const PROGRAM_NAME: &str = "uvvis-spectrum";

pub fn run_from_env() -> i32 {
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match helpers::init_tracing().and_then(|()| run(args)) {
        Ok(code) => code,
        Err(error) => {
            let spectrum_error = error.as_spectrum_error();
            eprintln!("{}", spectrum_error.diagnostic_line());
            eprintln!("{}", spectrum_error.fatal_exit_line());
            spectrum_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once(PROGRAM_NAME.to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "uvvis-spectrum",
    version,
    about = "Synthesize UV-VIS absorption spectra from ORCA and Gaussian excited-state outputs"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Extract excited states from a directory of output files into input.dat
    Extract(commands::ExtractArgs),
    /// Broaden the excited states of input.dat into spectra
    Synthesize(commands::SynthesizeArgs),
    /// Extract and synthesize in one pass
    Run(commands::RunArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Extract(args) => commands::run_extract_command(args),
        CliCommand::Synthesize(args) => commands::run_synthesize_command(args),
        CliCommand::Run(args) => commands::run_pipeline_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(SpectrumError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_spectrum_error(&self) -> SpectrumError {
        match self {
            Self::Usage(message) => {
                SpectrumError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => SpectrumError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}
