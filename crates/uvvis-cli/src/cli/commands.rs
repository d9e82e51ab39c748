use super::CliError;
use super::helpers::finish_report;
use std::path::PathBuf;
use tracing::info;
use uvvis_core::domain::{SourceFormat, SpectrumConfig, SpectrumOptions};
use uvvis_core::modules::extract::{
    DEFAULT_ENTER_MARKER, DiscoveryOrder, ExtractionRequest, GaussianMarkers,
};
use uvvis_core::modules::pipeline::{RunReport, run_extraction, run_synthesis};

#[derive(clap::Args)]
pub(super) struct SourceFlags {
    /// Directory holding the program output files
    #[arg(long)]
    source_dir: PathBuf,

    /// Program that produced the output files (gaussian or orca)
    #[arg(long)]
    format: SourceFormat,

    /// File name glob selecting candidates [default: *.log for gaussian, *.out for orca]
    #[arg(long)]
    pattern: Option<String>,

    /// Process candidates in file name order instead of directory order
    #[arg(long)]
    sorted: bool,

    /// Line opening the Gaussian excited-state section
    #[arg(long, default_value = DEFAULT_ENTER_MARKER)]
    enter_marker: String,
}

impl SourceFlags {
    fn into_request(self) -> ExtractionRequest {
        let mut request = ExtractionRequest::new(self.source_dir, self.format);
        request.pattern = self.pattern;
        request.order = if self.sorted {
            DiscoveryOrder::Lexical
        } else {
            DiscoveryOrder::Filesystem
        };
        request.markers = GaussianMarkers {
            enter: self.enter_marker,
            ..GaussianMarkers::default()
        };
        request
    }
}

// Raw text: invalid fit, range or interval values fall back to the defaults
// with a warning instead of failing the parse.
#[derive(clap::Args)]
pub(super) struct SpectrumFlags {
    /// Broadening lineshape: gaussian or lorentzian [default: gaussian]
    #[arg(long)]
    fit: Option<String>,

    /// Wavenumber range as LOW-HIGH [default: 100-800]
    #[arg(long)]
    range: Option<String>,

    /// Wavenumber step [default: 10.0]
    #[arg(long)]
    interval: Option<String>,

    /// Averaging mode across structures [default: arithmetic]
    #[arg(long)]
    average: Option<String>,
}

impl SpectrumFlags {
    fn into_options(self) -> SpectrumOptions {
        SpectrumOptions {
            fit: self.fit,
            range: self.range,
            interval: self.interval,
            average: self.average,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct ExtractArgs {
    #[command(flatten)]
    source: SourceFlags,

    /// Directory receiving input.dat
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON run report path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct SynthesizeArgs {
    #[command(flatten)]
    spectrum: SpectrumFlags,

    /// Directory holding input.dat and receiving the spectra
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON run report path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(clap::Args)]
pub(super) struct RunArgs {
    #[command(flatten)]
    source: SourceFlags,

    #[command(flatten)]
    spectrum: SpectrumFlags,

    /// Directory receiving input.dat and the spectra
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON run report path
    #[arg(long)]
    report: Option<PathBuf>,
}

pub(super) fn run_extract_command(args: ExtractArgs) -> Result<i32, CliError> {
    let request = args.source.into_request();
    let extraction = run_extraction(&request, &args.output_dir).map_err(CliError::Compute)?;

    let mut report = RunReport::new(Vec::new());
    report.extraction = Some(extraction);
    finish_report(&report, args.report.as_deref())?;
    Ok(0)
}

pub(super) fn run_synthesize_command(args: SynthesizeArgs) -> Result<i32, CliError> {
    let resolved =
        SpectrumConfig::resolve(&args.spectrum.into_options()).map_err(CliError::Compute)?;
    let synthesis =
        run_synthesis(&args.output_dir, &resolved.config).map_err(CliError::Compute)?;

    let mut report = RunReport::new(resolved.warnings);
    report.synthesis = Some(synthesis);
    finish_report(&report, args.report.as_deref())?;
    Ok(0)
}

/// Configuration is resolved before extraction so that an unsupported
/// averaging mode fails without touching the output directory.
pub(super) fn run_pipeline_command(args: RunArgs) -> Result<i32, CliError> {
    let resolved =
        SpectrumConfig::resolve(&args.spectrum.into_options()).map_err(CliError::Compute)?;
    let request = args.source.into_request();

    let extraction = run_extraction(&request, &args.output_dir).map_err(CliError::Compute)?;
    info!(
        "extracted {} structures, synthesizing {} spectra",
        extraction.structure_count, resolved.config.fit
    );
    let synthesis =
        run_synthesis(&args.output_dir, &resolved.config).map_err(CliError::Compute)?;

    let mut report = RunReport::new(resolved.warnings);
    report.extraction = Some(extraction);
    report.synthesis = Some(synthesis);
    finish_report(&report, args.report.as_deref())?;
    Ok(0)
}
