//! Command implementations and argument parsing for the `dbscan` CLI.

use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dbscan_core::{
    Algorithm, ClusterResponse, DEFAULT_LEAF_SIZE, DEFAULT_WORKERS,
    DbscanBuilder, DbscanError, cluster,
};
use dbscan_providers_dense::{DenseMatrixProvider, DenseMatrixProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::codec::{CodecError, decode_request, encode_response};

/// Path value selecting standard input.
const STDIN_PATH: &str = "-";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "dbscan", about = "Cluster points with DBSCAN.")]
pub struct Cli {
    /// Output rendering.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a point set.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Input source.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Inputs accepted by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Read a JSON request document carrying parameters and points.
    Json(JsonArgs),
    /// Read vectors from a Parquet `FixedSizeList<Float32 | Float64, D>` column.
    Parquet(ParquetArgs),
}

/// JSON request arguments.
#[derive(Debug, Args, Clone)]
pub struct JsonArgs {
    /// Path to the request document, or `-` for stdin.
    pub path: PathBuf,
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file.
    pub path: PathBuf,

    /// Column holding the vectors.
    #[arg(long)]
    pub column: String,

    /// Neighbour finder: `brute` or `kd_tree`.
    #[arg(long, default_value_t = Algorithm::Brute)]
    pub algorithm: Algorithm,

    /// Inclusive neighbourhood radius.
    #[arg(long)]
    pub epsilon: f64,

    /// Density threshold, counting the point itself.
    #[arg(long = "min-points")]
    pub min_points: usize,

    /// k-d tree leaf size.
    #[arg(long = "leaf-size", default_value_t = DEFAULT_LEAF_SIZE)]
    pub leaf_size: usize,

    /// Precompute worker count.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
}

/// How [`render_summary`] prints a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The JSON response document.
    Json,
    /// Cluster and noise counts followed by one `index<TAB>label` line per point.
    Human,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The request document could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Dense vector ingestion failed.
    #[error(transparent)]
    Dense(#[from] DenseMatrixProviderError),
    /// Clustering rejected the configuration or failed to run.
    #[error(transparent)]
    Core(#[from] DbscanError),
}

impl CliError {
    /// Returns the core error behind this failure, if any.
    #[must_use]
    pub fn core_error(&self) -> Option<&DbscanError> {
        match self {
            Self::Core(error) | Self::Codec(CodecError::Request(error)) => Some(error),
            Self::Io { .. } | Self::Codec(_) | Self::Dense(_) => None,
        }
    }

    /// Returns the stable code of a configuration failure, if any.
    ///
    /// Covers core errors and every request document failure.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(error) => Some(error.code().as_str()),
            Self::Codec(error) => Some(error.code()),
            Self::Io { .. } | Self::Dense(_) => None,
        }
    }
}

/// Outcome of a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Name of the input, derived from its path.
    pub data_source: String,
    /// Labels and cluster count.
    pub response: ClusterResponse,
}

impl ExecutionSummary {
    /// Number of points labelled as noise.
    #[must_use]
    pub fn noise(&self) -> usize {
        self.response.labels.iter().filter(|&&label| label < 0).count()
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when input loading, decoding, or clustering fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use dbscan_cli::cli::{Cli, Command, JsonArgs, OutputFormat, RunCommand, RunSource, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"{"algorithm":"brute","epsilon":1.0,"min_points":2,"points":[[0.0],[1.0],[5.0]]}"#,
/// )?;
/// let cli = Cli {
///     format: OutputFormat::Json,
///     command: Command::Run(RunCommand {
///         source: RunSource::Json(JsonArgs {
///             path: file.path().to_path_buf(),
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.response.labels, vec![1, 1, -1]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", "run");
            run_command(run)
        }
    }
}

#[instrument(name = "cli.execute", err, skip(command), fields(source = field::Empty))]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let summary = match command.source {
        RunSource::Json(args) => {
            span.record("source", "json");
            run_json(&args.path)?
        }
        RunSource::Parquet(args) => {
            span.record("source", "parquet");
            run_parquet(args)?
        }
    };

    info!(
        data_source = summary.data_source.as_str(),
        clusters = summary.response.clusters,
        noise = summary.noise(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.run_json", err, fields(path = %path.display()))]
pub(super) fn run_json(path: &Path) -> Result<ExecutionSummary, CliError> {
    let request = if path.as_os_str() == STDIN_PATH {
        decode_request(io::stdin().lock())?
    } else {
        decode_request(open_reader(path)?)?
    };
    let response = cluster(&request)?;
    Ok(ExecutionSummary {
        data_source: derive_data_source_name(path),
        response,
    })
}

#[instrument(
    name = "cli.run_parquet",
    err,
    skip(args),
    fields(path = %args.path.display(), column = %args.column, algorithm = %args.algorithm),
)]
pub(super) fn run_parquet(args: ParquetArgs) -> Result<ExecutionSummary, CliError> {
    let ParquetArgs {
        path,
        column,
        algorithm,
        epsilon,
        min_points,
        leaf_size,
        workers,
    } = args;
    // Validate parameters before paying for the file read.
    let dbscan = DbscanBuilder::new()
        .with_algorithm(algorithm)
        .with_epsilon(epsilon)
        .with_min_points(min_points)
        .with_leaf_size(leaf_size)
        .with_workers(workers)
        .build()?;
    let name = derive_data_source_name(&path);
    let points =
        DenseMatrixProvider::try_from_parquet_path(name.as_str(), &path, &column)?.into_point_set()?;
    let result = dbscan.run(&points)?;
    Ok(ExecutionSummary {
        data_source: name,
        response: ClusterResponse {
            labels: result.raw_labels(),
            clusters: result.cluster_count(),
        },
    })
}

fn open_reader(path: &Path) -> Result<impl Read, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path) -> String {
    if path.as_os_str() == STDIN_PATH {
        return "stdin".to_owned();
    }
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in the selected format.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
///
/// # Examples
/// ```
/// # use dbscan_cli::cli::{ExecutionSummary, OutputFormat, render_summary};
/// # use dbscan_core::ClusterResponse;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     response: ClusterResponse { labels: vec![1, -1], clusters: 1 },
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, OutputFormat::Json, &mut buffer)?;
/// assert_eq!(String::from_utf8_lossy(&buffer), "{\"labels\":[1,-1],\"clusters\":1}\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_summary(
    summary: &ExecutionSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => encode_response(&summary.response, writer).map_err(|error| match error {
            CodecError::Encode(inner) => io::Error::from(inner),
            other => io::Error::other(other),
        }),
        OutputFormat::Human => {
            writeln!(writer, "data source: {}", summary.data_source)?;
            writeln!(writer, "clusters: {}", summary.response.clusters)?;
            writeln!(writer, "noise: {}", summary.noise())?;
            for (index, label) in summary.response.labels.iter().enumerate() {
                writeln!(writer, "{index}\t{label}")?;
            }
            Ok(())
        }
    }
}
