//! Command-line interface for running DBSCAN over JSON request documents or
//! Parquet vector columns.

mod codec;
mod commands;

pub use codec::{
    CodecError, PointDocument, RequestDocument, ResponseDocument, decode_request, encode_response,
};
pub use commands::{
    Cli, CliError, Command, ExecutionSummary, JsonArgs, OutputFormat, ParquetArgs, RunCommand,
    RunSource, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
