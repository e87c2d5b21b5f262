//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary request documents and Parquet files.

use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use arrow_array::{ArrayRef, FixedSizeListArray, Float64Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use dbscan_core::Algorithm;
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

use super::{Cli, CliError, Command, JsonArgs, OutputFormat, ParquetArgs, RunCommand, RunSource, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Writes `rows` as a non-nullable `FixedSizeList<Float64, D>` column called
/// `column`.
pub(super) fn create_parquet_file(
    dir: &TempDir,
    name: &str,
    column: &str,
    rows: &[Vec<f64>],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dimension = rows.first().map_or(1, Vec::len);
    let width = i32::try_from(dimension)?;
    let item = Arc::new(Field::new("item", DataType::Float64, false));
    let values = Float64Array::from(rows.concat());
    let array = FixedSizeListArray::new(Arc::clone(&item), width, Arc::new(values) as ArrayRef, None);
    let schema = Arc::new(Schema::new(vec![Field::new(
        column,
        DataType::FixedSizeList(item, width),
        false,
    )]));
    let batch = RecordBatch::try_new(Arc::clone(&schema), vec![Arc::new(array) as ArrayRef])?;

    let path = dir.path().join(name);
    let mut writer = ArrowWriter::try_new(File::create(&path)?, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}

pub(super) fn json_cli(path: PathBuf) -> Cli {
    Cli {
        format: OutputFormat::Json,
        command: Command::Run(RunCommand {
            source: RunSource::Json(JsonArgs { path }),
        }),
    }
}

pub(super) fn parquet_args(path: PathBuf, column: &str) -> ParquetArgs {
    ParquetArgs {
        path,
        column: column.to_owned(),
        algorithm: Algorithm::KdTree,
        epsilon: 5.0,
        min_points: 3,
        leaf_size: 2,
        workers: 2,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
