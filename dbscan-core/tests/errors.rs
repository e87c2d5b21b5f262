use std::sync::Arc;

use dbscan_core::{
    Algorithm, DbscanBuilder, DbscanError, DbscanErrorCode, PointSet, PointSetError,
    PointSetErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(
    PointSetError::DimensionMismatch { row: 1, expected: 2, actual: 3 },
    PointSetErrorCode::DimensionMismatch,
    "POINT_SET_DIMENSION_MISMATCH",
)]
#[case(PointSetError::ZeroDimension, PointSetErrorCode::ZeroDimension, "POINT_SET_ZERO_DIMENSION")]
#[case(
    PointSetError::NonFiniteCoordinate { row: 0, axis: 0 },
    PointSetErrorCode::NonFiniteCoordinate,
    "POINT_SET_NON_FINITE_COORDINATE",
)]
fn returns_expected_point_set_code(
    #[case] error: PointSetError,
    #[case] expected: PointSetErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(error.code().to_string(), text);
}

#[rstest]
#[case(
    DbscanError::UnknownAlgorithm { name: Arc::from("ball_tree") },
    DbscanErrorCode::UnknownAlgorithm,
    None,
    true,
)]
#[case(DbscanError::InvalidMinPoints { got: 0 }, DbscanErrorCode::InvalidMinPoints, None, true)]
#[case(DbscanError::InvalidEpsilon { got: -1.0 }, DbscanErrorCode::InvalidEpsilon, None, true)]
#[case(DbscanError::InvalidLeafSize { got: 0 }, DbscanErrorCode::InvalidLeafSize, None, true)]
#[case(DbscanError::InvalidWorkers { got: 0 }, DbscanErrorCode::InvalidWorkers, None, true)]
#[case(
    DbscanError::PointSet { error: PointSetError::ZeroDimension },
    DbscanErrorCode::PointSetFailure,
    Some(PointSetErrorCode::ZeroDimension),
    true,
)]
#[case(
    DbscanError::WorkerPool { workers: 4, message: Arc::from("spawn failed") },
    DbscanErrorCode::WorkerPool,
    None,
    false,
)]
#[case(
    DbscanError::IncompleteNeighborTable { expected: 3, received: 2 },
    DbscanErrorCode::IncompleteNeighborTable,
    None,
    false,
)]
fn returns_expected_dbscan_code(
    #[case] error: DbscanError,
    #[case] expected: DbscanErrorCode,
    #[case] point_set: Option<PointSetErrorCode>,
    #[case] configuration: bool,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.point_set_code(), point_set);
    assert_eq!(error.is_configuration_error(), configuration);
    assert!(error.code().as_str().starts_with("DBSCAN_"));
}

#[rstest]
fn point_set_errors_keep_their_source() {
    let err = DbscanBuilder::new()
        .build()
        .expect("defaults are valid")
        .cluster_rows([vec![0.0, 0.0], vec![f64::NAN, 1.0]])
        .expect_err("NaN must be rejected");
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(
        source.as_deref(),
        Some("row 1 has a non-finite coordinate on axis 0")
    );
    assert_eq!(err.point_set_code(), Some(PointSetErrorCode::NonFiniteCoordinate));
}

#[rstest]
fn unknown_algorithm_names_the_selector() {
    let err = "ball_tree".parse::<Algorithm>().expect_err("unknown selector");
    assert_eq!(
        err.to_string(),
        "unknown algorithm `ball_tree`; expected `brute` or `kd_tree`"
    );
}

#[rstest]
fn zero_dimension_rows_are_rejected_before_clustering() {
    let err = PointSet::try_from_rows([Vec::<f64>::new(), Vec::new()])
        .expect_err("zero-width rows must fail");
    assert_eq!(err.code(), PointSetErrorCode::ZeroDimension);
}
