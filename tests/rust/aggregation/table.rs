//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Mx.
//! The Mx project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Mx Aggregation Tests - Table
//!
//! Column layout, parent expansion, property binding and empty-row
//! filtering of the table view.

use std::path::Path;

use mxt::{MxAggregation, MxAggregationParams, MxAggregationResponse, MxCube, MxError, MxMeasure};
use serde_json::{json, Value};

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn cube() -> MxCube {
    let body = std::fs::read_to_string(fixture_path("cube_export.json")).expect("read cube");
    MxCube::from_json_str(&body).expect("parse cube")
}

fn response(name: &str) -> MxAggregationResponse {
    let body = std::fs::read_to_string(fixture_path(name)).expect("read response");
    MxAggregationResponse::from_json_str(&body).expect("parse response")
}

fn parents_aggregation() -> MxAggregation {
    let params = MxAggregationParams::from_file(&fixture_path("params_with_parents.yaml"))
        .expect("load params");
    MxAggregation::new(
        response("aggregation_response_with_ancestors.json"),
        cube(),
        params,
    )
}

#[test]
fn test_parent_levels_expand_into_columns() {
    let aggregation = parents_aggregation();
    let table = aggregation.to_table(false).unwrap();

    assert_eq!(
        table.columns(),
        &[
            "ID Section",
            "Section",
            "ID Chapter",
            "Chapter",
            "ID HS4",
            "HS4",
            "ID Year",
            "Year",
            "Chapter ES",
            "Name ES",
            "FOB US",
        ]
    );
    assert_eq!(table.index_columns(), 10);
    assert_eq!(table.measure_names(), &["FOB US"]);
    assert_eq!(table.len(), 4);
}

#[test]
fn test_parent_row_contents() {
    let aggregation = parents_aggregation();
    let table = aggregation.to_table(false).unwrap();

    let expected: Vec<Value> = vec![
        json!("I"),
        json!("Animal products"),
        json!("01"),
        json!("Live animals"),
        json!("0101"),
        json!("Horses"),
        json!(2010),
        json!("2010"),
        json!("Animales vivos"),
        json!("Caballos"),
        json!(1.5),
    ];
    assert_eq!(table.rows()[0], expected);

    let fish = &table.rows()[2];
    assert_eq!(fish[2], json!("03"));
    assert_eq!(fish[8], json!("Pescado"));
    assert_eq!(fish[9], json!("Pescado fresco"));
    assert_eq!(fish[10], Value::Null);
}

#[test]
fn test_filter_drops_rows_without_measures() {
    let aggregation = parents_aggregation();

    let unfiltered = aggregation.to_table(false).unwrap();
    let filtered = aggregation.to_table(true).unwrap();

    assert_eq!(unfiltered.len(), 4);
    assert_eq!(filtered.len(), 3);
    assert!(filtered
        .rows()
        .iter()
        .all(|row| row[filtered.index_columns()..].iter().any(|v| !v.is_null())));
    assert_eq!(
        filtered.column("FOB US").unwrap(),
        vec![&json!(1.5), &json!(2.5), &json!(3.5)]
    );
}

#[test]
fn test_table_without_parents_uses_response_captions() {
    let aggregation = MxAggregation::new(
        response("aggregation_response.json"),
        cube(),
        MxAggregationParams::new().with_properties(["HS.HS2.Chapter ES"]),
    );

    let table = aggregation.to_table(false).unwrap();
    assert_eq!(
        table.columns(),
        &["ID HS2", "HS2", "ID Year", "Year", "Chapter ES", "FOB US", "Geo Rank"]
    );
    assert_eq!(table.index_names().len(), 5);
    assert_eq!(table.len(), 6);
    assert_eq!(
        table.rows()[2],
        vec![
            json!("02"),
            json!("Meat"),
            json!(2010),
            json!("2010"),
            json!("Carne"),
            Value::Null,
            json!(5),
        ]
    );

    let filtered = aggregation.to_table(true).unwrap();
    assert_eq!(filtered.len(), 5);
}

#[test]
fn test_records_keep_column_order() {
    let aggregation = parents_aggregation();
    let records = aggregation.to_table(true).unwrap().to_records();

    assert_eq!(records.len(), 3);
    let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
    assert_eq!(keys.first(), Some(&"ID Section"));
    assert_eq!(keys.last(), Some(&"FOB US"));
    assert_eq!(records[0]["Name ES"], json!("Caballos"));
}

#[test]
fn test_missing_ancestor_is_reported() {
    let mut response = response("aggregation_response_with_ancestors.json");
    if let Some(ancestors) = response.axes[1].members[1].ancestors.as_mut() {
        ancestors.truncate(1);
    }

    let params = MxAggregationParams::from_file(&fixture_path("params_with_parents.yaml")).unwrap();
    let aggregation = MxAggregation::new(response, cube(), params);

    match aggregation.to_table(false) {
        Err(MxError::MissingAncestorLevel {
            dimension,
            level,
            member,
        }) => {
            assert_eq!(dimension, "HS");
            assert_eq!(level, "HS0");
            assert_eq!(member, "0302");
        }
        other => panic!("expected missing ancestor, got {other:?}"),
    }
}

#[test]
fn test_missing_ancestor_on_empty_row_fails_both_filters() {
    let mut response = response("aggregation_response_with_ancestors.json");
    if let Some(ancestors) = response.axes[1].members[1].ancestors.as_mut() {
        ancestors.truncate(1);
    }
    // member 0302 has no measure values in either year
    response.values = json!([[[1.5], [null]], [[2.5], [null]]]);

    let params = MxAggregationParams::from_file(&fixture_path("params_with_parents.yaml")).unwrap();
    let aggregation = MxAggregation::new(response, cube(), params);

    for filter in [false, true] {
        match aggregation.to_table(filter) {
            Err(MxError::MissingAncestorLevel { member, .. }) => assert_eq!(member, "0302"),
            other => panic!("filter={filter}: expected missing ancestor, got {other:?}"),
        }
    }
}

#[test]
fn test_unbound_property_on_empty_row_fails_when_filtering() {
    let mut response = response("aggregation_response_with_ancestors.json");
    response.values = json!([[[null], [null]], [[null], [null]]]);

    let params = MxAggregationParams::from_file(&fixture_path("params_with_parents.yaml"))
        .unwrap()
        .with_properties(["Export Geography.Region.Region ES"]);
    let aggregation = MxAggregation::new(response, cube(), params);

    assert!(matches!(
        aggregation.to_table(true),
        Err(MxError::UnboundProperty { .. })
    ));
}

#[test]
fn test_measure_count_mismatch_is_a_shape_error() {
    let mut params =
        MxAggregationParams::from_file(&fixture_path("params_with_parents.yaml")).unwrap();
    params.measures.push(MxMeasure::new("Geo Rank Across Time", "Geo Rank"));

    let aggregation = MxAggregation::new(
        response("aggregation_response_with_ancestors.json"),
        cube(),
        params,
    );

    assert!(matches!(
        aggregation.to_table(true),
        Err(MxError::InconsistentAggregationShape { .. })
    ));
}

#[test]
fn test_views_are_memoized() {
    let aggregation = parents_aggregation();

    let first = aggregation.to_table(true).unwrap() as *const _;
    let second = aggregation.to_table(true).unwrap() as *const _;
    assert_eq!(first, second);

    let tidy = aggregation.tidy().unwrap();
    assert_eq!(tidy.data.len(), 4);
}
