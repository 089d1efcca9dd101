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

//! # Mx Aggregation Tests - Tidy
//!
//! Unrolling of the axis-indexed values tensor into tidy rows.

use std::path::Path;

use mxt::aggregation::build_tidy;
use mxt::{MxAggregationResponse, MxError};
use serde_json::json;

fn response(name: &str) -> MxAggregationResponse {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    let body = std::fs::read_to_string(path).expect("read fixture");
    MxAggregationResponse::from_json_str(&body).expect("parse response")
}

#[test]
fn test_tidy_rows_cover_the_cartesian_product() {
    let response = response("aggregation_response.json");
    let tidy = build_tidy(&response).unwrap();

    assert_eq!(tidy.axes.len(), 2);
    assert_eq!(tidy.measures.len(), 2);
    assert_eq!(tidy.data.len(), 6);
    for row in &tidy.data {
        assert_eq!(row.len(), 4);
    }
}

#[test]
fn test_last_axis_varies_fastest() {
    let tidy = build_tidy(&response("aggregation_response.json")).unwrap();

    let keys: Vec<(String, String)> = tidy
        .data
        .iter()
        .map(|row| (row.members[0].key_text(), row.members[1].key_text()))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("01".to_string(), "2010".to_string()),
            ("01".to_string(), "2011".to_string()),
            ("02".to_string(), "2010".to_string()),
            ("02".to_string(), "2011".to_string()),
            ("03".to_string(), "2010".to_string()),
            ("03".to_string(), "2011".to_string()),
        ]
    );
}

#[test]
fn test_values_follow_reversed_coordinates() {
    let response = response("aggregation_response.json");
    let tidy = build_tidy(&response).unwrap();

    // values nest as [year][chapter][measure]
    let mut checked = 0;
    for row in &tidy.data {
        let (chapter, year) = (row.coords[0], row.coords[1]);
        for (m, value) in row.values.iter().enumerate() {
            assert_eq!(value, &response.values[year][chapter][m]);
            checked += 1;
        }
    }
    assert_eq!(checked, 12);

    // HS "02" in 2010: values[0][1]
    assert_eq!(tidy.data[2].values, vec![json!(null), json!(5)]);
    // HS "01" in 2011: values[1][0]
    assert_eq!(tidy.data[1].values, vec![json!(100), json!(101)]);
    assert!(tidy.data[5].all_measures_null());
}

#[test]
fn test_shape_mismatch_is_rejected() {
    let mut response = response("aggregation_response.json");
    response.values = json!([[[0, 1], [2, 3]], [[4, 5], [6, 7]]]);

    assert!(matches!(
        build_tidy(&response),
        Err(MxError::InconsistentAggregationShape { .. })
    ));
}
