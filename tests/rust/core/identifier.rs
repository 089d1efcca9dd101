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

//! # Mx Core Tests - Identifier
//!
//! Grammar cases for the member-name parser and the canonical-form
//! round-trip property.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test identifier
//! ```

use mxt::{MxError, MxIdentifier, MxQuoting};
use proptest::prelude::*;

fn quotings(ident: &MxIdentifier) -> Vec<MxQuoting> {
    ident.iter().map(|s| s.quoting()).collect()
}

#[test]
fn test_fully_bracketed_identifier() {
    let ident = MxIdentifier::parse("[Date].[Year].[2010]").unwrap();

    assert_eq!(ident.names(), vec!["Date", "Year", "2010"]);
    assert_eq!(quotings(&ident), vec![MxQuoting::Quoted; 3]);
}

#[test]
fn test_mixed_bare_and_bracketed_segments() {
    let ident = MxIdentifier::parse("Time.1997.[Q3]").unwrap();

    assert_eq!(ident.names(), vec!["Time", "1997", "Q3"]);
    assert_eq!(
        quotings(&ident),
        vec![MxQuoting::Unquoted, MxQuoting::Unquoted, MxQuoting::Quoted]
    );
}

#[test]
fn test_escaped_bracket_inside_segment() {
    let ident = MxIdentifier::parse("[string].[with].[a [bracket]] in it]").unwrap();

    assert_eq!(ident.len(), 3);
    assert_eq!(ident[2].name(), "a [bracket] in it");
}

#[test]
fn test_compound_key_segments() {
    let ident =
        MxIdentifier::parse("[Customers].[City].&[San Francisco]&CA&USA.&[cust1234]").unwrap();

    assert_eq!(ident.len(), 4);
    assert_eq!(ident[0].name(), "Customers");
    assert_eq!(ident[1].name(), "City");
    assert_eq!(ident[2].name(), "&San Francisco&CA&USA");
    assert_eq!(ident[2].quoting(), MxQuoting::Key);
    assert_eq!(ident[3].name(), "&cust1234");
    assert_eq!(ident[3].quoting(), MxQuoting::Key);
}

#[test]
fn test_bracketed_then_bare() {
    let ident = MxIdentifier::parse("[Date].Year").unwrap();

    assert_eq!(ident.len(), 2);
    assert_eq!(ident.names(), vec!["Date", "Year"]);
}

#[test]
fn test_double_dot_is_a_syntax_error() {
    let err = MxIdentifier::parse("A..B").unwrap_err();

    match err {
        MxError::Syntax { position, input, .. } => {
            assert_eq!(position, 2);
            assert_eq!(input, "A..B");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_leading_dot_is_a_syntax_error() {
    assert!(matches!(
        MxIdentifier::parse(".A"),
        Err(MxError::Syntax { position: 0, .. })
    ));
}

#[test]
fn test_canonical_form_quotes_every_segment() {
    let ident =
        MxIdentifier::parse("[Customers].City.&[San Francisco]&CA&USA").unwrap();

    assert_eq!(
        ident.to_string(),
        "[Customers].[City].&[San Francisco]&[CA]&[USA]"
    );
    assert_eq!(
        ident.to_plain_string(),
        "Customers.City.&San Francisco&CA&USA"
    );
}

#[test]
fn test_from_str_matches_parse() {
    let parsed: MxIdentifier = "[Date].[Year]".parse().unwrap();
    assert_eq!(parsed, MxIdentifier::parse("[Date].[Year]").unwrap());
}

#[derive(Clone, Debug)]
enum GenSegment {
    Bracketed(String),
    Bare(String),
    Key(Vec<GenKeyPart>),
}

#[derive(Clone, Debug)]
enum GenKeyPart {
    Bracketed(String),
    Bare(String),
}

impl GenKeyPart {
    fn render(&self) -> String {
        match self {
            GenKeyPart::Bracketed(s) => format!("&[{}]", s.replace(']', "]]")),
            GenKeyPart::Bare(s) => format!("&{}", s),
        }
    }

    fn name(&self) -> &str {
        match self {
            GenKeyPart::Bracketed(s) | GenKeyPart::Bare(s) => s,
        }
    }
}

impl GenSegment {
    fn render(&self) -> String {
        match self {
            GenSegment::Bracketed(s) => format!("[{}]", s.replace(']', "]]")),
            GenSegment::Bare(s) => s.clone(),
            GenSegment::Key(parts) => parts.iter().map(GenKeyPart::render).collect(),
        }
    }

    fn name(&self) -> String {
        match self {
            GenSegment::Bracketed(s) | GenSegment::Bare(s) => s.clone(),
            GenSegment::Key(parts) => parts.iter().map(|p| format!("&{}", p.name())).collect(),
        }
    }
}

fn bare_text() -> impl Strategy<Value = String> {
    "[a-z0-9]([a-z0-9 ]{0,6}[a-z0-9])?"
}

fn bracket_text() -> impl Strategy<Value = String> {
    "[a-z .&,\\[\\]]{0,8}"
}

fn key_part() -> impl Strategy<Value = GenKeyPart> {
    prop_oneof![
        bracket_text().prop_map(GenKeyPart::Bracketed),
        bare_text().prop_map(GenKeyPart::Bare),
    ]
}

fn segment() -> impl Strategy<Value = GenSegment> {
    prop_oneof![
        bracket_text().prop_map(GenSegment::Bracketed),
        bare_text().prop_map(GenSegment::Bare),
        prop::collection::vec(key_part(), 1..4).prop_map(GenSegment::Key),
    ]
}

proptest! {
    #[test]
    fn test_segment_names_survive_canonical_round_trip(
        segments in prop::collection::vec(segment(), 1..5)
    ) {
        let text = segments
            .iter()
            .map(GenSegment::render)
            .collect::<Vec<_>>()
            .join(".");
        let expected: Vec<String> = segments.iter().map(GenSegment::name).collect();

        let parsed = MxIdentifier::parse(&text).unwrap();
        let names: Vec<String> = parsed.names().into_iter().map(String::from).collect();
        prop_assert_eq!(&names, &expected);

        let reparsed = MxIdentifier::parse(&parsed.to_string()).unwrap();
        prop_assert_eq!(reparsed.names(), parsed.names());
    }
}
