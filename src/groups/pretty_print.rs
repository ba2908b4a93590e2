//! Pretty-printing checks for `serde_json` output.

use std::rc::Rc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use crate::errors::SuiteError;
use crate::test::{CaseResult, TestGroup, TestMethod};
use crate::{check, check_eq};

pub const GROUP_NAME: &str = "PrettyPrintTest";

const COMPACT_FIXTURE: &str =
    r#"{"name":"example","tags":["json","pretty"],"owner":{"id":7,"active":true}}"#;

const TWO_SPACE_EXPECTED: &str = r#"{
  "name": "example",
  "owner": {
    "active": true,
    "id": 7
  },
  "tags": [
    "json",
    "pretty"
  ]
}"#;

const FOUR_SPACE_EXPECTED: &str = r#"{
    "name": "example",
    "owner": {
        "active": true,
        "id": 7
    },
    "tags": [
        "json",
        "pretty"
    ]
}"#;

pub struct PrettyPrintTest {
    document: Rc<Value>,
}

impl PrettyPrintTest {
    pub fn new(fixture: &str) -> Result<Self, SuiteError> {
        let document = serde_json::from_str(fixture).map_err(|e| SuiteError::InvalidManifest {
            message: format!("{} fixture is not valid JSON: {}", GROUP_NAME, e),
            help: None,
        })?;
        Ok(Self {
            document: Rc::new(document),
        })
    }
}

pub fn load() -> Result<Box<dyn TestGroup>, SuiteError> {
    Ok(Box::new(PrettyPrintTest::new(COMPACT_FIXTURE)?))
}

impl TestGroup for PrettyPrintTest {
    fn name(&self) -> &str {
        GROUP_NAME
    }

    fn tests(&self) -> Vec<TestMethod> {
        let doc = Rc::clone(&self.document);
        let compact = move || compact_document_indents_two_spaces(&doc);
        let doc = Rc::clone(&self.document);
        let round_trip = move || pretty_output_parses_back_to_same_value(&doc);
        let doc = Rc::clone(&self.document);
        let custom = move || custom_indent_is_honored(&doc);
        vec![
            TestMethod::new("compact_document_indents_two_spaces", compact),
            TestMethod::new("pretty_output_parses_back_to_same_value", round_trip),
            TestMethod::new("custom_indent_is_honored", custom),
        ]
    }
}

fn compact_document_indents_two_spaces(doc: &Value) -> CaseResult {
    let pretty = serde_json::to_string_pretty(doc)?;
    check_eq!(TWO_SPACE_EXPECTED, pretty);
    Ok(())
}

fn pretty_output_parses_back_to_same_value(doc: &Value) -> CaseResult {
    let pretty = serde_json::to_string_pretty(doc)?;
    check!(pretty.lines().count() > 1, "pretty output should span lines");
    let reparsed: Value = serde_json::from_str(&pretty)?;
    check_eq!(*doc, reparsed);
    Ok(())
}

fn custom_indent_is_honored(doc: &Value) -> CaseResult {
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    doc.serialize(&mut ser)?;
    let pretty = String::from_utf8(out)?;
    check_eq!(FOUR_SPACE_EXPECTED, pretty);
    Ok(())
}
