//! Serialization sandbox: field renaming and tolerant decoding.

use serde::{Deserialize, Serialize};

use crate::errors::SuiteError;
use crate::test::{CaseResult, TestGroup, TestMethod};
use crate::{check, check_eq};

pub const GROUP_NAME: &str = "SandboxTest";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TestAttribute {
    key: String,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TestElement {
    id: u32,
    #[serde(rename = "label")]
    name: String,
    #[serde(default)]
    attributes: Vec<TestAttribute>,
}

impl TestElement {
    fn sample() -> Self {
        Self {
            id: 1,
            name: "first".to_string(),
            attributes: vec![TestAttribute {
                key: "color".to_string(),
                value: "blue".to_string(),
            }],
        }
    }
}

#[derive(Debug, Default)]
pub struct SandboxTest;

pub fn load() -> Result<Box<dyn TestGroup>, SuiteError> {
    Ok(Box::new(SandboxTest))
}

impl TestGroup for SandboxTest {
    fn name(&self) -> &str {
        GROUP_NAME
    }

    fn tests(&self) -> Vec<TestMethod> {
        vec![
            TestMethod::new(
                "renamed_field_serializes_under_json_name",
                renamed_field_serializes_under_json_name,
            ),
            TestMethod::new(
                "unknown_properties_are_ignored",
                unknown_properties_are_ignored,
            ),
        ]
    }
}

fn renamed_field_serializes_under_json_name() -> CaseResult {
    let json = serde_json::to_value(TestElement::sample())?;
    check_eq!("first", json["label"]);
    check!(json.get("name").is_none(), "rust field name leaked: {}", json);
    check_eq!("blue", json["attributes"][0]["value"]);
    Ok(())
}

fn unknown_properties_are_ignored() -> CaseResult {
    let input = r#"{"id":2,"label":"second","color":"red","attributes":[]}"#;
    let element: TestElement = serde_json::from_str(input)?;
    check_eq!(2, element.id);
    check_eq!("second", element.name);
    check!(element.attributes.is_empty());
    Ok(())
}
