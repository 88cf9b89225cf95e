//! Conformance test fixture runner
//!
//! Loads YAML fixtures (a corpus plus conversational cases) and runs them
//! against the graphmaster engine.

use crate::Turn;
use graphmaster::prelude::*;
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub corpus: CorpusConfig,
    pub cases: Vec<TestCase>,
}

/// Test case: one turn, the expected template and optional captures
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    #[serde(default)]
    pub that: String,
    #[serde(default)]
    pub topic: String,
    pub expect: Option<String>,
    #[serde(default)]
    pub captures: Vec<CaptureCase>,
}

/// Expected capture text for one wildcard
#[derive(Debug, Deserialize)]
pub struct CaptureCase {
    /// `star`, `thatstar` or `topicstar`
    pub segment: String,
    pub index: usize,
    pub text: String,
}

impl TestCase {
    /// The turn this case sends
    pub fn turn(&self) -> Turn {
        Turn::new(&self.input)
            .with_that(&self.that)
            .with_topic(&self.topic)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Option<String>,
    pub actual: Option<String>,
    /// One message per capture that did not match
    pub capture_failures: Vec<String>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    ///
    /// # Errors
    ///
    /// Returns the corpus build error if the fixture's corpus is invalid.
    pub fn run(&self) -> Result<Vec<CaseResult>, GraphmasterError> {
        let trie = self.corpus.build()?;
        self.cases
            .iter()
            .map(|case| -> Result<CaseResult, GraphmasterError> {
                let turn = case.turn();
                let actual = turn.respond(&trie);

                let mut capture_failures = Vec::new();
                for capture in &case.captures {
                    let segment: Segment = capture.segment.parse()?;
                    let got = turn.star(&trie, segment, capture.index);
                    if got != capture.text {
                        capture_failures.push(format!(
                            "{}[{}]: expected {:?}, got {:?}",
                            capture.segment, capture.index, capture.text, got
                        ));
                    }
                }

                Ok(CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect && capture_failures.is_empty(),
                    expected: case.expect.clone(),
                    actual,
                    capture_failures,
                })
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to load: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}; captures: {:?}",
                self.name, result.case_name, result.expected, result.actual, result.capture_failures
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
name: inline
description: fixture parsing smoke test
corpus:
  categories:
    - pattern: "MY NAME IS *"
      template: name
cases:
  - name: captures name
    input: "My name is Ada"
    expect: name
    captures:
      - { segment: star, index: 1, text: Ada }
  - name: no match
    input: "hello"
    expect: null
"#;

    #[test]
    fn inline_fixture_passes() {
        let fixture = Fixture::from_yaml(FIXTURE).unwrap();
        assert_eq!(fixture.cases.len(), 2);
        assert!(fixture.run().unwrap().iter().all(|r| r.passed));
    }

    #[test]
    fn wrong_capture_is_reported() {
        let yaml = FIXTURE.replace("text: Ada", "text: Grace");
        let fixture = Fixture::from_yaml(&yaml).unwrap();
        let results = fixture.run().unwrap();

        assert!(!results[0].passed);
        assert_eq!(results[0].capture_failures.len(), 1);
        assert!(results[1].passed);
    }

    #[test]
    fn unknown_segment_is_an_error() {
        let yaml = FIXTURE.replace("segment: star", "segment: nowhere");
        let fixture = Fixture::from_yaml(&yaml).unwrap();
        assert!(matches!(
            fixture.run(),
            Err(GraphmasterError::UnknownSegment { .. })
        ));
    }
}
