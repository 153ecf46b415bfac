//! Requirement specification data model.
//!
//! A specification serializes to the same JSON shape it is usually exchanged
//! in: an array of plain path strings and `{ "loopVariable", "properties" }`
//! objects.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single thing a payload must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    /// A dotted path that must resolve to a value.
    Field(String),
    /// A path that must resolve to an array whose elements satisfy `properties`.
    Loop(LoopRequirement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopRequirement {
    pub loop_variable: String,
    /// Requirements on each element. Empty means any element shape is fine.
    #[serde(default)]
    pub properties: RequirementSpec,
}

/// Identity used for deduplication. A field and a loop over the same path are
/// different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementKey<'a> {
    Field(&'a str),
    Loop(&'a str),
}

impl Requirement {
    pub fn field(path: impl Into<String>) -> Self {
        Requirement::Field(path.into())
    }

    pub fn each(loop_variable: impl Into<String>, properties: Vec<Requirement>) -> Self {
        Requirement::Loop(LoopRequirement {
            loop_variable: loop_variable.into(),
            properties: properties.into_iter().collect(),
        })
    }

    /// The path this requirement is anchored at.
    pub fn path(&self) -> &str {
        match self {
            Requirement::Field(path) => path,
            Requirement::Loop(lp) => &lp.loop_variable,
        }
    }

    pub fn key(&self) -> RequirementKey<'_> {
        match self {
            Requirement::Field(path) => RequirementKey::Field(path),
            Requirement::Loop(lp) => RequirementKey::Loop(&lp.loop_variable),
        }
    }
}

impl From<&str> for Requirement {
    fn from(path: &str) -> Self {
        Requirement::Field(path.to_string())
    }
}

impl From<LoopRequirement> for Requirement {
    fn from(lp: LoopRequirement) -> Self {
        Requirement::Loop(lp)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Field(path) => f.write_str(path),
            Requirement::Loop(lp) => {
                write!(f, "{}[]", lp.loop_variable)?;
                if !lp.properties.is_empty() {
                    write!(f, " {{ {} }}", lp.properties)?;
                }
                Ok(())
            }
        }
    }
}

/// Ordered, duplicate-free list of requirements.
///
/// Every constructor goes through [`FromIterator`], which keeps the first
/// occurrence of each [`RequirementKey`] and drops later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Requirement>", into = "Vec<Requirement>")]
pub struct RequirementSpec(Vec<Requirement>);

impl RequirementSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Requirement] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Requirement> {
        self.0.get(index)
    }

    pub fn contains_field(&self, path: &str) -> bool {
        self.0
            .iter()
            .any(|r| r.key() == RequirementKey::Field(path))
    }

    pub fn find_loop(&self, loop_variable: &str) -> Option<&LoopRequirement> {
        self.0.iter().find_map(|r| match r {
            Requirement::Loop(lp) if lp.loop_variable == loop_variable => Some(lp),
            _ => None,
        })
    }

    /// Top-level field paths, in order. Loop requirements are skipped.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|r| match r {
            Requirement::Field(path) => Some(path.as_str()),
            Requirement::Loop(_) => None,
        })
    }

    /// Parses the JSON wire form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<Requirement> for RequirementSpec {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        let mut seen: HashSet<(bool, String)> = HashSet::new();
        let mut items = Vec::new();
        for requirement in iter {
            let key = match requirement.key() {
                RequirementKey::Field(path) => (false, path.to_string()),
                RequirementKey::Loop(path) => (true, path.to_string()),
            };
            if seen.insert(key) {
                items.push(requirement);
            }
        }
        RequirementSpec(items)
    }
}

impl From<Vec<Requirement>> for RequirementSpec {
    fn from(items: Vec<Requirement>) -> Self {
        items.into_iter().collect()
    }
}

impl From<RequirementSpec> for Vec<Requirement> {
    fn from(spec: RequirementSpec) -> Self {
        spec.0
    }
}

impl IntoIterator for RequirementSpec {
    type Item = Requirement;
    type IntoIter = std::vec::IntoIter<Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RequirementSpec {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RequirementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, requirement) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", requirement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let spec: RequirementSpec = vec![
            Requirement::field("foo"),
            Requirement::field("bar"),
            Requirement::field("foo"),
            Requirement::each("list", vec!["a".into()]),
            Requirement::each("list", vec!["b".into()]),
        ]
        .into();

        assert_eq!(spec.len(), 3);
        assert_eq!(spec.fields().collect::<Vec<_>>(), vec!["foo", "bar"]);
        let list = spec.find_loop("list").unwrap();
        assert_eq!(list.properties, vec![Requirement::field("a")].into());
    }

    #[test]
    fn test_field_and_loop_with_same_path_are_distinct() {
        let spec: RequirementSpec =
            vec![Requirement::field("items"), Requirement::each("items", vec![])].into();
        assert_eq!(spec.len(), 2);
        assert!(spec.contains_field("items"));
        assert!(spec.find_loop("items").is_some());
    }

    #[test]
    fn test_wire_format() {
        let spec: RequirementSpec = vec![
            Requirement::field("foo"),
            Requirement::each("bar", vec!["baz".into()]),
        ]
        .into();

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!(["foo", { "loopVariable": "bar", "properties": ["baz"] }])
        );
    }

    #[test]
    fn test_deserialize_dedups_and_defaults_properties() {
        let spec = RequirementSpec::from_json(
            r#"["foo", "foo", { "loopVariable": "bar" }, { "loopVariable": "bar", "properties": ["x"] }]"#,
        )
        .unwrap();

        assert_eq!(
            spec,
            vec![Requirement::field("foo"), Requirement::each("bar", vec![])].into()
        );
    }

    #[test]
    fn test_display() {
        let spec: RequirementSpec = vec![
            Requirement::field("title"),
            Requirement::each("rows", vec!["id".into()]),
            Requirement::each("tags", vec![]),
        ]
        .into();
        assert_eq!(spec.to_string(), "title, rows[] { id }, tags[]");
    }
}
