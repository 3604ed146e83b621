//! Forms: named fields composed into cases at a chosen coverage intensity.
//!
//! | priority | cases produced |
//! |----------|----------------|
//! | 0 | the all-baseline case |
//! | 1 | p0 + each tier-1 value of one field, others at baseline |
//! | 2 | p1 + each tier-2 value of one field, others at baseline |
//! | 3 | full cross product of every tier of every field |
//!
//! Priorities 1 and 2 vary one factor at a time, so their cost grows with the
//! sum of the tier sizes. Priority 3 grows with their product and is meant for
//! small forms.
//!
//! # Example
//!
//! ```
//! use caminar::{Field, Form};
//!
//! let form = Form::new([
//!     ("ef", Field::enumerated([("a", 1), ("b", 2)], [("bad", 9)])?),
//!     ("nf", Field::integer(4, 9)?),
//! ])?;
//! assert_eq!(form.cases(0).count(), 1);
//! assert_eq!(form.cases(1).count(), 1 + 1 + 3);
//! # Ok::<(), caminar::CaminarError>(())
//! ```

use crate::field::{Field, FieldSpec, Tier, Tiers, Value};
use crate::result::{CaminarError, CaminarResult};
use crate::seed::ValueRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Coverage intensity, always within `0..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Baseline values only
    pub const BASELINE: Self = Self(0);
    /// Adds boundary-valid values
    pub const BOUNDARY: Self = Self(1);
    /// Adds invalid values
    pub const INVALID: Self = Self(2);
    /// Full cross product
    pub const EXHAUSTIVE: Self = Self(3);

    /// Priority for any integer, clamped to the nearest valid bound
    #[must_use]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self(0)
        } else if value > 3 {
            Self(3)
        } else {
            Self(value as u8)
        }
    }

    /// Numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self::clamped(i64::from(value))
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// The value one field received in a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseEntry {
    /// Field name
    pub field: String,
    /// Candidate label
    pub label: String,
    /// Assigned value
    pub value: Value,
    /// Tier the value was drawn from
    pub tier: Tier,
}

impl CaseEntry {
    /// Create an entry
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<Value>,
        tier: Tier,
    ) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            value: value.into(),
            tier,
        }
    }
}

/// One full assignment of values to the fields of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    priority: Priority,
    label: String,
    entries: Vec<CaseEntry>,
}

impl Case {
    /// Build a case, deriving its priority and label from the entries
    #[must_use]
    pub fn new(entries: Vec<CaseEntry>) -> Self {
        let priority = derive_priority(entries.iter().map(|e| e.tier));
        let label = entries
            .iter()
            .map(|e| e.label.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            priority,
            label,
            entries,
        }
    }

    /// Coverage priority of this case
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Space-joined candidate labels, in field order
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value assigned to a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.value)
    }

    /// Entries in field order
    #[must_use]
    pub fn entries(&self) -> &[CaseEntry] {
        &self.entries
    }

    /// `(field, value)` pairs in field order
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|e| (e.field.as_str(), &e.value))
    }
}

impl Index<&str> for Case {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if the case has no such field.
    fn index(&self, field: &str) -> &Value {
        self.get(field)
            .unwrap_or_else(|| panic!("case has no field named {field:?}"))
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})\"{}\" {{", self.priority, self.label)?;
        for (i, (field, value)) in self.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("}")
    }
}

/// Priority of a combination of tiers
///
/// 0 when every field is at baseline, 1 for exactly one tier-1 value and no
/// tier-2, 2 for exactly one tier-2 value and no tier-1, 3 otherwise.
pub fn derive_priority(tiers: impl IntoIterator<Item = Tier>) -> Priority {
    let (mut boundary, mut invalid) = (0usize, 0usize);
    for tier in tiers {
        match tier {
            Tier::Baseline => {}
            Tier::Boundary => boundary += 1,
            Tier::Invalid => invalid += 1,
        }
    }
    match (boundary, invalid) {
        (0, 0) => Priority::BASELINE,
        (1, 0) => Priority::BOUNDARY,
        (0, 1) => Priority::INVALID,
        _ => Priority::EXHAUSTIVE,
    }
}

/// Named fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, Field)>,
}

impl Form {
    /// Create a form from `(name, field)` pairs
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty form or a repeated name.
    pub fn new<N: Into<String>>(fields: impl IntoIterator<Item = (N, Field)>) -> CaminarResult<Self> {
        let mut named: Vec<(String, Field)> = Vec::new();
        for (name, field) in fields {
            let name = name.into();
            if named.iter().any(|(n, _)| *n == name) {
                return Err(CaminarError::configuration(format!(
                    "form declares field {name:?} twice"
                )));
            }
            named.push((name, field));
        }
        if named.is_empty() {
            return Err(CaminarError::configuration("form needs at least one field"));
        }
        Ok(Self { fields: named })
    }

    /// Build a form from its serializable description
    pub fn from_spec(spec: &FormSpec) -> CaminarResult<Self> {
        let fields = spec
            .fields
            .iter()
            .map(|f| Ok((f.name.clone(), f.field.build()?)))
            .collect::<CaminarResult<Vec<_>>>()?;
        Self::new(fields)
    }

    /// Parse a YAML form description and build the form
    pub fn from_yaml(yaml: &str) -> CaminarResult<Self> {
        let spec: FormSpec = serde_yaml_ng::from_str(yaml)?;
        Self::from_spec(&spec)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> + '_ {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Number of fields (never zero)
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Cases at a priority, random values drawn from process entropy
    pub fn cases(&self, priority: impl Into<Priority>) -> Cases {
        self.cases_with(priority, &mut ValueRng::from_entropy())
    }

    /// Cases at a priority, random values drawn from `rng`
    ///
    /// Every field is drawn once up front, so all cases of one call share the
    /// same baseline values.
    pub fn cases_with(&self, priority: impl Into<Priority>, rng: &mut ValueRng) -> Cases {
        let priority = priority.into();
        let tiers: Vec<Tiers> = self.fields.iter().map(|(_, f)| f.draw_with(rng)).collect();
        let passes = plan_passes(&tiers, priority);
        Cases {
            names: self.fields.iter().map(|(n, _)| n.clone()).collect(),
            tiers,
            passes,
            pass: 0,
            cursor: None,
        }
    }

    /// Collect the cases at a priority
    #[must_use]
    pub fn list_cases(&self, priority: impl Into<Priority>) -> Vec<Case> {
        self.cases(priority).collect()
    }

    /// Number of cases at a priority, computed without drawing values
    #[must_use]
    pub fn case_count(&self, priority: impl Into<Priority>) -> usize {
        let sizes: Vec<[usize; 3]> = self.fields.iter().map(|(_, f)| f.tier_sizes()).collect();
        match priority.into().value() {
            0 => 1,
            1 => 1 + sizes.iter().map(|s| s[1]).sum::<usize>(),
            2 => 1 + sizes.iter().map(|s| s[1] + s[2]).sum::<usize>(),
            _ => sizes.iter().map(|s| s.iter().sum::<usize>()).product(),
        }
    }
}

/// For each field, the `(tier, index)` choices it cycles through in one pass
type Pass = Vec<Vec<(Tier, usize)>>;

fn plan_passes(tiers: &[Tiers], priority: Priority) -> Vec<Pass> {
    let choices = |t: &Tiers, tier: Tier| -> Vec<(Tier, usize)> {
        (0..t.get(tier).len()).map(|i| (tier, i)).collect()
    };
    let baseline: Pass = tiers.iter().map(|t| choices(t, Tier::Baseline)).collect();

    if priority == Priority::EXHAUSTIVE {
        let all: Pass = tiers
            .iter()
            .map(|t| Tier::ALL.into_iter().flat_map(|tier| choices(t, tier)).collect())
            .collect();
        return vec![all];
    }

    let mut passes = vec![baseline.clone()];
    let varied: &[Tier] = match priority.value() {
        0 => &[],
        1 => &[Tier::Boundary],
        _ => &[Tier::Boundary, Tier::Invalid],
    };
    for tier in varied {
        for (i, t) in tiers.iter().enumerate() {
            let mut pass = baseline.clone();
            pass[i] = choices(t, *tier);
            passes.push(pass);
        }
    }
    passes
}

/// Lazy sequence of cases from one draw of a form's fields
///
/// Cloning restarts from the current position with the same drawn values.
#[derive(Debug, Clone)]
pub struct Cases {
    names: Vec<String>,
    tiers: Vec<Tiers>,
    passes: Vec<Pass>,
    pass: usize,
    cursor: Option<Vec<usize>>,
}

impl Cases {
    fn build(&self, pass: &Pass, cursor: &[usize]) -> Case {
        let entries = cursor
            .iter()
            .enumerate()
            .map(|(field, &at)| {
                let (tier, index) = pass[field][at];
                let candidate = &self.tiers[field].get(tier)[index];
                CaseEntry::new(
                    self.names[field].clone(),
                    candidate.label.clone(),
                    candidate.value.clone(),
                    tier,
                )
            })
            .collect();
        Case::new(entries)
    }
}

impl Iterator for Cases {
    type Item = Case;

    fn next(&mut self) -> Option<Case> {
        loop {
            let pass = self.passes.get(self.pass)?;
            let cursor = match self.cursor.take() {
                Some(cursor) => cursor,
                // a field with nothing to offer empties the whole pass
                None if pass.iter().any(Vec::is_empty) => {
                    self.pass += 1;
                    continue;
                }
                None => vec![0; pass.len()],
            };
            let case = self.build(pass, &cursor);

            // odometer step, last field fastest
            let mut next = cursor;
            let mut carried = true;
            for i in (0..next.len()).rev() {
                next[i] += 1;
                if next[i] < pass[i].len() {
                    carried = false;
                    break;
                }
                next[i] = 0;
            }
            if carried {
                self.pass += 1;
            } else {
                self.cursor = Some(next);
            }
            return Some(case);
        }
    }
}

/// A named field in a form description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedFieldSpec {
    /// Field name
    pub name: String,
    /// Field definition
    #[serde(flatten)]
    pub field: FieldSpec,
}

/// Serializable form description
///
/// ```yaml
/// name: login
/// fields:
///   - name: user
///     kind: text
///     min_len: 3
///     max_len: 12
///   - name: remember
///     kind: enumerated
///     values:
///       - { label: "remember", value: true }
///       - { label: "forget", value: false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    /// Optional form name
    #[serde(default)]
    pub name: Option<String>,
    /// Fields in declaration order
    pub fields: Vec<NamedFieldSpec>,
}
