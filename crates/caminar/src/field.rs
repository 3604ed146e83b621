//! Fields: classified candidate values for one input slot.
//!
//! Every field sorts its candidates into three [`Tier`]s:
//!
//! | tier | meaning | enumerated | integer | text |
//! |------|---------|------------|---------|------|
//! | 0 | baseline | first valid entry | random interior value | random valid text |
//! | 1 | boundary-valid | other valid entries | `0`, `min`, `max` | empty, min length, max length |
//! | 2 | invalid | invalid entries | `min-1`, `max+1`, `-1` | too short, too long, disallowed chars |
//!
//! Tiers drawn together never repeat a generated value. Enumerated fields
//! keep whatever the caller supplied, duplicates included.

use crate::result::{CaminarError, CaminarResult};
use crate::seed::ValueRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Characters used by text fields when no character set is given
pub const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz1234567890";

/// Characters used for the `danger` candidate of text fields
pub const DANGER_CHARS: &str = "\"&?%#@*";

/// A concrete value assigned to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Text value
    Text(String),
}

impl Value {
    /// Integer payload, if any
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean payload, if any
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload, if any
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Classification bucket for candidate values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Tier 0: the one representative normal value
    Baseline,
    /// Tier 1: remaining valid values and edge values
    Boundary,
    /// Tier 2: values expected to be rejected
    Invalid,
}

impl Tier {
    /// All tiers in ascending order
    pub const ALL: [Self; 3] = [Self::Baseline, Self::Boundary, Self::Invalid];

    /// Numeric tier (0, 1 or 2)
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Baseline => 0,
            Self::Boundary => 1,
            Self::Invalid => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier-{}", self.index())
    }
}

/// A labeled candidate value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Human label, used in case labels and graph edges
    pub label: String,
    /// The value itself
    pub value: Value,
}

impl Candidate {
    /// Create a candidate
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One draw of all three tiers of a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tiers {
    buckets: [Vec<Candidate>; 3],
}

impl Tiers {
    /// Candidates of one tier
    #[must_use]
    pub fn get(&self, tier: Tier) -> &[Candidate] {
        &self.buckets[tier.index() as usize]
    }

    /// Total number of candidates over all tiers
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether no tier has a candidate
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All candidates with their tier, tier 0 first
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &Candidate)> + '_ {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.get(tier).iter().map(move |c| (tier, c)))
    }

    fn into_bucket(mut self, tier: Tier) -> Vec<Candidate> {
        std::mem::take(&mut self.buckets[tier.index() as usize])
    }
}

/// Collects generated candidates, dropping values already emitted by an
/// earlier tier of the same draw
struct DistinctTiers {
    tiers: Tiers,
    seen: HashSet<Value>,
}

impl DistinctTiers {
    fn new() -> Self {
        Self {
            tiers: Tiers::default(),
            seen: HashSet::new(),
        }
    }

    fn push(&mut self, tier: Tier, label: &str, value: Value) {
        if self.seen.insert(value.clone()) {
            self.tiers.buckets[tier.index() as usize].push(Candidate::new(label, value));
        }
    }

    /// Push random text of `len` characters, nudging its first character
    /// when it repeats a same-length value drawn earlier
    fn push_text(&mut self, tier: Tier, label: &str, len: usize, chars: &[char], rng: &mut ValueRng) {
        let mut text = rng.text(len, chars);
        if chars.len() > 1 && self.seen.contains(&Value::Text(text.clone())) {
            let mut rest = text.chars();
            if let Some(first) = rest.next() {
                let at = chars.iter().position(|c| *c == first).unwrap_or(0);
                let mut nudged = String::with_capacity(text.len());
                nudged.push(chars[(at + 1) % chars.len()]);
                nudged.extend(rest);
                text = nudged;
            }
        }
        self.push(tier, label, Value::Text(text));
    }

    fn finish(self) -> Tiers {
        self.tiers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldKind {
    Enumerated {
        valid: Vec<Candidate>,
        invalid: Vec<Candidate>,
    },
    Integer {
        min: i64,
        max: i64,
    },
    Text {
        min_len: usize,
        max_len: usize,
        chars: Vec<char>,
    },
}

/// The domain of one named input
///
/// Immutable once constructed; all validation happens in the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    kind: FieldKind,
}

impl Field {
    /// Enumerated field from valid and invalid `(label, value)` entries
    ///
    /// # Errors
    ///
    /// Returns a configuration error when there is no valid entry, since the
    /// baseline is the first valid entry.
    pub fn enumerated<L, V>(
        valid: impl IntoIterator<Item = (L, V)>,
        invalid: impl IntoIterator<Item = (L, V)>,
    ) -> CaminarResult<Self>
    where
        L: Into<String>,
        V: Into<Value>,
    {
        let valid: Vec<Candidate> = valid
            .into_iter()
            .map(|(l, v)| Candidate::new(l, v))
            .collect();
        let invalid: Vec<Candidate> = invalid
            .into_iter()
            .map(|(l, v)| Candidate::new(l, v))
            .collect();
        if valid.is_empty() {
            return Err(CaminarError::configuration(
                "enumerated field needs at least one valid value",
            ));
        }
        Ok(Self {
            kind: FieldKind::Enumerated { valid, invalid },
        }
        .warn_if_degenerate())
    }

    /// Enumerated field with valid entries only
    pub fn choice<L, V>(valid: impl IntoIterator<Item = (L, V)>) -> CaminarResult<Self>
    where
        L: Into<String>,
        V: Into<Value>,
    {
        Self::enumerated(valid, std::iter::empty())
    }

    /// Integer field over the inclusive range `[min, max]`
    pub fn integer(min: i64, max: i64) -> CaminarResult<Self> {
        if max < min {
            return Err(CaminarError::configuration(format!(
                "integer field range is inverted: max {max} < min {min}"
            )));
        }
        Ok(Self {
            kind: FieldKind::Integer { min, max },
        }
        .warn_if_degenerate())
    }

    /// Alphanumeric text field with length in `[min_len, max_len]`
    pub fn text(min_len: usize, max_len: usize) -> CaminarResult<Self> {
        Self::text_with_chars(min_len, max_len, ALPHANUMERIC)
    }

    /// Text field with length in `[min_len, max_len]` over the allowed characters
    pub fn text_with_chars(min_len: usize, max_len: usize, chars: &str) -> CaminarResult<Self> {
        if max_len < min_len {
            return Err(CaminarError::configuration(format!(
                "text field length range is inverted: max {max_len} < min {min_len}"
            )));
        }
        let mut allowed: Vec<char> = Vec::new();
        for c in chars.chars() {
            if !allowed.contains(&c) {
                allowed.push(c);
            }
        }
        if allowed.is_empty() {
            return Err(CaminarError::configuration(
                "text field needs at least one allowed character",
            ));
        }
        Ok(Self {
            kind: FieldKind::Text {
                min_len,
                max_len,
                chars: allowed,
            },
        }
        .warn_if_degenerate())
    }

    /// Whether the field can only ever produce a single value
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match &self.kind {
            FieldKind::Enumerated { valid, invalid } => valid.len() + invalid.len() == 1,
            FieldKind::Integer { min, max } => min == max,
            FieldKind::Text { max_len, .. } => *max_len == 0,
        }
    }

    fn warn_if_degenerate(self) -> Self {
        if self.is_degenerate() {
            match &self.kind {
                FieldKind::Enumerated { valid, .. } => tracing::warn!(
                    label = %valid[0].label,
                    "a single-value enumerated field is not very useful"
                ),
                FieldKind::Integer { min, .. } => {
                    tracing::warn!(value = *min, "a single-value integer field is not very useful");
                }
                FieldKind::Text { .. } => {
                    tracing::warn!("a text field limited to the empty string is not very useful");
                }
            }
        }
        self
    }

    /// Short name of the field variant
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            FieldKind::Enumerated { .. } => "enumerated",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Text { .. } => "text",
        }
    }

    /// Candidates of one tier, drawn from process entropy
    pub fn tier(&self, tier: Tier) -> std::vec::IntoIter<Candidate> {
        self.tier_with(tier, &mut ValueRng::from_entropy())
    }

    /// Candidates of one tier, drawn from the given generator
    pub fn tier_with(&self, tier: Tier, rng: &mut ValueRng) -> std::vec::IntoIter<Candidate> {
        self.draw_with(rng).into_bucket(tier).into_iter()
    }

    /// Draw all three tiers at once
    ///
    /// Random values are drawn in tier order, so a value that collides with an
    /// earlier tier is dropped from the later one.
    pub fn draw_with(&self, rng: &mut ValueRng) -> Tiers {
        match &self.kind {
            FieldKind::Enumerated { valid, invalid } => Tiers {
                buckets: [valid[..1].to_vec(), valid[1..].to_vec(), invalid.clone()],
            },
            FieldKind::Integer { min, max } => draw_integer(*min, *max, rng),
            FieldKind::Text {
                min_len,
                max_len,
                chars,
            } => draw_text(*min_len, *max_len, chars, rng),
        }
    }

    /// Number of candidates per tier, without drawing random values
    #[must_use]
    pub fn tier_sizes(&self) -> [usize; 3] {
        match &self.kind {
            FieldKind::Enumerated { valid, invalid } => [1, valid.len() - 1, invalid.len()],
            // a collision either never happens or happens for every draw
            _ => {
                let tiers = self.draw_with(&mut ValueRng::new(crate::Seed::from_u64(1)));
                Tier::ALL.map(|t| tiers.get(t).len())
            }
        }
    }
}

fn integer_baseline(min: i64, max: i64, rng: &mut ValueRng) -> i64 {
    if max.abs_diff(min) < 2 {
        return min;
    }
    let (lo, hi) = (min + 1, max - 1);
    if lo < hi && lo <= 0 && 0 <= hi {
        // uniform over [lo, hi] without zero
        let v = rng.range_inclusive(lo, hi - 1);
        return if v >= 0 { v + 1 } else { v };
    }
    rng.range_inclusive(lo, hi)
}

fn draw_integer(min: i64, max: i64, rng: &mut ValueRng) -> Tiers {
    let mut tiers = DistinctTiers::new();
    tiers.push(
        Tier::Baseline,
        "normal",
        Value::Int(integer_baseline(min, max, rng)),
    );

    tiers.push(Tier::Boundary, "zero", Value::Int(0));
    tiers.push(Tier::Boundary, "min", Value::Int(min));
    tiers.push(Tier::Boundary, "max", Value::Int(max));

    if let Some(below) = min.checked_sub(1) {
        tiers.push(Tier::Invalid, "<min", Value::Int(below));
    }
    if let Some(above) = max.checked_add(1) {
        tiers.push(Tier::Invalid, ">max", Value::Int(above));
    }
    if !(min..=max).contains(&-1) {
        tiers.push(Tier::Invalid, "negative", Value::Int(-1));
    }
    tiers.finish()
}

fn draw_text(min_len: usize, max_len: usize, chars: &[char], rng: &mut ValueRng) -> Tiers {
    let mut tiers = DistinctTiers::new();
    let shortest = min_len.max(1).min(max_len);

    // one character gives one string per length, so keep the plain length off
    // the min and max lengths whenever the range leaves room between them
    let len = if chars.len() == 1 && max_len - min_len >= 2 {
        rng.length(min_len + 1, max_len - 1)
    } else {
        rng.length(shortest, max_len)
    };
    tiers.push_text(Tier::Baseline, "plain", len, chars, rng);

    tiers.push(Tier::Boundary, "empty", Value::Text(String::new()));
    tiers.push_text(Tier::Boundary, "min", min_len, chars, rng);
    if max_len != min_len {
        tiers.push_text(Tier::Boundary, "max", max_len, chars, rng);
    }

    if min_len > 0 {
        tiers.push_text(Tier::Invalid, "<min", min_len - 1, chars, rng);
    }
    tiers.push_text(Tier::Invalid, ">max", max_len + 1, chars, rng);
    let danger: Vec<char> = DANGER_CHARS.chars().filter(|c| !chars.contains(c)).collect();
    if !danger.is_empty() {
        let len = rng.length(min_len.max(1), max_len.max(1));
        tiers.push(Tier::Invalid, "danger", Value::Text(rng.text(len, &danger)));
    }
    tiers.finish()
}

/// Serializable description of a field, used by YAML form files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSpec {
    /// Enumerated field
    Enumerated {
        /// Valid entries, baseline first
        values: Vec<Candidate>,
        /// Invalid entries
        #[serde(default)]
        invalid: Vec<Candidate>,
    },
    /// Bounded integer field
    Integer {
        /// Inclusive minimum
        min: i64,
        /// Inclusive maximum
        max: i64,
    },
    /// Bounded text field
    Text {
        /// Minimum length
        min_len: usize,
        /// Maximum length (defaults to `min_len`)
        #[serde(default)]
        max_len: Option<usize>,
        /// Allowed characters (defaults to alphanumerics)
        #[serde(default)]
        chars: Option<String>,
    },
}

impl FieldSpec {
    /// Build the described field
    pub fn build(&self) -> CaminarResult<Field> {
        match self {
            Self::Enumerated { values, invalid } => Field::enumerated(
                values.iter().map(|c| (c.label.clone(), c.value.clone())),
                invalid.iter().map(|c| (c.label.clone(), c.value.clone())),
            ),
            Self::Integer { min, max } => Field::integer(*min, *max),
            Self::Text {
                min_len,
                max_len,
                chars,
            } => Field::text_with_chars(
                *min_len,
                max_len.unwrap_or(*min_len),
                chars.as_deref().unwrap_or(ALPHANUMERIC),
            ),
        }
    }
}
