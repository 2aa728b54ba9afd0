//! Weighted-categorical selection over a nested weight table.
//!
//! The table describes an external categorical distribution keyed by rarity,
//! type, and an optional secondary type, with species weights at the leaves.
//! Iteration order is significant to the result — the table relies on
//! `serde_json`'s `preserve_order` feature so the leaves keep the order the
//! document was written in, and a [`SlotList`] keeps that order through
//! selection.

use crate::error::RngError;
use crate::xorshift::Xorshift128;
use serde::Serialize;
use serde_json::{Map, Value};

/// One selectable category and its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub category: String,
    pub weight: u64,
}

/// Ordered categories with cumulative-range selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotList {
    slots: Vec<Slot>,
}

impl SlotList {
    /// Builds a slot list from pairs in the caller's significant order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            slots: pairs
                .into_iter()
                .map(|(category, weight)| Slot {
                    category: category.into(),
                    weight,
                })
                .collect(),
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        self.slots.iter().map(|s| s.weight).sum()
    }

    /// The category whose cumulative weight range contains `draw`, walking
    /// the slots in table order. `None` when `draw >= total()`.
    pub fn select(&self, draw: u64) -> Option<&str> {
        let mut cumulative = 0u64;
        for slot in &self.slots {
            if draw < cumulative + slot.weight {
                return Some(&slot.category);
            }
            cumulative += slot.weight;
        }
        None
    }

    /// Draws `rand(0, total)` from the generator and selects.
    ///
    /// Consumes exactly one advance. Returns [`RngError::EmptyWeights`] when
    /// the total weight is zero.
    pub fn roll<'a>(&'a self, rng: &mut Xorshift128) -> Result<&'a str, RngError> {
        let total = self.total();
        if total == 0 {
            return Err(RngError::EmptyWeights);
        }
        let draw = rng.rand(0, total)?;
        // draw < total, so a slot always contains it
        self.select(u64::from(draw)).ok_or(RngError::EmptyWeights)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Pre-validated three-level weight table:
/// rarity -> type -> optional secondary type -> (species -> weight).
///
/// Missing keys surface as [`RngError::UnknownCategory`] at lookup time
/// instead of a crash inside nested document access.
#[derive(Debug, Clone)]
pub struct WeightTable {
    root: Map<String, Value>,
}

impl WeightTable {
    /// Wraps a parsed JSON document. The top level must be an object.
    pub fn from_value(value: Value) -> Result<Self, RngError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(RngError::MalformedTable(format!(
                "top level must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parses a weights document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, RngError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| RngError::MalformedTable(e.to_string()))?;
        Self::from_value(value)
    }

    /// Resolves the nested keys down to an ordered slot list.
    ///
    /// With `secondary` present the leaf sits one level deeper. Every leaf
    /// weight must be a non-negative integer.
    pub fn slots(
        &self,
        rarity: &str,
        kind: &str,
        secondary: Option<&str>,
    ) -> Result<SlotList, RngError> {
        let by_rarity = self.root.get(rarity).ok_or_else(|| RngError::UnknownCategory {
            level: "rarity",
            key: rarity.to_owned(),
        })?;

        let by_kind = child_object(by_rarity, kind, "type")?;

        let leaf = match secondary {
            Some(key) => child_object(by_kind, key, "secondary type")?,
            None => by_kind,
        };

        let entries = leaf.as_object().ok_or_else(|| {
            RngError::MalformedTable(format!(
                "leaf under '{rarity}' is {}, expected an object of weights",
                json_kind(leaf)
            ))
        })?;

        let mut slots = Vec::with_capacity(entries.len());
        for (category, weight) in entries {
            let weight = weight.as_u64().ok_or_else(|| RngError::InvalidWeight {
                category: category.clone(),
            })?;
            slots.push(Slot {
                category: category.clone(),
                weight,
            });
        }
        Ok(SlotList { slots })
    }
}

/// Looks up `key` inside `parent`, which must be a JSON object.
fn child_object<'a>(
    parent: &'a Value,
    key: &str,
    level: &'static str,
) -> Result<&'a Value, RngError> {
    parent
        .as_object()
        .and_then(|m| m.get(key))
        .ok_or_else(|| RngError::UnknownCategory {
            level,
            key: key.to_owned(),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
