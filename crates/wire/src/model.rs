// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule-set data model: operators, entry values, and the recursive rule tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum nesting depth of a rule tree.
///
/// Each tree level costs several levels of JSON nesting, so the cap keeps
/// the deepest legal tree within serde_json's recursion limit on both ends
/// of the wire.
pub const MAX_TREE_DEPTH: usize = 24;

/// Errors from rule model construction and traversal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("rule tree exceeds maximum depth {max}")]
    TreeTooDeep { max: usize },

    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}

/// Comparison operator applied between a rule item's value and the
/// corresponding entry field. `Count` carries its threshold in
/// [`TypeOptions::count`]; the other operators ignore it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    Count,
}

impl Operator {
    /// Wire token for this operator, as the server spells it.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::Gt => "GT",
            Self::Gte => "GTE",
            Self::Lt => "LT",
            Self::Lte => "LTE",
            Self::Contains => "CONTAINS",
            Self::Count => "COUNT",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Operator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EQ" => Ok(Self::Eq),
            "NEQ" => Ok(Self::Neq),
            "GT" => Ok(Self::Gt),
            "GTE" => Ok(Self::Gte),
            "LT" => Ok(Self::Lt),
            "LTE" => Ok(Self::Lte),
            "CONTAINS" => Ok(Self::Contains),
            "COUNT" => Ok(Self::Count),
            _ => Err(ModelError::UnknownOperator(s.to_string())),
        }
    }
}

/// One field's runtime value in an entry being tested for a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value")]
pub enum EntryValue {
    String(String),
    Boolean(bool),
    Integer(i32),
}

impl EntryValue {
    /// Build an entry value from free-form text.
    ///
    /// Tries boolean, then 32-bit integer, then falls back to string.
    /// First successful parse wins: `"true"` is a boolean, `"10"` is an
    /// integer, `"10.5"` stays a string. Never fails.
    pub fn infer(text: &str) -> Self {
        if let Ok(b) = text.parse::<bool>() {
            return Self::Boolean(b);
        }
        if let Ok(i) = text.parse::<i32>() {
            return Self::Integer(i);
        }
        Self::String(text.to_string())
    }
}

impl fmt::Display for EntryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// Comparison options attached to a rule item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeOptions {
    pub operator: Operator,
    /// Threshold for `Operator::Count`; ignored by every other operator.
    #[serde(default)]
    pub count: i32,
}

impl TypeOptions {
    pub const fn new(operator: Operator) -> Self {
        Self { operator, count: 0 }
    }

    pub const fn with_count(operator: Operator, count: i32) -> Self {
        Self { operator, count }
    }
}

/// A rule item's value: a scalar, or a full sub-rule (making the tree
/// arbitrarily deep).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value")]
pub enum RqItemValue {
    Boolean(bool),
    Integer(i32),
    String(String),
    Nested(Rq),
}

impl From<EntryValue> for RqItemValue {
    fn from(value: EntryValue) -> Self {
        match value {
            EntryValue::String(s) => Self::String(s),
            EntryValue::Boolean(b) => Self::Boolean(b),
            EntryValue::Integer(i) => Self::Integer(i),
        }
    }
}

/// One node of a rule tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RqItem {
    pub key: String,
    pub value: RqItemValue,
    pub options: TypeOptions,
}

impl RqItem {
    pub fn new(key: impl Into<String>, value: RqItemValue, options: TypeOptions) -> Self {
        Self { key: key.into(), value, options }
    }
}

/// A rule-set: an ordered collection of rule items, with a uuid once the
/// server has assigned one.
///
/// Trees are built top-down and never mutated afterwards, so acyclicity
/// is structural.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub items: Vec<RqItem>,
}

impl Rq {
    pub fn new(items: Vec<RqItem>) -> Self {
        Self { uuid: None, items }
    }

    /// Depth-first, pre-order walk over every item in the tree.
    ///
    /// The visitor receives each item with its depth (root items are at
    /// depth 0). Fails with [`ModelError::TreeTooDeep`] if the tree
    /// nests past [`MAX_TREE_DEPTH`].
    pub fn walk<F>(&self, visit: &mut F) -> Result<(), ModelError>
    where
        F: FnMut(usize, &RqItem),
    {
        walk_items(&self.items, 0, visit)
    }

    /// Check the tree against [`MAX_TREE_DEPTH`] without visiting.
    pub fn validate_depth(&self) -> Result<(), ModelError> {
        self.walk(&mut |_, _| {})
    }
}

fn walk_items<F>(items: &[RqItem], depth: usize, visit: &mut F) -> Result<(), ModelError>
where
    F: FnMut(usize, &RqItem),
{
    if depth >= MAX_TREE_DEPTH {
        return Err(ModelError::TreeTooDeep { max: MAX_TREE_DEPTH });
    }
    for item in items {
        visit(depth, item);
        if let RqItemValue::Nested(rq) = &item.value {
            walk_items(&rq.items, depth + 1, visit)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
