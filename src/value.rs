//! Property values
//!
//! Recursive tagged payload stored in node properties. Scalars, identity
//! references and ordered arrays of values (arrays may nest). Equality is
//! structural, with floats compared by bit pattern so every value equals
//! itself (NaN included).
//!
//! Author: Moroya Sakamoto

use std::collections::HashMap;

use crate::identity::Identity;

/// Value held by a node property
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// No value
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Reference to another node, resolved through the owning graph
    Identity(Identity),
    /// Ordered sequence of values
    Array(Vec<Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Identity(a), Value::Identity(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

/// Payload-free discriminant of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Absent,
    Bool,
    Int,
    UInt,
    Float,
    String,
    Bytes,
    Identity,
    Array,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Absent => ValueKind::Absent,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::UInt(_) => ValueKind::UInt,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Identity(_) => ValueKind::Identity,
            Value::Array(_) => ValueKind::Array,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Value::Identity(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_identity(&self) -> Option<Identity> {
        match self {
            Value::Identity(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Replace every identity reference found in `map`, recursing through
    /// nested arrays. Unmapped identities are left alone.
    ///
    /// Returns the number of references replaced.
    pub fn remap_identities(&mut self, map: &HashMap<Identity, Identity>) -> usize {
        match self {
            Value::Identity(id) => match map.get(id) {
                Some(&new_id) => {
                    *id = new_id;
                    1
                }
                None => 0,
            },
            Value::Array(items) => items.iter_mut().map(|v| v.remap_identities(map)).sum(),
            _ => 0,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(String::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Identity> for Value {
    fn from(v: Identity) -> Self {
        Value::Identity(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}
