//! # Parameter Resolution
//!
//! Declarative parameter schemas and the default-on-falsy rule.
//!
//! A parameter falls back to its default when it is absent or "falsy":
//! zero, `false`, NaN or an empty list. Callers therefore cannot request a
//! literal zero for a parameter whose default is nonzero; this matches the
//! behavior existing clients depend on.

use std::collections::{BTreeMap, HashMap};

use crate::error::ParamError;
use crate::protocol::ParamValue;

/// Expected type of a parameter, with its default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// Real number; integers are accepted
    Real(f64),
    /// Non-negative integer such as a segment count
    Count(i64),
    /// Signed integer
    Integer(i64),
    Flag(bool),
    /// List of reals, empty by default; integers are accepted
    Reals,
    /// List of non-negative integers, empty by default
    Indices,
}

/// One entry of a parameter schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub const fn real(name: &'static str, default: f64) -> Self {
        Self {
            name,
            kind: ParamKind::Real(default),
        }
    }

    pub const fn count(name: &'static str, default: i64) -> Self {
        Self {
            name,
            kind: ParamKind::Count(default),
        }
    }

    pub const fn integer(name: &'static str, default: i64) -> Self {
        Self {
            name,
            kind: ParamKind::Integer(default),
        }
    }

    pub const fn flag(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: ParamKind::Flag(default),
        }
    }

    pub const fn reals(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Reals,
        }
    }

    pub const fn indices(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Indices,
        }
    }

    /// Resolves the caller's value (if any) against this spec.
    fn resolve(&self, value: Option<&ParamValue>) -> Result<Resolved, ParamError> {
        let name = self.name;
        match (self.kind, value) {
            (ParamKind::Real(default), None) => Ok(Resolved::Real(default)),
            (ParamKind::Real(default), Some(ParamValue::Real(v))) => Ok(Resolved::Real(
                if *v == 0.0 || v.is_nan() { default } else { *v },
            )),
            (ParamKind::Real(default), Some(ParamValue::Integer(v))) => {
                Ok(Resolved::Real(if *v == 0 { default } else { *v as f64 }))
            }
            (ParamKind::Real(_), Some(_)) => Err(mismatch(name, "a real number")),

            (ParamKind::Count(default), None) => to_count(name, default),
            (ParamKind::Count(default), Some(ParamValue::Integer(v))) => {
                to_count(name, if *v == 0 { default } else { *v })
            }
            (ParamKind::Count(_), Some(_)) => Err(mismatch(name, "a non-negative integer")),

            (ParamKind::Integer(default), None) => Ok(Resolved::Integer(default)),
            (ParamKind::Integer(default), Some(ParamValue::Integer(v))) => {
                Ok(Resolved::Integer(if *v == 0 { default } else { *v }))
            }
            (ParamKind::Integer(_), Some(_)) => Err(mismatch(name, "an integer")),

            (ParamKind::Flag(default), None) => Ok(Resolved::Flag(default)),
            (ParamKind::Flag(default), Some(ParamValue::Boolean(v))) => {
                Ok(Resolved::Flag(*v || default))
            }
            (ParamKind::Flag(_), Some(_)) => Err(mismatch(name, "a boolean")),

            (ParamKind::Reals, None) => Ok(Resolved::Reals(Vec::new())),
            (ParamKind::Reals, Some(ParamValue::Reals(v))) => Ok(Resolved::Reals(v.clone())),
            (ParamKind::Reals, Some(ParamValue::Integers(v))) => {
                Ok(Resolved::Reals(v.iter().map(|&i| i as f64).collect()))
            }
            (ParamKind::Reals, Some(_)) => Err(mismatch(name, "a list of real numbers")),

            (ParamKind::Indices, None) => Ok(Resolved::Indices(Vec::new())),
            (ParamKind::Indices, Some(ParamValue::Integers(v))) => v
                .iter()
                .map(|&i| {
                    u32::try_from(i).map_err(|_| ParamError::OutOfRange {
                        name,
                        message: format!("contains {}, expected 0..={}", i, u32::MAX),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Resolved::Indices),
            (ParamKind::Indices, Some(_)) => Err(mismatch(name, "a list of integers")),
        }
    }
}

fn mismatch(name: &'static str, expected: &'static str) -> ParamError {
    ParamError::TypeMismatch { name, expected }
}

fn to_count(name: &'static str, value: i64) -> Result<Resolved, ParamError> {
    u32::try_from(value)
        .map(Resolved::Count)
        .map_err(|_| ParamError::OutOfRange {
            name,
            message: format!("must be between 0 and {}, got {}", u32::MAX, value),
        })
}

/// A parameter value after defaulting.
#[derive(Debug, Clone, PartialEq)]
enum Resolved {
    Real(f64),
    Count(u32),
    Integer(i64),
    Flag(bool),
    Reals(Vec<f64>),
    Indices(Vec<u32>),
}

/// Parameters of one request, resolved against a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParams {
    values: HashMap<&'static str, Resolved>,
}

impl ResolvedParams {
    /// Validates `params` against `schema` and applies defaults.
    ///
    /// # Errors
    ///
    /// Names missing from the schema, wrong value types and negative counts
    /// are rejected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use geometry_service::params::{ParamSpec, ResolvedParams};
    /// use geometry_service::protocol::ParamValue;
    ///
    /// let schema = [ParamSpec::real("width", 1.0)];
    /// let mut params = BTreeMap::new();
    /// params.insert("width".to_string(), ParamValue::Real(0.0));
    ///
    /// let resolved = ResolvedParams::resolve(&schema, &params).unwrap();
    /// assert_eq!(resolved.real("width").unwrap(), 1.0);
    /// ```
    pub fn resolve(
        schema: &[ParamSpec],
        params: &BTreeMap<String, ParamValue>,
    ) -> Result<Self, ParamError> {
        if let Some(unknown) = params
            .keys()
            .find(|name| !schema.iter().any(|spec| spec.name == name.as_str()))
        {
            return Err(ParamError::Unknown {
                name: unknown.clone(),
            });
        }

        let mut values = HashMap::with_capacity(schema.len());
        for spec in schema {
            values.insert(spec.name, spec.resolve(params.get(spec.name))?);
        }
        Ok(Self { values })
    }

    pub fn real(&self, name: &'static str) -> Result<f64, ParamError> {
        match self.values.get(name) {
            Some(Resolved::Real(v)) => Ok(*v),
            _ => Err(ParamError::Undeclared { name }),
        }
    }

    pub fn count(&self, name: &'static str) -> Result<u32, ParamError> {
        match self.values.get(name) {
            Some(Resolved::Count(v)) => Ok(*v),
            _ => Err(ParamError::Undeclared { name }),
        }
    }

    pub fn integer(&self, name: &'static str) -> Result<i64, ParamError> {
        match self.values.get(name) {
            Some(Resolved::Integer(v)) => Ok(*v),
            _ => Err(ParamError::Undeclared { name }),
        }
    }

    pub fn flag(&self, name: &'static str) -> Result<bool, ParamError> {
        match self.values.get(name) {
            Some(Resolved::Flag(v)) => Ok(*v),
            _ => Err(ParamError::Undeclared { name }),
        }
    }

    pub fn reals(&self, name: &'static str) -> Result<&[f64], ParamError> {
        match self.values.get(name) {
            Some(Resolved::Reals(v)) => Ok(v.as_slice()),
            _ => Err(ParamError::Undeclared { name }),
        }
    }

    pub fn indices(&self, name: &'static str) -> Result<&[u32], ParamError> {
        match self.values.get(name) {
            Some(Resolved::Indices(v)) => Ok(v.as_slice()),
            _ => Err(ParamError::Undeclared { name }),
        }
    }
}
