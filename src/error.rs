//! Error types for the engine and the backing store.
//!
//! Every variant is a programming-contract violation rather than a
//! recoverable runtime condition: callers are expected to validate inputs
//! before invoking the engine, and none of these should be retried.

use thiserror::Error;

use crate::store::store::{GroupId, ObjectId};

/// Unified error type for engine, store, and vector-algebra operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Folding an empty collection (`Vector::solve`, `Force::solve`)
    #[error("cannot fold an empty collection")]
    EmptySolve,

    /// Combining two forces scoped to different fields
    #[error("forces belong to different fields: {left} vs {right}")]
    FieldMismatch { left: GroupId, right: GroupId },

    /// Division by a zero scalar or zero vector component
    #[error("division by zero")]
    ZeroDivision,

    /// Square root of a negative scalar
    #[error("square root of a negative scalar")]
    NegativeRadicand,

    /// A float literal that has no decimal representation (NaN, infinity)
    #[error("scalar {0} is not a finite number")]
    NonFiniteScalar(f64),

    /// A string that does not parse as a decimal
    #[error("invalid decimal literal: {0}")]
    InvalidDecimal(#[from] bigdecimal::ParseBigDecimalError),

    /// A particle whose per-field force magnitude is zero must not
    /// participate in that field
    #[error("zero force magnitude for field {field}")]
    ZeroMagnitude { field: GroupId },

    /// Zero rest mass passed to a preset ensemble constructor
    #[error("ensemble rest mass must be nonzero")]
    ZeroMass,

    /// Kinematic degrees are 1-based; degree 0 does not exist
    #[error("kinematic degree must be at least 1, got {0}")]
    DegreeOutOfRange(usize),

    /// Mutating operation addressed an object id not present in the store
    #[error("unknown object id {0}")]
    UnknownObject(ObjectId),

    /// Mutating operation addressed a group id not present in the store
    #[error("unknown group id {0}")]
    UnknownGroup(GroupId),

    /// Detaching a group the object was never attached to
    #[error("object {object} is not a member of group {group}")]
    NotAMember { object: ObjectId, group: GroupId },

    /// An ensemble used with a field it carries no force for
    #[error("ensemble {ensemble} carries no force for field {field}")]
    MissingForce { ensemble: GroupId, field: GroupId },

    /// A scenario referenced a field or ensemble name that was never registered
    #[error("no registered field or ensemble named '{0}'")]
    UnknownName(String),
}

/// Result alias used across the crate
pub type EngineResult<T> = Result<T, EngineError>;
