//! Arbitrary-precision scalars and the broadcasting vector algebra.
//!
//! Defines the numeric foundation of the engine:
//! - `Scalar`    – decimal scalar (`bigdecimal::BigDecimal`)
//! - `Precision` – explicit rounding context threaded through every
//!   operation that rounds (division, square root, series coefficients)
//! - `Tensor`    – scalar-or-vector operand
//! - `Vector`    – variable-length tuple with elementwise arithmetic
//!
//! Operations between vectors of different length treat the shorter one as
//! zero-padded; a scalar operand broadcasts to the left operand's length.
//! Addition, subtraction, and multiplication are exact in decimal
//! arithmetic, so only the rounding operations take a `Precision`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, One, Zero};

use crate::error::{EngineError, EngineResult};

/// Decimal scalar used for every position, velocity, and force value
pub type Scalar = BigDecimal;

/// Normalize a float literal to an exact decimal via its shortest
/// round-trip string form, so `0.1` becomes the decimal `0.1` rather than
/// the nearest binary fraction
pub fn decimalize(value: f64) -> EngineResult<Scalar> {
    if !value.is_finite() {
        return Err(EngineError::NonFiniteScalar(value));
    }
    Ok(Scalar::from_str(&value.to_string())?)
}

/// Exact integer power of a scalar by repeated squaring
pub(crate) fn scalar_powi(base: &Scalar, exponent: u32) -> Scalar {
    let mut result = Scalar::one();
    let mut factor = base.clone();
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = &result * &factor;
        }
        factor = &factor * &factor;
        remaining >>= 1;
    }
    result
}

fn factorial(i: u32) -> Scalar {
    let mut product = Scalar::one();
    for k in 2..=i {
        product = product * Scalar::from(k);
    }
    product
}

/// Number of significant decimal digits kept by rounding operations.
///
/// Constructed once with the engine and passed explicitly wherever a
/// division or square root happens; there is no process-wide context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision(u64);

impl Precision {
    pub fn new(digits: u64) -> Self {
        Self(digits.max(1))
    }

    pub fn digits(&self) -> u64 {
        self.0
    }

    /// Round a scalar to this precision
    pub fn round(&self, scalar: Scalar) -> Scalar {
        scalar.with_prec(self.0)
    }

    /// Divide, rounding the quotient to this precision
    pub fn div(&self, numerator: &Scalar, denominator: &Scalar) -> EngineResult<Scalar> {
        if denominator.is_zero() {
            return Err(EngineError::ZeroDivision);
        }
        Ok((numerator / denominator).with_prec(self.0))
    }

    /// Square root rounded to this precision
    pub fn sqrt(&self, scalar: &Scalar) -> EngineResult<Scalar> {
        scalar
            .sqrt()
            .map(|root| root.with_prec(self.0))
            .ok_or(EngineError::NegativeRadicand)
    }

    /// The Taylor coefficient `1 / i!` rounded to this precision
    pub fn inv_factorial(&self, i: u32) -> Scalar {
        (Scalar::one() / factorial(i)).with_prec(self.0)
    }
}

impl Default for Precision {
    fn default() -> Self {
        // matches the engine's default decimal context width
        Self(50)
    }
}

/// A scalar-or-vector operand. Force centers and arithmetic right-hand
/// sides may be either shape
#[derive(Debug, Clone, PartialEq)]
pub enum Tensor {
    Scalar(Scalar),
    Vector(Vector),
}

impl Tensor {
    pub fn from_f64(value: f64) -> EngineResult<Self> {
        Ok(Tensor::Scalar(decimalize(value)?))
    }

    /// Multiply by a scalar factor, preserving shape
    pub fn scale(&self, factor: &Scalar) -> Tensor {
        match self {
            Tensor::Scalar(scalar) => Tensor::Scalar(scalar * factor),
            Tensor::Vector(vector) => vector.mul(&Tensor::Scalar(factor.clone())).into(),
        }
    }

    /// Elementwise addition; a scalar broadcasts over a vector operand
    pub fn add(&self, other: &Tensor) -> Tensor {
        match (self, other) {
            (Tensor::Scalar(left), Tensor::Scalar(right)) => Tensor::Scalar(left + right),
            (Tensor::Scalar(_), Tensor::Vector(vector)) => vector.add(self).into(),
            (Tensor::Vector(vector), _) => vector.add(other).into(),
        }
    }

    /// Divide every component by a scalar, rounding to `precision`
    pub fn div_scalar(&self, denominator: &Scalar, precision: Precision) -> EngineResult<Tensor> {
        match self {
            Tensor::Scalar(scalar) => Ok(Tensor::Scalar(precision.div(scalar, denominator)?)),
            Tensor::Vector(vector) => Ok(vector
                .div(&Tensor::Scalar(denominator.clone()), precision)?
                .into()),
        }
    }
}

impl From<Scalar> for Tensor {
    fn from(scalar: Scalar) -> Self {
        Tensor::Scalar(scalar)
    }
}

impl From<Vector> for Tensor {
    fn from(vector: Vector) -> Self {
        Tensor::Vector(vector)
    }
}

/// Fixed/variable-length tuple of decimal scalars
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    components: Vec<Scalar>,
}

impl Vector {
    pub fn new(components: Vec<Scalar>) -> Self {
        Self { components }
    }

    /// The zero-dimensional vector; zero-padding makes it behave as zero
    /// against any operand
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Build from float literals, normalizing each to an exact decimal
    pub fn from_f64s(values: &[f64]) -> EngineResult<Self> {
        let components = values
            .iter()
            .map(|value| decimalize(*value))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self::new(components))
    }

    /// Same scalar repeated `dimensionality` times
    pub fn fill(scalar: Scalar, dimensionality: usize) -> Self {
        Self::new(vec![scalar; dimensionality])
    }

    pub fn dimensionality(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[Scalar] {
        &self.components
    }

    /// Component at `index`, zero when out of range
    pub fn component(&self, index: usize) -> Scalar {
        self.components.get(index).cloned().unwrap_or_else(Scalar::zero)
    }

    pub fn extend(&mut self, scalars: impl IntoIterator<Item = Scalar>) {
        self.components.extend(scalars);
    }

    /// Zip two vectors elementwise with zero padding on the shorter one;
    /// the result has the longer length
    fn zip_with<F>(&self, other: &Vector, mut op: F) -> Vector
    where
        F: FnMut(&Scalar, &Scalar) -> Scalar,
    {
        let length = self.components.len().max(other.components.len());
        let zero = Scalar::zero();
        let mut output = Vec::with_capacity(length);
        for index in 0..length {
            let left = self.components.get(index).unwrap_or(&zero);
            let right = other.components.get(index).unwrap_or(&zero);
            output.push(op(left, right));
        }
        Vector::new(output)
    }

    fn try_zip_with<F>(&self, other: &Vector, mut op: F) -> EngineResult<Vector>
    where
        F: FnMut(&Scalar, &Scalar) -> EngineResult<Scalar>,
    {
        let length = self.components.len().max(other.components.len());
        let zero = Scalar::zero();
        let mut output = Vec::with_capacity(length);
        for index in 0..length {
            let left = self.components.get(index).unwrap_or(&zero);
            let right = other.components.get(index).unwrap_or(&zero);
            output.push(op(left, right)?);
        }
        Ok(Vector::new(output))
    }

    /// Broadcast a scalar operand to this vector's length
    fn broadcast(&self, operand: &Tensor) -> Vector {
        match operand {
            Tensor::Scalar(scalar) => Vector::fill(scalar.clone(), self.dimensionality()),
            Tensor::Vector(vector) => vector.clone(),
        }
    }

    // ---------------------------------------------------------------------
    // Enumerated operation set: new-value and in-place variants
    // ---------------------------------------------------------------------

    pub fn add(&self, operand: &Tensor) -> Vector {
        self.zip_with(&self.broadcast(operand), |left, right| left + right)
    }

    pub fn add_assign(&mut self, operand: &Tensor) {
        *self = self.add(operand);
    }

    pub fn sub(&self, operand: &Tensor) -> Vector {
        self.zip_with(&self.broadcast(operand), |left, right| left - right)
    }

    pub fn sub_assign(&mut self, operand: &Tensor) {
        *self = self.sub(operand);
    }

    pub fn mul(&self, operand: &Tensor) -> Vector {
        self.zip_with(&self.broadcast(operand), |left, right| left * right)
    }

    pub fn mul_assign(&mut self, operand: &Tensor) {
        *self = self.mul(operand);
    }

    /// Elementwise division, rounded to `precision`. A zero divisor
    /// component (including one produced by zero padding) is an error
    pub fn div(&self, operand: &Tensor, precision: Precision) -> EngineResult<Vector> {
        self.try_zip_with(&self.broadcast(operand), |left, right| {
            precision.div(left, right)
        })
    }

    pub fn div_assign(&mut self, operand: &Tensor, precision: Precision) -> EngineResult<()> {
        *self = self.div(operand, precision)?;
        Ok(())
    }

    /// Elementwise integer power. `x⁰` is 1; negative exponents divide at
    /// the given precision and fail on zero components
    pub fn powi(&self, exponent: i64, precision: Precision) -> EngineResult<Vector> {
        let magnitude = exponent.unsigned_abs() as u32;
        if exponent >= 0 {
            return Ok(Vector::new(
                self.components
                    .iter()
                    .map(|scalar| scalar_powi(scalar, magnitude))
                    .collect(),
            ));
        }
        let one = Scalar::one();
        self.components
            .iter()
            .map(|scalar| precision.div(&one, &scalar_powi(scalar, magnitude)))
            .collect::<EngineResult<Vec<_>>>()
            .map(Vector::new)
    }

    pub fn powi_assign(&mut self, exponent: i64, precision: Precision) -> EngineResult<()> {
        *self = self.powi(exponent, precision)?;
        Ok(())
    }

    pub fn neg(&self) -> Vector {
        Vector::new(self.components.iter().map(|scalar| -scalar).collect())
    }

    pub fn negate(&mut self) {
        *self = self.neg();
    }

    /// Elementwise comparison under the same broadcast and zero-padding
    /// rules as the arithmetic operations
    pub fn cmp_elementwise(&self, operand: &Tensor) -> Vec<Ordering> {
        let other = self.broadcast(operand);
        let length = self.components.len().max(other.components.len());
        let zero = Scalar::zero();
        (0..length)
            .map(|index| {
                let left = self.components.get(index).unwrap_or(&zero);
                let right = other.components.get(index).unwrap_or(&zero);
                left.cmp(right)
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // Folds and norms
    // ---------------------------------------------------------------------

    /// Fold a non-empty list by elementwise addition
    pub fn solve(vectors: &[Vector]) -> EngineResult<Vector> {
        let (first, rest) = vectors.split_first().ok_or(EngineError::EmptySolve)?;
        let mut accumulated = first.clone();
        for vector in rest {
            accumulated.add_assign(&Tensor::Vector(vector.clone()));
        }
        Ok(accumulated)
    }

    /// Euclidean norm, rounded to `precision`
    pub fn magnitude(&self, precision: Precision) -> EngineResult<Scalar> {
        let mut sum = Scalar::zero();
        for scalar in &self.components {
            sum += scalar * scalar;
        }
        precision.sqrt(&sum)
    }

    /// Rescale to a target magnitude. A zero-magnitude vector maps to the
    /// zero vector rather than dividing by zero
    pub fn magnitude_mapping(
        &self,
        to_magnitude: &Scalar,
        precision: Precision,
    ) -> EngineResult<Vector> {
        let from_magnitude = self.magnitude(precision)?;
        let scalar_hat = if from_magnitude.is_zero() {
            Scalar::zero()
        } else {
            precision.div(to_magnitude, &from_magnitude)?
        };
        Ok(self.mul(&Tensor::Scalar(scalar_hat)))
    }

    /// Components as lossy floats for the structural dump boundary
    pub fn dumps(&self) -> Vec<f64> {
        use bigdecimal::ToPrimitive;
        self.components
            .iter()
            .map(|scalar| scalar.to_f64().unwrap_or(f64::NAN))
            .collect()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, scalar) in self.components.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{scalar}")?;
        }
        write!(f, ")")
    }
}
