//! Twisted Edwards curve gadgets.
//!
//! Division never happens in-circuit: the addition law's quotients are
//! allocated as witnesses and bound by the multiplicative relation
//! `x3 · (1 + d·x1x2y1y2) = x1y2 + y1x2` (and its y counterpart). Witness
//! closures compute the field inverses natively, off the constrained path.

use ark_bn254::Fr;
use ark_ed_on_bn254::EdwardsAffine;
use ark_ff::{Field, One};
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use super::{coeff_a, coeff_d, is_on_curve, point_add_native};

/// An affine curve point as a pair of field variables.
#[derive(Clone)]
pub struct PointVar {
    pub x: FpVar<Fr>,
    pub y: FpVar<Fr>,
}

impl PointVar {
    pub fn constant(p: EdwardsAffine) -> Self {
        Self {
            x: FpVar::constant(p.x),
            y: FpVar::constant(p.y),
        }
    }

    /// The curve's neutral element (0, 1).
    ///
    /// This is the seed of every multiplication ladder; a wrong identity
    /// here would produce internally consistent but wrong results that no
    /// in-circuit invariant catches.
    pub fn identity() -> Self {
        Self {
            x: FpVar::zero(),
            y: FpVar::one(),
        }
    }

    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        f: impl FnOnce() -> Result<EdwardsAffine, SynthesisError>,
    ) -> Result<Self, SynthesisError> {
        let point = f();
        let x = FpVar::new_witness(cs.clone(), || {
            point
                .as_ref()
                .map(|p| p.x)
                .map_err(|_| SynthesisError::AssignmentMissing)
        })?;
        let y = FpVar::new_witness(cs, || {
            point
                .as_ref()
                .map(|p| p.y)
                .map_err(|_| SynthesisError::AssignmentMissing)
        })?;
        Ok(Self { x, y })
    }

    pub fn value(&self) -> Result<EdwardsAffine, SynthesisError> {
        Ok(EdwardsAffine::new_unchecked(
            self.x.value()?,
            self.y.value()?,
        ))
    }

    pub fn enforce_equal(&self, other: &Self) -> Result<(), SynthesisError> {
        self.x.enforce_equal(&other.x)?;
        self.y.enforce_equal(&other.y)
    }
}

/// Constrain (x, y) to satisfy `a·x² + y² = 1 + d·x²·y²`.
pub fn enforce_on_curve(p: &PointVar) -> Result<(), SynthesisError> {
    if matches!(p.x.cs().or(p.y.cs()), ConstraintSystemRef::None) {
        // Circuit constant; fold the membership check natively.
        return if is_on_curve(p.x.value()?, p.y.value()?) {
            Ok(())
        } else {
            Err(SynthesisError::Unsatisfiable)
        };
    }
    let xx = p.x.square()?;
    let yy = p.y.square()?;
    let dxxyy = &(&xx * coeff_d()) * &yy;
    let lhs = &xx * coeff_a() + &yy;
    let rhs = FpVar::one() + &dxxyy;
    lhs.enforce_equal(&rhs)
}

/// Complete twisted Edwards addition:
///
/// ```text
/// x3 = (x1·y2 + y1·x2) / (1 + d·x1·x2·y1·y2)
/// y3 = (y1·y2 − a·x1·x2) / (1 − d·x1·x2·y1·y2)
/// ```
pub fn point_add(p1: &PointVar, p2: &PointVar) -> Result<PointVar, SynthesisError> {
    let cs = p1.x.cs().or(p2.x.cs()).or(p1.y.cs()).or(p2.y.cs());
    if matches!(cs, ConstraintSystemRef::None) {
        // Both operands are circuit constants; fold the addition natively.
        return Ok(PointVar::constant(point_add_native(
            &p1.value()?,
            &p2.value()?,
        )));
    }

    let x1y2 = &p1.x * &p2.y;
    let y1x2 = &p1.y * &p2.x;
    let x1x2 = &p1.x * &p2.x;
    let y1y2 = &p1.y * &p2.y;
    let x1x2y1y2 = &x1x2 * &y1y2;
    let dt = &x1x2y1y2 * coeff_d();
    let ax1x2 = &x1x2 * coeff_a();

    let x3 = FpVar::new_witness(cs.clone(), || {
        let num = x1y2.value()? + y1x2.value()?;
        let den = Fr::one() + dt.value()?;
        Ok(num * den.inverse().ok_or(SynthesisError::DivisionByZero)?)
    })?;
    let y3 = FpVar::new_witness(cs, || {
        let num = y1y2.value()? - ax1x2.value()?;
        let den = Fr::one() - dt.value()?;
        Ok(num * den.inverse().ok_or(SynthesisError::DivisionByZero)?)
    })?;

    (FpVar::one() + &dt).mul_equals(&x3, &(&x1y2 + &y1x2))?;
    (FpVar::one() - &dt).mul_equals(&y3, &(&y1y2 - &ax1x2))?;

    Ok(PointVar { x: x3, y: y3 })
}

/// Add `p2` when `can_add` is set, the identity (0, 1) otherwise.
///
/// The addend is blended coordinate-wise with the identity; the `Boolean`
/// type carries the bitness of the selector and its complement.
pub fn conditional_point_add(
    p1: &PointVar,
    p2: &PointVar,
    can_add: &Boolean<Fr>,
) -> Result<PointVar, SynthesisError> {
    let b = FpVar::from(can_add.clone());
    let x_to_add = &p2.x * &b;
    let y_blend = &p2.y * &b;
    let y_to_add = &y_blend + FpVar::one() - &b;
    point_add(
        p1,
        &PointVar {
            x: x_to_add,
            y: y_to_add,
        },
    )
}

/// Constant-shape double-and-add scalar multiplication.
///
/// Bits are MSB-first. Returns the running value after every bit, one
/// `PointVar` per bit position; the last entry is the full product. Every
/// bit is processed identically whatever its value, so the circuit shape
/// leaks nothing about the scalar.
pub fn point_mul(base: &PointVar, bits: &[Boolean<Fr>]) -> Result<Vec<PointVar>, SynthesisError> {
    assert!(!bits.is_empty(), "scalar bit array must be non-empty");
    let mut acc = PointVar::identity();
    let mut partials = Vec::with_capacity(bits.len());
    for bit in bits {
        let doubled = point_add(&acc, &acc)?;
        acc = conditional_point_add(&doubled, base, bit)?;
        partials.push(acc.clone());
    }
    Ok(partials)
}
