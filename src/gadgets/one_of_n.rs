//! Set-membership gadget: `our_item ∈ items`.
//!
//! One boolean toggle per set element; the toggles sum to one, and each
//! element is bound by `(items[i] − our_item) · toggles[i] = 0`, so the
//! single raised toggle can only sit on an element equal to ours. Every
//! element gets an identical constraint whatever the witness, keeping the
//! circuit shape independent of which element is selected.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

/// Constrain `our_item` to equal at least one entry of `items`.
pub fn one_of_n(our_item: &FpVar<Fr>, items: &[FpVar<Fr>]) -> Result<(), SynthesisError> {
    assert!(!items.is_empty(), "item set must be non-empty");
    let cs = items
        .iter()
        .fold(our_item.cs(), |acc, item| acc.or(item.cs()));

    // One toggle per item; raised on the first match.
    let mut toggles = Vec::with_capacity(items.len());
    let mut matched = false;
    for item in items {
        let toggle = Boolean::new_witness(cs.clone(), || {
            let hit = !matched && item.value()? == our_item.value()?;
            Ok(hit)
        })?;
        if !matched {
            if let (Ok(item_value), Ok(our_value)) = (item.value(), our_item.value()) {
                matched = item_value == our_value;
            }
        }
        toggles.push(toggle);
    }

    // Exactly one toggle raised.
    let mut sum = FpVar::<Fr>::zero();
    for toggle in &toggles {
        sum += FpVar::from(toggle.clone());
    }
    sum.enforce_equal(&FpVar::one())?;

    // The raised toggle must sit on our item.
    for (item, toggle) in items.iter().zip(&toggles) {
        (item - our_item).mul_equals(&FpVar::from(toggle.clone()), &FpVar::zero())?;
    }
    Ok(())
}
