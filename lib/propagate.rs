//! Forward propagation of measurement byproducts.
//!
//! When an `H` gate is replaced by a gadget, the measured outcome *m* leaves a
//! byproduct *X*<sup>*m*</sup> on the fresh ancilla. Rather than correcting it
//! on the spot, the byproduct is pushed forward through the rest of the
//! network: every later rotation whose axis anticommutes with the propagated
//! operator has its angle negated when *m* = 1, and whatever operator remains
//! at the end is reported as a final Pauli correction.
//!
//! Propagation happens on the physical register, so later `H` gates are
//! followed the way the gadgetizer will place them: the factor on the retired
//! slot is conjugated by `H` and moves onto the next fresh ancilla.

use crate::{
    circuit::Gate,
    gadget::{ GadgetError, GadgetResult },
    network::Network,
    pauli::{ Letter, Pauli, PauliError },
    register::Register,
};

/// Output of [`propagate_x_correction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Propagation {
    /// Indices of the network steps whose rotation must be flipped, in
    /// increasing order. Always begins with the starting step.
    pub flips: Vec<usize>,
    /// The byproduct after the whole network, on the physical register.
    pub correction: Pauli,
}

/// Propagate an *X* byproduct on physical slot `target` forward from the gate
/// at position `offset` in the piece of step `start`.
///
/// `register` must describe the physical register just after the gadget was
/// placed, i.e. with `target` already holding the gadgetized logical qubit.
/// The register is not modified; later relocations are tracked on a private
/// copy.
///
/// The starting step is always reported as flipped, because its rotation acts
/// on the qubit just taken out of the Hadamard frame.
pub fn propagate_x_correction(
    network: &Network,
    start: usize,
    offset: usize,
    target: usize,
    register: &Register,
) -> GadgetResult<Propagation>
{
    let width = register.width();
    if target >= width {
        return Err(PauliError::QubitOutOfRange(target, width).into());
    }
    let first
        = network.get(start)
        .ok_or(GadgetError::StepOutOfRange(start, network.len()))?;
    let mut correction = Pauli::single(width, target, Letter::X);
    let mut frame = register.clone();
    let mut flips: Vec<usize> = vec![start];

    let tail = first.piece.get(offset + 1..).unwrap_or(&[]);
    push_through(&mut correction, tail, start, &mut frame)?;

    for (index, step) in network.steps().iter().enumerate().skip(start + 1) {
        push_through(&mut correction, &step.piece, index, &mut frame)?;
        let axis
            = frame.map().scatter_pauli(&step.axis, width)
            .ok_or(GadgetError::MalformedRotation {
                step: index,
                expected: frame.map().len(),
                found: step.axis.len(),
            })?;
        if !axis.commutes(&correction) { flips.push(index); }
    }
    Ok(Propagation { flips, correction })
}

// conjugate `correction` by logical `gates`, placing them physically as the
// gadgetizer would
fn push_through(
    correction: &mut Pauli,
    gates: &[Gate],
    step: usize,
    frame: &mut Register,
) -> GadgetResult<()>
{
    let n = frame.map().len();
    for gate in gates.iter() {
        if gate.qubits().into_iter().any(|k| k >= n) {
            return Err(GadgetError::QubitOutOfRange {
                step,
                gate: *gate,
                width: n,
            });
        }
        if let Gate::H(k) = *gate {
            let (retired, fresh)
                = frame.relocate(k)
                .ok_or(GadgetError::RegisterFull(frame.width()))?;
            correction.conjugate_with_gate(&Gate::H(retired))?;
            correction.relocate(retired, fresh)?;
        } else {
            let placed = gate.map_qubits(|k| frame.map().get(k));
            correction.conjugate_with_gate(&placed)?;
        }
    }
    Ok(())
}
