//! Replacement of `H` gates by measurement-based gadgets.
//!
//! Each `H` gate on logical qubit *q* in a [`Network`] is replaced by:
//!
//! 1. a fresh ancilla *a*, prepared in ∣+⟩ (`H(a)` in the [beginning]
//!    stage);
//! 2. `CZ(p, a)` in the middle stage, where *p* is the slot holding *q*;
//! 3. an *X*-basis measurement of *p* (`H(p)`, `Meas(p, m)` in the [end]
//!    stage);
//!
//! after which *q* lives on *a*. A measurement outcome *m* = 1 leaves an *X*
//! byproduct on *a*, which is [propagated][crate::propagate] through the rest
//! of the network and absorbed into sign flips of later rotations plus a final
//! Pauli correction.
//!
//! Since all measurements are deferred to the end stage, the middle stage is
//! built from `S`, `CX`, `CZ`, and diagonal rotations only, which
//! [`simplify`][crate::phasepoly::simplify] then turns into a phase polynomial
//! and a residual Clifford circuit.
//!
//! [beginning]: RawGadgets::beginning
//! [end]: RawGadgets::end

use std::fmt;
use log::debug;
use thiserror::Error;
use crate::{
    circuit::Gate,
    network::Network,
    pauli::{ Pauli, PauliError },
    phasepoly::{ self, PhasePolynomial, PolyError, PolyOp, RawRotation },
    propagate::{ propagate_x_correction, Propagation },
    register::{ QubitMap, Register },
};

#[derive(Debug, Error)]
pub enum GadgetError {
    /// Returned when gadgetizing a network with no steps.
    #[error("cannot gadgetize an empty network")]
    EmptyNetwork,

    /// Returned when a rotation axis does not match the register width.
    #[error("rotation at step {step} has {found} letter(s), but the register has {expected} qubit(s)")]
    MalformedRotation { step: usize, expected: usize, found: usize },

    /// Returned when a gate in a network piece addresses a qubit outside the
    /// logical register.
    #[error("gate {gate} at step {step} acts outside the {width}-qubit register")]
    QubitOutOfRange { step: usize, gate: Gate, width: usize },

    /// Returned when a network piece contains a gate outside `{H, S, CX}`.
    #[error("gate {gate} at step {step} is not allowed in a network piece")]
    UnsupportedNetworkGate { step: usize, gate: Gate },

    /// Returned when a step index does not exist.
    #[error("step {0} is out of range for a network of {1} step(s)")]
    StepOutOfRange(usize, usize),

    /// Returned when more ancillas are requested than predicted.
    #[error("no free slots left in a register of width {0}")]
    RegisterFull(usize),

    #[error("Pauli error: {0}")]
    PauliError(#[from] PauliError),

    #[error("phase polynomial error: {0}")]
    PolyError(#[from] PolyError),
}
pub type GadgetResult<T> = Result<T, GadgetError>;

/// Final Pauli corrections, indexed by measurement ID.
///
/// The correction for measurement *m* is the byproduct it leaves on the
/// register after the whole network, to be undone if outcome *m* is 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corrections(Vec<Pauli>);

impl Corrections {
    /// Return the number of measurements.
    pub fn len(&self) -> usize { self.0.len() }

    /// Return `true` if there are no measurements.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Return the correction for measurement `id`, if it exists.
    pub fn get(&self, id: usize) -> Option<&Pauli> { self.0.get(id) }

    /// Return an iterator over all corrections, in measurement ID order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pauli> { self.0.iter() }

    /// Return the corrections as letter strings.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|p| p.to_string()).collect()
    }
}

impl fmt::Display for Corrections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, p) in self.0.iter().enumerate() {
            if id > 0 { writeln!(f)?; }
            write!(f, "m{}: {}", id, p)?;
        }
        Ok(())
    }
}

/// Output of [`gadgetize_raw`].
#[derive(Clone, Debug)]
pub struct RawGadgets {
    /// Ancilla preparation.
    pub beginning: Vec<Gate>,
    /// Rotations interleaved with the leftover Clifford gates.
    pub stream: Vec<PolyOp>,
    /// *X*-basis measurements of all retired slots.
    pub end: Vec<Gate>,
    /// Final Pauli correction for each measurement.
    pub corrections: Corrections,
    /// Physical slot of each logical qubit after the network.
    pub layout: QubitMap,
    /// Total number of physical qubits.
    pub width: usize,
}

/// Output of [`gadgetize`].
#[derive(Clone, Debug)]
pub struct Gadgets {
    /// Ancilla preparation.
    pub beginning: Vec<Gate>,
    /// Residual Clifford circuit, applied after `beginning`.
    pub clifford: Vec<Gate>,
    /// Diagonal rotations, applied after `clifford`.
    pub phase_poly: PhasePolynomial,
    /// *X*-basis measurements of all retired slots, applied last.
    pub end: Vec<Gate>,
    /// Final Pauli correction for each measurement.
    pub corrections: Corrections,
    /// Physical slot of each logical qubit after the network.
    pub layout: QubitMap,
    /// Total number of physical qubits.
    pub width: usize,
}

// check every step against the logical register before touching anything
fn validate(network: &Network, n: usize) -> GadgetResult<()> {
    for (step, s) in network.steps().iter().enumerate() {
        if s.axis.len() != n {
            return Err(GadgetError::MalformedRotation {
                step,
                expected: n,
                found: s.axis.len(),
            });
        }
        for gate in s.piece.iter() {
            if gate.is_cz() || gate.is_meas() {
                return Err(GadgetError::UnsupportedNetworkGate {
                    step,
                    gate: *gate,
                });
            }
            if gate.qubits().into_iter().any(|k| k >= n) {
                return Err(GadgetError::QubitOutOfRange {
                    step,
                    gate: *gate,
                    width: n,
                });
            }
        }
    }
    Ok(())
}

/// Replace every `H` gate in `network` with a gadget, without folding `CX`
/// gates into the rotations.
///
/// Rotation *k* of the output stream corresponds to step *k* of the network.
pub fn gadgetize_raw(network: &Network) -> GadgetResult<RawGadgets> {
    let n = network.width().ok_or(GadgetError::EmptyNetwork)?;
    validate(network, n)?;
    let width = n + network.count_h();
    debug!(
        "gadgetizing {} step(s) on {} qubit(s): {} H gate(s), {} physical qubit(s)",
        network.len(), n, width - n, width,
    );

    let mut register = Register::new(n, width);
    let mut flips: Vec<Vec<usize>> = vec![Vec::new(); network.len()];
    let mut beginning: Vec<Gate> = Vec::new();
    let mut stream: Vec<PolyOp> = Vec::new();
    let mut end: Vec<Gate> = Vec::new();
    let mut corrections: Vec<Pauli> = Vec::new();

    for (index, step) in network.steps().iter().enumerate() {
        for (offset, gate) in step.piece.iter().enumerate() {
            if let Gate::H(q) = *gate {
                let (retired, fresh)
                    = register.relocate(q)
                    .ok_or(GadgetError::RegisterFull(width))?;
                let id = register.issue_measurement();
                beginning.push(Gate::H(fresh));
                stream.push(Gate::CZ(retired, fresh).into());
                end.push(Gate::H(retired));
                end.push(Gate::Meas(retired, id));
                let Propagation { flips: to_flip, correction }
                    = propagate_x_correction(
                        network, index, offset, fresh, &register)?;
                debug!(
                    "m{}: H({}) at step {}, slot {} -> {}, flips {:?}, correction {}",
                    id, q, index, retired, fresh, to_flip, correction,
                );
                to_flip.into_iter().for_each(|k| { flips[k].push(id); });
                corrections.push(correction);
            } else {
                let placed = gate.map_qubits(|k| register.map().get(k));
                stream.push(placed.into());
            }
        }
        let axis
            = register.map().scatter(&step.axis, width)
            .ok_or(GadgetError::MalformedRotation {
                step: index,
                expected: n,
                found: step.axis.len(),
            })?;
        let rotation = RawRotation {
            axis,
            flips: std::mem::take(&mut flips[index]),
            sign: step.sign,
        };
        stream.push(rotation.into());
    }

    Ok(RawGadgets {
        beginning,
        stream,
        end,
        corrections: Corrections(corrections),
        layout: register.map,
        width,
    })
}

/// Replace every `H` gate in `network` with a gadget and fold all `CX` gates
/// into the resulting phase polynomial.
///
/// ```
/// # use h_gadget::{ circuit::Gate, network::{ Network, Step }, gadget::gadgetize };
/// // exp(iθ XX) followed by exp(iφ ZZ)
/// let network = Network::new(vec![
///     Step::new([Gate::CX(1, 0), Gate::H(1)], "IZ", false).unwrap(),
///     Step::new(Vec::<Gate>::new(), "ZI", false).unwrap(),
/// ]);
/// let gadgets = gadgetize(&network).unwrap();
/// assert_eq!(gadgets.width, 3);
/// assert_eq!(gadgets.beginning, vec![Gate::H(2)]);
/// assert_eq!(gadgets.end, vec![Gate::H(1), Gate::Meas(1, 0)]);
/// assert_eq!(gadgets.clifford, vec![Gate::CX(1, 0), Gate::CZ(1, 2)]);
/// assert_eq!(gadgets.phase_poly.to_string(), "IIZ + [0]\nZII + []");
/// assert_eq!(gadgets.corrections.to_strings(), vec!["IIX"]);
/// ```
pub fn gadgetize(network: &Network) -> GadgetResult<Gadgets> {
    let RawGadgets { beginning, stream, end, corrections, layout, width }
        = gadgetize_raw(network)?;
    let (phase_poly, clifford) = phasepoly::simplify(&stream, width)?;
    Ok(Gadgets { beginning, clifford, phase_poly, end, corrections, layout, width })
}
