//! Phase polynomials and CNOT folding.
//!
//! The middle stage of a gadgetized network is a stream of diagonal rotations
//! interleaved with `CX`, `S`, and `CZ` gates. Conjugating a diagonal rotation
//! with support vector **s** by `CX(c, t)` gives another diagonal rotation,
//! with **s**<sub>*c*</sub> ← **s**<sub>*c*</sub> ⊕ **s**<sub>*t*</sub>. Hence
//! every `CX` can be moved in front of all rotations preceding it in the
//! stream by rewriting their supports, while `S` and `CZ` commute with
//! diagonal rotations outright.
//!
//! [`simplify`] does this in a single front-to-back pass. The result is a
//! [`PhasePolynomial`] whose rotations all commute with each other, and a
//! residual Clifford circuit to be applied *before* them.

use std::fmt;
use log::trace;
use ndarray as nd;
use thiserror::Error;
use crate::{
    circuit::Gate,
    pauli::Letter,
};

#[derive(Debug, Error)]
pub enum PolyError {
    /// Returned when a rotation reaching the simplifier has an `X` or `Y`
    /// factor.
    #[error("rotation {rotation} is not diagonal: found {letter} on qubit {qubit}")]
    RotationNotDiagonal { rotation: usize, qubit: usize, letter: Letter },

    /// Returned when a rotation's length differs from the register width.
    #[error("rotation {rotation} spans {found} qubit(s), but the register has {expected}")]
    WidthMismatch { rotation: usize, expected: usize, found: usize },

    /// Returned when a gate acts outside the register.
    #[error("gate {0} acts outside a {1}-qubit register")]
    QubitOutOfRange(Gate, usize),

    #[error("shape error: {0}")]
    ShapeError(#[from] nd::ShapeError),
}
pub type PolyResult<T> = Result<T, PolyError>;

/// A rotation as emitted by the gadgetizer, before folding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRotation {
    /// Rotation axis over the physical register.
    pub axis: Vec<Letter>,
    /// IDs of the measurements whose outcomes flip the rotation angle.
    pub flips: Vec<usize>,
    /// Phase-parity flag: `true` if the rotation angle is negated.
    pub sign: bool,
}

/// An element of a raw phase-polynomial stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolyOp {
    /// A Clifford gate.
    Gate(Gate),
    /// A diagonal rotation.
    Rotation(RawRotation),
}

impl PolyOp {
    /// Return `true` if `self` is `Gate`.
    pub fn is_gate(&self) -> bool { matches!(self, Self::Gate(_)) }

    /// Return `true` if `self` is `Rotation`.
    pub fn is_rotation(&self) -> bool { matches!(self, Self::Rotation(_)) }
}

impl From<Gate> for PolyOp {
    fn from(gate: Gate) -> Self { Self::Gate(gate) }
}

impl From<RawRotation> for PolyOp {
    fn from(rot: RawRotation) -> Self { Self::Rotation(rot) }
}

/// A single term of a [`PhasePolynomial`].
#[derive(Clone, Debug)]
pub struct Term<'a> {
    /// *Z*-support over the physical register.
    pub support: nd::ArrayView1<'a, bool>,
    /// IDs of the measurements whose outcomes flip the rotation angle.
    pub flips: &'a [usize],
    /// Phase-parity flag.
    pub sign: bool,
}

impl<'a> Term<'a> {
    /// Return the indices of all qubits in the support.
    pub fn qubits(&self) -> Vec<usize> {
        self.support.iter().enumerate()
            .filter_map(|(k, b)| b.then_some(k))
            .collect()
    }

    /// Return the effective phase parity under a given assignment of
    /// measurement outcomes, indexed by measurement ID.
    ///
    /// *Panics if `outcomes` does not cover every flipping measurement.*
    pub fn parity(&self, outcomes: &[bool]) -> bool {
        self.flips.iter().fold(self.sign, |acc, m| acc ^ outcomes[*m])
    }
}

/// An ordered list of diagonal rotations, each described by a *Z*-support
/// vector, a list of flipping measurements, and a phase-parity flag.
///
/// Supports are stored as the rows of a boolean matrix with one column per
/// physical qubit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhasePolynomial {
    table: nd::Array2<bool>,
    flips: Vec<Vec<usize>>,
    signs: Vec<bool>,
}

impl PhasePolynomial {
    /// Create a new, empty phase polynomial over `width` qubits.
    pub fn new(width: usize) -> Self {
        Self {
            table: nd::Array2::from_elem((0, width), false),
            flips: Vec::new(),
            signs: Vec::new(),
        }
    }

    /// Return the number of qubits.
    pub fn width(&self) -> usize { self.table.ncols() }

    /// Return the number of rotations.
    pub fn len(&self) -> usize { self.signs.len() }

    /// Return `true` if `self` has no rotations.
    pub fn is_empty(&self) -> bool { self.signs.is_empty() }

    /// Return the support table, one row per rotation.
    pub fn table(&self) -> nd::ArrayView2<'_, bool> { self.table.view() }

    /// Append a rotation.
    pub fn push(&mut self, support: &[bool], flips: Vec<usize>, sign: bool)
        -> PolyResult<()>
    {
        self.table.push_row(nd::ArrayView1::from(support))?;
        self.flips.push(flips);
        self.signs.push(sign);
        Ok(())
    }

    /// Fold `CX(c, t)` into every rotation held so far, as if the gate were
    /// moved from after them to before them.
    ///
    /// *Panics if `c` or `t` is out of range.*
    pub fn fold_cx(&mut self, c: usize, t: usize) {
        for mut row in self.table.rows_mut() {
            let bit = row[t];
            row[c] ^= bit;
        }
    }

    /// Return the `k`-th rotation, if it exists.
    pub fn get(&self, k: usize) -> Option<Term<'_>> {
        (k < self.len()).then(|| Term {
            support: self.table.row(k),
            flips: &self.flips[k],
            sign: self.signs[k],
        })
    }

    /// Return an iterator over all rotations, in order.
    pub fn iter(&self) -> impl Iterator<Item = Term<'_>> + '_ {
        (0..self.len()).filter_map(|k| self.get(k))
    }

    /// Convert back into a stream of [`PolyOp`]s, each rotation written with
    /// `Z` and `I` letters. The stream contains no gates.
    pub fn to_stream(&self) -> Vec<PolyOp> {
        self.iter()
            .map(|term| {
                let axis: Vec<Letter>
                    = term.support.iter()
                    .map(|b| if *b { Letter::Z } else { Letter::I })
                    .collect();
                RawRotation {
                    axis,
                    flips: term.flips.to_vec(),
                    sign: term.sign,
                }.into()
            })
            .collect()
    }
}

impl fmt::Display for PhasePolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, term) in self.iter().enumerate() {
            if k > 0 { writeln!(f)?; }
            for b in term.support.iter() {
                write!(f, "{}", if *b { 'Z' } else { 'I' })?;
            }
            write!(f, " {} {:?}", if term.sign { '-' } else { '+' }, term.flips)?;
        }
        Ok(())
    }
}

/// Fold every `CX` gate in a raw stream over `width` qubits into the rotations
/// preceding it, returning the resulting phase polynomial and the residual
/// Clifford circuit.
///
/// Gates appear in the residual circuit in stream order; `CX` gates are kept
/// there after being folded. The full operation is the residual circuit
/// followed by the phase polynomial.
///
/// ```
/// # use h_gadget::{ circuit::Gate, pauli::Letter::*, phasepoly::* };
/// let stream = vec![
///     RawRotation { axis: vec![I, Z], flips: vec![], sign: false }.into(),
///     Gate::CX(0, 1).into(),
///     RawRotation { axis: vec![Z, I], flips: vec![0], sign: true }.into(),
/// ];
/// let (poly, clifford) = simplify(&stream, 2).unwrap();
/// assert_eq!(poly.get(0).unwrap().qubits(), vec![0, 1]);
/// assert_eq!(poly.get(1).unwrap().qubits(), vec![0]);
/// assert_eq!(clifford, vec![Gate::CX(0, 1)]);
/// ```
pub fn simplify(stream: &[PolyOp], width: usize)
    -> PolyResult<(PhasePolynomial, Vec<Gate>)>
{
    let mut poly = PhasePolynomial::new(width);
    let mut clifford: Vec<Gate> = Vec::new();
    for op in stream.iter() {
        match op {
            PolyOp::Rotation(rot) => {
                let rotation = poly.len();
                if rot.axis.len() != width {
                    return Err(PolyError::WidthMismatch {
                        rotation,
                        expected: width,
                        found: rot.axis.len(),
                    });
                }
                let support: Vec<bool>
                    = rot.axis.iter().enumerate()
                    .map(|(qubit, letter)| {
                        match letter {
                            Letter::I => Ok(false),
                            Letter::Z => Ok(true),
                            _ => Err(PolyError::RotationNotDiagonal {
                                rotation,
                                qubit,
                                letter: *letter,
                            }),
                        }
                    })
                    .collect::<PolyResult<_>>()?;
                poly.push(&support, rot.flips.clone(), rot.sign)?;
            },
            PolyOp::Gate(gate) => {
                if gate.qubits().into_iter().any(|k| k >= width) {
                    return Err(PolyError::QubitOutOfRange(*gate, width));
                }
                if let Gate::CX(c, t) = *gate {
                    trace!("fold {} into {} rotation(s)", gate, poly.len());
                    poly.fold_cx(c, t);
                }
                clifford.push(*gate);
            },
        }
    }
    Ok((poly, clifford))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Letter::*;

    fn rot(axis: &[Letter], flips: &[usize], sign: bool) -> PolyOp {
        RawRotation { axis: axis.to_vec(), flips: flips.to_vec(), sign }.into()
    }

    fn supports(poly: &PhasePolynomial) -> Vec<Vec<usize>> {
        poly.iter().map(|t| t.qubits()).collect()
    }

    #[test]
    fn pass_through() {
        let stream = vec![
            Gate::S(0).into(),
            rot(&[Z, Z, I], &[], false),
            Gate::CZ(1, 2).into(),
            rot(&[I, Z, Z], &[1], true),
            Gate::S(2).into(),
        ];
        let (poly, clifford) = simplify(&stream, 3).unwrap();
        assert_eq!(supports(&poly), vec![vec![0, 1], vec![1, 2]]);
        assert_eq!(clifford, vec![Gate::S(0), Gate::CZ(1, 2), Gate::S(2)]);
        let t = poly.get(1).unwrap();
        assert_eq!(t.flips, &[1]);
        assert!(t.sign);
        assert!(poly.get(2).is_none());
    }

    #[test]
    fn cx_folds_backward_only() {
        let stream = vec![
            rot(&[I, Z, I], &[], false),
            rot(&[Z, I, I], &[], false),
            Gate::CX(0, 1).into(),
            rot(&[I, Z, I], &[], false),
            Gate::CX(2, 0).into(),
        ];
        let (poly, clifford) = simplify(&stream, 3).unwrap();
        // CX(0, 1): Z1 -> Z0 Z1, Z0 -> Z0
        // CX(2, 0): Z0 -> Z0 Z2, Z1 -> Z1
        assert_eq!(
            supports(&poly),
            vec![vec![0, 1, 2], vec![0, 2], vec![1]]
        );
        assert_eq!(clifford, vec![Gate::CX(0, 1), Gate::CX(2, 0)]);
    }

    #[test]
    fn idempotent() {
        let stream = vec![
            rot(&[Z, I, Z], &[0], false),
            Gate::CX(1, 2).into(),
            rot(&[I, Z, Z], &[0, 1], true),
            Gate::CZ(0, 1).into(),
            Gate::CX(0, 2).into(),
        ];
        let (poly, _) = simplify(&stream, 3).unwrap();
        let (again, clifford) = simplify(&poly.to_stream(), 3).unwrap();
        assert_eq!(again, poly);
        assert!(clifford.is_empty());
        assert!(poly.to_stream().iter().all(PolyOp::is_rotation));
    }

    #[test]
    fn parity() {
        let mut poly = PhasePolynomial::new(2);
        poly.push(&[true, true], vec![0, 2], true).unwrap();
        let t = poly.get(0).unwrap();
        assert!(t.parity(&[false, true, false]));
        assert!(!t.parity(&[true, false, false]));
        assert!(t.parity(&[true, false, true]));
    }

    #[test]
    fn errors() {
        assert!(matches!(
            simplify(&[rot(&[Z, X], &[], false)], 2),
            Err(PolyError::RotationNotDiagonal { rotation: 0, qubit: 1, letter: X })
        ));
        assert!(matches!(
            simplify(&[rot(&[Z, Z], &[], false), rot(&[Y, I], &[], false)], 2),
            Err(PolyError::RotationNotDiagonal { rotation: 1, qubit: 0, letter: Y })
        ));
        assert!(matches!(
            simplify(&[rot(&[Z], &[], false)], 2),
            Err(PolyError::WidthMismatch { expected: 2, found: 1, .. })
        ));
        assert!(matches!(
            simplify(&[Gate::CX(0, 3).into()], 2),
            Err(PolyError::QubitOutOfRange(Gate::CX(0, 3), 2))
        ));
    }

    #[test]
    fn display() {
        let stream = vec![
            rot(&[Z, I], &[], false),
            rot(&[Z, Z], &[0, 1], true),
        ];
        let (poly, _) = simplify(&stream, 2).unwrap();
        assert_eq!(poly.to_string(), "ZI + []\nZZ - [0, 1]");
    }
}
