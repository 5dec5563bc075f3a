//! Elementary Clifford gates and measurements.
//!
//! Gates are addressed by plain `usize` qubit indices. Whether an index refers
//! to a logical qubit of a [`Network`][crate::network::Network] or to a
//! physical slot of the gadgetized register depends on where the gate lives.

use std::fmt;
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CircuitError {
    /// Returned when reading a tagged gate with an unrecognized tag.
    #[error("unknown gate tag {0:?}")]
    UnknownGate(String),

    /// Returned when a tagged gate carries the wrong number of operands.
    #[error("gate {tag} takes {expected} operand(s), but got {found}")]
    GateArity { tag: String, expected: usize, found: usize },

    /// Returned when a two-qubit gate names the same qubit twice.
    #[error("gate {0} acts twice on qubit {1}")]
    RepeatedQubit(String, usize),
}
pub type CircuitResult<T> = Result<T, CircuitError>;

/// An elementary gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard.
    H(usize),
    /// π/2-rotation about *z*.
    S(usize),
    /// π-rotation about *x* on the second qubit, controlled by the first
    /// (CNOT).
    CX(usize, usize),
    /// π-rotation about *z* on the second qubit, controlled by the first.
    ///
    /// This gate is symmetric with respect to its qubits.
    CZ(usize, usize),
    /// Single-qubit *z*-basis measurement: qubit, then measurement ID.
    Meas(usize, usize),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::H(k) => write!(f, "H({})", k),
            Self::S(k) => write!(f, "S({})", k),
            Self::CX(c, t) => write!(f, "CX({}, {})", c, t),
            Self::CZ(a, b) => write!(f, "CZ({}, {})", a, b),
            Self::Meas(k, m) => write!(f, "Meas({} -> m{})", k, m),
        }
    }
}

impl Gate {
    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H(..)) }

    /// Return `true` if `self` is `S`.
    pub fn is_s(&self) -> bool { matches!(self, Self::S(..)) }

    /// Return `true` if `self` is `CX`.
    pub fn is_cx(&self) -> bool { matches!(self, Self::CX(..)) }

    /// Return `true` if `self` is `CZ`.
    pub fn is_cz(&self) -> bool { matches!(self, Self::CZ(..)) }

    /// Return `true` if `self` is `Meas`.
    pub fn is_meas(&self) -> bool { matches!(self, Self::Meas(..)) }

    /// Return the qubits acted on by `self`, in operand order.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Self::H(k) | Self::S(k) | Self::Meas(k, _) => vec![k],
            Self::CX(a, b) | Self::CZ(a, b) => vec![a, b],
        }
    }

    /// Return a copy of `self` with every qubit index passed through `f`.
    ///
    /// Measurement IDs are left unchanged.
    pub fn map_qubits<F>(&self, mut f: F) -> Self
    where F: FnMut(usize) -> usize
    {
        match *self {
            Self::H(k) => Self::H(f(k)),
            Self::S(k) => Self::S(f(k)),
            Self::CX(c, t) => Self::CX(f(c), f(t)),
            Self::CZ(a, b) => Self::CZ(f(a), f(b)),
            Self::Meas(k, m) => Self::Meas(f(k), m),
        }
    }

    /// Read a gate from its tag-and-operands form.
    ///
    /// Accepted tags are `H`, `S`, `CNOT` (or `CX`), `CZ`, and `MEASUREMENT`.
    /// A measurement takes its qubit followed by its measurement ID.
    ///
    /// ```
    /// # use h_gadget::circuit::Gate;
    /// assert_eq!(Gate::from_tagged("CNOT", &[0, 2]).unwrap(), Gate::CX(0, 2));
    /// assert_eq!(Gate::from_tagged("MEASUREMENT", &[3, 1]).unwrap(), Gate::Meas(3, 1));
    /// assert!(Gate::from_tagged("T", &[0]).is_err());
    /// ```
    pub fn from_tagged(tag: &str, operands: &[usize]) -> CircuitResult<Self> {
        let expected =
            match tag {
                "H" | "S" => 1,
                "CNOT" | "CX" | "CZ" | "MEASUREMENT" => 2,
                _ => { return Err(CircuitError::UnknownGate(tag.to_string())); },
            };
        if operands.len() != expected {
            return Err(CircuitError::GateArity {
                tag: tag.to_string(),
                expected,
                found: operands.len(),
            });
        }
        let gate =
            match tag {
                "H" => Self::H(operands[0]),
                "S" => Self::S(operands[0]),
                "CNOT" | "CX" => Self::CX(operands[0], operands[1]),
                "CZ" => Self::CZ(operands[0], operands[1]),
                "MEASUREMENT" => Self::Meas(operands[0], operands[1]),
                _ => unreachable!(),
            };
        match gate {
            Self::CX(a, b) | Self::CZ(a, b) if a == b =>
                Err(CircuitError::RepeatedQubit(tag.to_string(), a)),
            _ => Ok(gate),
        }
    }

    /// Convert to tag-and-operands form, the inverse of
    /// [`from_tagged`][Self::from_tagged].
    pub fn to_tagged(&self) -> (&'static str, Vec<usize>) {
        match *self {
            Self::H(k) => ("H", vec![k]),
            Self::S(k) => ("S", vec![k]),
            Self::CX(c, t) => ("CNOT", vec![c, t]),
            Self::CZ(a, b) => ("CZ", vec![a, b]),
            Self::Meas(k, m) => ("MEASUREMENT", vec![k, m]),
        }
    }
}

/// Format a gate sequence as a comma-separated list.
pub fn format_gates(gates: &[Gate]) -> String {
    format!("[{}]", gates.iter().join(", "))
}

/// Count the `CX` gates in a sequence.
pub fn cx_count(gates: &[Gate]) -> usize {
    gates.iter().filter(|g| g.is_cx()).count()
}

/// Compute the `CX` depth of a sequence, i.e. the length of the longest chain
/// of `CX` gates in which consecutive members share a qubit.
pub fn cx_depth(gates: &[Gate]) -> usize {
    let n
        = gates.iter()
        .flat_map(|g| g.qubits())
        .max()
        .map(|k| k + 1)
        .unwrap_or(0);
    let mut depths: Vec<usize> = vec![0; n];
    for gate in gates.iter() {
        if let Gate::CX(c, t) = *gate {
            let d = depths[c].max(depths[t]) + 1;
            depths[c] = d;
            depths[t] = d;
        }
    }
    depths.into_iter().max().unwrap_or(0)
}
