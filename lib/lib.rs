//! This package replaces the Hadamard gates of a Pauli-rotation network with
//! measurement-based gadgets, leaving a circuit made of ancilla preparation,
//! a Clifford + phase-polynomial middle stage, and deferred *X*-basis
//! measurements.
//!
//! - [`pauli`] provides Pauli operators over GF(2) and their conjugation by
//! Clifford gates.
//! - [`circuit`] describes the gate set shared by inputs and outputs.
//! - [`network`] describes the input: a list of [steps][network::Step], each a
//! Clifford piece followed by a diagonal Pauli rotation.
//! - [`gadget`] performs the replacement, tracking ancillas with
//! [`register`] and measurement byproducts with [`propagate`].
//! - [`phasepoly`] folds the resulting `CX` gates into the rotations.
//!
//! A typical pass looks like
//! ```
//! use h_gadget::{ circuit, network::Network };
//!
//! let network = Network::from_tagged(vec![
//!     (vec![("CNOT", vec![1, 0]), ("H", vec![1])], (false, "IZ")),
//!     (vec![], (false, "ZI")),
//! ]).unwrap();
//! let gadgets = h_gadget::gadgetize(&network).unwrap();
//! assert_eq!(Some(gadgets.width), network.predicted_width());
//! assert_eq!(gadgets.phase_poly.len(), network.len());
//! assert_eq!(circuit::cx_count(&gadgets.clifford), 1);
//! ```
//!
//! # Further reading
//! - D. Litinski, "A Game of Surface Codes: Large-Scale Quantum Computing with
//! Lattice Surgery." [arXiv:1808.02892](https://arxiv.org/abs/1808.02892)
//! - M. Amy, D. Maslov, M. Mosca, "Polynomial-time T-depth Optimization of
//! Clifford+T circuits via Matroid Partitioning."
//! [arXiv:1303.2042](https://arxiv.org/abs/1303.2042)

pub mod pauli;
pub mod circuit;
pub mod network;
pub mod register;
pub mod propagate;
pub mod phasepoly;
pub mod gadget;

#[cfg(test)]
pub(crate) mod statevec;

pub use gadget::{ gadgetize, gadgetize_raw, GadgetError, GadgetResult, Gadgets, RawGadgets };
