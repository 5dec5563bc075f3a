//! Dense statevector simulation, used to check gadgetized circuits against
//! their source networks.
//!
//! Qubit *k* is bit *k* of a basis-state index. Global phases are ignored
//! throughout.

use std::f64::consts::FRAC_1_SQRT_2 as ONRT2;
use ndarray as nd;
use num_complex::Complex64 as C64;
use rand::Rng;
use crate::{
    circuit::Gate,
    gadget::Gadgets,
    network::{ Network, Step },
    pauli::{ Letter, Pauli },
};

#[derive(Clone, Debug)]
pub(crate) struct State {
    n: usize,
    amps: nd::Array1<C64>,
}

impl State {
    pub(crate) fn random<R>(n: usize, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        let mut amps: nd::Array1<C64>
            = (0..1_usize << n)
            .map(|_| C64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let norm = amps.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
        amps.mapv_inplace(|a| a / norm);
        Self { n, amps }
    }

    // tensor with `width - n` qubits in ∣0⟩
    pub(crate) fn embed(&self, width: usize) -> Self {
        let mut amps: nd::Array1<C64> = nd::Array1::zeros(1 << width);
        amps.slice_mut(nd::s![..self.amps.len()]).assign(&self.amps);
        Self { n: width, amps }
    }

    fn apply_h(&mut self, k: usize) {
        let mask = 1 << k;
        for idx in 0..self.amps.len() {
            if idx & mask != 0 { continue; }
            let a0 = self.amps[idx];
            let a1 = self.amps[idx | mask];
            self.amps[idx] = (a0 + a1) * ONRT2;
            self.amps[idx | mask] = (a0 - a1) * ONRT2;
        }
    }

    fn apply_x(&mut self, k: usize) {
        let mask = 1 << k;
        for idx in 0..self.amps.len() {
            if idx & mask == 0 { self.amps.swap(idx, idx | mask); }
        }
    }

    fn apply_diag<F>(&mut self, mut f: F)
    where F: FnMut(usize) -> C64
    {
        self.amps.indexed_iter_mut().for_each(|(idx, a)| { *a *= f(idx); });
    }

    pub(crate) fn apply_gate(&mut self, gate: &Gate) {
        match *gate {
            Gate::H(k) => { self.apply_h(k); },
            Gate::S(k) => {
                self.apply_diag(|idx| {
                    if idx >> k & 1 == 1 { C64::i() } else { C64::new(1.0, 0.0) }
                });
            },
            Gate::CX(c, t) => {
                let (mc, mt) = (1 << c, 1 << t);
                for idx in 0..self.amps.len() {
                    if idx & mc != 0 && idx & mt == 0 {
                        self.amps.swap(idx, idx | mt);
                    }
                }
            },
            Gate::CZ(a, b) => {
                self.apply_diag(|idx| {
                    if idx >> a & idx >> b & 1 == 1 {
                        C64::new(-1.0, 0.0)
                    } else {
                        C64::new(1.0, 0.0)
                    }
                });
            },
            Gate::Meas(..) => panic!("measurements are applied via `project`"),
        }
    }

    // exp(-i θ/2 Z^mask)
    pub(crate) fn apply_zrot(&mut self, mask: usize, angle: f64) {
        self.apply_diag(|idx| {
            let odd = (idx & mask).count_ones() % 2 == 1;
            C64::cis(if odd { angle / 2.0 } else { -angle / 2.0 })
        });
    }

    pub(crate) fn apply_pauli(&mut self, p: &Pauli) {
        for (k, letter) in p.letters().enumerate() {
            let (x, z) = letter.bits();
            if z {
                self.apply_diag(|idx| {
                    if idx >> k & 1 == 1 {
                        C64::new(-1.0, 0.0)
                    } else {
                        C64::new(1.0, 0.0)
                    }
                });
            }
            if x { self.apply_x(k); }
        }
    }

    // project qubit `k` onto ∣outcome⟩ and renormalize, returning the outcome
    // probability
    pub(crate) fn project(&mut self, k: usize, outcome: bool) -> f64 {
        let mask = 1 << k;
        self.apply_diag(|idx| {
            if (idx & mask != 0) == outcome {
                C64::new(1.0, 0.0)
            } else {
                C64::new(0.0, 0.0)
            }
        });
        let prob = self.amps.iter().map(|a| a.norm_sqr()).sum::<f64>();
        if prob > 1e-12 { self.amps.mapv_inplace(|a| a / prob.sqrt()); }
        prob
    }

    // read off the state of the qubits in `slots`, all others being in the
    // basis state given by `fixed`
    pub(crate) fn extract(&self, slots: &[usize], fixed: usize) -> Self {
        let amps: nd::Array1<C64>
            = (0..1_usize << slots.len())
            .map(|j| {
                let idx
                    = slots.iter().enumerate()
                    .fold(fixed, |acc, (b, slot)| acc | ((j >> b & 1) << slot));
                self.amps[idx]
            })
            .collect();
        Self { n: slots.len(), amps }
    }

    pub(crate) fn overlap(&self, other: &Self) -> f64 {
        assert_eq!(self.n, other.n);
        self.amps.iter().zip(other.amps.iter())
            .map(|(a, b)| a.conj() * b)
            .sum::<C64>()
            .norm()
    }
}

fn z_mask<I>(support: I) -> usize
where I: IntoIterator<Item = bool>
{
    support.into_iter().enumerate()
        .fold(0, |acc, (k, b)| if b { acc | (1 << k) } else { acc })
}

/// Apply a network directly, rotation *k* by `angles[k]`.
pub(crate) fn run_network(network: &Network, angles: &[f64], state: &mut State) {
    for (step, angle) in network.steps().iter().zip(angles) {
        step.piece.iter().for_each(|g| state.apply_gate(g));
        assert!(step.axis.iter().all(|l| l.is_diagonal()));
        let mask = z_mask(step.axis.iter().map(|l| *l == Letter::Z));
        state.apply_zrot(mask, if step.sign { -angle } else { *angle });
    }
}

/// Run a gadgetized network on `input` (logical qubits only) under a fixed
/// assignment of measurement outcomes, applying all classically controlled
/// flips and final corrections. Returns the final logical state, or `None` if
/// the outcomes have zero probability.
pub(crate) fn run_gadgets(
    gadgets: &Gadgets,
    angles: &[f64],
    outcomes: &[bool],
    input: &State,
) -> Option<State>
{
    let mut state = input.embed(gadgets.width);
    gadgets.beginning.iter().for_each(|g| state.apply_gate(g));
    gadgets.clifford.iter().for_each(|g| state.apply_gate(g));
    for (term, angle) in gadgets.phase_poly.iter().zip(angles) {
        let mask = z_mask(term.support.iter().copied());
        state.apply_zrot(mask, if term.parity(outcomes) { -angle } else { *angle });
    }
    let mut fixed: usize = 0;
    for gate in gadgets.end.iter() {
        if let Gate::Meas(k, id) = *gate {
            if state.project(k, outcomes[id]) < 1e-12 { return None; }
            if outcomes[id] { fixed |= 1 << k; }
        } else {
            state.apply_gate(gate);
        }
    }
    for (p, m) in gadgets.corrections.iter().zip(outcomes) {
        if *m { state.apply_pauli(p); }
    }
    Some(state.extract(gadgets.layout.as_slice(), fixed))
}

/// Build a diagonalization network for a sequence of Pauli operators by
/// greedily reducing each (conjugated) operator to a single-qubit *Z*.
pub(crate) fn diagonalize(paulis: &[&str]) -> Network {
    let mut current: Vec<Pauli>
        = paulis.iter().map(|s| s.parse().unwrap()).collect();
    let mut steps: Vec<Step> = Vec::new();
    for i in 0..current.len() {
        let mut xs: Vec<usize>
            = current[i].x_bits().iter().enumerate()
            .filter_map(|(k, x)| x.then_some(k))
            .collect();
        let mut piece: Vec<Gate> = Vec::new();
        if let Some(control) = xs.pop() {
            piece.extend(xs.into_iter().map(|t| Gate::CX(control, t)));
            let reduced = current[i].conjugated(&piece).unwrap();
            if reduced.z_bits()[control] { piece.push(Gate::S(control)); }
            piece.push(Gate::H(control));
        }
        for p in current.iter_mut() { p.conjugate_with(&piece).unwrap(); }
        steps.push(Step::new(piece, &current[i].to_string(), false).unwrap());
    }
    Network::new(steps)
}
