use h_gadget::{
    circuit::{ self, Gate },
    network::{ Network, Step },
    phasepoly::PolyOp,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // exp(iθ XX) followed by exp(iφ ZZ), diagonalized
    let network = Network::new(vec![
        Step::new([Gate::CX(1, 0), Gate::H(1)], "IZ", false)?,
        Step::new(Vec::<Gate>::new(), "ZI", false)?,
    ]);
    println!(
        "{} step(s), {} H gate(s), predicted width {:?}",
        network.len(), network.count_h(), network.predicted_width(),
    );

    let raw = h_gadget::gadgetize_raw(&network)?;
    println!("\nraw stream:");
    for op in raw.stream.iter() {
        match op {
            PolyOp::Gate(g) => println!("  {}", g),
            PolyOp::Rotation(rot) => {
                let axis: String = rot.axis.iter().map(|l| l.as_char()).collect();
                println!("  {} {} {:?}", axis, if rot.sign { '-' } else { '+' }, rot.flips);
            },
        }
    }

    let gadgets = h_gadget::gadgetize(&network)?;
    println!("\nbeginning: {}", circuit::format_gates(&gadgets.beginning));
    println!(
        "clifford:  {} (CX count {}, CX depth {})",
        circuit::format_gates(&gadgets.clifford),
        circuit::cx_count(&gadgets.clifford),
        circuit::cx_depth(&gadgets.clifford),
    );
    println!("phase polynomial:\n{}", gadgets.phase_poly);
    println!("end:       {}", circuit::format_gates(&gadgets.end));
    println!("corrections:\n{}", gadgets.corrections);
    println!("layout:    {:?}", gadgets.layout.as_slice());
    Ok(())
}
