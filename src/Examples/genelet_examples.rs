use crate::ChemicalNetwork::component::Component;
use crate::ChemicalNetwork::parameters::ParameterDatabase;
use crate::Genelet::gate::{GateType, RegulatorOverrides, compile_circuit, genelet_gate};
use crate::Genelet::switch::Switch;
use crate::SbmlToOde::converter::OdeSystem;
use log::error;

pub fn genelet_examples(task: usize) {
    let params = ParameterDatabase::genelet_defaults();
    match task {
        0 => {
            // AND gate with default regulator names G1_A1, G1_A2, G1_I1, G1_I2
            let gate = match genelet_gate("G1", "Y", &RegulatorOverrides::default(), GateType::AND)
            {
                Ok(gate) => gate,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            for (species, value) in &gate.initial_conditions {
                println!("{:<24} {}", species, value);
            }
            match gate.compile(&params) {
                Ok(crn) => crn.pretty_print(),
                Err(e) => error!("{}", e),
            }
        }
        1 => {
            // OR gate driven by externally named strands
            let overrides = RegulatorOverrides {
                on_1: Some("X1".to_string()),
                on_2: Some("X2".to_string()),
                ..Default::default()
            };
            let gate = match genelet_gate("G2", "Z", &overrides, GateType::OR) {
                Ok(gate) => gate,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            println!("regulators: {:?}", gate.regulators);
            println!("source DNA: {:?}", gate.initial_condition("G2_SOU"));
            match gate.compile(&params) {
                Ok(crn) => crn.pretty_print(),
                Err(e) => error!("{}", e),
            }
        }
        2 => {
            // switch answering to two activator/inhibitor pairs
            let switch = Switch::new("S", "Y", "A1", "I1").with_second_pair("A2", "I2");
            match switch.derive(&params) {
                Ok(network) => {
                    println!(
                        "{} species, {} reactions",
                        network.species.len(),
                        network.reactions.len()
                    );
                    for reaction in &network.reactions {
                        println!("{}", reaction);
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
        3 => {
            // G1 output regulates the first input of G2
            let g1 = genelet_gate("G1", "G1_Y", &RegulatorOverrides::default(), GateType::AND);
            let overrides = RegulatorOverrides {
                on_1: Some("G1_Y".to_string()),
                ..Default::default()
            };
            let g2 = genelet_gate("G2", "Z", &overrides, GateType::AND);
            let gates = match (g1, g2) {
                (Ok(g1), Ok(g2)) => vec![g1, g2],
                (Err(e), _) | (_, Err(e)) => {
                    error!("{}", e);
                    return;
                }
            };
            match compile_circuit(&gates, &params) {
                Ok(crn) => {
                    crn.pretty_print();
                    println!("stoichiometry matrix: {}", crn.stoichiometry_matrix());
                }
                Err(e) => error!("{}", e),
            }
        }
        4 => {
            // gate network -> SBML -> ODE system
            let gate = genelet_gate("G1", "Y", &RegulatorOverrides::default(), GateType::OR);
            let crn = match gate.map_err(|e| e.to_string()).and_then(|g| {
                g.compile(&params).map_err(|e| e.to_string())
            }) {
                Ok(crn) => crn,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            let document = crn.to_sbml_document("G1_network");
            match OdeSystem::from_document(&document) {
                Ok(ode) => {
                    for (x, f) in ode.x.iter().zip(&ode.f) {
                        println!("d{}/dt = {}", x, f);
                    }
                    match ode.evaluate(&ode.x_init) {
                        Ok(rhs) => println!("dx/dt at t = 0: {:?}", rhs),
                        Err(e) => error!("{}", e),
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
        _ => println!("No example with number {}", task),
    }
}
