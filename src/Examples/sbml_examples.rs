use crate::SbmlToOde::conversion::ConversionOption;
use crate::SbmlToOde::converter::{OdeSystem, sbml_to_ode};
use crate::SbmlToOde::loader::JsonSbmlLoader;
use crate::SbmlToOde::model::Severity;
use log::error;
use std::fs;

const MICHAELIS_MENTEN: &str = r#"{
  "model": {
    "id": "michaelis_menten",
    "species": [
      {"id": "S", "initial_concentration": 10.0},
      {"id": "P", "initial_concentration": 0.0}
    ],
    "parameters": [{"id": "E0", "value": 0.5}],
    "reactions": [
      {"id": "conversion",
       "reactants": [{"species": "S"}],
       "products": [{"species": "P"}],
       "kinetic_law": {
         "formula": "kcat * E0 * S / (Km + S)",
         "local_parameters": [{"id": "kcat", "value": 2.0}, {"id": "Km", "value": 1.5}]
       }}
    ]
  }
}"#;

const DIMERISATION: &str = r#"{
  "id": "dimerisation",
  "species": [
    {"id": "M", "initial_concentration": 0.0},
    {"id": "D", "initial_concentration": 0.0}
  ],
  "parameters": [{"id": "kf", "value": 0.2}, {"id": "kr", "value": 0.05}, {"id": "total"}],
  "function_definitions": [
    {"id": "mass_action2", "arguments": ["k", "a"], "body": "k * pow(a, 2)"}
  ],
  "initial_assignments": [
    {"symbol": "total", "math": "4"},
    {"symbol": "M", "math": "total / 2"}
  ],
  "reactions": [
    {"id": "bind",
     "reactants": [{"species": "M", "stoichiometry": 2}],
     "products": [{"species": "D"}],
     "kinetic_law": {"formula": "mass_action2(kf, M) - kr * D"}}
  ]
}"#;

fn show(ode: &OdeSystem) {
    for ((x, f), x0) in ode.x.iter().zip(&ode.f).zip(&ode.x_init) {
        println!("d{}/dt = {}    ({} at t = 0)", x, f, x0);
    }
    for (p, value) in ode.p.iter().zip(&ode.params_values) {
        println!("{} = {}", p, value);
    }
}

pub fn sbml_examples(task: usize) {
    match task {
        0 => {
            // local parameters of the kinetic law become global ones
            let mut document = JsonSbmlLoader::new().parse_str(MICHAELIS_MENTEN);
            if let Err(e) = document.convert(ConversionOption::PromoteLocalParameters) {
                error!("{}", e);
                return;
            }
            match OdeSystem::from_document(&document) {
                Ok(ode) => {
                    show(&ode);
                    match ode.evaluate(&ode.x_init) {
                        Ok(rates) => println!("rates at t = 0: {:?}", rates),
                        Err(e) => error!("{}", e),
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
        1 => {
            // the whole pipeline on a file: load, convert, extract
            let path = std::env::temp_dir().join("genelet_dimerisation.json");
            if let Err(e) = fs::write(&path, DIMERISATION) {
                error!("Failed to write '{}': {}", path.display(), e);
                return;
            }
            let loader = JsonSbmlLoader::new();
            let document = loader.parse_str(DIMERISATION);
            println!(
                "{} errors while reading the model",
                document.num_diagnostics(Severity::Error)
            );
            match sbml_to_ode(&loader, &path) {
                Ok(ode) => show(&ode),
                Err(e) => error!("{}", e),
            }
        }
        _ => println!("No example with number {}", task),
    }
}
