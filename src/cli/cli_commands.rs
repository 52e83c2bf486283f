//! Non-interactive commands of the binary
use crate::ChemicalNetwork::network::ChemicalReactionNetwork;
use crate::Genelet::gate::{GateSpec, GateType, RegulatorOverrides, compile_circuit, genelet_gate};
use crate::SbmlToOde::converter::{OdeSystem, sbml_to_ode, sbml_to_ode_or_exit};
use crate::SbmlToOde::loader::JsonSbmlLoader;
use crate::settings::Settings;
use log::info;
use prettytable::{Table, row};
use std::path::Path;
use std::str::FromStr;

pub const USAGE: &str = "usage:
    GeneletCRN                          interactive menu
    GeneletCRN gate NAME OUT [AND|OR]   print the network of one genelet gate
    GeneletCRN circuit FILE             print the network of the gates listed in a JSON file
    GeneletCRN ode FILE                 print the ODE system of a JSON SBML model";

/// `gate NAME OUT [AND|OR]`
pub fn gate_command(args: &[String], settings: &Settings) -> Result<ChemicalReactionNetwork, String> {
    let (name, out) = match args {
        [name, out, ..] => (name, out),
        _ => return Err(USAGE.to_string()),
    };
    let gate_type = match args.get(2) {
        Some(t) => GateType::from_str(t).map_err(|e| e.to_string())?,
        None => GateType::AND,
    };
    let gate = genelet_gate(name, out, &RegulatorOverrides::default(), gate_type)
        .map_err(|e| e.to_string())?;
    let gate = settings.configure_gate(gate);
    let params = settings.parameters().map_err(|e| e.to_string())?;
    gate.compile(&params).map_err(|e| e.to_string())
}

/// `circuit FILE`
pub fn circuit_command(path: &str, settings: &Settings) -> Result<ChemicalReactionNetwork, String> {
    let specs = GateSpec::from_json_file(path).map_err(|e| e.to_string())?;
    let gates = specs
        .iter()
        .map(|spec| spec.build().map(|gate| settings.configure_gate(gate)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    info!("Circuit '{}' has {} gates", path, gates.len());
    let params = settings.parameters().map_err(|e| e.to_string())?;
    compile_circuit(&gates, &params).map_err(|e| e.to_string())
}

/// `ode FILE`; a model that cannot be read ends the process with exit code 1
pub fn ode_command(path: &str) -> Result<OdeSystem, String> {
    sbml_to_ode_or_exit(&JsonSbmlLoader::new(), Path::new(path)).map_err(|e| e.to_string())
}

/// ODE system of a JSON SBML model; a model that cannot be read is an error, not an exit
pub fn load_ode(path: &str) -> Result<OdeSystem, String> {
    sbml_to_ode(&JsonSbmlLoader::new(), Path::new(path)).map_err(|e| e.to_string())
}

pub fn ode_table(ode: &OdeSystem) -> Table {
    let mut table = Table::new();
    table.add_row(row!["x", "x_init", "dx/dt"]);
    for ((x, x0), f) in ode.x.iter().zip(&ode.x_init).zip(&ode.f) {
        table.add_row(row![x, x0, f]);
    }
    table
}

pub fn parameter_table(ode: &OdeSystem) -> Table {
    let mut table = Table::new();
    table.add_row(row!["p", "value"]);
    for (p, value) in ode.p.iter().zip(&ode.params_values) {
        table.add_row(row![p, value]);
    }
    table
}

pub fn print_ode(ode: &OdeSystem) {
    ode_table(ode).printstd();
    parameter_table(ode).printstd();
}

/// Dispatch the command line; `args` excludes the program name
pub fn run_command(args: &[String], settings: &Settings) -> Result<(), String> {
    match args.first().map(String::as_str) {
        Some("gate") => gate_command(&args[1..], settings).map(|crn| crn.pretty_print()),
        Some("circuit") => match args.get(1) {
            Some(path) => circuit_command(path, settings).map(|crn| crn.pretty_print()),
            None => Err(USAGE.to_string()),
        },
        Some("ode") => match args.get(1) {
            Some(path) => ode_command(path).map(|ode| print_ode(&ode)),
            None => Err(USAGE.to_string()),
        },
        _ => Err(USAGE.to_string()),
    }
}
