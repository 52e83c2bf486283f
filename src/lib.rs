#[allow(non_snake_case)]
pub mod ChemicalNetwork;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Genelet;
#[allow(non_snake_case)]
pub mod SbmlToOde;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;
