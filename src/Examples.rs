/// genelet gates, switches and circuits: building, printing, export to ODE
pub mod genelet_examples;
pub mod sbml_examples;
