/// command-line dispatch (`gate`, `circuit`, `ode`) and the tables printed for an ODE system
pub mod cli_commands;
/// examples submenu
pub mod cli_examples;
/// interactive numbered menu started when the binary runs without arguments
pub mod cli_main;
