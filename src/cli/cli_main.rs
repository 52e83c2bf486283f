use super::cli_commands::{circuit_command, gate_command, load_ode, print_ode};
use super::cli_examples::examples_menu;
use crate::settings::Settings;
use log::error;
use std::io::{self, Write};

pub fn run_interactive_menu(settings: &Settings) {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => gate_menu(settings),
            "2" => circuit_menu(settings),
            "3" => ode_menu(),
            "4" => examples_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n GeneletCRN: genelet gate reaction networks\n
    and SBML models as symbolic ODE systems \n \x1b[0m"
    );
    println!("\x1b[33m1. Build a genelet gate\x1b[0m");
    println!("\x1b[33m2. Load a circuit (JSON list of gates)\x1b[0m");
    println!("\x1b[33m3. SBML model to ODE system\x1b[0m");
    println!("\x1b[33m4. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn gate_menu(settings: &Settings) {
    prompt("Gate name: ");
    let Some(name) = get_user_input() else { return };
    prompt("Output strand: ");
    let Some(out) = get_user_input() else { return };
    prompt("Gate type [AND|OR] (empty for AND): ");
    let Some(gate_type) = get_user_input() else { return };

    let mut args = vec![name.trim().to_string(), out.trim().to_string()];
    if !gate_type.trim().is_empty() {
        args.push(gate_type.trim().to_uppercase());
    }
    match gate_command(&args, settings) {
        Ok(crn) => crn.pretty_print(),
        Err(e) => error!("{}", e),
    }
}

fn circuit_menu(settings: &Settings) {
    prompt("Circuit file: ");
    let Some(path) = get_user_input() else { return };
    match circuit_command(path.trim(), settings) {
        Ok(crn) => crn.pretty_print(),
        Err(e) => error!("{}", e),
    }
}

fn ode_menu() {
    prompt("SBML model file (JSON): ");
    let Some(path) = get_user_input() else { return };
    match load_ode(path.trim()) {
        Ok(ode) => print_ode(&ode),
        Err(e) => error!("{}", e),
    }
}

pub(crate) fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

/// One line from stdin; `None` at end of input or on a read error
pub(crate) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input),
        Err(e) => {
            error!("Failed to read input: {}", e);
            None
        }
    }
}
