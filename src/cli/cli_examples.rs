use super::cli_main::{get_user_input, prompt};
use crate::Examples::genelet_examples::genelet_examples;
use crate::Examples::sbml_examples::sbml_examples;

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. AND gate");
        println!("2. OR gate with external regulators");
        println!("3. Switch with two regulator pairs");
        println!("4. Two-gate cascade");
        println!("5. Gate network to ODE system");
        println!("6. SBML model with local parameters");
        println!("7. SBML model with function definitions and initial assignments");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim() {
            "1" => genelet_examples(0),
            "2" => genelet_examples(1),
            "3" => genelet_examples(2),
            "4" => genelet_examples(3),
            "5" => genelet_examples(4),
            "6" => sbml_examples(0),
            "7" => sbml_examples(1),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
