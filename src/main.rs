use GeneletCRN::Utils::logger::init_logger;
use GeneletCRN::cli::cli_commands::run_command;
use GeneletCRN::cli::cli_main::run_interactive_menu;
use GeneletCRN::settings::{SETTINGS_FILE, Settings};

pub fn main() {
    let settings = Settings::load_or_default(SETTINGS_FILE);
    if let Err(e) = init_logger(settings.level_filter(), settings.log_file.as_deref()) {
        eprintln!("{}", e);
    }
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive_menu(&settings);
    } else if let Err(e) = run_command(&args, &settings) {
        eprintln!("{}", e);
        std::process::exit(2);
    }
}
