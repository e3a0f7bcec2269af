use clap::Parser;
use delaycalc::{
    clock::MonotonicClock, config::Settings, logging, report::format_table, tui::run_tui, Args,
    Session,
};
use log::LevelFilter;

fn main() {
    let args = parse_command_line_arguments();
    initialize_logging(&args);

    let session = match load_session(&args) {
        Ok(session) => session,
        Err(e) => {
            let error_msg = format!("Error: {}", e);
            log::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    };

    if args.print {
        print!("{}", format_table(session.table()));
        return;
    }

    match run_tui(session, MonotonicClock::new()) {
        Ok(session) => log::info!("Exiting at {} BPM", session.bpm_input()),
        Err(e) => {
            log::error!("Terminal UI failed: {}", e);
            eprintln!("Terminal UI failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn initialize_logging(args: &Args) {
    let result = if args.print {
        let level = if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        logging::init_stderr_logger(level)
    } else {
        let level = if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        logging::init_file_logger(level)
    };

    if let Err(e) = result {
        eprintln!("Logging disabled: {}", e);
    }
    log::info!("Application starting");
}

fn load_session(args: &Args) -> delaycalc::Result<Session> {
    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;
    settings.session()
}
