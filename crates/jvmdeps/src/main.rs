use std::process::ExitCode;

fn main() -> ExitCode {
    match jvmdeps_lib::main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
