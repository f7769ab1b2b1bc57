use std::process::ExitCode;

fn main() -> ExitCode {
    match pwpick_cli::run() {
        // A status outside u8 range (e.g. -1 for a signal-killed child)
        // still has to read as failure.
        Ok(status) => ExitCode::from(u8::try_from(status).unwrap_or(1)),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
