use std::process::ExitCode;

fn main() -> ExitCode {
    staybot_cli::run()
}
