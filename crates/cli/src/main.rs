use std::process::ExitCode;

fn main() -> ExitCode {
    solocart_cli::run()
}
