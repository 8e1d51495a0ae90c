use std::process::ExitCode;

fn main() -> ExitCode {
    shopcart_cli::run()
}
