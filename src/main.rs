use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match centrifugation_expt::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("WARNING: {err}");
            eprintln!("{}", centrifugation_expt::app::usage());
            ExitCode::from(err.exit_code())
        }
    }
}
