use KiReact::Examples::kinetics_examples::kin_examples;
use KiReact::ReactorsIVP::SimpleReactorIVP::SimpleReactorTask;
use KiReact::Utils::load_from_file::LoadData;
use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::process::ExitCode;

pub fn main() -> ExitCode {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    // task document as the first argument, otherwise the reference example
    let result = match std::env::args().nth(1) {
        Some(file_name) => LoadData::new(file_name).load_task().and_then(|task| {
            let mut reactor = SimpleReactorTask::from_task(task);
            reactor.solve_and_plot()?;
            reactor.pretty_print_result();
            Ok(())
        }),
        None => kin_examples(2),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
