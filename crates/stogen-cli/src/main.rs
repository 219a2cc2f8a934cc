mod cli;
mod commands;

use cli::{GenerateParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let params = GenerateParams::from_matches(&matches);

    env_logger::Builder::new()
        .filter_level(params.verbosity)
        .parse_default_env()
        .init();

    commands::generate::run(params.into());
}
