/// ARDot Prep - resize reference images and write the manifest
///
/// Takes no arguments. Paths come from the defaults or from the JSON file
/// named by `ARDOT_PREP_CONFIG`; log level from `RUST_LOG`.

use std::io::stdout;
use std::process::ExitCode;

use anyhow::Context;
use ardot_prep::{prepare, print_summary, verify, PrepConfig};

fn run() -> anyhow::Result<()> {
    let config = PrepConfig::load().context("failed to load configuration")?;
    let summary = prepare(&config).context("failed to prepare reference images")?;
    let verified = verify(&config).context("prepared references did not verify")?;

    print_summary(&mut stdout(), &summary, verified)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
