use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sos_notebook_install::cli::Cli;
use sos_notebook_install::preflight::probe_python;
use sos_notebook_install::scope::is_root;
use sos_notebook_install::{InstallEnv, JupyterPaths};

const LOG_ENV_VAR: &str = "SOS_INSTALL_LOG";

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let python = probe_python(None)?;
    let paths = JupyterPaths::from_env().context("resolving Jupyter directories")?;
    let env = InstallEnv {
        python,
        paths,
        is_root: is_root(),
    };

    let report = env.install(&cli.scope_flags())?;
    println!(
        "sos jupyter kernel spec is installed to {}",
        report.kernel_dir.display()
    );
    println!(
        "Settings added or updated in {}",
        report.config.config_file.display()
    );
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
