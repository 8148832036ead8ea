use std::io::{Read, Write};

use anyhow::{Context, Result};
use b64convert::plugin::{TextDocument, Trigger};
use b64convert::{Outcome, Plugin};
use clap::Parser;
use log::info;

mod args;
mod console;

use args::Cli;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let cli = Cli::parse();
    let outcome = execute(&cli, &mut std::io::stdin().lock(), &mut std::io::stdout().lock())?;
    if matches!(outcome, Some(o) if !o.is_success()) {
        std::process::exit(1);
    }

    Ok(())
}

/// Read the document, convert it and write the result back.
///
/// Nothing is written when the conversion fails.
fn execute(cli: &Cli, stdin: &mut dyn Read, stdout: &mut dyn Write) -> Result<Option<Outcome>> {
    let target = cli.target();
    let input = match &target.file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            stdin.read_to_end(&mut buf)?;
            buf
        }
    };

    let (outcome, text) = run(cli, input)?;
    match outcome {
        Some(Outcome::Success) => {}
        Some(_) => return Ok(outcome),
        None => info!("Nothing to convert"),
    }

    match (&target.file, target.in_place) {
        (Some(path), true) => std::fs::write(path, &text)
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        _ => {
            stdout.write_all(&text)?;
            stdout.flush()?;
        }
    }

    Ok(outcome)
}

/// Run the command on `input` and return the outcome with the resulting
/// document text.
fn run(cli: &Cli, input: Vec<u8>) -> Result<(Option<Outcome>, Vec<u8>)> {
    let mut builder = Plugin::builder();
    if let Some(dir) = &cli.config_dir {
        builder = builder.with_host_config_dir(dir);
    }
    if let Some(cols) = cli.wrap {
        builder = builder.with_line_width(cols);
    }
    let mut plugin = builder.build();
    plugin.activate()?;

    let mut doc = TextDocument::new(input);
    if let Some(range) = cli.target().selection.clone() {
        doc.select(range);
    }

    let mut sink = console::ConsoleSink;
    let outcome = plugin.dispatch(Trigger::Menu(cli.command_id()), Some(&mut doc), &mut sink)?;
    plugin.deactivate();

    Ok((outcome, doc.into_text()))
}
