#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod prompt;

use anyhow::Context;
use cave_generator::{CaveGenerator, CaveParams};
use cave_grid::Random;
use log::info;
use pixels_main_support::{animate, CONTROLS};
use prompt::Prompter;
use std::io;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== CAVE GENERATOR ===");
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let params = prompter.ask_params(CaveParams::default())?;
    let generator = CaveGenerator::new(params, Random::new())
        .context("cannot build a cave from these parameters")?;

    println!("Starting graphics interface...");
    println!("Controls: {}", CONTROLS.join(", "));
    animate(generator).context("graphics interface failed")?;
    info!("Exiting");
    Ok(())
}
