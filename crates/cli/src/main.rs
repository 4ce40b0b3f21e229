//! Command-line entry point for `outfitter`.
//!
//! Parses arguments and hands off to [`app::run`].

mod app;
mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    app::run()
}
