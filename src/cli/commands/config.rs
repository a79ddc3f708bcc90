//! skemi config - Show the effective configuration

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::config::Config;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ConfigArgs {}

#[derive(Serialize)]
struct ConfigReport<'a> {
    root: String,
    config_path: String,
    config: &'a Config,
}

pub fn run(ctx: &AppContext, _args: &ConfigArgs) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(&robot_ok(
            "config",
            ConfigReport {
                root: ctx.root.display().to_string(),
                config_path: ctx.config_path.display().to_string(),
                config: &ctx.config,
            },
        ));
    }

    println!("# root: {}", ctx.root.display());
    println!("# config: {}", ctx.config_path.display());
    print!("{}", ctx.config.to_toml_string()?);
    Ok(())
}
