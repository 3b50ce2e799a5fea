//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use reese_effects::{ParamScale, ParamUnit, ReeseParam};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show one parameter by id
    #[arg(value_name = "ID")]
    id: Option<String>,
}

/// Format a value with its unit. Percent parameters are stored 0-1.
pub fn format_value(param: ReeseParam, value: f32) -> String {
    let unit = param.unit();
    match unit {
        ParamUnit::Percent => format!("{:.0}%", value * 100.0),
        ParamUnit::Ratio => format!("{value:.2}{}", unit.suffix()),
        ParamUnit::Hertz if value < 10.0 => format!("{value:.1}{}", unit.suffix()),
        ParamUnit::Hertz | ParamUnit::Decibels => format!("{value:.0}{}", unit.suffix()),
    }
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params: Vec<ReeseParam> = match &args.id {
        Some(id) => vec![
            ReeseParam::from_id(id).ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", id))?,
        ],
        None => ReeseParam::ALL.to_vec(),
    };

    println!(
        "  {:14}  {:16}  {:20}  {:10}  {}",
        "Id", "Name", "Range", "Default", "Scale"
    );
    println!(
        "  {:14}  {:16}  {:20}  {:10}  {}",
        "--", "----", "-----", "-------", "-----"
    );
    for param in params {
        let range = format!(
            "{} - {}",
            format_value(param, param.min()),
            format_value(param, param.max())
        );
        let scale = match param.scale() {
            ParamScale::Linear => "linear",
            ParamScale::Logarithmic => "log",
        };
        println!(
            "  {:14}  {:16}  {:20}  {:10}  {}",
            param.id(),
            param.name(),
            range,
            format_value(param, param.default_value()),
            scale
        );
    }

    println!();
    println!("Override with: reese process in.wav out.wav --param cutoff=800 --param ring_depth=0.7");
    Ok(())
}
