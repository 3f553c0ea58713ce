//! Iron-buffer calculator command
//!
//! Prints the buffer failure estimate, and optionally the Fe' curves, for
//! the culture conditions given on the command line.

use std::io::{self, Write};

use serde::Serialize;
use tracing::{debug, warn};

use crate::calculator::{self, BufferCurves, BufferEstimate, BufferParams, to_precision};
use crate::cli::args::{CalcArgs, OutputFormat};
use crate::error::LinkerError;

/// Significant figures in human output.
const DISPLAY_DIGITS: usize = 2;

#[derive(Debug, Serialize)]
struct CalcReport {
    params: BufferParams,
    estimate: BufferEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    curves: Option<BufferCurves>,
}

/// Run the calculator.
///
/// # Errors
///
/// Returns an error if a parameter is out of range.
pub fn run(args: &CalcArgs) -> Result<(), LinkerError> {
    let params = BufferParams {
        cell_diameter_um: args.diameter,
        edta: args.edta,
        fe_edta: args.fe,
        light: args.light,
        photoperiod_h: args.photoperiod,
    };
    debug!(?params, "estimating buffer capacity");

    let estimate = calculator::estimate(&params)?;
    if estimate.exceeds_solubility {
        warn!(
            fe_prime = estimate.abiotic_fe_prime,
            limit = calculator::SOLUBILITY_LIMIT,
            "abiotic Fe' exceeds the solubility limit; iron may precipitate"
        );
    }
    let curves = if args.curves {
        Some(calculator::curves(&params)?)
    } else {
        None
    };

    let mut out = io::stdout().lock();
    match args.format {
        OutputFormat::Human => write_human(&mut out, &estimate, curves.as_ref())?,
        OutputFormat::Json => {
            let report = CalcReport {
                params,
                estimate,
                curves,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }
    Ok(())
}

fn write_human<W: Write>(
    out: &mut W,
    estimate: &BufferEstimate,
    curves: Option<&BufferCurves>,
) -> io::Result<()> {
    let fmt = |v: f64| to_precision(v, DISPLAY_DIGITS);

    writeln!(out, "Abiotic Fe' (mol/L):          {}", fmt(estimate.abiotic_fe_prime))?;
    writeln!(out, "Failure density (cells/mL):   {}", fmt(estimate.failure_density_per_ml))?;
    writeln!(out, "Failure biomass (umol C/L):   {}", fmt(estimate.failure_biomass_umol_c))?;
    if estimate.exceeds_solubility {
        writeln!(out, "Warning: Fe' exceeds the 400 pM solubility limit")?;
    }

    if let Some(curves) = curves {
        writeln!(out)?;
        writeln!(out, "biomass_umol_c_l\tfe_prime_pm")?;
        for [x, y] in &curves.by_biomass {
            writeln!(out, "{}\t{}", fmt(*x), fmt(*y))?;
        }
        writeln!(out)?;
        writeln!(out, "cells_per_ml\tfe_prime_pm")?;
        for [x, y] in &curves.by_density {
            writeln!(out, "{}\t{}", fmt(*x), fmt(*y))?;
        }
    }
    Ok(())
}
