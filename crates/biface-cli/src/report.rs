use crate::cli::OutputFormat;
use crate::error::Result;
use biface::core::models::residue::ResidueKey;
use biface::engine::checking::StageReport;
use biface::engine::energy::ResidueEnergy;
use biface::workflows::{energy::EnergyResult, interface::InterfaceResult};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Standard output, or a freshly created file when a path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

#[derive(Serialize)]
struct InterfaceRow<'a> {
    chain: &'a str,
    residue_number: isize,
    insertion_code: String,
    residue_name: &'a str,
    partner_chain: &'a str,
}

#[derive(Serialize)]
struct EnergyRow<'a> {
    chain: &'a str,
    residue_number: isize,
    insertion_code: String,
    residue_name: &'a str,
    electrostatic: f64,
    vdw: f64,
    total: f64,
}

fn insertion_code(key: &ResidueKey) -> String {
    key.insertion_code.map(String::from).unwrap_or_default()
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a ResidueKey>) -> String {
    keys.map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

pub fn write_interface(
    out: &mut dyn Write,
    result: &InterfaceResult,
    format: OutputFormat,
) -> Result<()> {
    let interface = &result.interface;
    match format {
        OutputFormat::Text => {
            writeln!(
                out,
                "Interface residues in chain {} ({}): {}",
                interface.chain_1,
                interface.residues_1.len(),
                join_keys(interface.residues_1.iter())
            )?;
            writeln!(
                out,
                "Interface residues in chain {} ({}): {}",
                interface.chain_2,
                interface.residues_2.len(),
                join_keys(interface.residues_2.iter())
            )?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            let sides = [
                (&interface.residues_1, interface.chain_2.as_str()),
                (&interface.residues_2, interface.chain_1.as_str()),
            ];
            for (residues, partner) in sides {
                for key in residues {
                    writer.serialize(InterfaceRow {
                        chain: &key.chain_id,
                        residue_number: key.number,
                        insertion_code: insertion_code(key),
                        residue_name: &key.name,
                        partner_chain: partner,
                    })?;
                }
            }
            writer.flush()?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_energy_lines(out: &mut dyn Write, residues: &[ResidueEnergy]) -> io::Result<()> {
    for entry in residues {
        writeln!(
            out,
            "  {:<12} {:>12.4} {:>12.4} {:>12.4}",
            entry.residue.to_string(),
            entry.electrostatic,
            entry.vdw,
            entry.total()
        )?;
    }
    Ok(())
}

pub fn write_energy(out: &mut dyn Write, result: &EnergyResult, format: OutputFormat) -> Result<()> {
    let energy = &result.energy;
    match format {
        OutputFormat::Text => {
            for (chain, residues) in [
                (&result.interface.chain_1, &energy.residues_1),
                (&result.interface.chain_2, &energy.residues_2),
            ] {
                writeln!(out, "Chain {} ({} interface residues)", chain, residues.len())?;
                writeln!(
                    out,
                    "  {:<12} {:>12} {:>12} {:>12}",
                    "residue", "elec", "vdw", "total"
                )?;
                write_energy_lines(out, residues)?;
            }
            writeln!(
                out,
                "Interaction energy (kcal/mol): electrostatic {:.4}, vdW {:.4}, total {:.4}",
                energy.electrostatic,
                energy.vdw,
                energy.total()
            )?;
            if energy.skipped_atoms > 0 {
                writeln!(
                    out,
                    "Skipped {} atom(s) without parameters.",
                    energy.skipped_atoms
                )?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for entry in energy.residues_1.iter().chain(energy.residues_2.iter()) {
                writer.serialize(EnergyRow {
                    chain: &entry.residue.chain_id,
                    residue_number: entry.residue.number,
                    insertion_code: insertion_code(&entry.residue),
                    residue_name: &entry.residue.name,
                    electrostatic: entry.electrostatic,
                    vdw: entry.vdw,
                    total: entry.total(),
                })?;
            }
            writer.flush()?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn write_stage_reports(out: &mut dyn Write, reports: &[StageReport]) -> Result<()> {
    for report in reports {
        writeln!(out, "[{}] {}", report.stage, report.summary)?;
        for finding in &report.findings {
            writeln!(out, "    {}", finding)?;
        }
    }
    out.flush()?;
    Ok(())
}
