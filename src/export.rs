//! Tabular export of simulation ledgers
//!
//! Each account is saved as two CSV tables: the monthly ledger and the
//! account parameters it was simulated with.

use crate::account::AccountConfig;
use crate::error::Result;
use crate::projection::{Column, Ledger, SimulationEngine};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write the ledger as CSV: a `Month` label column followed by every named column
pub fn write_ledger_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Month"];
    header.extend(Column::ALL.iter().map(|c| c.name()));
    csv_writer.write_record(&header)?;

    for record in ledger.records() {
        let mut row = Vec::with_capacity(Column::ALL.len() + 1);
        row.push(record.label.clone());
        row.extend(Column::ALL.iter().map(|c| format!("{:.2}", c.value(record))));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the account parameters as a two-column `Parameter,Value` table
pub fn write_parameters_csv<W: Write>(account: &AccountConfig, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Parameter", "Value"])?;

    for (label, value) in account.parameters() {
        csv_writer.write_record([label, value.as_str()])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Save `<stem>_simulation.csv` and `<stem>_parameters.csv` into `dir`
pub fn save_to_csv(engine: &SimulationEngine, dir: &Path, stem: &str) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;

    let ledger_path = dir.join(format!("{}_simulation.csv", stem));
    write_ledger_csv(engine.ledger(), File::create(&ledger_path)?)?;

    let params_path = dir.join(format!("{}_parameters.csv", stem));
    write_parameters_csv(engine.account(), File::create(&params_path)?)?;

    log::info!(
        "Saved {} to {} and {}",
        engine.account().name(),
        ledger_path.display(),
        params_path.display()
    );

    Ok((ledger_path, params_path))
}

/// Stem used when an account name has no alphanumeric characters
pub const FALLBACK_STEM: &str = "account";

/// File stem for an account name: lowercase, non-alphanumerics collapsed to '_'
pub fn file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            stem.extend(ch.to_lowercase());
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

/// One distinct file stem per account name, in input order.
///
/// A repeated stem gets the account's 1-based position appended.
pub fn unique_file_stems<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut used = HashSet::new();

    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let base = file_stem(name);
            let mut stem = base.clone();
            let mut suffix = i + 1;
            while !used.insert(stem.clone()) {
                stem = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            stem
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulated() -> SimulationEngine {
        let mut engine = SimulationEngine::new(AccountConfig::assurance_vie());
        engine.simulate(1).unwrap();
        engine
    }

    #[test]
    fn test_ledger_csv_layout() {
        let engine = simulated();
        let mut buffer = Vec::new();
        write_ledger_csv(engine.ledger(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 13);
        assert_eq!(
            lines[0],
            "Month,Total balance,Total invested,Profit,Management fee,\
             Cumulative management fees,Market change,Dividends paid,Contribution added"
        );
        assert!(lines[1].starts_with("January 2025,5644.66,5600.00,44.66,0.00,0.00,44.66,0.00,600.00"));
        assert!(lines[12].starts_with("December 2025,13214.10,"));
    }

    #[test]
    fn test_parameters_csv() {
        let mut buffer = Vec::new();
        write_parameters_csv(&AccountConfig::pea(2.0), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Parameter,Value");
        assert_eq!(lines[1], "Name,PEA");
        assert_eq!(lines[6], "Monthly contribution,598");
    }

    #[test]
    fn test_save_to_csv_writes_both_tables() {
        let engine = simulated();
        let dir = std::env::temp_dir().join(format!("invest_projection_export_{}", std::process::id()));

        let (ledger_path, params_path) = save_to_csv(&engine, &dir, "assurance_vie").unwrap();
        assert!(ledger_path.ends_with("assurance_vie_simulation.csv"));
        assert!(params_path.ends_with("assurance_vie_parameters.csv"));

        let ledger_text = std::fs::read_to_string(&ledger_path).unwrap();
        assert_eq!(ledger_text.lines().count(), 13);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Assurance Vie"), "assurance_vie");
        assert_eq!(file_stem("PEA"), "pea");
        assert_eq!(file_stem("  Mixed -- Account! "), "mixed_account");
        assert_eq!(file_stem("***"), "account");
        assert_eq!(file_stem(""), "account");
    }

    #[test]
    fn test_unique_file_stems() {
        let stems = unique_file_stems(["PEA", "pea!", "", "***", "pea_2"]);
        assert_eq!(stems, vec!["pea", "pea_2", "account", "account_4", "pea_2_5"]);
    }

    #[test]
    fn test_colliding_names_export_separately() {
        let runner = crate::ScenarioRunner::new(1);
        let accounts = [
            AccountConfig::new("My PEA", 1000.0, 0.0, 0.05, 0.0, 10.0),
            AccountConfig::new("my-pea", 2000.0, 0.0, 0.05, 0.0, 10.0),
        ];
        let engines = runner.run_batch(&accounts).unwrap();
        let stems = unique_file_stems(engines.iter().map(|e| e.account().name()));
        let dir = std::env::temp_dir().join(format!("invest_projection_stems_{}", std::process::id()));

        let mut params_paths = Vec::new();
        for (engine, stem) in engines.iter().zip(&stems) {
            let (_, params_path) = save_to_csv(engine, &dir, stem).unwrap();
            params_paths.push(params_path);
        }

        assert_ne!(params_paths[0], params_paths[1]);
        let first = std::fs::read_to_string(&params_paths[0]).unwrap();
        let second = std::fs::read_to_string(&params_paths[1]).unwrap();
        assert!(first.contains("Name,My PEA"));
        assert!(second.contains("Name,my-pea"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
