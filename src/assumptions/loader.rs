//! CSV-based mortality table loader
//!
//! Each table lives in its own file named `<BASIS_ID>.csv` with an `age,qx`
//! header, e.g. `data/mortality/ELT17_MALES.csv`.

use super::mortality::MortalityBasis;
use crate::error::DataError;
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Default path to the mortality table directory
pub const DEFAULT_MORTALITY_PATH: &str = "data/mortality";

#[derive(Debug, serde::Deserialize)]
struct QxRow {
    age: u32,
    qx: f64,
}

/// Load a single basis from any reader (file, string buffer, network stream)
pub fn load_basis_from_reader<R: Read>(id: &str, reader: R) -> Result<MortalityBasis, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut pairs = Vec::new();

    for result in csv_reader.deserialize() {
        let row: QxRow = result?;
        pairs.push((row.age, row.qx));
    }

    Ok(MortalityBasis::from_pairs(id, pairs)?)
}

/// Load a single basis from a CSV file; the id is the file stem
pub fn load_basis<P: AsRef<Path>>(path: P) -> Result<MortalityBasis, DataError> {
    let path = path.as_ref();
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| DataError::Parse {
            line: 0,
            reason: format!("cannot derive basis id from {}", path.display()),
        })?;

    let file = fs::File::open(path)?;
    let basis = load_basis_from_reader(id, file)?;
    debug!(
        "Loaded mortality basis {} (ages {}-{}) from {}",
        basis.id(),
        basis.min_age(),
        basis.max_age(),
        path.display()
    );
    Ok(basis)
}

/// Load every `*.csv` table in a directory, sorted by id
pub fn load_mortality_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<MortalityBasis>, DataError> {
    let mut bases = Vec::new();

    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
            bases.push(load_basis(&path)?);
        }
    }

    bases.sort_by(|a, b| a.id().cmp(b.id()));
    Ok(bases)
}
