use log::{error, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One line of a periodic table file: symbol, element name, molar mass and an
/// optional electronegativity
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub symbol: String,
    pub name: String,
    pub molar_mass: f64,
    pub electronegativity: Option<f64>,
}

/// Parses a flat periodic-table text file into element records.
/// Each data line holds whitespace-separated fields: symbol, name, molar mass and an
/// optional electronegativity. Empty lines and lines starting with '#' are skipped.
pub fn load_periodic_table(file_name: &str) -> Result<Vec<ElementRecord>, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Err(format!("Failed to open file '{}': {}", file_name, e)),
    };
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => return Err(format!("Failed to read file '{}': {}", file_name, e)),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 3 {
            error!(
                "malformed line {} in '{}': {}",
                line_number + 1,
                file_name,
                trimmed
            );
            return Err(format!(
                "Malformed periodic table line {} in file '{}'",
                line_number + 1,
                file_name
            ));
        }

        let molar_mass: f64 = fields[2].parse().map_err(|_| {
            format!(
                "Invalid molar mass '{}' on line {} of file '{}'",
                fields[2],
                line_number + 1,
                file_name
            )
        })?;
        let electronegativity = fields.get(3).and_then(|raw| raw.parse().ok());

        records.push(ElementRecord {
            symbol: fields[0].to_string(),
            name: fields[1].to_string(),
            molar_mass,
            electronegativity,
        });
    }

    info!("loaded {} elements from '{}'", records.len(), file_name);
    Ok(records)
}

/// Loads a flat periodic-table file into a symbol-to-molar-mass map
pub fn load_element_masses(file_name: &str) -> Result<HashMap<String, f64>, String> {
    let records = load_periodic_table(file_name)?;
    Ok(records
        .into_iter()
        .map(|record| (record.symbol, record.molar_mass))
        .collect())
}

/// Loads a JSON periodic-table file (an object mapping element symbols to molar
/// masses) into a symbol-to-molar-mass map
pub fn load_element_masses_json(file_name: &str) -> Result<HashMap<String, f64>, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return Err(format!("Failed to read file '{}': {}", file_name, e)),
    };

    let masses: HashMap<String, f64> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse JSON in file '{}': {}", file_name, e))?;
    info!("loaded {} elements from '{}'", masses.len(), file_name);
    Ok(masses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_periodic_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# symbol name molar_mass electronegativity").unwrap();
        writeln!(file, "H Hydrogen 1.008 2.2").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "O Oxygen 15.999 3.44").unwrap();
        writeln!(file, "Fe Iron 55.845").unwrap();

        let records = load_periodic_table(file.path().to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].symbol, "H");
        assert_eq!(records[0].name, "Hydrogen");
        assert_relative_eq!(records[0].molar_mass, 1.008);
        assert_relative_eq!(records[1].electronegativity.unwrap(), 3.44);
        assert_eq!(records[2].electronegativity, None);
    }

    #[test]
    fn test_load_element_masses() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Na Sodium 22.99 0.93").unwrap();
        writeln!(file, "Cl Chlorine 35.45 3.16").unwrap();

        let masses = load_element_masses(file.path().to_str().unwrap()).unwrap();
        assert_eq!(masses.len(), 2);
        assert_relative_eq!(masses["Na"], 22.99);
        assert_relative_eq!(masses["Cl"], 35.45);
    }

    #[test]
    fn test_load_element_masses_json() {
        let mut file = NamedTempFile::new().unwrap();
        let table = json!({"H": 1.008, "O": 15.999});
        write!(file, "{}", table).unwrap();

        let masses = load_element_masses_json(file.path().to_str().unwrap()).unwrap();
        assert_relative_eq!(masses["H"], 1.008);
        assert_relative_eq!(masses["O"], 15.999);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        assert!(load_periodic_table("no_such_periodic_table.txt").is_err());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "H Hydrogen").unwrap();
        assert!(load_periodic_table(file.path().to_str().unwrap()).is_err());

        let mut bad_mass = NamedTempFile::new().unwrap();
        writeln!(bad_mass, "H Hydrogen heavy").unwrap();
        assert!(load_periodic_table(bad_mass.path().to_str().unwrap()).is_err());
    }
}
