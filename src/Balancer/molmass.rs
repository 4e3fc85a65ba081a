/// Module to calculate molar masses and element-composition matrices of chemical
/// formulae, on top of the compound parser
use crate::Balancer::compound_parser::{ChemicalCompound, ParseError, parse_compound};
use log::warn;
use nalgebra::DMatrix;
use num_traits::ToPrimitive;

// Define a struct to hold element data
pub struct Element {
    pub symbol: &'static str,
    pub atomic_mass: f64,
}

// Define a list of elements and their atomic masses
pub const ELEMENTS: &[Element] = &[
    Element { symbol: "H", atomic_mass: 1.008 },
    Element { symbol: "He", atomic_mass: 4.0026 },
    Element { symbol: "Li", atomic_mass: 6.94 },
    Element { symbol: "Be", atomic_mass: 9.0122 },
    Element { symbol: "B", atomic_mass: 10.81 },
    Element { symbol: "C", atomic_mass: 12.011 },
    Element { symbol: "N", atomic_mass: 14.007 },
    Element { symbol: "O", atomic_mass: 15.999 },
    Element { symbol: "F", atomic_mass: 18.998 },
    Element { symbol: "Ne", atomic_mass: 20.18 },
    Element { symbol: "Na", atomic_mass: 22.99 },
    Element { symbol: "Mg", atomic_mass: 24.305 },
    Element { symbol: "Al", atomic_mass: 26.98 },
    Element { symbol: "Si", atomic_mass: 28.085 },
    Element { symbol: "P", atomic_mass: 30.974 },
    Element { symbol: "S", atomic_mass: 32.065 },
    Element { symbol: "Cl", atomic_mass: 35.45 },
    Element { symbol: "Ar", atomic_mass: 39.948 },
    Element { symbol: "K", atomic_mass: 39.102 },
    Element { symbol: "Ca", atomic_mass: 40.08 },
    Element { symbol: "Sc", atomic_mass: 44.9559 },
    Element { symbol: "Ti", atomic_mass: 47.867 },
    Element { symbol: "V", atomic_mass: 50.9415 },
    Element { symbol: "Cr", atomic_mass: 51.9961 },
    Element { symbol: "Mn", atomic_mass: 54.938 },
    Element { symbol: "Fe", atomic_mass: 55.845 },
    Element { symbol: "Co", atomic_mass: 58.933 },
    Element { symbol: "Ni", atomic_mass: 58.69 },
    Element { symbol: "Cu", atomic_mass: 63.546 },
    Element { symbol: "Zn", atomic_mass: 65.38 },
    Element { symbol: "Ga", atomic_mass: 69.723 },
    Element { symbol: "Ge", atomic_mass: 72.64 },
    Element { symbol: "As", atomic_mass: 74.9216 },
    Element { symbol: "Se", atomic_mass: 78.96 },
    Element { symbol: "Br", atomic_mass: 79.904 },
    Element { symbol: "Kr", atomic_mass: 83.798 },
    Element { symbol: "Rb", atomic_mass: 85.4678 },
    Element { symbol: "Sr", atomic_mass: 87.62 },
    Element { symbol: "Y", atomic_mass: 88.9059 },
    Element { symbol: "Zr", atomic_mass: 91.224 },
    Element { symbol: "Nb", atomic_mass: 92.9064 },
    Element { symbol: "Mo", atomic_mass: 95.94 },
    Element { symbol: "Tc", atomic_mass: 98.0 },
    Element { symbol: "Ru", atomic_mass: 101.07 },
    Element { symbol: "Ag", atomic_mass: 107.868 },
    Element { symbol: "Sn", atomic_mass: 118.71 },
    Element { symbol: "I", atomic_mass: 126.904 },
    Element { symbol: "Xe", atomic_mass: 131.293 },
    Element { symbol: "Ba", atomic_mass: 137.327 },
    Element { symbol: "Pt", atomic_mass: 195.084 },
    Element { symbol: "Au", atomic_mass: 196.967 },
    Element { symbol: "Hg", atomic_mass: 200.59 },
    Element { symbol: "Pb", atomic_mass: 207.2 },
    // Add more elements here...
];

/// Looks up the atomic mass of one element symbol
pub fn molar_mass_of(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|element| element.symbol == symbol)
        .map(|element| element.atomic_mass)
}

/// Calculates the molar mass of a substance given its chemical formula, along with
/// its parsed composition. A leading multiplier scales the mass ("2H2O" weighs twice
/// what "H2O" does); element symbols missing from the table contribute nothing and
/// are logged.
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, ChemicalCompound), ParseError> {
    let compound = parse_compound(formula)?;
    let mut molar_mass = 0.0;
    for (element, count) in compound.elements.iter().zip(compound.counts.iter()) {
        match molar_mass_of(element) {
            Some(atomic_mass) => {
                molar_mass += atomic_mass * count.to_f64().unwrap_or(0.0);
            }
            None => {
                warn!("element {} is not in the atomic mass table", element);
            }
        }
    }
    molar_mass *= compound.coefficient.to_f64().unwrap_or(1.0);
    Ok((molar_mass, compound))
}

/// Calculates the molar masses of a vector of chemical formulae
pub fn calculate_molar_mass_of_vector_of_subs(
    vec_of_formulae: Vec<&str>,
) -> Result<Vec<f64>, ParseError> {
    let mut molar_masses = Vec::new();
    for formula in vec_of_formulae {
        let (molar_mass, _) = calculate_molar_mass(formula)?;
        molar_masses.push(molar_mass);
    }
    Ok(molar_masses)
}

/// Builds the element-composition matrix of a vector of formulae: one row per
/// substance, one column per element, in order of first appearance (the row order of
/// a stoichiometry matrix must stay stable, so no hash-set ordering here). Returns
/// the matrix together with the element order.
pub fn create_elem_composition_matrix(
    vec_of_formulae: Vec<&str>,
) -> Result<(DMatrix<f64>, Vec<String>), ParseError> {
    let mut elements: Vec<String> = Vec::new();
    let mut compositions = Vec::new();
    for formula in vec_of_formulae.iter() {
        let compound = parse_compound(formula)?;
        for element in compound.elements.iter() {
            if !elements.contains(element) {
                elements.push(element.clone());
            }
        }
        compositions.push(compound);
    }

    let mut matrix = DMatrix::zeros(compositions.len(), elements.len());
    for (i, compound) in compositions.iter().enumerate() {
        for (j, element) in elements.iter().enumerate() {
            if let Some(count) = compound.count_of(element) {
                matrix[(i, j)] = count.to_f64().unwrap_or(0.0);
            }
        }
    }
    Ok((matrix, elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calculate_molar_mass() {
        let (molar_mass, compound) = calculate_molar_mass("H2O").unwrap();
        assert_relative_eq!(molar_mass, 18.015, epsilon = 1e-2);
        assert_eq!(compound.elements, vec!["H", "O"]);

        let (molar_mass, _) = calculate_molar_mass("NaCl").unwrap();
        assert_relative_eq!(molar_mass, 58.44, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("C6H8O6").unwrap();
        assert_relative_eq!(molar_mass, 176.12, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("Ca(NO3)2").unwrap();
        assert_relative_eq!(molar_mass, 164.09, epsilon = 1e-2);
    }

    #[test]
    fn test_leading_multiplier_scales_the_mass() {
        let (single, _) = calculate_molar_mass("H2O").unwrap();
        let (double, _) = calculate_molar_mass("2H2O").unwrap();
        assert_relative_eq!(double, 2.0 * single, epsilon = 1e-9);

        let (half, _) = calculate_molar_mass("0.5O2").unwrap();
        assert_relative_eq!(half, 15.999, epsilon = 1e-3);
    }

    #[test]
    fn test_calculate_molar_mass_of_vector_of_substances() {
        let vec_of_formulae = vec!["H2O", "NaCl", "C6H8O6", "Ca(NO3)2"];
        let expected_molar_masses = vec![18.01528, 58.44316, 176.12, 164.093];

        let calculated = calculate_molar_mass_of_vector_of_subs(vec_of_formulae).unwrap();
        for (calculated, expected) in calculated.iter().zip(expected_molar_masses) {
            assert_relative_eq!(*calculated, expected, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_element_matrix() {
        let vec_of_formulae = vec!["H2O", "NaCl", "C3H8", "CH4"]; // 5 elements
        let (matrix, elements) = create_elem_composition_matrix(vec_of_formulae).unwrap();
        assert_eq!(matrix.nrows(), 4);
        assert_eq!(matrix.ncols(), 5);
        assert_eq!(elements, vec!["H", "O", "Na", "Cl", "C"]);

        // first substance is H2O: two hydrogens, one oxygen, nothing else
        assert_relative_eq!(matrix[(0, 0)], 2.0);
        assert_relative_eq!(matrix[(0, 1)], 1.0);
        assert_relative_eq!(matrix[(0, 2)], 0.0);
    }

    #[test]
    fn test_parse_error_propagates() {
        assert!(calculate_molar_mass("H2O)").is_err());
    }
}
