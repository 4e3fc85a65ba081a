//! # Equation Balancer Module
//!
//! ## Aim
//! Balances a chemical reaction equation by exact linear algebra: the equation is
//! turned into a stoichiometry matrix (one column per compound, one row per conserved
//! symbol - every element plus net charge), the null space of that matrix is computed,
//! and each null-space basis vector is scaled to the smallest coprime integer
//! coefficients.
//!
//! ## Main Data Structures and Logic
//! - `EquationBalancer`: pipeline struct collecting everything derived from one
//!   equation (compound substrings, parsed composition records, symbol universe,
//!   stoichiometry matrix, integer solutions)
//! - `BalanceOutcome`: unique balanced equation, several independent basis equations,
//!   or no solution; the last two are legitimate chemical outcomes, not errors
//! - matrix entries are unsigned; the sign pattern of a null-space vector decides
//!   which side of the arrow each compound lands on (the sign of the first nonzero
//!   coefficient marks the left side)
//!
//! ## Key Methods
//! - `tokenize()` / `parse_compounds()` / `create_chemical_matrix()`: pipeline stages
//! - `solve()`: reduction, zero-row removal, nullity test, null-space extraction via
//!   the append-identity-and-invert construction, integerization, formatting
//! - `balance_equation()`: one-shot convenience over the whole pipeline
//!
//! ## Usage
//! ```rust, ignore
//! let outcome = balance_equation("Fe+O2→Fe2O3")?;
//! assert_eq!(outcome, BalanceOutcome::Unique("4Fe + 3O2 → 2Fe2O3".to_string()));
//! ```
use crate::Balancer::compound_parser::{ChemicalCompound, ParseError, parse_compound};
use crate::Balancer::equation_tokenizer::{CHARGE_SYMBOL, find_all_elements, split_equation};
use crate::LinAlg::matrix::{Matrix, MatrixError};
use log::{debug, info};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// error types for the balancing pipeline
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),
    /// Defect-class failure: an invariant the pipeline establishes beforehand did not
    /// hold (e.g. the extended matrix failed to invert after nullity >= 1 was checked)
    #[error("Internal invariant violated: {0}")]
    Internal(&'static str),
}

/// Outcome of balancing one equation. `NoSolution` and `Underdetermined` are normal
/// chemical outcomes: the first means the equation as written cannot be balanced, the
/// second that the solution space has more than one independent direction and the
/// caller must combine the reported basis equations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceOutcome {
    Unique(String),
    Underdetermined(Vec<String>),
    NoSolution,
}

/// THE STRUCT EquationBalancer COLLECTS EVERYTHING DERIVED FROM ONE EQUATION while it
/// is being balanced: the compound substrings in order, their parsed composition
/// records, the symbol universe (elements in first-appearance order plus "Charge"
/// when used), the stoichiometry matrix and the integer solution vectors.
/// Nothing is shared between balancing calls.
#[derive(Debug, Clone)]
pub struct EquationBalancer {
    pub equation: String,
    pub compounds: Vec<String>,
    pub parsed_compounds: Vec<ChemicalCompound>,
    pub elements: Vec<String>,
    pub chemical_matrix: Option<Matrix<BigRational>>,
    pub solutions: Vec<Vec<BigInt>>,
}

impl EquationBalancer {
    pub fn new(equation: &str) -> Self {
        Self {
            equation: equation.to_string(),
            compounds: Vec::new(),
            parsed_compounds: Vec::new(),
            elements: Vec::new(),
            chemical_matrix: None,
            solutions: Vec::new(),
        }
    }

    /// Splits the equation into compound substrings and collects the symbol universe
    pub fn tokenize(&mut self) -> Result<(), BalanceError> {
        self.compounds = split_equation(&self.equation)?;
        self.elements = find_all_elements(&self.equation);
        debug!(
            "tokenized {} compounds over symbols {:?}",
            self.compounds.len(),
            self.elements
        );
        Ok(())
    }

    /// Parses every compound substring into its composition record
    pub fn parse_compounds(&mut self) -> Result<(), BalanceError> {
        self.parsed_compounds = self
            .compounds
            .iter()
            .map(|compound| parse_compound(compound))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(())
    }

    /// Assembles the stoichiometry matrix: one column per compound in equation order,
    /// one row per symbol in universe order; every entry is that compound's exact
    /// count for that symbol (the net charge for the "Charge" row). Leading compound
    /// multipliers are bookkeeping for amounts of substance and stay out of the
    /// matrix.
    pub fn create_chemical_matrix(&mut self) -> Result<(), BalanceError> {
        let mut matrix = Matrix::new(self.compounds.len(), self.elements.len());

        for (i, compound) in self.parsed_compounds.iter().enumerate() {
            for (element, count) in compound.elements.iter().zip(compound.counts.iter()) {
                let row = self
                    .elements
                    .iter()
                    .position(|e| e == element)
                    .ok_or(BalanceError::Internal(
                        "parsed element missing from the symbol universe",
                    ))?;
                matrix[(i, row)] = count.clone();
            }

            if compound.charge != 0 {
                let row = self
                    .elements
                    .iter()
                    .position(|e| e == CHARGE_SYMBOL)
                    .ok_or(BalanceError::Internal(
                        "charged compound but no charge row in the symbol universe",
                    ))?;
                matrix[(i, row)] = BigRational::from_integer(BigInt::from(compound.charge));
            }
        }

        self.chemical_matrix = Some(matrix);
        Ok(())
    }

    /// Runs the whole pipeline and returns the balancing outcome.
    ///
    /// The stoichiometry matrix is reduced, redundant all-zero rows are dropped and
    /// the nullity is read off. Nullity <= 0 means no solution. Otherwise the reduced
    /// matrix is extended with a [0 | I] block to a square matrix and inverted; the
    /// last `nullity` columns of the inverse span the null space. Each basis column is
    /// scaled to coprime integers and formatted, the sign of its first nonzero entry
    /// choosing the left side of the arrow.
    pub fn solve(&mut self) -> Result<BalanceOutcome, BalanceError> {
        info!("balancing equation: {}", self.equation);
        self.tokenize()?;
        self.parse_compounds()?;
        self.create_chemical_matrix()?;

        let matrix = self
            .chemical_matrix
            .as_ref()
            .ok_or(BalanceError::Internal("chemical matrix was not assembled"))?;
        let mut reduced = matrix.reduced_row_echelon_form();

        // redundant element constraints reduce to all-zero rows
        let mut i = 0;
        while i < reduced.row_number() {
            let all_zeros = reduced
                .get_row(i)?
                .to_flat_vec()
                .iter()
                .all(|value| value.is_zero());
            if all_zeros {
                reduced.remove_row(i)?;
            } else {
                i += 1;
            }
        }

        let column_number = reduced.column_number();
        if reduced.row_number() >= column_number {
            info!("no balancing solution: the stoichiometry matrix has full column rank");
            return Ok(BalanceOutcome::NoSolution);
        }
        let nullity = column_number - reduced.row_number();
        debug!(
            "reduced matrix is {}x{}, nullity {}",
            column_number,
            reduced.row_number(),
            nullity
        );

        let mut part = Matrix::new(column_number - nullity, nullity);
        part.append_columns(&Matrix::identity(nullity))?;
        reduced.append_rows(&part)?;

        let inverse = reduced.inverse().map_err(|_| {
            BalanceError::Internal("the extended stoichiometry matrix could not be inverted")
        })?;

        self.solutions.clear();
        let mut formatted = Vec::new();
        for i in 1..=nullity {
            let raw = inverse.column_values(inverse.column_number() - i)?;
            let solution = integerize(&raw);
            formatted.push(self.format_solution(&solution));
            self.solutions.push(solution);
        }

        if nullity == 1 {
            let equation = formatted.pop().unwrap();
            info!("balanced: {}", equation);
            Ok(BalanceOutcome::Unique(equation))
        } else {
            info!("{} independent balancing solutions", nullity);
            Ok(BalanceOutcome::Underdetermined(formatted))
        }
    }

    /// Formats one integer solution vector as a balanced equation. Compounds whose
    /// coefficient shares the sign of the first nonzero coefficient go left of the
    /// arrow, the rest go right; magnitude-1 coefficients are not written and
    /// zero-coefficient compounds are left out.
    fn format_solution(&self, solution: &[BigInt]) -> String {
        let side_sign = solution
            .iter()
            .find(|value| !value.is_zero())
            .map(|value| value.sign())
            .unwrap_or(Sign::Plus);

        let mut reactants = Vec::new();
        let mut products = Vec::new();
        for (value, compound) in solution.iter().zip(self.parsed_compounds.iter()) {
            if value.is_zero() {
                continue;
            }
            let magnitude = value.abs();
            let coefficient = if magnitude.is_one() {
                String::new()
            } else {
                magnitude.to_string()
            };
            let term = format!("{}{}", coefficient, compound.symbol);
            if value.sign() == side_sign {
                reactants.push(term);
            } else {
                products.push(term);
            }
        }

        format!("{} → {}", reactants.join(" + "), products.join(" + "))
    }

    /// Prints the stoichiometry matrix with its symbol and compound labels
    pub fn pretty_print(&self) {
        if let Some(matrix) = &self.chemical_matrix {
            let mut table = Table::new();

            let mut header = vec![Cell::new("")];
            header.extend(self.compounds.iter().map(|c| Cell::new(c)));
            table.add_row(Row::new(header));

            for (row_index, element) in self.elements.iter().enumerate() {
                let mut cells = vec![Cell::new(element)];
                for column in 0..matrix.column_number() {
                    let value = &matrix[(column, row_index)];
                    cells.push(Cell::new(&value.to_string()));
                }
                table.add_row(Row::new(cells));
            }
            table.printstd();
        } else {
            println!("EquationBalancer::pretty_print: chemical_matrix is None");
        }
    }
}

/// Scales a null-space vector to the smallest coprime integer vector pointing the
/// same way: every entry is multiplied by lcm(denominators) / gcd(numerators), which
/// makes all entries exact integers sharing no common divisor.
pub(crate) fn integerize(raw: &[BigRational]) -> Vec<BigInt> {
    let mut lcm = BigInt::one();
    let mut gcd = BigInt::zero();
    for value in raw {
        lcm = lcm.lcm(value.denom());
        gcd = gcd.gcd(value.numer());
    }
    if gcd.is_zero() {
        return raw.iter().map(|value| value.to_integer()).collect();
    }

    let k = BigRational::new(lcm, gcd);
    raw.iter().map(|value| (value * &k).to_integer()).collect()
}

/// Balances a chemical equation given as text. One-shot convenience over
/// [`EquationBalancer`].
/// # Example
/// ```
/// use ChemBalance::Balancer::equation_balancer::{BalanceOutcome, balance_equation};
/// let outcome = balance_equation("H2 +O2→H2O").unwrap();
/// assert_eq!(outcome, BalanceOutcome::Unique("2H2 + O2 → 2H2O".to_string()));
/// ```
pub fn balance_equation(input: &str) -> Result<BalanceOutcome, BalanceError> {
    EquationBalancer::new(input).solve()
}
