/// eng
/// The module takes one chemical compound given as text - element symbols with
/// subscript counts, parenthesized sub-groups, a leading multiplier, a superscript
/// ionic charge - and produces its exact composition record: which elements it
/// contains, how many of each, its net charge and its multiplier.
/// # Examples
/// ```
/// use ChemBalance::Balancer::compound_parser::parse_compound;
/// let compound = parse_compound("Fe2(SO4)3").unwrap();
/// println!("{:?}", compound.elements);
/// println!("{:?}", compound.counts);
/// ```
pub mod compound_parser;
/// eng
/// The module splits a whole equation string into its compound substrings and finds
/// every element symbol used in it, in order of first appearance, appending the
/// synthetic "Charge" symbol when superscript charges are present. These symbols
/// define the row order of the stoichiometry matrix.
pub mod equation_tokenizer;
/// eng
/// The module balances a chemical equation: it assembles the stoichiometry matrix
/// from the parsed compounds (compounds as columns, conserved symbols as rows),
/// reduces it, computes the null space exactly and scales every basis vector to the
/// smallest coprime integer coefficients. One equation gives one balanced equation,
/// several independent ones, or no solution at all.
/// # Examples
/// ```
/// use ChemBalance::Balancer::equation_balancer::{BalanceOutcome, balance_equation};
/// let outcome = balance_equation("Fe+O2→Fe2O3").unwrap();
/// assert_eq!(outcome, BalanceOutcome::Unique("4Fe + 3O2 → 2Fe2O3".to_string()));
/// ```
pub mod equation_balancer;

/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///  # Examples
/// ```
/// use ChemBalance::Balancer::molmass::calculate_molar_mass;
/// let formula = "C6H8O6";
/// let (molar_mass, composition) = calculate_molar_mass(formula).unwrap();
/// println!("Element counts: {:?}", composition.counts);
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// ```
pub mod molmass;
