//! Splits a raw equation string into its compound substrings and collects the ordered
//! set of element symbols appearing anywhere in it. This is a light lexical scan; full
//! composition parsing is the compound parser's job. The synthetic "Charge" symbol is
//! appended to the element set when any superscript charge notation occurs, so that
//! net charge is conserved like an element.
use crate::Balancer::compound_parser::{ParseError, is_superscript};
use log::debug;
use regex::Regex;

/// Pseudo-element under which net ionic charge is conserved
pub const CHARGE_SYMBOL: &str = "Charge";

/// Splits an equation into its compound substrings, in order of appearance.
///
/// Whitespace is insignificant and stripped first. Exactly one reaction arrow ('→' or
/// the ASCII "->") must separate the two sides; compounds within a side are separated
/// by '+'. The superscript '⁺' of a charge is not a separator.
pub fn split_equation(input: &str) -> Result<Vec<String>, ParseError> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let arrow = Regex::new(r"→|->").unwrap();
    let sides: Vec<&str> = arrow.split(&cleaned).collect();
    if sides.len() != 2 {
        return Err(ParseError::InvalidArrowCount);
    }

    let mut compounds = Vec::new();
    for side in sides {
        for compound in side.split('+') {
            if compound.is_empty() {
                return Err(ParseError::EmptyCompound);
            }
            compounds.push(compound.to_string());
        }
    }
    debug!("equation split into compounds: {:?}", compounds);
    Ok(compounds)
}

/// Finds all element symbols in an equation (or a single compound), in order of first
/// appearance, with "Charge" appended at the end if any superscript charge notation is
/// present. An uppercase letter starts a symbol, lowercase letters continue it; every
/// other character ends it.
pub fn find_all_elements(input: &str) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    let mut proposal = String::new();
    let mut uses_charge = false;

    fn push_proposal(proposal: &str, result: &mut Vec<String>) {
        if !proposal.is_empty() && !result.iter().any(|e| e == proposal) {
            result.push(proposal.to_string());
        }
    }

    for c in input.chars() {
        if c.is_ascii_uppercase() {
            push_proposal(&proposal, &mut result);
            proposal = c.to_string();
        } else if c.is_ascii_lowercase() {
            if !proposal.is_empty() {
                proposal.push(c);
            }
        } else {
            if is_superscript(c) {
                uses_charge = true;
            }
            push_proposal(&proposal, &mut result);
            proposal.clear();
        }
    }
    push_proposal(&proposal, &mut result);

    if uses_charge {
        result.push(CHARGE_SYMBOL.to_string());
    }
    result
}
