//! # Compound Parser Module
//!
//! ## Aim
//! Parses the textual notation of one chemical compound - element symbols with
//! subscript counts, parenthesized sub-groups, a leading multiplier and a superscript
//! ionic charge - into an exact composition record.
//!
//! ## Main Data Structures and Logic
//! - `ChemicalCompound`: parallel vectors of element symbols and exact counts, the net
//!   charge, the leading multiplier and the display symbol
//! - `FormulaScanner`: explicit scanner state (character buffer + cursor) passed to
//!   small parsing functions, one recursion level per parenthesized group
//! - subscripts are Unicode subscript digits or plain digits; the charge is written
//!   with superscript digits and must end with a superscript sign glyph
//!
//! ## Usage
//! ```rust, ignore
//! let compound = parse_compound("Fe2(SO4)3")?;
//! assert_eq!(compound.count_of("O"), Some(&BigRational::from_integer(12.into())));
//! ```
use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

const SUBSCRIPT_DIGITS: &str = "₀₁₂₃₄₅₆₇₈₉";
const SUPERSCRIPT_DIGITS: &str = "⁰¹²³⁴⁵⁶⁷⁸⁹";
const SUPERSCRIPT_PLUS: char = '⁺';
const SUPERSCRIPT_MINUS: char = '⁻';

/// error types for compound and equation parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty compound")]
    EmptyCompound,
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("Opening parenthesis without a matching closing parenthesis")]
    UnclosedGroup,
    #[error("Superscript needs to be ended with ⁺ or ⁻")]
    UnterminatedCharge,
    #[error("There should be exactly one reaction arrow in the equation")]
    InvalidArrowCount,
    #[error("Invalid leading coefficient '{0}'")]
    InvalidCoefficient(String),
    #[error("Invalid charge magnitude '{0}'")]
    InvalidCharge(String),
}

pub fn is_subscript(c: char) -> bool {
    SUBSCRIPT_DIGITS.contains(c) || c.is_ascii_digit()
}

pub fn is_superscript(c: char) -> bool {
    SUPERSCRIPT_DIGITS.contains(c) || c == SUPERSCRIPT_PLUS || c == SUPERSCRIPT_MINUS
}

/// Composition record of one compound: which elements it contains and how many of
/// each, its net ionic charge, its leading multiplier and its display symbol (the
/// compound text minus the leading multiplier). Element order is order of first
/// appearance in the formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalCompound {
    pub elements: Vec<String>,
    pub counts: Vec<BigRational>,
    pub charge: i32,
    pub coefficient: BigRational,
    pub symbol: String,
}

impl ChemicalCompound {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            counts: Vec::new(),
            charge: 0,
            coefficient: BigRational::from_integer(BigInt::from(1)),
            symbol: String::new(),
        }
    }

    pub fn count_of(&self, element: &str) -> Option<&BigRational> {
        self.elements
            .iter()
            .position(|e| e == element)
            .map(|i| &self.counts[i])
    }

    /// Adds a count to the accumulated count for an element, inserting the element if
    /// it is not present yet
    fn accumulate(&mut self, element: &str, count: BigRational) {
        match self.elements.iter().position(|e| e == element) {
            Some(i) => self.counts[i] += count,
            None => {
                self.elements.push(element.to_string());
                self.counts.push(count);
            }
        }
    }
}

impl Default for ChemicalCompound {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit scanner state for one compound: the character buffer and a cursor. Each
/// parsing function advances the cursor past what it consumed.
struct FormulaScanner {
    chars: Vec<char>,
    pos: usize,
}

impl FormulaScanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Consumes a run of plain digits with at most one '.' or ',' decimal separator
    /// and converts it to an exact rational
    fn parse_leading_coefficient(&mut self) -> Result<BigRational, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' || c == ',' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        rational_from_decimal(&raw)
    }

    /// Consumes an element symbol: one uppercase letter plus any following lowercase
    /// letters
    fn parse_element(&mut self) -> String {
        let mut element = String::new();
        element.push(self.chars[self.pos]);
        self.pos += 1;
        while let Some(c) = self.peek() {
            if c.is_ascii_lowercase() {
                element.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        element
    }

    /// Consumes a subscript run (Unicode subscript digits or plain digits) as a count
    fn parse_subscript(&mut self) -> u32 {
        let mut value: u32 = 0;
        while let Some(c) = self.peek() {
            let digit = if let Some(i) = SUBSCRIPT_DIGITS.chars().position(|s| s == c) {
                i as u32
            } else if let Some(d) = c.to_digit(10) {
                d
            } else {
                break;
            };
            value = value * 10 + digit;
            self.pos += 1;
        }
        value
    }

    /// Consumes a superscript charge: optional superscript digits (absent digits mean
    /// magnitude 1) terminated by a mandatory superscript sign glyph
    fn parse_charge(&mut self) -> Result<i32, ParseError> {
        let mut raw = String::new();
        while let Some(c) = self.peek() {
            if let Some(i) = SUPERSCRIPT_DIGITS.chars().position(|s| s == c) {
                raw.push(char::from_digit(i as u32, 10).unwrap());
                self.pos += 1;
            } else {
                break;
            }
        }
        let magnitude: i32 = if raw.is_empty() {
            1
        } else {
            raw.parse()
                .map_err(|_| ParseError::InvalidCharge(raw.clone()))?
        };

        match self.peek() {
            Some(SUPERSCRIPT_PLUS) => {
                self.pos += 1;
                Ok(magnitude)
            }
            Some(SUPERSCRIPT_MINUS) => {
                self.pos += 1;
                Ok(-magnitude)
            }
            _ => Err(ParseError::UnterminatedCharge),
        }
    }

    /// Finds the index of the closing parenthesis matching the one at the cursor by
    /// scanning from the end of the input. Only well-formed, unambiguous nesting is
    /// supported; sibling groups at one nesting level are rejected downstream as
    /// invalid input.
    fn find_closing_from_end(&self) -> Result<usize, ParseError> {
        for i in (self.pos + 1..self.chars.len()).rev() {
            if self.chars[i] == ')' {
                return Ok(i);
            }
        }
        Err(ParseError::UnclosedGroup)
    }
}

fn rational_from_decimal(raw: &str) -> Result<BigRational, ParseError> {
    let normalized = raw.replace(',', ".");
    let (int_part, frac_part) = match normalized.split_once('.') {
        Some((i, f)) => (i, f),
        None => (normalized.as_str(), ""),
    };
    let digits = format!("{}{}", int_part, frac_part);
    let numerator =
        BigInt::from_str(&digits).map_err(|_| ParseError::InvalidCoefficient(raw.to_string()))?;
    let denominator = (0..frac_part.len()).fold(BigInt::from(1), |acc, _| acc * 10);
    Ok(BigRational::new(numerator, denominator))
}

/// Parses one compound (already stripped of inter-compound separators) into its
/// composition record.
///
/// A leading digit run (with optional decimal separator) is the compound's
/// multiplier; uppercase-led letter runs are element symbols with optional subscript
/// counts (default 1, and a literal zero subscript is a genuine zero contribution);
/// parenthesized groups are parsed recursively and merged with their multiplier
/// applied; a superscript run sets the net charge and must end with ⁺ or ⁻.
pub fn parse_compound(input: &str) -> Result<ChemicalCompound, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyCompound);
    }
    debug!("parsing compound: {}", input);

    let mut scanner = FormulaScanner::new(input);
    let mut result = ChemicalCompound::new();

    if scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
        result.coefficient = scanner.parse_leading_coefficient()?;
    }
    result.symbol = scanner.chars[scanner.pos..].iter().collect();
    if result.symbol.is_empty() {
        return Err(ParseError::EmptyCompound);
    }

    while let Some(c) = scanner.peek() {
        if c.is_ascii_uppercase() {
            let element = scanner.parse_element();
            let count = if scanner.peek().is_some_and(is_subscript) {
                scanner.parse_subscript()
            } else {
                1
            };
            result.accumulate(&element, BigRational::from_integer(BigInt::from(count)));
        } else if c == '(' {
            let closing = scanner.find_closing_from_end()?;
            let inner: String = scanner.chars[scanner.pos + 1..closing].iter().collect();
            let sub_compound = parse_compound(&inner)?;
            scanner.pos = closing + 1;

            let mut multiplier = sub_compound.coefficient.clone();
            if scanner.peek().is_some_and(is_subscript) {
                multiplier *= BigRational::from_integer(BigInt::from(scanner.parse_subscript()));
            }
            for (element, count) in sub_compound
                .elements
                .iter()
                .zip(sub_compound.counts.iter())
            {
                result.accumulate(element, multiplier.clone() * count.clone());
            }
        } else if is_superscript(c) {
            result.charge = scanner.parse_charge()?;
        } else {
            return Err(ParseError::InvalidCharacter {
                character: c,
                position: scanner.pos,
            });
        }
    }

    Ok(result)
}
