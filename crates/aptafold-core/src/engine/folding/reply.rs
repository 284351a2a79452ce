use crate::core::structure::dot_bracket::{self, OPEN};
use crate::engine::error::FoldError;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFold {
    pub structure: String,
    pub energy: f64,
}

/// Parses an RNAfold reply for `sequence`.
///
/// The reply is expected to hold the echoed sequence on its first line and
/// `<structure> (<energy>)` on its second. The second line is split on its rightmost
/// whitespace run; the trailing token, stripped of parentheses, is the energy. RNAfold
/// right-aligns short energies inside the parentheses (`((...)) ( -1.20)`), which leaves
/// a detached `(` at the end of the structure part; it is dropped before validation.
///
/// # Errors
///
/// Returns a [`FoldError`] if the structure line is missing, the energy is absent or not
/// a finite number, or the structure is not a dot-bracket string of the same length as
/// `sequence`.
pub fn parse_reply(sequence: &str, reply: &str) -> Result<ParsedFold, FoldError> {
    let line = reply
        .trim()
        .lines()
        .nth(1)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or(FoldError::MissingStructureLine)?;

    let split = line
        .rfind(char::is_whitespace)
        .ok_or_else(|| FoldError::MissingEnergy(line.to_string()))?;
    let (head, token) = line.split_at(split);

    let energy_text = token.trim().trim_matches(|c| c == '(' || c == ')');
    let energy: f64 = energy_text
        .parse()
        .map_err(|_| FoldError::InvalidEnergy(energy_text.to_string()))?;
    if !energy.is_finite() {
        return Err(FoldError::InvalidEnergy(energy_text.to_string()));
    }

    let mut structure = head.trim_end();
    if let Some(rest) = structure.strip_suffix(OPEN) {
        if rest.ends_with(char::is_whitespace) {
            structure = rest.trim_end();
        }
    }

    if let Some((position, symbol)) = dot_bracket::find_invalid_symbol(structure) {
        return Err(FoldError::InvalidSymbol { position, symbol });
    }

    let expected = sequence.chars().count();
    let found = structure.chars().count();
    if expected != found {
        return Err(FoldError::LengthMismatch { expected, found });
    }

    Ok(ParsedFold {
        structure: structure.to_string(),
        energy,
    })
}
