pub const OPEN: char = '(';
pub const CLOSE: char = ')';
pub const UNPAIRED: char = '.';

pub fn is_symbol(c: char) -> bool {
    matches!(c, OPEN | CLOSE | UNPAIRED)
}

/// Returns the first character outside the `()`/`.` alphabet, with its position.
pub fn find_invalid_symbol(structure: &str) -> Option<(usize, char)> {
    structure.chars().enumerate().find(|&(_, c)| !is_symbol(c))
}
