// ============================================================
// Layer 3 — Label Rule
// ============================================================
// Assigns one of four classes to a sequence of tokens:
//
//   class 1 — contains any of {a, b, c}
//   class 2 — else contains any of {l, m, n}
//   class 3 — else contains any of {x, y, z}
//   class 0 — none of the above
//
// Groups are tested in that order and the first hit wins,
// so "xa" is class 1, not class 3.
//
// The "unk" token is not a character and never matches a group.

use std::collections::HashSet;

use crate::domain::vocab::Token;

/// Number of classes the rule can produce
pub const CLASS_NUM: usize = 4;

/// Class of a sequence that hits no group
pub const NO_GROUP_CLASS: usize = 0;

/// (class, group) pairs in priority order
pub const CLASS_GROUPS: [(usize, [char; 3]); 3] = [
    (1, ['a', 'b', 'c']),
    (2, ['l', 'm', 'n']),
    (3, ['x', 'y', 'z']),
];

/// Class of a token sequence.
pub fn real_class<I>(tokens: I) -> usize
where
    I: IntoIterator<Item = Token>,
{
    let present: HashSet<char> = tokens
        .into_iter()
        .filter_map(|t| t.as_char())
        .collect();

    CLASS_GROUPS
        .iter()
        .find(|(_, group)| group.iter().any(|c| present.contains(c)))
        .map(|(class, _)| *class)
        .unwrap_or(NO_GROUP_CLASS)
}

/// Class of a raw string, one token per character.
pub fn real_class_of_str(input: &str) -> usize {
    real_class(input.chars().map(Token::Char))
}
