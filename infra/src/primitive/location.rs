/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

use super::codepoint::CodePoint;

// --------- //
// Structure //
// --------- //

/// Un emplacement dans le flux d'entrée : une paire (ligne, colonne),
/// toutes deux à base 1. Les tabulations comptent pour une colonne, un
/// U+000A LINE FEED remet la colonne à 1 et incrémente la ligne.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
#[derive(PartialOrd, Ord)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

// -------------- //
// Implémentation //
// -------------- //

impl Location {
    pub const fn new() -> Self {
        Self { line: 1, column: 1 }
    }

    /// L'emplacement du point de code suivant, si `ch` vient d'être
    /// consommé à cet emplacement.
    pub fn advance(&mut self, ch: CodePoint) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let mut location = Location::new();
        location.advance('a');
        assert_eq!(location, Location { line: 1, column: 2 });
        location.advance('\n');
        assert_eq!(location, Location { line: 2, column: 1 });
        location.advance('\t');
        assert_eq!(location, Location { line: 2, column: 2 });
    }
}
