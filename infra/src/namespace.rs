/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

// ----------- //
// Énumération //
// ----------- //

/// Les espaces de noms que l'étape de construction de l'arbre HTML peut
/// inférer, et que l'analyseur XML reconnaît sans déclaration.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum Namespace {
    HTML,
    MathML,
    SVG,
    XLink,
    XML,
    XMLNS,
}

// -------------- //
// Implémentation //
// -------------- //

impl Namespace {
    pub const fn uri(self) -> &'static str {
        match self {
            | Self::HTML => "http://www.w3.org/1999/xhtml",
            | Self::MathML => "http://www.w3.org/1998/Math/MathML",
            | Self::SVG => "http://www.w3.org/2000/svg",
            | Self::XLink => "http://www.w3.org/1999/xlink",
            | Self::XML => "http://www.w3.org/XML/1998/namespace",
            | Self::XMLNS => "http://www.w3.org/2000/xmlns/",
        }
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        [
            Self::HTML,
            Self::MathML,
            Self::SVG,
            Self::XLink,
            Self::XML,
            Self::XMLNS,
        ]
        .into_iter()
        .find(|ns| ns.uri() == uri)
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uri() {
        assert_eq!(
            Namespace::from_uri("http://www.w3.org/2000/svg"),
            Some(Namespace::SVG)
        );
        assert_eq!(Namespace::from_uri("http://example.org/"), None);
    }
}
