/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

use parser::diagnostic::DiagnosticKind;

// ----- //
// Macro //
// ----- //

#[macro_export]
macro_rules! emit_xml_error {
    ($err:expr) => {
        log::error!("[XMLParserError]: {}", $err);
    };
}

// ----------- //
// Énumération //
// ----------- //

/// Les violations de bonne formation XML. Toutes sont récupérables :
/// l'analyseur signale puis synthétise la structure la plus plausible, de
/// sorte que la sortie reste un arbre bien formé.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum XMLParserError {
    AttributeDuplicated,
    ContentAfterRoot,
    InvalidCharacterReference,
    InvalidName,
    UndeclaredPrefix,
    UnexpectedEndOfFile,
    UnknownEntity,
    UnmatchedEndTag,
}

// -------------- //
// Implémentation //
// -------------- //

impl XMLParserError {
    pub const fn code(self) -> &'static str {
        match self {
            | Self::AttributeDuplicated => "attribute-duplicated",
            | Self::ContentAfterRoot => "content-after-root",
            | Self::InvalidCharacterReference => {
                "invalid-character-reference"
            }
            | Self::InvalidName => "invalid-name",
            | Self::UndeclaredPrefix => "undeclared-prefix",
            | Self::UnexpectedEndOfFile => "unexpected-end-of-file",
            | Self::UnknownEntity => "unknown-entity",
            | Self::UnmatchedEndTag => "unmatched-end-tag",
        }
    }

    pub const fn kind(self) -> DiagnosticKind {
        match self {
            | Self::AttributeDuplicated => {
                DiagnosticKind::AttributeDuplicated
            }
            | Self::ContentAfterRoot => DiagnosticKind::BadContent,
            | Self::InvalidCharacterReference
            | Self::UnknownEntity => DiagnosticKind::BadToken,
            | Self::InvalidName => DiagnosticKind::BadToken,
            | Self::UndeclaredPrefix => DiagnosticKind::BadNamespace,
            | Self::UnexpectedEndOfFile => DiagnosticKind::BadDocument,
            | Self::UnmatchedEndTag => DiagnosticKind::UnmatchedEndTag,
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for XMLParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
