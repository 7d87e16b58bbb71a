/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::{fmt, str};

use parser::diagnostic::DiagnosticKind;

// ----- //
// Macro //
// ----- //

#[macro_export]
macro_rules! emit_html_error {
    ($err:expr) => {
        log::error!("[HTMLParserError]: {}", $err);
    };
}

macro_rules! enumerate_parser_errors {
    ( $( $variant:ident = $code:literal ),* $(,)? ) => {
        /// Les erreurs d'analyse syntaxique des documents HTML. Le
        /// traitement de chacune d'elles est bien défini : l'analyseur
        /// applique la récupération décrite par la spécification et
        /// continue. Le code affiché est celui du tableau des erreurs de
        /// la spécification HTML.
        #[derive(Debug)]
        #[derive(Copy, Clone)]
        #[derive(PartialEq, Eq)]
        pub enum HTMLParserError {
            $($variant),*
        }

        impl HTMLParserError {
            pub const fn code(self) -> &'static str {
                match self {
                    $( | Self::$variant => $code ),*
                }
            }
        }

        impl str::FromStr for HTMLParserError {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $( | $code => Self::$variant, )*
                    | _ => return Err("Code d'erreur d'analyse inconnu"),
                })
            }
        }
    };
}

// ----------- //
// Énumération //
// ----------- //

enumerate_parser_errors! {
    AbruptClosingOfEmptyComment = "abrupt-closing-of-empty-comment",
    AbruptDoctypePublicIdentifier = "abrupt-doctype-public-identifier",
    AbruptDoctypeSystemIdentifier = "abrupt-doctype-system-identifier",
    AbsenceOfDigitsInNumericCharacterReference =
        "absence-of-digits-in-numeric-character-reference",
    CDATAInHtmlContent = "cdata-in-html-content",
    CharacterReferenceOutsideUnicodeRange =
        "character-reference-outside-unicode-range",
    ControlCharacterReference = "control-character-reference",
    DuplicateAttribute = "duplicate-attribute",
    EndTagWithAttributes = "end-tag-with-attributes",
    EndTagWithTrailingSolidus = "end-tag-with-trailing-solidus",
    EOFBeforeTagName = "eof-before-tag-name",
    EOFInCDATA = "eof-in-cdata",
    EOFInComment = "eof-in-comment",
    EOFInDOCTYPE = "eof-in-doctype",
    EOFInScriptHtmlCommentLikeText =
        "eof-in-script-html-comment-like-text",
    EOFInTag = "eof-in-tag",
    IncorrectlyClosedComment = "incorrectly-closed-comment",
    IncorrectlyOpenedComment = "incorrectly-opened-comment",
    InvalidCharacterSequenceAfterDoctypeName =
        "invalid-character-sequence-after-doctype-name",
    InvalidFirstCharacterOfTagName =
        "invalid-first-character-of-tag-name",
    MissingAttributeValue = "missing-attribute-value",
    MissingDoctypeName = "missing-doctype-name",
    MissingDoctypePublicIdentifier =
        "missing-doctype-public-identifier",
    MissingDoctypeSystemIdentifier =
        "missing-doctype-system-identifier",
    MissingEndTagName = "missing-end-tag-name",
    MissingQuoteBeforeDoctypePublicIdentifier =
        "missing-quote-before-doctype-public-identifier",
    MissingQuoteBeforeDoctypeSystemIdentifier =
        "missing-quote-before-doctype-system-identifier",
    MissingSemicolonAfterCharacterReference =
        "missing-semicolon-after-character-reference",
    MissingWhitespaceAfterDoctypePublicKeyword =
        "missing-whitespace-after-doctype-public-keyword",
    MissingWhitespaceAfterDoctypeSystemKeyword =
        "missing-whitespace-after-doctype-system-keyword",
    MissingWhitespaceBeforeDoctypeName =
        "missing-whitespace-before-doctype-name",
    MissingWhitespaceBetweenAttributes =
        "missing-whitespace-between-attributes",
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers =
        "missing-whitespace-between-doctype-public-and-system-identifiers",
    NestedComment = "nested-comment",
    NoncharacterCharacterReference =
        "noncharacter-character-reference",
    NullCharacterReference = "null-character-reference",
    SurrogateCharacterReference = "surrogate-character-reference",
    UnexpectedCharacterAfterDoctypeSystemIdentifier =
        "unexpected-character-after-doctype-system-identifier",
    UnexpectedCharacterInAttributeName =
        "unexpected-character-in-attribute-name",
    UnexpectedCharacterInUnquotedAttributeValue =
        "unexpected-character-in-unquoted-attribute-value",
    UnexpectedEqualsSignBeforeAttributeName =
        "unexpected-equals-sign-before-attribute-name",
    UnexpectedNullCharacter = "unexpected-null-character",
    UnexpectedQuestionMarkInsteadOfTagName =
        "unexpected-question-mark-instead-of-tag-name",
    UnexpectedSolidusInTag = "unexpected-solidus-in-tag",
    UnknownNamedCharacterReference =
        "unknown-named-character-reference",
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLParserError {
    /// La nature du diagnostic correspondant, pour le rapport.
    pub const fn kind(self) -> DiagnosticKind {
        match self {
            | Self::DuplicateAttribute => {
                DiagnosticKind::AttributeDuplicated
            }
            | _ => DiagnosticKind::BadToken,
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for HTMLParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        let err: HTMLParserError =
            "unexpected-null-character".parse().unwrap();
        assert_eq!(err, HTMLParserError::UnexpectedNullCharacter);
        assert_eq!(err.to_string(), "unexpected-null-character");
    }
}
