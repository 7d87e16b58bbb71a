/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::{fmt, str};

// ------ //
// Macros //
// ------ //

macro_rules! enumerate_tokenizer_states {
    ( $( $variant:ident = $name:literal ),* $(,)? ) => {
        /// Les états de la section « Tokenization » de la spécification
        /// HTML. La machine à états passe d'un état à l'autre par le nom
        /// que la spécification leur donne (« Switch to the ... state »).
        #[derive(Debug)]
        #[derive(Copy, Clone)]
        #[derive(PartialEq, Eq)]
        pub enum State {
            $($variant),*
        }

        impl str::FromStr for State {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $( | $name => Self::$variant, )*
                    | _ => return Err("État de tokenisation inconnu"),
                })
            }
        }

        impl fmt::Display for State {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", match self { $( | Self::$variant => $name ),* })
            }
        }
    };
}

// ----------- //
// Énumération //
// ----------- //

enumerate_tokenizer_states! {
    Data = "data",
    RCDATA = "rcdata",
    RAWTEXT = "rawtext",
    ScriptData = "script-data",
    PLAINTEXT = "plaintext",
    TagOpen = "tag-open",
    EndTagOpen = "end-tag-open",
    TagName = "tag-name",
    RCDATALessThanSign = "rcdata-less-than-sign",
    RCDATAEndTagOpen = "rcdata-end-tag-open",
    RCDATAEndTagName = "rcdata-end-tag-name",
    RAWTEXTLessThanSign = "rawtext-less-than-sign",
    RAWTEXTEndTagOpen = "rawtext-end-tag-open",
    RAWTEXTEndTagName = "rawtext-end-tag-name",
    ScriptDataLessThanSign = "script-data-less-than-sign",
    ScriptDataEndTagOpen = "script-data-end-tag-open",
    ScriptDataEndTagName = "script-data-end-tag-name",
    ScriptDataEscapeStart = "script-data-escape-start",
    ScriptDataEscapeStartDash = "script-data-escape-start-dash",
    ScriptDataEscaped = "script-data-escaped",
    ScriptDataEscapedDash = "script-data-escaped-dash",
    ScriptDataEscapedDashDash = "script-data-escaped-dash-dash",
    ScriptDataEscapedLessThanSign = "script-data-escaped-less-than-sign",
    ScriptDataEscapedEndTagOpen = "script-data-escaped-end-tag-open",
    ScriptDataEscapedEndTagName = "script-data-escaped-end-tag-name",
    ScriptDataDoubleEscapeStart = "script-data-double-escape-start",
    ScriptDataDoubleEscaped = "script-data-double-escaped",
    ScriptDataDoubleEscapedDash = "script-data-double-escaped-dash",
    ScriptDataDoubleEscapedDashDash =
        "script-data-double-escaped-dash-dash",
    ScriptDataDoubleEscapedLessThanSign =
        "script-data-double-escaped-less-than-sign",
    ScriptDataDoubleEscapeEnd = "script-data-double-escape-end",
    BeforeAttributeName = "before-attribute-name",
    AttributeName = "attribute-name",
    AfterAttributeName = "after-attribute-name",
    BeforeAttributeValue = "before-attribute-value",
    AttributeValueDoubleQuoted = "attribute-value-double-quoted",
    AttributeValueSingleQuoted = "attribute-value-single-quoted",
    AttributeValueUnquoted = "attribute-value-unquoted",
    AfterAttributeValueQuoted = "after-attribute-value-quoted",
    SelfClosingStartTag = "self-closing-start-tag",
    BogusComment = "bogus-comment",
    MarkupDeclarationOpen = "markup-declaration-open",
    CommentStart = "comment-start",
    CommentStartDash = "comment-start-dash",
    Comment = "comment",
    CommentLessThanSign = "comment-less-than-sign",
    CommentLessThanSignBang = "comment-less-than-sign-bang",
    CommentLessThanSignBangDash = "comment-less-than-sign-bang-dash",
    CommentLessThanSignBangDashDash =
        "comment-less-than-sign-bang-dash-dash",
    CommentEndDash = "comment-end-dash",
    CommentEnd = "comment-end",
    CommentEndBang = "comment-end-bang",
    DOCTYPE = "doctype",
    BeforeDOCTYPEName = "before-doctype-name",
    DOCTYPEName = "doctype-name",
    AfterDOCTYPEName = "after-doctype-name",
    AfterDOCTYPEPublicKeyword = "after-doctype-public-keyword",
    BeforeDOCTYPEPublicIdentifier = "before-doctype-public-identifier",
    DOCTYPEPublicIdentifierDoubleQuoted =
        "doctype-public-identifier-double-quoted",
    DOCTYPEPublicIdentifierSingleQuoted =
        "doctype-public-identifier-single-quoted",
    AfterDOCTYPEPublicIdentifier = "after-doctype-public-identifier",
    BetweenDOCTYPEPublicAndSystemIdentifiers =
        "between-doctype-public-and-system-identifiers",
    AfterDOCTYPESystemKeyword = "after-doctype-system-keyword",
    BeforeDOCTYPESystemIdentifier = "before-doctype-system-identifier",
    DOCTYPESystemIdentifierDoubleQuoted =
        "doctype-system-identifier-double-quoted",
    DOCTYPESystemIdentifierSingleQuoted =
        "doctype-system-identifier-single-quoted",
    AfterDOCTYPESystemIdentifier = "after-doctype-system-identifier",
    BogusDOCTYPE = "bogus-doctype",
    CDATASection = "cdata-section",
    CDATASectionBracket = "cdata-section-bracket",
    CDATASectionEnd = "cdata-section-end",
    CharacterReference = "character-reference",
    NamedCharacterReference = "named-character-reference",
    AmbiguousAmpersand = "ambiguous-ampersand",
    NumericCharacterReference = "numeric-character-reference",
    HexadecimalCharacterReferenceStart =
        "hexadecimal-character-reference-start",
    DecimalCharacterReferenceStart =
        "decimal-character-reference-start",
    HexadecimalCharacterReference = "hexadecimal-character-reference",
    DecimalCharacterReference = "decimal-character-reference",
    NumericCharacterReferenceEnd = "numeric-character-reference-end",
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names_round_trip() {
        let state: State = "script-data-double-escape-start".parse().unwrap();
        assert_eq!(state, State::ScriptDataDoubleEscapeStart);
        assert_eq!(
            state.to_string(),
            "script-data-double-escape-start"
        );
    }
}
