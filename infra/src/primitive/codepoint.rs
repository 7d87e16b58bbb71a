/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

// ---- //
// Type //
// ---- //

/// Un point de code est un point de code Unicode et est représenté par
/// "U+" suivi de quatre à six chiffres hexadécimaux supérieurs ASCII,
/// compris entre U+0000 et U+10FFFF, inclus. La valeur d'un point de code
/// est son numéro sous-jacent.
pub type CodePoint = char;

// --------- //
// Interface //
// --------- //

pub trait CodePointIterator: Iterator<Item = CodePoint> {}

impl<It> CodePointIterator for It where It: Iterator<Item = CodePoint> {}

pub trait CodePointInterface: Copy {
    /// Un point de code ASCII est un point de code situé dans la plage
    /// U+0000 NULL à U+007F DELETE, inclusivement.
    fn is_ascii_code_point(self) -> bool;

    // est U+0009 TAB, U+000A LF, ou U+000D CR.
    fn is_ascii_tab_or_newline(self) -> bool;

    // Un C0 control est un point de code dans la gamme U+0000 NULL to
    // U+001F INFORMATION SEPARATOR ONE, inclusive.
    fn is_c0_control(self) -> bool;

    // A C0 control or space is a C0 control or U+0020 SPACE.
    fn is_c0_control_or_space(self) -> bool;

    /// Un non-caractère est un point de code qui se trouve dans
    /// l'intervalle U+FDD0 à U+FDEF, inclus, ou qui termine un plan
    /// (U+FFFE, U+FFFF, U+1FFFE, ... U+10FFFF).
    fn is_noncharacter(self) -> bool;

    /// NameStartChar de la production de noms XML 1.0.
    fn is_xml_name_start_code_point(self) -> bool;

    /// NameChar de la production de noms XML 1.0.
    fn is_xml_name_code_point(self) -> bool;
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl CodePointInterface for CodePoint {
    fn is_ascii_code_point(self) -> bool {
        matches!(self, '\0'..='\u{007F}')
    }

    fn is_ascii_tab_or_newline(self) -> bool {
        matches!(self, '\t' | '\n' | '\r')
    }

    fn is_c0_control(self) -> bool {
        matches!(self, '\0'..='\u{001F}')
    }

    fn is_c0_control_or_space(self) -> bool {
        self.is_c0_control() || self == ' '
    }

    fn is_noncharacter(self) -> bool {
        matches!(self,
            | '\u{FDD0}'..='\u{FDEF}'
            | '\u{FFFE}'..='\u{FFFF}'
            | '\u{1_FFFE}'..='\u{1_FFFF}'
            | '\u{2_FFFE}'..='\u{2_FFFF}'
            | '\u{3_FFFE}'..='\u{3_FFFF}'
            | '\u{4_FFFE}'..='\u{4_FFFF}'
            | '\u{5_FFFE}'..='\u{5_FFFF}'
            | '\u{6_FFFE}'..='\u{6_FFFF}'
            | '\u{7_FFFE}'..='\u{7_FFFF}'
            | '\u{8_FFFE}'..='\u{8_FFFF}'
            | '\u{9_FFFE}'..='\u{9_FFFF}'
            | '\u{A_FFFE}'..='\u{A_FFFF}'
            | '\u{B_FFFE}'..='\u{B_FFFF}'
            | '\u{C_FFFE}'..='\u{C_FFFF}'
            | '\u{D_FFFE}'..='\u{D_FFFF}'
            | '\u{E_FFFE}'..='\u{E_FFFF}'
            | '\u{F_FFFE}'..='\u{F_FFFF}'
            | '\u{10_FFFE}'..='\u{10_FFFF}')
    }

    /*
    NameStartChar ::= ":" | [A-Z]     | "_" | [a-z]     | [#xC0-#xD6]
                    | [#xD8-#xF6]     | [#xF8-#x2FF]    | [#x370-#x37D]
                    | [#x37F-#x1FFF]  | [#x200C-#x200D] | [#x2070-#x218F]
                    | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF]
                    | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    */
    fn is_xml_name_start_code_point(self) -> bool {
        self.is_ascii_alphabetic()
            || matches!(self, | ':' | '_'
             | '\u{00C0}'..='\u{00D6}' | '\u{00D8}'..='\u{00F6}'
             | '\u{00F8}'..='\u{02FF}' | '\u{0370}'..='\u{037D}'
             | '\u{037F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
             | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}'
             | '\u{3001}'..='\u{D7FF}' | '\u{F900}'..='\u{FDCF}'
             | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}'
            )
    }

    /*
    NameChar ::= NameStartChar    | "-" | "." | [0-9] | #xB7
               | [#x0300-#x036F]  | [#x203F-#x2040]
    */
    fn is_xml_name_code_point(self) -> bool {
        self.is_xml_name_start_code_point()
            || self.is_ascii_digit()
            || matches!(self, '-' | '.'
             | '\u{00B7}'
             | '\u{0300}'..='\u{036F}'
             | '\u{203F}'..='\u{2040}'
            )
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noncharacter() {
        assert!('\u{FDD0}'.is_noncharacter());
        assert!('\u{FFFF}'.is_noncharacter());
        assert!(!'a'.is_noncharacter());
    }

    #[test]
    fn test_xml_name() {
        assert!('a'.is_xml_name_start_code_point());
        assert!(':'.is_xml_name_start_code_point());
        assert!(!'-'.is_xml_name_start_code_point());
        assert!('-'.is_xml_name_code_point());
        assert!('7'.is_xml_name_code_point());
        assert!(!' '.is_xml_name_code_point());
    }
}
