/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use infra::primitive::codepoint::{
    CodePoint, CodePointInterface, CodePointIterator,
};
use named_character_references::NamedReferencesTrie;
use parser::{decoder::WINDOWS_1252_HIGH, StreamIteratorInterface};

use crate::tokenization::{
    tokenizer::{
        HTMLTokenizerProcessInterface, HTMLTokenizerProcessResult,
    },
    HTMLToken, HTMLTokenizer,
};

impl<C> HTMLTokenizer<C>
where
    C: CodePointIterator,
{
    pub(crate) fn handle_character_reference_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.set_temporary_buffer(String::new())
            .append_character_to_temporary_buffer('&');

        match self.stream.consume_next_input_character() {
            // ASCII alphanumeric
            //
            // Reprendre dans l'état `named-character-reference`.
            | Some(ch) if ch.is_ascii_alphanumeric() => {
                self.reconsume("named-character-reference").and_continue()
            }

            // U+0023 NUMBER SIGN (#)
            //
            // Ajouter le caractère actuel au tampon temporaire. Passer à
            // l'état `numeric-character-reference`.
            | Some(ch @ '#') => self
                .append_character_to_temporary_buffer(ch)
                .switch_state_to("numeric-character-reference")
                .and_continue(),

            // Anything else
            //
            // Vider les points de code consommés comme référence de
            // caractère. Reprendre dans l'état de retour.
            | _ => self
                .flush_temporary_buffer()
                .reconsume("return-state")
                .and_continue(),
        }
    }

    /// Consomme le nombre maximum de caractères formant un préfixe de la
    /// table des références de caractères nommés, en avançant dans le
    /// trie un point de code à la fois. Le dernier terminal rencontré en
    /// chemin est la correspondance ; les caractères consommés au-delà
    /// sont réinsérés dans le flux.
    pub(crate) fn handle_named_character_reference_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        let trie = NamedReferencesTrie::shared();

        let mut node = NamedReferencesTrie::ROOT;
        let mut consumed = String::new();
        let mut last_match: Option<(usize, &str, bool)> = None;

        loop {
            let Some(ch) = self.stream.next_input() else {
                break;
            };
            let Some(next_node) = trie.step(node, ch) else {
                break;
            };

            self.stream.consume_next_input();
            consumed.push(ch);
            node = next_node;

            if let Some(terminal) = trie.terminal(node) {
                last_match = Some((
                    consumed.len(),
                    terminal.characters.as_str(),
                    terminal.with_semicolon,
                ));
            }

            if !trie.can_extend(node) {
                break;
            }
        }

        let Some((matched_length, replacement, with_semicolon)) =
            last_match
        else {
            // Aucun terminal sur le chemin : sortie littérale, puis état
            // `ambiguous-ampersand`.
            self.temporary_buffer.push_str(&consumed);
            return self
                .flush_temporary_buffer()
                .switch_state_to("ambiguous-ampersand")
                .and_continue();
        };

        // Les noms d'entités sont ASCII : l'index en octets est un index
        // en caractères.
        for ch in consumed[matched_length..].chars().rev() {
            self.stream.push_back_input(ch);
        }
        let matched = &consumed[..matched_length];

        // Règle de compatibilité des entités héritées : dans une valeur
        // d'attribut, une correspondance sans point-virgule suivie de
        // U+003D ou d'un alphanumérique est laissée littérale, sans
        // erreur.
        if !with_semicolon && self.state.is_character_of_attribute() {
            if let Some(next_ch) = self.stream.next_input() {
                if next_ch == '=' || next_ch.is_ascii_alphanumeric() {
                    self.temporary_buffer.push_str(matched);
                    return self
                        .flush_temporary_buffer()
                        .switch_state_to("return-state")
                        .and_continue();
                }
            }
        }

        let replacement = replacement.to_owned();
        self.set_temporary_buffer(replacement)
            .flush_temporary_buffer()
            .switch_state_to("return-state");

        if with_semicolon {
            self.and_continue()
        } else {
            self.and_continue_with_error(
                "missing-semicolon-after-character-reference",
            )
        }
    }

    pub(crate) fn handle_ambiguous_ampersand_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // ASCII alphanumeric
            //
            // Si la référence de caractère a été consommée dans le cadre
            // d'un attribut, ajouter le caractère courant à la valeur de
            // l'attribut. Sinon, l'émettre comme un jeton `character`.
            | Some(ch) if ch.is_ascii_alphanumeric() => {
                if self.state.is_character_of_attribute() {
                    self.change_current_token(|token| {
                        token
                            .as_tag_mut()
                            .append_character_to_attribute_value(ch);
                    })
                    .and_continue()
                } else {
                    self.set_token(HTMLToken::Character(ch)).and_emit()
                }
            }

            // U+003B SEMICOLON (;)
            //
            // Erreur d'analyse. Reprendre dans l'état de retour.
            | Some(';') => {
                self.reconsume("return-state").and_continue_with_error(
                    "unknown-named-character-reference",
                )
            }

            // Anything else
            | _ => self.reconsume("return-state").and_continue(),
        }
    }

    pub(crate) fn handle_numeric_character_reference_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.character_reference_code = 0;

        match self.stream.consume_next_input_character() {
            // U+0078 (x), U+0058 (X)
            | Some(ch @ ('x' | 'X')) => self
                .append_character_to_temporary_buffer(ch)
                .switch_state_to("hexadecimal-character-reference-start")
                .and_continue(),

            // Anything else
            | _ => self
                .reconsume("decimal-character-reference-start")
                .and_continue(),
        }
    }

    pub(crate) fn handle_hexadecimal_character_reference_start_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // ASCII hex digit
            | Some(ch) if ch.is_ascii_hexdigit() => self
                .reconsume("hexadecimal-character-reference")
                .and_continue(),

            // Anything else
            //
            // Erreur d'analyse. Vider les points de code consommés comme
            // référence de caractère. Reprendre dans l'état de retour.
            | _ => self
                .flush_temporary_buffer()
                .reconsume("return-state")
                .and_continue_with_error(
                    "absence-of-digits-in-numeric-character-reference",
                ),
        }
    }

    pub(crate) fn handle_decimal_character_reference_start_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // ASCII digit
            | Some(ch) if ch.is_ascii_digit() => self
                .reconsume("decimal-character-reference")
                .and_continue(),

            // Anything else
            | _ => self
                .flush_temporary_buffer()
                .reconsume("return-state")
                .and_continue_with_error(
                    "absence-of-digits-in-numeric-character-reference",
                ),
        }
    }

    pub(crate) fn handle_hexadecimal_character_reference_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // ASCII hex digit
            | Some(ch) if ch.is_ascii_hexdigit() => {
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(16)
                    .saturating_add(
                        ch.to_digit(16).expect("un chiffre hexadécimal"),
                    );
                self.and_continue()
            }

            // U+003B SEMICOLON (;)
            | Some(';') => self
                .switch_state_to("numeric-character-reference-end")
                .and_continue(),

            // Anything else
            //
            // Erreur d'analyse. Reprendre dans l'état
            // `numeric-character-reference-end`.
            | _ => self
                .reconsume("numeric-character-reference-end")
                .and_continue_with_error(
                    "missing-semicolon-after-character-reference",
                ),
        }
    }

    pub(crate) fn handle_decimal_character_reference_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // ASCII digit
            | Some(ch) if ch.is_ascii_digit() => {
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(10)
                    .saturating_add(
                        ch.to_digit(10).expect("un chiffre décimal"),
                    );
                self.and_continue()
            }

            // U+003B SEMICOLON (;)
            | Some(';') => self
                .switch_state_to("numeric-character-reference-end")
                .and_continue(),

            // Anything else
            | _ => self
                .reconsume("numeric-character-reference-end")
                .and_continue_with_error(
                    "missing-semicolon-after-character-reference",
                ),
        }
    }

    pub(crate) fn handle_numeric_character_reference_end_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        let mut err: Option<&str> = None;

        match self.character_reference_code {
            // Le nombre est 0x00 : erreur d'analyse ; le code devient
            // 0xFFFD.
            | 0x00 => {
                err = Some("null-character-reference");
                self.character_reference_code = 0xFFFD;
            }

            // Au-delà du dernier point de code Unicode : erreur
            // d'analyse ; le code devient 0xFFFD.
            | crc if crc > 0x10FFFF => {
                err = Some("character-reference-outside-unicode-range");
                self.character_reference_code = 0xFFFD;
            }

            // Un substitut : erreur d'analyse ; le code devient 0xFFFD.
            | crc if (0xD800..=0xDFFF).contains(&crc) => {
                err = Some("surrogate-character-reference");
                self.character_reference_code = 0xFFFD;
            }

            // Un non-caractère : erreur d'analyse, sans remplacement.
            | crc
                if CodePoint::from_u32(crc)
                    .is_some_and(|cp| cp.is_noncharacter()) =>
            {
                err = Some("noncharacter-character-reference");
            }

            // 0x0D, ou un contrôle hors espaces ASCII : erreur
            // d'analyse ; les points de code C1 passent par la table de
            // remplacement Windows-1252 de la spécification.
            | crc
                if crc == 0x0D
                    || CodePoint::from_u32(crc).is_some_and(|cp| {
                        cp.is_control() && !cp.is_ascii_whitespace()
                    }) =>
            {
                err = Some("control-character-reference");
                if (0x80..=0x9F).contains(&crc) {
                    let replacement =
                        WINDOWS_1252_HIGH[(crc - 0x80) as usize];
                    self.character_reference_code = replacement as u32;
                }
            }
            | _ => {}
        }

        let ch = CodePoint::from_u32(self.character_reference_code)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.set_temporary_buffer(ch.to_string())
            .flush_temporary_buffer()
            .switch_state_to("return-state");

        if let Some(err) = err {
            self.and_continue_with_error(err)
        } else {
            self.and_continue()
        }
    }
}
