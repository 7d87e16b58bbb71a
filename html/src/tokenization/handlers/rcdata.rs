/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use infra::primitive::codepoint::CodePointIterator;

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
    pub(crate) fn handle_rcdata_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0026 AMPERSAND (&)
            | Some('&') => self
                .set_return_state_to("rcdata")
                .switch_state_to("character-reference")
                .and_continue(),

            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to("rcdata-less-than-sign")
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .set_token(HTMLToken::Character(
                    char::REPLACEMENT_CHARACTER,
                ))
                .and_emit_with_error("unexpected-null-character"),

            // EOF
            | None => self.set_token(HTMLToken::EOF).and_emit(),

            // Anything else
            | Some(ch) => {
                self.set_token(HTMLToken::Character(ch)).and_emit()
            }
        }
    }

    pub(crate) fn handle_rcdata_less_than_sign_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002F SOLIDUS (/)
            //
            // Vider le tampon temporaire. Passer à l'état
            // `rcdata-end-tag-open`.
            | Some('/') => self
                .set_temporary_buffer(String::new())
                .switch_state_to("rcdata-end-tag-open")
                .and_continue(),

            // Anything else
            //
            // Émettre un caractère U+003C et reprendre dans l'état
            // `rcdata`.
            | _ => self
                .emit_token(HTMLToken::Character('<'))
                .reconsume("rcdata")
                .and_continue(),
        }
    }

    pub(crate) fn handle_rcdata_end_tag_open_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.handle_raw_end_tag_open_state("rcdata")
    }

    pub(crate) fn handle_rcdata_end_tag_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.handle_raw_end_tag_name_state("rcdata")
    }

    /// Partagé entre les états `rcdata-end-tag-open`,
    /// `rawtext-end-tag-open` et `script-data-end-tag-open` : la logique
    /// ne varie que par l'état de repli.
    pub(crate) fn handle_raw_end_tag_open_state(
        &mut self,
        data_state: &str,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // ASCII alpha
            //
            // Créer un nouveau jeton `end-tag` avec un nom vide, et
            // reprendre dans l'état `...-end-tag-name`.
            | Some(ch) if ch.is_ascii_alphabetic() => {
                let end_tag_name_state =
                    format!("{data_state}-end-tag-name");
                self.set_token(HTMLToken::new_end_tag())
                    .reconsume(&end_tag_name_state)
                    .and_continue()
            }

            // Anything else
            //
            // Émettre U+003C puis U+002F et reprendre dans l'état de
            // données correspondant.
            | _ => self
                .emit_token(HTMLToken::Character('<'))
                .emit_token(HTMLToken::Character('/'))
                .reconsume(data_state)
                .and_continue(),
        }
    }

    /// Partagé entre les états `rcdata-end-tag-name`,
    /// `rawtext-end-tag-name` et `script-data-end-tag-name`.
    pub(crate) fn handle_raw_end_tag_name_state(
        &mut self,
        data_state: &str,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            //
            // Si le jeton courant est une balise de fin appropriée,
            // passer à l'état `before-attribute-name` ; sinon, traiter
            // comme « anything else ».
            | Some('\t' | '\n' | '\x0C' | ' ')
                if self.is_appropriate_end_tag() =>
            {
                self.switch_state_to("before-attribute-name")
                    .and_continue()
            }

            // U+002F SOLIDUS (/)
            | Some('/') if self.is_appropriate_end_tag() => self
                .switch_state_to("self-closing-start-tag")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') if self.is_appropriate_end_tag() => {
                self.switch_state_to("data").and_emit()
            }

            // ASCII upper alpha
            //
            // Ajouter la version minuscule au nom de la balise, et le
            // caractère brut au tampon temporaire.
            | Some(ch) if ch.is_ascii_uppercase() => self
                .change_current_token(|token| {
                    token.append_character(ch.to_ascii_lowercase());
                })
                .append_character_to_temporary_buffer(ch)
                .and_continue(),

            // ASCII lower alpha
            | Some(ch) if ch.is_ascii_lowercase() => self
                .change_current_token(|token| {
                    token.append_character(ch);
                })
                .append_character_to_temporary_buffer(ch)
                .and_continue(),

            // Anything else
            //
            // Émettre U+003C, U+002F, puis chaque caractère du tampon
            // temporaire, et reprendre dans l'état de données
            // correspondant.
            | _ => {
                self.token = None;
                self.emit_token(HTMLToken::Character('<'))
                    .emit_token(HTMLToken::Character('/'))
                    .emit_each_characters_of_temporary_buffer()
                    .reconsume(data_state)
                    .and_continue()
            }
        }
    }
}
