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
    pub(crate) fn handle_cdata_section_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+005D RIGHT SQUARE BRACKET (])
            | Some(']') => self
                .switch_state_to("cdata-section-bracket")
                .and_continue(),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error("eof-in-cdata"),

            // Anything else
            //
            // NOTE: U+0000 NULL est permis ici : le remplacement se fait
            // dans la construction de l'arbre, pas dans le tokenizer.
            | Some(ch) => {
                self.set_token(HTMLToken::Character(ch)).and_emit()
            }
        }
    }

    pub(crate) fn handle_cdata_section_bracket_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+005D RIGHT SQUARE BRACKET (])
            | Some(']') => {
                self.switch_state_to("cdata-section-end").and_continue()
            }

            // Anything else
            //
            // Émettre un caractère U+005D et reprendre dans l'état
            // `cdata-section`.
            | _ => self
                .emit_token(HTMLToken::Character(']'))
                .reconsume("cdata-section")
                .and_continue(),
        }
    }

    pub(crate) fn handle_cdata_section_end_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+005D RIGHT SQUARE BRACKET (])
            | Some(']') => self
                .emit_token(HTMLToken::Character(']'))
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_continue(),

            // Anything else
            | _ => self
                .emit_token(HTMLToken::Character(']'))
                .emit_token(HTMLToken::Character(']'))
                .reconsume("cdata-section")
                .and_continue(),
        }
    }
}
