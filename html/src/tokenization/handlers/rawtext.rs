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
    pub(crate) fn handle_rawtext_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to("rawtext-less-than-sign")
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

    pub(crate) fn handle_rawtext_less_than_sign_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002F SOLIDUS (/)
            | Some('/') => self
                .set_temporary_buffer(String::new())
                .switch_state_to("rawtext-end-tag-open")
                .and_continue(),

            // Anything else
            | _ => self
                .emit_token(HTMLToken::Character('<'))
                .reconsume("rawtext")
                .and_continue(),
        }
    }

    pub(crate) fn handle_rawtext_end_tag_open_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.handle_raw_end_tag_open_state("rawtext")
    }

    pub(crate) fn handle_rawtext_end_tag_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.handle_raw_end_tag_name_state("rawtext")
    }
}
