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
    pub(crate) fn handle_script_data_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to("script-data-less-than-sign")
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

    pub(crate) fn handle_script_data_less_than_sign_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002F SOLIDUS (/)
            | Some('/') => self
                .set_temporary_buffer(String::new())
                .switch_state_to("script-data-end-tag-open")
                .and_continue(),

            // U+0021 EXCLAMATION MARK (!)
            //
            // Passer à l'état `script-data-escape-start`. Émettre U+003C
            // puis U+0021.
            | Some('!') => self
                .switch_state_to("script-data-escape-start")
                .emit_token(HTMLToken::Character('<'))
                .emit_token(HTMLToken::Character('!'))
                .and_continue(),

            // Anything else
            | _ => self
                .emit_token(HTMLToken::Character('<'))
                .reconsume("script-data")
                .and_continue(),
        }
    }

    pub(crate) fn handle_script_data_end_tag_open_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.handle_raw_end_tag_open_state("script-data")
    }

    pub(crate) fn handle_script_data_end_tag_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.handle_raw_end_tag_name_state("script-data")
    }

    pub(crate) fn handle_script_data_escape_start_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("script-data-escape-start-dash")
                .emit_token(HTMLToken::Character('-'))
                .and_continue(),

            // Anything else
            | _ => self.reconsume("script-data").and_continue(),
        }
    }

    pub(crate) fn handle_script_data_escape_start_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("script-data-escaped-dash-dash")
                .emit_token(HTMLToken::Character('-'))
                .and_continue(),

            // Anything else
            | _ => self.reconsume("script-data").and_continue(),
        }
    }

    pub(crate) fn handle_script_data_escaped_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("script-data-escaped-dash")
                .emit_token(HTMLToken::Character('-'))
                .and_continue(),

            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to("script-data-escaped-less-than-sign")
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .set_token(HTMLToken::Character(
                    char::REPLACEMENT_CHARACTER,
                ))
                .and_emit_with_error("unexpected-null-character"),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error(
                    "eof-in-script-html-comment-like-text",
                ),

            // Anything else
            | Some(ch) => {
                self.set_token(HTMLToken::Character(ch)).and_emit()
            }
        }
    }

    pub(crate) fn handle_script_data_escaped_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("script-data-escaped-dash-dash")
                .emit_token(HTMLToken::Character('-'))
                .and_continue(),

            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to("script-data-escaped-less-than-sign")
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .switch_state_to("script-data-escaped")
                .set_token(HTMLToken::Character(
                    char::REPLACEMENT_CHARACTER,
                ))
                .and_emit_with_error("unexpected-null-character"),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error(
                    "eof-in-script-html-comment-like-text",
                ),

            // Anything else
            | Some(ch) => self
                .switch_state_to("script-data-escaped")
                .set_token(HTMLToken::Character(ch))
                .and_emit(),
        }
    }

    pub(crate) fn handle_script_data_escaped_dash_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .emit_token(HTMLToken::Character('-'))
                .and_continue(),

            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to("script-data-escaped-less-than-sign")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .switch_state_to("script-data")
                .set_token(HTMLToken::Character('>'))
                .and_emit(),

            // U+0000 NULL
            | Some('\0') => self
                .switch_state_to("script-data-escaped")
                .set_token(HTMLToken::Character(
                    char::REPLACEMENT_CHARACTER,
                ))
                .and_emit_with_error("unexpected-null-character"),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error(
                    "eof-in-script-html-comment-like-text",
                ),

            // Anything else
            | Some(ch) => self
                .switch_state_to("script-data-escaped")
                .set_token(HTMLToken::Character(ch))
                .and_emit(),
        }
    }

    pub(crate) fn handle_script_data_escaped_less_than_sign_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002F SOLIDUS (/)
            | Some('/') => self
                .set_temporary_buffer(String::new())
                .switch_state_to("script-data-escaped-end-tag-open")
                .and_continue(),

            // ASCII alpha
            //
            // Vider le tampon temporaire. Émettre U+003C et reprendre
            // dans l'état `script-data-double-escape-start`.
            | Some(ch) if ch.is_ascii_alphabetic() => self
                .set_temporary_buffer(String::new())
                .emit_token(HTMLToken::Character('<'))
                .reconsume("script-data-double-escape-start")
                .and_continue(),

            // Anything else
            | _ => self
                .emit_token(HTMLToken::Character('<'))
                .reconsume("script-data-escaped")
                .and_continue(),
        }
    }

    pub(crate) fn handle_script_data_escaped_end_tag_open_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // ASCII alpha
            | Some(ch) if ch.is_ascii_alphabetic() => self
                .set_token(HTMLToken::new_end_tag())
                .reconsume("script-data-escaped-end-tag-name")
                .and_continue(),

            // Anything else
            | _ => self
                .emit_token(HTMLToken::Character('<'))
                .emit_token(HTMLToken::Character('/'))
                .reconsume("script-data-escaped")
                .and_continue(),
        }
    }

    pub(crate) fn handle_script_data_escaped_end_tag_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.handle_raw_end_tag_name_state("script-data-escaped")
    }

    pub(crate) fn handle_script_data_double_escape_start_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE,
            // U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>)
            //
            // Si le tampon temporaire vaut "script", passer à l'état
            // `script-data-double-escaped` ; sinon revenir à l'état
            // `script-data-escaped`. Émettre le caractère courant.
            | Some(ch @ ('\t' | '\n' | '\x0C' | ' ' | '/' | '>')) => {
                if self.temporary_buffer == "script" {
                    self.switch_state_to("script-data-double-escaped");
                } else {
                    self.switch_state_to("script-data-escaped");
                }
                self.set_token(HTMLToken::Character(ch)).and_emit()
            }

            // ASCII upper alpha
            | Some(ch) if ch.is_ascii_uppercase() => self
                .append_character_to_temporary_buffer(
                    ch.to_ascii_lowercase(),
                )
                .set_token(HTMLToken::Character(ch))
                .and_emit(),

            // ASCII lower alpha
            | Some(ch) if ch.is_ascii_lowercase() => self
                .append_character_to_temporary_buffer(ch)
                .set_token(HTMLToken::Character(ch))
                .and_emit(),

            // Anything else
            | _ => self.reconsume("script-data-escaped").and_continue(),
        }
    }

    pub(crate) fn handle_script_data_double_escaped_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("script-data-double-escaped-dash")
                .set_token(HTMLToken::Character('-'))
                .and_emit(),

            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to(
                    "script-data-double-escaped-less-than-sign",
                )
                .set_token(HTMLToken::Character('<'))
                .and_emit(),

            // U+0000 NULL
            | Some('\0') => self
                .set_token(HTMLToken::Character(
                    char::REPLACEMENT_CHARACTER,
                ))
                .and_emit_with_error("unexpected-null-character"),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error(
                    "eof-in-script-html-comment-like-text",
                ),

            // Anything else
            | Some(ch) => {
                self.set_token(HTMLToken::Character(ch)).and_emit()
            }
        }
    }

    pub(crate) fn handle_script_data_double_escaped_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("script-data-double-escaped-dash-dash")
                .set_token(HTMLToken::Character('-'))
                .and_emit(),

            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to(
                    "script-data-double-escaped-less-than-sign",
                )
                .set_token(HTMLToken::Character('<'))
                .and_emit(),

            // U+0000 NULL
            | Some('\0') => self
                .switch_state_to("script-data-double-escaped")
                .set_token(HTMLToken::Character(
                    char::REPLACEMENT_CHARACTER,
                ))
                .and_emit_with_error("unexpected-null-character"),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error(
                    "eof-in-script-html-comment-like-text",
                ),

            // Anything else
            | Some(ch) => self
                .switch_state_to("script-data-double-escaped")
                .set_token(HTMLToken::Character(ch))
                .and_emit(),
        }
    }

    pub(crate) fn handle_script_data_double_escaped_dash_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .set_token(HTMLToken::Character('-'))
                .and_emit(),

            // U+003C LESS-THAN SIGN (<)
            | Some('<') => self
                .switch_state_to(
                    "script-data-double-escaped-less-than-sign",
                )
                .set_token(HTMLToken::Character('<'))
                .and_emit(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .switch_state_to("script-data")
                .set_token(HTMLToken::Character('>'))
                .and_emit(),

            // U+0000 NULL
            | Some('\0') => self
                .switch_state_to("script-data-double-escaped")
                .set_token(HTMLToken::Character(
                    char::REPLACEMENT_CHARACTER,
                ))
                .and_emit_with_error("unexpected-null-character"),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error(
                    "eof-in-script-html-comment-like-text",
                ),

            // Anything else
            | Some(ch) => self
                .switch_state_to("script-data-double-escaped")
                .set_token(HTMLToken::Character(ch))
                .and_emit(),
        }
    }

    pub(crate) fn handle_script_data_double_escaped_less_than_sign_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002F SOLIDUS (/)
            | Some('/') => self
                .set_temporary_buffer(String::new())
                .switch_state_to("script-data-double-escape-end")
                .set_token(HTMLToken::Character('/'))
                .and_emit(),

            // Anything else
            | _ => self
                .reconsume("script-data-double-escaped")
                .and_continue(),
        }
    }

    pub(crate) fn handle_script_data_double_escape_end_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE,
            // U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>)
            | Some(ch @ ('\t' | '\n' | '\x0C' | ' ' | '/' | '>')) => {
                if self.temporary_buffer == "script" {
                    self.switch_state_to("script-data-escaped");
                } else {
                    self.switch_state_to("script-data-double-escaped");
                }
                self.set_token(HTMLToken::Character(ch)).and_emit()
            }

            // ASCII upper alpha
            | Some(ch) if ch.is_ascii_uppercase() => self
                .append_character_to_temporary_buffer(
                    ch.to_ascii_lowercase(),
                )
                .set_token(HTMLToken::Character(ch))
                .and_emit(),

            // ASCII lower alpha
            | Some(ch) if ch.is_ascii_lowercase() => self
                .append_character_to_temporary_buffer(ch)
                .set_token(HTMLToken::Character(ch))
                .and_emit(),

            // Anything else
            | _ => self
                .reconsume("script-data-double-escaped")
                .and_continue(),
        }
    }
}
