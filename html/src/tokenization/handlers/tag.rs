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
    pub(crate) fn handle_tag_open_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0021 EXCLAMATION MARK (!)
            //
            // Passer à l'état `markup-declaration-open`.
            | Some('!') => self
                .switch_state_to("markup-declaration-open")
                .and_continue(),

            // U+002F SOLIDUS (/)
            | Some('/') => {
                self.switch_state_to("end-tag-open").and_continue()
            }

            // ASCII alpha
            //
            // Créer un nouveau jeton `start-tag`, avec un nom de balise
            // vide. Reprendre dans l'état `tag-name`.
            | Some(ch) if ch.is_ascii_alphabetic() => self
                .set_token(HTMLToken::new_start_tag())
                .reconsume("tag-name")
                .and_continue(),

            // U+003F QUESTION MARK (?)
            //
            // Erreur d'analyse. Créer un jeton `comment` vide et
            // reprendre dans l'état `bogus-comment`.
            | Some('?') => self
                .set_token(HTMLToken::new_comment(""))
                .reconsume("bogus-comment")
                .and_continue_with_error(
                    "unexpected-question-mark-instead-of-tag-name",
                ),

            // EOF
            //
            // Erreur d'analyse. Émettre un caractère U+003C, puis un
            // jeton `end-of-file`.
            | None => {
                self.emit_token(HTMLToken::Character('<'))
                    .set_token(HTMLToken::EOF)
                    .and_emit_with_error("eof-before-tag-name")
            }

            // Anything else
            //
            // Erreur d'analyse. Émettre un caractère U+003C et reprendre
            // dans l'état `data`.
            | Some(_) => {
                self.emit_token(HTMLToken::Character('<'))
                    .reconsume("data")
                    .and_continue_with_error(
                        "invalid-first-character-of-tag-name",
                    )
            }
        }
    }

    pub(crate) fn handle_end_tag_open_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // ASCII alpha
            | Some(ch) if ch.is_ascii_alphabetic() => self
                .set_token(HTMLToken::new_end_tag())
                .reconsume("tag-name")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            //
            // Erreur d'analyse. Passer à l'état `data`.
            | Some('>') => self
                .switch_state_to("data")
                .and_continue_with_error("missing-end-tag-name"),

            // EOF
            | None => {
                self.emit_token(HTMLToken::Character('<'))
                    .emit_token(HTMLToken::Character('/'))
                    .set_token(HTMLToken::EOF)
                    .and_emit_with_error("eof-before-tag-name")
            }

            // Anything else
            //
            // Erreur d'analyse. Créer un jeton `comment` vide et
            // reprendre dans l'état `bogus-comment`.
            | Some(_) => self
                .set_token(HTMLToken::new_comment(""))
                .reconsume("bogus-comment")
                .and_continue_with_error(
                    "invalid-first-character-of-tag-name",
                ),
        }
    }

    pub(crate) fn handle_tag_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self
                .switch_state_to("before-attribute-name")
                .and_continue(),

            // U+002F SOLIDUS (/)
            | Some('/') => self
                .switch_state_to("self-closing-start-tag")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            //
            // Passer à l'état `data`. Émettre le jeton courant.
            | Some('>') => self.switch_state_to("data").and_emit(),

            // ASCII upper alpha
            //
            // Ajouter la version minuscule du caractère courant au nom de
            // la balise.
            | Some(ch) if ch.is_ascii_uppercase() => self
                .change_current_token(|token| {
                    token.append_character(ch.to_ascii_lowercase());
                })
                .and_continue(),

            // U+0000 NULL
            //
            // Erreur d'analyse. Ajouter U+FFFD au nom de la balise.
            | Some('\0') => self
                .change_current_token(|token| {
                    token.append_character(char::REPLACEMENT_CHARACTER);
                })
                .and_continue_with_error("unexpected-null-character"),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error("eof-in-tag"),

            // Anything else
            | Some(ch) => self
                .change_current_token(|token| {
                    token.append_character(ch);
                })
                .and_continue(),
        }
    }

    pub(crate) fn handle_before_attribute_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            //
            // Ignorer le caractère.
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF
            //
            // Reprendre dans l'état `after-attribute-name`.
            | Some('/' | '>') | None => {
                self.reconsume("after-attribute-name").and_continue()
            }

            // U+003D EQUALS SIGN (=)
            //
            // Erreur d'analyse. Commencer un nouvel attribut, dont le nom
            // est le caractère courant, et passer à l'état
            // `attribute-name`.
            | Some(ch @ '=') => self
                .change_current_token(|token| {
                    let tag = token.as_tag_mut();
                    tag.start_new_attribute();
                    tag.append_character_to_attribute_name(ch);
                })
                .switch_state_to("attribute-name")
                .and_continue_with_error(
                    "unexpected-equals-sign-before-attribute-name",
                ),

            // Anything else
            //
            // Commencer un nouvel attribut vide, et reprendre dans l'état
            // `attribute-name`.
            | Some(_) => self
                .change_current_token(|token| {
                    token.as_tag_mut().start_new_attribute();
                })
                .reconsume("attribute-name")
                .and_continue(),
        }
    }

    pub(crate) fn handle_attribute_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE,
            // U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF
            | Some('\t' | '\n' | '\x0C' | ' ' | '/' | '>') | None => {
                self.reconsume("after-attribute-name").and_continue()
            }

            // U+003D EQUALS SIGN (=)
            | Some('=') => self
                .switch_state_to("before-attribute-value")
                .and_continue(),

            // ASCII upper alpha
            | Some(ch) if ch.is_ascii_uppercase() => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_name(
                            ch.to_ascii_lowercase(),
                        );
                })
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_name(
                            char::REPLACEMENT_CHARACTER,
                        );
                })
                .and_continue_with_error("unexpected-null-character"),

            // U+0022 ("), U+0027 ('), U+003C (<)
            //
            // Erreur d'analyse. Traiter comme le cas « anything else ».
            | Some(ch @ ('"' | '\'' | '<')) => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_name(ch);
                })
                .and_continue_with_error(
                    "unexpected-character-in-attribute-name",
                ),

            // Anything else
            | Some(ch) => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_name(ch);
                })
                .and_continue(),
        }
    }

    pub(crate) fn handle_after_attribute_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // U+002F SOLIDUS (/)
            | Some('/') => self
                .switch_state_to("self-closing-start-tag")
                .and_continue(),

            // U+003D EQUALS SIGN (=)
            | Some('=') => self
                .switch_state_to("before-attribute-value")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error("eof-in-tag"),

            // Anything else
            //
            // Commencer un nouvel attribut vide et reprendre dans l'état
            // `attribute-name`.
            | Some(_) => self
                .change_current_token(|token| {
                    token.as_tag_mut().start_new_attribute();
                })
                .reconsume("attribute-name")
                .and_continue(),
        }
    }

    pub(crate) fn handle_before_attribute_value_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // U+0022 QUOTATION MARK (")
            | Some('"') => self
                .switch_state_to("attribute-value-double-quoted")
                .and_continue(),

            // U+0027 APOSTROPHE (')
            | Some('\'') => self
                .switch_state_to("attribute-value-single-quoted")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            //
            // Erreur d'analyse. Émettre la balise avec une valeur
            // d'attribut vide.
            | Some('>') => self
                .switch_state_to("data")
                .and_emit_with_error("missing-attribute-value"),

            // Anything else
            | _ => self
                .reconsume("attribute-value-unquoted")
                .and_continue(),
        }
    }

    pub(crate) fn handle_attribute_value_quoted_state(
        &mut self,
        quote: char,
    ) -> HTMLTokenizerProcessResult {
        let return_state = if quote == '"' {
            "attribute-value-double-quoted"
        } else {
            "attribute-value-single-quoted"
        };

        match self.stream.consume_next_input_character() {
            // U+0022 (") ou U+0027 ('), selon l'état
            | Some(ch) if ch == quote => self
                .switch_state_to("after-attribute-value-quoted")
                .and_continue(),

            // U+0026 AMPERSAND (&)
            | Some('&') => self
                .set_return_state_to(return_state)
                .switch_state_to("character-reference")
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_value(
                            char::REPLACEMENT_CHARACTER,
                        );
                })
                .and_continue_with_error("unexpected-null-character"),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error("eof-in-tag"),

            // Anything else
            | Some(ch) => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_value(ch);
                })
                .and_continue(),
        }
    }

    pub(crate) fn handle_attribute_value_unquoted_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self
                .switch_state_to("before-attribute-name")
                .and_continue(),

            // U+0026 AMPERSAND (&)
            | Some('&') => self
                .set_return_state_to("attribute-value-unquoted")
                .switch_state_to("character-reference")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // U+0000 NULL
            | Some('\0') => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_value(
                            char::REPLACEMENT_CHARACTER,
                        );
                })
                .and_continue_with_error("unexpected-null-character"),

            // U+0022 ("), U+0027 ('), U+003C (<), U+003D (=), U+0060 (`)
            //
            // Erreur d'analyse. Traiter comme le cas « anything else ».
            | Some(ch @ ('"' | '\'' | '<' | '=' | '`')) => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_value(ch);
                })
                .and_continue_with_error(
                    "unexpected-character-in-unquoted-attribute-value",
                ),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error("eof-in-tag"),

            // Anything else
            | Some(ch) => self
                .change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_value(ch);
                })
                .and_continue(),
        }
    }

    pub(crate) fn handle_after_attribute_value_quoted_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self
                .switch_state_to("before-attribute-name")
                .and_continue(),

            // U+002F SOLIDUS (/)
            | Some('/') => self
                .switch_state_to("self-closing-start-tag")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error("eof-in-tag"),

            // Anything else
            //
            // Erreur d'analyse. Reprendre dans l'état
            // `before-attribute-name`.
            | Some(_) => self
                .reconsume("before-attribute-name")
                .and_continue_with_error(
                    "missing-whitespace-between-attributes",
                ),
        }
    }

    pub(crate) fn handle_self_closing_start_tag_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+003E GREATER-THAN SIGN (>)
            //
            // Activer le drapeau de fermeture automatique du jeton, puis
            // passer à l'état `data` et émettre le jeton.
            | Some('>') => self
                .change_current_token(|token| {
                    token.as_tag_mut().set_self_closing_flag(true);
                })
                .switch_state_to("data")
                .and_emit(),

            // EOF
            | None => self
                .set_token(HTMLToken::EOF)
                .and_emit_with_error("eof-in-tag"),

            // Anything else
            //
            // Erreur d'analyse. Reprendre dans l'état
            // `before-attribute-name`.
            | Some(_) => self
                .reconsume("before-attribute-name")
                .and_continue_with_error("unexpected-solidus-in-tag"),
        }
    }
}
