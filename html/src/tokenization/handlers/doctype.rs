/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use infra::primitive::codepoint::CodePointIterator;
use parser::StreamIteratorInterface;

use crate::tokenization::{
    token::HTMLDoctypeToken,
    tokenizer::{
        HTMLTokenizerProcessInterface, HTMLTokenizerProcessResult,
    },
    HTMLToken, HTMLTokenizer,
};

impl<C> HTMLTokenizer<C>
where
    C: CodePointIterator,
{
    fn change_current_doctype<F: FnOnce(&mut HTMLDoctypeToken)>(
        &mut self,
        callback: F,
    ) -> &mut Self {
        self.change_current_token(|token| {
            if let HTMLToken::DOCTYPE(doctype) = token {
                callback(doctype);
            }
        })
    }

    /// Émet le DOCTYPE courant avec son drapeau force-quirks activé,
    /// suivi du jeton `end-of-file`.
    fn emit_doctype_with_quirks_then_eof(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        self.change_current_doctype(|doctype| {
            doctype.force_quirks_flag = true;
        });
        let doctype = self.token.take().expect("Le jeton DOCTYPE");
        self.emit_token(doctype)
            .set_token(HTMLToken::EOF)
            .and_emit_with_error("eof-in-doctype")
    }

    pub(crate) fn handle_doctype_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self
                .switch_state_to("before-doctype-name")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => {
                self.reconsume("before-doctype-name").and_continue()
            }

            // EOF
            //
            // Erreur d'analyse. Émettre un DOCTYPE force-quirks, puis un
            // jeton `end-of-file`.
            | None => {
                self.set_token(HTMLToken::new_doctype());
                self.emit_doctype_with_quirks_then_eof()
            }

            // Anything else
            | Some(_) => self
                .reconsume("before-doctype-name")
                .and_continue_with_error(
                    "missing-whitespace-before-doctype-name",
                ),
        }
    }

    pub(crate) fn handle_before_doctype_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // ASCII upper alpha
            //
            // Créer un jeton DOCTYPE dont le nom est la version minuscule
            // du caractère courant ; passer à l'état `doctype-name`.
            | Some(ch) if ch.is_ascii_uppercase() => self
                .set_token(HTMLToken::new_doctype())
                .change_current_doctype(|doctype| {
                    doctype.name =
                        Some(ch.to_ascii_lowercase().to_string());
                })
                .switch_state_to("doctype-name")
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .set_token(HTMLToken::new_doctype())
                .change_current_doctype(|doctype| {
                    doctype.name =
                        Some(char::REPLACEMENT_CHARACTER.to_string());
                })
                .switch_state_to("doctype-name")
                .and_continue_with_error("unexpected-null-character"),

            // U+003E GREATER-THAN SIGN (>)
            //
            // Erreur d'analyse. Émettre un DOCTYPE force-quirks.
            | Some('>') => self
                .set_token(HTMLToken::new_doctype())
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .switch_state_to("data")
                .and_emit_with_error("missing-doctype-name"),

            // EOF
            | None => {
                self.set_token(HTMLToken::new_doctype());
                self.emit_doctype_with_quirks_then_eof()
            }

            // Anything else
            | Some(ch) => self
                .set_token(HTMLToken::new_doctype())
                .change_current_doctype(|doctype| {
                    doctype.name = Some(ch.to_string());
                })
                .switch_state_to("doctype-name")
                .and_continue(),
        }
    }

    pub(crate) fn handle_doctype_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self
                .switch_state_to("after-doctype-name")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // ASCII upper alpha
            | Some(ch) if ch.is_ascii_uppercase() => self
                .change_current_token(|token| {
                    token.append_character(ch.to_ascii_lowercase());
                })
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .change_current_token(|token| {
                    token.append_character(char::REPLACEMENT_CHARACTER);
                })
                .and_continue_with_error("unexpected-null-character"),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(ch) => self
                .change_current_token(|token| {
                    token.append_character(ch);
                })
                .and_continue(),
        }
    }

    pub(crate) fn handle_after_doctype_name_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            //
            // Si les six caractères à partir du caractère courant sont
            // « PUBLIC » ou « SYSTEM » (insensible à la casse), passer
            // aux états correspondants ; sinon, erreur d'analyse et
            // DOCTYPE bogue force-quirks.
            | Some(_) => {
                self.stream.reconsume_current_input();

                if self
                    .stream
                    .consume_next_input_characters_if_are_insensitive(
                        "public",
                    )
                {
                    return self
                        .switch_state_to("after-doctype-public-keyword")
                        .and_continue();
                }

                if self
                    .stream
                    .consume_next_input_characters_if_are_insensitive(
                        "system",
                    )
                {
                    return self
                        .switch_state_to("after-doctype-system-keyword")
                        .and_continue();
                }

                self.stream.consume_next_input();
                self.change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .reconsume("bogus-doctype")
                .and_continue_with_error(
                    "invalid-character-sequence-after-doctype-name",
                )
            }
        }
    }

    pub(crate) fn handle_after_doctype_public_keyword_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self
                .switch_state_to("before-doctype-public-identifier")
                .and_continue(),

            // U+0022 QUOTATION MARK (")
            | Some('"') => self
                .change_current_doctype(|doctype| {
                    doctype.public_identifier = Some(String::new());
                })
                .switch_state_to("doctype-public-identifier-double-quoted")
                .and_continue_with_error(
                    "missing-whitespace-after-doctype-public-keyword",
                ),

            // U+0027 APOSTROPHE (')
            | Some('\'') => self
                .change_current_doctype(|doctype| {
                    doctype.public_identifier = Some(String::new());
                })
                .switch_state_to("doctype-public-identifier-single-quoted")
                .and_continue_with_error(
                    "missing-whitespace-after-doctype-public-keyword",
                ),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .switch_state_to("data")
                .and_emit_with_error(
                    "missing-doctype-public-identifier",
                ),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(_) => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .reconsume("bogus-doctype")
                .and_continue_with_error(
                    "missing-quote-before-doctype-public-identifier",
                ),
        }
    }

    pub(crate) fn handle_before_doctype_public_identifier_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // U+0022 QUOTATION MARK (")
            | Some('"') => self
                .change_current_doctype(|doctype| {
                    doctype.public_identifier = Some(String::new());
                })
                .switch_state_to("doctype-public-identifier-double-quoted")
                .and_continue(),

            // U+0027 APOSTROPHE (')
            | Some('\'') => self
                .change_current_doctype(|doctype| {
                    doctype.public_identifier = Some(String::new());
                })
                .switch_state_to("doctype-public-identifier-single-quoted")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .switch_state_to("data")
                .and_emit_with_error(
                    "missing-doctype-public-identifier",
                ),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(_) => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .reconsume("bogus-doctype")
                .and_continue_with_error(
                    "missing-quote-before-doctype-public-identifier",
                ),
        }
    }

    pub(crate) fn handle_doctype_public_identifier_quoted_state(
        &mut self,
        quote: char,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            | Some(ch) if ch == quote => self
                .switch_state_to("after-doctype-public-identifier")
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .change_current_doctype(|doctype| {
                    if let Some(public_identifier) =
                        doctype.public_identifier.as_mut()
                    {
                        public_identifier
                            .push(char::REPLACEMENT_CHARACTER);
                    }
                })
                .and_continue_with_error("unexpected-null-character"),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .switch_state_to("data")
                .and_emit_with_error(
                    "abrupt-doctype-public-identifier",
                ),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(ch) => self
                .change_current_doctype(|doctype| {
                    if let Some(public_identifier) =
                        doctype.public_identifier.as_mut()
                    {
                        public_identifier.push(ch);
                    }
                })
                .and_continue(),
        }
    }

    pub(crate) fn handle_after_doctype_public_identifier_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self
                .switch_state_to(
                    "between-doctype-public-and-system-identifiers",
                )
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // U+0022 ("), U+0027 (')
            | Some(ch @ ('"' | '\'')) => {
                let state = if ch == '"' {
                    "doctype-system-identifier-double-quoted"
                } else {
                    "doctype-system-identifier-single-quoted"
                };
                self.change_current_doctype(|doctype| {
                    doctype.system_identifier = Some(String::new());
                })
                .switch_state_to(state)
                .and_continue_with_error(
                    "missing-whitespace-between-doctype-public-and-system-identifiers",
                )
            }

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(_) => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .reconsume("bogus-doctype")
                .and_continue_with_error(
                    "missing-quote-before-doctype-system-identifier",
                ),
        }
    }

    pub(crate) fn handle_between_doctype_public_and_system_identifiers_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // U+0022 ("), U+0027 (')
            | Some(ch @ ('"' | '\'')) => {
                let state = if ch == '"' {
                    "doctype-system-identifier-double-quoted"
                } else {
                    "doctype-system-identifier-single-quoted"
                };
                self.change_current_doctype(|doctype| {
                    doctype.system_identifier = Some(String::new());
                })
                .switch_state_to(state)
                .and_continue()
            }

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(_) => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .reconsume("bogus-doctype")
                .and_continue_with_error(
                    "missing-quote-before-doctype-system-identifier",
                ),
        }
    }

    pub(crate) fn handle_after_doctype_system_keyword_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self
                .switch_state_to("before-doctype-system-identifier")
                .and_continue(),

            // U+0022 ("), U+0027 (')
            | Some(ch @ ('"' | '\'')) => {
                let state = if ch == '"' {
                    "doctype-system-identifier-double-quoted"
                } else {
                    "doctype-system-identifier-single-quoted"
                };
                self.change_current_doctype(|doctype| {
                    doctype.system_identifier = Some(String::new());
                })
                .switch_state_to(state)
                .and_continue_with_error(
                    "missing-whitespace-after-doctype-system-keyword",
                )
            }

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .switch_state_to("data")
                .and_emit_with_error(
                    "missing-doctype-system-identifier",
                ),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(_) => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .reconsume("bogus-doctype")
                .and_continue_with_error(
                    "missing-quote-before-doctype-system-identifier",
                ),
        }
    }

    pub(crate) fn handle_before_doctype_system_identifier_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // U+0022 ("), U+0027 (')
            | Some(ch @ ('"' | '\'')) => {
                let state = if ch == '"' {
                    "doctype-system-identifier-double-quoted"
                } else {
                    "doctype-system-identifier-single-quoted"
                };
                self.change_current_doctype(|doctype| {
                    doctype.system_identifier = Some(String::new());
                })
                .switch_state_to(state)
                .and_continue()
            }

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .switch_state_to("data")
                .and_emit_with_error(
                    "missing-doctype-system-identifier",
                ),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(_) => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .reconsume("bogus-doctype")
                .and_continue_with_error(
                    "missing-quote-before-doctype-system-identifier",
                ),
        }
    }

    pub(crate) fn handle_doctype_system_identifier_quoted_state(
        &mut self,
        quote: char,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            | Some(ch) if ch == quote => self
                .switch_state_to("after-doctype-system-identifier")
                .and_continue(),

            // U+0000 NULL
            | Some('\0') => self
                .change_current_doctype(|doctype| {
                    if let Some(system_identifier) =
                        doctype.system_identifier.as_mut()
                    {
                        system_identifier
                            .push(char::REPLACEMENT_CHARACTER);
                    }
                })
                .and_continue_with_error("unexpected-null-character"),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .change_current_doctype(|doctype| {
                    doctype.force_quirks_flag = true;
                })
                .switch_state_to("data")
                .and_emit_with_error(
                    "abrupt-doctype-system-identifier",
                ),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            | Some(ch) => self
                .change_current_doctype(|doctype| {
                    if let Some(system_identifier) =
                        doctype.system_identifier.as_mut()
                    {
                        system_identifier.push(ch);
                    }
                })
                .and_continue(),
        }
    }

    pub(crate) fn handle_after_doctype_system_identifier_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0009 TAB, U+000A LF, U+000C FF, U+0020 SPACE
            | Some('\t' | '\n' | '\x0C' | ' ') => self.ignore(),

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // EOF
            | None => self.emit_doctype_with_quirks_then_eof(),

            // Anything else
            //
            // Erreur d'analyse. Reprendre dans l'état `bogus-doctype`
            // (sans activer force-quirks).
            | Some(_) => {
                self.reconsume("bogus-doctype").and_continue_with_error(
                    "unexpected-character-after-doctype-system-identifier",
                )
            }
        }
    }

    pub(crate) fn handle_bogus_doctype_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // U+0000 NULL
            //
            // Erreur d'analyse. Ignorer le caractère.
            | Some('\0') => {
                self.and_continue_with_error("unexpected-null-character")
            }

            // EOF
            //
            // Émettre le DOCTYPE, puis le jeton `end-of-file`.
            | None => {
                let doctype =
                    self.token.take().expect("Le jeton DOCTYPE");
                self.emit_token(doctype)
                    .set_token(HTMLToken::EOF)
                    .and_emit()
            }

            // Anything else
            //
            // Ignorer le caractère.
            | Some(_) => self.ignore(),
        }
    }
}
