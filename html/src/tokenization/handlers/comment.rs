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
    pub(crate) fn handle_bogus_comment_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // EOF
            //
            // Émettre le commentaire, puis le jeton `end-of-file`.
            | None => {
                let comment =
                    self.token.take().expect("Le jeton de commentaire");
                self.emit_token(comment)
                    .set_token(HTMLToken::EOF)
                    .and_emit()
            }

            // U+0000 NULL
            | Some('\0') => self
                .change_current_token(|token| {
                    token.append_character(char::REPLACEMENT_CHARACTER);
                })
                .and_continue_with_error("unexpected-null-character"),

            // Anything else
            | Some(ch) => self
                .change_current_token(|token| {
                    token.append_character(ch);
                })
                .and_continue(),
        }
    }

    /// Si les prochains caractères sont « -- », « DOCTYPE » (insensible à
    /// la casse) ou « [CDATA[ », les consommer ; sinon, commentaire
    /// bogue.
    pub(crate) fn handle_markup_declaration_open_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        if self.stream.consume_next_input_characters_if_are("--") {
            return self
                .set_token(HTMLToken::new_comment(""))
                .switch_state_to("comment-start")
                .and_continue();
        }

        if self
            .stream
            .consume_next_input_characters_if_are_insensitive("doctype")
        {
            return self.switch_state_to("doctype").and_continue();
        }

        if self.stream.consume_next_input_characters_if_are("[CDATA[") {
            // Les sections CDATA ne sont permises que dans le contenu
            // étranger : l'analyseur règle ce drapeau entre deux jetons,
            // selon l'espace de noms du nœud courant ajusté.
            if self.is_cdata_allowed() {
                return self
                    .switch_state_to("cdata-section")
                    .and_continue();
            }
            return self
                .set_token(HTMLToken::new_comment("[CDATA["))
                .switch_state_to("bogus-comment")
                .and_continue_with_error("cdata-in-html-content");
        }

        self.set_token(HTMLToken::new_comment(""))
            .switch_state_to("bogus-comment")
            .and_continue_with_error("incorrectly-opened-comment")
    }

    pub(crate) fn handle_comment_start_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("comment-start-dash")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            //
            // Erreur d'analyse. Passer à l'état `data` et émettre le
            // commentaire.
            | Some('>') => self
                .switch_state_to("data")
                .and_emit_with_error("abrupt-closing-of-empty-comment"),

            // Anything else
            | _ => self.reconsume("comment").and_continue(),
        }
    }

    pub(crate) fn handle_comment_start_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => {
                self.switch_state_to("comment-end").and_continue()
            }

            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self
                .switch_state_to("data")
                .and_emit_with_error("abrupt-closing-of-empty-comment"),

            // EOF
            | None => {
                let comment =
                    self.token.take().expect("Le jeton de commentaire");
                self.emit_token(comment)
                    .set_token(HTMLToken::EOF)
                    .and_emit_with_error("eof-in-comment")
            }

            // Anything else
            //
            // Ajouter U+002D au commentaire, et reprendre dans l'état
            // `comment`.
            | Some(_) => self
                .change_current_token(|token| {
                    token.append_character('-');
                })
                .reconsume("comment")
                .and_continue(),
        }
    }

    pub(crate) fn handle_comment_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+003C LESS-THAN SIGN (<)
            | Some(ch @ '<') => self
                .change_current_token(|token| {
                    token.append_character(ch);
                })
                .switch_state_to("comment-less-than-sign")
                .and_continue(),

            // U+002D HYPHEN-MINUS (-)
            | Some('-') => {
                self.switch_state_to("comment-end-dash").and_continue()
            }

            // U+0000 NULL
            | Some('\0') => self
                .change_current_token(|token| {
                    token.append_character(char::REPLACEMENT_CHARACTER);
                })
                .and_continue_with_error("unexpected-null-character"),

            // EOF
            | None => {
                let comment =
                    self.token.take().expect("Le jeton de commentaire");
                self.emit_token(comment)
                    .set_token(HTMLToken::EOF)
                    .and_emit_with_error("eof-in-comment")
            }

            // Anything else
            | Some(ch) => self
                .change_current_token(|token| {
                    token.append_character(ch);
                })
                .and_continue(),
        }
    }

    pub(crate) fn handle_comment_less_than_sign_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+0021 EXCLAMATION MARK (!)
            | Some(ch @ '!') => self
                .change_current_token(|token| {
                    token.append_character(ch);
                })
                .switch_state_to("comment-less-than-sign-bang")
                .and_continue(),

            // U+003C LESS-THAN SIGN (<)
            | Some(ch @ '<') => self
                .change_current_token(|token| {
                    token.append_character(ch);
                })
                .and_continue(),

            // Anything else
            | _ => self.reconsume("comment").and_continue(),
        }
    }

    pub(crate) fn handle_comment_less_than_sign_bang_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("comment-less-than-sign-bang-dash")
                .and_continue(),

            // Anything else
            | _ => self.reconsume("comment").and_continue(),
        }
    }

    pub(crate) fn handle_comment_less_than_sign_bang_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .switch_state_to("comment-less-than-sign-bang-dash-dash")
                .and_continue(),

            // Anything else
            | _ => self.reconsume("comment-end-dash").and_continue(),
        }
    }

    pub(crate) fn handle_comment_less_than_sign_bang_dash_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+003E GREATER-THAN SIGN (>), EOF
            | Some('>') | None => {
                self.reconsume("comment-end").and_continue()
            }

            // Anything else
            //
            // Erreur d'analyse : `<!--` dans un commentaire.
            | Some(_) => self
                .reconsume("comment-end")
                .and_continue_with_error("nested-comment"),
        }
    }

    pub(crate) fn handle_comment_end_dash_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            | Some('-') => {
                self.switch_state_to("comment-end").and_continue()
            }

            // EOF
            | None => {
                let comment =
                    self.token.take().expect("Le jeton de commentaire");
                self.emit_token(comment)
                    .set_token(HTMLToken::EOF)
                    .and_emit_with_error("eof-in-comment")
            }

            // Anything else
            | Some(_) => self
                .change_current_token(|token| {
                    token.append_character('-');
                })
                .reconsume("comment")
                .and_continue(),
        }
    }

    pub(crate) fn handle_comment_end_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+003E GREATER-THAN SIGN (>)
            | Some('>') => self.switch_state_to("data").and_emit(),

            // U+0021 EXCLAMATION MARK (!)
            | Some('!') => {
                self.switch_state_to("comment-end-bang").and_continue()
            }

            // U+002D HYPHEN-MINUS (-)
            | Some('-') => self
                .change_current_token(|token| {
                    token.append_character('-');
                })
                .and_continue(),

            // EOF
            | None => {
                let comment =
                    self.token.take().expect("Le jeton de commentaire");
                self.emit_token(comment)
                    .set_token(HTMLToken::EOF)
                    .and_emit_with_error("eof-in-comment")
            }

            // Anything else
            //
            // Ajouter « -- » au commentaire et reprendre dans l'état
            // `comment`.
            | Some(_) => self
                .change_current_token(|token| {
                    token.append_character('-');
                    token.append_character('-');
                })
                .reconsume("comment")
                .and_continue(),
        }
    }

    pub(crate) fn handle_comment_end_bang_state(
        &mut self,
    ) -> HTMLTokenizerProcessResult {
        match self.stream.consume_next_input_character() {
            // U+002D HYPHEN-MINUS (-)
            //
            // Ajouter « --! » au commentaire et passer à l'état
            // `comment-end-dash`.
            | Some('-') => self
                .change_current_token(|token| {
                    token.append_character('-');
                    token.append_character('-');
                    token.append_character('!');
                })
                .switch_state_to("comment-end-dash")
                .and_continue(),

            // U+003E GREATER-THAN SIGN (>)
            //
            // Erreur d'analyse. Passer à l'état `data` et émettre le
            // commentaire.
            | Some('>') => self
                .switch_state_to("data")
                .and_emit_with_error("incorrectly-closed-comment"),

            // EOF
            | None => {
                let comment =
                    self.token.take().expect("Le jeton de commentaire");
                self.emit_token(comment)
                    .set_token(HTMLToken::EOF)
                    .and_emit_with_error("eof-in-comment")
            }

            // Anything else
            | Some(_) => self
                .change_current_token(|token| {
                    token.append_character('-');
                    token.append_character('-');
                    token.append_character('!');
                })
                .reconsume("comment")
                .and_continue(),
        }
    }
}
