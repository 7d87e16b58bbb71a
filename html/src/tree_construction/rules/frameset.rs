/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{
    elements::tag_names,
    tokenization::HTMLToken,
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
        InsertionMode,
    },
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_in_frameset_insertion_mode(
        &mut self,
        mut token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, U+0020 SPACE
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.insert_character(ch);
                self.proceed()
            }

            // A comment token
            | HTMLToken::Comment(comment) => {
                self.insert_comment(comment);
                self.proceed()
            }

            // A DOCTYPE token
            | HTMLToken::DOCTYPE(_) => {
                self.parse_error(&token);
                self.proceed()
            }

            // A start tag whose tag name is "html"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::html == &tag.name =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                )
            }

            // A start tag whose tag name is "frameset"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::frameset == &tag.name =>
            {
                self.insert_html_element(tag);
                self.proceed()
            }

            // An end tag whose tag name is "frameset"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::frameset == &tag.name =>
            {
                if self.stack().len() == 1 {
                    self.parse_error(&token);
                    return self.proceed();
                }

                self.pop_element();

                if !self.is_parsing_fragment()
                    && !self.current_node().is_some_and(|node| {
                        node.is_html_element(tag_names::frameset)
                    })
                {
                    self.insertion_mode
                        .switch_to(InsertionMode::AfterFrameset);
                }
                self.proceed()
            }

            // A start tag whose tag name is "frame"
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end && tag_names::frame == &tag.name =>
            {
                self.insert_html_element(tag);
                self.pop_element();
                tag.set_acknowledge_self_closing_flag();
                self.proceed()
            }

            // A start tag whose tag name is "noframes"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::noframes == &tag.name =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }

            // EOF
            | HTMLToken::EOF => {
                if self.stack().len() != 1 {
                    self.parse_error(&token);
                }
                self.stop()
            }

            // Anything else
            | _ => {
                self.parse_error(&token);
                self.proceed()
            }
        }
    }

    pub(crate) fn handle_after_frameset_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.insert_character(ch);
                self.proceed()
            }

            | HTMLToken::Comment(comment) => {
                self.insert_comment(comment);
                self.proceed()
            }

            | HTMLToken::DOCTYPE(_) => {
                self.parse_error(&token);
                self.proceed()
            }

            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::html == &tag.name =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                )
            }

            // An end tag whose tag name is "html"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::html == &tag.name =>
            {
                self.insertion_mode
                    .switch_to(InsertionMode::AfterAfterFrameset);
                self.proceed()
            }

            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::noframes == &tag.name =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }

            | HTMLToken::EOF => self.stop(),

            | _ => {
                self.parse_error(&token);
                self.proceed()
            }
        }
    }

    pub(crate) fn handle_after_after_frameset_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            | HTMLToken::Comment(comment) => {
                self.insert_comment_in_document(comment);
                self.proceed()
            }

            | HTMLToken::DOCTYPE(_) => self
                .process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                ),
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                )
            }
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::html == &tag.name =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                )
            }

            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::noframes == &tag.name =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }

            | HTMLToken::EOF => self.stop(),

            | _ => {
                self.parse_error(&token);
                self.proceed()
            }
        }
    }
}
