/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{
    elements::{tag_names, IsOneOfTagsInterface},
    tokenization::{HTMLTagToken, HTMLToken},
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
        InsertionMode,
    },
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_before_html_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A DOCTYPE token
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::DOCTYPE(_) => {
                self.parse_error(&token);
                self.proceed()
            }

            // A comment token
            | HTMLToken::Comment(comment) => {
                self.insert_comment_in_document(comment);
                self.proceed()
            }

            // U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, U+0020 SPACE
            //
            // Ignorer le jeton.
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.proceed()
            }

            // A start tag whose tag name is "html"
            //
            // Créer un élément pour le jeton, le placer sur la pile des
            // éléments ouverts, et passer le mode d'insertion à "before
            // head".
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::html == &tag.name =>
            {
                self.insert_html_element(tag);
                self.insertion_mode.switch_to(InsertionMode::BeforeHead);
                self.proceed()
            }

            // Une balise de fin dont le nom n'est pas head, body, html
            // ou br : erreur d'analyse, ignorer le jeton. (Les quatre
            // citées tombent dans « anything else ».)
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && !tag.name.as_str().is_one_of([
                        tag_names::head,
                        tag_names::body,
                        tag_names::html,
                        tag_names::br,
                    ]) =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // Anything else
            //
            // Créer un élément html synthétique, le placer sur la pile,
            // passer à "before head" et retraiter le jeton.
            | _ => {
                let html_token =
                    HTMLTagToken::start().with_name(tag_names::html);
                self.insert_html_element(&html_token);
                self.insertion_mode.switch_to(InsertionMode::BeforeHead);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }

    pub(crate) fn handle_after_body_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, U+0020 SPACE
            //
            // Traiter le jeton selon les règles du mode "in body".
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                )
            }

            // A comment token
            //
            // NOTE: le commentaire appartient à l'élément html dans
            // l'arbre ; en signaux, il est émis à la position courante.
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

            // An end tag whose tag name is "html"
            //
            // Dans une analyse de fragment : erreur d'analyse, ignorer.
            // Sinon, passer le mode d'insertion à "after after body".
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::html == &tag.name =>
            {
                if self.is_parsing_fragment() {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.insertion_mode
                    .switch_to(InsertionMode::AfterAfterBody);
                self.proceed()
            }

            // EOF
            | HTMLToken::EOF => self.stop(),

            // Anything else
            //
            // Erreur d'analyse. Repasser le mode d'insertion à "in body"
            // et retraiter le jeton.
            | _ => {
                self.parse_error(&token);
                self.insertion_mode.switch_to(InsertionMode::InBody);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }

    pub(crate) fn handle_after_after_body_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A comment token
            | HTMLToken::Comment(comment) => {
                self.insert_comment_in_document(comment);
                self.proceed()
            }

            // A DOCTYPE token, des espaces, ou une balise de début html :
            // règles du mode "in body".
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

            // EOF
            | HTMLToken::EOF => self.stop(),

            // Anything else
            | _ => {
                self.parse_error(&token);
                self.insertion_mode.switch_to(InsertionMode::InBody);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }
}
