/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{
    elements::{tag_names, IsOneOfTagsInterface},
    tokenization::{HTMLTagToken, HTMLToken},
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
        InsertionMode, Scope,
    },
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_in_select_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // U+0000 NULL
            | HTMLToken::Character('\0') => {
                self.parse_error(&token);
                self.proceed()
            }

            // Any other character token
            | HTMLToken::Character(ch) => {
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

            // A start tag whose tag name is "option"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::option == &tag.name =>
            {
                if self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::option)
                }) {
                    self.pop_element();
                }
                self.insert_html_element(tag);
                self.proceed()
            }

            // A start tag whose tag name is "optgroup"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::optgroup == &tag.name =>
            {
                if self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::option)
                }) {
                    self.pop_element();
                }
                if self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::optgroup)
                }) {
                    self.pop_element();
                }
                self.insert_html_element(tag);
                self.proceed()
            }

            // An end tag whose tag name is "optgroup"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::optgroup == &tag.name =>
            {
                // Un option ouvert juste sous un optgroup est fermé
                // d'abord.
                if self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::option)
                }) && self
                    .stack()
                    .get(self.stack().len().saturating_sub(2))
                    .is_some_and(|entry| {
                        entry
                            .element
                            .is_html_element(tag_names::optgroup)
                    })
                {
                    self.pop_element();
                }

                if self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::optgroup)
                }) {
                    self.pop_element();
                } else {
                    self.parse_error(&token);
                }
                self.proceed()
            }

            // An end tag whose tag name is "option"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::option == &tag.name =>
            {
                if self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::option)
                }) {
                    self.pop_element();
                } else {
                    self.parse_error(&token);
                }
                self.proceed()
            }

            // An end tag whose tag name is "select"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::select == &tag.name =>
            {
                if !self.stack().has_element_in_scope(
                    tag_names::select,
                    Scope::Select,
                ) {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.pop_until_tag(tag_names::select);
                self.reset_insertion_mode_appropriately();
                self.proceed()
            }

            // A start tag whose tag name is "select"
            //
            // Erreur d'analyse : traitée comme une balise de fin select.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::select == &tag.name =>
            {
                self.parse_error(&token);
                if !self.stack().has_element_in_scope(
                    tag_names::select,
                    Scope::Select,
                ) {
                    return self.proceed();
                }
                self.pop_until_tag(tag_names::select);
                self.reset_insertion_mode_appropriately();
                self.proceed()
            }

            // input, keygen, textarea
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::input,
                        tag_names::keygen,
                        tag_names::textarea,
                    ]) =>
            {
                self.parse_error(&token);
                if !self.stack().has_element_in_scope(
                    tag_names::select,
                    Scope::Select,
                ) {
                    return self.proceed();
                }
                self.pop_until_tag(tag_names::select);
                self.reset_insertion_mode_appropriately();
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // script, template et la balise de fin template : règles du
            // mode "in head".
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::script,
                        tag_names::template,
                    ]))
                    || (tag.is_end
                        && tag_names::template == &tag.name) =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }

            // EOF
            | HTMLToken::EOF => self.process_using_the_rules_for(
                InsertionMode::InBody,
                token,
            ),

            // Anything else
            | _ => {
                self.parse_error(&token);
                self.proceed()
            }
        }
    }

    pub(crate) fn handle_in_select_in_table_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // caption, table, tbody, tfoot, thead, tr, td, th en balise
            // de début : erreur d'analyse ; fermer le select et
            // retraiter.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && Self::is_table_breakout_tag(tag) =>
            {
                self.parse_error(&token);
                self.pop_until_tag(tag_names::select);
                self.reset_insertion_mode_appropriately();
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // Les mêmes, en balise de fin : erreur d'analyse ; si
            // l'élément est en portée de table, fermer le select et
            // retraiter, sinon ignorer.
            | HTMLToken::Tag(ref tag)
                if tag.is_end && Self::is_table_breakout_tag(tag) =>
            {
                self.parse_error(&token);

                let tag_name: tag_names = tag
                    .name
                    .parse()
                    .expect("Un nom de balise de table");
                if !self
                    .stack()
                    .has_element_in_scope(tag_name, Scope::Table)
                {
                    return self.proceed();
                }

                self.pop_until_tag(tag_names::select);
                self.reset_insertion_mode_appropriately();
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // Anything else : règles du mode "in select".
            | _ => self.process_using_the_rules_for(
                InsertionMode::InSelect,
                token,
            ),
        }
    }

    fn is_table_breakout_tag(tag: &HTMLTagToken) -> bool {
        tag.name.as_str().is_one_of([
            tag_names::caption,
            tag_names::table,
            tag_names::tbody,
            tag_names::tfoot,
            tag_names::thead,
            tag_names::tr,
            tag_names::td,
            tag_names::th,
        ])
    }
}
