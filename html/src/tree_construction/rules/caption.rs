/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{
    elements::{tag_names, IsOneOfTagsInterface},
    tokenization::HTMLToken,
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
        InsertionMode, Scope,
    },
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_in_caption_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // An end tag whose tag name is "caption"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::caption == &tag.name =>
            {
                if !self.stack().has_element_in_scope(
                    tag_names::caption,
                    Scope::Table,
                ) {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.generate_implied_end_tags();
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::caption)
                }) {
                    self.report_misnested(
                        "balise caption mal imbriquée",
                    );
                }
                self.pop_until_tag(tag_names::caption);
                self.clear_list_up_to_the_last_marker();
                self.insertion_mode.switch_to(InsertionMode::InTable);
                self.proceed()
            }

            // caption, col, colgroup, tbody, td, tfoot, th, thead, tr en
            // balise de début, ou </table> : fermer la légende et
            // retraiter le jeton.
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::caption,
                        tag_names::col,
                        tag_names::colgroup,
                        tag_names::tbody,
                        tag_names::td,
                        tag_names::tfoot,
                        tag_names::th,
                        tag_names::thead,
                        tag_names::tr,
                    ]))
                    || (tag.is_end
                        && tag_names::table == &tag.name) =>
            {
                if !self.stack().has_element_in_scope(
                    tag_names::caption,
                    Scope::Table,
                ) {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.generate_implied_end_tags();
                self.pop_until_tag(tag_names::caption);
                self.clear_list_up_to_the_last_marker();
                self.insertion_mode.switch_to(InsertionMode::InTable);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // body, col, colgroup, html, tbody, td, tfoot, th, thead, tr
            // en balise de fin : erreur d'analyse, ignorer.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::body,
                        tag_names::col,
                        tag_names::colgroup,
                        tag_names::html,
                        tag_names::tbody,
                        tag_names::td,
                        tag_names::tfoot,
                        tag_names::th,
                        tag_names::thead,
                        tag_names::tr,
                    ]) =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // Anything else : règles du mode "in body".
            | _ => self.process_using_the_rules_for(
                InsertionMode::InBody,
                token,
            ),
        }
    }
}
