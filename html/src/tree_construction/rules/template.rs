/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{
    elements::{tag_names, IsOneOfTagsInterface},
    tokenization::HTMLToken,
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
        InsertionMode,
    },
};

impl HTMLTreeConstruction {
    /// Le contenu d'un template est émis entre ses signaux de début et de
    /// fin, sans marqueur distinctif : ce mode ne fait que router les
    /// jetons vers le mode approprié.
    pub(crate) fn handle_in_template_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // Caractères, commentaires, DOCTYPE : règles "in body".
            | HTMLToken::Character(_)
            | HTMLToken::Comment(_)
            | HTMLToken::DOCTYPE(_) => self
                .process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                ),

            // base, basefont, bgsound, link, meta, noframes, script,
            // style, template, title, et la balise de fin template :
            // règles "in head".
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::base,
                        tag_names::basefont,
                        tag_names::bgsound,
                        tag_names::link,
                        tag_names::meta,
                        tag_names::noframes,
                        tag_names::script,
                        tag_names::style,
                        tag_names::template,
                        tag_names::title,
                    ]))
                    || (tag.is_end
                        && tag_names::template == &tag.name) =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }

            // caption, colgroup, tbody, tfoot, thead
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::caption,
                        tag_names::colgroup,
                        tag_names::tbody,
                        tag_names::tfoot,
                        tag_names::thead,
                    ]) =>
            {
                self.pop_template_insertion_mode();
                self.push_template_insertion_mode(
                    InsertionMode::InTable,
                );
                self.insertion_mode.switch_to(InsertionMode::InTable);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // col
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::col == &tag.name =>
            {
                self.pop_template_insertion_mode();
                self.push_template_insertion_mode(
                    InsertionMode::InColumnGroup,
                );
                self.insertion_mode
                    .switch_to(InsertionMode::InColumnGroup);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // tr
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::tr == &tag.name =>
            {
                self.pop_template_insertion_mode();
                self.push_template_insertion_mode(
                    InsertionMode::InTableBody,
                );
                self.insertion_mode
                    .switch_to(InsertionMode::InTableBody);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // td, th
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::td,
                        tag_names::th,
                    ]) =>
            {
                self.pop_template_insertion_mode();
                self.push_template_insertion_mode(InsertionMode::InRow);
                self.insertion_mode.switch_to(InsertionMode::InRow);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // Any other start tag
            | HTMLToken::Tag(ref tag) if !tag.is_end => {
                self.pop_template_insertion_mode();
                self.push_template_insertion_mode(InsertionMode::InBody);
                self.insertion_mode.switch_to(InsertionMode::InBody);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // Any other end tag
            | HTMLToken::Tag(_) => {
                self.parse_error(&token);
                self.proceed()
            }

            // EOF
            | HTMLToken::EOF => {
                if !self
                    .stack()
                    .has_element_with_tag_name(tag_names::template)
                {
                    return self.stop();
                }

                self.parse_error(&token);
                self.pop_until_tag(tag_names::template);
                self.clear_list_up_to_the_last_marker();
                self.pop_template_insertion_mode();
                self.reset_insertion_mode_appropriately();
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }
}
