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
    pub(crate) fn handle_in_table_insertion_mode(
        &mut self,
        mut token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token, si le nœud actuel est une table, tbody,
            // tfoot, thead ou tr : vider les caractères de table en
            // attente, retenir le mode d'insertion d'origine et passer en
            // mode "in table text".
            | HTMLToken::Character(_)
                if self.current_node().is_some_and(|node| {
                    node.is_one_of_html_elements([
                        tag_names::table,
                        tag_names::tbody,
                        tag_names::tfoot,
                        tag_names::thead,
                        tag_names::tr,
                    ])
                }) =>
            {
                self.original_insertion_mode
                    .switch_to(self.insertion_mode);
                self.insertion_mode
                    .switch_to(InsertionMode::InTableText);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
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

            // A start tag whose tag name is "caption"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::caption == &tag.name =>
            {
                self.clear_stack_back_to_table_context();
                self.insert_marker_at_end_of_list();
                self.insert_html_element(tag);
                self.insertion_mode.switch_to(InsertionMode::InCaption);
                self.proceed()
            }

            // A start tag whose tag name is "colgroup"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::colgroup == &tag.name =>
            {
                self.clear_stack_back_to_table_context();
                self.insert_html_element(tag);
                self.insertion_mode
                    .switch_to(InsertionMode::InColumnGroup);
                self.proceed()
            }

            // A start tag whose tag name is "col"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::col == &tag.name =>
            {
                self.clear_stack_back_to_table_context();
                let colgroup_token = HTMLTagToken::start()
                    .with_name(tag_names::colgroup);
                self.insert_html_element(&colgroup_token);
                self.insertion_mode
                    .switch_to(InsertionMode::InColumnGroup);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // tbody, tfoot, thead
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::tbody,
                        tag_names::tfoot,
                        tag_names::thead,
                    ]) =>
            {
                self.clear_stack_back_to_table_context();
                self.insert_html_element(tag);
                self.insertion_mode
                    .switch_to(InsertionMode::InTableBody);
                self.proceed()
            }

            // td, th, tr : un tbody implicite est inséré.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::td,
                        tag_names::th,
                        tag_names::tr,
                    ]) =>
            {
                self.clear_stack_back_to_table_context();
                let tbody_token =
                    HTMLTagToken::start().with_name(tag_names::tbody);
                self.insert_html_element(&tbody_token);
                self.insertion_mode
                    .switch_to(InsertionMode::InTableBody);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // A start tag whose tag name is "table"
            //
            // Erreur d'analyse : une table ne s'imbrique pas dans une
            // table. Fermer la table courante et retraiter le jeton.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::table == &tag.name =>
            {
                self.parse_error(&token);
                if !self
                    .stack()
                    .has_element_in_scope(tag_names::table, Scope::Table)
                {
                    return self.proceed();
                }
                self.pop_until_tag(tag_names::table);
                self.reset_insertion_mode_appropriately();
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // An end tag whose tag name is "table"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::table == &tag.name =>
            {
                if !self
                    .stack()
                    .has_element_in_scope(tag_names::table, Scope::Table)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.pop_until_tag(tag_names::table);
                self.reset_insertion_mode_appropriately();
                self.proceed()
            }

            // body, caption, col, colgroup, html, tbody, td, tfoot, th,
            // thead, tr en balise de fin : erreur d'analyse, ignorer.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::body,
                        tag_names::caption,
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

            // style, script, template et la balise de fin template :
            // règles du mode "in head".
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::style,
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

            // input avec type=hidden : toléré dans la table.
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end
                    && tag_names::input == &tag.name
                    && tag.attribute_value("type").is_some_and(
                        |value| value.eq_ignore_ascii_case("hidden"),
                    ) =>
            {
                self.report_bad_content(
                    "input caché directement dans une table",
                );
                self.insert_html_element(tag);
                self.pop_element();
                tag.set_acknowledge_self_closing_flag();
                self.proceed()
            }

            // A start tag whose tag name is "form"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::form == &tag.name =>
            {
                self.parse_error(&token);
                if self
                    .stack()
                    .has_element_with_tag_name(tag_names::template)
                    || self.form_element_pointer().is_some()
                {
                    return self.proceed();
                }
                let element = self.insert_html_element(tag);
                self.set_form_element_pointer(Some(element));
                self.pop_element();
                self.proceed()
            }

            // EOF
            | HTMLToken::EOF => self.process_using_the_rules_for(
                InsertionMode::InBody,
                token,
            ),

            // Anything else
            //
            // Erreur d'analyse. Traiter le jeton selon les règles du mode
            // "in body", avec le foster parenting actif.
            | _ => {
                self.report_bad_content(
                    "contenu mal placé dans une table",
                );
                self.enable_foster_parenting();
                let result = self.process_using_the_rules_for(
                    InsertionMode::InBody,
                    token,
                );
                self.disable_foster_parenting();
                result
            }
        }
    }

    pub(crate) fn handle_in_table_text_insertion_mode(
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
                self.push_pending_table_character(ch);
                self.proceed()
            }

            // Anything else
            //
            // Vider les caractères de table en attente, puis restaurer le
            // mode d'insertion d'origine et retraiter le jeton.
            | _ => {
                self.flush_pending_table_character_tokens();
                self.insertion_mode
                    .switch_to(self.original_insertion_mode);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }

    pub(crate) fn handle_in_column_group_insertion_mode(
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

            // A start tag whose tag name is "col"
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end && tag_names::col == &tag.name =>
            {
                self.insert_html_element(tag);
                self.pop_element();
                tag.set_acknowledge_self_closing_flag();
                self.proceed()
            }

            // An end tag whose tag name is "colgroup"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::colgroup == &tag.name =>
            {
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::colgroup)
                }) {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.pop_element();
                self.insertion_mode.switch_to(InsertionMode::InTable);
                self.proceed()
            }

            // An end tag whose tag name is "col"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::col == &tag.name =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // template en balise de début ou de fin : règles "in head".
            | HTMLToken::Tag(ref tag)
                if tag_names::template == &tag.name =>
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
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::colgroup)
                }) {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.pop_element();
                self.insertion_mode.switch_to(InsertionMode::InTable);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }

    pub(crate) fn handle_in_table_body_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A start tag whose tag name is "tr"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::tr == &tag.name =>
            {
                self.clear_stack_back_to_table_body_context();
                self.insert_html_element(tag);
                self.insertion_mode.switch_to(InsertionMode::InRow);
                self.proceed()
            }

            // th, td : un tr implicite est inséré.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::th,
                        tag_names::td,
                    ]) =>
            {
                self.parse_error(&token);
                self.clear_stack_back_to_table_body_context();
                let tr_token =
                    HTMLTagToken::start().with_name(tag_names::tr);
                self.insert_html_element(&tr_token);
                self.insertion_mode.switch_to(InsertionMode::InRow);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // tbody, tfoot, thead en balise de fin.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::tbody,
                        tag_names::tfoot,
                        tag_names::thead,
                    ]) =>
            {
                let tag_name: tag_names = tag
                    .name
                    .parse()
                    .expect("tbody, tfoot ou thead");

                if !self
                    .stack()
                    .has_element_in_scope(tag_name, Scope::Table)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.clear_stack_back_to_table_body_context();
                self.pop_element();
                self.insertion_mode.switch_to(InsertionMode::InTable);
                self.proceed()
            }

            // caption, col, colgroup, tbody, tfoot, thead en balise de
            // début, ou </table> : fermer la section courante et
            // retraiter.
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::caption,
                        tag_names::col,
                        tag_names::colgroup,
                        tag_names::tbody,
                        tag_names::tfoot,
                        tag_names::thead,
                    ]))
                    || (tag.is_end
                        && tag_names::table == &tag.name) =>
            {
                if !self.stack().has_one_of_elements_in_scope(
                    [
                        tag_names::tbody,
                        tag_names::thead,
                        tag_names::tfoot,
                    ],
                    Scope::Table,
                ) {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.clear_stack_back_to_table_body_context();
                self.pop_element();
                self.insertion_mode.switch_to(InsertionMode::InTable);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // body, caption, col, colgroup, html, td, th, tr en balise de
            // fin : erreur d'analyse, ignorer.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::body,
                        tag_names::caption,
                        tag_names::col,
                        tag_names::colgroup,
                        tag_names::html,
                        tag_names::td,
                        tag_names::th,
                        tag_names::tr,
                    ]) =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // Anything else : règles du mode "in table".
            | _ => self.process_using_the_rules_for(
                InsertionMode::InTable,
                token,
            ),
        }
    }

    pub(crate) fn handle_in_row_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // th, td
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::th,
                        tag_names::td,
                    ]) =>
            {
                self.clear_stack_back_to_table_row_context();
                self.insert_html_element(tag);
                self.insertion_mode.switch_to(InsertionMode::InCell);
                self.insert_marker_at_end_of_list();
                self.proceed()
            }

            // An end tag whose tag name is "tr"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::tr == &tag.name =>
            {
                if !self
                    .stack()
                    .has_element_in_scope(tag_names::tr, Scope::Table)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.clear_stack_back_to_table_row_context();
                self.pop_element();
                self.insertion_mode
                    .switch_to(InsertionMode::InTableBody);
                self.proceed()
            }

            // caption, col, colgroup, tbody, tfoot, thead, tr en balise
            // de début, ou </table> : fermer la ligne et retraiter.
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::caption,
                        tag_names::col,
                        tag_names::colgroup,
                        tag_names::tbody,
                        tag_names::tfoot,
                        tag_names::thead,
                        tag_names::tr,
                    ]))
                    || (tag.is_end
                        && tag_names::table == &tag.name) =>
            {
                if !self
                    .stack()
                    .has_element_in_scope(tag_names::tr, Scope::Table)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.clear_stack_back_to_table_row_context();
                self.pop_element();
                self.insertion_mode
                    .switch_to(InsertionMode::InTableBody);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // tbody, tfoot, thead en balise de fin.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::tbody,
                        tag_names::tfoot,
                        tag_names::thead,
                    ]) =>
            {
                let tag_name: tag_names = tag
                    .name
                    .parse()
                    .expect("tbody, tfoot ou thead");

                if !self
                    .stack()
                    .has_element_in_scope(tag_name, Scope::Table)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                if !self
                    .stack()
                    .has_element_in_scope(tag_names::tr, Scope::Table)
                {
                    return self.proceed();
                }
                self.clear_stack_back_to_table_row_context();
                self.pop_element();
                self.insertion_mode
                    .switch_to(InsertionMode::InTableBody);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // body, caption, col, colgroup, html, td, th en balise de
            // fin : erreur d'analyse, ignorer.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::body,
                        tag_names::caption,
                        tag_names::col,
                        tag_names::colgroup,
                        tag_names::html,
                        tag_names::td,
                        tag_names::th,
                    ]) =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // Anything else : règles du mode "in table".
            | _ => self.process_using_the_rules_for(
                InsertionMode::InTable,
                token,
            ),
        }
    }

    pub(crate) fn handle_in_cell_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // td, th en balise de fin.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::td,
                        tag_names::th,
                    ]) =>
            {
                let tag_name: tag_names =
                    tag.name.parse().expect("td ou th");

                if !self
                    .stack()
                    .has_element_in_scope(tag_name, Scope::Table)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }

                self.generate_implied_end_tags();
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_name)
                }) {
                    self.report_misnested(
                        "cellule de table mal imbriquée",
                    );
                }
                self.pop_until_tag(tag_name);
                self.clear_list_up_to_the_last_marker();
                self.insertion_mode.switch_to(InsertionMode::InRow);
                self.proceed()
            }

            // caption, col, colgroup, tbody, td, tfoot, th, thead, tr en
            // balise de début : fermer la cellule et retraiter.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
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
                    ]) =>
            {
                if !self.stack().has_one_of_elements_in_scope(
                    [tag_names::td, tag_names::th],
                    Scope::Table,
                ) {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.close_cell();
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // body, caption, col, colgroup, html en balise de fin :
            // erreur d'analyse, ignorer.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::body,
                        tag_names::caption,
                        tag_names::col,
                        tag_names::colgroup,
                        tag_names::html,
                    ]) =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // table, tbody, tfoot, thead, tr en balise de fin : fermer la
            // cellule et retraiter.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::table,
                        tag_names::tbody,
                        tag_names::tfoot,
                        tag_names::thead,
                        tag_names::tr,
                    ]) =>
            {
                let tag_name: tag_names = tag
                    .name
                    .parse()
                    .expect("Un nom de balise de table");

                if !self
                    .stack()
                    .has_element_in_scope(tag_name, Scope::Table)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.close_cell();
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // Anything else : règles du mode "in body".
            | _ => self.process_using_the_rules_for(
                InsertionMode::InBody,
                token,
            ),
        }
    }

    /// Ferme la cellule ouverte (td ou th) et revient au mode "in row".
    fn close_cell(&mut self) {
        self.generate_implied_end_tags();
        if !self.current_node().is_some_and(|node| {
            node.is_one_of_html_elements([tag_names::td, tag_names::th])
        }) {
            self.report_misnested("cellule de table mal imbriquée");
        }
        self.pop_until_one_of([tag_names::td, tag_names::th]);
        self.clear_list_up_to_the_last_marker();
        self.insertion_mode.switch_to(InsertionMode::InRow);
    }
}
