/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{
    elements::{tag_names, IsOneOfTagsInterface},
    tokenization::{HTMLTagToken, HTMLToken, State},
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
        InsertionMode,
    },
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_before_head_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, U+0020 SPACE
            //
            // Ignorer le jeton.
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
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

            // A start tag whose tag name is "head"
            //
            // Insérer un élément HTML pour le jeton ; placer le pointeur
            // de l'élément head sur lui ; passer à "in head".
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::head == &tag.name =>
            {
                let head_element = self.insert_html_element(tag);
                self.set_head_element_pointer(head_element);
                self.insertion_mode.switch_to(InsertionMode::InHead);
                self.proceed()
            }

            // Toute autre balise de fin que head, body, html, br :
            // erreur d'analyse, ignorer le jeton.
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
            // Insérer un élément head synthétique, placer le pointeur,
            // passer à "in head" et retraiter le jeton.
            | _ => {
                let head_token =
                    HTMLTagToken::start().with_name(tag_names::head);
                let head_element = self.insert_html_element(&head_token);
                self.set_head_element_pointer(head_element);
                self.insertion_mode.switch_to(InsertionMode::InHead);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }

    pub(crate) fn handle_in_head_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, U+0020 SPACE
            //
            // Insérer le caractère.
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

            // base, basefont, bgsound, link, meta
            //
            // Insérer un élément HTML pour le jeton, puis le dépiler
            // immédiatement. Accuser réception du drapeau de fermeture
            // automatique.
            | HTMLToken::Tag(mut tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::base,
                        tag_names::basefont,
                        tag_names::bgsound,
                        tag_names::link,
                        tag_names::meta,
                    ]) =>
            {
                self.insert_html_element(&tag);
                self.pop_element();
                tag.set_acknowledge_self_closing_flag();
                self.proceed()
            }

            // A start tag whose tag name is "title"
            //
            // Algorithme générique d'analyse des éléments RCDATA.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::title == &tag.name =>
            {
                self.parse_generic_element(tag, State::RCDATA)
            }

            // noscript (scripting actif), noframes, style
            //
            // Algorithme générique d'analyse des éléments de texte brut.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && ((tag_names::noscript == &tag.name
                        && self.is_scripting_enabled())
                        || tag.name.as_str().is_one_of([
                            tag_names::noframes,
                            tag_names::style,
                        ])) =>
            {
                self.parse_generic_element(tag, State::RAWTEXT)
            }

            // noscript (scripting inactif)
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag_names::noscript == &tag.name
                    && !self.is_scripting_enabled() =>
            {
                self.insert_html_element(tag);
                self.insertion_mode
                    .switch_to(InsertionMode::InHeadNoscript);
                self.proceed()
            }

            // A start tag whose tag name is "script"
            //
            // Insérer l'élément, basculer le tokenizer en
            // `script-data`, retenir le mode d'insertion d'origine, et
            // passer en mode "text". (Aucune exécution de script.)
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::script == &tag.name =>
            {
                self.parse_generic_element(tag, State::ScriptData)
            }

            // An end tag whose tag name is "head"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::head == &tag.name =>
            {
                self.pop_element();
                self.insertion_mode.switch_to(InsertionMode::AfterHead);
                self.proceed()
            }

            // A start tag whose tag name is "template"
            //
            // Insérer l'élément ; insérer un marqueur en fin de liste des
            // éléments de mise en forme actifs ; frameset-ok "not ok" ;
            // mode "in template" ; empiler "in template" sur la pile des
            // modes d'insertion de template.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::template == &tag.name =>
            {
                self.insert_html_element(tag);
                self.insert_marker_at_end_of_list();
                self.set_frameset_not_ok();
                self.insertion_mode.switch_to(InsertionMode::InTemplate);
                self.push_template_insertion_mode(
                    InsertionMode::InTemplate,
                );
                self.proceed()
            }

            // An end tag whose tag name is "template"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::template == &tag.name =>
            {
                if !self
                    .stack()
                    .has_element_with_tag_name(tag_names::template)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }

                self.generate_all_implied_end_tags_thoroughly();
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::template)
                }) {
                    self.report_misnested(
                        "balise template mal imbriquée",
                    );
                }
                self.pop_until_tag(tag_names::template);
                self.clear_list_up_to_the_last_marker();
                self.pop_template_insertion_mode();
                self.reset_insertion_mode_appropriately();
                self.proceed()
            }

            // Une balise de début head, ou toute autre balise de fin que
            // body, html, br : erreur d'analyse, ignorer.
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end && tag_names::head == &tag.name)
                    || (tag.is_end
                        && !tag.name.as_str().is_one_of([
                            tag_names::body,
                            tag_names::html,
                            tag_names::br,
                        ])) =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // Anything else
            //
            // Dépiler le nœud actuel (l'élément head), passer à "after
            // head" et retraiter le jeton.
            | _ => {
                self.pop_element();
                self.insertion_mode.switch_to(InsertionMode::AfterHead);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }

    pub(crate) fn handle_in_head_noscript_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
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

            // An end tag whose tag name is "noscript"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::noscript == &tag.name =>
            {
                self.pop_element();
                self.insertion_mode.switch_to(InsertionMode::InHead);
                self.proceed()
            }

            // Espaces, commentaires, basefont, bgsound, link, meta,
            // noframes, style : règles du mode "in head".
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }
            | HTMLToken::Comment(_) => self
                .process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                ),
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::basefont,
                        tag_names::bgsound,
                        tag_names::link,
                        tag_names::meta,
                        tag_names::noframes,
                        tag_names::style,
                    ]) =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }

            // head, noscript en balise de début ; toute balise de fin
            // autre que br : erreur d'analyse, ignorer.
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::head,
                        tag_names::noscript,
                    ]))
                    || (tag.is_end
                        && tag_names::br != &tag.name) =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // Anything else
            //
            // Erreur d'analyse. Dépiler le noscript, repasser à
            // "in head", retraiter.
            | _ => {
                self.parse_error(&token);
                self.pop_element();
                self.insertion_mode.switch_to(InsertionMode::InHead);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }

    pub(crate) fn handle_after_head_insertion_mode(
        &mut self,
        token: HTMLToken,
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

            // A start tag whose tag name is "body"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::body == &tag.name =>
            {
                self.insert_html_element(tag);
                self.set_frameset_not_ok();
                self.insertion_mode.switch_to(InsertionMode::InBody);
                self.proceed()
            }

            // A start tag whose tag name is "frameset"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::frameset == &tag.name =>
            {
                self.insert_html_element(tag);
                self.insertion_mode.switch_to(InsertionMode::InFrameset);
                self.proceed()
            }

            // base, basefont, bgsound, link, meta, noframes, script,
            // style, template, title
            //
            // Erreur d'analyse : ces métadonnées auraient dû être dans le
            // head. Elles sont traitées par les règles du mode "in head"
            // à la position courante (en signaux, le head est déjà
            // fermé : pas de ré-ouverture).
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
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
                    ]) =>
            {
                self.parse_error(&token);
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }

            // An end tag whose tag name is "template"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::template == &tag.name =>
            {
                self.process_using_the_rules_for(
                    InsertionMode::InHead,
                    token,
                )
            }

            // Une balise de début head, ou toute autre balise de fin que
            // body, html, br : erreur d'analyse, ignorer.
            | HTMLToken::Tag(ref tag)
                if (!tag.is_end && tag_names::head == &tag.name)
                    || (tag.is_end
                        && !tag.name.as_str().is_one_of([
                            tag_names::body,
                            tag_names::html,
                            tag_names::br,
                        ])) =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // Anything else
            //
            // Insérer un élément body synthétique, passer à "in body" et
            // retraiter le jeton.
            | _ => {
                let body_token =
                    HTMLTagToken::start().with_name(tag_names::body);
                self.insert_html_element(&body_token);
                self.insertion_mode.switch_to(InsertionMode::InBody);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }
}
