/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::{ops::ControlFlow, rc::Rc};

use infra::namespace::Namespace;
use parser::diagnostic::DiagnosticKind;

use crate::{
    elements::{tag_names, IsOneOfTagsInterface},
    tokenization::{HTMLTagToken, HTMLToken, QuirksMode, State},
    tree_construction::{
        HTMLParserState, HTMLTreeConstruction,
        HTMLTreeConstructionControlFlow, InsertionMode, Scope,
    },
};

const BLOCK_START_TAGS: [tag_names; 24] = [
    tag_names::address,
    tag_names::article,
    tag_names::aside,
    tag_names::blockquote,
    tag_names::center,
    tag_names::details,
    tag_names::dialog,
    tag_names::dir,
    tag_names::div,
    tag_names::dl,
    tag_names::fieldset,
    tag_names::figcaption,
    tag_names::figure,
    tag_names::footer,
    tag_names::header,
    tag_names::hgroup,
    tag_names::main,
    tag_names::menu,
    tag_names::nav,
    tag_names::ol,
    tag_names::p,
    tag_names::section,
    tag_names::summary,
    tag_names::ul,
];

const HEADING_TAGS: [tag_names; 6] = [
    tag_names::h1,
    tag_names::h2,
    tag_names::h3,
    tag_names::h4,
    tag_names::h5,
    tag_names::h6,
];

const FORMATTING_START_TAGS: [tag_names; 12] = [
    tag_names::b,
    tag_names::big,
    tag_names::code,
    tag_names::em,
    tag_names::font,
    tag_names::i,
    tag_names::s,
    tag_names::small,
    tag_names::strike,
    tag_names::strong,
    tag_names::tt,
    tag_names::u,
];

impl HTMLTreeConstruction {
    pub(crate) fn handle_in_body_insertion_mode(
        &mut self,
        mut token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // U+0000 NULL
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::Character('\0') => {
                self.parse_error(&token);
                self.proceed()
            }

            // U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, U+0020 SPACE
            //
            // Reconstruire les éléments de mise en forme actifs, puis
            // insérer le caractère.
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(ch);
                self.proceed()
            }

            // Any other character token
            | HTMLToken::Character(ch) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(ch);
                self.set_frameset_not_ok();
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
            //
            // Erreur d'analyse. (La fusion d'attributs dans l'élément
            // html déjà émis est impossible en signaux : le jeton est
            // ignoré.)
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::html == &tag.name =>
            {
                self.parse_error(&token);
                self.proceed()
            }

            // base, basefont, bgsound, link, meta, noframes, script,
            // style, template, title, et la balise de fin template :
            // règles du mode "in head".
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

            // A start tag whose tag name is "body"
            //
            // Erreur d'analyse. (Fusion d'attributs impossible en
            // signaux ; le drapeau frameset-ok passe à "not ok".)
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::body == &tag.name =>
            {
                self.parse_error(&token);
                self.set_frameset_not_ok();
                self.proceed()
            }

            // A start tag whose tag name is "frameset"
            //
            // Erreur d'analyse. Si le drapeau frameset-ok est "not ok",
            // ou si le deuxième élément de la pile n'est pas un body :
            // ignorer. Sinon, fermer le body, insérer le frameset et
            // passer en mode "in frameset".
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::frameset == &tag.name =>
            {
                self.parse_error(&token);

                let second_is_body =
                    self.stack().get(1).is_some_and(|entry| {
                        entry.element.is_html_element(tag_names::body)
                    });

                if !second_is_body
                    || !self.is_frameset_ok()
                    || self.stack().len() == 1
                {
                    return self.proceed();
                }

                while self.stack().len() > 1 {
                    self.pop_element();
                }
                self.insert_html_element(tag);
                self.insertion_mode.switch_to(InsertionMode::InFrameset);
                self.proceed()
            }

            // EOF
            //
            // S'il y a des modes d'insertion de template empilés :
            // règles du mode "in template". Sinon, signaler les éléments
            // encore ouverts qui ne peuvent pas l'être implicitement,
            // puis arrêter l'analyse.
            | HTMLToken::EOF => {
                if !self.template_insertion_modes_is_empty() {
                    return self.process_using_the_rules_for(
                        InsertionMode::InTemplate,
                        token,
                    );
                }

                self.report_unclosed_elements();
                self.stop()
            }

            // An end tag whose tag name is "body" / "html"
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::body,
                        tag_names::html,
                    ]) =>
            {
                if !self
                    .stack()
                    .has_element_in_scope(tag_names::body, Scope::Default)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }

                self.report_unclosed_elements();
                let is_html = tag_names::html == &tag.name;
                self.insertion_mode.switch_to(InsertionMode::AfterBody);
                if is_html {
                    return self.process_using_the_rules_for(
                        self.insertion_mode,
                        token,
                    );
                }
                self.proceed()
            }

            // Les conteneurs de bloc : fermer un éventuel `p` en portée
            // de bouton, puis insérer l'élément.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of(BLOCK_START_TAGS) =>
            {
                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                self.insert_html_element(tag);
                self.proceed()
            }

            // h1 à h6 : un titre ne s'imbrique pas dans un titre.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of(HEADING_TAGS) =>
            {
                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                if self.current_node().is_some_and(|node| {
                    node.is_one_of_html_elements(HEADING_TAGS)
                }) {
                    self.report_misnested("titre dans un titre");
                    self.pop_element();
                }
                self.insert_html_element(tag);
                self.proceed()
            }

            // pre, listing : le premier LINE FEED du contenu est ignoré.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::pre,
                        tag_names::listing,
                    ]) =>
            {
                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                self.insert_html_element(tag);
                self.set_ignore_next_lf();
                self.set_frameset_not_ok();
                self.proceed()
            }

            // A start tag whose tag name is "form"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::form == &tag.name =>
            {
                let has_template = self
                    .stack()
                    .has_element_with_tag_name(tag_names::template);

                if self.form_element_pointer().is_some() && !has_template
                {
                    self.parse_error(&token);
                    return self.proceed();
                }

                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                let element = self.insert_html_element(tag);
                if !has_template {
                    self.set_form_element_pointer(Some(element));
                }
                self.proceed()
            }

            // A start tag whose tag name is "li"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::li == &tag.name =>
            {
                self.set_frameset_not_ok();

                for entry_element in self
                    .stack()
                    .iter()
                    .rev()
                    .map(|entry| entry.element.clone())
                    .collect::<Vec<_>>()
                {
                    if entry_element.is_html_element(tag_names::li) {
                        self.generate_implied_end_tags_except_for(
                            tag_names::li,
                        );
                        if !self.current_node().is_some_and(|node| {
                            node.is_html_element(tag_names::li)
                        }) {
                            self.report_misnested(
                                "élément li mal imbriqué",
                            );
                        }
                        self.pop_until_tag(tag_names::li);
                        break;
                    }

                    if entry_element.is_special()
                        && !entry_element.is_one_of_html_elements([
                            tag_names::address,
                            tag_names::div,
                            tag_names::p,
                        ])
                    {
                        break;
                    }
                }

                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                self.insert_html_element(tag);
                self.proceed()
            }

            // dd, dt : même logique que li.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::dd,
                        tag_names::dt,
                    ]) =>
            {
                self.set_frameset_not_ok();

                for entry_element in self
                    .stack()
                    .iter()
                    .rev()
                    .map(|entry| entry.element.clone())
                    .collect::<Vec<_>>()
                {
                    if entry_element.is_one_of_html_elements([
                        tag_names::dd,
                        tag_names::dt,
                    ]) {
                        let exception = if entry_element
                            .is_html_element(tag_names::dd)
                        {
                            tag_names::dd
                        } else {
                            tag_names::dt
                        };
                        self.generate_implied_end_tags_except_for(
                            exception,
                        );
                        if !self.current_node().is_some_and(|node| {
                            node.is_html_element(exception)
                        }) {
                            self.report_misnested(
                                "élément dd/dt mal imbriqué",
                            );
                        }
                        self.pop_until_tag(exception);
                        break;
                    }

                    if entry_element.is_special()
                        && !entry_element.is_one_of_html_elements([
                            tag_names::address,
                            tag_names::div,
                            tag_names::p,
                        ])
                    {
                        break;
                    }
                }

                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                self.insert_html_element(tag);
                self.proceed()
            }

            // A start tag whose tag name is "plaintext"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::plaintext == &tag.name =>
            {
                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                self.insert_html_element(tag);
                ControlFlow::Continue(HTMLParserState::SwitchTo(
                    State::PLAINTEXT,
                ))
            }

            // A start tag whose tag name is "button"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::button == &tag.name =>
            {
                if self.stack().has_element_in_scope(
                    tag_names::button,
                    Scope::Default,
                ) {
                    self.report_misnested("bouton dans un bouton");
                    self.generate_implied_end_tags();
                    self.pop_until_tag(tag_names::button);
                }
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(tag);
                self.set_frameset_not_ok();
                self.proceed()
            }

            // Les balises de fin des conteneurs de bloc.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::address,
                        tag_names::article,
                        tag_names::aside,
                        tag_names::blockquote,
                        tag_names::button,
                        tag_names::center,
                        tag_names::details,
                        tag_names::dialog,
                        tag_names::dir,
                        tag_names::div,
                        tag_names::dl,
                        tag_names::fieldset,
                        tag_names::figcaption,
                        tag_names::figure,
                        tag_names::footer,
                        tag_names::header,
                        tag_names::hgroup,
                        tag_names::listing,
                        tag_names::main,
                        tag_names::menu,
                        tag_names::nav,
                        tag_names::ol,
                        tag_names::pre,
                        tag_names::section,
                        tag_names::summary,
                        tag_names::ul,
                    ]) =>
            {
                let tag_name: tag_names = tag
                    .name
                    .parse()
                    .expect("Un nom de balise de bloc");

                if !self
                    .stack()
                    .has_element_in_scope(tag_name, Scope::Default)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }

                self.generate_implied_end_tags();
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_name)
                }) {
                    self.report_misnested(format!(
                        "balise {tag_name} mal imbriquée"
                    ));
                }
                self.pop_until_tag(tag_name);
                self.proceed()
            }

            // An end tag whose tag name is "form"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::form == &tag.name =>
            {
                let has_template = self
                    .stack()
                    .has_element_with_tag_name(tag_names::template);

                if !has_template {
                    let node = self.form_element_pointer().cloned();
                    self.set_form_element_pointer(None);

                    let Some(node) = node else {
                        self.parse_error(&token);
                        return self.proceed();
                    };

                    if !self
                        .stack()
                        .has_this_element_in_scope(&node, Scope::Default)
                    {
                        self.parse_error(&token);
                        return self.proceed();
                    }

                    self.generate_implied_end_tags();
                    if !self
                        .current_node()
                        .is_some_and(|current| Rc::ptr_eq(current, &node))
                    {
                        self.report_misnested(
                            "balise form mal imbriquée",
                        );
                    }
                    self.pop_until_tag(tag_names::form);
                } else {
                    if !self.stack().has_element_in_scope(
                        tag_names::form,
                        Scope::Default,
                    ) {
                        self.parse_error(&token);
                        return self.proceed();
                    }
                    self.generate_implied_end_tags();
                    if !self.current_node().is_some_and(|node| {
                        node.is_html_element(tag_names::form)
                    }) {
                        self.report_misnested(
                            "balise form mal imbriquée",
                        );
                    }
                    self.pop_until_tag(tag_names::form);
                }
                self.proceed()
            }

            // An end tag whose tag name is "p"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::p == &tag.name =>
            {
                if !self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.parse_error(&token);
                    let p_token =
                        HTMLTagToken::start().with_name(tag_names::p);
                    self.insert_html_element(&p_token);
                }
                self.close_p_element();
                self.proceed()
            }

            // An end tag whose tag name is "li"
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::li == &tag.name =>
            {
                if !self
                    .stack()
                    .has_element_in_scope(tag_names::li, Scope::ListItem)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.generate_implied_end_tags_except_for(tag_names::li);
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::li)
                }) {
                    self.report_misnested("élément li mal imbriqué");
                }
                self.pop_until_tag(tag_names::li);
                self.proceed()
            }

            // dd, dt en balise de fin.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::dd,
                        tag_names::dt,
                    ]) =>
            {
                let tag_name: tag_names =
                    tag.name.parse().expect("dd ou dt");

                if !self
                    .stack()
                    .has_element_in_scope(tag_name, Scope::Default)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.generate_implied_end_tags_except_for(tag_name);
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_name)
                }) {
                    self.report_misnested(
                        "élément dd/dt mal imbriqué",
                    );
                }
                self.pop_until_tag(tag_name);
                self.proceed()
            }

            // h1 à h6 en balise de fin.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of(HEADING_TAGS) =>
            {
                if !self.stack().has_one_of_elements_in_scope(
                    HEADING_TAGS,
                    Scope::Default,
                ) {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.generate_implied_end_tags();
                if !self.current_node().is_some_and(|node| {
                    tag.name
                        .parse::<tag_names>()
                        .is_ok_and(|t| node.is_html_element(t))
                }) {
                    self.report_misnested("titre mal imbriqué");
                }
                self.pop_until_one_of(HEADING_TAGS);
                self.proceed()
            }

            // A start tag whose tag name is "a"
            //
            // S'il existe un élément `a` dans la liste des éléments de
            // mise en forme actifs après le dernier marqueur : erreur
            // d'analyse, exécuter l'algorithme d'adoption puis retirer
            // l'élément de la liste et de la pile.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::a == &tag.name =>
            {
                if let Some(element) =
                    self.last_formatting_element_before_marker("a")
                {
                    self.report_misnested(
                        "balise a dans une balise a",
                    );
                    self.run_adoption_agency_algorithm(tag);
                    self.remove_from_list_and_stack(&element);
                }

                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(tag);
                self.push_onto_list_of_active_formatting_elements(
                    element,
                );
                self.proceed()
            }

            // b, big, code, em, font, i, s, small, strike, strong, tt, u
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag
                        .name
                        .as_str()
                        .is_one_of(FORMATTING_START_TAGS) =>
            {
                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(tag);
                self.push_onto_list_of_active_formatting_elements(
                    element,
                );
                self.proceed()
            }

            // A start tag whose tag name is "nobr"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::nobr == &tag.name =>
            {
                self.reconstruct_active_formatting_elements();
                if self.stack().has_element_in_scope(
                    tag_names::nobr,
                    Scope::Default,
                ) {
                    self.report_misnested("nobr dans un nobr");
                    self.run_adoption_agency_algorithm(tag);
                    self.reconstruct_active_formatting_elements();
                }
                let element = self.insert_html_element(tag);
                self.push_onto_list_of_active_formatting_elements(
                    element,
                );
                self.proceed()
            }

            // Les balises de fin de mise en forme : algorithme
            // d'adoption.
            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag
                        .name
                        .as_str()
                        .is_one_of(tag_names::FORMATTING_ELEMENTS) =>
            {
                self.run_adoption_agency_algorithm(tag);
                self.proceed()
            }

            // applet, marquee, object
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::applet,
                        tag_names::marquee,
                        tag_names::object,
                    ]) =>
            {
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(tag);
                self.insert_marker_at_end_of_list();
                self.set_frameset_not_ok();
                self.proceed()
            }

            | HTMLToken::Tag(ref tag)
                if tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::applet,
                        tag_names::marquee,
                        tag_names::object,
                    ]) =>
            {
                let tag_name: tag_names = tag
                    .name
                    .parse()
                    .expect("applet, marquee ou object");

                if !self
                    .stack()
                    .has_element_in_scope(tag_name, Scope::Default)
                {
                    self.parse_error(&token);
                    return self.proceed();
                }
                self.generate_implied_end_tags();
                if !self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_name)
                }) {
                    self.report_misnested(format!(
                        "balise {tag_name} mal imbriquée"
                    ));
                }
                self.pop_until_tag(tag_name);
                self.clear_list_up_to_the_last_marker();
                self.proceed()
            }

            // A start tag whose tag name is "table"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::table == &tag.name =>
            {
                if self.quirks_mode() != QuirksMode::Yes
                    && self
                        .stack()
                        .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                self.insert_html_element(tag);
                self.set_frameset_not_ok();
                self.insertion_mode.switch_to(InsertionMode::InTable);
                self.proceed()
            }

            // An end tag whose tag name is "br"
            //
            // Erreur d'analyse : traitée comme une balise de début br,
            // sans attributs.
            | HTMLToken::Tag(ref tag)
                if tag.is_end && tag_names::br == &tag.name =>
            {
                self.parse_error(&token);
                self.reconstruct_active_formatting_elements();
                let br_token =
                    HTMLTagToken::start().with_name(tag_names::br);
                self.insert_html_element(&br_token);
                self.pop_element();
                self.set_frameset_not_ok();
                self.proceed()
            }

            // area, br, embed, img, keygen, wbr
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::area,
                        tag_names::br,
                        tag_names::embed,
                        tag_names::img,
                        tag_names::keygen,
                        tag_names::wbr,
                    ]) =>
            {
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(tag);
                self.pop_element();
                tag.set_acknowledge_self_closing_flag();
                self.set_frameset_not_ok();
                self.proceed()
            }

            // A start tag whose tag name is "input"
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end && tag_names::input == &tag.name =>
            {
                self.reconstruct_active_formatting_elements();
                let is_hidden = tag
                    .attribute_value("type")
                    .is_some_and(|value| {
                        value.eq_ignore_ascii_case("hidden")
                    });
                self.insert_html_element(tag);
                self.pop_element();
                tag.set_acknowledge_self_closing_flag();
                if !is_hidden {
                    self.set_frameset_not_ok();
                }
                self.proceed()
            }

            // param, source, track
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::param,
                        tag_names::source,
                        tag_names::track,
                    ]) =>
            {
                self.insert_html_element(tag);
                self.pop_element();
                tag.set_acknowledge_self_closing_flag();
                self.proceed()
            }

            // A start tag whose tag name is "hr"
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end && tag_names::hr == &tag.name =>
            {
                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                self.insert_html_element(tag);
                self.pop_element();
                tag.set_acknowledge_self_closing_flag();
                self.set_frameset_not_ok();
                self.proceed()
            }

            // A start tag whose tag name is "image"
            //
            // Erreur d'analyse : traitée comme une balise img.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::image == &tag.name =>
            {
                self.parse_error(&token);
                let mut img = tag.to_owned();
                img.name = tag_names::img.to_string();
                self.handle_in_body_insertion_mode(HTMLToken::Tag(img))
            }

            // A start tag whose tag name is "textarea"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::textarea == &tag.name =>
            {
                self.insert_html_element(tag);
                self.set_ignore_next_lf();
                self.set_frameset_not_ok();
                self.original_insertion_mode
                    .switch_to(self.insertion_mode);
                self.insertion_mode.switch_to(InsertionMode::Text);
                ControlFlow::Continue(HTMLParserState::SwitchTo(
                    State::RCDATA,
                ))
            }

            // A start tag whose tag name is "xmp"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::xmp == &tag.name =>
            {
                if self
                    .stack()
                    .has_element_in_scope(tag_names::p, Scope::Button)
                {
                    self.close_p_element();
                }
                self.reconstruct_active_formatting_elements();
                self.set_frameset_not_ok();
                self.parse_generic_element(tag, State::RAWTEXT)
            }

            // A start tag whose tag name is "iframe"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::iframe == &tag.name =>
            {
                self.set_frameset_not_ok();
                self.parse_generic_element(tag, State::RAWTEXT)
            }

            // noembed ; noscript si le scripting est actif.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && (tag_names::noembed == &tag.name
                        || (tag_names::noscript == &tag.name
                            && self.is_scripting_enabled())) =>
            {
                self.parse_generic_element(tag, State::RAWTEXT)
            }

            // A start tag whose tag name is "select"
            | HTMLToken::Tag(ref tag)
                if !tag.is_end && tag_names::select == &tag.name =>
            {
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(tag);
                self.set_frameset_not_ok();

                let mode = match self.insertion_mode {
                    | InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => {
                        InsertionMode::InSelectInTable
                    }
                    | _ => InsertionMode::InSelect,
                };
                self.insertion_mode.switch_to(mode);
                self.proceed()
            }

            // optgroup, option
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::optgroup,
                        tag_names::option,
                    ]) =>
            {
                if self.current_node().is_some_and(|node| {
                    node.is_html_element(tag_names::option)
                }) {
                    self.pop_element();
                }
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(tag);
                self.proceed()
            }

            // rb, rtc
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::rb,
                        tag_names::rtc,
                    ]) =>
            {
                if self.stack().has_element_in_scope(
                    tag_names::ruby,
                    Scope::Default,
                ) {
                    self.generate_implied_end_tags();
                    if !self.current_node().is_some_and(|node| {
                        node.is_html_element(tag_names::ruby)
                    }) {
                        self.report_misnested(
                            "annotation ruby mal imbriquée",
                        );
                    }
                }
                self.insert_html_element(tag);
                self.proceed()
            }

            // rp, rt
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::rp,
                        tag_names::rt,
                    ]) =>
            {
                if self.stack().has_element_in_scope(
                    tag_names::ruby,
                    Scope::Default,
                ) {
                    self.generate_implied_end_tags_except_for(
                        tag_names::rtc,
                    );
                    if !self.current_node().is_some_and(|node| {
                        node.is_one_of_html_elements([
                            tag_names::ruby,
                            tag_names::rtc,
                        ])
                    }) {
                        self.report_misnested(
                            "annotation ruby mal imbriquée",
                        );
                    }
                }
                self.insert_html_element(tag);
                self.proceed()
            }

            // A start tag whose tag name is "math"
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end && tag_names::math == &tag.name =>
            {
                self.reconstruct_active_formatting_elements();
                Self::adjust_mathml_attributes(tag);
                Self::adjust_foreign_attributes(tag);
                self.insert_foreign_element(tag, Namespace::MathML);
                if tag.self_closing_flag {
                    tag.set_acknowledge_self_closing_flag();
                    self.pop_element();
                }
                self.proceed()
            }

            // A start tag whose tag name is "svg"
            | HTMLToken::Tag(ref mut tag)
                if !tag.is_end && tag_names::svg == &tag.name =>
            {
                self.reconstruct_active_formatting_elements();
                Self::adjust_svg_attributes(tag);
                Self::adjust_foreign_attributes(tag);
                self.insert_foreign_element(tag, Namespace::SVG);
                if tag.self_closing_flag {
                    tag.set_acknowledge_self_closing_flag();
                    self.pop_element();
                }
                self.proceed()
            }

            // caption, col, colgroup, frame, head, tbody, td, tfoot, th,
            // thead, tr : erreur d'analyse, ignorer le jeton.
            | HTMLToken::Tag(ref tag)
                if !tag.is_end
                    && tag.name.as_str().is_one_of([
                        tag_names::caption,
                        tag_names::col,
                        tag_names::colgroup,
                        tag_names::frame,
                        tag_names::head,
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

            // Any other start tag
            | HTMLToken::Tag(ref tag) if !tag.is_end => {
                self.reconstruct_active_formatting_elements();
                self.insert_html_element(tag);
                self.proceed()
            }

            // Any other end tag
            | HTMLToken::Tag(ref tag) => {
                self.handle_any_other_end_tag_in_body(tag);
                self.proceed()
            }
        }
    }

    /// « Any other end tag » du mode "in body" : remonter la pile depuis
    /// le nœud actuel ; un nœud du même nom est fermé (avec balises de
    /// fin implicites) ; un élément « special » rencontré avant arrête
    /// tout avec une erreur d'analyse.
    pub(crate) fn handle_any_other_end_tag_in_body(
        &mut self,
        tag: &HTMLTagToken,
    ) {
        let entries: Vec<_> = self
            .stack()
            .iter()
            .rev()
            .map(|entry| entry.element.clone())
            .collect();

        for node in entries {
            if node.is_in_html_namespace()
                && node.local_name == tag.name
            {
                self.generate_implied_end_tags_except_for_name(
                    &tag.name,
                );
                if !self
                    .current_node()
                    .is_some_and(|current| Rc::ptr_eq(current, &node))
                {
                    self.report_misnested(format!(
                        "balise {} mal imbriquée",
                        tag.name
                    ));
                }
                self.pop_until_element_with_name(&tag.name);
                return;
            }

            if node.is_special() {
                self.report(
                    DiagnosticKind::UnmatchedEndTag,
                    format!("balise de fin inattendue : {}", tag.name),
                );
                return;
            }
        }
    }

    /// Les éléments que la fin d'entrée peut laisser ouverts sans
    /// erreur : dd, dt, li, optgroup, option, p, rb, rp, rt, rtc, tbody,
    /// td, tfoot, th, thead, tr, body, html.
    pub(crate) fn report_unclosed_elements(&self) {
        for entry in self.stack().iter() {
            if !entry.element.is_one_of_html_elements([
                tag_names::dd,
                tag_names::dt,
                tag_names::li,
                tag_names::optgroup,
                tag_names::option,
                tag_names::p,
                tag_names::rb,
                tag_names::rp,
                tag_names::rt,
                tag_names::rtc,
                tag_names::tbody,
                tag_names::td,
                tag_names::tfoot,
                tag_names::th,
                tag_names::thead,
                tag_names::tr,
                tag_names::body,
                tag_names::html,
            ]) && !entry.phantom
            {
                self.report_bad_content(format!(
                    "élément resté ouvert : {}",
                    entry.element.local_name
                ));
            }
        }
    }
}
