/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::rc::Rc;

use infra::namespace::Namespace;

use super::element::{Element, ElementRef};
use crate::elements::{tag_names, IsOneOfTagsInterface};

// --------- //
// Structure //
// --------- //

#[derive(Debug)]
#[derive(Default)]
pub(crate) struct StackOfOpenElements {
    entries: Vec<StackEntry>,
}

/// Une entrée de la pile retient, en plus de l'élément, la destination de
/// ses signaux (la sortie directe, ou un tampon de retenue de table) et
/// si l'élément est fantôme (racine synthétique d'une analyse de
/// fragment, dont les signaux ne sont pas émis).
#[derive(Debug)]
pub(crate) struct StackEntry {
    pub element: ElementRef,
    pub destination: usize,
    pub owns_hold: bool,
    pub phantom: bool,
}

// ----------- //
// Énumération //
// ----------- //

/// Une portée est un prédicat sur la pile d'éléments ouverts,
/// paramétré par un ensemble d'éléments terminateurs : la recherche d'un
/// élément remonte la pile et s'arrête au premier terminateur.
#[derive(Debug)]
#[derive(Copy, Clone)]
pub(crate) enum Scope {
    Default,
    ListItem,
    Button,
    Table,
    Select,
}

// -------------- //
// Implémentation //
// -------------- //

impl StackOfOpenElements {
    /// Le nœud actuel est le nœud le plus bas de cette pile d'éléments
    /// ouverts.
    pub(crate) fn current_node(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&StackEntry> {
        self.entries.get(index)
    }

    pub(crate) fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = &StackEntry> + ExactSizeIterator
    {
        self.entries.iter()
    }

    pub(crate) fn put(&mut self, entry: StackEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }

    pub(crate) fn contains(&self, element: &ElementRef) -> bool {
        self.entries
            .iter()
            .any(|entry| Rc::ptr_eq(&entry.element, element))
    }

    pub(crate) fn position_of(
        &self,
        element: &ElementRef,
    ) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| Rc::ptr_eq(&entry.element, element))
    }

    pub(crate) fn remove(&mut self, index: usize) -> StackEntry {
        self.entries.remove(index)
    }

    /// Le dernier élément HTML de la pile portant ce nom de balise.
    pub(crate) fn last_with_tag_name(
        &self,
        tag_name: tag_names,
    ) -> Option<(usize, &StackEntry)> {
        self.entries
            .iter()
            .enumerate()
            .rfind(|(_, entry)| entry.element.is_html_element(tag_name))
    }

    pub(crate) fn has_element_with_tag_name(
        &self,
        tag_name: tag_names,
    ) -> bool {
        self.last_with_tag_name(tag_name).is_some()
    }

    /// La pile a-t-elle un élément HTML de ce nom dans la portée donnée ?
    pub(crate) fn has_element_in_scope(
        &self,
        tag_name: tag_names,
        scope: Scope,
    ) -> bool {
        self.has_one_of_elements_in_scope([tag_name], scope)
    }

    pub(crate) fn has_one_of_elements_in_scope(
        &self,
        tag_names_list: impl IntoIterator<Item = tag_names> + Copy,
        scope: Scope,
    ) -> bool {
        for entry in self.entries.iter().rev() {
            if entry.element.is_one_of_html_elements(tag_names_list) {
                return true;
            }
            if scope.is_terminator(&entry.element) {
                return false;
            }
        }
        false
    }

    /// Cet élément précis est-il dans la portée donnée ?
    pub(crate) fn has_this_element_in_scope(
        &self,
        element: &ElementRef,
        scope: Scope,
    ) -> bool {
        for entry in self.entries.iter().rev() {
            if Rc::ptr_eq(&entry.element, element) {
                return true;
            }
            if scope.is_terminator(&entry.element) {
                return false;
            }
        }
        false
    }
}

impl Scope {
    ///   - applet, caption, html, table, td, th, marquee, object,
    ///     template,
    ///   - MathML mi, mo, mn, ms, mtext, annotation-xml,
    ///   - SVG foreignObject, desc, title.
    fn is_default_terminator(element: &Element) -> bool {
        match element.namespace {
            | Namespace::HTML => element.local_name.as_str().is_one_of([
                tag_names::applet,
                tag_names::caption,
                tag_names::html,
                tag_names::table,
                tag_names::td,
                tag_names::th,
                tag_names::marquee,
                tag_names::object,
                tag_names::template,
            ]),
            | Namespace::MathML => {
                element.local_name.as_str().is_one_of([
                    tag_names::mi,
                    tag_names::mo,
                    tag_names::mn,
                    tag_names::ms,
                    tag_names::mtext,
                    tag_names::annotationXml,
                ])
            }
            | Namespace::SVG => element.local_name.as_str().is_one_of([
                tag_names::foreignObject,
                tag_names::desc,
                tag_names::title,
            ]),
            | _ => false,
        }
    }

    fn is_terminator(self, element: &Element) -> bool {
        match self {
            | Self::Default => Self::is_default_terminator(element),
            | Self::ListItem => {
                Self::is_default_terminator(element)
                    || element.is_one_of_html_elements([
                        tag_names::ol,
                        tag_names::ul,
                    ])
            }
            | Self::Button => {
                Self::is_default_terminator(element)
                    || element.is_html_element(tag_names::button)
            }
            | Self::Table => element.is_one_of_html_elements([
                tag_names::html,
                tag_names::table,
                tag_names::template,
            ]),
            // La portée `select` est inversée : tout élément est
            // terminateur, sauf optgroup et option.
            | Self::Select => !element
                .local_name
                .as_str()
                .is_one_of([tag_names::optgroup, tag_names::option]),
        }
    }
}
