/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::rc::Rc;

use super::element::ElementRef;

// --------- //
// Structure //
// --------- //

/// La liste des éléments de mise en forme actifs : les balises de mise en
/// forme ouvertes qui pourraient devoir être rouvertes après une
/// fermeture qui brise leur portée. Les marqueurs bornent la
/// reconstruction (insérés à l'ouverture d'un applet, object, marquee,
/// template, td, th ou caption).
#[derive(Debug)]
#[derive(Default)]
pub(crate) struct ListOfActiveFormattingElements {
    entries: Vec<Entry>,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
pub(crate) enum Entry {
    Marker,
    Element(ElementRef),
}

// -------------- //
// Implémentation //
// -------------- //

impl ListOfActiveFormattingElements {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub(crate) fn insert_marker_at_end(&mut self) {
        self.entries.push(Entry::Marker);
    }

    /// Ajoute un élément en fin de liste, en appliquant la clause de
    /// l'arche de Noé : s'il existe déjà trois entrées de même nom, même
    /// espace de noms et mêmes attributs depuis le dernier marqueur, la
    /// plus ancienne est retirée.
    pub(crate) fn push(&mut self, element: ElementRef) {
        let mut identical = vec![];

        for (index, entry) in self.entries.iter().enumerate().rev() {
            match entry {
                | Entry::Marker => break,
                | Entry::Element(other) => {
                    if other.local_name == element.local_name
                        && other.namespace == element.namespace
                        && other.attributes == element.attributes
                    {
                        identical.push(index);
                    }
                }
            }
        }

        if identical.len() >= 3 {
            // `identical` est en ordre décroissant : le dernier est le
            // plus ancien.
            self.entries.remove(*identical.last().expect("une entrée"));
        }

        self.entries.push(Entry::Element(element));
    }

    pub(crate) fn clear_up_to_the_last_marker(&mut self) {
        while let Some(entry) = self.entries.pop() {
            if entry.is_marker() {
                break;
            }
        }
    }

    pub(crate) fn contains(&self, element: &ElementRef) -> bool {
        self.position_of(element).is_some()
    }

    pub(crate) fn position_of(
        &self,
        element: &ElementRef,
    ) -> Option<usize> {
        self.entries.iter().position(|entry| {
            matches!(entry, Entry::Element(other) if Rc::ptr_eq(other, element))
        })
    }

    pub(crate) fn remove_element(&mut self, element: &ElementRef) {
        if let Some(index) = self.position_of(element) {
            self.entries.remove(index);
        }
    }

    pub(crate) fn replace(&mut self, index: usize, element: ElementRef) {
        self.entries[index] = Entry::Element(element);
    }

    /// Insère un élément à cette position (la position du signet de
    /// l'algorithme d'adoption).
    pub(crate) fn insert(&mut self, index: usize, element: ElementRef) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, Entry::Element(element));
    }

    /// Le dernier élément de ce nom situé après le dernier marqueur.
    pub(crate) fn last_element_before_marker(
        &self,
        tag_name: &str,
    ) -> Option<(usize, ElementRef)> {
        for (index, entry) in self.entries.iter().enumerate().rev() {
            match entry {
                | Entry::Marker => break,
                | Entry::Element(element) => {
                    if element.local_name == tag_name {
                        return Some((index, element.to_owned()));
                    }
                }
            }
        }
        None
    }
}

impl Entry {
    pub(crate) const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }

    pub(crate) const fn element(&self) -> Option<&ElementRef> {
        match self {
            | Entry::Marker => None,
            | Entry::Element(element) => Some(element),
        }
    }
}
