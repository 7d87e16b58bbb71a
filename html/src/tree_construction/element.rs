/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::rc::Rc;

use infra::namespace::Namespace;
use parser::signal::{Attribute, QName};

use crate::{
    elements::{tag_names, IsOneOfTagsInterface},
    tokenization::HTMLTagToken,
};

// ---- //
// Type //
// ---- //

/// Les éléments ouverts sont partagés entre la pile, la liste des
/// éléments de mise en forme actifs et les pointeurs d'éléments ;
/// l'identité d'un élément est l'identité de son allocation.
pub(crate) type ElementRef = Rc<Element>;

// --------- //
// Structure //
// --------- //

/// Un élément ouvert : ce que la construction de l'arbre retient d'un
/// jeton de balise de début, sans matérialiser d'arbre.
#[derive(Debug)]
pub(crate) struct Element {
    pub local_name: String,
    pub namespace: Namespace,
    pub attributes: Vec<Attribute>,
}

// -------------- //
// Implémentation //
// -------------- //

impl Element {
    pub(crate) fn new(
        token: &HTMLTagToken,
        namespace: Namespace,
    ) -> ElementRef {
        Rc::new(Self {
            local_name: token.name.to_owned(),
            namespace,
            attributes: token.attributes.to_owned(),
        })
    }

    /// Un clone : même nom, même espace de noms, mêmes attributs, mais
    /// une identité neuve. L'algorithme d'adoption s'en sert pour
    /// remplacer des entrées de la pile et de la liste.
    pub(crate) fn duplicate(element: &Element) -> ElementRef {
        Rc::new(Self {
            local_name: element.local_name.to_owned(),
            namespace: element.namespace,
            attributes: element.attributes.to_owned(),
        })
    }

    pub(crate) fn qname(&self) -> QName {
        QName::new(&self.local_name).with_namespace(self.namespace.uri())
    }

    pub(crate) const fn is_in_html_namespace(&self) -> bool {
        matches!(self.namespace, Namespace::HTML)
    }

    /// Le nom de balise HTML connu, le cas échéant.
    pub(crate) fn tag(&self) -> Option<tag_names> {
        self.local_name.parse().ok()
    }

    pub(crate) fn is_html_element(&self, tag_name: tag_names) -> bool {
        self.is_in_html_namespace() && tag_name == &self.local_name
    }

    pub(crate) fn is_one_of_html_elements(
        &self,
        tag_names_list: impl IntoIterator<Item = tag_names>,
    ) -> bool {
        self.is_in_html_namespace()
            && self.local_name.as_str().is_one_of(tag_names_list)
    }

    /// La catégorie « special » de la spécification HTML, tous espaces de
    /// noms confondus.
    pub(crate) fn is_special(&self) -> bool {
        match self.namespace {
            | Namespace::HTML => {
                self.tag().is_some_and(|tag| tag.is_special())
            }
            | Namespace::MathML => self.local_name.as_str().is_one_of([
                tag_names::mi,
                tag_names::mo,
                tag_names::mn,
                tag_names::ms,
                tag_names::mtext,
                tag_names::annotationXml,
            ]),
            | Namespace::SVG => self.local_name.as_str().is_one_of([
                tag_names::foreignObject,
                tag_names::desc,
                tag_names::title,
            ]),
            | _ => false,
        }
    }

    pub(crate) fn is_formatting(&self) -> bool {
        self.is_in_html_namespace()
            && self
                .local_name
                .as_str()
                .is_one_of(tag_names::FORMATTING_ELEMENTS)
    }

    /// Un point d'intégration de texte MathML.
    pub(crate) fn is_mathml_text_integration_point(&self) -> bool {
        matches!(self.namespace, Namespace::MathML)
            && self.local_name.as_str().is_one_of([
                tag_names::mi,
                tag_names::mo,
                tag_names::mn,
                tag_names::ms,
                tag_names::mtext,
            ])
    }

    /// Un point d'intégration HTML : les éléments SVG foreignObject, desc
    /// et title, ainsi que annotation-xml dont l'attribut encoding vaut
    /// « text/html » ou « application/xhtml+xml ».
    pub(crate) fn is_html_text_integration_point(&self) -> bool {
        match self.namespace {
            | Namespace::SVG => self.local_name.as_str().is_one_of([
                tag_names::foreignObject,
                tag_names::desc,
                tag_names::title,
            ]),
            | Namespace::MathML => {
                tag_names::annotationXml == &self.local_name
                    && self.attributes.iter().any(|attribute| {
                        attribute.name == "encoding"
                            && (attribute
                                .value
                                .eq_ignore_ascii_case("text/html")
                                || attribute.value.eq_ignore_ascii_case(
                                    "application/xhtml+xml",
                                ))
                    })
            }
            | _ => false,
        }
    }
}
