/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use infra::primitive::codepoint::CodePoint;
use parser::signal::{Attribute, DoctypeData};

// --------- //
// Structure //
// --------- //

/// Les jetons `start-tag` et `end-tag` ont :
///   - un nom, un nom de balise ;
///   - un drapeau permettant de savoir s'il s'agit d'une balise
///     auto-fermante ;
///   - une liste d'attributs : chacun d'entre eux ayant un nom et une
///     valeur.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct HTMLTagToken {
    pub name: String,
    pub self_closing_flag: bool,
    pub self_closing_flag_acknowledge: bool,
    pub attributes: Vec<Attribute>,
    pub is_end: bool,
}

/// Lorsqu'un jeton DOCTYPE est créé, son nom, son identificateur public
/// et son identificateur système doivent être marqués comme
/// [manquants](None) (ce qui est un état distinct de la chaîne de
/// caractères vide), et le drapeau `force-quirks` doit être désactivé.
#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
#[derive(PartialEq, Eq)]
pub struct HTMLDoctypeToken {
    pub name: Option<String>,
    pub public_identifier: Option<String>,
    pub system_identifier: Option<String>,
    pub force_quirks_flag: bool,
}

// ----------- //
// Énumération //
// ----------- //

/// La sortie de l'étape de tokenisation est une série de zéro ou plus des
/// jetons suivants : DOCTYPE, balise de début, balise de fin,
/// commentaire, caractère, fin de fichier.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum HTMLToken {
    DOCTYPE(HTMLDoctypeToken),
    Tag(HTMLTagToken),
    Comment(String),
    Character(CodePoint),
    EOF,
}

#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum QuirksMode {
    No,
    Limited,
    Yes,
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLToken {
    pub fn new_start_tag() -> Self {
        Self::Tag(HTMLTagToken::start())
    }

    pub fn new_end_tag() -> Self {
        Self::Tag(HTMLTagToken::end())
    }

    pub const fn new_doctype() -> Self {
        Self::DOCTYPE(HTMLDoctypeToken {
            name: None,
            public_identifier: None,
            system_identifier: None,
            force_quirks_flag: false,
        })
    }

    pub fn new_comment(comment: impl ToString) -> Self {
        Self::Comment(comment.to_string())
    }

    /// Ajoute un caractère au nom du jeton `DOCTYPE`, au nom du jeton
    /// `tag` ou au texte d'un jeton `comment`.
    pub fn append_character(&mut self, ch: CodePoint) {
        match self {
            | Self::DOCTYPE(HTMLDoctypeToken {
                name: Some(name), ..
            }) => name.push(ch),
            | Self::Tag(HTMLTagToken { name, .. }) => name.push(ch),
            | Self::Comment(comment) => comment.push(ch),
            | _ => {}
        }
    }

    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    pub const fn is_character(&self) -> bool {
        matches!(self, Self::Character(_))
    }

    pub const fn is_ascii_whitespace(&self) -> bool {
        if let Self::Character(ch) = self {
            matches!(ch, '\t' | '\n' | '\x0C' | '\r' | ' ')
        } else {
            false
        }
    }

    pub const fn is_start_tag(&self) -> bool {
        matches!(self, Self::Tag(HTMLTagToken { is_end: false, .. }))
    }

    pub const fn is_end_tag(&self) -> bool {
        matches!(self, Self::Tag(HTMLTagToken { is_end: true, .. }))
    }

    pub const fn as_tag(&self) -> &HTMLTagToken {
        if let Self::Tag(tag) = self {
            return tag;
        }
        panic!("N'est pas un jeton de balise.");
    }

    pub fn as_tag_mut(&mut self) -> &mut HTMLTagToken {
        if let Self::Tag(tag) = self {
            return tag;
        }
        panic!("N'est pas un jeton de balise.");
    }
}

impl HTMLTagToken {
    pub const fn start() -> Self {
        Self {
            name: String::new(),
            self_closing_flag: false,
            self_closing_flag_acknowledge: false,
            attributes: vec![],
            is_end: false,
        }
    }

    pub const fn end() -> Self {
        Self {
            name: String::new(),
            self_closing_flag: false,
            self_closing_flag_acknowledge: false,
            attributes: vec![],
            is_end: true,
        }
    }

    pub fn with_name(mut self, name: impl ToString) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_attributes(
        mut self,
        attributes: impl IntoIterator<Item = impl Into<Attribute>>,
    ) -> Self {
        self.attributes =
            attributes.into_iter().map(|attr| attr.into()).collect();
        self
    }

    pub fn with_self_closing_flag(mut self) -> Self {
        self.self_closing_flag = true;
        self
    }

    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Démarre un nouvel attribut, vide, en fin de liste.
    pub fn start_new_attribute(&mut self) {
        self.attributes.push(Attribute::default());
    }

    /// attr-name="attr-value" : ajoute un caractère au nom du dernier
    /// attribut trouvé.
    pub fn append_character_to_attribute_name(&mut self, ch: CodePoint) {
        if let Some(attribute) = self.attributes.last_mut() {
            attribute.name.push(ch);
        }
    }

    /// attr-name="attr-value" : ajoute un caractère à la valeur du
    /// dernier attribut trouvé.
    pub fn append_character_to_attribute_value(&mut self, ch: CodePoint) {
        if let Some(attribute) = self.attributes.last_mut() {
            attribute.value.push(ch);
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute.name == name)
    }

    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    pub fn set_self_closing_flag(&mut self, to: bool) {
        self.self_closing_flag = to;
    }

    pub fn set_acknowledge_self_closing_flag(&mut self) {
        if self.self_closing_flag {
            self.self_closing_flag_acknowledge = true;
        }
    }

    /// Résout les attributs dupliqués : la première occurrence est
    /// conservée, les occurrences suivantes sont retirées. Renvoie le
    /// nombre de doublons retirés.
    pub fn deduplicate_attributes(&mut self) -> usize {
        let mut seen: Vec<String> = vec![];
        let before = self.attributes.len();
        self.attributes.retain(|attribute| {
            if seen.iter().any(|name| *name == attribute.name) {
                false
            } else {
                seen.push(attribute.name.to_owned());
                true
            }
        });
        before - self.attributes.len()
    }
}

// ------------- //
// Jeton DOCTYPE //
// ------------- //

impl HTMLDoctypeToken {
    pub fn is_html_name(&self) -> bool {
        matches!(self.name.as_deref(), Some(name) if name.eq_ignore_ascii_case("html"))
    }

    pub const fn is_public_identifier_missing(&self) -> bool {
        self.public_identifier.is_none()
    }

    pub const fn is_system_identifier_missing(&self) -> bool {
        self.system_identifier.is_none()
    }

    pub fn is_about_legacy_compat(&self) -> bool {
        matches!(
            self.system_identifier.as_deref(),
            Some("about:legacy-compat")
        )
    }

    /// Le mode de rendu qu'impose ce DOCTYPE, d'après les tableaux
    /// d'identifiants de la spécification HTML.
    pub fn quirks_mode(&self) -> QuirksMode {
        fn is_eq(maybe_id: &Option<String>, xid: &str) -> bool {
            matches!(maybe_id, Some(id) if id.eq_ignore_ascii_case(xid))
        }

        fn starts_with(maybe_id: &Option<String>, xid: &str) -> bool {
            matches!(
                maybe_id,
                Some(id) if id
                    .to_ascii_lowercase()
                    .starts_with(&xid.to_ascii_lowercase())
            )
        }

        if self.force_quirks_flag || !self.is_html_name() {
            return QuirksMode::Yes;
        }

        if DOCTYPE::PUBLIC_ID_DEFINED_RULE_1
            .iter()
            .any(|id| is_eq(&self.public_identifier, id))
            || DOCTYPE::SYSTEM_ID_DEFINED_RULE_1
                .iter()
                .any(|id| is_eq(&self.system_identifier, id))
            || DOCTYPE::PUBLIC_ID_STARTS_WITH_RULE_1
                .iter()
                .any(|id| starts_with(&self.public_identifier, id))
            || (self.is_system_identifier_missing()
                && DOCTYPE::PUBLIC_ID_STARTS_WITH_QUIRKS_WHEN_NO_SYSTEM
                    .iter()
                    .any(|id| starts_with(&self.public_identifier, id)))
        {
            return QuirksMode::Yes;
        }

        if DOCTYPE::PUBLIC_ID_STARTS_WITH_RULE_2
            .iter()
            .any(|id| starts_with(&self.public_identifier, id))
            || (!self.is_system_identifier_missing()
                && DOCTYPE::PUBLIC_ID_STARTS_WITH_QUIRKS_WHEN_NO_SYSTEM
                    .iter()
                    .any(|id| starts_with(&self.public_identifier, id)))
        {
            return QuirksMode::Limited;
        }

        QuirksMode::No
    }
}

impl From<&HTMLDoctypeToken> for DoctypeData {
    fn from(token: &HTMLDoctypeToken) -> Self {
        Self {
            name: token.name.to_owned(),
            public_identifier: token.public_identifier.to_owned(),
            system_identifier: token.system_identifier.to_owned(),
            force_quirks: token.force_quirks_flag,
        }
    }
}

#[allow(non_snake_case)]
mod DOCTYPE {
    pub(crate) const PUBLIC_ID_DEFINED_RULE_1: [&str; 3] = [
        "-//W3O//DTD W3 HTML Strict 3.0//EN//",
        "-/W3C/DTD HTML 4.0 Transitional/EN",
        "HTML",
    ];

    pub(crate) const SYSTEM_ID_DEFINED_RULE_1: [&str; 1] =
        ["http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd"];

    pub(crate) const PUBLIC_ID_STARTS_WITH_RULE_1: [&str; 55] = [
        "+//Silmaril//dtd html Pro v0r11 19970101//",
        "-//AS//DTD HTML 3.0 asWedit + extensions//",
        "-//AdvaSoft Ltd//DTD HTML 3.0 asWedit + extensions//",
        "-//IETF//DTD HTML 2.0 Level 1//",
        "-//IETF//DTD HTML 2.0 Level 2//",
        "-//IETF//DTD HTML 2.0 Strict Level 1//",
        "-//IETF//DTD HTML 2.0 Strict Level 2//",
        "-//IETF//DTD HTML 2.0 Strict//",
        "-//IETF//DTD HTML 2.0//",
        "-//IETF//DTD HTML 2.1E//",
        "-//IETF//DTD HTML 3.0//",
        "-//IETF//DTD HTML 3.2 Final//",
        "-//IETF//DTD HTML 3.2//",
        "-//IETF//DTD HTML 3//",
        "-//IETF//DTD HTML Level 0//",
        "-//IETF//DTD HTML Level 1//",
        "-//IETF//DTD HTML Level 2//",
        "-//IETF//DTD HTML Level 3//",
        "-//IETF//DTD HTML Strict Level 0//",
        "-//IETF//DTD HTML Strict Level 1//",
        "-//IETF//DTD HTML Strict Level 2//",
        "-//IETF//DTD HTML Strict Level 3//",
        "-//IETF//DTD HTML Strict//",
        "-//IETF//DTD HTML//",
        "-//Metrius//DTD Metrius Presentational//",
        "-//Microsoft//DTD Internet Explorer 2.0 HTML Strict//",
        "-//Microsoft//DTD Internet Explorer 2.0 HTML//",
        "-//Microsoft//DTD Internet Explorer 2.0 Tables//",
        "-//Microsoft//DTD Internet Explorer 3.0 HTML Strict//",
        "-//Microsoft//DTD Internet Explorer 3.0 HTML//",
        "-//Microsoft//DTD Internet Explorer 3.0 Tables//",
        "-//Netscape Comm. Corp.//DTD HTML//",
        "-//Netscape Comm. Corp.//DTD Strict HTML//",
        "-//O'Reilly and Associates//DTD HTML 2.0//",
        "-//O'Reilly and Associates//DTD HTML Extended 1.0//",
        "-//O'Reilly and Associates//DTD HTML Extended Relaxed 1.0//",
        "-//SQ//DTD HTML 2.0 HoTMetaL + extensions//",
        "-//SoftQuad Software//DTD HoTMetaL PRO 6.0::19990601::extensions to HTML 4.0//",
        "-//SoftQuad//DTD HoTMetaL PRO 4.0::19971010::extensions to HTML 4.0//",
        "-//Spyglass//DTD HTML 2.0 Extended//",
        "-//Sun Microsystems Corp.//DTD HotJava HTML//",
        "-//Sun Microsystems Corp.//DTD HotJava Strict HTML//",
        "-//W3C//DTD HTML 3 1995-03-24//",
        "-//W3C//DTD HTML 3.2 Draft//",
        "-//W3C//DTD HTML 3.2 Final//",
        "-//W3C//DTD HTML 3.2//",
        "-//W3C//DTD HTML 3.2S Draft//",
        "-//W3C//DTD HTML 4.0 Frameset//",
        "-//W3C//DTD HTML 4.0 Transitional//",
        "-//W3C//DTD HTML Experimental 19960712//",
        "-//W3C//DTD HTML Experimental 970421//",
        "-//W3C//DTD W3 HTML//",
        "-//W3O//DTD W3 HTML 3.0//",
        "-//WebTechs//DTD Mozilla HTML 2.0//",
        "-//WebTechs//DTD Mozilla HTML//",
    ];

    pub(crate) const PUBLIC_ID_STARTS_WITH_RULE_2: [&str; 2] = [
        "-//W3C//DTD XHTML 1.0 Frameset//",
        "-//W3C//DTD XHTML 1.0 Transitional//",
    ];

    pub(crate) const PUBLIC_ID_STARTS_WITH_QUIRKS_WHEN_NO_SYSTEM:
        [&str; 2] = [
        "-//W3C//DTD HTML 4.01 Frameset//",
        "-//W3C//DTD HTML 4.01 Transitional//",
    ];
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicate_attributes_keeps_first() {
        let mut tag = HTMLTagToken::start()
            .with_name("div")
            .with_attributes([("id", "a"), ("id", "b"), ("class", "c")]);

        assert_eq!(tag.deduplicate_attributes(), 1);
        assert_eq!(tag.attribute_value("id"), Some("a"));
        assert_eq!(tag.attribute_value("class"), Some("c"));
    }

    #[test]
    fn test_quirks_mode() {
        let doctype = HTMLDoctypeToken {
            name: Some("html".into()),
            ..Default::default()
        };
        assert_eq!(doctype.quirks_mode(), QuirksMode::No);

        let doctype = HTMLDoctypeToken {
            name: Some("html".into()),
            force_quirks_flag: true,
            ..Default::default()
        };
        assert_eq!(doctype.quirks_mode(), QuirksMode::Yes);

        let doctype = HTMLDoctypeToken {
            name: Some("svg".into()),
            ..Default::default()
        };
        assert_eq!(doctype.quirks_mode(), QuirksMode::Yes);
    }
}
