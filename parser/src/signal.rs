/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;

// ---- //
// Type //
// ---- //

pub type AttributeName = String;
pub type AttributeValue = String;

// --------- //
// Structure //
// --------- //

/// Un nom qualifié : une paire (URI d'espace de noms, nom local), avec le
/// préfixe d'origine lorsque la source en portait un. Pour HTML l'espace
/// de noms est inféré par la construction de l'arbre ; pour XML il est
/// résolu depuis les liaisons de préfixes en portée.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct QName {
    pub namespace_uri: Option<String>,
    pub prefix: Option<String>,
    pub local_name: String,
}

/// Un attribut : l'ordre d'apparition dans la source est préservé ; les
/// doublons d'une même balise sont résolus en gardant la première
/// occurrence, les suivantes étant signalées.
#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
#[derive(PartialEq, Eq)]
pub struct Attribute {
    pub name: AttributeName,
    pub value: AttributeValue,
    pub prefix: Option<String>,
    pub namespace_uri: Option<String>,
}

#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
#[derive(PartialEq, Eq)]
pub struct DoctypeData {
    pub name: Option<String>,
    pub public_identifier: Option<String>,
    pub system_identifier: Option<String>,
    pub force_quirks: bool,
}

// ----------- //
// Énumération //
// ----------- //

/// Un signal est un évènement de la traversée gauche-droite de l'arbre du
/// document, sans que cet arbre ne soit jamais matérialisé. Pour toute
/// entrée acceptée, chaque [StartElement](Signal::StartElement) est
/// apparié à exactement un [EndElement](Signal::EndElement) de même nom :
/// la séquence est un parenthésage correct, même quand l'entrée est
/// malformée.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub enum Signal {
    StartElement {
        name: QName,
        attributes: Vec<Attribute>,
    },

    EndElement {
        name: QName,
    },

    /// Une ou plusieurs chaînes de caractères consécutives, pour éviter
    /// les concaténations inutiles.
    Text {
        runs: Vec<String>,
    },

    Comment(String),

    ProcessingInstruction {
        target: String,
        data: String,
    },

    Doctype(DoctypeData),

    /// XML seulement.
    XmlDeclaration {
        version: String,
        encoding: Option<String>,
        standalone: Option<bool>,
    },
}

// -------------- //
// Implémentation //
// -------------- //

impl QName {
    pub fn new(local_name: impl ToString) -> Self {
        Self {
            namespace_uri: None,
            prefix: None,
            local_name: local_name.to_string(),
        }
    }

    pub fn with_namespace(mut self, uri: impl ToString) -> Self {
        self.namespace_uri = Some(uri.to_string());
        self
    }

    pub fn with_prefix(mut self, prefix: impl ToString) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Le nom tel qu'il s'écrit dans un document : `prefix:local`.
    pub fn qualified(&self) -> String {
        match self.prefix.as_ref() {
            | Some(prefix) => format!("{prefix}:{}", self.local_name),
            | None => self.local_name.to_owned(),
        }
    }
}

impl Attribute {
    pub fn new(name: impl ToString, value: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            prefix: None,
            namespace_uri: None,
        }
    }
}

impl Signal {
    pub fn start(name: QName) -> Self {
        Self::StartElement {
            name,
            attributes: vec![],
        }
    }

    pub fn end(name: QName) -> Self {
        Self::EndElement { name }
    }

    pub fn text(run: impl ToString) -> Self {
        Self::Text {
            runs: vec![run.to_string()],
        }
    }

    pub const fn is_start_element(&self) -> bool {
        matches!(self, Self::StartElement { .. })
    }

    pub const fn is_end_element(&self) -> bool {
        matches!(self, Self::EndElement { .. })
    }

    /// Le contenu textuel d'un signal [Signal::Text], concaténé.
    pub fn joined_text(&self) -> Option<String> {
        if let Self::Text { runs } = self {
            Some(runs.concat())
        } else {
            None
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

impl<S1, S2> From<(S1, S2)> for Attribute
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    fn from(nv: (S1, S2)) -> Self {
        Self::new(nv.0.as_ref(), nv.1.as_ref())
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let name = QName::new("b")
            .with_namespace("http://example.org/u")
            .with_prefix("x");
        assert_eq!(name.qualified(), "x:b");
        assert_eq!(QName::new("a").qualified(), "a");
    }

    #[test]
    fn test_joined_text() {
        let signal = Signal::Text {
            runs: vec!["a".into(), "b".into()],
        };
        assert_eq!(signal.joined_text(), Some("ab".into()));
        assert_eq!(Signal::Comment(String::new()).joined_text(), None);
    }
}
