/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use parser::signal::Attribute;

// --------- //
// Structure //
// --------- //

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct XMLTagToken {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub is_end: bool,
    pub self_closing: bool,
}

// ----------- //
// Énumération //
// ----------- //

/// La sortie du tokenizer XML : déclaration, doctype, balises, texte,
/// sections CDATA, commentaires, instructions de traitement, fin de
/// fichier.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum XMLToken {
    Declaration {
        version: String,
        encoding: Option<String>,
        standalone: Option<bool>,
    },

    /// Les identifiants externes sont analysés mais jamais résolus.
    Doctype {
        name: String,
        public_identifier: Option<String>,
        system_identifier: Option<String>,
    },

    Tag(XMLTagToken),

    /// Une suite de caractères de contenu, références déjà résolues.
    Text(String),

    /// Le contenu d'une section `<![CDATA[ ... ]]>`.
    CDATA(String),

    Comment(String),

    ProcessingInstruction {
        target: String,
        data: String,
    },

    EOF,
}

// -------------- //
// Implémentation //
// -------------- //

impl XMLTagToken {
    pub const fn start(name: String) -> Self {
        Self {
            name,
            attributes: vec![],
            is_end: false,
            self_closing: false,
        }
    }

    pub const fn end(name: String) -> Self {
        Self {
            name,
            attributes: vec![],
            is_end: true,
            self_closing: false,
        }
    }
}

impl XMLToken {
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    pub fn is_whitespace_text(&self) -> bool {
        if let Self::Text(text) = self {
            text.chars().all(|ch| {
                matches!(ch, ' ' | '\t' | '\n' | '\r')
            })
        } else {
            false
        }
    }
}
