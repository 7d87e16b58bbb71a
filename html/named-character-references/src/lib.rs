/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::{collections::HashMap, sync::OnceLock};

use serde::Deserialize;

// ---- //
// Type //
// ---- //

pub type NamedCharacterReferencesEntities =
    HashMap<String, NamedCharacterReferenceEntity>;

/// Un nœud du trie, repéré par son index dans le tableau plat.
pub type TrieNodeId = usize;

// --------- //
// Structure //
// --------- //

/// Répertorie les noms de référence des caractères pris en charge par
/// HTML, ainsi que les points de code auxquels ils font référence.
#[derive(Debug)]
#[derive(Deserialize)]
pub struct NamedCharacterReferences(NamedCharacterReferencesEntities);

#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
#[derive(Deserialize)]
pub struct NamedCharacterReferenceEntity {
    pub codepoints: Vec<u32>,
    pub characters: String,
}

/// Le trie des références de caractères nommés, pour une correspondance
/// incrémentale : le tokenizer fournit les points de code un à un, et le
/// trie indique après chaque pas (a) si le chemin courant est un terminal
/// valide, avec sa chaîne de remplacement, et (b) si une correspondance
/// plus longue reste possible.
///
/// Les entrées de la table sans point-virgule final sont les entités
/// héritées : la règle de compatibilité de la spécification HTML ne
/// s'applique qu'à elles.
#[derive(Debug)]
pub struct NamedReferencesTrie {
    nodes: Vec<TrieNode>,
    terminals: Vec<Terminal>,
}

#[derive(Debug)]
struct TrieNode {
    ch: char,
    first_child: Option<TrieNodeId>,
    next_sibling: Option<TrieNodeId>,
    terminal: Option<usize>,
}

#[derive(Debug)]
pub struct Terminal {
    pub characters: String,
    /// Le nom se termine-t-il par U+003B SEMICOLON ?
    pub with_semicolon: bool,
}

// -------------- //
// Implémentation //
// -------------- //

impl NamedCharacterReferences {
    /// Dé-sérialise les entités références des caractères nommés vers
    /// [NamedCharacterReferencesEntities] et nous le retourne.
    pub fn entities() -> NamedCharacterReferencesEntities {
        // Ce JSON provient de `https://html.spec.whatwg.org/entities.json`
        let json_entities: &'static str = include_str!("entities.json");

        let named_character_references: NamedCharacterReferences =
            serde_json::from_str(json_entities)
                .expect("Les entités références des caractères nommés");

        named_character_references.0
    }
}

impl NamedReferencesTrie {
    /// Le trie partagé, construit au premier usage depuis la table des
    /// entités.
    pub fn shared() -> &'static Self {
        static TRIE: OnceLock<NamedReferencesTrie> = OnceLock::new();
        TRIE.get_or_init(|| {
            Self::from_entities(&NamedCharacterReferences::entities())
        })
    }

    pub fn from_entities(
        entities: &NamedCharacterReferencesEntities,
    ) -> Self {
        let mut trie = Self {
            // La racine occupe l'index 0 ; son caractère n'est jamais lu.
            nodes: vec![TrieNode {
                ch: '\0',
                first_child: None,
                next_sibling: None,
                terminal: None,
            }],
            terminals: Vec::with_capacity(entities.len()),
        };

        for (name, entity) in entities {
            // Les clés de la table sont de la forme `&name` ou `&name;`.
            let name = name.strip_prefix('&').unwrap_or(name);
            trie.insert(name, entity);
        }

        trie
    }

    fn insert(
        &mut self,
        name: &str,
        entity: &NamedCharacterReferenceEntity,
    ) {
        let mut node = Self::ROOT;

        for ch in name.chars() {
            node = match self.child(node, ch) {
                | Some(child) => child,
                | None => {
                    let new_node = self.nodes.len();
                    self.nodes.push(TrieNode {
                        ch,
                        first_child: None,
                        next_sibling: self.nodes[node].first_child,
                        terminal: None,
                    });
                    self.nodes[node].first_child = Some(new_node);
                    new_node
                }
            };
        }

        let terminal = self.terminals.len();
        self.terminals.push(Terminal {
            characters: entity.characters.to_owned(),
            with_semicolon: name.ends_with(';'),
        });
        self.nodes[node].terminal = Some(terminal);
    }

    pub const ROOT: TrieNodeId = 0;

    fn child(&self, node: TrieNodeId, ch: char) -> Option<TrieNodeId> {
        let mut maybe_child = self.nodes[node].first_child;
        while let Some(child) = maybe_child {
            if self.nodes[child].ch == ch {
                return Some(child);
            }
            maybe_child = self.nodes[child].next_sibling;
        }
        None
    }

    /// Un pas de correspondance : descend de `node` vers l'enfant
    /// étiqueté `ch`, s'il existe.
    pub fn step(&self, node: TrieNodeId, ch: char) -> Option<TrieNodeId> {
        self.child(node, ch)
    }

    /// Le terminal atteint par le chemin courant, le cas échéant.
    pub fn terminal(&self, node: TrieNodeId) -> Option<&Terminal> {
        self.nodes[node]
            .terminal
            .map(|terminal| &self.terminals[terminal])
    }

    /// Une correspondance plus longue est-elle encore possible depuis ce
    /// nœud ? Le tokenizer s'en sert pour décider de continuer à
    /// consommer.
    pub fn can_extend(&self, node: TrieNodeId) -> bool {
        self.nodes[node].first_child.is_some()
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_case() {
        let entities = NamedCharacterReferences::entities();

        let entity = entities.get("&AElig");

        assert_eq!(
            entity,
            Some(&NamedCharacterReferenceEntity {
                characters: String::from('\u{00C6}'),
                codepoints: vec![198]
            })
        );

        let entity = entities.get("&test");
        assert_eq!(entity, None);
    }

    #[test]
    fn test_trie_incremental_match() {
        let trie = NamedReferencesTrie::shared();

        let mut node = NamedReferencesTrie::ROOT;
        for ch in "not".chars() {
            node = trie.step(node, ch).expect("un chemin du trie");
        }

        // `&not` est un terminal hérité, et `&notin;` reste possible.
        let terminal = trie.terminal(node).expect("un terminal");
        assert_eq!(terminal.characters, "\u{00AC}");
        assert!(!terminal.with_semicolon);
        assert!(trie.can_extend(node));

        for ch in "in;".chars() {
            node = trie.step(node, ch).expect("un chemin du trie");
        }
        let terminal = trie.terminal(node).expect("un terminal");
        assert_eq!(terminal.characters, "\u{2209}");
        assert!(terminal.with_semicolon);
        assert!(!trie.can_extend(node));
    }

    #[test]
    fn test_trie_rejects_unknown_path() {
        let trie = NamedReferencesTrie::shared();
        let node = trie.step(NamedReferencesTrie::ROOT, 'n').unwrap();
        assert_eq!(trie.step(node, '7'), None);
    }
}
