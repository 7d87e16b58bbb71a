/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use infra::{
    primitive::{
        codepoint::{CodePoint, CodePointIterator},
        location::Location,
    },
    structure::lists::{peekable::PeekableInterface, queue::ListQueue},
};

use crate::{StreamInputInterface, StreamIteratorInterface};

// ---- //
// Type //
// ---- //

pub type InputStream<Chars> = InputStreamPreprocessor<Chars>;

// --------- //
// Structure //
// --------- //

/// Le flux d'entrée est constitué de caractères qui y sont insérés lors
/// du décodage du flux d'octets d'entrée. Avant la tokenisation, les
/// sauts de ligne sont normalisés : un U+000D CARRIAGE RETURN suivi ou
/// non d'un U+000A LINE FEED devient un unique LINE FEED. Chaque point de
/// code reçoit un emplacement (ligne, colonne).
#[derive(Debug)]
pub struct InputStreamPreprocessor<Chars>
where
    Chars: CodePointIterator,
{
    queue: ListQueue<NormalizedInput<Chars>, CodePoint>,
    pub current_input: Option<CodePoint>,
    current_location: Location,
    next_location: Location,
}

/// Fusionne CR LF et transforme CR isolé en LF, en amont de la file
/// d'attente, de sorte que toute avance ou tout regard en avance observe
/// déjà le flux normalisé.
#[derive(Debug)]
struct NormalizedInput<Chars> {
    chars: Chars,
    pending: Option<CodePoint>,
}

// -------------- //
// Implémentation //
// -------------- //

impl<C> InputStreamPreprocessor<C>
where
    C: CodePointIterator,
{
    /// Crée un nouveau flux d'entrée.
    pub fn new(chars: C) -> Self {
        Self {
            queue: ListQueue::new(NormalizedInput {
                chars,
                pending: None,
            }),
            current_input: None,
            current_location: Location::new(),
            next_location: Location::new(),
        }
    }

    /// L'emplacement de la dernière entrée consommée.
    pub const fn location(&self) -> Location {
        self.current_location
    }

    /// L'emplacement de la prochaine entrée.
    pub const fn next_location(&self) -> Location {
        self.next_location
    }

    /// Alias de [StreamIteratorInterface::consume_next_input].
    //
    // NOTE: Nomenclature de la spécification HTML.
    pub fn consume_next_input_character(&mut self) -> Option<CodePoint> {
        self.consume_next_input()
    }

    /// Alias de [StreamIteratorInterface::next_input].
    //
    // NOTE: Nomenclature de la spécification HTML.
    pub fn next_input_character(&mut self) -> Option<CodePoint> {
        self.next_input()
    }

    /// Les N prochains caractères du flux, sans les consommer.
    pub fn next_n_input_character(&mut self, n: usize) -> String {
        self.queue.peek_until::<String>(n)
    }

    /// Consomme les prochains caractères du flux d'entrée s'ils sont
    /// identiques à l'argument `codepoints`.
    pub fn consume_next_input_characters_if_are(
        &mut self,
        codepoints: &str,
    ) -> bool {
        if self.next_n_input_character(codepoints.chars().count())
            == codepoints
        {
            self.advance(codepoints.chars().count());
            true
        } else {
            false
        }
    }

    /// Réinsère un caractère déjà consommé en tête du flux. Sert aux
    /// regards en avance qui ont trop consommé ; les emplacements ne sont
    /// pas rembobinés.
    pub fn push_back_input(&mut self, ch: CodePoint) {
        self.queue.reconsume(ch);
    }

    /// Variante insensible à la casse ASCII de
    /// [Self::consume_next_input_characters_if_are].
    pub fn consume_next_input_characters_if_are_insensitive(
        &mut self,
        codepoints: &str,
    ) -> bool {
        if self
            .next_n_input_character(codepoints.chars().count())
            .eq_ignore_ascii_case(codepoints)
        {
            self.advance(codepoints.chars().count());
            true
        } else {
            false
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<C> StreamIteratorInterface for InputStreamPreprocessor<C>
where
    C: CodePointIterator,
{
    type Input = CodePoint;

    fn consume_next_input(&mut self) -> Option<Self::Input> {
        let maybe_ch = self.queue.next();
        if let Some(ch) = maybe_ch {
            self.current_location = self.next_location;
            self.next_location.advance(ch);
        }
        self.current_input = maybe_ch;
        maybe_ch
    }

    fn current_input(&self) -> Option<&Self::Input> {
        self.current_input.as_ref()
    }

    fn next_input(&mut self) -> Option<Self::Input> {
        self.queue.peek().copied()
    }

    fn reconsume_current_input(&mut self) {
        if let Some(ch) = self.current_input {
            self.queue.reconsume(ch);
            self.next_location = self.current_location;
        }
    }
}

impl<C> Iterator for NormalizedInput<C>
where
    C: CodePointIterator,
{
    type Item = CodePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        match self.chars.next()? {
            | '\r' => {
                match self.chars.next() {
                    | Some('\n') | None => {}
                    | other => self.pending = other,
                }
                Some('\n')
            }
            | ch => Some(ch),
        }
    }
}

impl StreamInputInterface for CodePoint {
    fn eof() -> Self {
        '\0'
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    fn get_input_stream(
        input: &'static str,
    ) -> InputStreamPreprocessor<impl CodePointIterator> {
        InputStreamPreprocessor::new(input.chars())
    }

    #[test]
    fn test_next_n_input_character() {
        let mut stream = get_input_stream("Hello World");
        assert_eq!(stream.next_n_input_character(5), "Hello");
        assert_eq!(stream.consume_next_input(), Some('H'));
    }

    #[test]
    fn test_newline_normalization() {
        let mut stream = get_input_stream("a\r\nb\rc\nd");
        let output: String =
            core::iter::from_fn(|| stream.consume_next_input()).collect();
        assert_eq!(output, "a\nb\nc\nd");
    }

    #[test]
    fn test_locations_follow_normalized_newlines() {
        let mut stream = get_input_stream("a\r\nb");

        stream.consume_next_input(); // 'a'
        assert_eq!(stream.location(), Location { line: 1, column: 1 });

        stream.consume_next_input(); // '\n' (CR LF normalisé)
        assert_eq!(stream.location(), Location { line: 1, column: 2 });

        stream.consume_next_input(); // 'b'
        assert_eq!(stream.location(), Location { line: 2, column: 1 });
    }

    #[test]
    fn test_reconsume() {
        let mut stream = get_input_stream("Hello World !");
        stream.consume_next_input(); // H
        stream.consume_next_input(); // e
        stream.reconsume_current_input(); // e
        assert_eq!(stream.consume_next_input(), Some('e'));
        assert_eq!(stream.consume_next_input(), Some('l'));
    }

    #[test]
    fn test_consume_if_are() {
        let mut stream = get_input_stream("DOCTYPE html");
        assert!(!stream.consume_next_input_characters_if_are("doctype"));
        assert!(
            stream.consume_next_input_characters_if_are_insensitive(
                "doctype"
            )
        );
        assert_eq!(stream.consume_next_input(), Some(' '));
    }
}
