/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Les noms de balises HTML et leurs catégories.
pub mod elements;
/// Les erreurs d'analyse syntaxique, avec leurs codes de la
/// spécification.
pub mod error;
/// 13.2.5 Tokenization
pub mod tokenization;
/// 13.2.6 Tree construction
pub mod tree_construction;
/// Sérialisation des signaux vers des octets UTF-8.
pub mod writer;

use std::ops::ControlFlow;

use infra::primitive::{
    codepoint::CodePointIterator, location::Location,
};
use parser::{
    decoder::{ByteStream, Decoder, DocumentKind, Encoding},
    diagnostic::Report,
    signal::Signal,
};

use self::{
    tokenization::{HTMLTokenizer, State},
    tree_construction::{HTMLParserState, HTMLTreeConstruction},
};

// --------- //
// Structure //
// --------- //

/// L'analyseur HTML : octets ou points de code en entrée, signaux en
/// sortie. Une instance est créée par source, consommée jusqu'à la fin,
/// puis abandonnée.
pub struct HTMLParser<Chars>
where
    Chars: CodePointIterator,
{
    tokenizer: HTMLTokenizer<Chars>,
    tree_construction: HTMLTreeConstruction,
    done: bool,
}

#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
pub struct HTMLParserOptions {
    /// Encodage imposé, court-circuitant la détection.
    pub encoding: Option<Encoding>,
    /// Analyse d'un document complet, ou d'un fragment dans un élément
    /// de contexte.
    pub context: ParsingContext,
    /// L'état du drapeau scripting : il modifie le traitement de
    /// `<noscript>`.
    pub scripting: bool,
    /// Là où vont les diagnostics ; par défaut, ils sont abandonnés
    /// après journalisation.
    pub report: Report,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
pub enum ParsingContext {
    #[default]
    Document,
    Fragment(String),
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLParserOptions {
    pub fn new() -> Self {
        Self {
            encoding: None,
            context: ParsingContext::Document,
            scripting: true,
            report: Report::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn with_fragment_context(
        mut self,
        context: impl ToString,
    ) -> Self {
        self.context = ParsingContext::Fragment(context.to_string());
        self
    }

    pub fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting = enabled;
        self
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }
}

impl HTMLParser<Decoder> {
    /// Analyse un flux d'octets : l'encodage est détecté (BOM,
    /// déclaration, pré-scan des `<meta>`), sauf s'il est imposé par les
    /// options.
    pub fn from_byte_stream(
        stream: ByteStream,
        options: HTMLParserOptions,
    ) -> Self {
        let decoder = match options.encoding {
            | Some(encoding) => Decoder::with_encoding(
                stream,
                encoding,
                options.report.clone(),
            ),
            | None => Decoder::sniffed(
                stream,
                DocumentKind::HTML,
                options.scripting,
                options.report.clone(),
            ),
        };

        Self::with_options(decoder, options)
    }
}

impl<C> HTMLParser<C>
where
    C: CodePointIterator,
{
    pub fn new(chars: C) -> Self {
        Self::with_options(chars, HTMLParserOptions::new())
    }

    pub fn with_options(chars: C, options: HTMLParserOptions) -> Self {
        let mut tokenizer = HTMLTokenizer::new(chars)
            .with_report(options.report.clone());

        let mut tree_construction = HTMLTreeConstruction::new()
            .with_report(options.report)
            .with_scripting(options.scripting);

        if let ParsingContext::Fragment(context) = &options.context {
            tree_construction =
                tree_construction.with_fragment_context(context);

            // L'état initial et la « dernière balise de début » du
            // tokenizer dépendent de l'élément de contexte.
            tokenizer.set_last_start_tag(context);
            if let Some(state) = Self::initial_state_for_fragment(
                context,
                options.scripting,
            ) {
                tokenizer.switch_state_to(state.to_string());
            }
        }

        Self {
            tokenizer,
            tree_construction,
            done: false,
        }
    }

    fn initial_state_for_fragment(
        context: &str,
        scripting: bool,
    ) -> Option<State> {
        Some(match context {
            | "title" | "textarea" => State::RCDATA,
            | "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                State::RAWTEXT
            }
            | "noscript" if scripting => State::RAWTEXT,
            | "script" => State::ScriptData,
            | "plaintext" => State::PLAINTEXT,
            | _ => return None,
        })
    }

    /// L'emplacement du jeton dont dérive le dernier signal.
    pub fn location(&self) -> Location {
        self.tree_construction.location()
    }

    /// Le flux de signaux sous la forme de la primitive de flux tiré :
    /// chaque avancée délivre une valeur ou la fin (rémanente).
    pub fn into_signal_stream(self) -> parser::stream::PullStream<Signal>
    where
        C: 'static,
    {
        let mut html_parser = self;
        parser::stream::PullStream::from_fn(move || {
            match html_parser.next() {
                | Some(signal) => {
                    parser::stream::StreamEvent::Value(signal)
                }
                | None => parser::stream::StreamEvent::End,
            }
        })
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<C> Iterator for HTMLParser<C>
where
    C: CodePointIterator,
{
    type Item = Signal;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(signal) = self.tree_construction.pop_output() {
                return Some(signal);
            }

            if self.done {
                return None;
            }

            let token = self.tokenizer.next_token();
            self.tree_construction
                .set_location(self.tokenizer.location());

            match self.tree_construction.dispatch(token) {
                | ControlFlow::Break(_) => {
                    self.done = true;
                }
                | ControlFlow::Continue(HTMLParserState::SwitchTo(
                    state,
                )) => {
                    self.tokenizer.switch_state_to(state.to_string());
                }
                | ControlFlow::Continue(HTMLParserState::Ignore) => {}
            }

            // L'état partagé entre les deux étapes reste explicite : le
            // tokenizer apprend entre deux jetons si les sections CDATA
            // sont permises.
            self.tokenizer.set_cdata_allowed(
                self.tree_construction.is_cdata_allowed(),
            );
        }
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use parser::{
        diagnostic::DiagnosticKind,
        signal::{QName, Signal},
    };

    use super::*;

    fn parse_fragment(input: &'static str) -> Vec<Signal> {
        HTMLParser::with_options(
            input.chars(),
            HTMLParserOptions::new().with_fragment_context("body"),
        )
        .collect()
    }

    fn parse_document(input: &'static str) -> Vec<Signal> {
        HTMLParser::new(input.chars()).collect()
    }

    fn start(name: &str) -> Signal {
        Signal::start(
            QName::new(name)
                .with_namespace("http://www.w3.org/1999/xhtml"),
        )
    }

    fn end(name: &str) -> Signal {
        Signal::end(
            QName::new(name)
                .with_namespace("http://www.w3.org/1999/xhtml"),
        )
    }

    #[test]
    fn test_implied_end_tags_for_paragraphs() {
        // La fermeture implicite d'un `p` n'est pas une erreur.
        let signals = parse_fragment("<p>a<p>b");
        assert_eq!(
            signals,
            vec![
                start("p"),
                Signal::text("a"),
                end("p"),
                start("p"),
                Signal::text("b"),
                end("p"),
            ]
        );
    }

    #[test]
    fn test_adoption_agency_on_misnested_formatting() {
        let report = Report::collector();
        let signals: Vec<Signal> = HTMLParser::with_options(
            "<b>1<i>2</b>3</i>4".chars(),
            HTMLParserOptions::new()
                .with_fragment_context("body")
                .with_report(report.clone()),
        )
        .collect();

        assert_eq!(
            signals,
            vec![
                start("b"),
                Signal::text("1"),
                start("i"),
                Signal::text("2"),
                end("i"),
                end("b"),
                start("i"),
                Signal::text("3"),
                end("i"),
                Signal::text("4"),
            ]
        );

        assert!(report
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::MisnestedTag));
    }

    #[test]
    fn test_adoption_agency_with_a_furthest_block() {
        // `p` est un élément « special » entre l'élément de mise en
        // forme et le nœud actuel : la branche du bloc le plus éloigné
        // de l'algorithme d'adoption s'applique. En flux, la
        // ré-parentalité se réalise en fermant puis rouvrant des clones :
        // le clone de `b` renaît sous le bloc le plus éloigné, et le
        // contenu suivant atterrit dans le `p` rouvert.
        let report = Report::collector();
        let signals: Vec<Signal> = HTMLParser::with_options(
            "<b><p>1</b>2".chars(),
            HTMLParserOptions::new()
                .with_fragment_context("body")
                .with_report(report.clone()),
        )
        .collect();

        assert_eq!(
            signals,
            vec![
                start("b"),
                start("p"),
                Signal::text("1"),
                end("p"),
                end("b"),
                start("p"),
                start("b"),
                end("b"),
                Signal::text("2"),
                end("p"),
            ]
        );

        assert!(report
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::MisnestedTag));
    }

    #[test]
    fn test_adoption_agency_inner_loop_clones_formatting_chain() {
        // `i` se trouve entre l'élément de mise en forme et le bloc le
        // plus éloigné : la boucle interne le remplace par un clone
        // porteur des mêmes attributs, qui rouvre au-dessus de l'ancêtre
        // commun, et le signet place le clone de `b` après lui dans la
        // liste.
        let signals = parse_fragment("<b><i><p>1</b>2");

        assert_eq!(
            signals,
            vec![
                start("b"),
                start("i"),
                start("p"),
                Signal::text("1"),
                end("p"),
                end("i"),
                end("b"),
                start("i"),
                start("p"),
                start("b"),
                end("b"),
                Signal::text("2"),
                end("p"),
                end("i"),
            ]
        );
    }

    #[test]
    fn test_adoption_agency_clones_preserve_attributes() {
        let signals =
            parse_fragment("<b class=\"x\"><p>1</b>2");

        // Les deux `b` (l'original et son clone rouvert sous le bloc le
        // plus éloigné) portent les mêmes attributs.
        let attribute_sets: Vec<_> = signals
            .iter()
            .filter_map(|signal| match signal {
                | Signal::StartElement { name, attributes }
                    if name.local_name == "b" =>
                {
                    Some(attributes.to_owned())
                }
                | _ => None,
            })
            .collect();

        assert_eq!(attribute_sets.len(), 2);
        assert_eq!(
            attribute_sets[0],
            vec![parser::signal::Attribute::new("class", "x")]
        );
        assert_eq!(attribute_sets[0], attribute_sets[1]);
    }

    #[test]
    fn test_implied_tbody_in_table() {
        let signals = parse_fragment("<table><tr><td>x</table>");
        assert_eq!(
            signals,
            vec![
                start("table"),
                start("tbody"),
                start("tr"),
                start("td"),
                Signal::text("x"),
                end("td"),
                end("tr"),
                end("tbody"),
                end("table"),
            ]
        );
    }

    #[test]
    fn test_fostered_text_is_emitted_before_the_table() {
        let signals = parse_fragment("<table>x<td>y</table>");
        let table_start = signals
            .iter()
            .position(|signal| {
                matches!(signal, Signal::StartElement { name, .. } if name.local_name == "table")
            })
            .expect("le signal de début de table");
        let fostered = signals
            .iter()
            .position(|signal| {
                signal.joined_text().is_some_and(|text| text == "x")
            })
            .expect("le texte adopté");

        assert!(fostered < table_start);
    }

    #[test]
    fn test_unknown_entity_is_preserved_literally() {
        let report = Report::collector();
        let signals: Vec<Signal> = HTMLParser::with_options(
            "<!DOCTYPE html><html><body>&amp;&lt;&unknown;".chars(),
            HTMLParserOptions::new().with_report(report.clone()),
        )
        .collect();

        let text: String = signals
            .iter()
            .filter_map(Signal::joined_text)
            .collect();
        assert_eq!(text, "&<&unknown;");

        assert!(report
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::BadToken));
    }

    #[test]
    fn test_document_structure_is_synthesized() {
        let signals = parse_document("<!DOCTYPE html>hello");
        assert_eq!(
            signals,
            vec![
                Signal::Doctype(parser::signal::DoctypeData {
                    name: Some("html".into()),
                    ..Default::default()
                }),
                start("html"),
                start("head"),
                end("head"),
                start("body"),
                Signal::text("hello"),
                end("body"),
                end("html"),
            ]
        );
    }

    #[test]
    fn test_signals_are_balanced_on_malformed_input() {
        for input in [
            "<div><span>x",
            "</p>",
            "<b><i>1</b>2",
            "<b><p><i>x</b>y",
            "<a>1<p>2</a>3",
            "<a><p>X<a>Y</a>Z</p></a>",
            "<table><div>x</div></table>",
            "<select><option>a<option>b",
            "<!doctype html><p><table>y</table>",
        ] {
            let signals = parse_document(input);
            let mut depth = 0usize;
            for signal in &signals {
                match signal {
                    | Signal::StartElement { .. } => depth += 1,
                    | Signal::EndElement { .. } => {
                        assert!(
                            depth > 0,
                            "EndElement excédentaire pour {input:?}"
                        );
                        depth -= 1;
                    }
                    | _ => {}
                }
            }
            assert_eq!(
                depth, 0,
                "signaux non équilibrés pour {input:?}"
            );
        }
    }

    #[test]
    fn test_matching_qnames_on_start_and_end() {
        let signals = parse_document("<div><span>x</span></div>");
        let mut stack = vec![];
        for signal in signals {
            match signal {
                | Signal::StartElement { name, .. } => {
                    stack.push(name)
                }
                | Signal::EndElement { name } => {
                    assert_eq!(stack.pop(), Some(name));
                }
                | _ => {}
            }
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn test_foreign_content_gets_namespaces() {
        let signals =
            parse_fragment("<svg><circle/><foreignObject></svg>");
        let svg_ns = "http://www.w3.org/2000/svg";

        assert!(signals.iter().any(|signal| {
            matches!(
                signal,
                Signal::StartElement { name, .. }
                    if name.local_name == "circle"
                        && name.namespace_uri.as_deref() == Some(svg_ns)
            )
        }));
    }

    #[test]
    fn test_round_trip_through_the_writer() {
        let original = parse_fragment("<p>a<p><b>b</b>");
        let bytes = crate::writer::HTMLWriter::write_all(
            original.iter().cloned(),
        );
        let reparsed = parse_fragment(Box::leak(
            String::from_utf8(bytes).unwrap().into_boxed_str(),
        ));
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_signal_stream_end_is_sticky() {
        let mut stream = HTMLParser::with_options(
            "<p>a".chars(),
            HTMLParserOptions::new().with_fragment_context("body"),
        )
        .into_signal_stream();

        assert_eq!(stream.to_list().map(|signals| signals.len()), Ok(3));
        assert_eq!(
            stream.advance(),
            parser::stream::StreamEvent::End
        );
        assert_eq!(
            stream.advance(),
            parser::stream::StreamEvent::End
        );
    }

    #[test]
    fn test_locations_are_non_decreasing() {
        let mut parser =
            HTMLParser::new("<p>ab</p>\n<p>cd</p>".chars());
        let mut previous = parser.location();
        while let Some(_signal) = parser.next() {
            let location = parser.location();
            assert!(location >= previous);
            previous = location;
        }
    }
}
