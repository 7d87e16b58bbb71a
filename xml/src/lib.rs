/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Les violations de bonne formation, avec leurs codes.
pub mod error;
mod token;
/// Tokenisation XML 1.0, cinquième édition.
pub mod tokenizer;
/// Sérialisation des signaux vers des octets UTF-8, préfixes compris.
pub mod writer;

use std::collections::VecDeque;

use infra::{
    namespace::Namespace,
    primitive::{codepoint::CodePointIterator, location::Location},
};
use parser::{
    decoder::{ByteStream, Decoder, DocumentKind, Encoding},
    diagnostic::{Diagnostic, Report},
    signal::{Attribute, DoctypeData, QName, Signal},
};

pub use self::token::{XMLTagToken, XMLToken};
use self::{error::XMLParserError, tokenizer::XMLTokenizer};

// ---- //
// Type //
// ---- //

/// Une trame de liaisons d'espaces de noms : les déclarations `xmlns` et
/// `xmlns:prefix` portées par un élément, dépilées avec lui.
type NamespaceFrame = Vec<(Option<String>, String)>;

// --------- //
// Structure //
// --------- //

/// L'analyseur XML : il maintient la pile des éléments ouverts et la pile
/// des liaisons de préfixes en portée. Les violations de bonne formation
/// sont signalées puis récupérées en synthétisant la structure la plus
/// plausible, de sorte que la sortie reste un arbre bien formé.
pub struct XMLParser<Chars>
where
    Chars: CodePointIterator,
{
    tokenizer: XMLTokenizer<Chars>,
    output: VecDeque<Signal>,
    stack_of_open_elements: Vec<QName>,
    namespace_frames: Vec<NamespaceFrame>,
    root_closed: bool,
    done: bool,
    location: Location,
    report: Report,
}

#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
pub struct XMLParserOptions {
    /// Encodage imposé, court-circuitant la détection.
    pub encoding: Option<Encoding>,
    pub report: Report,
}

// -------------- //
// Implémentation //
// -------------- //

impl XMLParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }
}

impl XMLParser<Decoder> {
    /// Analyse un flux d'octets ; l'encodage est détecté (BOM puis
    /// déclaration XML), sauf s'il est imposé par les options.
    pub fn from_byte_stream(
        stream: ByteStream,
        options: XMLParserOptions,
    ) -> Self {
        let decoder = match options.encoding {
            | Some(encoding) => Decoder::with_encoding(
                stream,
                encoding,
                options.report.clone(),
            ),
            | None => Decoder::sniffed(
                stream,
                DocumentKind::XML,
                false,
                options.report.clone(),
            ),
        };

        Self::new(decoder).with_report(options.report)
    }
}

impl<C> XMLParser<C>
where
    C: CodePointIterator,
{
    pub fn new(chars: C) -> Self {
        // Les préfixes `xml` et `xmlns` sont liés d'office.
        let base_frame: NamespaceFrame = vec![
            (
                Some(String::from("xml")),
                Namespace::XML.uri().to_owned(),
            ),
            (
                Some(String::from("xmlns")),
                Namespace::XMLNS.uri().to_owned(),
            ),
        ];

        Self {
            tokenizer: XMLTokenizer::new(chars),
            output: VecDeque::default(),
            stack_of_open_elements: Vec::default(),
            namespace_frames: vec![base_frame],
            root_closed: false,
            done: false,
            location: Location::new(),
            report: Report::default(),
        }
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.tokenizer.set_report(report.clone());
        self.report = report;
        self
    }

    /// L'emplacement du jeton dont dérive le dernier signal.
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Le flux de signaux sous la forme de la primitive de flux tiré :
    /// chaque avancée délivre une valeur ou la fin (rémanente).
    pub fn into_signal_stream(self) -> parser::stream::PullStream<Signal>
    where
        C: 'static,
    {
        let mut xml_parser = self;
        parser::stream::PullStream::from_fn(move || {
            match xml_parser.next() {
                | Some(signal) => {
                    parser::stream::StreamEvent::Value(signal)
                }
                | None => parser::stream::StreamEvent::End,
            }
        })
    }

    fn error(&self, err: XMLParserError) {
        crate::emit_xml_error!(&err);
        self.report.report(Diagnostic::new(
            self.location,
            err.kind(),
            err.code(),
        ));
    }

    /// L'URI liée à un préfixe (ou au défaut), en remontant les trames.
    fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        for frame in self.namespace_frames.iter().rev() {
            for (bound_prefix, uri) in frame.iter().rev() {
                if bound_prefix.as_deref() == prefix {
                    if uri.is_empty() {
                        // Une liaison vide dé-lie.
                        return None;
                    }
                    return Some(uri);
                }
            }
        }
        None
    }

    /// Résout `prefix:local` en nom qualifié d'après les liaisons en
    /// portée. Un préfixe non déclaré est signalé ; l'élément reste sans
    /// espace de noms.
    fn resolve_qname(&self, name: &str, is_attribute: bool) -> QName {
        match name.split_once(':') {
            | Some((prefix, local_name)) => {
                let mut qname =
                    QName::new(local_name).with_prefix(prefix);
                match self.resolve(Some(prefix)) {
                    | Some(uri) => {
                        qname.namespace_uri = Some(uri.to_owned());
                    }
                    | None => {
                        self.error(XMLParserError::UndeclaredPrefix);
                    }
                }
                qname
            }
            | None => {
                let mut qname = QName::new(name);
                // Les attributs sans préfixe n'ont pas d'espace de noms ;
                // les éléments reçoivent l'espace de noms par défaut.
                if !is_attribute {
                    if let Some(uri) = self.resolve(None) {
                        qname.namespace_uri = Some(uri.to_owned());
                    }
                }
                qname
            }
        }
    }

    fn process_token(&mut self, token: XMLToken) {
        match token {
            | XMLToken::Declaration {
                version,
                encoding,
                standalone,
            } => {
                self.output.push_back(Signal::XmlDeclaration {
                    version,
                    encoding,
                    standalone,
                });
            }

            | XMLToken::Doctype {
                name,
                public_identifier,
                system_identifier,
            } => {
                self.output.push_back(Signal::Doctype(DoctypeData {
                    name: Some(name),
                    public_identifier,
                    system_identifier,
                    force_quirks: false,
                }));
            }

            | XMLToken::Comment(comment) => {
                self.output.push_back(Signal::Comment(comment));
            }

            | XMLToken::ProcessingInstruction { target, data } => {
                self.output.push_back(Signal::ProcessingInstruction {
                    target,
                    data,
                });
            }

            | XMLToken::Text(text) | XMLToken::CDATA(text) => {
                if self.stack_of_open_elements.is_empty()
                    && !text.chars().all(|ch| {
                        matches!(ch, ' ' | '\t' | '\n' | '\r')
                    })
                {
                    self.error(XMLParserError::ContentAfterRoot);
                }
                if !text.is_empty() {
                    self.output
                        .push_back(Signal::Text { runs: vec![text] });
                }
            }

            | XMLToken::Tag(tag) if !tag.is_end => {
                self.process_start_tag(tag);
            }

            | XMLToken::Tag(tag) => {
                self.process_end_tag(tag);
            }

            | XMLToken::EOF => {
                if !self.stack_of_open_elements.is_empty() {
                    self.error(XMLParserError::UnexpectedEndOfFile);
                }
                while let Some(qname) = self.stack_of_open_elements.pop()
                {
                    self.namespace_frames.pop();
                    self.output
                        .push_back(Signal::EndElement { name: qname });
                }
                self.done = true;
            }
        }
    }

    fn process_start_tag(&mut self, mut tag: XMLTagToken) {
        if self.root_closed {
            self.error(XMLParserError::ContentAfterRoot);
        }

        // Les doublons d'attributs sont résolus en gardant la première
        // occurrence.
        let mut seen: Vec<String> = vec![];
        let before = tag.attributes.len();
        tag.attributes.retain(|attribute| {
            if seen.iter().any(|name| *name == attribute.name) {
                false
            } else {
                seen.push(attribute.name.to_owned());
                true
            }
        });
        for _ in 0..before - tag.attributes.len() {
            self.error(XMLParserError::AttributeDuplicated);
        }

        // Les déclarations portées par cet élément entrent en portée
        // avant la résolution de son propre nom.
        let mut frame: NamespaceFrame = vec![];
        for attribute in &tag.attributes {
            if attribute.name == "xmlns" {
                frame.push((None, attribute.value.to_owned()));
            } else if let Some(prefix) =
                attribute.name.strip_prefix("xmlns:")
            {
                frame.push((
                    Some(prefix.to_owned()),
                    attribute.value.to_owned(),
                ));
            }
        }
        self.namespace_frames.push(frame);

        let qname = self.resolve_qname(&tag.name, false);

        let attributes: Vec<Attribute> = tag
            .attributes
            .iter()
            .map(|attribute| {
                let mut resolved = attribute.to_owned();
                if attribute.name.contains(':')
                    && !attribute.name.starts_with("xmlns:")
                {
                    let attribute_qname =
                        self.resolve_qname(&attribute.name, true);
                    resolved.name = attribute_qname.local_name;
                    resolved.prefix = attribute_qname.prefix;
                    resolved.namespace_uri =
                        attribute_qname.namespace_uri;
                }
                resolved
            })
            .collect();

        self.output.push_back(Signal::StartElement {
            name: qname.to_owned(),
            attributes,
        });

        if tag.self_closing {
            self.namespace_frames.pop();
            self.output.push_back(Signal::EndElement { name: qname });
            if self.stack_of_open_elements.is_empty() {
                self.root_closed = true;
            }
        } else {
            self.stack_of_open_elements.push(qname);
        }
    }

    fn process_end_tag(&mut self, tag: XMLTagToken) {
        let matches_entry = |qname: &QName| {
            qname.qualified() == tag.name
        };

        let Some(position) = self
            .stack_of_open_elements
            .iter()
            .rposition(matches_entry)
        else {
            // Aucune balise ouverte de ce nom : le jeton est ignoré.
            self.error(XMLParserError::UnmatchedEndTag);
            return;
        };

        // Une balise de fin qui ne ferme pas le nœud actuel ferme
        // implicitement les éléments intermédiaires, la structure émise
        // restant un arbre bien formé.
        if position != self.stack_of_open_elements.len() - 1 {
            self.error(XMLParserError::UnmatchedEndTag);
        }

        while self.stack_of_open_elements.len() > position {
            let qname = self
                .stack_of_open_elements
                .pop()
                .expect("un élément ouvert");
            self.namespace_frames.pop();
            self.output.push_back(Signal::EndElement { name: qname });
        }

        if self.stack_of_open_elements.is_empty() {
            self.root_closed = true;
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<C> Iterator for XMLParser<C>
where
    C: CodePointIterator,
{
    type Item = Signal;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(signal) = self.output.pop_front() {
                return Some(signal);
            }

            if self.done {
                return None;
            }

            let Some(token) = self.tokenizer.next_token() else {
                self.done = true;
                continue;
            };
            self.location = self.tokenizer.location();
            self.process_token(token);
        }
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use parser::diagnostic::DiagnosticKind;

    use super::*;

    fn parse(input: &'static str) -> Vec<Signal> {
        XMLParser::new(input.chars()).collect()
    }

    fn parse_with_report(
        input: &'static str,
    ) -> (Vec<Signal>, Report) {
        let report = Report::collector();
        let signals = XMLParser::new(input.chars())
            .with_report(report.clone())
            .collect();
        (signals, report)
    }

    #[test]
    fn test_namespace_resolution() {
        let signals = parse("<a xmlns:x=\"u\"><x:b/></a>");

        assert_eq!(
            signals,
            vec![
                Signal::StartElement {
                    name: QName::new("a"),
                    attributes: vec![Attribute::new("xmlns:x", "u")],
                },
                Signal::StartElement {
                    name: QName::new("b")
                        .with_prefix("x")
                        .with_namespace("u"),
                    attributes: vec![],
                },
                Signal::EndElement {
                    name: QName::new("b")
                        .with_prefix("x")
                        .with_namespace("u"),
                },
                Signal::EndElement {
                    name: QName::new("a"),
                },
            ]
        );
    }

    #[test]
    fn test_default_namespace() {
        let signals = parse("<a xmlns=\"u\"><b/></a>");
        assert!(matches!(
            &signals[1],
            Signal::StartElement { name, .. }
                if name.local_name == "b"
                    && name.namespace_uri.as_deref() == Some("u")
        ));
    }

    #[test]
    fn test_mismatched_end_tag_recovery() {
        let (signals, report) = parse_with_report("<a><b></a>");

        assert_eq!(
            signals,
            vec![
                Signal::start(QName::new("a")),
                Signal::start(QName::new("b")),
                Signal::end(QName::new("b")),
                Signal::end(QName::new("a")),
            ]
        );

        assert!(report
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnmatchedEndTag));
    }

    #[test]
    fn test_undeclared_prefix_is_reported() {
        let (signals, report) = parse_with_report("<x:a/>");

        assert!(matches!(
            &signals[0],
            Signal::StartElement { name, .. }
                if name.local_name == "a"
                    && name.namespace_uri.is_none()
        ));
        assert!(report
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::BadNamespace));
    }

    #[test]
    fn test_duplicate_attributes_keep_first() {
        let (signals, report) =
            parse_with_report("<a n=\"1\" n=\"2\"/>");

        assert!(matches!(
            &signals[0],
            Signal::StartElement { attributes, .. }
                if attributes.len() == 1 && attributes[0].value == "1"
        ));
        assert!(report
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::AttributeDuplicated));
    }

    #[test]
    fn test_declaration_and_doctype_signals() {
        let signals = parse(
            "<?xml version=\"1.0\"?><!DOCTYPE a SYSTEM \"a.dtd\"><a/>",
        );

        assert_eq!(
            signals[0],
            Signal::XmlDeclaration {
                version: "1.0".into(),
                encoding: None,
                standalone: None,
            }
        );
        assert!(matches!(&signals[1], Signal::Doctype(doctype)
            if doctype.name.as_deref() == Some("a")
                && doctype.system_identifier.as_deref() == Some("a.dtd")));
    }

    #[test]
    fn test_unclosed_elements_are_closed_at_eof() {
        let (signals, report) = parse_with_report("<a><b>");

        assert_eq!(
            signals
                .iter()
                .filter(|signal| signal.is_end_element())
                .count(),
            2
        );
        assert!(report
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::BadDocument));
    }

    #[test]
    fn test_round_trip_through_the_writer() {
        let original = parse("<a xmlns:x=\"u\"><x:b>t</x:b><c/></a>");
        let bytes =
            crate::writer::XMLWriter::write_all(original.iter().cloned());

        let written = String::from_utf8(bytes).unwrap();
        let reparsed: Vec<Signal> =
            XMLParser::new(written.chars()).collect();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_namespace_goes_out_of_scope() {
        let signals =
            parse("<a><b xmlns:x=\"u\"><x:c/></b><x:d/></a>");

        // `x` est déclaré sur b : résolu pour c, plus pour d.
        assert!(matches!(
            &signals[2],
            Signal::StartElement { name, .. }
                if name.local_name == "c"
                    && name.namespace_uri.as_deref() == Some("u")
        ));
        assert!(signals.iter().any(|signal| matches!(
            signal,
            Signal::StartElement { name, .. }
                if name.local_name == "d" && name.namespace_uri.is_none()
        )));
    }
}
