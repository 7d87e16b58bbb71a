/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use infra::primitive::location::Location;
use parser::{
    diagnostic::{Diagnostic, DiagnosticKind, Report},
    signal::{QName, Signal},
};

use crate::elements::{tag_names, IsOneOfTagsInterface};

// --------- //
// Structure //
// --------- //

/// Traduit une séquence de signaux en octets UTF-8 :
///   - `<`, `>` et `&` dans le texte deviennent `&lt;`, `&gt;`, `&amp;` ;
///   - `"` dans les valeurs d'attributs devient `&quot;` ;
///   - le contenu des éléments de texte brut (script, style, ...) est
///     émis tel quel ;
///   - les éléments vides sont émis sans balise de fin ni `/>` ;
///   - les valeurs d'attributs sont entre guillemets doubles.
///
/// Un [EndElement](Signal::EndElement) non apparié est refusé, avec un
/// diagnostic.
#[derive(Debug)]
pub struct HTMLWriter {
    output: Vec<u8>,
    open_elements: Vec<QName>,
    /// Profondeur d'imbrication dans des éléments de texte brut.
    raw_text_depth: usize,
    report: Report,
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLWriter {
    pub fn new() -> Self {
        Self {
            output: Vec::default(),
            open_elements: Vec::default(),
            raw_text_depth: 0,
            report: Report::default(),
        }
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    /// Sérialise une séquence de signaux complète.
    pub fn write_all(
        signals: impl IntoIterator<Item = Signal>,
    ) -> Vec<u8> {
        let mut writer = Self::new();
        for signal in signals {
            writer.write(&signal);
        }
        writer.into_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.output
    }

    pub fn write(&mut self, signal: &Signal) {
        match signal {
            | Signal::StartElement { name, attributes } => {
                self.output.push(b'<');
                self.output.extend_from_slice(
                    name.qualified().as_bytes(),
                );

                for attribute in attributes {
                    self.output.push(b' ');
                    let attribute_name = match attribute.prefix.as_ref()
                    {
                        | Some(prefix) => {
                            format!("{prefix}:{}", attribute.name)
                        }
                        | None => attribute.name.to_owned(),
                    };
                    self.output
                        .extend_from_slice(attribute_name.as_bytes());
                    self.output.extend_from_slice(b"=\"");
                    self.write_escaped_attribute_value(
                        &attribute.value,
                    );
                    self.output.push(b'"');
                }

                self.output.push(b'>');

                if Self::is_void(name) {
                    // Pas de balise de fin : le EndElement apparié sera
                    // passé sous silence.
                    self.open_elements.push(name.to_owned());
                    return;
                }

                if Self::is_raw_text(name) {
                    self.raw_text_depth += 1;
                }
                self.open_elements.push(name.to_owned());
            }

            | Signal::EndElement { name } => {
                let Some(opened) = self.open_elements.pop() else {
                    self.refuse_unbalanced_end(name);
                    return;
                };

                if Self::is_raw_text(&opened) {
                    self.raw_text_depth -= 1;
                }

                if Self::is_void(&opened) {
                    return;
                }

                self.output.extend_from_slice(b"</");
                self.output.extend_from_slice(
                    opened.qualified().as_bytes(),
                );
                self.output.push(b'>');
            }

            | Signal::Text { runs } => {
                for run in runs {
                    if self.raw_text_depth > 0 {
                        self.output.extend_from_slice(run.as_bytes());
                    } else {
                        self.write_escaped_text(run);
                    }
                }
            }

            | Signal::Comment(comment) => {
                self.output.extend_from_slice(b"<!--");
                self.output.extend_from_slice(comment.as_bytes());
                self.output.extend_from_slice(b"-->");
            }

            | Signal::ProcessingInstruction { target, data } => {
                self.output.push(b'<');
                self.output.push(b'?');
                self.output.extend_from_slice(target.as_bytes());
                if !data.is_empty() {
                    self.output.push(b' ');
                    self.output.extend_from_slice(data.as_bytes());
                }
                self.output.push(b'>');
            }

            | Signal::Doctype(doctype) => {
                self.output.extend_from_slice(b"<!DOCTYPE");
                if let Some(name) = doctype.name.as_ref() {
                    self.output.push(b' ');
                    self.output.extend_from_slice(name.as_bytes());
                }
                if let Some(public_identifier) =
                    doctype.public_identifier.as_ref()
                {
                    self.output.extend_from_slice(b" PUBLIC \"");
                    self.output.extend_from_slice(
                        public_identifier.as_bytes(),
                    );
                    self.output.push(b'"');

                    if let Some(system_identifier) =
                        doctype.system_identifier.as_ref()
                    {
                        self.output.push(b' ');
                        self.output.push(b'"');
                        self.output.extend_from_slice(
                            system_identifier.as_bytes(),
                        );
                        self.output.push(b'"');
                    }
                } else if let Some(system_identifier) =
                    doctype.system_identifier.as_ref()
                {
                    self.output.extend_from_slice(b" SYSTEM \"");
                    self.output.extend_from_slice(
                        system_identifier.as_bytes(),
                    );
                    self.output.push(b'"');
                }
                self.output.push(b'>');
            }

            // Une déclaration XML n'a pas de sens dans un document HTML.
            | Signal::XmlDeclaration { .. } => {
                self.report.report(Diagnostic::new(
                    Location::new(),
                    DiagnosticKind::BadContent,
                    "déclaration XML dans une sortie HTML",
                ));
            }
        }
    }

    fn write_escaped_text(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                | '<' => self.output.extend_from_slice(b"&lt;"),
                | '>' => self.output.extend_from_slice(b"&gt;"),
                | '&' => self.output.extend_from_slice(b"&amp;"),
                | ch => {
                    let mut buffer = [0u8; 4];
                    self.output.extend_from_slice(
                        ch.encode_utf8(&mut buffer).as_bytes(),
                    );
                }
            }
        }
    }

    fn write_escaped_attribute_value(&mut self, value: &str) {
        for ch in value.chars() {
            match ch {
                | '"' => self.output.extend_from_slice(b"&quot;"),
                | '&' => self.output.extend_from_slice(b"&amp;"),
                | ch => {
                    let mut buffer = [0u8; 4];
                    self.output.extend_from_slice(
                        ch.encode_utf8(&mut buffer).as_bytes(),
                    );
                }
            }
        }
    }

    fn refuse_unbalanced_end(&self, name: &QName) {
        let diagnostic = Diagnostic::new(
            Location::new(),
            DiagnosticKind::BadDocument,
            format!("balise de fin non appariée : {name}"),
        );
        crate::emit_html_error!(&diagnostic);
        self.report.report(diagnostic);
    }

    fn is_void(name: &QName) -> bool {
        Self::is_html(name)
            && name
                .local_name
                .as_str()
                .is_one_of(tag_names::VOID_ELEMENTS)
    }

    fn is_raw_text(name: &QName) -> bool {
        Self::is_html(name)
            && name
                .local_name
                .as_str()
                .is_one_of(tag_names::RAW_TEXT_ELEMENTS)
    }

    fn is_html(name: &QName) -> bool {
        match name.namespace_uri.as_deref() {
            | Some(uri) => uri == infra::namespace::Namespace::HTML.uri(),
            | None => true,
        }
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl Default for HTMLWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use parser::signal::{Attribute, QName};

    use super::*;

    fn start(name: &str) -> Signal {
        Signal::start(QName::new(name))
    }

    fn end(name: &str) -> Signal {
        Signal::end(QName::new(name))
    }

    #[test]
    fn test_escaping_in_text_and_attributes() {
        let signals = vec![
            Signal::StartElement {
                name: QName::new("p"),
                attributes: vec![Attribute::new("title", "a\"b&c")],
            },
            Signal::text("1 < 2 & 3 > 2"),
            end("p"),
        ];

        let bytes = HTMLWriter::write_all(signals);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<p title=\"a&quot;b&amp;c\">1 &lt; 2 &amp; 3 &gt; 2</p>"
        );
    }

    #[test]
    fn test_void_element_without_end_tag() {
        let signals =
            vec![start("p"), start("br"), end("br"), end("p")];
        let bytes = HTMLWriter::write_all(signals);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<p><br></p>"
        );
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        let signals = vec![
            start("script"),
            Signal::text("if (a < b) { c(); }"),
            end("script"),
        ];
        let bytes = HTMLWriter::write_all(signals);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<script>if (a < b) { c(); }</script>"
        );
    }

    #[test]
    fn test_unbalanced_end_element_is_refused() {
        let report = Report::collector();
        let mut writer =
            HTMLWriter::new().with_report(report.clone());
        writer.write(&end("div"));

        assert!(writer.into_bytes().is_empty());
        assert_eq!(
            report.diagnostics()[0].kind,
            DiagnosticKind::BadDocument
        );
    }

    #[test]
    fn test_doctype() {
        let signals = vec![Signal::Doctype(
            parser::signal::DoctypeData {
                name: Some("html".into()),
                ..Default::default()
            },
        )];
        let bytes = HTMLWriter::write_all(signals);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<!DOCTYPE html>"
        );
    }
}
