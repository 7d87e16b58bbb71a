/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use infra::{namespace::Namespace, primitive::location::Location};
use parser::{
    diagnostic::{Diagnostic, DiagnosticKind, Report},
    signal::{QName, Signal},
};

// ---- //
// Type //
// ---- //

/// Politique de préfixes du hôte : URI → préfixe souhaité.
pub type PrefixPolicy = Box<dyn Fn(&str) -> Option<String>>;

// --------- //
// Structure //
// --------- //

/// Traduit une séquence de signaux en octets UTF-8. La pile de préfixes
/// d'espaces de noms suit les éléments ouverts ; les URI sans préfixe en
/// portée reçoivent un préfixe synthétisé `ns1`, `ns2`, ... (ou celui que
/// propose la politique du hôte), déclaré sur place.
///
/// Échappements : `<`, `>`, `&`, `"` et `'` dans les valeurs
/// d'attributs ; `<`, `>` et `&` dans le texte. Les sections CDATA ne
/// sont émises que sur demande explicite
/// ([XMLWriter::write_text_as_cdata]).
pub struct XMLWriter {
    output: Vec<u8>,
    open_elements: Vec<String>,
    scope_frames: Vec<Vec<(Option<String>, String)>>,
    synthesized_prefixes: usize,
    /// La balise de début en attente : son `>` n'est écrit qu'au signal
    /// suivant, pour produire `<a/>` sur un élément vide.
    pending_open_tag: bool,
    prefix_policy: Option<PrefixPolicy>,
    report: Report,
}

// -------------- //
// Implémentation //
// -------------- //

impl XMLWriter {
    pub fn new() -> Self {
        Self {
            output: Vec::default(),
            open_elements: Vec::default(),
            scope_frames: vec![vec![(
                Some(String::from("xml")),
                Namespace::XML.uri().to_owned(),
            )]],
            synthesized_prefixes: 0,
            pending_open_tag: false,
            prefix_policy: None,
            report: Report::default(),
        }
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    /// Définit la politique de préfixes du hôte.
    pub fn with_prefix_policy(
        mut self,
        policy: impl Fn(&str) -> Option<String> + 'static,
    ) -> Self {
        self.prefix_policy = Some(Box::new(policy));
        self
    }

    pub fn write_all(
        signals: impl IntoIterator<Item = Signal>,
    ) -> Vec<u8> {
        let mut writer = Self::new();
        for signal in signals {
            writer.write(&signal);
        }
        writer.into_bytes()
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.close_pending_open_tag();
        self.output
    }

    fn close_pending_open_tag(&mut self) {
        if self.pending_open_tag {
            self.output.push(b'>');
            self.pending_open_tag = false;
        }
    }

    /// Le préfixe en portée lié à cette URI, le cas échéant.
    fn prefix_in_scope(&self, uri: &str) -> Option<Option<&str>> {
        for frame in self.scope_frames.iter().rev() {
            for (prefix, bound_uri) in frame.iter().rev() {
                if bound_uri == uri {
                    return Some(prefix.as_deref());
                }
            }
        }
        None
    }

    /// Le nom à écrire pour cette URI et ce nom local ; synthétise et
    /// déclare un préfixe si nécessaire. Renvoie (nom qualifié,
    /// déclaration xmlns à écrire).
    fn written_name(
        &mut self,
        name: &QName,
    ) -> (String, Option<(Option<String>, String)>) {
        let Some(uri) = name.namespace_uri.as_deref() else {
            return (name.local_name.to_owned(), None);
        };

        if let Some(prefix) = self.prefix_in_scope(uri) {
            return match prefix {
                | Some(prefix) => {
                    (format!("{prefix}:{}", name.local_name), None)
                }
                | None => (name.local_name.to_owned(), None),
            };
        }

        // Le préfixe d'origine, la politique du hôte, puis la synthèse.
        let prefix = name
            .prefix
            .to_owned()
            .or_else(|| {
                self.prefix_policy
                    .as_ref()
                    .and_then(|policy| policy(uri))
            })
            .unwrap_or_else(|| {
                self.synthesized_prefixes += 1;
                format!("ns{}", self.synthesized_prefixes)
            });

        let declaration =
            (Some(prefix.to_owned()), uri.to_owned());
        (
            format!("{prefix}:{}", name.local_name),
            Some(declaration),
        )
    }

    pub fn write(&mut self, signal: &Signal) {
        match signal {
            // `<?xml version="1.0" encoding="UTF-8"?>`, seulement si une
            // déclaration a été fournie. La sortie est de l'UTF-8 :
            // l'encodage déclaré l'affirme.
            | Signal::XmlDeclaration { version, .. } => {
                self.close_pending_open_tag();
                self.output.extend_from_slice(
                    format!(
                        "<?xml version=\"{version}\" encoding=\"UTF-8\"?>"
                    )
                    .as_bytes(),
                );
            }

            | Signal::StartElement { name, attributes } => {
                self.close_pending_open_tag();
                self.scope_frames.push(vec![]);

                // Les déclarations portées par les attributs xmlns
                // entrent en portée avant le choix du préfixe.
                for attribute in attributes {
                    if attribute.name == "xmlns" {
                        self.scope_frames
                            .last_mut()
                            .expect("la trame de portée")
                            .push((None, attribute.value.to_owned()));
                    } else if attribute.prefix.as_deref()
                        == Some("xmlns")
                    {
                        self.scope_frames
                            .last_mut()
                            .expect("la trame de portée")
                            .push((
                                Some(attribute.name.to_owned()),
                                attribute.value.to_owned(),
                            ));
                    } else if let Some(prefix) =
                        attribute.name.strip_prefix("xmlns:")
                    {
                        self.scope_frames
                            .last_mut()
                            .expect("la trame de portée")
                            .push((
                                Some(prefix.to_owned()),
                                attribute.value.to_owned(),
                            ));
                    }
                }

                let (written, declaration) = self.written_name(name);

                self.output.push(b'<');
                self.output.extend_from_slice(written.as_bytes());

                // Une liaison nouvelle (synthétisée ou venant de la
                // politique du hôte) est déclarée sur place.
                if let Some(binding) = declaration {
                    if let (Some(prefix), uri) = &binding {
                        self.output.extend_from_slice(
                            format!(" xmlns:{prefix}=\"{uri}\"")
                                .as_bytes(),
                        );
                    }
                    self.scope_frames
                        .last_mut()
                        .expect("la trame de portée")
                        .push(binding);
                }

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

                self.open_elements.push(written);
                self.pending_open_tag = true;
            }

            | Signal::EndElement { name } => {
                let Some(written) = self.open_elements.pop() else {
                    self.refuse_unbalanced_end(name);
                    return;
                };
                self.scope_frames.pop();

                if self.pending_open_tag {
                    // Aucun enfant : `<a/>`.
                    self.output.extend_from_slice(b"/>");
                    self.pending_open_tag = false;
                    return;
                }

                self.output.extend_from_slice(b"</");
                self.output.extend_from_slice(written.as_bytes());
                self.output.push(b'>');
            }

            | Signal::Text { runs } => {
                self.close_pending_open_tag();
                for run in runs {
                    self.write_escaped_text(run);
                }
            }

            | Signal::Comment(comment) => {
                self.close_pending_open_tag();
                self.output.extend_from_slice(b"<!--");
                self.output.extend_from_slice(comment.as_bytes());
                self.output.extend_from_slice(b"-->");
            }

            | Signal::ProcessingInstruction { target, data } => {
                self.close_pending_open_tag();
                self.output.push(b'<');
                self.output.push(b'?');
                self.output.extend_from_slice(target.as_bytes());
                if !data.is_empty() {
                    self.output.push(b' ');
                    self.output.extend_from_slice(data.as_bytes());
                }
                self.output.extend_from_slice(b"?>");
            }

            | Signal::Doctype(doctype) => {
                self.close_pending_open_tag();
                self.output.extend_from_slice(b"<!DOCTYPE");
                if let Some(name) = doctype.name.as_ref() {
                    self.output.push(b' ');
                    self.output.extend_from_slice(name.as_bytes());
                }
                match (
                    doctype.public_identifier.as_ref(),
                    doctype.system_identifier.as_ref(),
                ) {
                    | (Some(public_identifier), maybe_system) => {
                        self.output.extend_from_slice(
                            format!(" PUBLIC \"{public_identifier}\"")
                                .as_bytes(),
                        );
                        if let Some(system_identifier) = maybe_system {
                            self.output.extend_from_slice(
                                format!(" \"{system_identifier}\"")
                                    .as_bytes(),
                            );
                        }
                    }
                    | (None, Some(system_identifier)) => {
                        self.output.extend_from_slice(
                            format!(" SYSTEM \"{system_identifier}\"")
                                .as_bytes(),
                        );
                    }
                    | (None, None) => {}
                }
                self.output.push(b'>');
            }
        }
    }

    /// Une section CDATA, sur demande explicite du hôte. Un `]]>` dans le
    /// contenu scinde la section.
    pub fn write_text_as_cdata(&mut self, text: &str) {
        self.close_pending_open_tag();
        self.output.extend_from_slice(b"<![CDATA[");
        self.output.extend_from_slice(
            text.replace("]]>", "]]]]><![CDATA[>").as_bytes(),
        );
        self.output.extend_from_slice(b"]]>");
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
                | '<' => self.output.extend_from_slice(b"&lt;"),
                | '>' => self.output.extend_from_slice(b"&gt;"),
                | '&' => self.output.extend_from_slice(b"&amp;"),
                | '"' => self.output.extend_from_slice(b"&quot;"),
                | '\'' => self.output.extend_from_slice(b"&apos;"),
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
        crate::emit_xml_error!(&diagnostic);
        self.report.report(diagnostic);
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl Default for XMLWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use parser::signal::Attribute;

    use super::*;

    #[test]
    fn test_declaration_and_empty_element() {
        let signals = vec![
            Signal::XmlDeclaration {
                version: "1.0".into(),
                encoding: None,
                standalone: None,
            },
            Signal::start(QName::new("a")),
            Signal::end(QName::new("a")),
        ];
        let bytes = XMLWriter::write_all(signals);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>"
        );
    }

    #[test]
    fn test_synthesized_prefix_for_unbound_uri() {
        let name = QName::new("b").with_namespace("http://example.org/u");
        let signals = vec![
            Signal::start(QName::new("a")),
            Signal::start(name.to_owned()),
            Signal::end(name),
            Signal::end(QName::new("a")),
        ];
        let bytes = XMLWriter::write_all(signals);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<a><ns1:b xmlns:ns1=\"http://example.org/u\"/></a>"
        );
    }

    #[test]
    fn test_prefix_policy_is_consulted() {
        let name = QName::new("b").with_namespace("http://example.org/u");
        let mut writer = XMLWriter::new()
            .with_prefix_policy(|_uri| Some(String::from("u")));
        writer.write(&Signal::start(name.to_owned()));
        writer.write(&Signal::end(name));
        assert_eq!(
            String::from_utf8(writer.into_bytes()).unwrap(),
            "<u:b xmlns:u=\"http://example.org/u\"/>"
        );
    }

    #[test]
    fn test_escaping() {
        let signals = vec![
            Signal::StartElement {
                name: QName::new("a"),
                attributes: vec![Attribute::new("v", "x<'\"&")],
            },
            Signal::text("1 < 2 & 3"),
            Signal::end(QName::new("a")),
        ];
        let bytes = XMLWriter::write_all(signals);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<a v=\"x&lt;&apos;&quot;&amp;\">1 &lt; 2 &amp; 3</a>"
        );
    }

    #[test]
    fn test_cdata_on_request_only() {
        let mut writer = XMLWriter::new();
        writer.write(&Signal::start(QName::new("a")));
        writer.write_text_as_cdata("a < b");
        writer.write(&Signal::end(QName::new("a")));
        assert_eq!(
            String::from_utf8(writer.into_bytes()).unwrap(),
            "<a><![CDATA[a < b]]></a>"
        );
    }

    #[test]
    fn test_unbalanced_end_element_is_refused() {
        let report = Report::collector();
        let mut writer = XMLWriter::new().with_report(report.clone());
        writer.write(&Signal::end(QName::new("a")));

        assert!(writer.into_bytes().is_empty());
        assert_eq!(
            report.diagnostics()[0].kind,
            DiagnosticKind::BadDocument
        );
    }
}
