/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use infra::primitive::{
    codepoint::{CodePoint, CodePointInterface, CodePointIterator},
    location::Location,
};
use parser::{
    diagnostic::{Diagnostic, Report},
    preprocessor::InputStream,
    StreamIteratorInterface,
};

use crate::{
    emit_xml_error,
    error::XMLParserError,
    token::{XMLTagToken, XMLToken},
};

// ---- //
// Type //
// ---- //

pub type XMLInputStream<Chars> = InputStream<Chars>;

// --------- //
// Structure //
// --------- //

/// Le tokenizer XML 1.0 (cinquième édition) : déclaration, doctype (sous-
/// ensemble interne sauté, équilibré sur les crochets), éléments,
/// attributs, CDATA, commentaires, instructions de traitement, références
/// de caractères et les cinq entités générales prédéfinies. Les autres
/// entités générales ne sont pas développées : elles sont signalées puis
/// laissées littérales.
#[derive(Debug)]
pub struct XMLTokenizer<Chars>
where
    Chars: CodePointIterator,
{
    pub(crate) stream: XMLInputStream<Chars>,
    reached_eof: bool,
    report: Report,
}

// -------------- //
// Implémentation //
// -------------- //

impl<C> XMLTokenizer<C>
where
    C: CodePointIterator,
{
    pub fn new(chars: C) -> Self {
        Self {
            stream: XMLInputStream::new(chars),
            reached_eof: false,
            report: Report::default(),
        }
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    pub fn set_report(&mut self, report: Report) {
        self.report = report;
    }

    pub fn location(&self) -> Location {
        self.stream.location()
    }

    pub fn next_token(&mut self) -> Option<XMLToken> {
        self.next()
    }

    fn error(&self, err: XMLParserError) {
        emit_xml_error!(&err);
        self.report.report(Diagnostic::new(
            self.stream.location(),
            err.kind(),
            err.code(),
        ));
    }

    /// Un nom XML : NameStartChar suivi de NameChar*.
    fn scan_name(&mut self) -> Option<String> {
        let first = self.stream.next_input()?;
        if !first.is_xml_name_start_code_point() {
            return None;
        }

        let name: String = self
            .stream
            .advance_as_long_as_possible(
                |ch| ch.is_xml_name_code_point(),
                None,
            )
            .into_iter()
            .collect();
        Some(name)
    }

    fn skip_whitespace(&mut self) -> usize {
        self.stream
            .advance_as_long_as_possible(
                |ch| matches!(ch, ' ' | '\t' | '\n' | '\r'),
                None,
            )
            .len()
    }

    /// Une référence `&...;` : numérique, prédéfinie, ou inconnue (alors
    /// laissée littérale, avec un diagnostic).
    fn scan_reference(&mut self) -> String {
        // Le « & » vient d'être consommé.
        if self.stream.consume_next_input_characters_if_are("#x")
            || self.stream.consume_next_input_characters_if_are("#X")
        {
            let digits: String = self
                .stream
                .advance_as_long_as_possible(
                    |ch| ch.is_ascii_hexdigit(),
                    None,
                )
                .into_iter()
                .collect();
            return self.finish_numeric_reference(&digits, 16);
        }

        if self.stream.consume_next_input_characters_if_are("#") {
            let digits: String = self
                .stream
                .advance_as_long_as_possible(
                    |ch| ch.is_ascii_digit(),
                    None,
                )
                .into_iter()
                .collect();
            return self.finish_numeric_reference(&digits, 10);
        }

        let Some(name) = self.scan_name() else {
            self.error(XMLParserError::UnknownEntity);
            return String::from('&');
        };

        if self.stream.next_input() == Some(';') {
            self.stream.consume_next_input();
        } else {
            self.error(XMLParserError::UnknownEntity);
            return format!("&{name}");
        }

        match name.as_str() {
            | "amp" => String::from('&'),
            | "lt" => String::from('<'),
            | "gt" => String::from('>'),
            | "quot" => String::from('"'),
            | "apos" => String::from('\''),
            | _ => {
                // Les entités générales non prédéfinies ne sont pas
                // développées.
                self.error(XMLParserError::UnknownEntity);
                format!("&{name};")
            }
        }
    }

    fn finish_numeric_reference(
        &mut self,
        digits: &str,
        radix: u32,
    ) -> String {
        let terminated = if self.stream.next_input() == Some(';') {
            self.stream.consume_next_input();
            true
        } else {
            false
        };

        if digits.is_empty() || !terminated {
            self.error(XMLParserError::InvalidCharacterReference);
            return String::from('&');
        }

        u32::from_str_radix(digits, radix)
            .ok()
            .and_then(CodePoint::from_u32)
            .map(String::from)
            .unwrap_or_else(|| {
                self.error(XMLParserError::InvalidCharacterReference);
                String::from(char::REPLACEMENT_CHARACTER)
            })
    }

    /// Le contenu textuel jusqu'au prochain `<`, références résolues.
    fn scan_text(&mut self) -> XMLToken {
        let mut text = String::new();

        loop {
            match self.stream.next_input() {
                | None | Some('<') => break,
                | Some('&') => {
                    self.stream.consume_next_input();
                    text.push_str(&self.scan_reference());
                }
                | Some(_) => {
                    let ch = self
                        .stream
                        .consume_next_input()
                        .expect("le caractère regardé en avance");
                    text.push(ch);
                }
            }
        }

        XMLToken::Text(text)
    }

    /// Tout ce qui commence par `<`.
    fn scan_markup(&mut self) -> XMLToken {
        self.stream.consume_next_input(); // '<'

        if self.stream.consume_next_input_characters_if_are("!--") {
            return self.scan_comment();
        }

        if self.stream.consume_next_input_characters_if_are("![CDATA[")
        {
            return self.scan_cdata_section();
        }

        if self
            .stream
            .consume_next_input_characters_if_are_insensitive("!doctype")
        {
            return self.scan_doctype();
        }

        if self.stream.consume_next_input_characters_if_are("?") {
            return self.scan_processing_instruction();
        }

        if self.stream.consume_next_input_characters_if_are("/") {
            return self.scan_end_tag();
        }

        self.scan_start_tag()
    }

    fn scan_comment(&mut self) -> XMLToken {
        let mut comment = String::new();

        loop {
            if self.stream.consume_next_input_characters_if_are("-->") {
                break;
            }
            match self.stream.consume_next_input() {
                | Some(ch) => comment.push(ch),
                | None => {
                    self.error(XMLParserError::UnexpectedEndOfFile);
                    break;
                }
            }
        }

        XMLToken::Comment(comment)
    }

    fn scan_cdata_section(&mut self) -> XMLToken {
        let mut data = String::new();

        loop {
            if self.stream.consume_next_input_characters_if_are("]]>") {
                break;
            }
            match self.stream.consume_next_input() {
                | Some(ch) => data.push(ch),
                | None => {
                    self.error(XMLParserError::UnexpectedEndOfFile);
                    break;
                }
            }
        }

        XMLToken::CDATA(data)
    }

    /// `<!DOCTYPE name (PUBLIC|SYSTEM ...)? [...]? >` : les identifiants
    /// externes sont analysés, le sous-ensemble interne est sauté en
    /// équilibrant les crochets.
    fn scan_doctype(&mut self) -> XMLToken {
        self.skip_whitespace();

        let name = self.scan_name().unwrap_or_else(|| {
            self.error(XMLParserError::InvalidName);
            String::new()
        });

        self.skip_whitespace();

        let mut public_identifier = None;
        let mut system_identifier = None;

        if self
            .stream
            .consume_next_input_characters_if_are_insensitive("public")
        {
            self.skip_whitespace();
            public_identifier = self.scan_quoted_literal();
            self.skip_whitespace();
            system_identifier = self.scan_quoted_literal();
        } else if self
            .stream
            .consume_next_input_characters_if_are_insensitive("system")
        {
            self.skip_whitespace();
            system_identifier = self.scan_quoted_literal();
        }

        self.skip_whitespace();

        if self.stream.consume_next_input_characters_if_are("[") {
            let mut depth = 1usize;
            loop {
                match self.stream.consume_next_input() {
                    | Some('[') => depth += 1,
                    | Some(']') => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    | Some(_) => {}
                    | None => {
                        self.error(
                            XMLParserError::UnexpectedEndOfFile,
                        );
                        break;
                    }
                }
            }
        }

        self.skip_whitespace();
        if !self.stream.consume_next_input_characters_if_are(">") {
            // Récupération : tout jusqu'au prochain '>' est abandonné.
            self.stream.advance_as_long_as_possible(
                |ch| *ch != '>',
                None,
            );
            self.stream.consume_next_input();
        }

        XMLToken::Doctype {
            name,
            public_identifier,
            system_identifier,
        }
    }

    fn scan_quoted_literal(&mut self) -> Option<String> {
        let quote = self.stream.next_input()?;
        if quote != '"' && quote != '\'' {
            return None;
        }
        self.stream.consume_next_input();

        let literal: String = self
            .stream
            .advance_as_long_as_possible(|ch| *ch != quote, None)
            .into_iter()
            .collect();
        self.stream.consume_next_input(); // guillemet fermant
        Some(literal)
    }

    /// `<?target data?>` ; `<?xml ...?>` devient une déclaration.
    fn scan_processing_instruction(&mut self) -> XMLToken {
        let target = self.scan_name().unwrap_or_else(|| {
            self.error(XMLParserError::InvalidName);
            String::new()
        });

        self.skip_whitespace();

        let mut data = String::new();
        loop {
            if self.stream.consume_next_input_characters_if_are("?>") {
                break;
            }
            match self.stream.consume_next_input() {
                | Some(ch) => data.push(ch),
                | None => {
                    self.error(XMLParserError::UnexpectedEndOfFile);
                    break;
                }
            }
        }

        if target == "xml" {
            return self.declaration_from_pseudo_attributes(&data);
        }

        XMLToken::ProcessingInstruction { target, data }
    }

    /// Les pseudo-attributs version, encoding et standalone de la
    /// déclaration XML.
    fn declaration_from_pseudo_attributes(
        &mut self,
        data: &str,
    ) -> XMLToken {
        fn pseudo_attribute(data: &str, name: &str) -> Option<String> {
            let start = data.find(name)?;
            let rest = data[start + name.len()..].trim_start();
            let rest = rest.strip_prefix('=')?.trim_start();
            let quote = rest.chars().next()?;
            if quote != '"' && quote != '\'' {
                return None;
            }
            rest[1..].split(quote).next().map(str::to_owned)
        }

        let version = pseudo_attribute(data, "version")
            .unwrap_or_else(|| String::from("1.0"));
        let encoding = pseudo_attribute(data, "encoding");
        let standalone = pseudo_attribute(data, "standalone")
            .map(|value| value == "yes");

        XMLToken::Declaration {
            version,
            encoding,
            standalone,
        }
    }

    fn scan_end_tag(&mut self) -> XMLToken {
        let name = self.scan_name().unwrap_or_else(|| {
            self.error(XMLParserError::InvalidName);
            String::new()
        });

        self.skip_whitespace();
        if !self.stream.consume_next_input_characters_if_are(">") {
            self.stream.advance_as_long_as_possible(
                |ch| *ch != '>',
                None,
            );
            self.stream.consume_next_input();
        }

        XMLToken::Tag(XMLTagToken::end(name))
    }

    fn scan_start_tag(&mut self) -> XMLToken {
        let Some(name) = self.scan_name() else {
            // Un `<` isolé : signalé, puis rendu comme du texte.
            self.error(XMLParserError::InvalidName);
            return XMLToken::Text(String::from('<'));
        };

        let mut tag = XMLTagToken::start(name);

        loop {
            self.skip_whitespace();

            match self.stream.next_input() {
                | Some('>') => {
                    self.stream.consume_next_input();
                    break;
                }
                | Some('/') => {
                    self.stream.consume_next_input();
                    if !self
                        .stream
                        .consume_next_input_characters_if_are(">")
                    {
                        self.error(XMLParserError::InvalidName);
                    }
                    tag.self_closing = true;
                    break;
                }
                | None => {
                    self.error(XMLParserError::UnexpectedEndOfFile);
                    break;
                }
                | Some(_) => {
                    if let Some(attribute) = self.scan_attribute() {
                        tag.attributes.push(attribute);
                    } else {
                        // Caractère inattendu dans la balise : abandonné.
                        self.stream.consume_next_input();
                    }
                }
            }
        }

        XMLToken::Tag(tag)
    }

    fn scan_attribute(&mut self) -> Option<parser::signal::Attribute> {
        let name = self.scan_name()?;

        self.skip_whitespace();
        if !self.stream.consume_next_input_characters_if_are("=") {
            // Un attribut sans valeur n'existe pas en XML : récupéré en
            // valeur vide.
            self.error(XMLParserError::InvalidName);
            return Some(parser::signal::Attribute::new(name, ""));
        }
        self.skip_whitespace();

        let quote = match self.stream.next_input() {
            | Some(quote @ ('"' | '\'')) => {
                self.stream.consume_next_input();
                quote
            }
            | _ => {
                self.error(XMLParserError::InvalidName);
                // Valeur non citée : récupérée jusqu'au prochain espace
                // ou fin de balise.
                let value: String = self
                    .stream
                    .advance_as_long_as_possible(
                        |ch| {
                            !matches!(
                                ch,
                                ' ' | '\t' | '\n' | '\r' | '>' | '/'
                            )
                        },
                        None,
                    )
                    .into_iter()
                    .collect();
                return Some(parser::signal::Attribute::new(
                    name, value,
                ));
            }
        };

        let mut value = String::new();
        loop {
            match self.stream.next_input() {
                | Some(ch) if ch == quote => {
                    self.stream.consume_next_input();
                    break;
                }
                | Some('&') => {
                    self.stream.consume_next_input();
                    value.push_str(&self.scan_reference());
                }
                | Some(_) => {
                    let ch = self
                        .stream
                        .consume_next_input()
                        .expect("le caractère regardé en avance");
                    value.push(ch);
                }
                | None => {
                    self.error(XMLParserError::UnexpectedEndOfFile);
                    break;
                }
            }
        }

        Some(parser::signal::Attribute::new(name, value))
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<C> Iterator for XMLTokenizer<C>
where
    C: CodePointIterator,
{
    type Item = XMLToken;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reached_eof {
            return None;
        }

        match self.stream.next_input() {
            | None => {
                self.reached_eof = true;
                Some(XMLToken::EOF)
            }
            | Some('<') => Some(self.scan_markup()),
            | Some(_) => Some(self.scan_text()),
        }
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use parser::signal::Attribute;

    use super::*;

    fn get_tokenizer_xml(
        input: &'static str,
    ) -> XMLTokenizer<impl CodePointIterator> {
        XMLTokenizer::new(input.chars())
    }

    #[test]
    fn test_declaration() {
        let mut tokenizer = get_tokenizer_xml(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
        );
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::Declaration {
                version: "1.0".into(),
                encoding: Some("UTF-8".into()),
                standalone: None,
            })
        );
    }

    #[test]
    fn test_start_tag_with_attributes() {
        let mut tokenizer =
            get_tokenizer_xml("<a xmlns:x=\"u\" n='v'>");
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::Tag(XMLTagToken {
                name: "a".into(),
                attributes: vec![
                    Attribute::new("xmlns:x", "u"),
                    Attribute::new("n", "v"),
                ],
                is_end: false,
                self_closing: false,
            }))
        );
    }

    #[test]
    fn test_self_closing_tag() {
        let mut tokenizer = get_tokenizer_xml("<x:b/>");
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::Tag(XMLTagToken {
                name: "x:b".into(),
                attributes: vec![],
                is_end: false,
                self_closing: true,
            }))
        );
    }

    #[test]
    fn test_predefined_entities_in_text() {
        let mut tokenizer =
            get_tokenizer_xml("<a>&amp;&lt;&#x41;</a>");
        tokenizer.next_token(); // <a>
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::Text("&<A".into()))
        );
    }

    #[test]
    fn test_unknown_entity_stays_literal() {
        let report = Report::collector();
        let mut tokenizer = XMLTokenizer::new("<a>&foo;</a>".chars())
            .with_report(report.clone());

        tokenizer.next_token(); // <a>
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::Text("&foo;".into()))
        );
        assert!(!report.diagnostics().is_empty());
    }

    #[test]
    fn test_cdata_section() {
        let mut tokenizer =
            get_tokenizer_xml("<![CDATA[a < b && c]]>");
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::CDATA("a < b && c".into()))
        );
    }

    #[test]
    fn test_doctype_with_system_identifier() {
        let mut tokenizer = get_tokenizer_xml(
            "<!DOCTYPE greeting SYSTEM \"hello.dtd\">",
        );
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::Doctype {
                name: "greeting".into(),
                public_identifier: None,
                system_identifier: Some("hello.dtd".into()),
            })
        );
    }

    #[test]
    fn test_comment_and_pi() {
        let mut tokenizer =
            get_tokenizer_xml("<!-- c --><?php echo ?>");
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::Comment(" c ".into()))
        );
        assert_eq!(
            tokenizer.next_token(),
            Some(XMLToken::ProcessingInstruction {
                target: "php".into(),
                data: "echo ".into(),
            })
        );
    }
}
