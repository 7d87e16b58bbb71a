/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;
use std::{
    fs,
    io::{self, Read},
};

use infra::primitive::{codepoint::CodePoint, location::Location};

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Report},
    stream::{PullStream, StreamError, StreamEvent},
};

// -------- //
// Constant //
// -------- //

/// La détection ne consomme jamais plus que ce préfixe.
const SNIFF_BOUNDARY: usize = 1024;

/// La moitié haute de Windows-1252 (0x80 à 0x9F). La même table sert de
/// table de remplacement aux références de caractères numériques C1 de la
/// spécification HTML. Les positions non assignées se transcodent vers le
/// contrôle C1 de même valeur.
pub const WINDOWS_1252_HIGH: [CodePoint; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}',
    '\u{2026}', '\u{2020}', '\u{2021}', '\u{02C6}', '\u{2030}',
    '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}',
    '\u{008F}', '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}',
    '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}',
    '\u{017E}', '\u{0178}',
];

// --------- //
// Structure //
// --------- //

/// Le flux de points de code qui constitue l'entrée de l'étape de
/// tokenisation sera initialement vu comme un flux d'octets (provenant
/// généralement du réseau ou du système de fichiers local). Les octets
/// codent les caractères réels selon un codage de caractères particulier,
/// utilisé pour décoder les octets en caractères.
#[derive(Debug)]
pub struct ByteStream {
    buffer: Vec<u8>,
}

/// Décode les octets en points de code. Les séquences invalides émettent
/// U+FFFD avec un diagnostic `decoding-error` et le décodage continue.
#[derive(Debug)]
pub struct Decoder {
    bytes: Vec<u8>,
    position: usize,
    encoding: Encoding,
    location: Location,
    report: Report,
}

/// Le résultat de la détection d'encodage.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct Sniffed {
    pub encoding: Encoding,
    /// Octets de BOM à ignorer en tête du flux.
    pub bom_length: usize,
    pub warning: Option<String>,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Be,
    Utf16Le,
    /// Décodé via Windows-1252, comme l'exige la spécification HTML, même
    /// lorsque l'encodage déclaré est Latin-1.
    Latin1,
    Windows1252,
    UsAscii,
}

/// Le type de document attendu, qui oriente la détection d'encodage et
/// son encodage de repli.
#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum DocumentKind {
    HTML,
    XML,
}

// -------------- //
// Implémentation //
// -------------- //

impl ByteStream {
    pub fn new(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Draine une source d'octets. La source est le seul point de
    /// suspension du pipeline, et ses erreurs d'entrée/sortie sont les
    /// seules erreurs terminales : tout le reste est diagnostic.
    pub fn from_pull_stream(
        mut source: PullStream<Vec<u8>>,
    ) -> Result<Self, StreamError> {
        let mut buffer = vec![];
        loop {
            match source.advance() {
                | StreamEvent::Value(chunk) => buffer.extend(chunk),
                | StreamEvent::End => return Ok(Self::new(buffer)),
                | StreamEvent::Failure(err) => return Err(err),
            }
        }
    }

    /// Octets du flux.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Encoding {
    /// Détecte un encodage sur (au plus) les 1024 premiers octets, dans
    /// l'ordre :
    ///   1. un BOM (UTF-8, UTF-16 BE/LE, UTF-32 reconnus) ;
    ///   2. une déclaration XML `<?xml ... encoding="..."?>` si la source
    ///      est déclarée XML ou commence par `3C 3F 78 6D 6C` ;
    ///   3. un `<meta charset>` ou `<meta http-equiv="Content-Type">`
    ///      dans le préfixe borné (HTML seulement) ;
    ///   4. le repli : UTF-8 pour XML, Windows-1252 pour HTML.
    ///
    /// Un BOM l'emporte sur toute déclaration ultérieure.
    pub fn sniff(
        bytes: &[u8],
        kind: DocumentKind,
        scripting: bool,
    ) -> Sniffed {
        let prefix = &bytes[..bytes.len().min(SNIFF_BOUNDARY)];

        // 1. BOM
        if prefix.starts_with(&[0x00, 0x00, 0xFE, 0xFF])
            || prefix.starts_with(&[0xFF, 0xFE, 0x00, 0x00])
        {
            // UTF-32 est reconnu mais non pris en charge : décodage de
            // repli après le BOM.
            return Sniffed {
                encoding: Self::fallback(kind),
                bom_length: 4,
                warning: Some(String::from(
                    "BOM UTF-32 : encodage non pris en charge",
                )),
            };
        }
        if prefix.starts_with(&[0xEF, 0xBB, 0xBF]) {
            return Sniffed::bom(Self::Utf8, 3);
        }
        if prefix.starts_with(&[0xFE, 0xFF]) {
            return Sniffed::bom(Self::Utf16Be, 2);
        }
        if prefix.starts_with(&[0xFF, 0xFE]) {
            return Sniffed::bom(Self::Utf16Le, 2);
        }

        // 2. Déclaration XML
        if kind == DocumentKind::XML || prefix.starts_with(b"<?xml") {
            if let Some(encoding) = sniff_xml_declaration(prefix) {
                return Sniffed::declared(encoding);
            }
        }

        // 3. Pré-scan des <meta>
        if kind == DocumentKind::HTML {
            if let Some(encoding) = prescan_meta(prefix, scripting) {
                return Sniffed::declared(encoding);
            }
        }

        // 4. Repli
        Sniffed::declared(Self::fallback(kind))
    }

    const fn fallback(kind: DocumentKind) -> Self {
        match kind {
            | DocumentKind::HTML => Self::Windows1252,
            | DocumentKind::XML => Self::Utf8,
        }
    }

    /// L'encodage correspondant à une étiquette déclarée, comparée de
    /// manière insensible à la casse ASCII.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        Some(match label.as_str() {
            | "utf-8" | "utf8" | "unicode-1-1-utf-8" => Self::Utf8,
            | "utf-16be" => Self::Utf16Be,
            | "utf-16" | "utf-16le" => Self::Utf16Le,
            | "iso-8859-1" | "latin1" | "l1" | "iso8859-1" => Self::Latin1,
            | "windows-1252" | "cp1252" | "x-cp1252" | "ansi_x3.4-1968" => {
                Self::Windows1252
            }
            | "us-ascii" | "ascii" => Self::UsAscii,
            | _ => return None,
        })
    }

    pub const fn label(self) -> &'static str {
        match self {
            | Self::Utf8 => "utf-8",
            | Self::Utf16Be => "utf-16be",
            | Self::Utf16Le => "utf-16le",
            | Self::Latin1 => "iso-8859-1",
            | Self::Windows1252 => "windows-1252",
            | Self::UsAscii => "us-ascii",
        }
    }
}

impl Decoder {
    /// Décode un flux d'octets avec un encodage imposé : la détection est
    /// court-circuitée, seul un BOM correspondant à l'encodage est
    /// consommé.
    pub fn with_encoding(
        stream: ByteStream,
        encoding: Encoding,
        report: Report,
    ) -> Self {
        let bytes = stream.into_bytes();
        let bom_length = match encoding {
            | Encoding::Utf8 if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) => 3,
            | Encoding::Utf16Be if bytes.starts_with(&[0xFE, 0xFF]) => 2,
            | Encoding::Utf16Le if bytes.starts_with(&[0xFF, 0xFE]) => 2,
            | _ => 0,
        };

        Self {
            bytes,
            position: bom_length,
            encoding,
            location: Location::new(),
            report,
        }
    }

    /// Détecte l'encodage puis décode.
    pub fn sniffed(
        stream: ByteStream,
        kind: DocumentKind,
        scripting: bool,
        report: Report,
    ) -> Self {
        let sniffed = Encoding::sniff(stream.bytes(), kind, scripting);

        if let Some(warning) = sniffed.warning.as_ref() {
            let diagnostic = Diagnostic::new(
                Location::new(),
                DiagnosticKind::DecodingError,
                warning,
            );
            crate::emit_parser_error!(&diagnostic);
            report.report(diagnostic);
        }

        let mut decoder =
            Self::with_encoding(stream, sniffed.encoding, report);
        decoder.position = decoder.position.max(sniffed.bom_length);
        decoder
    }

    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn replacement(&mut self, message: &str) -> CodePoint {
        let diagnostic = Diagnostic::new(
            self.location,
            DiagnosticKind::DecodingError,
            message,
        );
        crate::emit_parser_error!(&diagnostic);
        self.report.report(diagnostic);
        char::REPLACEMENT_CHARACTER
    }

    fn decode_utf8(&mut self) -> CodePoint {
        let first = self.bytes[self.position];
        self.position += 1;

        let (length, mut codepoint, minimum) = match first {
            | 0x00..=0x7F => return first as CodePoint,
            | 0xC2..=0xDF => (1, u32::from(first & 0x1F), 0x80),
            | 0xE0..=0xEF => (2, u32::from(first & 0x0F), 0x800),
            | 0xF0..=0xF4 => (3, u32::from(first & 0x07), 0x1_0000),
            | _ => return self.replacement("octet de tête UTF-8 invalide"),
        };

        for _ in 0..length {
            match self.bytes.get(self.position) {
                // Sous-partie maximale : l'octet fautif n'est pas
                // consommé, il redémarre le décodage.
                | Some(byte) if (0x80..=0xBF).contains(byte) => {
                    codepoint = (codepoint << 6) | u32::from(byte & 0x3F);
                    self.position += 1;
                }
                | _ => {
                    return self
                        .replacement("séquence UTF-8 tronquée");
                }
            }
        }

        if codepoint < minimum {
            return self.replacement("séquence UTF-8 sur-longue");
        }

        match CodePoint::from_u32(codepoint) {
            | Some(ch) => ch,
            | None => self.replacement(
                "substitut ou hors plage dans une séquence UTF-8",
            ),
        }
    }

    fn next_utf16_unit(&mut self) -> Option<u16> {
        let hi = *self.bytes.get(self.position)?;
        let lo = match self.bytes.get(self.position + 1) {
            | Some(&lo) => lo,
            | None => {
                self.position = self.bytes.len();
                return None;
            }
        };
        self.position += 2;

        Some(match self.encoding {
            | Encoding::Utf16Be => u16::from_be_bytes([hi, lo]),
            | _ => u16::from_le_bytes([hi, lo]),
        })
    }

    fn decode_utf16(&mut self) -> CodePoint {
        let remaining = self.bytes.len() - self.position;
        if remaining == 1 {
            self.position = self.bytes.len();
            return self.replacement("octet isolé en fin de flux UTF-16");
        }

        let unit = match self.next_utf16_unit() {
            | Some(unit) => unit,
            | None => return char::REPLACEMENT_CHARACTER,
        };

        match unit {
            // Substitut haut : il doit être suivi d'un substitut bas.
            | 0xD800..=0xDBFF => {
                let saved = self.position;
                match self.next_utf16_unit() {
                    | Some(low @ 0xDC00..=0xDFFF) => {
                        let codepoint = 0x1_0000
                            + ((u32::from(unit) - 0xD800) << 10)
                            + (u32::from(low) - 0xDC00);
                        CodePoint::from_u32(codepoint)
                            .expect("un point de code supplémentaire")
                    }
                    | _ => {
                        self.position = saved;
                        self.replacement("substitut haut isolé")
                    }
                }
            }
            | 0xDC00..=0xDFFF => self.replacement("substitut bas isolé"),
            | _ => CodePoint::from_u32(u32::from(unit))
                .expect("une unité UTF-16 hors substituts"),
        }
    }

    fn decode_single_byte(&mut self) -> CodePoint {
        let byte = self.bytes[self.position];
        self.position += 1;

        match byte {
            | 0x00..=0x7F => byte as CodePoint,
            | 0x80..=0x9F => match self.encoding {
                | Encoding::UsAscii => {
                    self.replacement("octet hors US-ASCII")
                }
                | _ => WINDOWS_1252_HIGH[usize::from(byte - 0x80)],
            },
            | _ => match self.encoding {
                | Encoding::UsAscii => {
                    self.replacement("octet hors US-ASCII")
                }
                | _ => CodePoint::from_u32(u32::from(byte))
                    .expect("un point de code Latin-1"),
            },
        }
    }
}

// -------------- //
// Implémentation // -> Fonctions
// -------------- //

/// Extrait la pseudo-déclaration `encoding="..."` d'une déclaration XML
/// en tête de flux.
fn sniff_xml_declaration(prefix: &[u8]) -> Option<Encoding> {
    if !prefix.starts_with(b"<?xml") {
        return None;
    }

    let end = prefix.iter().position(|&b| b == b'>')?;
    let declaration = String::from_utf8_lossy(&prefix[..end]);

    let start = declaration.find("encoding")?;
    let rest = &declaration[start + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();

    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }

    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Encoding::from_label(&rest[..end])
}

/// Le pré-scan des balises `<meta>` de la spécification HTML, borné au
/// préfixe fourni. Les commentaires sont sautés ; les `<meta>` situés
/// dans un `<noscript>` sont ignorés lorsque le scripting est actif.
fn prescan_meta(prefix: &[u8], scripting: bool) -> Option<Encoding> {
    let lower = prefix.to_ascii_lowercase();
    let mut position = 0;
    let mut noscript_depth = 0usize;

    while position < lower.len() {
        if lower[position..].starts_with(b"<!--") {
            match find_subslice(&lower[position..], b"-->") {
                | Some(offset) => position += offset + 3,
                | None => return None,
            }
            continue;
        }

        if lower[position..].starts_with(b"<noscript") && scripting {
            noscript_depth += 1;
            position += "<noscript".len();
            continue;
        }
        if lower[position..].starts_with(b"</noscript") {
            noscript_depth = noscript_depth.saturating_sub(1);
            position += "</noscript".len();
            continue;
        }

        if lower[position..].starts_with(b"<meta")
            && matches!(
                lower.get(position + 5),
                Some(b' ' | b'\t' | b'\n' | b'\x0C' | b'\r' | b'/')
            )
        {
            let end = find_subslice(&lower[position..], b">")
                .map(|offset| position + offset)?;
            let tag =
                String::from_utf8_lossy(&lower[position..end]).into_owned();
            position = end + 1;

            if noscript_depth > 0 {
                continue;
            }

            if let Some(encoding) = meta_encoding(&tag) {
                return Some(encoding);
            }
            continue;
        }

        position += 1;
    }

    None
}

/// L'encodage déclaré par une balise `<meta ...>` (déjà en minuscules) :
/// attribut `charset`, ou `http-equiv="content-type"` accompagné d'un
/// `charset=` dans `content`.
fn meta_encoding(tag: &str) -> Option<Encoding> {
    let charset = attribute_value(tag, "charset").or_else(|| {
        let http_equiv = attribute_value(tag, "http-equiv")?;
        if http_equiv.trim() != "content-type" {
            return None;
        }
        let content = attribute_value(tag, "content")?;
        let start = content.find("charset=")?;
        let value = content[start + "charset=".len()..]
            .trim_start_matches(['"', '\''])
            .split([';', '"', '\'', ' '])
            .next()?;
        Some(value.to_owned())
    })?;

    let encoding = Encoding::from_label(&charset)?;

    // Un document ne peut pas déclarer UTF-16 depuis son propre contenu
    // ASCII-compatible : la spécification impose UTF-8 dans ce cas.
    Some(match encoding {
        | Encoding::Utf16Be | Encoding::Utf16Le => Encoding::Utf8,
        | encoding => encoding,
    })
}

fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let mut search = 0;
    loop {
        let start = tag[search..].find(name)? + search;

        // Le nom doit être précédé d'un séparateur de balise.
        let before = tag[..start].chars().last();
        if !matches!(before, Some(' ' | '\t' | '\n' | '\x0C' | '\r' | '/'))
        {
            search = start + name.len();
            continue;
        }

        let rest = tag[start + name.len()..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            search = start + name.len();
            continue;
        };
        let rest = rest.trim_start();

        let mut chars = rest.chars();
        return Some(match chars.next() {
            | Some(quote @ ('"' | '\'')) => {
                chars.as_str().split(quote).next()?.to_owned()
            }
            | Some(_) => rest
                .split([' ', '\t', '\n', '\x0C', '\r', '/', '>'])
                .next()?
                .to_owned(),
            | None => return None,
        });
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl Sniffed {
    const fn bom(encoding: Encoding, bom_length: usize) -> Self {
        Self {
            encoding,
            bom_length,
            warning: None,
        }
    }

    const fn declared(encoding: Encoding) -> Self {
        Self {
            encoding,
            bom_length: 0,
            warning: None,
        }
    }
}

impl fmt::Display for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.buffer))
    }
}

impl From<&[u8]> for ByteStream {
    /// Crée un nouveau [ByteStream] à partir d'octets (provenant du
    /// réseau/fichier).
    fn from(buf_bytes: &[u8]) -> Self {
        Self::new(buf_bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ByteStream {
    fn from(buf_bytes: &[u8; N]) -> Self {
        Self::new(buf_bytes.to_vec())
    }
}

impl From<Vec<u8>> for ByteStream {
    fn from(buffer: Vec<u8>) -> Self {
        Self::new(buffer)
    }
}

impl From<&str> for ByteStream {
    /// Les chaînes de caractères slices sont toujours valides UTF-8.
    fn from(slice_str: &str) -> Self {
        Self::new(slice_str.as_bytes().to_vec())
    }
}

impl TryFrom<fs::File> for ByteStream {
    type Error = io::Error;

    fn try_from(mut file: fs::File) -> Result<Self, Self::Error> {
        let mut buffer = vec![];
        file.read_to_end(&mut buffer)?;
        Ok(Self::new(buffer))
    }
}

impl Iterator for Decoder {
    type Item = CodePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.bytes.len() {
            return None;
        }

        let ch = match self.encoding {
            | Encoding::Utf8 => self.decode_utf8(),
            | Encoding::Utf16Be | Encoding::Utf16Le => self.decode_utf16(),
            | Encoding::Latin1
            | Encoding::Windows1252
            | Encoding::UsAscii => self.decode_single_byte(),
        };

        self.location.advance(ch);
        Some(ch)
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8], encoding: Encoding) -> String {
        Decoder::with_encoding(
            ByteStream::from(bytes),
            encoding,
            Report::default(),
        )
        .collect()
    }

    #[test]
    fn test_bom_wins_over_meta() {
        let mut bytes = vec![0xFE, 0xFF];
        for ch in "<meta charset=\"windows-1252\">".chars() {
            bytes.push(0x00);
            bytes.push(ch as u8);
        }

        let sniffed =
            Encoding::sniff(&bytes, DocumentKind::HTML, true);
        assert_eq!(sniffed.encoding, Encoding::Utf16Be);
        assert_eq!(sniffed.bom_length, 2);
    }

    #[test]
    fn test_sniff_xml_declaration() {
        let sniffed = Encoding::sniff(
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a/>",
            DocumentKind::XML,
            false,
        );
        assert_eq!(sniffed.encoding, Encoding::Latin1);
    }

    #[test]
    fn test_sniff_meta_charset() {
        let sniffed = Encoding::sniff(
            b"<!DOCTYPE html><html><head><meta charset=utf-8></head>",
            DocumentKind::HTML,
            true,
        );
        assert_eq!(sniffed.encoding, Encoding::Utf8);
    }

    #[test]
    fn test_sniff_meta_content_type() {
        let sniffed = Encoding::sniff(
            b"<meta http-equiv=\"Content-Type\" \
              content=\"text/html; charset=windows-1252\">",
            DocumentKind::HTML,
            true,
        );
        assert_eq!(sniffed.encoding, Encoding::Windows1252);
    }

    #[test]
    fn test_meta_inside_noscript_with_scripting() {
        let sniffed = Encoding::sniff(
            b"<noscript><meta charset=utf-8></noscript>",
            DocumentKind::HTML,
            true,
        );
        assert_eq!(sniffed.encoding, Encoding::Windows1252);

        let sniffed = Encoding::sniff(
            b"<noscript><meta charset=utf-8></noscript>",
            DocumentKind::HTML,
            false,
        );
        assert_eq!(sniffed.encoding, Encoding::Utf8);
    }

    #[test]
    fn test_fallback_per_document_kind() {
        let sniffed = Encoding::sniff(b"hello", DocumentKind::HTML, true);
        assert_eq!(sniffed.encoding, Encoding::Windows1252);
        let sniffed = Encoding::sniff(b"<a/>", DocumentKind::XML, false);
        assert_eq!(sniffed.encoding, Encoding::Utf8);
    }

    #[test]
    fn test_decode_windows_1252_high_half() {
        assert_eq!(decode(&[0x80, 0x99], Encoding::Windows1252), "€™");
        // Latin-1 promeut la plage 0x80-0x9F via la table Windows-1252.
        assert_eq!(decode(&[0x80], Encoding::Latin1), "€");
        assert_eq!(decode(&[0xE9], Encoding::Latin1), "é");
    }

    #[test]
    fn test_decode_invalid_utf8_replaces() {
        let report = Report::collector();
        let decoded: String = Decoder::with_encoding(
            ByteStream::from(&[b'a', 0xC3, b'b'][..]),
            Encoding::Utf8,
            report.clone(),
        )
        .collect();

        assert_eq!(decoded, "a\u{FFFD}b");
        assert_eq!(report.diagnostics().len(), 1);
        assert_eq!(
            report.diagnostics()[0].kind,
            DiagnosticKind::DecodingError
        );
    }

    #[test]
    fn test_decode_utf16_surrogate_pair() {
        // U+1D11E MUSICAL SYMBOL G CLEF en UTF-16 BE.
        let decoded =
            decode(&[0xD8, 0x34, 0xDD, 0x1E], Encoding::Utf16Be);
        assert_eq!(decoded, "\u{1D11E}");
    }

    #[test]
    fn test_decode_us_ascii_rejects_high_bytes() {
        assert_eq!(decode(&[b'a', 0xE9], Encoding::UsAscii), "a\u{FFFD}");
    }

    #[test]
    fn test_byte_stream_from_pull_stream() {
        let source = PullStream::of(vec![
            b"<p>".to_vec(),
            b"ok</p>".to_vec(),
        ]);
        let stream = ByteStream::from_pull_stream(source).unwrap();
        assert_eq!(stream.bytes(), b"<p>ok</p>");

        let mut failed = false;
        let source = PullStream::from_fn(move || {
            if failed {
                StreamEvent::Failure(StreamError::new("connexion rompue"))
            } else {
                failed = true;
                StreamEvent::Value(b"<p>".to_vec())
            }
        });
        assert!(ByteStream::from_pull_stream(source).is_err());
    }
}
