/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::{borrow::Cow, collections::VecDeque};

use infra::primitive::{
    codepoint::{CodePoint, CodePointIterator},
    location::Location,
};
use parser::{
    diagnostic::{Diagnostic, Report},
    preprocessor::InputStream,
    StreamIteratorInterface,
};

use super::{state::State, token::HTMLTagToken, HTMLToken};
use crate::{emit_html_error, error::HTMLParserError};

// ---- //
// Type //
// ---- //

pub type HTMLInputStream<Chars> = InputStream<Chars>;

pub(crate) type HTMLTokenizerProcessResult = Result<
    HTMLTokenizerProcessControlFlow,
    (HTMLParserError, HTMLTokenizerProcessControlFlow),
>;

// --------- //
// Interface //
// --------- //

pub(crate) trait HTMLTokenizerProcessInterface {
    fn ignore(&self) -> HTMLTokenizerProcessResult {
        Ok(HTMLTokenizerProcessControlFlow::Continue)
    }

    fn and_continue(&self) -> HTMLTokenizerProcessResult {
        Ok(HTMLTokenizerProcessControlFlow::Continue)
    }

    fn and_continue_with_error(
        &self,
        err: &str,
    ) -> HTMLTokenizerProcessResult {
        let err = err.parse().expect("Un code d'erreur du tableau");
        Err((err, HTMLTokenizerProcessControlFlow::Continue))
    }

    fn and_emit(&self) -> HTMLTokenizerProcessResult {
        Ok(HTMLTokenizerProcessControlFlow::Emit)
    }

    fn and_emit_with_error(
        &self,
        err: &str,
    ) -> HTMLTokenizerProcessResult {
        let err = err.parse().expect("Un code d'erreur du tableau");
        Err((err, HTMLTokenizerProcessControlFlow::Emit))
    }
}

pub(crate) enum HTMLTokenizerProcessControlFlow {
    Continue,
    Emit,
}

// --------- //
// Structure //
// --------- //

#[derive(Debug)]
pub struct HTMLTokenizer<Chars>
where
    Chars: CodePointIterator,
{
    pub(crate) stream: HTMLInputStream<Chars>,

    /// Le jeton courant, en cours de constitution.
    pub(crate) token: Option<HTMLToken>,

    pub(crate) state: HTMLTokenizerState,

    /// La sortie de l'étape de tokenisation est une série de zéro ou
    /// plusieurs jetons.
    output_tokens: VecDeque<HTMLToken>,

    /// Certains états utilisent un tampon temporaire pour suivre leur
    /// progression.
    pub(crate) temporary_buffer: String,

    /// Code de la référence de caractère numérique en cours.
    pub(crate) character_reference_code: u32,

    /// Le nom de la dernière balise de début émise, pour décider si une
    /// balise de fin est « appropriée ».
    last_start_tag: Option<String>,

    /// Réglé par l'analyseur entre deux jetons : les sections CDATA ne
    /// sont permises que lorsque le nœud courant ajusté est dans un
    /// espace de noms étranger.
    cdata_allowed: bool,

    pub(crate) report: Report,
}

#[derive(Debug)]
#[derive(Clone)]
pub struct HTMLTokenizerState {
    /// L'état courant.
    current: State,
    /// [L'état de référence du caractère](State::CharacterReference)
    /// utilise un état de retour pour revenir à l'état depuis lequel il a
    /// été invoqué.
    returns: Option<State>,
}

// -------------- //
// Implémentation //
// -------------- //

impl<C> HTMLTokenizer<C>
where
    C: CodePointIterator,
{
    pub fn new(chars: C) -> Self {
        Self {
            stream: HTMLInputStream::new(chars),
            token: None,
            state: HTMLTokenizerState::default(),
            output_tokens: VecDeque::default(),
            temporary_buffer: String::default(),
            character_reference_code: 0,
            last_start_tag: None,
            cdata_allowed: false,
            report: Report::default(),
        }
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    /// Le jeton suivant.
    pub fn next_token(&mut self) -> Option<HTMLToken> {
        self.next()
    }

    /// L'emplacement de la dernière entrée consommée du flux.
    pub fn location(&self) -> Location {
        self.stream.location()
    }

    /// Appelé par l'analyseur entre deux jetons, selon l'espace de noms
    /// du nœud courant ajusté.
    pub fn set_cdata_allowed(&mut self, allowed: bool) {
        self.cdata_allowed = allowed;
    }

    /// Pour l'analyse de fragments : la « dernière balise de début » du
    /// tokenizer est le nom de l'élément de contexte.
    pub fn set_last_start_tag(&mut self, name: impl ToString) {
        self.last_start_tag = Some(name.to_string());
    }

    pub(crate) const fn is_cdata_allowed(&self) -> bool {
        self.cdata_allowed
    }

    /// Change l'état du jeton courant via une fonction de retour.
    pub(crate) fn change_current_token<F: FnOnce(&mut HTMLToken)>(
        &mut self,
        callback: F,
    ) -> &mut Self {
        if let Some(ref mut token) = self.token {
            callback(token);
        }
        self
    }

    /// Remplace le jeton courant par un nouveau jeton.
    pub(crate) fn set_token(&mut self, new_token: HTMLToken) -> &mut Self {
        self.token.replace(new_token);
        self
    }

    /// Place le jeton courant dans la file de sortie, après les
    /// vérifications d'émission (attributs dupliqués, drapeaux d'une
    /// balise de fin, dernière balise de début émise).
    fn take_current_token_to_output(&mut self) {
        let Some(mut token) = self.token.take() else {
            return;
        };

        if let HTMLToken::Tag(ref mut tag) = token {
            let duplicates = tag.deduplicate_attributes();
            for _ in 0..duplicates {
                self.process_error(
                    "duplicate-attribute"
                        .parse()
                        .expect("Un code d'erreur du tableau"),
                );
            }

            if tag.is_end {
                if !tag.attributes.is_empty() {
                    self.process_error(
                        HTMLParserError::EndTagWithAttributes,
                    );
                }
                if tag.self_closing_flag {
                    self.process_error(
                        HTMLParserError::EndTagWithTrailingSolidus,
                    );
                }
            } else {
                self.last_start_tag = Some(tag.name.to_owned());
            }
        }

        self.output_tokens.push_back(token);
    }

    /// Émet un jeton sans passer par le jeton courant.
    pub(crate) fn emit_token(&mut self, token: HTMLToken) -> &mut Self {
        self.output_tokens.push_back(token);
        self
    }

    /// Émet chaque caractère du tampon temporaire.
    pub(crate) fn emit_each_characters_of_temporary_buffer(
        &mut self,
    ) -> &mut Self {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        buffer.chars().for_each(|ch| {
            self.output_tokens.push_back(HTMLToken::Character(ch));
        });
        self
    }

    /// Lorsqu'un état indique de reprendre (re-consommer) le caractère
    /// courant dans un état spécifié, cela signifie passer à cet état,
    /// mais lorsqu'il tentera de consommer le prochain caractère, lui
    /// fournir le caractère actuel à la place.
    pub(crate) fn reconsume(&mut self, state: &str) -> &mut Self {
        self.stream.reconsume_current_input();
        self.switch_state_to(state);
        self
    }

    pub(crate) fn switch_state_to(
        &mut self,
        state: impl AsRef<str>,
    ) -> &mut Self {
        self.state.switch_to(state.as_ref());
        self
    }

    pub(crate) fn set_return_state_to(
        &mut self,
        state: impl AsRef<str>,
    ) -> &mut Self {
        self.state.set_return(state.as_ref());
        self
    }

    pub(crate) fn set_temporary_buffer(
        &mut self,
        temporary_buffer: String,
    ) -> &mut Self {
        self.temporary_buffer = temporary_buffer;
        self
    }

    pub(crate) fn append_character_to_temporary_buffer(
        &mut self,
        ch: CodePoint,
    ) -> &mut Self {
        self.temporary_buffer.push(ch);
        self
    }

    /// Vide les points de code consommés comme référence de caractère :
    /// vers la valeur d'attribut en cours si la référence a été atteinte
    /// depuis un état de valeur d'attribut, vers la sortie sinon.
    pub(crate) fn flush_temporary_buffer(&mut self) -> &mut Self {
        if self.state.is_character_of_attribute() {
            let buffer = std::mem::take(&mut self.temporary_buffer);
            buffer.chars().for_each(|ch| {
                self.change_current_token(|token| {
                    token
                        .as_tag_mut()
                        .append_character_to_attribute_value(ch);
                });
            });
        } else {
            self.emit_each_characters_of_temporary_buffer();
        }
        self
    }

    /// Un jeton `end-tag` approprié est un jeton de `end-tag` dont le nom
    /// de balise correspond au nom de la dernière balise de début qui a
    /// été émise par ce tokenizer, le cas échéant.
    pub(crate) fn is_appropriate_end_tag(&self) -> bool {
        if let (
            Some(HTMLToken::Tag(HTMLTagToken {
                name, is_end: true, ..
            })),
            Some(last_start_tag_name),
        ) = (self.token.as_ref(), self.last_start_tag.as_ref())
        {
            name == last_start_tag_name
        } else {
            false
        }
    }

    fn process_error(&mut self, err: HTMLParserError) {
        emit_html_error!(&err);
        self.report.report(Diagnostic::new(
            self.stream.location(),
            err.kind(),
            err.code(),
        ));
    }
}

impl HTMLTokenizerState {
    pub(crate) const fn current(&self) -> State {
        self.current
    }

    /// Change l'état actuel par un nouvel état. Terme `switch_to` venant
    /// de la spécification HTML : « Switch to the ... state ».
    fn switch_to(&mut self, state: &str) {
        let to: Cow<str> = if state == "return-state" {
            Cow::from(
                self.returns
                    .expect("L'état de retour")
                    .to_string(),
            )
        } else {
            Cow::from(state)
        };

        self.current = to.parse().expect("Un état de tokenisation");
    }

    /// Change l'état de retour par un nouvel état. Terme `set_return`
    /// venant de la spécification HTML : « Set the return state to ... ».
    fn set_return(&mut self, state: &str) {
        self.returns =
            Some(state.parse().expect("Un état de tokenisation"));
    }

    pub(crate) const fn is_character_of_attribute(&self) -> bool {
        matches!(
            self.returns,
            Some(State::AttributeValueDoubleQuoted)
                | Some(State::AttributeValueSingleQuoted)
                | Some(State::AttributeValueUnquoted)
        )
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl<C> HTMLTokenizerProcessInterface for HTMLTokenizer<C> where
    C: CodePointIterator
{
}

impl<C> Iterator for HTMLTokenizer<C>
where
    C: CodePointIterator,
{
    type Item = HTMLToken;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.output_tokens.pop_front() {
                return Some(token);
            }

            let result = match self.state.current() {
                | State::Data => self.handle_data_state(),
                | State::RCDATA => self.handle_rcdata_state(),
                | State::RAWTEXT => self.handle_rawtext_state(),
                | State::ScriptData => self.handle_script_data_state(),
                | State::PLAINTEXT => self.handle_plaintext_state(),
                | State::TagOpen => self.handle_tag_open_state(),
                | State::EndTagOpen => self.handle_end_tag_open_state(),
                | State::TagName => self.handle_tag_name_state(),
                | State::RCDATALessThanSign => {
                    self.handle_rcdata_less_than_sign_state()
                }
                | State::RCDATAEndTagOpen => {
                    self.handle_rcdata_end_tag_open_state()
                }
                | State::RCDATAEndTagName => {
                    self.handle_rcdata_end_tag_name_state()
                }
                | State::RAWTEXTLessThanSign => {
                    self.handle_rawtext_less_than_sign_state()
                }
                | State::RAWTEXTEndTagOpen => {
                    self.handle_rawtext_end_tag_open_state()
                }
                | State::RAWTEXTEndTagName => {
                    self.handle_rawtext_end_tag_name_state()
                }
                | State::ScriptDataLessThanSign => {
                    self.handle_script_data_less_than_sign_state()
                }
                | State::ScriptDataEndTagOpen => {
                    self.handle_script_data_end_tag_open_state()
                }
                | State::ScriptDataEndTagName => {
                    self.handle_script_data_end_tag_name_state()
                }
                | State::ScriptDataEscapeStart => {
                    self.handle_script_data_escape_start_state()
                }
                | State::ScriptDataEscapeStartDash => {
                    self.handle_script_data_escape_start_dash_state()
                }
                | State::ScriptDataEscaped => {
                    self.handle_script_data_escaped_state()
                }
                | State::ScriptDataEscapedDash => {
                    self.handle_script_data_escaped_dash_state()
                }
                | State::ScriptDataEscapedDashDash => {
                    self.handle_script_data_escaped_dash_dash_state()
                }
                | State::ScriptDataEscapedLessThanSign => {
                    self.handle_script_data_escaped_less_than_sign_state()
                }
                | State::ScriptDataEscapedEndTagOpen => {
                    self.handle_script_data_escaped_end_tag_open_state()
                }
                | State::ScriptDataEscapedEndTagName => {
                    self.handle_script_data_escaped_end_tag_name_state()
                }
                | State::ScriptDataDoubleEscapeStart => {
                    self.handle_script_data_double_escape_start_state()
                }
                | State::ScriptDataDoubleEscaped => {
                    self.handle_script_data_double_escaped_state()
                }
                | State::ScriptDataDoubleEscapedDash => {
                    self.handle_script_data_double_escaped_dash_state()
                }
                | State::ScriptDataDoubleEscapedDashDash => self
                    .handle_script_data_double_escaped_dash_dash_state(),
                | State::ScriptDataDoubleEscapedLessThanSign => self
                    .handle_script_data_double_escaped_less_than_sign_state(),
                | State::ScriptDataDoubleEscapeEnd => {
                    self.handle_script_data_double_escape_end_state()
                }
                | State::BeforeAttributeName => {
                    self.handle_before_attribute_name_state()
                }
                | State::AttributeName => {
                    self.handle_attribute_name_state()
                }
                | State::AfterAttributeName => {
                    self.handle_after_attribute_name_state()
                }
                | State::BeforeAttributeValue => {
                    self.handle_before_attribute_value_state()
                }
                | State::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"')
                }
                | State::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'')
                }
                | State::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state()
                }
                | State::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state()
                }
                | State::SelfClosingStartTag => {
                    self.handle_self_closing_start_tag_state()
                }
                | State::BogusComment => self.handle_bogus_comment_state(),
                | State::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state()
                }
                | State::CommentStart => self.handle_comment_start_state(),
                | State::CommentStartDash => {
                    self.handle_comment_start_dash_state()
                }
                | State::Comment => self.handle_comment_state(),
                | State::CommentLessThanSign => {
                    self.handle_comment_less_than_sign_state()
                }
                | State::CommentLessThanSignBang => {
                    self.handle_comment_less_than_sign_bang_state()
                }
                | State::CommentLessThanSignBangDash => {
                    self.handle_comment_less_than_sign_bang_dash_state()
                }
                | State::CommentLessThanSignBangDashDash => self
                    .handle_comment_less_than_sign_bang_dash_dash_state(),
                | State::CommentEndDash => {
                    self.handle_comment_end_dash_state()
                }
                | State::CommentEnd => self.handle_comment_end_state(),
                | State::CommentEndBang => {
                    self.handle_comment_end_bang_state()
                }
                | State::DOCTYPE => self.handle_doctype_state(),
                | State::BeforeDOCTYPEName => {
                    self.handle_before_doctype_name_state()
                }
                | State::DOCTYPEName => self.handle_doctype_name_state(),
                | State::AfterDOCTYPEName => {
                    self.handle_after_doctype_name_state()
                }
                | State::AfterDOCTYPEPublicKeyword => {
                    self.handle_after_doctype_public_keyword_state()
                }
                | State::BeforeDOCTYPEPublicIdentifier => {
                    self.handle_before_doctype_public_identifier_state()
                }
                | State::DOCTYPEPublicIdentifierDoubleQuoted => {
                    self.handle_doctype_public_identifier_quoted_state('"')
                }
                | State::DOCTYPEPublicIdentifierSingleQuoted => self
                    .handle_doctype_public_identifier_quoted_state('\''),
                | State::AfterDOCTYPEPublicIdentifier => {
                    self.handle_after_doctype_public_identifier_state()
                }
                | State::BetweenDOCTYPEPublicAndSystemIdentifiers => self
                    .handle_between_doctype_public_and_system_identifiers_state(),
                | State::AfterDOCTYPESystemKeyword => {
                    self.handle_after_doctype_system_keyword_state()
                }
                | State::BeforeDOCTYPESystemIdentifier => {
                    self.handle_before_doctype_system_identifier_state()
                }
                | State::DOCTYPESystemIdentifierDoubleQuoted => self
                    .handle_doctype_system_identifier_quoted_state('"'),
                | State::DOCTYPESystemIdentifierSingleQuoted => self
                    .handle_doctype_system_identifier_quoted_state('\''),
                | State::AfterDOCTYPESystemIdentifier => {
                    self.handle_after_doctype_system_identifier_state()
                }
                | State::BogusDOCTYPE => self.handle_bogus_doctype_state(),
                | State::CDATASection => self.handle_cdata_section_state(),
                | State::CDATASectionBracket => {
                    self.handle_cdata_section_bracket_state()
                }
                | State::CDATASectionEnd => {
                    self.handle_cdata_section_end_state()
                }
                | State::CharacterReference => {
                    self.handle_character_reference_state()
                }
                | State::NamedCharacterReference => {
                    self.handle_named_character_reference_state()
                }
                | State::AmbiguousAmpersand => {
                    self.handle_ambiguous_ampersand_state()
                }
                | State::NumericCharacterReference => {
                    self.handle_numeric_character_reference_state()
                }
                | State::HexadecimalCharacterReferenceStart => self
                    .handle_hexadecimal_character_reference_start_state(),
                | State::DecimalCharacterReferenceStart => {
                    self.handle_decimal_character_reference_start_state()
                }
                | State::HexadecimalCharacterReference => {
                    self.handle_hexadecimal_character_reference_state()
                }
                | State::DecimalCharacterReference => {
                    self.handle_decimal_character_reference_state()
                }
                | State::NumericCharacterReferenceEnd => {
                    self.handle_numeric_character_reference_end_state()
                }
            };

            match result {
                | Ok(HTMLTokenizerProcessControlFlow::Continue) => {}
                | Ok(HTMLTokenizerProcessControlFlow::Emit) => {
                    self.take_current_token_to_output();
                }
                | Err((err, control_flow)) => {
                    self.process_error(err);
                    if let HTMLTokenizerProcessControlFlow::Emit =
                        control_flow
                    {
                        self.take_current_token_to_output();
                    }
                }
            }
        }
    }
}

impl Default for HTMLTokenizerState {
    fn default() -> Self {
        Self {
            current: State::Data,
            returns: None,
        }
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    fn get_tokenizer_html(
        input: &'static str,
    ) -> HTMLTokenizer<impl CodePointIterator> {
        HTMLTokenizer::new(input.chars())
    }

    fn collect_until_eof(
        tokenizer: &mut HTMLTokenizer<impl CodePointIterator>,
    ) -> Vec<HTMLToken> {
        let mut tokens = vec![];
        loop {
            match tokenizer.next_token() {
                | Some(HTMLToken::EOF) | None => break,
                | Some(token) => tokens.push(token),
            }
        }
        tokens
    }

    #[test]
    fn test_tag() {
        let mut tokenizer = get_tokenizer_html("<div id=\"foo\">");
        assert_eq!(
            tokenizer.next_token(),
            Some(
                HTMLToken::Tag(
                    HTMLTagToken::start()
                        .with_name("div")
                        .with_attributes([("id", "foo")])
                )
            ),
        );
    }

    #[test]
    fn test_self_closing_tag() {
        let mut tokenizer =
            get_tokenizer_html("<input value='Hello World'/>");
        assert_eq!(
            tokenizer.next_token(),
            Some(
                HTMLToken::Tag(
                    HTMLTagToken::start()
                        .with_name("input")
                        .with_attributes([("value", "Hello World")])
                        .with_self_closing_flag()
                )
            )
        );
    }

    #[test]
    fn test_comment() {
        let mut tokenizer = get_tokenizer_html("<!-- Hello World -->");
        assert_eq!(
            tokenizer.next_token(),
            Some(HTMLToken::Comment(" Hello World ".into()))
        );
    }

    #[test]
    fn test_doctype() {
        let mut tokenizer = get_tokenizer_html("<!DOCTYPE html>");
        assert_eq!(
            tokenizer.next_token(),
            Some(HTMLToken::DOCTYPE(super::super::HTMLDoctypeToken {
                name: Some("html".into()),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_named_character_reference() {
        let mut tokenizer = get_tokenizer_html("&amp;&lt;");
        let text: String = collect_until_eof(&mut tokenizer)
            .into_iter()
            .filter_map(|token| {
                if let HTMLToken::Character(ch) = token {
                    Some(ch)
                } else {
                    None
                }
            })
            .collect();
        assert_eq!(text, "&<");
    }

    #[test]
    fn test_unknown_named_character_reference_is_literal() {
        let report = Report::collector();
        let mut tokenizer = HTMLTokenizer::new("&unknown;".chars())
            .with_report(report.clone());

        let text: String = collect_until_eof(&mut tokenizer)
            .into_iter()
            .filter_map(|token| {
                if let HTMLToken::Character(ch) = token {
                    Some(ch)
                } else {
                    None
                }
            })
            .collect();

        assert_eq!(text, "&unknown;");
        assert!(!report.diagnostics().is_empty());
    }

    #[test]
    fn test_legacy_entity_in_attribute() {
        // `&copy` suivi d'un caractère alphanumérique dans une valeur
        // d'attribut reste littéral (règle de compatibilité).
        let mut tokenizer =
            get_tokenizer_html("<a href=\"?a=b&copy=1&not;c\">");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(
            token.as_tag().attribute_value("href"),
            Some("?a=b&copy=1\u{AC}c")
        );
    }

    #[test]
    fn test_numeric_character_reference_c1_replacement() {
        let mut tokenizer = get_tokenizer_html("&#x80;");
        assert_eq!(
            tokenizer.next_token(),
            Some(HTMLToken::Character('\u{20AC}'))
        );
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let report = Report::collector();
        let mut tokenizer =
            HTMLTokenizer::new("<div a=1 a=2>".chars())
                .with_report(report.clone());

        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.as_tag().attributes.len(), 1);
        assert_eq!(token.as_tag().attribute_value("a"), Some("1"));
        assert_eq!(report.diagnostics().len(), 1);
    }

    #[test]
    fn test_appropriate_end_tag_in_rawtext() {
        let mut tokenizer =
            get_tokenizer_html("<style>a { color: red; }</style>");
        tokenizer.next_token(); // <style>
        tokenizer.switch_state_to("rawtext");

        let mut text = String::new();
        loop {
            match tokenizer.next_token() {
                | Some(HTMLToken::Character(ch)) => text.push(ch),
                | Some(HTMLToken::Tag(tag)) => {
                    assert!(tag.is_end);
                    assert_eq!(tag.name, "style");
                    break;
                }
                | _ => break,
            }
        }
        assert_eq!(text, "a { color: red; }");
    }
}
