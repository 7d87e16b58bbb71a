/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod element;
mod flags;
mod insertion_mode;
mod list_of_active_formatting_elements;
mod stack_of_open_elements;

mod rules {
    mod body;
    mod caption;
    mod frameset;
    mod head;
    mod html;
    mod initial;
    mod select;
    mod table;
    mod template;
    mod text;
}

use std::{collections::VecDeque, ops::ControlFlow, rc::Rc};

use infra::{namespace::Namespace, primitive::location::Location};
use parser::{
    diagnostic::{Diagnostic, DiagnosticKind, Report},
    signal::Signal,
};

pub use self::insertion_mode::InsertionMode;
pub(crate) use self::stack_of_open_elements::Scope;
use self::{
    element::{Element, ElementRef},
    flags::{FramesetOkFlag, ScriptingFlag},
    list_of_active_formatting_elements::ListOfActiveFormattingElements,
    stack_of_open_elements::{StackEntry, StackOfOpenElements},
};
use crate::{
    elements::{tag_names, IsOneOfTagsInterface},
    tokenization::{HTMLTagToken, HTMLToken, QuirksMode, State},
};

// ---- //
// Type //
// ---- //

pub(crate) type HTMLTreeConstructionControlFlow =
    ControlFlow<HTMLParserFlag, HTMLParserState>;

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub enum HTMLParserFlag {
    Stop,
}

/// Ce que la construction de l'arbre demande à l'analyseur d'appliquer au
/// tokenizer après le jeton courant : c'est par ce canal que « l'état
/// partagé » entre les deux étapes reste explicite.
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub enum HTMLParserState {
    Ignore,
    SwitchTo(State),
}

/// La destination de sortie : la sortie directe de l'analyseur, ou l'un
/// des tampons de retenue de table empilés (voir [SignalHold]).
const DIRECT_OUTPUT: usize = 0;

// --------- //
// Structure //
// --------- //

/// La construction de l'arbre, exprimée en signaux : chaque élément
/// poussé sur la pile émet immédiatement un
/// [StartElement](Signal::StartElement), chaque dépilement émet un
/// [EndElement](Signal::EndElement). L'arbre lui-même n'est jamais
/// matérialisé.
#[derive(Debug)]
pub struct HTMLTreeConstruction {
    pub(crate) insertion_mode: InsertionMode,
    pub(crate) original_insertion_mode: InsertionMode,
    stack_of_template_insertion_modes: Vec<InsertionMode>,
    stack_of_open_elements: StackOfOpenElements,
    list_of_active_formatting_elements: ListOfActiveFormattingElements,
    head_element_pointer: Option<ElementRef>,
    form_element_pointer: Option<ElementRef>,
    frameset_ok_flag: FramesetOkFlag,
    scripting_flag: ScriptingFlag,
    foster_parenting: bool,
    parsing_fragment: bool,
    context_element: Option<ElementRef>,
    quirks_mode: QuirksMode,
    pending_table_character_tokens: String,

    /// Les caractères consécutifs sont agrégés et vidés en un seul signal
    /// [Text](Signal::Text) dès qu'un jeton non-caractère force une
    /// transition.
    character_buffer: String,
    character_destination: usize,

    /// Signaux prêts pour l'aval.
    output: VecDeque<Signal>,

    /// Tampons de retenue : les signaux du sous-arbre d'une table ouverte
    /// y sont retenus jusqu'à la fermeture de la table, de sorte que le
    /// contenu adopté (foster parenting) puisse être émis avant eux —
    /// l'équivalent, en flux, d'une insertion immédiatement avant la
    /// table.
    holds: Vec<SignalHold>,

    /// Après un `pre`, `listing` ou `textarea`, le premier LINE FEED est
    /// ignoré.
    ignore_next_lf: bool,

    location: Location,
    report: Report,
}

#[derive(Debug)]
struct SignalHold {
    queue: VecDeque<Signal>,
    flush_target: usize,
}

// -------------- //
// Implémentation //
// -------------- //

impl HTMLTreeConstruction {
    pub fn new() -> Self {
        Self {
            insertion_mode: InsertionMode::default(),
            original_insertion_mode: InsertionMode::default(),
            stack_of_template_insertion_modes: Vec::default(),
            stack_of_open_elements: StackOfOpenElements::default(),
            list_of_active_formatting_elements:
                ListOfActiveFormattingElements::default(),
            head_element_pointer: None,
            form_element_pointer: None,
            frameset_ok_flag: FramesetOkFlag::default(),
            scripting_flag: ScriptingFlag::default(),
            foster_parenting: false,
            parsing_fragment: false,
            context_element: None,
            quirks_mode: QuirksMode::No,
            pending_table_character_tokens: String::default(),
            character_buffer: String::default(),
            character_destination: DIRECT_OUTPUT,
            output: VecDeque::default(),
            holds: Vec::default(),
            ignore_next_lf: false,
            location: Location::new(),
            report: Report::default(),
        }
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    pub fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting_flag = if enabled {
            ScriptingFlag::Enabled
        } else {
            ScriptingFlag::Disabled
        };
        self
    }

    /// Prépare une analyse de fragment : une racine `html` fantôme est
    /// empilée (ses signaux ne sont pas émis) et le mode d'insertion est
    /// réinitialisé d'après l'élément de contexte.
    pub fn with_fragment_context(mut self, context: &str) -> Self {
        let token = HTMLTagToken::start().with_name(tag_names::html);
        let root = Element::new(&token, Namespace::HTML);

        self.stack_of_open_elements.put(StackEntry {
            element: root,
            destination: DIRECT_OUTPUT,
            owns_hold: false,
            phantom: true,
        });

        let context_token = HTMLTagToken::start().with_name(context);
        self.context_element =
            Some(Element::new(&context_token, Namespace::HTML));
        self.parsing_fragment = true;
        self.reset_insertion_mode_appropriately();
        self
    }

    pub(crate) const fn is_scripting_enabled(&self) -> bool {
        matches!(self.scripting_flag, ScriptingFlag::Enabled)
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Le prochain signal prêt pour l'aval.
    pub fn pop_output(&mut self) -> Option<Signal> {
        self.output.pop_front()
    }

    /// L'emplacement du jeton dont dérive le dernier signal.
    pub const fn location(&self) -> Location {
        self.location
    }
}

// -------------------------- //
// Dispatcher et contenu HTML //
// -------------------------- //

impl HTMLTreeConstruction {
    /// Le dispatcher de construction d'arbre : traite le jeton selon les
    /// règles du mode d'insertion courant, ou selon les règles du contenu
    /// étranger lorsque le nœud courant ajusté n'est pas dans l'espace de
    /// noms HTML.
    pub fn dispatch(
        &mut self,
        token: Option<HTMLToken>,
    ) -> HTMLTreeConstructionControlFlow {
        let Some(mut token) = token else {
            return self.stop();
        };

        // Après un `pre`, `listing` ou `textarea`, le premier LINE FEED
        // du contenu est ignoré.
        if self.ignore_next_lf {
            self.ignore_next_lf = false;
            if let HTMLToken::Character('\n') = token {
                return ControlFlow::Continue(HTMLParserState::Ignore);
            }
        }

        if self.use_foreign_content_rules(&token) {
            return self.process_using_the_rules_for_foreign_content(
                &mut token,
            );
        }

        self.process_using_the_rules_for(self.insertion_mode, token)
    }

    fn use_foreign_content_rules(&self, token: &HTMLToken) -> bool {
        if self.stack_of_open_elements.is_empty() {
            return false;
        }

        let adjusted = self.adjusted_current_node();

        if adjusted.is_in_html_namespace() {
            return false;
        }

        if adjusted.is_mathml_text_integration_point() {
            if let HTMLToken::Tag(tag) = token {
                if !tag.is_end
                    && !tag.name.as_str().is_one_of([
                        tag_names::mglyph,
                        tag_names::malignmark,
                    ])
                {
                    return false;
                }
            }
            if token.is_character() {
                return false;
            }
        }

        if Namespace::MathML == adjusted.namespace
            && tag_names::annotationXml == &adjusted.local_name
        {
            if let HTMLToken::Tag(tag) = token {
                if !tag.is_end && tag_names::svg == &tag.name {
                    return false;
                }
            }
        }

        if adjusted.is_html_text_integration_point()
            && (token.is_start_tag() || token.is_character())
        {
            return false;
        }

        !token.is_eof()
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#using-the-rules-for>
    pub(crate) fn process_using_the_rules_for(
        &mut self,
        m: InsertionMode,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match m {
            | InsertionMode::Initial => {
                self.handle_initial_insertion_mode(token)
            }
            | InsertionMode::BeforeHTML => {
                self.handle_before_html_insertion_mode(token)
            }
            | InsertionMode::BeforeHead => {
                self.handle_before_head_insertion_mode(token)
            }
            | InsertionMode::InHead => {
                self.handle_in_head_insertion_mode(token)
            }
            | InsertionMode::InHeadNoscript => {
                self.handle_in_head_noscript_insertion_mode(token)
            }
            | InsertionMode::AfterHead => {
                self.handle_after_head_insertion_mode(token)
            }
            | InsertionMode::InBody => {
                self.handle_in_body_insertion_mode(token)
            }
            | InsertionMode::Text => {
                self.handle_text_insertion_mode(token)
            }
            | InsertionMode::InTable => {
                self.handle_in_table_insertion_mode(token)
            }
            | InsertionMode::InTableText => {
                self.handle_in_table_text_insertion_mode(token)
            }
            | InsertionMode::InCaption => {
                self.handle_in_caption_insertion_mode(token)
            }
            | InsertionMode::InColumnGroup => {
                self.handle_in_column_group_insertion_mode(token)
            }
            | InsertionMode::InTableBody => {
                self.handle_in_table_body_insertion_mode(token)
            }
            | InsertionMode::InRow => {
                self.handle_in_row_insertion_mode(token)
            }
            | InsertionMode::InCell => {
                self.handle_in_cell_insertion_mode(token)
            }
            | InsertionMode::InSelect => {
                self.handle_in_select_insertion_mode(token)
            }
            | InsertionMode::InSelectInTable => {
                self.handle_in_select_in_table_insertion_mode(token)
            }
            | InsertionMode::InTemplate => {
                self.handle_in_template_insertion_mode(token)
            }
            | InsertionMode::AfterBody => {
                self.handle_after_body_insertion_mode(token)
            }
            | InsertionMode::InFrameset => {
                self.handle_in_frameset_insertion_mode(token)
            }
            | InsertionMode::AfterFrameset => {
                self.handle_after_frameset_insertion_mode(token)
            }
            | InsertionMode::AfterAfterBody => {
                self.handle_after_after_body_insertion_mode(token)
            }
            | InsertionMode::AfterAfterFrameset => {
                self.handle_after_after_frameset_insertion_mode(token)
            }
        }
    }

    /// Le nœud courant ajusté est l'élément de contexte si l'analyseur a
    /// été créé dans le cadre de l'algorithme d'analyse des fragments et
    /// que la pile ne contient qu'un seul élément ; sinon, le nœud
    /// courant.
    pub(crate) fn adjusted_current_node(&self) -> &ElementRef {
        if self.parsing_fragment
            && self.stack_of_open_elements.len() == 1
        {
            self.context_element.as_ref().expect("L'élément de contexte")
        } else {
            &self
                .stack_of_open_elements
                .current_node()
                .expect("Le nœud actuel")
                .element
        }
    }

    /// Les sections CDATA ne sont permises que dans le contenu étranger.
    pub fn is_cdata_allowed(&self) -> bool {
        if self.stack_of_open_elements.is_empty() {
            return false;
        }
        !self.adjusted_current_node().is_in_html_namespace()
    }
}

// ------------------- //
// Émission de signaux //
// ------------------- //

impl HTMLTreeConstruction {
    fn emit_to(&mut self, destination: usize, signal: Signal) {
        if destination == DIRECT_OUTPUT {
            self.output.push_back(signal);
        } else {
            self.holds[destination - 1].queue.push_back(signal);
        }
    }

    /// La destination courante des signaux : celle du nœud actuel, ou,
    /// lorsque le foster parenting s'applique, la position immédiatement
    /// avant la dernière table (le contenu d'un template plus récent que
    /// la table reste à la position courante).
    fn insertion_destination(&self) -> usize {
        let current_destination = self
            .stack_of_open_elements
            .current_node()
            .map(|entry| entry.destination)
            .unwrap_or(DIRECT_OUTPUT);

        if !self.foster_parenting {
            return current_destination;
        }

        let fosters = self
            .stack_of_open_elements
            .current_node()
            .is_some_and(|entry| {
                entry.element.is_one_of_html_elements([
                    tag_names::table,
                    tag_names::tbody,
                    tag_names::tfoot,
                    tag_names::thead,
                    tag_names::tr,
                ])
            });

        if !fosters {
            return current_destination;
        }

        let last_table = self
            .stack_of_open_elements
            .last_with_tag_name(tag_names::table);
        let last_template = self
            .stack_of_open_elements
            .last_with_tag_name(tag_names::template);

        match (last_table, last_template) {
            | (Some((table_index, _)), Some((template_index, _)))
                if template_index > table_index =>
            {
                current_destination
            }
            | (Some((_, table_entry)), _) if table_entry.owns_hold => {
                self.holds[table_entry.destination - 1].flush_target
            }
            | (Some((_, table_entry)), _) => table_entry.destination,
            | (None, _) => DIRECT_OUTPUT,
        }
    }

    fn flush_character_buffer(&mut self) {
        if self.character_buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.character_buffer);
        let destination = self.character_destination;
        self.emit_to(destination, Signal::Text { runs: vec![text] });
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character>
    pub(crate) fn insert_character(&mut self, ch: char) {
        let destination = self.insertion_destination();
        if destination != self.character_destination {
            self.flush_character_buffer();
            self.character_destination = destination;
        }
        self.character_buffer.push(ch);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment>
    pub(crate) fn insert_comment(&mut self, comment: String) {
        self.flush_character_buffer();
        let destination = self.insertion_destination();
        self.emit_to(destination, Signal::Comment(comment));
    }

    /// Un commentaire inséré comme dernier enfant de l'objet Document :
    /// directement dans la sortie, hors de tout élément retenu.
    pub(crate) fn insert_comment_in_document(&mut self, comment: String) {
        self.flush_character_buffer();
        self.emit_to(DIRECT_OUTPUT, Signal::Comment(comment));
    }

    pub(crate) fn emit_doctype(&mut self, signal: Signal) {
        self.flush_character_buffer();
        self.emit_to(DIRECT_OUTPUT, signal);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element>
    pub(crate) fn insert_html_element(
        &mut self,
        token: &HTMLTagToken,
    ) -> ElementRef {
        self.insert_foreign_element(token, Namespace::HTML)
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element>
    pub(crate) fn insert_foreign_element(
        &mut self,
        token: &HTMLTagToken,
        namespace: Namespace,
    ) -> ElementRef {
        let element = Element::new(token, namespace);
        self.insert_element(element.clone());
        element
    }

    fn insert_element(&mut self, element: ElementRef) {
        self.flush_character_buffer();

        let destination = self.insertion_destination();

        let (entry_destination, owns_hold) =
            if element.is_html_element(tag_names::table) {
                // Le sous-arbre de la table est retenu jusqu'à sa
                // fermeture ; le contenu adopté contourne ce tampon.
                self.holds.push(SignalHold {
                    queue: VecDeque::default(),
                    flush_target: destination,
                });
                (self.holds.len(), true)
            } else {
                (destination, false)
            };

        self.emit_to(
            entry_destination,
            Signal::StartElement {
                name: element.qname(),
                attributes: element.attributes.to_owned(),
            },
        );

        self.stack_of_open_elements.put(StackEntry {
            element,
            destination: entry_destination,
            owns_hold,
            phantom: false,
        });
    }

    /// Dépile le nœud actuel et émet son
    /// [EndElement](Signal::EndElement). La fermeture d'une table vide
    /// son tampon de retenue vers sa destination d'origine.
    pub(crate) fn pop_element(&mut self) -> Option<ElementRef> {
        self.flush_character_buffer();

        let entry = self.stack_of_open_elements.pop()?;

        if !entry.phantom {
            self.emit_to(
                entry.destination,
                Signal::EndElement {
                    name: entry.element.qname(),
                },
            );
        }

        if entry.owns_hold {
            let hold = self
                .holds
                .pop()
                .expect("Le tampon de retenue de la table");
            for signal in hold.queue {
                self.emit_to(hold.flush_target, signal);
            }
        }

        Some(entry.element)
    }

    /// Dépile jusqu'à ce qu'un élément HTML de l'un de ces noms ait été
    /// dépilé.
    pub(crate) fn pop_until_one_of(
        &mut self,
        tag_names_list: impl IntoIterator<Item = tag_names> + Copy,
    ) {
        while let Some(element) = self.pop_element() {
            if element.is_one_of_html_elements(tag_names_list) {
                break;
            }
        }
    }

    pub(crate) fn pop_until_tag(&mut self, tag_name: tag_names) {
        self.pop_until_one_of([tag_name]);
    }

    /// Dépile jusqu'à cet élément précis inclus.
    fn pop_until_element(&mut self, element: &ElementRef) {
        while let Some(popped) = self.pop_element() {
            if Rc::ptr_eq(&popped, element) {
                break;
            }
        }
    }

    /// Fin d'analyse : les éléments encore ouverts sont dépilés, leurs
    /// signaux de fin émis, et les tampons de retenue vidés.
    pub(crate) fn stop(&mut self) -> HTMLTreeConstructionControlFlow {
        self.flush_character_buffer();
        while self.pop_element().is_some() {}
        ControlFlow::Break(HTMLParserFlag::Stop)
    }
}

// --------------------- //
// Algorithmes partagés  //
// --------------------- //

impl HTMLTreeConstruction {
    pub(crate) fn current_node(&self) -> Option<&ElementRef> {
        self.stack_of_open_elements
            .current_node()
            .map(|entry| &entry.element)
    }

    pub(crate) fn stack(&self) -> &StackOfOpenElements {
        &self.stack_of_open_elements
    }

    pub(crate) fn set_frameset_not_ok(&mut self) {
        self.frameset_ok_flag = FramesetOkFlag::NotOk;
    }

    pub(crate) const fn is_frameset_ok(&self) -> bool {
        matches!(self.frameset_ok_flag, FramesetOkFlag::Ok)
    }

    pub(crate) fn set_ignore_next_lf(&mut self) {
        self.ignore_next_lf = true;
    }

    pub(crate) fn enable_foster_parenting(&mut self) {
        self.foster_parenting = true;
    }

    pub(crate) fn disable_foster_parenting(&mut self) {
        // Le texte adopté encore en tampon doit partir avant que la
        // destination ne change.
        self.flush_character_buffer();
        self.foster_parenting = false;
    }

    pub(crate) fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
    }

    pub(crate) const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    pub(crate) const fn is_parsing_fragment(&self) -> bool {
        self.parsing_fragment
    }

    pub(crate) fn head_element_pointer(&self) -> Option<&ElementRef> {
        self.head_element_pointer.as_ref()
    }

    pub(crate) fn set_head_element_pointer(
        &mut self,
        element: ElementRef,
    ) {
        self.head_element_pointer = Some(element);
    }

    pub(crate) fn form_element_pointer(&self) -> Option<&ElementRef> {
        self.form_element_pointer.as_ref()
    }

    pub(crate) fn set_form_element_pointer(
        &mut self,
        element: Option<ElementRef>,
    ) {
        self.form_element_pointer = element;
    }

    pub(crate) fn insert_marker_at_end_of_list(&mut self) {
        self.list_of_active_formatting_elements.insert_marker_at_end();
    }

    pub(crate) fn push_onto_list_of_active_formatting_elements(
        &mut self,
        element: ElementRef,
    ) {
        self.list_of_active_formatting_elements.push(element);
    }

    pub(crate) fn clear_list_up_to_the_last_marker(&mut self) {
        self.list_of_active_formatting_elements
            .clear_up_to_the_last_marker();
    }

    /// Le dernier élément de mise en forme de ce nom après le dernier
    /// marqueur, le cas échéant.
    pub(crate) fn last_formatting_element_before_marker(
        &self,
        tag_name: &str,
    ) -> Option<ElementRef> {
        self.list_of_active_formatting_elements
            .last_element_before_marker(tag_name)
            .map(|(_, element)| element)
    }

    pub(crate) fn template_insertion_modes_is_empty(&self) -> bool {
        self.stack_of_template_insertion_modes.is_empty()
    }

    pub(crate) fn push_template_insertion_mode(
        &mut self,
        mode: InsertionMode,
    ) {
        self.stack_of_template_insertion_modes.push(mode);
    }

    pub(crate) fn pop_template_insertion_mode(&mut self) {
        self.stack_of_template_insertion_modes.pop();
    }

    pub(crate) fn set_current_template_insertion_mode(
        &mut self,
        mode: InsertionMode,
    ) {
        self.stack_of_template_insertion_modes.pop();
        self.stack_of_template_insertion_modes.push(mode);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags>
    pub(crate) fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_with_predicate(|_| true);
    }

    pub(crate) fn generate_implied_end_tags_except_for(
        &mut self,
        exception: tag_names,
    ) {
        self.generate_implied_end_tags_with_predicate(move |name| {
            exception != name
        });
    }

    pub(crate) fn generate_implied_end_tags_except_for_name(
        &mut self,
        exception: &str,
    ) {
        let exception = exception.to_owned();
        self.generate_implied_end_tags_with_predicate(move |name| {
            exception != name
        });
    }

    /// Dépile jusqu'à un élément HTML portant ce nom (inconnu de la
    /// table des noms de balises compris).
    pub(crate) fn pop_until_element_with_name(&mut self, name: &str) {
        while let Some(element) = self.pop_element() {
            if element.is_in_html_namespace()
                && element.local_name == name
            {
                break;
            }
        }
    }

    /// Retire un élément de la liste des éléments de mise en forme
    /// actifs, et de la pile s'il en est le nœud actuel. (Un élément
    /// plus profond sera fermé par le dépilage normal.)
    pub(crate) fn remove_from_list_and_stack(
        &mut self,
        element: &ElementRef,
    ) {
        self.list_of_active_formatting_elements.remove_element(element);
        if self
            .current_node()
            .is_some_and(|current| Rc::ptr_eq(current, element))
        {
            self.pop_element();
        }
    }

    fn generate_implied_end_tags_with_predicate(
        &mut self,
        predicate: impl Fn(&str) -> bool,
    ) {
        while let Some(node) = self.current_node() {
            let name = node.local_name.to_owned();
            if node.is_in_html_namespace()
                && predicate(&name)
                && name.as_str().is_one_of([
                    tag_names::dd,
                    tag_names::dt,
                    tag_names::li,
                    tag_names::optgroup,
                    tag_names::option,
                    tag_names::p,
                    tag_names::rb,
                    tag_names::rp,
                    tag_names::rt,
                    tag_names::rtc,
                ])
            {
                self.pop_element();
            } else {
                break;
            }
        }
    }

    /// Génération exhaustive : inclut également caption, colgroup,
    /// tbody, td, tfoot, th, thead et tr.
    pub(crate) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while let Some(node) = self.current_node() {
            if node.is_one_of_html_elements([
                tag_names::caption,
                tag_names::colgroup,
                tag_names::dd,
                tag_names::dt,
                tag_names::li,
                tag_names::optgroup,
                tag_names::option,
                tag_names::p,
                tag_names::rb,
                tag_names::rp,
                tag_names::rt,
                tag_names::rtc,
                tag_names::tbody,
                tag_names::td,
                tag_names::tfoot,
                tag_names::th,
                tag_names::thead,
                tag_names::tr,
            ]) {
                self.pop_element();
            } else {
                break;
            }
        }
    }

    /// Ferme un élément `p` : balises de fin implicites sauf `p`, puis
    /// dépilement jusqu'au `p` inclus.
    pub(crate) fn close_p_element(&mut self) {
        self.generate_implied_end_tags_except_for(tag_names::p);
        if !self
            .current_node()
            .is_some_and(|node| node.is_html_element(tag_names::p))
        {
            self.report_misnested("balise p mal imbriquée");
        }
        self.pop_until_tag(tag_names::p);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements>
    pub(crate) fn reconstruct_active_formatting_elements(&mut self) {
        if self.list_of_active_formatting_elements.is_empty() {
            return;
        }

        // Si la dernière entrée est un marqueur ou un élément déjà sur la
        // pile, il n'y a rien à reconstruire.
        let size = self.list_of_active_formatting_elements.len();
        let last = self
            .list_of_active_formatting_elements
            .get(size - 1)
            .expect("La dernière entrée");
        match last.element() {
            | None => return,
            | Some(element)
                if self.stack_of_open_elements.contains(element) =>
            {
                return
            }
            | Some(_) => {}
        }

        // Rembobiner jusqu'à la première entrée à reconstruire.
        let mut index = size - 1;
        loop {
            if index == 0 {
                break;
            }
            index -= 1;
            let entry = self
                .list_of_active_formatting_elements
                .get(index)
                .expect("Une entrée de la liste");
            let stop = match entry.element() {
                | None => true,
                | Some(element) => {
                    self.stack_of_open_elements.contains(element)
                }
            };
            if stop {
                index += 1;
                break;
            }
        }

        // Créer : rouvrir chaque entrée restante par un clone, et
        // remplacer l'entrée par le nouvel élément.
        loop {
            let element = self
                .list_of_active_formatting_elements
                .get(index)
                .and_then(|entry| entry.element())
                .expect("Un élément de mise en forme")
                .to_owned();

            let token = HTMLTagToken::start()
                .with_name(&element.local_name)
                .with_attributes(
                    element.attributes.iter().cloned(),
                );
            let new_element = self.insert_html_element(&token);

            self.list_of_active_formatting_elements
                .replace(index, new_element);

            if index
                == self.list_of_active_formatting_elements.len() - 1
            {
                break;
            }
            index += 1;
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm>
    ///
    /// L'algorithme borné complet : boucle externe limitée à huit tours,
    /// recherche du bloc le plus éloigné, signet, boucle interne limitée
    /// à trois clones, clonage des éléments de mise en forme avec leurs
    /// attributs. La ré-parentalité, qui déplacerait des signaux déjà
    /// émis, s'exprime vers l'avant : la nouvelle configuration de la
    /// pile est réalisée en fermant jusqu'à l'élément de mise en forme
    /// inclus, puis en rouvrant des clones (voir [Self::restack_with]).
    pub(crate) fn run_adoption_agency_algorithm(
        &mut self,
        token: &HTMLTagToken,
    ) {
        let subject = token.name.to_owned();

        // 1. Si le nœud actuel est un élément HTML de ce nom absent de la
        // liste des éléments de mise en forme actifs : le dépiler.
        if let Some(current) = self.current_node().cloned() {
            if current.is_in_html_namespace()
                && current.local_name == subject
                && !self
                    .list_of_active_formatting_elements
                    .contains(&current)
            {
                self.pop_element();
                return;
            }
        }

        // 2. La boucle externe s'exécute au plus huit fois.
        let mut outer_loop_counter = 0;
        while outer_loop_counter < 8 {
            outer_loop_counter += 1;

            // 3. L'élément de mise en forme : le dernier élément de ce
            // nom après le dernier marqueur.
            let Some((_, formatting_element)) = self
                .list_of_active_formatting_elements
                .last_element_before_marker(&subject)
            else {
                self.handle_any_other_end_tag_in_body(token);
                return;
            };

            // 4. Absent de la pile : erreur d'analyse, retirer de la
            // liste.
            if !self.stack_of_open_elements.contains(&formatting_element)
            {
                self.report_misnested(format!(
                    "balise de fin sans élément ouvert : {subject}"
                ));
                self.list_of_active_formatting_elements
                    .remove_element(&formatting_element);
                return;
            }

            // 5. Sur la pile mais hors de portée : erreur d'analyse.
            if !self.stack_of_open_elements.has_this_element_in_scope(
                &formatting_element,
                Scope::Default,
            ) {
                self.report_misnested(format!(
                    "élément {subject} hors de portée"
                ));
                return;
            }

            // 6. Différent du nœud actuel : erreur d'analyse, mais on
            // continue.
            if !self.current_node().is_some_and(|current| {
                Rc::ptr_eq(current, &formatting_element)
            }) {
                self.report_misnested(format!(
                    "balise {subject} mal imbriquée"
                ));
            }

            // 7. Le bloc le plus éloigné : l'élément « special » le plus
            // haut de la pile sous l'élément de mise en forme.
            let formatting_index = self
                .stack_of_open_elements
                .position_of(&formatting_element)
                .expect("La position de l'élément de mise en forme");
            let maybe_furthest_block = self
                .stack_of_open_elements
                .iter()
                .enumerate()
                .skip(formatting_index + 1)
                .find(|(_, entry)| entry.element.is_special())
                .map(|(index, entry)| (index, entry.element.clone()));

            // 8. Sans bloc le plus éloigné : dépiler jusqu'à l'élément
            // de mise en forme inclus, et le retirer de la liste.
            let Some((furthest_block_index, furthest_block)) =
                maybe_furthest_block
            else {
                self.pop_until_element(&formatting_element);
                self.list_of_active_formatting_elements
                    .remove_element(&formatting_element);
                return;
            };

            // 9./10. L'ancêtre commun est l'élément sous l'élément de
            // mise en forme : tout ce qui est sous lui reste en place.
            // Le signet note où réinsérer le clone dans la liste ; il est
            // ancré sur une entrée pour suivre les décalages.
            let mut bookmark_anchor: Option<ElementRef> = None;

            // 11.–13. La boucle interne remonte du bloc le plus éloigné
            // vers l'élément de mise en forme. Au-delà de trois tours,
            // les entrées sont abandonnées ; un nœud absent de la liste
            // sort de la pile sans clone ; les autres sont remplacés,
            // dans la pile et dans la liste, par des clones porteurs des
            // mêmes attributs.
            let mut surviving_clones: Vec<ElementRef> = vec![];
            let mut inner_loop_counter = 0;
            let mut last_node_is_furthest_block = true;

            for index in
                (formatting_index + 1..furthest_block_index).rev()
            {
                inner_loop_counter += 1;

                let node = self
                    .stack_of_open_elements
                    .get(index)
                    .expect("Un nœud entre l'élément de mise en forme \
                             et le bloc le plus éloigné")
                    .element
                    .clone();

                if inner_loop_counter > 3 {
                    self.list_of_active_formatting_elements
                        .remove_element(&node);
                }

                let Some(position) = self
                    .list_of_active_formatting_elements
                    .position_of(&node)
                else {
                    continue;
                };

                let clone = Element::duplicate(&node);
                self.list_of_active_formatting_elements
                    .replace(position, clone.clone());

                if last_node_is_furthest_block {
                    bookmark_anchor = Some(clone.clone());
                    last_node_is_furthest_block = false;
                }

                surviving_clones.push(clone);
            }

            // La chaîne a été construite en remontant ; la rouvrir se
            // fait dans l'ordre ancêtre commun → bloc le plus éloigné.
            surviving_clones.reverse();

            // 14.–16. Le clone de l'élément de mise en forme, avec ses
            // attributs : les enfants à venir du bloc le plus éloigné lui
            // appartiennent.
            let formatting_clone =
                Element::duplicate(&formatting_element);

            // 17. La liste : l'élément de mise en forme est retiré et
            // son clone inséré à la position du signet.
            let formatting_position = self
                .list_of_active_formatting_elements
                .position_of(&formatting_element)
                .expect("L'élément de mise en forme dans la liste");
            self.list_of_active_formatting_elements
                .remove_element(&formatting_element);
            let bookmark = match bookmark_anchor.as_ref() {
                | Some(anchor) => {
                    self.list_of_active_formatting_elements
                        .position_of(anchor)
                        .expect("L'ancre du signet")
                        + 1
                }
                | None => formatting_position,
            };
            self.list_of_active_formatting_elements
                .insert(bookmark, formatting_clone.clone());

            // 18./19. La pile, exprimée en flux : fermer jusqu'à
            // l'élément de mise en forme inclus, puis rouvrir les clones
            // survivants, le bloc le plus éloigné, le clone de l'élément
            // de mise en forme juste sous lui, et enfin ce qui était
            // ouvert au-dessus du bloc le plus éloigné. Les entrées de la
            // liste visées par ces rouvertures suivent leurs clones.
            let mut replacements = surviving_clones;
            replacements.push(Element::duplicate(&furthest_block));
            replacements.push(formatting_clone);

            for index in
                furthest_block_index + 1..self.stack_of_open_elements.len()
            {
                let above = self
                    .stack_of_open_elements
                    .get(index)
                    .expect("Un nœud au-dessus du bloc le plus éloigné")
                    .element
                    .clone();
                let clone = Element::duplicate(&above);
                if let Some(position) = self
                    .list_of_active_formatting_elements
                    .position_of(&above)
                {
                    self.list_of_active_formatting_elements
                        .replace(position, clone.clone());
                }
                replacements.push(clone);
            }

            self.restack_with(&formatting_element, replacements);

            // 20. Et l'on reboucle, au plus huit fois.
        }
    }

    /// Ferme, en ordre strictement dernier-ouvert-premier-fermé, les
    /// éléments ouverts jusqu'à `element` inclus, puis rouvre les
    /// `replacements` par-dessus. C'est l'expression en flux de la
    /// ré-parentalité de l'algorithme d'adoption : un signal déjà émis ne
    /// peut pas être déplacé, la nouvelle structure vaut pour le contenu
    /// à venir.
    fn restack_with(
        &mut self,
        element: &ElementRef,
        replacements: Vec<ElementRef>,
    ) {
        // Les destinations sont recalculées à la rouverture ; le foster
        // parenting ne doit pas dévier ces insertions-là.
        let saved_foster_parenting = self.foster_parenting;
        self.foster_parenting = false;

        self.pop_until_element(element);
        for replacement in replacements {
            self.insert_element(replacement);
        }

        self.foster_parenting = saved_foster_parenting;
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately>
    pub(crate) fn reset_insertion_mode_appropriately(&mut self) {
        for (index, entry) in
            self.stack_of_open_elements.iter().enumerate().rev()
        {
            let last = index == 0;

            let node = if last && self.parsing_fragment {
                self.context_element
                    .as_ref()
                    .expect("L'élément de contexte")
            } else {
                &entry.element
            };

            if node.is_html_element(tag_names::select) {
                // Un ancêtre table sans template intermédiaire bascule
                // en "in select in table".
                for ancestor in
                    self.stack_of_open_elements.iter().take(index).rev()
                {
                    if ancestor
                        .element
                        .is_html_element(tag_names::template)
                    {
                        break;
                    }
                    if ancestor.element.is_html_element(tag_names::table)
                    {
                        self.insertion_mode
                            .switch_to(InsertionMode::InSelectInTable);
                        return;
                    }
                }
                self.insertion_mode.switch_to(InsertionMode::InSelect);
                return;
            }

            if node.is_one_of_html_elements([
                tag_names::td,
                tag_names::th,
            ]) && !last
            {
                self.insertion_mode.switch_to(InsertionMode::InCell);
                return;
            }

            if node.is_html_element(tag_names::tr) {
                self.insertion_mode.switch_to(InsertionMode::InRow);
                return;
            }

            if node.is_one_of_html_elements([
                tag_names::tbody,
                tag_names::thead,
                tag_names::tfoot,
            ]) {
                self.insertion_mode
                    .switch_to(InsertionMode::InTableBody);
                return;
            }

            if node.is_html_element(tag_names::caption) {
                self.insertion_mode.switch_to(InsertionMode::InCaption);
                return;
            }

            if node.is_html_element(tag_names::colgroup) {
                self.insertion_mode
                    .switch_to(InsertionMode::InColumnGroup);
                return;
            }

            if node.is_html_element(tag_names::table) {
                self.insertion_mode.switch_to(InsertionMode::InTable);
                return;
            }

            if node.is_html_element(tag_names::template) {
                let mode = *self
                    .stack_of_template_insertion_modes
                    .last()
                    .expect("Le mode d'insertion de template courant");
                self.insertion_mode.switch_to(mode);
                return;
            }

            if node.is_html_element(tag_names::head) && !last {
                self.insertion_mode.switch_to(InsertionMode::InHead);
                return;
            }

            if node.is_html_element(tag_names::body) {
                self.insertion_mode.switch_to(InsertionMode::InBody);
                return;
            }

            if node.is_html_element(tag_names::frameset) {
                self.insertion_mode
                    .switch_to(InsertionMode::InFrameset);
                return;
            }

            if node.is_html_element(tag_names::html) {
                if self.head_element_pointer.is_none() {
                    self.insertion_mode
                        .switch_to(InsertionMode::BeforeHead);
                } else {
                    self.insertion_mode
                        .switch_to(InsertionMode::AfterHead);
                }
                return;
            }

            if last {
                self.insertion_mode.switch_to(InsertionMode::InBody);
                return;
            }
        }

        self.insertion_mode.switch_to(InsertionMode::InBody);
    }

    /// Dépile jusqu'à ce que le nœud actuel soit un contexte de table.
    pub(crate) fn clear_stack_back_to_table_context(&mut self) {
        while let Some(node) = self.current_node() {
            if node.is_one_of_html_elements([
                tag_names::table,
                tag_names::template,
                tag_names::html,
            ]) {
                break;
            }
            self.pop_element();
        }
    }

    pub(crate) fn clear_stack_back_to_table_body_context(&mut self) {
        while let Some(node) = self.current_node() {
            if node.is_one_of_html_elements([
                tag_names::tbody,
                tag_names::tfoot,
                tag_names::thead,
                tag_names::template,
                tag_names::html,
            ]) {
                break;
            }
            self.pop_element();
        }
    }

    pub(crate) fn clear_stack_back_to_table_row_context(&mut self) {
        while let Some(node) = self.current_node() {
            if node.is_one_of_html_elements([
                tag_names::tr,
                tag_names::template,
                tag_names::html,
            ]) {
                break;
            }
            self.pop_element();
        }
    }

    /// Vide les caractères de table en attente : des caractères autres
    /// que des espaces re-passent par les règles « anything else » du
    /// mode "in body", avec foster parenting.
    pub(crate) fn flush_pending_table_character_tokens(&mut self) {
        let pending =
            std::mem::take(&mut self.pending_table_character_tokens);
        if pending.is_empty() {
            return;
        }

        if pending
            .chars()
            .any(|ch| !matches!(ch, '\t' | '\n' | '\x0C' | '\r' | ' '))
        {
            self.report_bad_content(
                "caractères hors d'une cellule de table",
            );
            self.foster_parenting = true;
            self.reconstruct_active_formatting_elements();
            for ch in pending.chars() {
                self.insert_character(ch);
            }
            // Le texte adopté doit partir avant la fermeture de la
            // table : il est vidé pendant que le foster parenting est
            // encore actif.
            self.flush_character_buffer();
            self.foster_parenting = false;
            self.set_frameset_not_ok();
        } else {
            for ch in pending.chars() {
                self.insert_character(ch);
            }
        }
    }

    pub(crate) fn push_pending_table_character(&mut self, ch: char) {
        self.pending_table_character_tokens.push(ch);
    }

    /// L'algorithme générique d'analyse des éléments de texte brut
    /// (RAWTEXT) et des éléments RCDATA : insérer l'élément, basculer le
    /// tokenizer, retenir le mode d'insertion d'origine, passer en mode
    /// "text".
    pub(crate) fn parse_generic_element(
        &mut self,
        token: &HTMLTagToken,
        state: State,
    ) -> HTMLTreeConstructionControlFlow {
        self.insert_html_element(token);
        self.original_insertion_mode.switch_to(self.insertion_mode);
        self.insertion_mode.switch_to(InsertionMode::Text);
        ControlFlow::Continue(HTMLParserState::SwitchTo(state))
    }
}

// ----------- //
// Diagnostics //
// ----------- //

impl HTMLTreeConstruction {
    pub(crate) fn report(
        &self,
        kind: DiagnosticKind,
        message: impl ToString,
    ) {
        let diagnostic =
            Diagnostic::new(self.location, kind, message);
        crate::emit_html_error!(&diagnostic);
        self.report.report(diagnostic);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#parse-errors>
    pub(crate) fn parse_error(&self, token: &HTMLToken) {
        match token {
            | HTMLToken::Tag(HTMLTagToken {
                name,
                is_end: true,
                ..
            }) => self.report(
                DiagnosticKind::UnmatchedEndTag,
                format!("balise de fin inattendue : {name}"),
            ),
            | HTMLToken::Tag(HTMLTagToken { name, .. }) => self.report(
                DiagnosticKind::BadContent,
                format!("balise de début inattendue : {name}"),
            ),
            | HTMLToken::DOCTYPE(_) => self.report(
                DiagnosticKind::BadDocument,
                "DOCTYPE inattendu",
            ),
            | HTMLToken::Comment(_) => self.report(
                DiagnosticKind::BadContent,
                "commentaire inattendu",
            ),
            | HTMLToken::Character(_) => self.report(
                DiagnosticKind::BadContent,
                "caractère inattendu",
            ),
            | HTMLToken::EOF => self.report(
                DiagnosticKind::BadDocument,
                "fin de fichier inattendue",
            ),
        }
    }

    pub(crate) fn report_misnested(&self, message: impl ToString) {
        self.report(DiagnosticKind::MisnestedTag, message);
    }

    /// Le traitement du jeton est terminé, sans directive pour le
    /// tokenizer.
    pub(crate) fn proceed(&self) -> HTMLTreeConstructionControlFlow {
        ControlFlow::Continue(HTMLParserState::Ignore)
    }

    pub(crate) fn report_bad_content(&self, message: impl ToString) {
        self.report(DiagnosticKind::BadContent, message);
    }
}

// ---------------- //
// Contenu étranger //
// ---------------- //

/// Les balises SVG dont la casse doit être rétablie.
const SVG_TAG_NAME_ADJUSTMENTS: [(&str, &str); 36] = [
    ("altglyph", "altGlyph"),
    ("altglyphdef", "altGlyphDef"),
    ("altglyphitem", "altGlyphItem"),
    ("animatecolor", "animateColor"),
    ("animatemotion", "animateMotion"),
    ("animatetransform", "animateTransform"),
    ("clippath", "clipPath"),
    ("feblend", "feBlend"),
    ("fecolormatrix", "feColorMatrix"),
    ("fecomponenttransfer", "feComponentTransfer"),
    ("fecomposite", "feComposite"),
    ("feconvolvematrix", "feConvolveMatrix"),
    ("fediffuselighting", "feDiffuseLighting"),
    ("fedisplacementmap", "feDisplacementMap"),
    ("fedistantlight", "feDistantLight"),
    ("fedropshadow", "feDropShadow"),
    ("feflood", "feFlood"),
    ("fefunca", "feFuncA"),
    ("fefuncb", "feFuncB"),
    ("fefuncg", "feFuncG"),
    ("fefuncr", "feFuncR"),
    ("fegaussianblur", "feGaussianBlur"),
    ("feimage", "feImage"),
    ("femerge", "feMerge"),
    ("femergenode", "feMergeNode"),
    ("femorphology", "feMorphology"),
    ("feoffset", "feOffset"),
    ("fepointlight", "fePointLight"),
    ("fespecularlighting", "feSpecularLighting"),
    ("fespotlight", "feSpotLight"),
    ("fetile", "feTile"),
    ("feturbulence", "feTurbulence"),
    ("foreignobject", "foreignObject"),
    ("glyphref", "glyphRef"),
    ("lineargradient", "linearGradient"),
    ("radialgradient", "radialGradient"),
];

const SVG_ATTRIBUTE_ADJUSTMENTS: [(&str, &str); 58] = [
    ("attributename", "attributeName"),
    ("attributetype", "attributeType"),
    ("basefrequency", "baseFrequency"),
    ("baseprofile", "baseProfile"),
    ("calcmode", "calcMode"),
    ("clippathunits", "clipPathUnits"),
    ("diffuseconstant", "diffuseConstant"),
    ("edgemode", "edgeMode"),
    ("filterunits", "filterUnits"),
    ("glyphref", "glyphRef"),
    ("gradienttransform", "gradientTransform"),
    ("gradientunits", "gradientUnits"),
    ("kernelmatrix", "kernelMatrix"),
    ("kernelunitlength", "kernelUnitLength"),
    ("keypoints", "keyPoints"),
    ("keysplines", "keySplines"),
    ("keytimes", "keyTimes"),
    ("lengthadjust", "lengthAdjust"),
    ("limitingconeangle", "limitingConeAngle"),
    ("markerheight", "markerHeight"),
    ("markerunits", "markerUnits"),
    ("markerwidth", "markerWidth"),
    ("maskcontentunits", "maskContentUnits"),
    ("maskunits", "maskUnits"),
    ("numoctaves", "numOctaves"),
    ("pathlength", "pathLength"),
    ("patterncontentunits", "patternContentUnits"),
    ("patterntransform", "patternTransform"),
    ("patternunits", "patternUnits"),
    ("pointsatx", "pointsAtX"),
    ("pointsaty", "pointsAtY"),
    ("pointsatz", "pointsAtZ"),
    ("preservealpha", "preserveAlpha"),
    ("preserveaspectratio", "preserveAspectRatio"),
    ("primitiveunits", "primitiveUnits"),
    ("refx", "refX"),
    ("refy", "refY"),
    ("repeatcount", "repeatCount"),
    ("repeatdur", "repeatDur"),
    ("requiredextensions", "requiredExtensions"),
    ("requiredfeatures", "requiredFeatures"),
    ("specularconstant", "specularConstant"),
    ("specularexponent", "specularExponent"),
    ("spreadmethod", "spreadMethod"),
    ("startoffset", "startOffset"),
    ("stddeviation", "stdDeviation"),
    ("stitchtiles", "stitchTiles"),
    ("surfacescale", "surfaceScale"),
    ("systemlanguage", "systemLanguage"),
    ("tablevalues", "tableValues"),
    ("targetx", "targetX"),
    ("targety", "targetY"),
    ("textlength", "textLength"),
    ("viewbox", "viewBox"),
    ("viewtarget", "viewTarget"),
    ("xchannelselector", "xChannelSelector"),
    ("ychannelselector", "yChannelSelector"),
    ("zoomandpan", "zoomAndPan"),
];

impl HTMLTreeConstruction {
    fn adjust_mathml_attributes(token: &mut HTMLTagToken) {
        for attribute in token.attributes.iter_mut() {
            if attribute.name == "definitionurl" {
                attribute.name = String::from("definitionURL");
            }
        }
    }

    fn adjust_svg_attributes(token: &mut HTMLTagToken) {
        for attribute in token.attributes.iter_mut() {
            if let Some((_, adjusted)) = SVG_ATTRIBUTE_ADJUSTMENTS
                .iter()
                .find(|(lower, _)| *lower == attribute.name)
            {
                attribute.name = (*adjusted).to_owned();
            }
        }
    }

    /// Corrige l'usage des attributs à espace de noms, en particulier
    /// XLink dans SVG.
    fn adjust_foreign_attributes(token: &mut HTMLTagToken) {
        for attribute in token.attributes.iter_mut() {
            let (prefix, local_name, namespace) =
                match attribute.name.as_str() {
                    | "xlink:actuate" | "xlink:arcrole" | "xlink:href"
                    | "xlink:role" | "xlink:show" | "xlink:title"
                    | "xlink:type" => (
                        Some("xlink"),
                        &attribute.name["xlink:".len()..],
                        Namespace::XLink,
                    ),
                    | "xml:lang" | "xml:space" => (
                        Some("xml"),
                        &attribute.name["xml:".len()..],
                        Namespace::XML,
                    ),
                    | "xmlns" => (None, "xmlns", Namespace::XMLNS),
                    | "xmlns:xlink" => {
                        (Some("xmlns"), "xlink", Namespace::XMLNS)
                    }
                    | _ => continue,
                };

            attribute.prefix = prefix.map(str::to_owned);
            attribute.namespace_uri = Some(namespace.uri().to_owned());
            attribute.name = local_name.to_owned();
        }
    }

    fn process_using_the_rules_for_foreign_content(
        &mut self,
        token: &mut HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token that is U+0000 NULL
            //
            // Erreur d'analyse. Insérer un caractère U+FFFD REPLACEMENT
            // CHARACTER.
            | HTMLToken::Character('\0') => {
                self.parse_error(token);
                self.insert_character(char::REPLACEMENT_CHARACTER);
            }

            // U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, U+0020 SPACE
            //
            // Insérer le caractère du jeton.
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.insert_character(*ch);
            }

            // Any other character token
            | HTMLToken::Character(ch) => {
                self.insert_character(*ch);
                self.set_frameset_not_ok();
            }

            // A comment token
            | HTMLToken::Comment(comment) => {
                self.insert_comment(comment.to_owned());
            }

            // A DOCTYPE token
            //
            // Erreur d'analyse. Ignorer le jeton.
            | HTMLToken::DOCTYPE(_) => {
                self.parse_error(token);
            }

            // Les balises de rupture : le contenu HTML mal placé dans le
            // contenu étranger dépile jusqu'à un point d'intégration,
            // puis est retraité dans le contenu HTML.
            | HTMLToken::Tag(ref tag)
                if Self::is_foreign_breakout_tag(tag) =>
            {
                self.parse_error(token);

                while let Some(current) = self.current_node() {
                    if current.is_mathml_text_integration_point()
                        || current.is_html_text_integration_point()
                        || current.is_in_html_namespace()
                    {
                        break;
                    }
                    self.pop_element();
                }

                return self.process_using_the_rules_for(
                    self.insertion_mode,
                    token.to_owned(),
                );
            }

            // Any other start tag
            | HTMLToken::Tag(tag) if !tag.is_end => {
                let adjusted_namespace =
                    self.adjusted_current_node().namespace;

                match adjusted_namespace {
                    | Namespace::MathML => {
                        Self::adjust_mathml_attributes(tag);
                    }
                    | Namespace::SVG => {
                        if let Some((_, adjusted)) =
                            SVG_TAG_NAME_ADJUSTMENTS.iter().find(
                                |(lower, _)| *lower == tag.name,
                            )
                        {
                            tag.name = (*adjusted).to_owned();
                        }
                        Self::adjust_svg_attributes(tag);
                    }
                    | _ => {}
                }

                Self::adjust_foreign_attributes(tag);

                self.insert_foreign_element(tag, adjusted_namespace);

                if tag.self_closing_flag {
                    tag.set_acknowledge_self_closing_flag();
                    self.pop_element();
                }
            }

            // Any other end tag
            //
            // Si le nom du nœud actuel, en minuscules, ne correspond pas
            // au nom de la balise : erreur d'analyse. Remonter la pile
            // jusqu'à un nœud du même nom (le dépiler, lui et tout ce qui
            // est au-dessus), ou jusqu'à un nœud HTML (retraiter selon le
            // mode d'insertion courant).
            | HTMLToken::Tag(ref tag) => {
                let matches_current =
                    self.current_node().is_some_and(|node| {
                        node.local_name.to_ascii_lowercase() == tag.name
                    });

                if !matches_current {
                    self.parse_error(token);
                }

                loop {
                    let Some(node) = self.current_node().cloned() else {
                        break;
                    };

                    if node.is_in_html_namespace() {
                        return self.process_using_the_rules_for(
                            self.insertion_mode,
                            token.to_owned(),
                        );
                    }

                    let popped =
                        self.pop_element().expect("Le nœud actuel");
                    if popped.local_name.to_ascii_lowercase()
                        == tag.name
                    {
                        break;
                    }
                }
            }

            | HTMLToken::EOF => return self.stop(),
        }

        ControlFlow::Continue(HTMLParserState::Ignore)
    }

    /// Une balise de début parmi b, big, blockquote, body, br, center,
    /// code, dd, div, dl, dt, em, embed, h1 à h6, head, hr, i, img, li,
    /// listing, menu, meta, nobr, ol, p, pre, ruby, s, small, span,
    /// strong, strike, sub, sup, table, tt, u, ul, var ; une balise
    /// `font` portant un attribut color, face ou size ; ou une balise de
    /// fin br ou p.
    fn is_foreign_breakout_tag(tag: &HTMLTagToken) -> bool {
        if tag.is_end {
            return tag
                .name
                .as_str()
                .is_one_of([tag_names::br, tag_names::p]);
        }

        tag.name.as_str().is_one_of([
            tag_names::b,
            tag_names::big,
            tag_names::blockquote,
            tag_names::body,
            tag_names::br,
            tag_names::center,
            tag_names::code,
            tag_names::dd,
            tag_names::div,
            tag_names::dl,
            tag_names::dt,
            tag_names::em,
            tag_names::embed,
            tag_names::h1,
            tag_names::h2,
            tag_names::h3,
            tag_names::h4,
            tag_names::h5,
            tag_names::h6,
            tag_names::head,
            tag_names::hr,
            tag_names::i,
            tag_names::img,
            tag_names::li,
            tag_names::listing,
            tag_names::menu,
            tag_names::meta,
            tag_names::nobr,
            tag_names::ol,
            tag_names::p,
            tag_names::pre,
            tag_names::ruby,
            tag_names::s,
            tag_names::small,
            tag_names::span,
            tag_names::strong,
            tag_names::strike,
            tag_names::sub,
            tag_names::sup,
            tag_names::table,
            tag_names::tt,
            tag_names::u,
            tag_names::ul,
            tag_names::var,
        ]) || (tag_names::font == &tag.name
            && ["color", "face", "size"]
                .into_iter()
                .any(|name| tag.has_attribute(name)))
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl Default for HTMLTreeConstruction {
    fn default() -> Self {
        Self::new()
    }
}
