/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::fmt;
use std::{cell::RefCell, rc::Rc};

use infra::primitive::location::Location;

// ----- //
// Macro //
// ----- //

/// La journalisation des diagnostics est du ressort de l'étape qui les
/// constate ; le [Report] ne fait que les collecter.
#[macro_export]
macro_rules! emit_parser_error {
    ($err:expr) => {
        log::error!("[ParserError]: {}", $err);
    };
}

// --------- //
// Structure //
// --------- //

/// Un diagnostic d'analyse : toutes les erreurs de balisage sont
/// récupérables, l'analyseur continue après chacune d'elles. Un
/// diagnostic rattaché à un jeton est délivré avant le signal dérivé de
/// ce jeton.
#[derive(Debug)]
#[derive(Clone)]
#[derive(PartialEq, Eq)]
pub struct Diagnostic {
    pub location: Location,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Le réceptacle des diagnostics. Par défaut, les diagnostics sont
/// journalisés puis abandonnés ; un collecteur partagé permet au
/// consommateur de les lire au fil des signaux.
#[derive(Debug)]
#[derive(Clone)]
#[derive(Default)]
pub struct Report {
    collected: Option<Rc<RefCell<Vec<Diagnostic>>>>,
}

// ----------- //
// Énumération //
// ----------- //

#[derive(Debug)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
pub enum DiagnosticKind {
    DecodingError,
    BadToken,
    BadDocument,
    UnmatchedEndTag,
    MisnestedTag,
    BadNamespace,
    AttributeDuplicated,
    BadContent,
}

// -------------- //
// Implémentation //
// -------------- //

impl Diagnostic {
    pub fn new(
        location: Location,
        kind: DiagnosticKind,
        message: impl ToString,
    ) -> Self {
        Self {
            location,
            kind,
            message: message.to_string(),
        }
    }
}

impl Report {
    /// Un rapport qui conserve les diagnostics, lisibles via
    /// [Report::diagnostics].
    pub fn collector() -> Self {
        Self {
            collected: Some(Rc::default()),
        }
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        if let Some(collected) = self.collected.as_ref() {
            collected.borrow_mut().push(diagnostic);
        }
    }

    /// Les diagnostics collectés jusqu'ici, dans l'ordre d'émission.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.collected
            .as_ref()
            .map(|collected| collected.borrow().to_owned())
            .unwrap_or_default()
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                | Self::DecodingError => "decoding-error",
                | Self::BadToken => "bad-token",
                | Self::BadDocument => "bad-document",
                | Self::UnmatchedEndTag => "unmatched-end-tag",
                | Self::MisnestedTag => "misnested-tag",
                | Self::BadNamespace => "bad-namespace",
                | Self::AttributeDuplicated => "attribute-duplicated",
                | Self::BadContent => "bad-content",
            }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} à {} : {}",
            self.kind, self.location, self.message
        )
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_shares_its_storage() {
        let report = Report::collector();
        let shared = report.clone();

        shared.report(Diagnostic::new(
            Location::new(),
            DiagnosticKind::BadToken,
            "entité inconnue",
        ));

        assert_eq!(report.diagnostics().len(), 1);
        assert_eq!(
            report.diagnostics()[0].kind,
            DiagnosticKind::BadToken
        );
    }

    #[test]
    fn test_default_report_discards() {
        let report = Report::default();
        report.report(Diagnostic::new(
            Location::new(),
            DiagnosticKind::BadDocument,
            "ignoré",
        ));
        assert!(report.diagnostics().is_empty());
    }
}
