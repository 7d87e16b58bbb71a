/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use parser::signal::Signal;

use crate::{
    tokenization::{HTMLToken, QuirksMode},
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
        InsertionMode,
    },
};

impl HTMLTreeConstruction {
    pub(crate) fn handle_initial_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, U+0020 SPACE
            //
            // Ignorer le jeton.
            | HTMLToken::Character(ch) if ch.is_ascii_whitespace() => {
                self.proceed()
            }

            // A comment token
            //
            // Insérer un commentaire comme dernier enfant de l'objet
            // Document.
            | HTMLToken::Comment(comment) => {
                self.insert_comment_in_document(comment);
                self.proceed()
            }

            // A DOCTYPE token
            //
            // Si le nom du DOCTYPE n'est pas « html », ou si son
            // identifiant public n'est pas manquant, ou si son
            // identifiant système n'est ni manquant ni
            // « about:legacy-compat » : erreur d'analyse. Émettre le
            // signal Doctype, retenir le mode quirks qu'il impose, puis
            // passer le mode d'insertion à "before html".
            | HTMLToken::DOCTYPE(ref doctype) => {
                let is_parse_error = !doctype.is_html_name()
                    || !doctype.is_public_identifier_missing()
                    || !(doctype.is_system_identifier_missing()
                        || doctype.is_about_legacy_compat());

                if is_parse_error {
                    self.parse_error(&token);
                }

                self.set_quirks_mode(doctype.quirks_mode());
                self.emit_doctype(Signal::Doctype(doctype.into()));
                self.insertion_mode.switch_to(InsertionMode::BeforeHTML);
                self.proceed()
            }

            // Anything else
            //
            // Erreur d'analyse : le document est en mode quirks. Passer
            // le mode d'insertion à "before html", puis retraiter le
            // jeton.
            | _ => {
                self.parse_error(&token);
                self.set_quirks_mode(QuirksMode::Yes);
                self.insertion_mode.switch_to(InsertionMode::BeforeHTML);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }
        }
    }
}
