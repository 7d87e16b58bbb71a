/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::{
    tokenization::HTMLToken,
    tree_construction::{
        HTMLTreeConstruction, HTMLTreeConstructionControlFlow,
    },
};

impl HTMLTreeConstruction {
    /// Le mode "text" reçoit le contenu des éléments RCDATA et de texte
    /// brut (title, textarea, style, script, ...) : tout caractère est
    /// inséré tel quel, la balise de fin dépile et restaure le mode
    /// d'insertion d'origine.
    pub(crate) fn handle_text_insertion_mode(
        &mut self,
        token: HTMLToken,
    ) -> HTMLTreeConstructionControlFlow {
        match token {
            // A character token
            | HTMLToken::Character(ch) => {
                self.insert_character(ch);
                self.proceed()
            }

            // EOF
            //
            // Erreur d'analyse. Dépiler le nœud actuel, restaurer le mode
            // d'insertion d'origine, et retraiter le jeton.
            | HTMLToken::EOF => {
                self.parse_error(&token);
                self.pop_element();
                self.insertion_mode
                    .switch_to(self.original_insertion_mode);
                self.process_using_the_rules_for(
                    self.insertion_mode,
                    token,
                )
            }

            // Any end tag (y compris "script" : aucune exécution)
            | _ => {
                self.pop_element();
                self.insertion_mode
                    .switch_to(self.original_insertion_mode);
                self.proceed()
            }
        }
    }
}
