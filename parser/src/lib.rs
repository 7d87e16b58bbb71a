/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Voir <https://html.spec.whatwg.org/multipage/parsing.html#the-input-byte-stream>
pub mod decoder;
/// Rapport d'erreurs d'analyse, commun aux analyseurs HTML et XML.
pub mod diagnostic;
/// Voir <https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream>
pub mod preprocessor;
/// La sortie des analyseurs : une traversée gauche-droite de l'arbre.
pub mod signal;
/// La primitive de flux tiré par l'aval, et ses combinateurs.
pub mod stream;

mod interface;

pub use self::interface::{StreamInputInterface, StreamIteratorInterface};
