/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Primitives de la norme Infra (points de code, emplacements).
pub mod primitive {
    pub mod codepoint;
    pub mod location;
}

/// Espaces de noms reconnus par les analyseurs HTML et XML.
pub mod namespace;

/// Structures de données partagées par les étapes du pipeline.
pub mod structure {
    pub mod lists {
        pub mod peekable;
        pub mod queue;
    }
}
