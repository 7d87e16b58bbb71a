/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

// --------- //
// Interface //
// --------- //

pub trait StreamIteratorInterface {
    type Input: StreamInputInterface;

    /// Avance de `n` entrées dans le flux, et renvoie la dernière entrée
    /// consommée.
    fn advance(&mut self, n: usize) -> Option<Self::Input> {
        let mut last = None;
        for _ in 0..n {
            last = self.consume_next_input();
        }
        last
    }

    /// Avance dans le flux autant que possible, tant que le prédicat est
    /// vrai, avec une limite optionnelle.
    ///
    /// Exemple :
    ///
    /// Le flux d'entrée de départ vaut `[' ', ' ', ' ', 'a', ' ', 'b']` ;
    /// on veut avancer dans le flux tant que le caractère suivant est un
    /// espace. Après l'opération, le flux d'entrée vaut `['a', ' ', 'b']`.
    fn advance_as_long_as_possible<Predicate>(
        &mut self,
        predicate: Predicate,
        with_limit: Option<usize>,
    ) -> Vec<Self::Input>
    where
        Predicate: Fn(&Self::Input) -> bool,
    {
        let mut result = vec![];

        loop {
            if let Some(limit) = with_limit {
                if result.len() >= limit {
                    break;
                }
            }

            match self.next_input() {
                | Some(next) if predicate(&next) => {
                    result.push(
                        self.consume_next_input()
                            .expect("l'entrée regardée en avance"),
                    );
                }
                | _ => break,
            }
        }

        result
    }

    /// Consomme la première entrée d'un flux.
    fn consume_next_input(&mut self) -> Option<Self::Input>;

    /// La dernière entrée d'un flux à avoir été consommée.
    fn current_input(&self) -> Option<&Self::Input>;

    /// La première entrée d'un flux qui n'a pas encore été consommée.
    fn next_input(&mut self) -> Option<Self::Input>;

    /// Pousse [l'entrée actuelle](Self::current_input) à l'avant d'un
    /// flux, de sorte à ce que la prochaine fois qu'il sera demandé de
    /// consommer l'entrée suivante, il reprendra plutôt l'entrée actuelle.
    fn reconsume_current_input(&mut self);
}

pub trait StreamInputInterface:
    PartialEq + Eq + Clone + std::fmt::Debug
{
    /// Un jeton conceptuel représentant la fin de la liste des jetons.
    /// Lorsque la liste de jetons est vide, le prochain jeton d'entrée est
    /// toujours un <EOF-token>.
    fn eof() -> Self;

    /// Est-ce que l'entrée est une fin de flux ?
    fn is_eof(&self) -> bool {
        *self == Self::eof()
    }
}

