/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

// --------- //
// Interface //
// --------- //

pub trait PeekableInterface<T, I>
where
    T: Iterator<Item = I>,
{
    /// La première entrée qui n'a pas encore été consommée, sans avancer
    /// dans l'itération.
    fn peek(&mut self) -> Option<&T::Item>;

    /// Les N premières entrées qui n'ont pas encore été consommées, sans
    /// avancer dans l'itération. Renvoie moins de N entrées si le flux
    /// se termine avant.
    fn peek_until<R: FromIterator<T::Item>>(&mut self, n: usize) -> R;
}
