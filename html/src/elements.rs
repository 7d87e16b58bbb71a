/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use core::{fmt, str};

// ------ //
// Macros //
// ------ //

macro_rules! enumerate_html_tag_names {
    (
        $( $name:ident $( = $literal:literal )? ),* $(,)?
    ) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug)]
        #[derive(Copy, Clone)]
        #[derive(PartialEq, Eq)]
        pub enum tag_names {
        $(
            #[allow(non_upper_case_globals)]
            #[doc = "Nom de la balise :"]
            #[doc = stringify!($name)]
            $name
        ),*
        }

        impl tag_names {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(
                        | Self::$name =>
                            enumerate_html_tag_names!(@str $name $($literal)?)
                    ),*
                }
            }
        }

        impl str::FromStr for tag_names {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $(
                        | enumerate_html_tag_names!(@str $name $($literal)?)
                            => Self::$name,
                    )*
                    | _ => return Err("Élément inconnu")
                })
            }
        }
    };

    (@str $name:ident) => { stringify!($name) };
    (@str $name:ident $literal:literal) => { $literal };
}

// ----------- //
// Énumération //
// ----------- //

enumerate_html_tag_names! {
    a, address, annotationXml = "annotation-xml", applet, area, article,
    aside, b, base, basefont, bgsound, big, blockquote, body, br, button,
    caption, center, code, col, colgroup, dd, desc, details, dialog, dir,
    div, dl, dt, em, embed, fieldset, figcaption, figure, font, footer,
    foreignObject, form, frame, frameset, h1, h2, h3, h4, h5, h6, head,
    header, hgroup, hr, html, i, iframe, image, img, input, keygen, label,
    li, link, listing, main, malignmark, marquee, math, menu, meta,
    mglyph, mi, mn, mo, ms, mtext, nav, nobr, noembed, noframes, noscript,
    object, ol, optgroup, option, p, param, plaintext, pre, rb, rp, rt,
    rtc, ruby, s, script, section, select, small, source, span, strike,
    strong, style, sub, summary, sup, svg, table, tbody, td, template,
    textarea, tfoot, th, thead, title, tr, track, tt, u, ul, var, wbr,
    xmp,
}

// --------- //
// Interface //
// --------- //

pub trait IsOneOfTagsInterface {
    fn is_one_of(self, arr: impl IntoIterator<Item = tag_names>) -> bool;
}

// -------------- //
// Implémentation //
// -------------- //

impl tag_names {
    /// Les éléments vides sont émis sans balise de fin par l'écrivain
    /// HTML.
    pub const VOID_ELEMENTS: [Self; 16] = [
        Self::area,
        Self::base,
        Self::basefont,
        Self::bgsound,
        Self::br,
        Self::col,
        Self::embed,
        Self::frame,
        Self::hr,
        Self::img,
        Self::input,
        Self::keygen,
        Self::link,
        Self::meta,
        Self::source,
        Self::track,
    ];

    /// Le contenu de ces éléments est émis brut, sans échappement.
    pub const RAW_TEXT_ELEMENTS: [Self; 8] = [
        Self::iframe,
        Self::noembed,
        Self::noframes,
        Self::noscript,
        Self::plaintext,
        Self::script,
        Self::style,
        Self::xmp,
    ];

    /// Les éléments de mise en forme suivis par la liste des éléments de
    /// mise en forme actifs.
    pub const FORMATTING_ELEMENTS: [Self; 14] = [
        Self::a,
        Self::b,
        Self::big,
        Self::code,
        Self::em,
        Self::font,
        Self::i,
        Self::nobr,
        Self::s,
        Self::small,
        Self::strike,
        Self::strong,
        Self::tt,
        Self::u,
    ];

    /// La catégorie "special" de la spécification HTML (sous-ensemble
    /// HTML ; les éléments MathML et SVG spéciaux sont testés par espace
    /// de noms).
    pub fn is_special(self) -> bool {
        self.is_one_of([
            Self::address,
            Self::applet,
            Self::area,
            Self::article,
            Self::aside,
            Self::base,
            Self::basefont,
            Self::bgsound,
            Self::blockquote,
            Self::body,
            Self::br,
            Self::button,
            Self::caption,
            Self::center,
            Self::col,
            Self::colgroup,
            Self::dd,
            Self::details,
            Self::dir,
            Self::div,
            Self::dl,
            Self::dt,
            Self::embed,
            Self::fieldset,
            Self::figcaption,
            Self::figure,
            Self::footer,
            Self::form,
            Self::frame,
            Self::frameset,
            Self::h1,
            Self::h2,
            Self::h3,
            Self::h4,
            Self::h5,
            Self::h6,
            Self::head,
            Self::header,
            Self::hgroup,
            Self::hr,
            Self::html,
            Self::iframe,
            Self::img,
            Self::input,
            Self::keygen,
            Self::li,
            Self::link,
            Self::listing,
            Self::main,
            Self::marquee,
            Self::menu,
            Self::meta,
            Self::nav,
            Self::noembed,
            Self::noframes,
            Self::noscript,
            Self::object,
            Self::ol,
            Self::p,
            Self::param,
            Self::plaintext,
            Self::pre,
            Self::script,
            Self::section,
            Self::select,
            Self::source,
            Self::style,
            Self::summary,
            Self::table,
            Self::tbody,
            Self::td,
            Self::template,
            Self::textarea,
            Self::tfoot,
            Self::th,
            Self::thead,
            Self::title,
            Self::tr,
            Self::track,
            Self::ul,
            Self::wbr,
            Self::xmp,
        ])
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl IsOneOfTagsInterface for tag_names {
    fn is_one_of(self, arr: impl IntoIterator<Item = tag_names>) -> bool {
        arr.into_iter().any(|tag_name| self == tag_name)
    }
}

impl IsOneOfTagsInterface for &str {
    fn is_one_of(self, arr: impl IntoIterator<Item = tag_names>) -> bool {
        arr.into_iter().any(|tag_name| tag_name.as_str() == self)
    }
}

impl PartialEq<&str> for tag_names {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for tag_names {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&String> for tag_names {
    fn eq(&self, other: &&String) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for tag_names {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("div".parse(), Ok(tag_names::div));
        assert_eq!(
            "annotation-xml".parse(),
            Ok(tag_names::annotationXml)
        );
        assert!("inconnu".parse::<tag_names>().is_err());
    }

    #[test]
    fn test_is_one_of_for_strings() {
        assert!("br".is_one_of([tag_names::br, tag_names::p]));
        assert!(!"div".is_one_of([tag_names::br, tag_names::p]));
    }
}
