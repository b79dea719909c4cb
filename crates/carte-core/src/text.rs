// crates/carte-core/src/text.rs

/// Lowercase key used for grouping cities and for plain search matching.
#[inline]
pub fn lower_key(s: &str) -> String {
    s.to_lowercase()
}

/// Convert a string into a folded key suitable for accent-insensitive
/// comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Orléans` -> `Orleans`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use carte_core::text::fold_key;
///
/// assert_eq!(fold_key("Orléans"), "orleans");
/// assert_eq!(fold_key("Saint-Étienne"), "saint-etienne");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Picks [`fold_key`] or [`lower_key`].
#[inline]
pub fn search_key(s: &str, fold_accents: bool) -> String {
    if fold_accents {
        fold_key(s)
    } else {
        lower_key(s)
    }
}

/// Escapes text for insertion into popup HTML.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_key_keeps_accents() {
        assert_eq!(lower_key("ORLÉANS"), "orléans");
        assert_ne!(lower_key("Orléans"), lower_key("Orleans"));
    }

    #[test]
    fn fold_key_strips_accents() {
        assert_eq!(fold_key("Orléans"), fold_key("orleans"));
        assert_eq!(search_key("Évry", true), "evry");
        assert_eq!(search_key("Évry", false), "évry");
    }

    #[test]
    fn escape_html_replaces_markup() {
        assert_eq!(escape_html("A&B <x> \"q\" l'a"), "A&amp;B &lt;x&gt; &quot;q&quot; l&#39;a");
    }
}
