//! Text cleanup rules for values pulled out of infobox cells.
//!
//! Wikipedia markup leaks a fair amount of noise into plain text: non-breaking
//! spaces, inline `<style>` bodies emitted by fraction templates, and link text
//! that repeats the surrounding words. [`normalize_text`] applies the full rule
//! sequence; [`clean_field`] only fixes whitespace.
//!
//! Rule order:
//!
//! 1. non-breaking spaces and line breaks become plain spaces
//! 2. whitespace runs collapse to one space, ends are trimmed
//! 3. stylesheet residue is stripped
//! 4. whitespace is collapsed again
//! 5. adjacent duplicate words are dropped
//! 6. volume units are canonicalized (`mL`, `oz`, `cL`)
//!
//! The sequence is repeated until the text stops changing, so the result is
//! stable under a second application.
//!
//! # Example
//!
//! ```rust
//! use cocktails_core::normalize::normalize_text;
//!
//! assert_eq!(normalize_text("3\u{a0}cl Gin Gin"), "3 cL Gin");
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on rule passes while searching for a fixpoint.
const MAX_PASSES: usize = 8;

/// Characters that render as a space but are not ASCII whitespace-collapsible.
const SPACE_LIKE: [char; 6] = ['\u{00A0}', '\u{2007}', '\u{202F}', '\r', '\n', '\t'];

/// Stylesheet residue, applied in order. Each pattern is replaced with the
/// paired string.
static STYLE_RESIDUE: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // `.frac{white-space:nowrap}`
        (r"\.\w+\s*\{[^}]*\}", ""),
        // bare rule bodies
        (r"\{[^}]*\}", ""),
        // `( .mw-parser-output ... )`
        (r"\(\s*\.mw-parser-output\s*[^)]*\)", ""),
        // `(.sr-only ...)`
        (r"\(\s*\.[a-zA-Z-]+[^)]*\)", ""),
        (r"\.mw-parser-output\S*", ""),
        // utility class stems, optionally chained: `.frac .num,`
        (r"\.(frac|num|den|sr-only)(\s+\.\w+)*[^a-zA-Z0-9]", " "),
        // `vertical-align:super;`
        (r"[a-z-]+:[^;}\s]+[;\s]", ""),
        // dangling ` .den`
        (r"\s+\.\w+", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

static UNIT_ML: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(\d*)ml\b").unwrap());
static UNIT_OZ: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(\d*)oz\b").unwrap());
static UNIT_CL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(\d*)cl\b").unwrap());

/// Replace non-breaking space variants, `&nbsp;` residue, and line breaks
/// with a plain space.
pub fn replace_space_like(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace(SPACE_LIKE, " ")
}

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-only cleanup used for plain infobox fields.
pub fn clean_field(text: &str) -> String {
    collapse_whitespace(&replace_space_like(text))
}

/// Strip stylesheet fragments that leak from inline `<style>` elements.
pub fn strip_style_residue(text: &str) -> String {
    STYLE_RESIDUE
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| re.replace_all(&acc, *replacement).into_owned())
}

/// Drop a word when it equals the previous kept word, ignoring case.
///
/// The first occurrence keeps its original casing.
pub fn dedup_adjacent_words(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut previous: Option<String> = None;

    for word in text.split_whitespace() {
        let lowered = word.to_lowercase();
        if previous.as_deref() != Some(lowered.as_str()) {
            kept.push(word);
            previous = Some(lowered);
        }
    }

    kept.join(" ")
}

/// Rewrite volume units to `mL`, `oz` and `cL`, whatever their input casing.
///
/// Units glued to a number (`1cl`) are rewritten too.
pub fn canonicalize_units(text: &str) -> String {
    let text = UNIT_ML.replace_all(text, "${1}mL");
    let text = UNIT_OZ.replace_all(&text, "${1}oz");
    UNIT_CL.replace_all(&text, "${1}cL").into_owned()
}

fn apply_rules(text: &str) -> String {
    let text = collapse_whitespace(&replace_space_like(text));
    let text = collapse_whitespace(&strip_style_residue(&text));
    let text = dedup_adjacent_words(&text);
    canonicalize_units(&text)
}

/// Full normalization for ingredient text.
pub fn normalize_text(text: &str) -> String {
    let mut current = apply_rules(text);

    for _ in 1..MAX_PASSES {
        let next = apply_rules(&current);
        if next == current {
            break;
        }
        current = next;
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Lime\u{a0}juice", "Lime juice")]
    #[case("Lime&nbsp;juice", "Lime juice")]
    #[case("Lime\r\njuice", "Lime juice")]
    #[case("  Lime \t  juice  ", "Lime juice")]
    fn test_clean_field(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_field(input), expected);
    }

    #[test]
    fn test_clean_field_keeps_units() {
        assert_eq!(clean_field("2 OZ gin"), "2 OZ gin");
    }

    #[rstest]
    #[case("Lime Lime juice", "Lime juice")]
    #[case("gin Gin GIN tonic", "gin tonic")]
    #[case("a b a b", "a b a b")]
    #[case("", "")]
    fn test_dedup_adjacent_words(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(dedup_adjacent_words(input), expected);
    }

    #[test]
    fn test_canonicalize_units() {
        let out = canonicalize_units("60 ml gin, 2 OZ lime, 1cl syrup");
        assert_eq!(out, "60 mL gin, 2 oz lime, 1cL syrup");
    }

    #[test]
    fn test_canonicalize_units_ignores_words() {
        assert_eq!(canonicalize_units("html cloze ozone"), "html cloze ozone");
    }

    #[test]
    fn test_strip_frac_template_residue() {
        let leaked = "1 .mw-parser-output .frac{white-space:nowrap}.mw-parser-output .frac .num,.mw-parser-output .frac .den{font-size:80%;line-height:0;vertical-align:super}.mw-parser-output .frac .den{vertical-align:sub} oz gin";
        let out = normalize_text(leaked);
        assert!(!out.contains('{'));
        assert!(!out.contains("mw-parser-output"));
        assert!(!out.contains(".frac"));
        assert!(out.ends_with("oz gin"));
    }

    #[test]
    fn test_strip_parenthesized_class_reference() {
        assert_eq!(normalize_text("Vodka (.mw-parser-output .sr-only) 4 cl"), "Vodka 4 cL");
    }

    #[test]
    fn test_strip_declaration_fragment() {
        assert_eq!(normalize_text("Gin display:none; 3 cl"), "Gin 3 cL");
    }

    #[test]
    fn test_normalize_dedups_after_stripping() {
        assert_eq!(normalize_text("Lime {color:red} Lime juice"), "Lime juice");
    }

    #[rstest]
    #[case("60 ml gin, 2 OZ lime, 1cl syrup")]
    #[case("1 .mw-parser-output .frac{white-space:nowrap} .frac .num 1⁄2 oz Lime Lime juice")]
    #[case("x { {y} } .a.b .c")]
    #[case("Tonic\u{a0}water  (.sr-only hidden) ML ml")]
    #[case("")]
    fn test_normalize_is_idempotent(#[case] input: &str) {
        let once = normalize_text(input);
        assert_eq!(normalize_text(&once), once);
    }
}
