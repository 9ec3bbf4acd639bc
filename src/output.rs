//! Output file naming.
//!
//! Outputs are named `{date}-{host}-{slug}` and never overwrite an earlier
//! run: the first free stem among `base`, `base-2`, `base-3`, ... is used for
//! every extension of the run.

use std::path::Path;

use crate::patterns::SLUG_INVALID;
use crate::url_utils::extract_hostname;

const SLUG_FALLBACK: &str = "document";
const HOST_FALLBACK: &str = "source";

/// Lower-case ASCII slug of `value`.
///
/// Latin letters with diacritics are folded to their base letter, other
/// non-ASCII characters are dropped, and every run of characters outside
/// `[a-z0-9]` becomes one `-`. Falls back to `"document"`.
///
/// # Examples
/// ```
/// use rs_html2md::output::slugify;
///
/// assert_eq!(slugify("Crème Brûlée: A How-To!"), "creme-brulee-a-how-to");
/// assert_eq!(slugify("日本語"), "document");
/// ```
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    for c in value.chars() {
        push_folded(&mut folded, c);
    }
    let folded = folded.to_lowercase();
    let slug = SLUG_INVALID.replace_all(&folded, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        slug.to_string()
    }
}

/// Base file name for a run: `{date}-{host}-{slug}`.
///
/// The date is the publish date when known, else the generation date, with
/// dashes removed. A leading `www.` is dropped from the host.
///
/// # Examples
/// ```
/// use rs_html2md::output::build_output_basename;
///
/// let name = build_output_basename(
///     "Hello World",
///     "https://www.example.com/post",
///     Some("2024-03-05"),
///     "2024-06-01",
/// );
/// assert_eq!(name, "20240305-example.com-hello-world");
/// ```
#[must_use]
pub fn build_output_basename(
    title: &str,
    source_url: &str,
    publish_date: Option<&str>,
    generated_date: &str,
) -> String {
    let host = extract_hostname(source_url).unwrap_or_else(|| HOST_FALLBACK.to_string());
    let host = host.replace("www.", "");

    let date = publish_date
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(generated_date)
        .replace('-', "");

    format!("{date}-{host}-{}", slugify(title))
}

/// First stem under `dir` that is free for every extension.
///
/// `extensions` include the dot (`".md"`).
#[must_use]
pub fn reserve_free_stem(dir: &Path, base: &str, extensions: &[&str]) -> String {
    let is_free = |stem: &str| {
        extensions
            .iter()
            .all(|ext| !dir.join(format!("{stem}{ext}")).exists())
    };

    if is_free(base) {
        return base.to_string();
    }

    (2_usize..)
        .map(|n| format!("{base}-{n}"))
        .find(|stem| is_free(stem))
        .unwrap_or_else(|| base.to_string())
}

/// Append the ASCII spelling of `c` to `out`; characters without one are dropped.
///
/// Fullwidth forms map to their ASCII twins and ligatures are spelled out.
fn push_folded(out: &mut String, c: char) {
    if let Some(folded) = fold_to_ascii(c) {
        out.push(folded);
        return;
    }

    let spelled = match c {
        '\u{FF01}'..='\u{FF5E}' => {
            if let Some(ascii) = char::from_u32(u32::from(c) - 0xFEE0) {
                out.push(ascii);
            }
            return;
        }
        '\u{3000}' => " ",
        'Æ' => "AE",
        'æ' => "ae",
        'Œ' => "OE",
        'œ' => "oe",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'ß' => "ss",
        'ﬀ' => "ff",
        'ﬁ' => "fi",
        'ﬂ' => "fl",
        'ﬃ' => "ffi",
        'ﬄ' => "ffl",
        'ﬅ' | 'ﬆ' => "st",
        _ => return,
    };
    out.push_str(spelled);
}

/// ASCII form of a character: itself when ASCII, the base letter for common
/// Latin diacritics, `None` otherwise.
fn fold_to_ascii(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }

    let folded = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ď' | 'Đ' => 'D',
        'ď' | 'đ' => 'd',
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => 'G',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'Ĥ' => 'H',
        'ĥ' => 'h',
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'Ĵ' => 'J',
        'ĵ' => 'j',
        'Ķ' => 'K',
        'ķ' => 'k',
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ł' => 'L',
        'ĺ' | 'ļ' | 'ľ' | 'ł' => 'l',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => 'N',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'Ŕ' | 'Ŗ' | 'Ř' => 'R',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => 'S',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'Ţ' | 'Ť' => 'T',
        'ţ' | 'ť' => 't',
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ŵ' => 'W',
        'ŵ' => 'w',
        'Ý' | 'Ŷ' | 'Ÿ' => 'Y',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };
    Some(folded)
}
