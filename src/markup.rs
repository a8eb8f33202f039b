//! Markup stripping for candidate text
//!
//! Candidates coming from a lookup may already contain tags or character
//! entities. Before highlighting, everything that looks like a tag is removed
//! and entities are decoded, so only the text content survives.

/// Remove `<...>` tags from `input` and decode common character entities.
///
/// A `<` only opens a tag when followed by an ASCII letter, `/`, `!` or `?`;
/// otherwise it is ordinary text (`a < b` stays intact). An unterminated tag
/// swallows the rest of the input, matching how HTML parsers treat EOF inside
/// a tag.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('<') {
        let (text, tail) = rest.split_at(pos);
        out.push_str(text);

        let opens_tag = tail[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));

        if !opens_tag {
            out.push('<');
            rest = &tail[1..];
            continue;
        }

        match tail.find('>') {
            Some(end) => rest = &tail[end + 1..],
            None => {
                rest = "";
            }
        }
    }
    out.push_str(rest);

    decode_entities(&out)
}

/// Decode named (`&amp;`, `&lt;`, ...) and numeric (`&#39;`, `&#x27;`) entities.
/// Unknown or malformed entities are kept verbatim.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        // Entities are short; don't scan arbitrarily far for the semicolon
        let semi = tail
            .char_indices()
            .take(12)
            .find(|&(_, c)| c == ';')
            .map(|(i, _)| i);

        let decoded = semi.and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
