/// Index of the colon separating a property from its value in `text`
/// (the property plus its raw separator).
///
/// A comment opener at the cursor moves the cursor past the comment, so a
/// colon inside `/* ... */` or `// ...` is never returned. An unterminated
/// block comment hides everything after it.
pub fn find_separator_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i..].starts_with(b"/*") {
            let close = text[i + 2..].find("*/")?;
            i += 2 + close + 2;
            continue;
        }

        if bytes[i..].starts_with(b"//") {
            match text[i..].find(['\n', '\r']) {
                Some(line_end) => i += line_end,
                None => return None,
            }
            continue;
        }

        if bytes[i] == b':' {
            return Some(i);
        }

        i += 1;
    }

    None
}
