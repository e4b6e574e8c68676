//! Shared string utilities for code generation.
//!
//! All casing helpers split their input into words the same way, so
//! `to_snake_case(to_pascal_case(s))` is stable for identifiers made of
//! ASCII letters, digits, `-`, `_` and spaces.

/// Split an identifier-like string into lowercase words.
///
/// Word boundaries are any non-alphanumeric character, a lowercase or digit
/// followed by an uppercase letter (`helloWorld`), and the last capital of an
/// acronym followed by a lowercase letter (`HTTPServer` -> `http`, `server`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "hello-world" -> "helloWorld")
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
        .collect()
}

/// Convert a string to snake_case (e.g., "HelloWorld" -> "hello_world")
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert a string to kebab-case (e.g., "hello_world" -> "hello-world")
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to SCREAMING_SNAKE_CASE (e.g., "api-key" -> "API_KEY")
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}
