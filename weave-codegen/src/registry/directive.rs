//! Component dependencies: the leading `{# Dependencies: a, b #}` directive
//! plus the literal targets of `include`, `extends`, `import` and `from` tags.

const KEYWORD: &str = "Dependencies:";

/// Tags whose first argument names another component.
const REFERENCE_TAGS: &[&str] = &["include", "extends", "import", "from"];

/// Every component `source` depends on: directive entries first, then
/// template references in order of appearance, without repeats.
pub(crate) fn parse_dependencies(source: &str) -> Vec<String> {
    let mut names = directive_dependencies(source);
    for name in template_references(source) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Names declared on the first non-blank line of a component.
///
/// Only a template comment whose body starts with `Dependencies:` counts.
/// Names are trimmed, a trailing `.j2` is dropped, and repeats are removed.
fn directive_dependencies(source: &str) -> Vec<String> {
    let Some(first) = source.lines().map(str::trim).find(|line| !line.is_empty()) else {
        return Vec::new();
    };

    let Some(body) = first
        .strip_prefix("{#")
        .and_then(|rest| rest.strip_suffix("#}"))
    else {
        return Vec::new();
    };

    // Whitespace-control markers (`{#-` / `-#}`) are part of the delimiters.
    let body = body.trim().trim_start_matches('-').trim_end_matches('-').trim();
    let Some(list) = body.strip_prefix(KEYWORD) else {
        return Vec::new();
    };

    let mut names: Vec<String> = Vec::new();
    for raw in list.split(',') {
        match component_name(raw) {
            Some(name) if !names.contains(&name) => names.push(name),
            _ => {}
        }
    }
    names
}

/// Components named by string literals in reference tags.
///
/// Targets computed at render time (`{% include name %}`, lists) are not
/// known statically and are skipped.
fn template_references(source: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = source;
    while let Some(start) = rest.find("{%") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("%}") else {
            break;
        };
        let tag = after[..end]
            .trim_start_matches(['-', '+'])
            .trim_end_matches(['-', '+'])
            .trim();
        rest = &after[end + 2..];

        let Some((keyword, args)) = tag.split_once(char::is_whitespace) else {
            continue;
        };
        if !REFERENCE_TAGS.contains(&keyword) {
            continue;
        }
        match string_literal(args.trim_start()).and_then(component_name) {
            Some(name) if !names.contains(&name) => names.push(name),
            _ => {}
        }
    }
    names
}

/// The contents of a leading `"..."` or `'...'` literal.
fn string_literal(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &text[1..];
    body.find(quote).map(|end| &body[..end])
}

fn component_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    let name = name.strip_suffix(".j2").unwrap_or(name);
    (!name.is_empty()).then(|| name.to_string())
}
