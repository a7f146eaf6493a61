//! Word lists used by the heuristic rules, and the helpers that match them.
//!
//! Tables are plain data so they can be tuned without touching rule logic.
//! Multi-word entries match a contiguous run of words.

/// Abbreviations that read poorly in tool and parameter names, with the word
/// they usually stand for.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("usr", "user"),
    ("msg", "message"),
    ("cfg", "config"),
    ("cnt", "count"),
    ("num", "number"),
    ("tmp", "temporary"),
    ("btn", "button"),
    ("req", "request"),
    ("res", "response"),
    ("ctx", "context"),
    ("idx", "index"),
    ("val", "value"),
    ("str", "string"),
    ("pwd", "password"),
    ("addr", "address"),
    ("desc", "description"),
    ("qty", "quantity"),
    ("mgr", "manager"),
    ("svc", "service"),
    ("obj", "object"),
    ("arr", "array"),
    ("fn", "function"),
    ("cb", "callback"),
];

/// Vague wording that leaves a model guessing what a tool does.
pub const AMBIGUOUS_TERMS: &[&str] = &[
    "various",
    "stuff",
    "things",
    "etc",
    "something",
    "somehow",
    "misc",
    "miscellaneous",
    "and so on",
    "and more",
    "whatever",
    "deals with",
    "takes care of",
];

/// Phrases that tell a model when to pick a tool.
pub const USAGE_GUIDANCE_PHRASES: &[&str] = &[
    "use this when",
    "use when",
    "use this tool",
    "use it when",
    "call this when",
    "useful when",
    "useful for",
    "when you need",
    "when the user",
];

/// Sequencing markers that suggest a description walks through several steps.
pub const WORKFLOW_KEYWORDS: &[&str] = &[
    "first",
    "then",
    "next",
    "after that",
    "afterwards",
    "followed by",
    "finally",
    "step 1",
    "step 2",
    "subsequently",
];

/// Distinct workflow markers needed before a description counts as a workflow.
pub const WORKFLOW_MARKER_THRESHOLD: usize = 2;

/// Verbs that mark a tool as changing or destroying state.
pub const DESTRUCTIVE_VERBS: &[&str] = &[
    "delete",
    "remove",
    "drop",
    "destroy",
    "purge",
    "erase",
    "truncate",
    "wipe",
    "kill",
    "terminate",
    "revoke",
    "reset",
    "overwrite",
    "uninstall",
];

/// Single words that mark a parameter as carrying a credential.
pub const CREDENTIAL_WORDS: &[&str] = &[
    "password",
    "passwd",
    "pwd",
    "secret",
    "token",
    "credential",
    "credentials",
    "apikey",
];

/// Credential names usually written as two words (`api_key`, `accessKey`).
pub const CREDENTIAL_COMPOUNDS: &[&str] = &["apikey", "accesskey", "privatekey", "authtoken"];

/// Words that mark a parameter as likely to reach a shell, query, filesystem
/// or network call.
pub const INJECTION_PRONE_WORDS: &[&str] = &[
    "command",
    "cmd",
    "shell",
    "exec",
    "script",
    "sql",
    "path",
    "file",
    "filepath",
    "filename",
    "url",
    "uri",
    "endpoint",
    "code",
    "eval",
    "expression",
    "template",
];

/// Split an identifier into lowercase words.
///
/// Handles `snake_case`, `kebab-case`, `camelCase`, `PascalCase` and acronym
/// runs such as `HTTPServer` (`http`, `server`).
pub fn split_words(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = identifier.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(ch.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Lowercase alphanumeric words of free text.
pub fn text_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_sequence(words: &[String], phrase: &[&str]) -> bool {
    !phrase.is_empty()
        && words
            .windows(phrase.len())
            .any(|window| window.iter().zip(phrase).all(|(w, p)| w == p))
}

/// Terms from `table` that occur in `words`, in table order.
pub fn find_terms_in(words: &[String], table: &[&'static str]) -> Vec<&'static str> {
    table
        .iter()
        .filter(|term| {
            let phrase: Vec<&str> = term.split_whitespace().collect();
            contains_sequence(words, &phrase)
        })
        .copied()
        .collect()
}

/// Terms from `table` that occur in free text, in table order.
pub fn find_terms(text: &str, table: &[&'static str]) -> Vec<&'static str> {
    find_terms_in(&text_words(text), table)
}

/// Abbreviations used as whole words of an identifier, with their expansions.
pub fn find_abbreviations(identifier: &str) -> Vec<(&'static str, &'static str)> {
    let words = split_words(identifier);
    ABBREVIATIONS
        .iter()
        .filter(|(short, _)| words.iter().any(|word| word == short))
        .copied()
        .collect()
}

/// First destructive verb among an identifier's words.
pub fn destructive_verb(identifier: &str) -> Option<&'static str> {
    let words = split_words(identifier);
    words.iter().find_map(|word| {
        DESTRUCTIVE_VERBS
            .iter()
            .copied()
            .find(|verb| *verb == word.as_str())
    })
}

/// Whether an identifier names a credential.
pub fn is_credential_name(identifier: &str) -> bool {
    let words = split_words(identifier);
    if words.iter().any(|word| CREDENTIAL_WORDS.contains(&word.as_str())) {
        return true;
    }
    words.windows(2).any(|pair| {
        let joined = format!("{}{}", pair[0], pair[1]);
        CREDENTIAL_COMPOUNDS.contains(&joined.as_str())
    })
}

/// Whether an identifier names a value likely to reach an interpreter,
/// filesystem or network call.
pub fn is_injection_prone_name(identifier: &str) -> bool {
    split_words(identifier)
        .iter()
        .any(|word| INJECTION_PRONE_WORDS.contains(&word.as_str()))
}
