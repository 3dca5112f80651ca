/// Substitutions applied in order. Underscores and dashes are doubled
/// before the space rule runs, so a literal `_` or `-` in the input stays
/// distinguishable from a space-derived token.
const RULES: &[(&str, &str)] = &[
    ("_", "__"),
    ("-", "--"),
    (" ", "_"),
    ("?", "~q"),
    ("&", "~a"),
    ("%", "~p"),
    ("#", "~h"),
    ("/", "~s"),
    ("\\", "~b"),
    ("<", "~l"),
    (">", "~g"),
    ("\"", "''"),
    ("\n", "~n"),
];

/// Escape a caption for embedding as a path segment of a render URL.
pub fn encode_caption(text: &str) -> String {
    let mut encoded = text.to_string();
    for (from, to) in RULES {
        encoded = encoded.replace(from, to);
    }
    encoded
}
