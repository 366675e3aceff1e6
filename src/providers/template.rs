//! URL templating for provider endpoints

/// Replace every `{key}` placeholder in `template` with its value
pub fn substitute(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |url, (key, value)| {
            url.replace(&format!("{{{}}}", key), value)
        })
}

/// Whether `template` contains the `{key}` placeholder
pub fn has_placeholder(template: &str, key: &str) -> bool {
    template.contains(&format!("{{{}}}", key))
}
