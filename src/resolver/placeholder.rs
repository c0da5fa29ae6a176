//! `:name` placeholder substitution.

use crate::types::Replacements;

/// Replaces `:key` placeholders with their values.
///
/// Leading colons of the map keys are ignored, so `name` and `:name` are the
/// same placeholder. The template is scanned once from left to right and
/// inserted values are never scanned again. Where several keys match at the
/// same position (`:name` / `:names`) the longest one wins. Matching is
/// case-sensitive.
///
/// # Examples
/// ```
/// use package_i18n_resolver::resolver::placeholder::replace_placeholders;
/// use package_i18n_resolver::types::Replacements;
///
/// let values = Replacements::from([("name".to_string(), "World".to_string())]);
/// assert_eq!(replace_placeholders("Hello :name", &values), "Hello World");
/// assert_eq!(replace_placeholders("x", &Replacements::new()), "x");
/// ```
#[must_use]
pub fn replace_placeholders(template: &str, replacements: &Replacements) -> String {
    if replacements.is_empty() || !template.contains(':') {
        return template.to_string();
    }

    let mut placeholders: Vec<(&str, &str)> = replacements
        .iter()
        .map(|(key, value)| (key.trim_start_matches(':'), value.as_str()))
        .filter(|(key, _)| !key.is_empty())
        .collect();
    placeholders.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));

    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((before, after)) = rest.split_once(':') {
        result.push_str(before);
        match placeholders
            .iter()
            .find_map(|(key, value)| after.strip_prefix(key).map(|remaining| (*value, remaining)))
        {
            Some((value, remaining)) => {
                result.push_str(value);
                rest = remaining;
            }
            None => {
                result.push(':');
                rest = after;
            }
        }
    }
    result.push_str(rest);

    result
}
