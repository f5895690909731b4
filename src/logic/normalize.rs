use crate::model::Bindings;

/// Replace each path-parameter value in `path` with `{name}`, in binding
/// iteration order. Every occurrence of a value is replaced, so a short id
/// that also appears in an unrelated segment is templated there too, a
/// known, accepted limitation of occurrence-based templating.
pub fn templatize(path: &str, bindings: &Bindings) -> String {
    let mut templated = path.to_string();
    for (name, value) in bindings {
        let Some(literal) = value.as_scalar_text() else {
            continue;
        };
        // An empty literal would match between every character.
        if literal.is_empty() {
            continue;
        }
        templated = templated.replace(&literal, &format!("{{{name}}}"));
    }
    templated
}
