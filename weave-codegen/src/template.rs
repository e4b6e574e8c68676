//! The minijinja environment components are parsed and rendered with.

use std::{collections::BTreeMap, sync::Arc};

use minijinja::{AutoEscape, Environment};

use crate::{
    Error, Result,
    renderer::{Filter, RenderContext, common_filters},
};

fn base_environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}

/// Parse a component without executing it.
pub(crate) fn check_syntax(name: &str, source: &str) -> Result<()> {
    let env = base_environment();
    env.template_from_named_str(name, source)
        .map(|_| ())
        .map_err(|err| Error::from_template(name, &err))
}

/// Render `source` against `context` with the common filters plus `filters`.
///
/// Each call builds a fresh environment, so nothing leaks between
/// components except what a template explicitly includes.
pub fn render(
    name: &str,
    source: &str,
    context: &RenderContext,
    filters: &BTreeMap<&'static str, Filter>,
) -> Result<String> {
    let mut env = base_environment();

    let mut all = common_filters();
    all.extend(filters.iter().map(|(key, filter)| (*key, *filter)));
    for (filter_name, filter) in all {
        env.add_filter(filter_name, move |value: String| filter(&value));
    }

    if let Some(components) = context.components() {
        let components = Arc::clone(components);
        env.set_loader(move |include| Ok(components.component(include).map(|s| s.to_string())));
    }

    let template = env
        .template_from_named_str(name, source)
        .map_err(|err| Error::from_template(name, &err))?;
    template
        .render(context.to_template_value())
        .map_err(|err| Error::from_template(name, &err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::ComponentSource;

    fn ctx() -> RenderContext {
        RenderContext::new().with("name", "hello-world")
    }

    fn shout(value: &str) -> String {
        value.to_uppercase()
    }

    #[test]
    fn test_common_filters() {
        let out = render(
            "t",
            "{{ name | snake_case }} {{ name | pascal_case }}",
            &ctx(),
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(out, "hello_world HelloWorld");
    }

    #[test]
    fn test_renderer_filters() {
        let filters = BTreeMap::from([("shout", shout as Filter)]);
        let out = render("t", "{{ name | shout }}", &ctx(), &filters).unwrap();
        assert_eq!(out, "HELLO-WORLD");
    }

    #[test]
    fn test_unknown_filter_is_render_error() {
        let err = render("t", "{{ name | shout }}", &ctx(), &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::Render { name, .. } if name == "t"));
    }

    #[test]
    fn test_syntax_error() {
        let err = render("t", "{% for x in %}", &ctx(), &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
        assert!(check_syntax("t", "{% for x in %}").is_err());
        assert!(check_syntax("t", "{{ undefined_thing | no_such_filter }}").is_ok());
    }

    #[test]
    fn test_block_whitespace_trimmed() {
        let out = render(
            "t",
            "start\n  {% if true %}\nbody\n  {% endif %}\nend\n",
            &ctx(),
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(out, "start\nbody\nend\n");
    }

    #[test]
    fn test_include_through_component_source() {
        let mut context = ctx();
        let parts = BTreeMap::from([("shared/greeting".to_string(), "hi {{ name }}".to_string())]);
        context.attach_components(Arc::new(parts) as Arc<dyn ComponentSource>);

        let out = render(
            "t",
            "{% include 'shared/greeting' %}!",
            &context,
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(out, "hi hello-world!");
    }

    #[test]
    fn test_include_without_source_fails() {
        let err = render("t", "{% include 'x' %}", &ctx(), &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
    }
}
