//! HTML template pages, rendered with tera.

use tera::{Context, Tera};

/// Name the page source is registered under in its private tera instance.
const PAGE_TEMPLATE: &str = "__page__";

#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("failed to parse template: {0}")]
    Parse(#[source] tera::Error),

    #[error("failed to render template: {0}")]
    Render(#[source] tera::Error),
}

/// Parse `source` as a template and execute it with an empty context.
///
/// Every call gets its own `Tera` instance, so pages never share state.
pub fn render_template(source: &str) -> Result<String, TemplateError> {
    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_TEMPLATE, source)
        .map_err(TemplateError::Parse)?;

    tera.render(PAGE_TEMPLATE, &Context::new())
        .map_err(TemplateError::Render)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_html_passes_through() {
        let html = render_template("<h1>Home</h1>\n<p>Welcome</p>").unwrap();

        assert_eq!(html, "<h1>Home</h1>\n<p>Welcome</p>");
    }

    #[test]
    fn test_template_logic_is_executed() {
        let html = render_template("{% for i in [1, 2, 3] %}<li>{{ i }}</li>{% endfor %}").unwrap();

        assert_eq!(html, "<li>1</li><li>2</li><li>3</li>");
    }

    #[test]
    fn test_parse_failure() {
        let result = render_template("<p>{% if %}</p>");

        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }

    #[test]
    fn test_missing_variable_is_a_render_failure() {
        let result = render_template("<p>{{ page.title }}</p>");

        assert!(matches!(result, Err(TemplateError::Render(_))));
    }
}
