//! Markdown rendering with heading ids and external link targets.

use std::collections::HashSet;

use html_escape::encode_double_quoted_attribute;
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Extensions enabled for every page.
fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// A heading being collected until its end tag, so an id can be derived from its text.
struct HeadingState<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    text: String,
    events: Vec<Event<'a>>,
}

/// Render markdown to HTML using pulldown-cmark.
///
/// Headings without an explicit `{#id}` get a unique slug id, and links to
/// absolute URLs open in a new browsing context.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());

    // Explicit ids are reserved up front so generated ids never take them
    let mut used_heading_ids: HashSet<String> = Parser::new_ext(markdown, options())
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();
    let mut heading: Option<HeadingState> = None;
    // One entry per open link: whether it was rewritten as external
    let mut link_stack: Vec<bool> = Vec::new();
    let mut events: Vec<Event> = Vec::new();

    for event in parser {
        let event = rewrite_link(event, &mut link_stack);

        if let Some(state) = heading.as_mut() {
            if matches!(event, Event::End(TagEnd::Heading(_))) {
                if let Some(state) = heading.take() {
                    events.push(finish_heading(state, &mut used_heading_ids));
                }
                continue;
            }
            if let Event::Text(text) | Event::Code(text) = &event {
                state.text.push_str(text);
            }
            state.events.push(event);
            continue;
        }

        match event {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) => {
                heading = Some(HeadingState {
                    level,
                    classes,
                    attrs,
                    text: String::new(),
                    events: Vec::new(),
                });
            }
            other => events.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

/// Emit a collected heading with a generated, unique id.
fn finish_heading<'a>(state: HeadingState<'a>, used_ids: &mut HashSet<String>) -> Event<'a> {
    let base_id = slugify(&state.text);
    let mut id = base_id.clone();
    let mut suffix = 1;
    while used_ids.contains(&id) {
        id = format!("{}-{}", base_id, suffix);
        suffix += 1;
    }
    used_ids.insert(id.clone());

    let class_attr = if state.classes.is_empty() {
        String::new()
    } else {
        let classes: Vec<&str> = state.classes.iter().map(|c| &**c).collect();
        format!(
            " class=\"{}\"",
            encode_double_quoted_attribute(&classes.join(" "))
        )
    };

    let extra_attrs = state
        .attrs
        .iter()
        .map(|(k, v)| match v {
            Some(val) => format!(" {}=\"{}\"", k, encode_double_quoted_attribute(&**val)),
            None => format!(" {}", k),
        })
        .collect::<String>();

    let mut inner = String::new();
    html::push_html(&mut inner, state.events.into_iter());

    let level = state.level as usize;
    Event::Html(
        format!(
            "<h{} id=\"{}\"{}{}>{}</h{}>\n",
            level, id, class_attr, extra_attrs, inner, level
        )
        .into(),
    )
}

/// Rewrite links to absolute URLs so they open in a new browsing context.
fn rewrite_link<'a>(event: Event<'a>, link_stack: &mut Vec<bool>) -> Event<'a> {
    match event {
        Event::Start(Tag::Link {
            ref dest_url,
            ref title,
            ..
        }) => {
            if !is_external(dest_url) {
                link_stack.push(false);
                return event;
            }
            link_stack.push(true);
            let title_attr = if title.is_empty() {
                String::new()
            } else {
                format!(" title=\"{}\"", encode_double_quoted_attribute(&**title))
            };
            Event::InlineHtml(
                format!(
                    "<a href=\"{}\"{} target=\"_blank\">",
                    encode_double_quoted_attribute(&**dest_url),
                    title_attr
                )
                .into(),
            )
        }
        Event::End(TagEnd::Link) => match link_stack.pop() {
            Some(true) => Event::InlineHtml("</a>".into()),
            _ => event,
        },
        _ => event,
    }
}

/// Returns true for links starting with a `scheme://` or a protocol-relative `//`.
fn is_external(dest: &str) -> bool {
    if dest.starts_with("//") {
        return true;
    }
    let Some((scheme, _)) = dest.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Convert a string to a slug suitable for use as an HTML id.
fn slugify(s: &str) -> String {
    let slug = s
        .trim()
        .to_lowercase()
        .replace(' ', "-")
        .replace(|c: char| !c.is_alphanumeric() && c != '-', "");
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}
