use html_minifier::HTMLMinifier;
use tera::Context;
use thiserror::Error;
use tracing::error;

use crate::pages::View;
use crate::session::{nav, SessionState};
use crate::State;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("rendering error")]
    Tera(#[from] tera::Error),
}

pub(super) fn render(
    state: &State,
    template: &'static str,
    context: &Context,
) -> Result<String, TemplateError> {
    let rendered = state.tera.render(template, context)?;

    let mut html_minifier = HTMLMinifier::new();
    if let Err(err) = html_minifier.digest(&rendered) {
        error!("Failed to minify HTML: {}", err);
        return Ok(rendered);
    };

    let minified = match std::str::from_utf8(html_minifier.get_html()) {
        Ok(minified) => minified.to_string(),
        Err(err) => {
            error!("Failed to parse minified HTML as UTF-8: {}", err);
            rendered
        },
    };

    Ok(minified)
}

/// Everything the layout and page templates read.
pub(super) fn view_context(session: &SessionState, view: &View) -> Context {
    let mut context = Context::new();
    context.insert("title", view.page.title());
    context.insert("page", &view.page);
    context.insert("nav", &nav());
    context.insert("session", session);
    context.insert("error", &view.error);
    context.insert("notice", &view.notice);
    context.insert("data", &view.data);
    context
}
