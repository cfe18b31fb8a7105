use crate::models::PageState;
use crate::prompt::COACH_MODEL;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

const PAGE_TEMPLATE: &str = include_str!("../templates/page.hbs");

#[derive(Serialize)]
struct PageContext<'a> {
    model: &'a str,
    #[serde(flatten)]
    state: &'a PageState,
}

/// Renders the coaching form and whatever one request produced.
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("page", PAGE_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, state: &PageState) -> Result<String, RenderError> {
        self.handlebars.render(
            "page",
            &PageContext {
                model: COACH_MODEL,
                state,
            },
        )
    }
}
