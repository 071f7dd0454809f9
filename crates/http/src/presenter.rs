//! View rendering and redirect boundary consumed by the catalog handlers.

use anyhow::Context as _;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tera::Tera;

use crate::error::AppError;

/// Renders named views and issues redirects. Templates are compiled once at
/// construction from whatever source the application embeds them in.
pub struct Presenter {
    tera: Tera,
}

impl Presenter {
    /// Build from `(name, source)` template pairs, e.g. an embedded folder.
    /// Loading everything in one call lets templates extend each other
    /// regardless of iteration order.
    pub fn from_templates<N, S>(
        templates: impl IntoIterator<Item = (N, S)>,
    ) -> anyhow::Result<Self>
    where
        N: Into<String>,
        S: Into<String>,
    {
        let sources: Vec<(String, String)> = templates
            .into_iter()
            .map(|(name, source)| (name.into(), source.into()))
            .collect();
        let mut tera = Tera::default();
        tera.add_raw_templates(sources)
            .context("failed to compile page templates")?;
        Ok(Self { tera })
    }

    /// Render the named view with the given data payload.
    pub fn render(&self, view: &str, context: &tera::Context) -> Result<Response, AppError> {
        let body = self.tera.render(view, context).map_err(|err| {
            AppError::Internal(
                anyhow::Error::new(err).context(format!("failed to render view '{view}'")),
            )
        })?;
        Ok(Html(body).into_response())
    }

    /// Issue a see-other redirect, the post/redirect/get shape every
    /// successful mutation answers with.
    pub fn redirect(&self, path: &str) -> Response {
        Redirect::to(path).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};

    fn presenter() -> Presenter {
        Presenter::from_templates([
            (
                "base.html",
                "<title>{% block title %}{% endblock title %}</title>",
            ),
            (
                "greeting.html",
                "{% extends \"base.html\" %}{% block title %}Hello {{ name }}{% endblock title %}",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn render_resolves_inheritance_and_context() {
        let mut context = tera::Context::new();
        context.insert("name", "reader");
        let response = presenter().render("greeting.html", &context).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn render_of_unknown_view_is_an_internal_error() {
        let result = presenter().render("missing.html", &tera::Context::new());
        assert!(result.is_err());
    }

    #[test]
    fn redirect_is_see_other() {
        let response = presenter().redirect("/catalog/genres");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/catalog/genres"
        );
    }

    #[test]
    fn malformed_template_fails_at_construction() {
        let result = Presenter::from_templates([("broken.html", "{% block %")]);
        assert!(result.is_err());
    }
}
