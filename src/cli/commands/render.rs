//! Render command.

use std::path::PathBuf;

use chrono::NaiveDate;
use console::style;

use crate::config::Settings;
use crate::content::ContentLocation;
use crate::session::{PageSession, SessionOptions};
use crate::sites::SiteKind;

pub struct RenderArgs {
    pub site: SiteKind,
    pub template: Option<PathBuf>,
    pub content: Option<String>,
    pub out: Option<PathBuf>,
    pub today: Option<NaiveDate>,
}

/// Render one page. The HTML is written even when content fails to load,
/// but the command then exits with an error.
pub async fn cmd_render(settings: &Settings, args: RenderArgs) -> anyhow::Result<()> {
    let (template, page) = match &args.template {
        Some(path) => (
            tokio::fs::read_to_string(path).await?,
            ContentLocation::File(path.clone()),
        ),
        None => (
            args.site.default_template().to_string(),
            ContentLocation::File(std::env::current_dir()?.join("index.html")),
        ),
    };

    let location = match &args.content {
        Some(content) => ContentLocation::parse(content)?,
        None => page.relative_to(args.site.content_file())?,
    };
    tracing::info!("Rendering {} page with content from {}", args.site, location);

    let loader = settings.loader()?;
    let loaded = loader.load_for(args.site, &location).await;

    let options = match args.today {
        Some(today) => SessionOptions::new(today),
        None => SessionOptions::today(),
    }
    .with_layout(settings.layout);
    let session = PageSession::open(args.site, &template, loaded, options);
    let html = session.to_html();

    match &args.out {
        Some(out) => {
            tokio::fs::write(out, &html).await?;
            eprintln!(
                "{} Wrote {} page to {}",
                style("→").cyan(),
                args.site,
                out.display()
            );
        }
        None => println!("{}", html),
    }

    if let Some(error) = session.error() {
        anyhow::bail!("{} page rendered without content: {}", args.site, error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_writes_template_when_content_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("index.html");
        let args = RenderArgs {
            site: SiteKind::Coffee,
            template: None,
            content: Some(dir.path().join("missing.json").display().to_string()),
            out: Some(out.clone()),
            today: None,
        };

        let err = cmd_render(&Settings::default(), args).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("coffee page rendered without content: "));
        assert_eq!(message.matches("rendered without content").count(), 1);

        let html = std::fs::read_to_string(&out).unwrap();
        let template = crate::dom::Document::parse(SiteKind::Coffee.default_template());
        assert_eq!(html, template.to_html());
    }
}
