//! Content validation command.

use console::style;

use crate::config::Settings;
use crate::content::ContentLocation;
use crate::sites::{PageContent, SiteKind};

pub async fn cmd_check(settings: &Settings, site: SiteKind, content: &str) -> anyhow::Result<()> {
    let location = ContentLocation::parse(content)?;
    let loader = settings.loader()?;

    match loader.load_for(site, &location).await {
        Ok(content) => {
            println!("{} {} is valid {} content", style("✓").green(), location, site);
            for line in summarize(&content) {
                println!("  {}", line);
            }
            Ok(())
        }
        Err(e) => {
            match e.report() {
                Some(report) => {
                    eprintln!("{} {} has problems:", style("✗").red(), location);
                    for problem in report.problems() {
                        eprintln!("  {} {}", style(&problem.path).yellow(), problem.message);
                    }
                }
                None => eprintln!("{} {}", style("✗").red(), e),
            }
            Err(e.into())
        }
    }
}

/// Short per-section counts for a loaded document.
fn summarize(content: &PageContent) -> Vec<String> {
    let mut lines = Vec::new();
    match content {
        PageContent::Coffee(c) => {
            if let Some(menu) = &c.menu {
                lines.push(format!(
                    "menu: {} items in {} categories",
                    menu.items.len(),
                    menu.categories().len()
                ));
            }
        }
        PageContent::Gaming(c) => {
            if let Some(events) = &c.events {
                lines.push(format!("events: {}", events.items.len()));
            }
        }
        PageContent::Tutor(c) => {
            if let Some(subjects) = &c.subjects {
                lines.push(format!("subjects: {}", subjects.items.len()));
            }
            if let Some(stats) = &c.stats {
                lines.push(format!("stats: {}", stats.items.len()));
            }
            if let Some(testimonials) = &c.testimonials {
                lines.push(format!("testimonials: {}", testimonials.reviews.len()));
            }
            if let Some(faq) = &c.faq {
                lines.push(format!("faq: {}", faq.items.len()));
            }
        }
        PageContent::Portfolio(c) => {
            if let Some(projects) = &c.projects {
                lines.push(format!("projects: {}", projects.len()));
            }
        }
    }
    lines
}
