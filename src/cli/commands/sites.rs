//! List configured sites.

use console::style;

use crate::config::Settings;

pub fn cmd_sites(settings: &Settings) -> anyhow::Result<()> {
    if settings.sites.is_empty() {
        match &settings.config_path {
            Some(path) => println!("No sites configured in {}", path.display()),
            None => println!("No config file found (looked for showcase.toml/.yaml/.json)"),
        }
        return Ok(());
    }

    for site in settings.sites.values() {
        println!("{} {}", style(&site.name).bold(), style(site.kind).dim());
        println!("  root:     {}", site.root.display());
        match site.content_location() {
            Ok(location) => println!("  content:  {}", location),
            Err(e) => println!("  content:  {}", style(e).red()),
        }
        if let Some(template) = &site.template {
            println!("  template: {}", template.display());
        }
    }
    Ok(())
}
