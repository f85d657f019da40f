//! Web server command.

use console::style;

use crate::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    if settings.sites.is_empty() {
        println!(
            "{} No sites configured; add [sites.<name>] entries to showcase.toml",
            style("!").yellow()
        );
    }

    println!(
        "{} Serving {} site(s) at http://{}:{}",
        style("→").cyan(),
        settings.sites.len(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3030
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    Ok((bind.to_string(), 3030))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(
            parse_bind_address("8080").unwrap(),
            ("127.0.0.1".to_string(), 8080)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0").unwrap(),
            ("0.0.0.0".to_string(), 3030)
        );
        assert_eq!(
            parse_bind_address("localhost:9000").unwrap(),
            ("localhost".to_string(), 9000)
        );
    }
}
