//! Configuration handed to the external particle and tilt libraries.
//!
//! The libraries themselves run in the browser; the page only carries an
//! inline script invoking them with these options.

use serde_json::{json, Value};

/// Element the particle canvas attaches to.
pub const PARTICLES_CONTAINER: &str = "particles-js";

pub fn particles_config() -> Value {
    json!({
        "fpsLimit": 60,
        "interactivity": {
            "events": {
                "onHover": { "enable": true, "mode": "repulse" },
                "resize": true
            },
            "modes": {
                "repulse": { "distance": 100, "duration": 0.4 }
            }
        },
        "particles": {
            "color": { "value": "#00ff41" },
            "links": {
                "color": "#ffffff",
                "distance": 150,
                "enable": true,
                "opacity": 0.1,
                "width": 1
            },
            "collisions": { "enable": true },
            "move": {
                "direction": "none",
                "enable": true,
                "outMode": "bounce",
                "random": false,
                "speed": 1,
                "straight": false
            },
            "number": {
                "density": { "enable": true, "value_area": 800 },
                "value": 80
            },
            "opacity": { "value": 0.3 },
            "shape": { "type": "circle" },
            "size": { "random": true, "value": 3 }
        },
        "detectRetina": true
    })
}

pub fn tilt_config() -> Value {
    json!({ "max": 15, "speed": 400, "glare": true, "max-glare": 0.2 })
}

pub fn particles_script() -> String {
    format!(
        "tsParticles.load({}, {});",
        Value::from(PARTICLES_CONTAINER),
        script_json(&particles_config())
    )
}

pub fn tilt_script() -> String {
    format!(
        "VanillaTilt.init(document.querySelectorAll(\"[data-tilt]\"), {});",
        script_json(&tilt_config())
    )
}

/// JSON safe to embed in a `<script>` element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_script() {
        let script = tilt_script();
        assert!(script.starts_with("VanillaTilt.init(document.querySelectorAll(\"[data-tilt]\"), {"));
        let config = tilt_config();
        assert_eq!(config["max"], 15);
        assert_eq!(config["max-glare"], 0.2);
    }

    #[test]
    fn test_particles_script() {
        let script = particles_script();
        assert!(script.starts_with("tsParticles.load(\"particles-js\", {"));
        assert_eq!(particles_config()["particles"]["number"]["value"], 80);
    }

    #[test]
    fn test_script_json_escapes_closing_tags() {
        assert_eq!(script_json(&json!("</script>")), "\"<\\/script>\"");
    }
}
