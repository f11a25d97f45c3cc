use std::env;
use std::fs;
use std::path::Path;

// Variables que config.rs lee con option_env!
const KNOWN_KEYS: [&str; 7] = [
    "BACKEND_URL_DEVELOPMENT",
    "BACKEND_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "DEFAULT_PCT",
    "ACCEPTED_EXTENSIONS",
    "UPLOAD_MARKER",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in KNOWN_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    if !env_file.exists() {
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=.env no se pudo leer, se usan los valores por defecto");
        return;
    };

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if !KNOWN_KEYS.contains(&key) {
            println!("cargo:warning=.env: variable desconocida {}", key);
            continue;
        }
        // El entorno real tiene prioridad sobre .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value.trim().trim_matches('"'));
        }
    }
}
