use std::env;
use std::fs;
use std::path::Path;

// Claves que la app lee con option_env! (ver src/config.rs)
const KNOWN_KEYS: &[&str] = &[
    "ONESIGNAL_APP_ID",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "ALLOW_LOCALHOST_AS_SECURE_ORIGIN",
    "NOTIFY_BUTTON_ENABLED",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for key in KNOWN_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    let mut app_id_found = env::var("ONESIGNAL_APP_ID").map(|v| !v.trim().is_empty()).unwrap_or(false);

    match fs::read_to_string(env_file) {
        Ok(contents) => {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let Some((key, value)) = line.split_once('=') else {
                    continue;
                };
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if !KNOWN_KEYS.contains(&key) {
                    println!("cargo:warning=.env: clave desconocida '{}' ignorada", key);
                    continue;
                }

                // La variable del entorno tiene prioridad sobre .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                    if key == "ONESIGNAL_APP_ID" && !value.is_empty() {
                        app_id_found = true;
                    }
                }
            }
        }
        Err(_) => {
            println!("cargo:warning=No .env file found. Copy .env.example to .env and set ONESIGNAL_APP_ID.");
        }
    }

    if !app_id_found {
        println!("cargo:warning=ONESIGNAL_APP_ID vacío: el panel mostrará las instrucciones de configuración.");
    }
}
