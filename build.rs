// build.rs

//! Compiles `locales/<lang>.toml` into the `t!` macro included by `src/lib.rs`.
//!
//! The language comes from an enabled `lang_*` feature, then `SHELLIFY_LANG`, then `en`.
//! English is always loaded first, so a locale only needs the keys it translates.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

const FALLBACK_LANG: &str = "en";
const LANG_ENV: &str = "SHELLIFY_LANG";
const FEATURE_PREFIX: &str = "CARGO_FEATURE_LANG_";

type Locale = BTreeMap<String, String>;

fn main() {
    println!("cargo:rerun-if-env-changed={}", LANG_ENV);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    let lang = select_language();

    let mut strings = read_locale(FALLBACK_LANG)
        .unwrap_or_else(|e| panic!("Fallback locale '{}' is required: {}", FALLBACK_LANG, e));

    if lang != FALLBACK_LANG {
        match read_locale(&lang) {
            Ok(translated) => {
                for key in translated.keys().filter(|key| !strings.contains_key(*key)) {
                    println!("cargo:warning=Locale '{}' defines unknown key '{}'.", lang, key);
                }
                strings.extend(translated);
            }
            Err(e) => println!(
                "cargo:warning=Locale '{}' unavailable ({}). Using '{}'.",
                lang, e, FALLBACK_LANG
            ),
        }
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out_dir).join("translations.rs"), render_macro(&strings))
        .expect("Failed to write translations.rs");
}

/// An enabled `lang_*` feature wins over the environment variable.
fn select_language() -> String {
    let mut features: Vec<String> = env::vars()
        .filter_map(|(key, _)| key.strip_prefix(FEATURE_PREFIX).map(str::to_lowercase))
        .collect();
    features.sort();

    match features.as_slice() {
        [] => env::var(LANG_ENV).unwrap_or_else(|_| FALLBACK_LANG.to_string()),
        [only] => only.clone(),
        [first, ..] => {
            println!(
                "cargo:warning=Several language features enabled ({}). Using '{}'.",
                features.join(", "),
                first
            );
            first.clone()
        }
    }
}

fn read_locale(lang: &str) -> Result<Locale, String> {
    let path = format!("locales/{}.toml", lang);
    let content = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
    toml::from_str(&content).map_err(|e| format!("{}: {}", path, e))
}

/// One literal arm per key, plus a catch-all arm that turns a typo into a compile error.
fn render_macro(strings: &Locale) -> String {
    let mut code = String::from("/// Looks up a translated string by key.\n#[macro_export]\nmacro_rules! t {\n");
    for (key, value) in strings {
        code.push_str(&format!("    ({:?}) => {{ {:?} }};\n", key, value));
    }
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n",
    );
    code.push_str("}\n");
    code
}
