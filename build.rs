use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is not set by cargo"),
    );
    let templates_dir = manifest_dir.join("src").join("prompts").join("templates");
    println!("cargo:rerun-if-changed={}", templates_dir.display());

    let mut names = Vec::new();
    let entries = fs::read_dir(&templates_dir).expect("failed to list src/prompts/templates");
    for entry in entries {
        let entry = entry.expect("failed to read src/prompts/templates entry");
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("tera") {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|value| value.to_str()) {
            names.push(name.to_string());
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }

    names.sort();
    names.dedup();

    let mut generated = String::new();
    generated.push_str("pub(crate) fn embedded_template(name: &str) -> Option<&'static str> {\n");
    generated.push_str("    match name {\n");
    for name in names {
        generated.push_str(&format!(
            "        \"{name}\" => Some(include_str!(concat!(env!(\"CARGO_MANIFEST_DIR\"), \"/src/prompts/templates/{name}\"))),\n"
        ));
    }
    generated.push_str("        _ => None,\n");
    generated.push_str("    }\n");
    generated.push_str("}\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is not set by cargo"));
    let destination = out_dir.join("embedded_prompt_templates.rs");
    fs::write(&destination, generated).expect("failed to write embedded prompt template index");
}
