use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

#[derive(Clone, Copy)]
enum Kind {
    String,
    Bool,
    Integer,
}

impl Kind {
    fn matches(self, value: &toml::Value) -> bool {
        match self {
            Kind::String => value.is_str(),
            Kind::Bool => value.is_bool(),
            Kind::Integer => value.as_integer().is_some_and(|n| n >= 0),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::String => "a string",
            Kind::Bool => "a boolean",
            Kind::Integer => "a non-negative integer",
        }
    }
}

/// Every key `Config` reads. The bundled default must spell all of them out,
/// otherwise `Config::compiled_default` would quietly fill the gap.
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "links",
        &[
            ("color", Kind::String),
            ("underline", Kind::Bool),
            ("new_tab", Kind::Bool),
        ],
    ),
    ("page", &[("numbers", Kind::Bool), ("paper", Kind::String)]),
    (
        "layout",
        &[
            ("spacer", Kind::String),
            ("keep_heading_with_next", Kind::Bool),
            ("keep_list_together_max", Kind::Integer),
        ],
    ),
    (
        "html",
        &[
            ("wrapper_class", Kind::String),
            ("show_code_language", Kind::Bool),
        ],
    ),
];

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH)
        .unwrap_or_else(|e| panic!("Failed to read {CONFIG_PATH}: {e}"));
    let table: toml::Table = content
        .parse()
        .unwrap_or_else(|e| panic!("Invalid {CONFIG_PATH}: {e}"));

    let mut problems = Vec::new();

    for (section, keys) in SCHEMA {
        let Some(entries) = table.get(*section).and_then(toml::Value::as_table) else {
            problems.push(format!("missing [{section}] table"));
            continue;
        };
        for (key, kind) in *keys {
            match entries.get(*key) {
                None => problems.push(format!("missing {section}.{key}")),
                Some(value) if !kind.matches(value) => problems.push(format!(
                    "{section}.{key} must be {}, found {}",
                    kind.name(),
                    value.type_str()
                )),
                Some(_) => {}
            }
        }
        for key in entries.keys() {
            if !keys.iter().any(|(known, _)| known == key) {
                problems.push(format!("unknown key {section}.{key}"));
            }
        }
    }

    for section in table.keys() {
        if !SCHEMA.iter().any(|(known, _)| known == section) {
            problems.push(format!("unknown table [{section}]"));
        }
    }

    if !problems.is_empty() {
        panic!("{CONFIG_PATH} does not match Config:\n  {}", problems.join("\n  "));
    }
}
