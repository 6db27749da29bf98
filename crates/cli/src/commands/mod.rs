pub mod config;
pub mod pools;
pub mod recommend;

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome<T: Serialize> {
    command: String,
    status: String,
    error_class: Option<String>,
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl CommandResult {
    pub fn success<T: Serialize>(command: &str, data: T) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: None,
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload: CommandOutcome<()> = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: Some(message.into()),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

pub(crate) fn load_config(
    command: &str,
    path: Option<&std::path::Path>,
) -> Result<solocart_core::EngineConfig, Box<CommandResult>> {
    match path {
        Some(path) => solocart_core::EngineConfig::load(path).map_err(|error| {
            Box::new(CommandResult::failure(
                command,
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            ))
        }),
        None => Ok(solocart_core::EngineConfig::default()),
    }
}

pub(crate) fn load_catalog(
    command: &str,
    path: &std::path::Path,
) -> Result<solocart_core::Catalog, Box<CommandResult>> {
    let raw = std::fs::read_to_string(path).map_err(|error| {
        Box::new(CommandResult::failure(
            command,
            "snapshot_io",
            format!("failed to read catalog snapshot {}: {error}", path.display()),
            3,
        ))
    })?;
    let records = serde_json::from_str(&raw).map_err(|error| {
        Box::new(CommandResult::failure(
            command,
            "snapshot_parse",
            format!("failed to parse catalog snapshot: {error}"),
            3,
        ))
    })?;
    Ok(solocart_core::Catalog::from_records(records))
}

fn serialize_payload<T: Serialize>(payload: CommandOutcome<T>) -> String {
    serde_json::to_string_pretty(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
