//! Deployment template: `{{ .Field }}` substitution followed by parsing into specs.

use ecsd_model::{ServiceSpec, TaskSpec};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::EnvironmentConfig,
    error::{ConfigError, TemplateError},
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitute every `{{ .Field }}` in `raw` with the matching config value.
///
/// Strings are inserted as-is and numbers in decimal form. The `Environment` list renders as JSON.
pub fn render(raw: &str, config: &EnvironmentConfig) -> Result<String, TemplateError> {
    let fields = config.fields();
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let action = &rest[start + OPEN.len()..];
        let Some(end) = action.find(CLOSE) else {
            return Err(TemplateError::Unterminated(offset + start));
        };

        let expr = action[..end].trim();
        let Some(name) = expr.strip_prefix('.').filter(|n| is_identifier(n)) else {
            return Err(TemplateError::UnsupportedAction(expr.to_string()));
        };
        let value = fields
            .get(name)
            .ok_or_else(|| TemplateError::UnknownField(name.to_string()))?;
        match value {
            Value::String(s) => out.push_str(s),
            other => out.push_str(&other.to_string()),
        }

        let consumed = start + OPEN.len() + end + CLOSE.len();
        rest = &rest[consumed..];
        offset += consumed;
    }
    out.push_str(rest);

    Ok(out)
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Rendered template: the service to roll out (absent for oneshot jobs) and its task definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deployment {
    #[serde(default, alias = "Service")]
    pub service: Option<ServiceSpec>,
    #[serde(alias = "Task")]
    pub task: TaskSpec,
}

impl Deployment {
    pub fn parse(rendered: &str) -> Result<Self, TemplateError> {
        serde_json::from_str(rendered).map_err(TemplateError::Parse)
    }

    /// Replace the first container's environment with the configured one.
    pub fn inject_environment(&mut self, config: &EnvironmentConfig) -> Result<(), ConfigError> {
        let container = self
            .task
            .container_definitions
            .first_mut()
            .ok_or(ConfigError::NoContainers)?;
        container.environment = config.task_env();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ecsd_model::KeyValue;

    use super::*;

    fn config() -> EnvironmentConfig {
        EnvironmentConfig {
            task_family: "web".into(),
            service_name: "web-svc".into(),
            cluster: "prod".into(),
            image: "registry/web".into(),
            image_tag: "1.4.2".into(),
            initial_count: 2,
            memory_reservation: 256,
            environment: vec![KeyValue::new("MODE", "live")],
            ..Default::default()
        }
    }

    const TEMPLATE: &str = r#"{
        "service": {
            "cluster": "{{ .Cluster }}",
            "serviceName": "{{ .ServiceName }}",
            "desiredCount": {{ .InitialCount }}
        },
        "task": {
            "family": "{{.TaskFamily}}",
            "containerDefinitions": [{
                "name": "app",
                "image": "{{ .Image }}:{{ .ImageTag }}",
                "memoryReservation": {{ .MemoryReservation }},
                "environment": [{"name": "STALE", "value": "1"}]
            }]
        }
    }"#;

    #[test]
    fn renders_scalar_fields() {
        let out = render("{{ .Image }}:{{.ImageTag}} x{{  .InitialCount  }}", &config()).unwrap();
        assert_eq!(out, "registry/web:1.4.2 x2");
    }

    #[test]
    fn text_without_actions_is_unchanged() {
        assert_eq!(render("{\"a\": 1}", &config()).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = render("{{ .Region }}", &config()).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownField(f) if f == "Region"));
    }

    #[test]
    fn unterminated_action_reports_its_offset() {
        let err = render("ab {{ .Image }} {{ .Cluster", &config()).unwrap_err();
        assert!(matches!(err, TemplateError::Unterminated(16)));
    }

    #[test]
    fn non_field_actions_are_unsupported() {
        let err = render("{{ if .Image }}", &config()).unwrap_err();
        assert!(matches!(err, TemplateError::UnsupportedAction(_)));
    }

    #[test]
    fn rendered_template_parses_into_specs() {
        let doc = Deployment::parse(&render(TEMPLATE, &config()).unwrap()).unwrap();

        let service = doc.service.unwrap();
        assert_eq!(service.cluster, "prod");
        assert_eq!(service.service_name, "web-svc");
        assert_eq!(service.desired_count, 2);
        assert_eq!(doc.task.family, "web");
        assert_eq!(doc.task.container_definitions[0].image, "registry/web:1.4.2");
        assert_eq!(doc.task.container_definitions[0].memory_reservation, Some(256));
    }

    #[test]
    fn capitalised_sections_are_accepted() {
        let doc = Deployment::parse(
            r#"{"Task": {"family": "job", "containerDefinitions": [{"name": "a", "image": "a:1"}]}}"#,
        )
        .unwrap();
        assert!(doc.service.is_none());
        assert_eq!(doc.task.family, "job");
    }

    #[test]
    fn configured_environment_replaces_the_first_container() {
        let mut doc = Deployment::parse(&render(TEMPLATE, &config()).unwrap()).unwrap();
        doc.inject_environment(&config()).unwrap();

        let env = &doc.task.container_definitions[0].environment;
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("MODE"), Some("live"));
        assert_eq!(env.get("STALE"), None);
    }

    #[test]
    fn injection_needs_a_container() {
        let mut doc = Deployment::parse(r#"{"task": {"family": "x", "containerDefinitions": []}}"#).unwrap();
        assert!(matches!(
            doc.inject_environment(&config()),
            Err(ConfigError::NoContainers)
        ));
    }

    #[test]
    fn missing_task_section_fails_to_parse() {
        assert!(matches!(
            Deployment::parse(r#"{"service": {}}"#),
            Err(TemplateError::Parse(_))
        ));
    }
}
