use log::debug;
use minijinja::{Environment, context};
use serde::Serialize;

use crate::config::SampleTemplate;
use crate::error::SampleError;
use crate::model::Definition;

/// A source of example text for a definition, shown in its own tab.
pub trait SampleProvider {
    /// Tab title, e.g. `kubectl`.
    fn tab(&self) -> &str;
    /// Syntax of the produced text, e.g. `bash`.
    fn sample_kind(&self) -> &str;
    fn sample(&self, definition: &Definition) -> Result<String, SampleError>;
}

/// One rendered sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleText {
    pub tab: String,
    pub kind: String,
    pub text: String,
}

/// Ask every provider, in order, for a sample of `definition`.
///
/// A provider that fails contributes an empty text; the failure is not
/// reported to the caller.
pub fn collect_samples(
    definition: &Definition,
    providers: &[Box<dyn SampleProvider>],
) -> Vec<ExampleText> {
    providers
        .iter()
        .map(|provider| {
            let text = provider.sample(definition).unwrap_or_else(|e| {
                debug!("no {} sample for {}: {e}", provider.tab(), definition.key());
                String::new()
            });
            ExampleText {
                tab: provider.tab().to_string(),
                kind: provider.sample_kind().to_string(),
                text,
            }
        })
        .collect()
}

/// Renders a minijinja template against a definition.
///
/// The template sees `name`, `group`, `version`, `kind` and `example`, the
/// schema's `example` value encoded as YAML. Definitions without an
/// example produce [`SampleError::NoExample`].
#[derive(Debug, Clone)]
pub struct TemplateSampleProvider {
    tab: String,
    kind: String,
    template: String,
}

impl TemplateSampleProvider {
    pub fn new(tab: impl Into<String>, kind: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            tab: tab.into(),
            kind: kind.into(),
            template: template.into(),
        }
    }
}

impl From<&SampleTemplate> for TemplateSampleProvider {
    fn from(config: &SampleTemplate) -> Self {
        Self::new(&config.tab, &config.kind, &config.template)
    }
}

impl SampleProvider for TemplateSampleProvider {
    fn tab(&self) -> &str {
        &self.tab
    }

    fn sample_kind(&self) -> &str {
        &self.kind
    }

    fn sample(&self, definition: &Definition) -> Result<String, SampleError> {
        let example = definition
            .schema()
            .example
            .as_ref()
            .ok_or_else(|| SampleError::NoExample(definition.key().to_string()))?;
        let example = serde_yaml_ng::to_string(example)?;

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.add_template("sample", &self.template)?;
        let tmpl = env.get_template("sample")?;
        let text = tmpl.render(context! {
            name => definition.name.clone(),
            group => definition.group.clone(),
            version => definition.version.clone(),
            kind => definition.kind.clone(),
            example => example,
        })?;
        Ok(text)
    }
}

/// Build template providers for every configured sample, keeping order.
pub fn providers_from_config(samples: &[SampleTemplate]) -> Vec<Box<dyn SampleProvider>> {
    samples
        .iter()
        .map(|s| Box::new(TemplateSampleProvider::from(s)) as Box<dyn SampleProvider>)
        .collect()
}
