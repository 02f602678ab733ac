use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

use crate::config::{LoggingConfig, ServiceConfig};

/// Records tracing fields into a JSON map, later values overwriting earlier ones.
struct FieldRecorder<'a>(&'a mut Map<String, Value>);

impl Visit for FieldRecorder<'_> {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value).into());
    }
}

/// Structured fields of a span, kept in its extensions.
struct SpanFields(Map<String, Value>);

/// Captures span fields as JSON values so events can inherit them.
struct SpanFieldsLayer;

impl<S> Layer<S> for SpanFieldsLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Map::new();
        attrs.record(&mut FieldRecorder(&mut fields));
        span.extensions_mut().insert(SpanFields(fields));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut extensions = span.extensions_mut();
        if let Some(SpanFields(fields)) = extensions.get_mut::<SpanFields>() {
            values.record(&mut FieldRecorder(fields));
        }
    }
}

/// Writes one OpenTelemetry-shaped JSON object per event.
#[derive(Clone)]
struct OtelJsonEventFormatter {
    service_name: String,
    service_version: String,
}

impl OtelJsonEventFormatter {
    fn severity_number(level: &Level) -> u64 {
        match *level {
            Level::TRACE => 1,
            Level::DEBUG => 5,
            Level::INFO => 9,
            Level::WARN => 13,
            Level::ERROR => 17,
        }
    }

    fn render(
        &self,
        level: &Level,
        target: &str,
        file: Option<&str>,
        line: Option<u32>,
        name: &str,
        mut attributes: Map<String, Value>,
    ) -> Value {
        if let Some(file) = file {
            attributes.insert("code.filepath".to_string(), Value::from(file));
        }
        if let Some(line) = line {
            attributes.insert("code.lineno".to_string(), Value::from(line));
        }
        attributes.insert("code.target".to_string(), Value::from(target));

        let body = attributes
            .remove("message")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| name.to_string());

        let mut resource = Map::new();
        resource.insert(
            "service.name".to_string(),
            Value::from(self.service_name.clone()),
        );
        resource.insert(
            "service.version".to_string(),
            Value::from(self.service_version.clone()),
        );

        let mut root = Map::new();
        root.insert(
            "timestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        root.insert("severity_text".to_string(), Value::from(level.as_str()));
        root.insert(
            "severity_number".to_string(),
            Value::from(Self::severity_number(level)),
        );
        root.insert("body".to_string(), Value::from(body));
        root.insert("resource".to_string(), Value::Object(resource));
        root.insert("attributes".to_string(), Value::Object(attributes));
        Value::Object(root)
    }
}

impl<S, N> FormatEvent<S, N> for OtelJsonEventFormatter
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        // Outer spans first, so inner spans and the event itself win on clashes.
        let mut attributes = Map::new();
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                if let Some(SpanFields(fields)) = span.extensions().get::<SpanFields>() {
                    attributes.extend(fields.clone());
                }
            }
        }
        event.record(&mut FieldRecorder(&mut attributes));

        let json = self.render(
            metadata.level(),
            metadata.target(),
            metadata.file(),
            metadata.line(),
            metadata.name(),
            attributes,
        );
        let serialized = serde_json::to_string(&json).map_err(|_| std::fmt::Error)?;
        writer.write_str(&serialized)?;
        writer.write_char('\n')?;
        Ok(())
    }
}

/// JSON output without ANSI styling, with span fields merged into each event.
fn otel_json_layer<S, W>(service: &ServiceConfig, make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    SpanFieldsLayer.and_then(
        fmt::layer()
            .with_ansi(false)
            .with_writer(make_writer)
            .event_format(OtelJsonEventFormatter {
                service_name: service.name.clone(),
                service_version: service.version.clone(),
            }),
    )
}

/// Install the global subscriber described by `logging_config`.
///
/// Fails on an unknown level or if a global subscriber is already set.
pub fn init_logging(
    logging_config: &LoggingConfig,
    service: &ServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let level_filter = logging_config.level_filter()?;

    let filter_layer = EnvFilter::default().add_directive(level_filter.into());

    match logging_config.format.trim().to_lowercase().as_str() {
        "json" => {
            // OTel-aligned structured JSON output
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(otel_json_layer(service, std::io::stdout))
                .try_init()?;
        }
        _ => {
            // Human-readable console output with ANSI colors
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().pretty())
                .try_init()?;
        }
    }
    Ok(())
}
