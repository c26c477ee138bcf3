//! Build a form from a backend template, fill it in and submit it.

use anyhow::{Context, bail};
use formkit::{FormData, FormEvent, FormEventKind, Widget};
use log::info;
use simweb_lib::{Config, Forms, Simulation};
use tokio::sync::mpsc;
use webdom::Document;

use crate::args::Args;

/// Values a run submitted, and the backend's reply unless it was a dry run.
#[derive(Debug)]
pub struct Outcome {
    pub data: FormData,
    pub response: Option<String>,
}

pub async fn run(config: &Config, args: &Args) -> anyhow::Result<Outcome> {
    let api = config.api()?;

    let document = Document::new();
    let main = document.create_element("div");
    document.set_attribute(main, "id", "main");
    document.append_child(document.body(), main);

    let form = Forms::with_path(&api, &config.templates_path)
        .create(&document, main, &args.template)
        .await
        .with_context(|| format!("loading template {}", args.template))?;

    for (name, value) in &args.values {
        if !form.set_value(name, value.as_str()) {
            bail!("template {} has no field named {name}", args.template);
        }
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    form.on(FormEventKind::Submit, move |event| {
        let FormEvent::Submit(data) = event;
        let _ = tx.send(data.clone());
    })
    .context("form does not publish submit events")?;

    form.submit();
    let data = rx.recv().await.context("submit produced no data")?;
    form.remove();

    if args.dry_run {
        info!("dry run, not posting");
        return Ok(Outcome {
            data,
            response: None,
        });
    }

    let response = Simulation::with_path(&api, config.simulation_path.as_str())
        .submit(&data)
        .await
        .context("starting simulation")?;
    Ok(Outcome {
        data,
        response: Some(response),
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const TEMPLATE: &str = r#"{
        "fields": [
            { "name": "nservers", "type": "number" },
            { "name": "ncapacity", "type": "number" },
            { "name": "runtime", "type": "number" }
        ]
    }"#;

    async fn backend(posts: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forms/simulation.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TEMPLATE))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/simulation"))
            .and(body_string("nservers=3&ncapacity=3&runtime=10"))
            .respond_with(ResponseTemplate::new(200).set_body_string("started"))
            .expect(posts)
            .mount(&server)
            .await;
        server
    }

    fn config(server: &MockServer) -> Config {
        Config {
            base_url: server.uri(),
            ..Config::default()
        }
    }

    fn args(extra: &[&str]) -> Args {
        let base = [
            "simweb",
            "--set",
            "nservers=3",
            "--set",
            "ncapacity=3",
            "--set",
            "runtime=10",
        ];
        Args::try_parse_from(base.iter().chain(extra).copied()).unwrap()
    }

    #[tokio::test]
    async fn test_run_posts_filled_form() {
        let server = backend(1).await;

        let outcome = run(&config(&server), &args(&[])).await.unwrap();

        let pairs: Vec<_> = outcome.data.iter().collect();
        assert_eq!(
            pairs,
            vec![("nservers", "3"), ("ncapacity", "3"), ("runtime", "10")]
        );
        assert_eq!(outcome.response.as_deref(), Some("started"));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_post() {
        let server = backend(0).await;

        let outcome = run(&config(&server), &args(&["--dry-run"])).await.unwrap();

        assert_eq!(outcome.data.get("runtime"), Some("10"));
        assert_eq!(outcome.response, None);
    }

    #[tokio::test]
    async fn test_unknown_field_fails_before_posting() {
        let server = backend(0).await;

        let err = run(&config(&server), &args(&["--set", "bogus=1"]))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no field named bogus"));
    }

    #[tokio::test]
    async fn test_missing_template_fails() {
        let server = backend(0).await;

        let err = run(&config(&server), &args(&["--template", "other.json"]))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("loading template other.json"));
    }
}
