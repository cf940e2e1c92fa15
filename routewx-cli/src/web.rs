use std::sync::Arc;

use anyhow::Context;
use axum::{Form, Router, extract::State, response::Html, routing::get};
use html_escape::{encode_double_quoted_attribute, encode_text};
use routewx_core::{WeatherSource, generate_weather_summary};
use serde::Deserialize;
use tracing::info;

#[derive(Clone)]
struct AppState {
    source: Arc<dyn WeatherSource>,
}

#[derive(Debug, Deserialize)]
struct RouteForm {
    #[serde(default)]
    route: String,
}

pub fn router(source: Arc<dyn WeatherSource>) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .with_state(AppState { source })
}

pub async fn serve(addr: &str, source: Box<dyn WeatherSource>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind web server to {addr}"))?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, router(Arc::from(source)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("Web server failed")?;

    Ok(())
}

async fn index() -> Html<String> {
    Html(render_page("", ""))
}

async fn submit(State(state): State<AppState>, Form(form): Form<RouteForm>) -> Html<String> {
    let summary = if form.route.trim().is_empty() {
        String::new()
    } else {
        generate_weather_summary(state.source.as_ref(), &form.route).await
    };

    Html(render_page(&form.route, &summary))
}

fn render_page(route: &str, summary: &str) -> String {
    let result = if summary.is_empty() {
        String::new()
    } else {
        format!("<h2>Summary</h2>\n<pre>{}</pre>\n", encode_text(summary))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Route Weather Briefing</title>
</head>
<body>
<h1>Route Weather Briefing</h1>
<form method="post" action="/">
<label for="route">Route (airport codes and waypoints separated by commas):</label>
<input type="text" id="route" name="route" value="{route}" placeholder="KJFK, BUBKO, VABB">
<button type="submit">Get briefing</button>
</form>
{result}</body>
</html>
"#,
        route = encode_double_quoted_attribute(route),
    )
}
