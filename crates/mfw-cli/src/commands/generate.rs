use anyhow::{Context, Result};
use mfw_application::Workbench;
use mfw_core::SessionState;
use std::io::Read;

/// `-` reads the whole of stdin; anything else is used as-is.
pub fn resolve_input(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        Ok(arg.to_string())
    }
}

pub async fn topics(workbench: &Workbench, access_code: &str, material: &str, json: bool) -> Result<()> {
    workbench.verify_access(access_code)?;
    let pipeline = workbench.pipeline().await?;

    tracing::info!(material_len = material.len(), "Generating topics");
    let mut state = SessionState::new();
    let view = pipeline.generate_topics(&mut state, material).await?;
    tracing::debug!(count = view.topics.len(), "Topics ready");

    if json {
        println!("{}", serde_json::to_string_pretty(&view.topics)?);
    } else {
        for (number, topic) in view.numbered_topics() {
            println!("Topic {number:02}");
            println!("{topic}\n");
        }
    }
    Ok(())
}

pub async fn script(workbench: &Workbench, access_code: &str, topic: &str) -> Result<()> {
    workbench.verify_access(access_code)?;
    let pipeline = workbench.pipeline().await?;

    tracing::info!(topic_len = topic.len(), "Generating script");
    let script = pipeline.generate_script(topic).await?;
    tracing::debug!(script_len = script.len(), "Script ready");
    println!("{script}");
    Ok(())
}
