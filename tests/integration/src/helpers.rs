//! Test helpers for integration tests
//!
//! Provides a harness that wires a console gateway to ledgers and a
//! platform directory inside a temporary directory.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use modbot_common::AppConfig;
use modbot_console::{build_gateway, ConsoleGateway};
use serde_json::Value;
use tempfile::TempDir;

use crate::fixtures;

/// Running gateway plus the files behind it
pub struct TestHarness {
    pub gateway: ConsoleGateway,
    pub config: AppConfig,
    _dir: TempDir,
}

/// Prepares ledger contents and settings before starting a harness
#[derive(Default)]
pub struct TestHarnessBuilder {
    reports: Option<String>,
    credibility: Option<String>,
    vars: HashMap<&'static str, String>,
}

impl TestHarnessBuilder {
    /// Seed the report ledger
    pub fn reports(mut self, ledger: &Value) -> Self {
        self.reports = Some(ledger.to_string());
        self
    }

    /// Seed the report ledger with raw file contents
    pub fn raw_reports(mut self, contents: &str) -> Self {
        self.reports = Some(contents.to_string());
        self
    }

    /// Seed the credibility ledger
    pub fn credibility(mut self, ledger: &Value) -> Self {
        self.credibility = Some(ledger.to_string());
        self
    }

    /// Set a configuration variable
    pub fn var(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.vars.insert(key, value.into());
        self
    }

    pub async fn start(self) -> Result<TestHarness> {
        let dir = TempDir::new()?;
        let report_path = dir.path().join("reports.json");
        let credibility_path = dir.path().join("credibility.json");
        let directory_path = dir.path().join("directory.json");

        tokio::fs::write(&directory_path, fixtures::directory().to_string()).await?;
        if let Some(contents) = &self.reports {
            tokio::fs::write(&report_path, contents).await?;
        }
        if let Some(contents) = &self.credibility {
            tokio::fs::write(&credibility_path, contents).await?;
        }

        let mut vars = self.vars;
        vars.entry("APP_ENV").or_insert_with(|| "development".to_string());
        vars.insert("REPORT_LEDGER_PATH", path_string(report_path));
        vars.insert("CREDIBILITY_LEDGER_PATH", path_string(credibility_path));
        vars.insert("DIRECTORY_PATH", path_string(directory_path));

        let config = AppConfig::from_lookup(|key| vars.get(key).cloned())?;
        let gateway = build_gateway(&config).await?;

        Ok(TestHarness {
            gateway,
            config,
            _dir: dir,
        })
    }
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// Start with empty ledgers and default settings
    pub async fn start() -> Result<Self> {
        Self::builder().start().await
    }

    /// Send one line as `user` and return the gateway output
    pub async fn send(&self, user: u64, text: &str) -> Result<Vec<String>> {
        Ok(self.gateway.handle_line(&format!("{user}: {text}")).await?)
    }

    /// Send several lines as `user` and return the output of the last one
    pub async fn converse(&self, user: u64, lines: &[&str]) -> Result<Vec<String>> {
        let mut last = Vec::new();
        for line in lines {
            last = self.send(user, line).await?;
        }
        Ok(last)
    }

    /// Report ledger as currently stored on disk
    pub async fn report_ledger(&self) -> Result<Value> {
        read_json(&self.config.storage.report_ledger_path).await
    }

    /// Credibility ledger as currently stored on disk
    pub async fn credibility_ledger(&self) -> Result<Value> {
        read_json(&self.config.storage.credibility_ledger_path).await
    }
}

/// Output lines addressed to `user` as replies
pub fn replies_to(output: &[String], user: u64) -> Vec<String> {
    let prefix = format!("-> {user}: ");
    output
        .iter()
        .filter_map(|line| line.strip_prefix(&prefix).map(str::to_string))
        .collect()
}

/// Output lines that are direct messages to `user`
pub fn direct_messages_to(output: &[String], user: u64) -> Vec<String> {
    let prefix = format!("[dm -> {user}] ");
    output
        .iter()
        .filter_map(|line| line.strip_prefix(&prefix).map(str::to_string))
        .collect()
}

/// Stored report with the given id
pub fn stored_report(ledger: &Value, id: u64) -> Option<Value> {
    ledger["user_reports"]
        .as_object()?
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .find(|r| r["id"] == id)
        .cloned()
}

async fn read_json(path: &std::path::Path) -> Result<Value> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}
