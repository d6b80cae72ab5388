//! Optical Character Recognition (OCR)
//!
//! Runs the local Tesseract executable over uploaded image bytes. The child
//! process is killed if the caller stops waiting (deadline, client gone).

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use legalens_core::OcrEngine;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Characters Tesseract may emit; narrows recognition to printable ASCII.
pub const DEFAULT_CHAR_WHITELIST: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,;:'\"()[]{}!@#$%^&*-+=<>?/ ";

/// Automatic page segmentation with orientation and script detection.
pub const DEFAULT_PAGE_SEG_MODE: u8 = 1;

pub struct TesseractCli {
    binary: PathBuf,
    page_seg_mode: u8,
    char_whitelist: Option<String>,
}

impl TesseractCli {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            page_seg_mode: DEFAULT_PAGE_SEG_MODE,
            char_whitelist: Some(DEFAULT_CHAR_WHITELIST.to_string()),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_page_seg_mode(mut self, mode: u8) -> Self {
        self.page_seg_mode = mode;
        self
    }

    /// `None` lets Tesseract emit any character.
    pub fn with_char_whitelist(mut self, whitelist: Option<String>) -> Self {
        self.char_whitelist = whitelist;
        self
    }

    /// Arguments for reading the image from stdin and writing text to stdout.
    fn args(&self, language: &str) -> Vec<String> {
        let mut args = vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            language.to_string(),
            "--psm".to_string(),
            self.page_seg_mode.to_string(),
        ];
        if let Some(whitelist) = &self.char_whitelist {
            args.push("-c".to_string());
            args.push(format!("tessedit_char_whitelist={whitelist}"));
        }
        args
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn recognize(&self, image: &[u8], language: &str) -> Result<String> {
        info!(binary = %self.binary.display(), bytes = image.len(), language, "Running Tesseract");

        let mut child = Command::new(&self.binary)
            .args(self.args(language))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn {}", self.binary.display()))?;

        let mut stdin = child.stdin.take().context("Tesseract stdin unavailable")?;
        let feed = async move {
            stdin.write_all(image).await?;
            stdin.shutdown().await
        };

        // Feed and drain concurrently so a large image cannot deadlock the pipes.
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.context("Failed to wait for Tesseract")?;

        if !output.status.success() {
            bail!(
                "Tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        fed.context("Failed to send image to Tesseract")?;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.len(), "Tesseract finished");
        Ok(text)
    }
}

/// Engine used when OCR is switched off; every call fails.
pub struct DisabledOcr;

#[async_trait]
impl OcrEngine for DisabledOcr {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn recognize(&self, _image: &[u8], _language: &str) -> Result<String> {
        bail!("OCR is disabled in configuration")
    }
}
